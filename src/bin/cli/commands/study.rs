use std::io::{self, BufRead, Write};

use anyhow::{bail, Result};

use flashcards_lib::flashcards::{
    Card, CardSide, LearningSession, RandomShuffler, SessionStatus, Shuffler, Transition,
};

use crate::app::App;
use crate::render::terminal::{paint, render_card, render_progress, Color};
use crate::OutputFormat;

pub fn run(
    app: &App,
    deck_name: &str,
    flipped: bool,
    stages: Option<usize>,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let deck = app.find_deck(deck_name)?;

    let stage_count = stages.unwrap_or(app.config.stage_count);
    if stage_count == 0 {
        bail!("--stages must be at least 1");
    }

    let side = starting_side(app.config.start_flipped, flipped);

    let session = LearningSession::with_stage_count(deck.cards.clone(), stage_count, RandomShuffler::new());
    let mut study = Study {
        title: deck.name.clone(),
        session,
        side,
        peek_depth: app.config.peek_depth,
        use_color,
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let summary = study.run(&mut stdin.lock(), &mut stdout.lock(), || app.reload_cards(&deck))?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "deck": deck.name,
                "side": study.side,
                "answered": summary.answered,
                "correct": summary.correct,
                "progress": study.session.progress(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("{} answers, {} correct", summary.answered, summary.correct);
        }
    }

    Ok(())
}

/// `--flipped` turns over whichever side the config starts with
fn starting_side(start_flipped: bool, flipped: bool) -> CardSide {
    let side = if start_flipped { CardSide::Back } else { CardSide::Front };
    if flipped {
        side.flipped()
    } else {
        side
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input {
    Reveal,
    Judge(bool),
    Reset,
    Flip,
    Quit,
    Unknown,
}

fn parse_input(line: &str) -> Input {
    match line {
        "" => Input::Reveal,
        "y" | "yes" => Input::Judge(true),
        "n" | "no" => Input::Judge(false),
        "r" | "reset" => Input::Reset,
        "f" | "flip" => Input::Flip,
        "q" | "quit" => Input::Quit,
        _ => Input::Unknown,
    }
}

/// Next trimmed, lowercased line; `None` at end of input
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_lowercase()))
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StudySummary {
    pub answered: usize,
    pub correct: usize,
}

/// Interactive study loop over one learning session
pub struct Study<S> {
    pub title: String,
    pub session: LearningSession<Card, S>,
    pub side: CardSide,
    pub peek_depth: usize,
    pub use_color: bool,
}

impl<S: Shuffler> Study<S> {
    /// Drive the session from `input` until the learner quits or input ends.
    ///
    /// `reload` supplies the deck's current cards whenever the session restarts,
    /// so edits made since the session began are picked up.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
        mut reload: impl FnMut() -> Result<Vec<Card>>,
    ) -> Result<StudySummary> {
        let mut summary = StudySummary::default();

        loop {
            self.show_state(output)?;

            let Some(mut line) = read_line(input)? else { break };
            let mut command = parse_input(&line);

            if command == Input::Reveal && self.session.status() == SessionStatus::InProgress {
                self.show_answer(output)?;
                let Some(next) = read_line(input)? else { break };
                command = parse_input(&next);
                line = next;
            }

            match command {
                Input::Judge(correct) => {
                    if self.session.status() != SessionStatus::InProgress {
                        writeln!(output, "Nothing left to answer.")?;
                        continue;
                    }
                    let transition = self.session.judge(correct);
                    summary.answered += 1;
                    if correct {
                        summary.correct += 1;
                    }
                    self.show_transition(output, transition)?;
                }
                Input::Reset => {
                    let generation = self.session.reset(reload()?);
                    writeln!(output, "Restarted (session #{}).", generation + 1)?;
                }
                Input::Flip => {
                    self.side = self.side.flipped();
                    let generation = self.session.reset(reload()?);
                    writeln!(output, "Flipped deck, restarted (session #{}).", generation + 1)?;
                }
                Input::Quit => break,
                Input::Reveal => {}
                Input::Unknown => writeln!(output, "Unrecognized input '{}'.", line)?,
            }
        }

        Ok(summary)
    }

    fn show_state<W: Write>(&self, output: &mut W) -> Result<()> {
        let use_color = self.use_color;

        writeln!(output)?;
        writeln!(output, "{}", paint(&self.title, Color::BOLD, use_color))?;
        let progress = render_progress(&self.session.progress(), use_color);
        if !progress.is_empty() {
            writeln!(output, "{}", progress)?;
        }

        match self.session.status() {
            SessionStatus::InProgress => {
                let Some(card) = self.session.front() else {
                    bail!("active stage is empty while the session is in progress");
                };
                let behind = self.session.peek_front(self.peek_depth).len().saturating_sub(1);
                writeln!(output, "{}", render_card(card.prompt(self.side), behind, use_color))?;
                writeln!(output, "[Enter] reveal  [y] knew it  [n] missed it  [r] restart  [f] flip  [q] quit")?;
            }
            SessionStatus::Learned => {
                writeln!(output, "{}", paint("Deck learned!", Color::GREEN, use_color))?;
                writeln!(output, "[r] restart  [f] flip  [q] quit")?;
            }
            SessionStatus::Empty => {
                writeln!(output, "{}", paint("Deck empty!", Color::YELLOW, use_color))?;
                writeln!(output, "[r] reload  [q] quit")?;
            }
        }

        output.flush()?;
        Ok(())
    }

    fn show_answer<W: Write>(&self, output: &mut W) -> Result<()> {
        if let Some(card) = self.session.front() {
            writeln!(output, "{}", render_card(card.answer(self.side), 0, self.use_color))?;
            writeln!(output, "Correct? [y/n]")?;
            output.flush()?;
        }
        Ok(())
    }

    fn show_transition<W: Write>(&self, output: &mut W, transition: Transition) -> Result<()> {
        let use_color = self.use_color;
        let message = match transition {
            Transition::Graduated => paint("Learned!", Color::GREEN, use_color),
            Transition::Promoted { to } => paint(&format!("Up to stage {}", to + 1), Color::CYAN, use_color),
            Transition::Demoted { to } => paint(&format!("Back to stage {}", to + 1), Color::RED, use_color),
            Transition::Requeued => paint("Again later", Color::RED, use_color),
        };
        writeln!(output, "{}", message)?;
        Ok(())
    }
}
