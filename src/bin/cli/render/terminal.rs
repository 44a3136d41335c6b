use flashcards_lib::flashcards::{SessionProgress, SessionStatus};

/// ANSI color codes
#[allow(dead_code)]
pub struct Color;

#[allow(dead_code)]
impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

/// Wrap `text` in `color` when colors are enabled
pub fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

/// One cell per stage plus a final "learned" cell.
///
/// The active stage is bracketed (yellow); once the deck is learned the
/// learned cell is bracketed instead (green). An empty deck has no cells.
pub fn render_progress(progress: &SessionProgress, use_color: bool) -> String {
    if progress.status == SessionStatus::Empty {
        return String::new();
    }

    let learned = progress.status == SessionStatus::Learned;
    let mut cells: Vec<String> = progress
        .stage_sizes
        .iter()
        .enumerate()
        .map(|(stage, count)| {
            if !learned && stage == progress.current_stage {
                paint(&format!("[{:>3}]", count), Color::YELLOW, use_color)
            } else {
                format!(" {:>3} ", count)
            }
        })
        .collect();

    let learned_cell = if learned {
        paint(&format!("[{:>3}]", progress.graduated), Color::GREEN, use_color)
    } else {
        format!(" {:>3} ", progress.graduated)
    };
    cells.push(learned_cell);

    cells.join(" ")
}

/// Card text framed as a stack, `behind` extra edges for the cards queued under it
pub fn render_card(text: &str, behind: usize, use_color: bool) -> String {
    let lines = wrap_lines(text, "  ", 60);
    let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) + 2;

    let mut out = Vec::new();
    for depth in (1..=behind).rev() {
        let edge = format!("{}{}", " ".repeat(depth), "\u{2581}".repeat(width.saturating_sub(depth * 2)));
        out.push(paint(&edge, Color::GRAY, use_color));
    }
    out.push(format!("\u{250c}{}\u{2510}", "\u{2500}".repeat(width)));
    for line in &lines {
        let pad = width - line.chars().count();
        let body = format!("{}{}", line, " ".repeat(pad));
        out.push(format!("\u{2502}{}\u{2502}", paint(&body, Color::BOLD, use_color)));
    }
    out.push(format!("\u{2514}{}\u{2518}", "\u{2500}".repeat(width)));

    out.join("\n")
}

/// Simple word-wrapping for terminal output
pub fn wrap_lines(text: &str, prefix: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let effective_width = max_width.saturating_sub(prefix.len());

    for line in text.lines() {
        if line.chars().count() <= effective_width {
            lines.push(format!("{}{}", prefix, line));
        } else {
            let mut current_line = String::new();
            for word in line.split_whitespace() {
                if current_line.is_empty() {
                    current_line = word.to_string();
                } else if current_line.chars().count() + 1 + word.chars().count() <= effective_width {
                    current_line.push(' ');
                    current_line.push_str(word);
                } else {
                    lines.push(format!("{}{}", prefix, current_line));
                    current_line = word.to_string();
                }
            }
            if !current_line.is_empty() {
                lines.push(format!("{}{}", prefix, current_line));
            }
        }
    }

    if lines.is_empty() {
        lines.push(format!("{}{}", prefix, text));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(stage_sizes: Vec<usize>, graduated: usize, current_stage: usize, status: SessionStatus) -> SessionProgress {
        let total_cards = stage_sizes.iter().sum::<usize>() + graduated;
        SessionProgress {
            stage_sizes,
            graduated,
            current_stage,
            total_cards,
            generation: 0,
            status,
        }
    }

    #[test]
    fn test_progress_brackets_active_stage() {
        let line = render_progress(&progress(vec![2, 1, 0, 0], 0, 1, SessionStatus::InProgress), false);
        assert_eq!(line, "   2  [  1]    0     0     0 ");
    }

    #[test]
    fn test_progress_brackets_learned_cell_when_done() {
        let line = render_progress(&progress(vec![0, 0, 0, 0], 3, 3, SessionStatus::Learned), false);
        assert!(line.ends_with("[  3]"));
        assert_eq!(line.matches('[').count(), 1);
    }

    #[test]
    fn test_empty_deck_renders_nothing() {
        let line = render_progress(&progress(vec![0, 0, 0, 0], 0, 0, SessionStatus::Empty), false);
        assert!(line.is_empty());
    }

    #[test]
    fn test_wrap_long_line() {
        let lines = wrap_lines("one two three four", "", 9);
        assert_eq!(lines, vec!["one two", "three", "four"]);
    }

    #[test]
    fn test_card_has_one_edge_per_card_behind() {
        let rendered = render_card("hrana", 2, false);
        assert!(rendered.contains("hrana"));
        assert_eq!(rendered.lines().count(), 2 + 3);
    }
}
