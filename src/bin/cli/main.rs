mod app;
mod commands;
mod render;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "flashcards-cli", about = "Flashcard decks and staged study sessions", version)]
struct Cli {
    /// Directory holding decks.json and config.toml
    #[arg(long, global = true, env = "FLASHCARDS_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// List all decks
    Decks,

    /// Create a new deck
    NewDeck {
        /// Deck name
        name: String,
    },

    /// Rename a deck
    RenameDeck {
        /// Deck name (case-insensitive prefix match)
        deck: String,
        /// New name
        name: String,
    },

    /// Delete a deck and its cards
    DeleteDeck {
        /// Deck name (case-insensitive prefix match)
        deck: String,
    },

    /// List the cards of a deck
    Cards {
        /// Deck name (case-insensitive prefix match)
        deck: String,
    },

    /// Append a card to a deck
    Add {
        /// Deck name (case-insensitive prefix match)
        deck: String,
        /// Front text
        front: String,
        /// Back text
        back: String,
    },

    /// Change the text of a card
    Edit {
        /// Deck name (case-insensitive prefix match)
        deck: String,
        /// Card position as shown by `cards` (1-based)
        position: usize,
        /// New front text
        #[arg(long)]
        front: Option<String>,
        /// New back text
        #[arg(long)]
        back: Option<String>,
    },

    /// Remove a card from a deck
    Remove {
        /// Deck name (case-insensitive prefix match)
        deck: String,
        /// Card position as shown by `cards` (1-based)
        position: usize,
    },

    /// Move a card to another position
    Move {
        /// Deck name (case-insensitive prefix match)
        deck: String,
        /// Current position (1-based)
        from: usize,
        /// Target position (1-based)
        to: usize,
    },

    /// Add cards from a tab-separated file (one `front<TAB>back` per line, "-" for stdin; lines starting with "# " are comments)
    Import {
        /// Deck name (case-insensitive prefix match)
        deck: String,
        /// File to read
        file: PathBuf,
    },

    /// Study a deck interactively
    Study {
        /// Deck name (case-insensitive prefix match)
        deck: String,
        /// Start on the opposite face from the configured one (back first by default)
        #[arg(long)]
        flipped: bool,
        /// Number of stages (overrides config.toml)
        #[arg(long)]
        stages: Option<usize>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let app = app::App::new(cli.data_dir)?;
    let use_color = !cli.no_color && app.config.color && std::io::stdout().is_terminal();

    match cli.command {
        Command::Decks => {
            commands::decks::run_list(&app, &cli.format, use_color)?;
        }
        Command::NewDeck { name } => {
            commands::decks::run_create(&app, name, &cli.format)?;
        }
        Command::RenameDeck { deck, name } => {
            commands::decks::run_rename(&app, &deck, name, &cli.format)?;
        }
        Command::DeleteDeck { deck } => {
            commands::decks::run_delete(&app, &deck, &cli.format)?;
        }
        Command::Cards { deck } => {
            commands::cards::run_list(&app, &deck, &cli.format, use_color)?;
        }
        Command::Add { deck, front, back } => {
            commands::cards::run_add(&app, &deck, front, back, &cli.format)?;
        }
        Command::Edit { deck, position, front, back } => {
            commands::cards::run_edit(&app, &deck, position, front, back, &cli.format)?;
        }
        Command::Remove { deck, position } => {
            commands::cards::run_remove(&app, &deck, position, &cli.format)?;
        }
        Command::Move { deck, from, to } => {
            commands::cards::run_move(&app, &deck, from, to)?;
        }
        Command::Import { deck, file } => {
            commands::cards::run_import(&app, &deck, &file, &cli.format)?;
        }
        Command::Study { deck, flipped, stages } => {
            commands::study::run(&app, &deck, flipped, stages, &cli.format, use_color)?;
        }
    }

    Ok(())
}
