use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use taskzen_domain::{CardId, ColumnId, TagId};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "taskzen")]
#[command(about = "A local-first kanban task board", long_about = None)]
#[command(version, arg_required_else_help = true)]
pub struct Cli {
    /// Data directory for profile boards (or set TASKZEN_DIR)
    #[arg(long, value_name = "DIR", env = "TASKZEN_DIR", global = true)]
    pub dir: Option<PathBuf>,

    /// Seed a fresh board with the demo cards instead of starting empty
    #[arg(long, global = true)]
    pub seed: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Card operations
    Card(CardCommand),
    /// Tag operations
    Tag(TagCommand),
    /// Whole-board operations
    Board(BoardCommand),
    /// Profile operations
    Profile(ProfileCommand),
    /// Export the board as a portable JSON document
    Export(ExportArgs),
    /// Import a portable JSON document, replacing the board
    Import(ImportArgs),
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args)]
pub struct CardCommand {
    #[command(subcommand)]
    pub action: CardAction,
}

#[derive(Subcommand)]
pub enum CardAction {
    /// Add a card to a column
    Add(CardAddArgs),
    /// Edit a card's fields
    Edit(CardEditArgs),
    /// Delete a card permanently
    Delete {
        #[arg(long)]
        id: CardId,
    },
    /// Move a card to the archive
    Archive {
        #[arg(long)]
        id: CardId,
    },
    /// Restore an archived card to todo
    Restore {
        #[arg(long)]
        id: CardId,
    },
    /// Move a card to another column
    Move {
        #[arg(long)]
        id: CardId,
        #[arg(long)]
        to: ColumnId,
        /// Position in the target column (appends when omitted or out of range)
        #[arg(long)]
        index: Option<usize>,
    },
    /// Reorder a card within its column
    Reorder {
        #[arg(long)]
        column: ColumnId,
        #[arg(long)]
        id: CardId,
        #[arg(long)]
        index: usize,
    },
    /// List cards, optionally filtered
    List(CardListArgs),
    /// Get a single card
    Get {
        #[arg(long)]
        id: CardId,
    },
    /// Attach a tag to a card
    Tag {
        #[arg(long)]
        id: CardId,
        #[arg(long)]
        tag_id: TagId,
    },
    /// Detach a tag from a card
    Untag {
        #[arg(long)]
        id: CardId,
        #[arg(long)]
        tag_id: TagId,
    },
}

#[derive(Args)]
pub struct CardAddArgs {
    #[arg(long)]
    pub column: ColumnId,
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub description: Option<String>,
    /// Tag ids to attach (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<TagId>,
}

#[derive(Args)]
pub struct CardEditArgs {
    #[arg(long)]
    pub id: CardId,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long, conflicts_with = "clear_description")]
    pub description: Option<String>,
    /// Remove the card's description
    #[arg(long)]
    pub clear_description: bool,
    /// Replace the card's tag set (repeatable)
    #[arg(long = "tag")]
    pub tags: Option<Vec<TagId>>,
}

#[derive(Args)]
pub struct CardListArgs {
    #[arg(long)]
    pub column: Option<ColumnId>,
    /// Case-insensitive text filter over title and description
    #[arg(long)]
    pub query: Option<String>,
    /// List archived cards only
    #[arg(long)]
    pub archived: bool,
}

#[derive(Args)]
pub struct TagCommand {
    #[command(subcommand)]
    pub action: TagAction,
}

#[derive(Subcommand)]
pub enum TagAction {
    /// Define a new tag
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        color: String,
    },
    /// Edit a tag definition
    Edit {
        #[arg(long)]
        id: TagId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },
    /// Delete a tag and remove it from every card
    Delete {
        #[arg(long)]
        id: TagId,
    },
    /// List tag definitions
    List,
}

#[derive(Args)]
pub struct BoardCommand {
    #[command(subcommand)]
    pub action: BoardAction,
}

#[derive(Subcommand)]
pub enum BoardAction {
    /// Print the full board
    Show,
    /// Remove every card, keeping tags and profile
    Clear,
    /// Card counts per column
    Counts,
}

#[derive(Args)]
pub struct ProfileCommand {
    #[command(subcommand)]
    pub action: ProfileAction,
}

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Create a new profile
    Create {
        #[arg(long)]
        name: String,
    },
    /// List profiles
    List,
    /// Switch the active profile
    Switch {
        #[arg(long)]
        id: Uuid,
    },
    /// Rename a profile
    Rename {
        #[arg(long)]
        id: Uuid,
        #[arg(long)]
        name: String,
    },
    /// Delete a profile and its board
    Delete {
        #[arg(long)]
        id: Uuid,
    },
}

#[derive(Args)]
pub struct ExportArgs {
    /// Write to a file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct ImportArgs {
    /// Read from a file instead of stdin
    #[arg(long)]
    pub input: Option<PathBuf>,
}
