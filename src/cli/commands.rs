use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::model::note::NoteColor;

#[derive(Parser)]
#[command(name = "noted", about = concat!("noted v", env!("CARGO_PKG_VERSION"), " - notes in your terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use a different data directory
    #[arg(short = 'C', long = "data-dir", global = true)]
    pub data_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List notes in display order
    List(ListArgs),
    /// Show one note
    Show(ShowArgs),
    /// Create a note
    Add(AddArgs),
    /// Change fields of a note
    Edit(EditArgs),
    /// Pin a note
    Pin(IdArg),
    /// Unpin a note
    Unpin(IdArg),
    /// Permanently delete a note
    Delete(IdArg),
    /// Write noted_backup.json with every note
    Export(ExportArgs),
    /// Show or change the color theme
    Theme(ThemeArgs),
    /// Render markdown text the way the preview pane does
    Preview(PreviewArgs),
    /// Count notes by category and color
    Stats,
    /// List or edit the configured categories
    Category(CategoryCmd),
    /// View or manage the recovery log
    Recovery(RecoveryCmd),
}

// ---------------------------------------------------------------------------
// Read command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ListArgs {
    /// Filter: all, pinned, or a category name
    #[arg(long, default_value = "all")]
    pub filter: String,
    /// Case-insensitive text to look for in titles and contents
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Note ID
    pub id: u64,
    /// Print the rendered preview markup instead of the raw content
    #[arg(long)]
    pub preview: bool,
}

#[derive(Args)]
pub struct IdArg {
    /// Note ID
    pub id: u64,
}

// ---------------------------------------------------------------------------
// Write command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct AddArgs {
    /// Note title
    pub title: String,
    /// Note body (markdown)
    #[arg(long, default_value = "")]
    pub content: String,
    /// Category (default: the configured default category)
    #[arg(long)]
    pub category: Option<String>,
    /// Pin the new note
    #[arg(long)]
    pub pin: bool,
    /// Color tag
    #[arg(long)]
    pub color: Option<NoteColor>,
}

#[derive(Args)]
pub struct EditArgs {
    /// Note ID
    pub id: u64,
    /// New title
    #[arg(long)]
    pub title: Option<String>,
    /// New body (markdown)
    #[arg(long)]
    pub content: Option<String>,
    /// New category
    #[arg(long)]
    pub category: Option<String>,
    /// Pin the note
    #[arg(long, conflicts_with = "unpin")]
    pub pin: bool,
    /// Unpin the note
    #[arg(long)]
    pub unpin: bool,
    /// New color tag
    #[arg(long)]
    pub color: Option<NoteColor>,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Directory to write noted_backup.json into (default: current directory)
    #[arg(long, short)]
    pub output: Option<String>,
}

// ---------------------------------------------------------------------------
// Preferences
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ThemeArgs {
    /// Theme to switch to (default: print the current theme)
    pub action: Option<ThemeAction>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ThemeAction {
    Light,
    Dark,
    Toggle,
}

#[derive(Args)]
pub struct PreviewArgs {
    /// Markdown text to render
    pub text: String,
}

#[derive(Args)]
pub struct CategoryCmd {
    #[command(subcommand)]
    pub action: Option<CategoryAction>,
}

#[derive(Subcommand)]
pub enum CategoryAction {
    /// List configured categories (default)
    List,
    /// Add a category to config.toml
    Add(CategoryNameArg),
    /// Remove a category from config.toml
    Remove(CategoryNameArg),
}

#[derive(Args)]
pub struct CategoryNameArg {
    /// Category name (lowercase)
    pub name: String,
}

// ---------------------------------------------------------------------------
// Recovery log
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct RecoveryCmd {
    #[command(subcommand)]
    pub action: Option<RecoveryAction>,
    /// Maximum number of entries to show (default: 10)
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Subcommand)]
pub enum RecoveryAction {
    /// Remove old entries
    Prune(RecoveryPruneArgs),
    /// Print the absolute path to the recovery log
    Path,
}

#[derive(Args)]
pub struct RecoveryPruneArgs {
    /// Remove entries older than this timestamp (default: 30 days ago)
    #[arg(long)]
    pub before: Option<String>,
    /// Remove all entries
    #[arg(long)]
    pub all: bool,
}
