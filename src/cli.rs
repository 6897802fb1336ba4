use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "frontier",
    version,
    about = "Rank AI models by download velocity, momentum and recency"
)]
pub struct Cli {
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a batch of models and print the leaderboard report
    Score(ScoreCommand),
    /// Append today's snapshot of absolute counters to the history log
    Snapshot(SnapshotCommand),
    /// Show how much history has been captured
    History(HistoryCommand),
    /// Print the day-over-day download series for one model
    Series(SeriesCommand),
    /// Group pipeline tags into the category taxonomy
    Categories(CategoriesCommand),
    /// Extract and rank benchmark results from model details
    Benchmarks(BenchmarksCommand),
    /// Print license, paper and deployability signals for model details
    Signals(SignalsCommand),
}

#[derive(Args)]
pub struct RootArgs {
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
}

#[derive(Args)]
pub struct ScoreCommand {
    pub models: PathBuf,
    #[command(flatten)]
    pub root: RootArgs,
    #[arg(long)]
    pub tags: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Args)]
pub struct SnapshotCommand {
    #[arg(required = true)]
    pub models: Vec<PathBuf>,
    #[command(flatten)]
    pub root: RootArgs,
}

#[derive(Args)]
pub struct HistoryCommand {
    #[command(flatten)]
    pub root: RootArgs,
}

#[derive(Args)]
pub struct SeriesCommand {
    pub model_id: String,
    #[command(flatten)]
    pub root: RootArgs,
    #[arg(long)]
    pub window: Option<usize>,
}

#[derive(Args)]
pub struct CategoriesCommand {
    pub tags: PathBuf,
}

#[derive(Args)]
pub struct BenchmarksCommand {
    pub details: PathBuf,
    #[arg(long, default_value_t = crate::views::benchmarks::DEFAULT_HIGHLIGHT_LIMIT)]
    pub limit: usize,
}

#[derive(Args)]
pub struct SignalsCommand {
    pub details: PathBuf,
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}
