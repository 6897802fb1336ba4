mod cli;
mod config;
mod error;
mod history;
mod input;
mod report;
mod score;
mod types;
mod views;

use crate::error::FrontierError;
use crate::history::{AppendOutcome, FileSnapshotStore, SnapshotStore};
use crate::types::config::FrontierConfig;
use clap::Parser;
use std::path::Path;
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_settings(root: &Path) -> Result<FrontierConfig, FrontierError> {
    if !root.exists() {
        return Err(FrontierError::PathNotFound(root.display().to_string()));
    }
    let loaded = config::load_config(root)?;
    if loaded.is_none() {
        tracing::debug!(root = %root.display(), "no frontier.toml found, using defaults");
    }
    Ok(loaded.unwrap_or_default())
}

fn open_store(root: &Path, cfg: &FrontierConfig) -> FileSnapshotStore {
    FileSnapshotStore::new(
        config::resolve_path(root, cfg.history_path()),
        cfg.max_snapshots(),
    )
}

fn run() -> Result<i32, FrontierError> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        cli::Commands::Score(cmd) => {
            let cfg = load_settings(&cmd.root.root)?;
            let store = open_store(&cmd.root.root, &cfg);
            let models = input::load_models(&cmd.models)?;
            let snapshots = store.load();
            let series = history::series_by_id(&models, &snapshots, cfg.series_window());
            let scored = score::score_models(&models, Some(&series), &cfg.weights());

            let known_tags = match &cmd.tags {
                Some(path) => input::load_pipeline_tags(path)?,
                None => Vec::new(),
            };
            let mut limits = cfg.leaderboard_limits();
            if let Some(limit) = cmd.limit {
                limits.limit = limit;
            }
            let leaderboard = views::rank::build_report(
                &scored,
                history::history_stats(&snapshots),
                &known_tags,
                &limits,
            );

            let output_format = match cmd.format {
                cli::ReportFormat::Json => report::OutputFormat::Json,
                cli::ReportFormat::Md => report::OutputFormat::Md,
            };
            let rendered = report::render(&leaderboard, output_format)?;
            println!("{rendered}");
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Snapshot(cmd) => {
            let cfg = load_settings(&cmd.root.root)?;
            let store = open_store(&cmd.root.root, &cfg);
            let batches = cmd
                .models
                .iter()
                .map(|path| input::load_models(path))
                .collect::<Result<Vec<_>, _>>()?;
            let merged = history::merge_batches(batches);

            match store.append(&merged)? {
                AppendOutcome::Appended { date, models } => {
                    println!(
                        "snapshot: captured {models} model(s) for {date} in {}",
                        store.path().display()
                    );
                }
                AppendOutcome::AlreadyCaptured { date } => {
                    println!("snapshot: {date} already captured, nothing written");
                }
            }
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::History(cmd) => {
            let cfg = load_settings(&cmd.root.root)?;
            let stats = history::history_stats(&open_store(&cmd.root.root, &cfg).load());
            match (stats.first_date, stats.last_date) {
                (Some(first), Some(last)) => {
                    println!("history: {} snapshot(s), {first} to {last}", stats.days)
                }
                _ => println!("history: no snapshots captured yet"),
            }
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Series(cmd) => {
            let cfg = load_settings(&cmd.root.root)?;
            let snapshots = open_store(&cmd.root.root, &cfg).load();
            let window = cmd.window.unwrap_or_else(|| cfg.series_window()).max(1);
            match history::derive_series(&cmd.model_id, &snapshots, window) {
                Some(series) => {
                    let points = series
                        .iter()
                        .map(|point| format!("{point:.0}"))
                        .collect::<Vec<_>>();
                    println!("series {}: {}", cmd.model_id, points.join(", "));
                }
                None => println!("series {}: no series available", cmd.model_id),
            }
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Categories(cmd) => {
            let tags = input::load_pipeline_tags(&cmd.tags)?;
            for group in views::categories::group_pipeline_tags(&tags) {
                let ids = group
                    .tags
                    .iter()
                    .map(|tag| tag.id.as_str())
                    .collect::<Vec<_>>();
                println!("{} ({}): {}", group.label, group.id, ids.join(", "));
            }
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Benchmarks(cmd) => {
            let details = input::load_details(&cmd.details)?;
            let entries = details
                .iter()
                .flat_map(views::benchmarks::extract_benchmarks)
                .collect::<Vec<_>>();
            let highlights = views::benchmarks::select_benchmark_highlights(&entries, cmd.limit);
            if highlights.is_empty() {
                println!("benchmarks: no results");
                return Ok(exit_code::SUCCESS);
            }
            for highlight in &highlights {
                let entry = &highlight.entry;
                println!(
                    "- {} | {} | {} | {}: {}",
                    entry.model_id,
                    entry.task.as_deref().unwrap_or("-"),
                    entry.dataset.as_deref().unwrap_or("-"),
                    entry.metric.as_deref().unwrap_or("-"),
                    entry.value
                );
            }
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Signals(cmd) => {
            let details = input::load_details(&cmd.details)?;
            let signals = details
                .iter()
                .map(views::deploy::detail_signal_meta)
                .collect::<Vec<_>>();
            println!("{}", serde_json::to_string_pretty(&signals)?);
            Ok(exit_code::SUCCESS)
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
