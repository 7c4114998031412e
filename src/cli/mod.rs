//! Command-line parsing for the monthly sales dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the pipeline/rendering code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::ChartKind;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "sdash", version, about = "Monthly Sales Dashboard for the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive dashboard.
    ///
    /// This is the default surface: a bare `sdash` behaves like `sdash tui`.
    Tui(DashArgs),
    /// Print the dataset summary and the filtered monthly/cumulative table.
    Report(ReportArgs),
    /// Export the filtered series to CSV and/or a dashboard snapshot JSON.
    Export(ExportArgs),
}

/// Common options shared by all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct DashArgs {
    /// Path to the sales CSV (falls back to the SALES_CSV environment variable).
    #[arg(short = 'c', long)]
    pub csv: Option<PathBuf>,

    /// Generate a seeded synthetic dataset instead of reading a CSV.
    #[arg(long)]
    pub demo: bool,

    /// Number of months to generate with --demo.
    #[arg(long, default_value_t = 12)]
    pub demo_months: usize,

    /// Random seed for --demo.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Initial category (defaults to the first category in the data).
    #[arg(long)]
    pub category: Option<String>,

    /// Chart kind for the fourth panel.
    #[arg(short = 'k', long, value_enum, default_value_t = ChartKind::Line)]
    pub kind: ChartKind,

    /// Start index into the distinct month list (clamped).
    #[arg(long)]
    pub from: Option<usize>,

    /// End index into the distinct month list (clamped).
    #[arg(long)]
    pub to: Option<usize>,
}

/// Options for `sdash report`.
#[derive(Debug, Parser, Clone)]
pub struct ReportArgs {
    #[command(flatten)]
    pub dash: DashArgs,

    /// Render an ASCII chart of the fourth panel below the table.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 16)]
    pub height: usize,
}

/// Options for `sdash export`.
#[derive(Debug, Parser, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub dash: DashArgs,

    /// Write the filtered monthly + cumulative rows to this CSV file.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Write the four computed chart specs to this JSON file.
    #[arg(long)]
    pub snapshot: Option<PathBuf>,
}
