//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - resolves the dataset (CSV path, environment fallback, or --demo)
//! - builds the initial selection
//! - dispatches to the TUI, report printing, or exports

use std::path::PathBuf;

use clap::Parser;

use crate::cli::{Command, DashArgs, ExportArgs, ReportArgs};
use crate::data::{SampleConfig, generate_sample};
use crate::domain::{Dataset, Selection};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `sdash` binary.
pub fn run() -> Result<(), AppError> {
    // We want `sdash` and `sdash --demo` to behave like `sdash tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing. This preserves a clean clap structure while
    // retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Tui(args) => crate::tui::run(args),
        Command::Report(args) => handle_report(args),
        Command::Export(args) => handle_export(args),
    }
}

/// Resolve the dataset from the shared args: `--demo`, `--csv`, or the
/// `SALES_CSV` environment variable (also read from `.env`).
pub fn resolve_dataset(args: &DashArgs) -> Result<Dataset, AppError> {
    if args.demo {
        return generate_sample(&SampleConfig {
            months: args.demo_months,
            seed: args.seed,
        });
    }

    let path = match &args.csv {
        Some(path) => path.clone(),
        None => csv_path_from_env()?,
    };
    crate::io::ingest::load_sales_csv(&path)
}

fn csv_path_from_env() -> Result<PathBuf, AppError> {
    dotenvy::dotenv().ok();
    std::env::var("SALES_CSV").map(PathBuf::from).map_err(|_| {
        AppError::usage(
            "No input: pass --csv <PATH>, set SALES_CSV in the environment (.env), or use --demo.",
        )
    })
}

/// Build the initial selection from the shared args.
///
/// A `--category` that does not exist in the data is kept as-is: the
/// pipeline treats it as an empty filter, and the report calls it out.
pub fn selection_from_args(dataset: &Dataset, args: &DashArgs) -> Selection {
    let category = args
        .category
        .clone()
        .unwrap_or_else(|| dataset.first_category().to_string());
    let months = pipeline::distinct_months(dataset, &category);
    let full_end = months.len().saturating_sub(1);

    Selection {
        category,
        chart_kind: args.kind,
        range: (args.from.unwrap_or(0), args.to.unwrap_or(full_end)),
        clicks: 0,
    }
}

fn handle_report(args: ReportArgs) -> Result<(), AppError> {
    let dataset = resolve_dataset(&args.dash)?;
    let selection = selection_from_args(&dataset, &args.dash);
    let charts = pipeline::compute_dashboard(&dataset, &selection);
    let months = pipeline::distinct_months(&dataset, &selection.category);

    print!("{}", crate::report::format_dataset_summary(&dataset));
    println!("{}", crate::report::format_selection(&selection, &months));
    println!();
    print!(
        "{}",
        crate::report::format_table(&crate::report::monthly_table(&charts))
    );

    if args.plot {
        println!();
        print!(
            "{}",
            crate::plot::render_ascii_chart(&charts.by_kind, args.width, args.height)
        );
    }

    Ok(())
}

fn handle_export(args: ExportArgs) -> Result<(), AppError> {
    if args.out.is_none() && args.snapshot.is_none() {
        return Err(AppError::usage(
            "Nothing to export: pass --out <CSV> and/or --snapshot <JSON>.",
        ));
    }

    let dataset = resolve_dataset(&args.dash)?;
    let selection = selection_from_args(&dataset, &args.dash);
    let charts = pipeline::compute_dashboard(&dataset, &selection);

    if let Some(path) = &args.out {
        crate::io::export::write_results_csv(path, &charts, &selection)?;
        println!("Wrote results CSV: {}", path.display());
    }
    if let Some(path) = &args.snapshot {
        crate::io::snapshot::write_snapshot_json(path, &charts, &selection)?;
        println!("Wrote snapshot JSON: {}", path.display());
    }

    Ok(())
}

/// Rewrite argv so `sdash` defaults to `sdash tui`.
///
/// Rules:
/// - `sdash`                       -> `sdash tui`
/// - `sdash --demo ...`            -> `sdash tui --demo ...`
/// - `sdash --help/--version/-h`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "tui" | "report" | "export");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChartKind, SalesRecord};
    use chrono::NaiveDate;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_tui() {
        assert_eq!(rewrite_args(argv(&["sdash"])), argv(&["sdash", "tui"]));
    }

    #[test]
    fn leading_flag_is_routed_to_tui() {
        assert_eq!(
            rewrite_args(argv(&["sdash", "--demo"])),
            argv(&["sdash", "tui", "--demo"])
        );
    }

    #[test]
    fn subcommands_and_help_pass_through() {
        assert_eq!(
            rewrite_args(argv(&["sdash", "report", "--plot"])),
            argv(&["sdash", "report", "--plot"])
        );
        assert_eq!(rewrite_args(argv(&["sdash", "--help"])), argv(&["sdash", "--help"]));
    }

    #[test]
    fn default_selection_covers_the_full_month_range() {
        let dataset = Dataset::from_records(vec![
            SalesRecord {
                month: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
                category: "A".to_string(),
                sales: 1.0,
            },
            SalesRecord {
                month: NaiveDate::from_ymd_opt(2023, 3, 1).unwrap(),
                category: "A".to_string(),
                sales: 2.0,
            },
        ])
        .unwrap();
        let args = DashArgs {
            csv: None,
            demo: false,
            demo_months: 12,
            seed: 42,
            category: None,
            kind: ChartKind::Line,
            from: None,
            to: None,
        };
        let selection = selection_from_args(&dataset, &args);
        assert_eq!(selection.category, "A");
        assert_eq!(selection.range, (0, 1));
        assert_eq!(selection.clicks, 0);
    }
}
