//! Export the filtered series to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream
//! scripts: one row per filtered record, with the cumulative total alongside.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::{DashboardCharts, Selection};
use crate::error::AppError;

/// Write the filtered monthly + cumulative rows to a CSV file.
pub fn write_results_csv(
    path: &Path,
    charts: &DashboardCharts,
    selection: &Selection,
) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::usage(format!(
            "Failed to create export CSV '{}': {e}",
            path.display()
        ))
    })?;

    writeln!(file, "month,category,sales,cumulative_sales")
        .map_err(|e| AppError::usage(format!("Failed to write export CSV header: {e}")))?;

    // monthly and cumulative are projections of the same filtered rows, so
    // they zip 1:1.
    for (monthly, cum) in charts
        .monthly_line
        .points
        .iter()
        .zip(charts.cumulative.points.iter())
    {
        writeln!(
            file,
            "{},{},{:.2},{:.2}",
            monthly.month, selection.category, monthly.value, cum.value
        )
        .map_err(|e| AppError::usage(format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::compute_dashboard;
    use crate::domain::{ChartKind, Dataset, SalesRecord};
    use chrono::NaiveDate;

    #[test]
    fn writes_one_row_per_filtered_record() {
        let dataset = Dataset::from_records(vec![
            SalesRecord {
                month: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
                category: "A".to_string(),
                sales: 100.0,
            },
            SalesRecord {
                month: NaiveDate::from_ymd_opt(2023, 2, 1).unwrap(),
                category: "A".to_string(),
                sales: 150.0,
            },
            SalesRecord {
                month: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
                category: "B".to_string(),
                sales: 200.0,
            },
        ])
        .unwrap();
        let selection = Selection {
            category: "A".to_string(),
            chart_kind: ChartKind::Line,
            range: (0, 1),
            clicks: 0,
        };
        let charts = compute_dashboard(&dataset, &selection);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_results_csv(&path, &charts, &selection).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "month,category,sales,cumulative_sales");
        assert_eq!(lines[1], "2023-01-01,A,100.00,100.00");
        assert_eq!(lines[2], "2023-02-01,A,150.00,250.00");
    }
}
