//! Read/write dashboard snapshot JSON files.
//!
//! A snapshot is the "portable" representation of one dashboard state:
//! - the selection that produced it (category, kind, range, clicks)
//! - the four computed chart specs, points included
//!
//! The schema is defined by `domain::SnapshotFile`.

use std::fs::File;
use std::path::Path;

use crate::domain::{DashboardCharts, Selection, SnapshotFile};
use crate::error::AppError;

/// Write a snapshot JSON file.
pub fn write_snapshot_json(
    path: &Path,
    charts: &DashboardCharts,
    selection: &Selection,
) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::usage(format!(
            "Failed to create snapshot JSON '{}': {e}",
            path.display()
        ))
    })?;

    let snapshot = SnapshotFile {
        tool: "sdash".to_string(),
        category: selection.category.clone(),
        chart_kind: selection.chart_kind,
        range: [selection.range.0, selection.range.1],
        clicks: selection.clicks,
        charts: charts.clone(),
    };

    serde_json::to_writer_pretty(file, &snapshot)
        .map_err(|e| AppError::usage(format!("Failed to write snapshot JSON: {e}")))?;

    Ok(())
}

/// Read a snapshot JSON file.
pub fn read_snapshot_json(path: &Path) -> Result<SnapshotFile, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::usage(format!(
            "Failed to open snapshot JSON '{}': {e}",
            path.display()
        ))
    })?;
    let snapshot: SnapshotFile = serde_json::from_reader(file)
        .map_err(|e| AppError::usage(format!("Invalid snapshot JSON: {e}")))?;
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::compute_dashboard;
    use crate::domain::{ChartKind, Dataset, SalesRecord};
    use chrono::NaiveDate;

    #[test]
    fn snapshot_round_trips() {
        let dataset = Dataset::from_records(vec![SalesRecord {
            month: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            category: "A".to_string(),
            sales: 42.5,
        }])
        .unwrap();
        let selection = Selection {
            category: "A".to_string(),
            chart_kind: ChartKind::Bar,
            range: (0, 0),
            clicks: 7,
        };
        let charts = compute_dashboard(&dataset, &selection);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        write_snapshot_json(&path, &charts, &selection).unwrap();

        let snapshot = read_snapshot_json(&path).unwrap();
        assert_eq!(snapshot.tool, "sdash");
        assert_eq!(snapshot.category, "A");
        assert_eq!(snapshot.chart_kind, ChartKind::Bar);
        assert_eq!(snapshot.clicks, 7);
        assert_eq!(snapshot.charts.monthly_line.points.len(), 1);
        assert_eq!(snapshot.charts.monthly_line.points[0].value, 42.5);
        assert_eq!(
            snapshot.charts.by_kind.kind,
            charts.by_kind.kind
        );
    }
}
