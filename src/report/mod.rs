//! Reporting utilities: monthly/cumulative tables and formatted terminal output.

use chrono::NaiveDate;

use crate::domain::DashboardCharts;

pub mod format;

pub use format::*;

/// One printable row of the filtered series.
#[derive(Debug, Clone)]
pub struct TableRow {
    pub month: NaiveDate,
    pub sales: f64,
    pub cumulative: f64,
}

/// Zip the monthly and cumulative panels into table rows.
///
/// Both panels are projections of the same filtered rows, so they pair 1:1.
pub fn monthly_table(charts: &DashboardCharts) -> Vec<TableRow> {
    charts
        .monthly_line
        .points
        .iter()
        .zip(charts.cumulative.points.iter())
        .map(|(m, c)| TableRow {
            month: m.month,
            sales: m.value,
            cumulative: c.value,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::compute_dashboard;
    use crate::domain::{ChartKind, Dataset, SalesRecord, Selection};

    #[test]
    fn table_pairs_monthly_with_cumulative() {
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
        ])
        .unwrap();
        let selection = Selection {
            category: "A".to_string(),
            chart_kind: ChartKind::Line,
            range: (0, 1),
            clicks: 0,
        };
        let rows = monthly_table(&compute_dashboard(&dataset, &selection));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].sales, 100.0);
        assert_eq!(rows[0].cumulative, 100.0);
        assert_eq!(rows[1].sales, 150.0);
        assert_eq!(rows[1].cumulative, 250.0);
    }
}
