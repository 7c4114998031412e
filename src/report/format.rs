//! Formatted terminal output for the `report` subcommand.
//!
//! We keep formatting code in one place so:
//! - the pipeline stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use chrono::NaiveDate;

use crate::app::pipeline::clamp_range;
use crate::domain::{Background, Dataset, Selection};
use crate::report::TableRow;

/// Short month label used across table, chart axes, and the TUI ("Jan 2023").
pub fn month_label(month: NaiveDate) -> String {
    month.format("%b %Y").to_string()
}

/// Format the dataset summary block.
pub fn format_dataset_summary(dataset: &Dataset) -> String {
    let stats = dataset.stats();
    let mut out = String::new();

    out.push_str("=== sdash - Monthly Sales Dashboard ===\n");
    out.push_str(&format!("Rows: {}\n", stats.n_records));
    out.push_str(&format!(
        "Categories ({}): {}\n",
        stats.n_categories,
        dataset.categories().join(", ")
    ));
    out.push_str(&format!(
        "Months: {} → {}\n",
        month_label(stats.month_min),
        month_label(stats.month_max)
    ));
    out.push_str(&format!("Total sales: {:.2}\n", stats.sales_total));
    out
}

/// Format the current selection on one line.
///
/// `months` is the distinct month list of the selected category; an empty
/// list means the category matched nothing (e.g. a stale or mistyped name).
pub fn format_selection(selection: &Selection, months: &[NaiveDate]) -> String {
    let window = match clamp_range(selection.range, months.len()) {
        Some((lo, hi)) => format!("{} → {}", month_label(months[lo]), month_label(months[hi])),
        None => "(category not present in the data)".to_string(),
    };
    format!(
        "Category: {} | Chart: {} | Window: {} | Background: {}",
        selection.category,
        selection.chart_kind.display_name(),
        window,
        Background::from_clicks(selection.clicks).display_name()
    )
}

/// Format the filtered monthly + cumulative table.
pub fn format_table(rows: &[TableRow]) -> String {
    if rows.is_empty() {
        return "(no rows match the current selection)\n".to_string();
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{:<10} {:>12} {:>12}\n",
        "month", "sales", "cumulative"
    ));
    for row in rows {
        out.push_str(&format!(
            "{:<10} {:>12.2} {:>12.2}\n",
            month_label(row.month),
            row.sales,
            row.cumulative
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ChartKind;

    fn ymd(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    #[test]
    fn empty_table_renders_a_hint_not_headers() {
        let out = format_table(&[]);
        assert!(out.contains("no rows"));
        assert!(!out.contains("cumulative"));
    }

    #[test]
    fn table_has_one_line_per_row_plus_header() {
        let rows = vec![
            TableRow {
                month: ymd(2023, 1),
                sales: 100.0,
                cumulative: 100.0,
            },
            TableRow {
                month: ymd(2023, 2),
                sales: 150.0,
                cumulative: 250.0,
            },
        ];
        let out = format_table(&rows);
        assert_eq!(out.lines().count(), 3);
        assert!(out.contains("Jan 2023"));
        assert!(out.contains("250.00"));
    }

    #[test]
    fn stale_category_window_is_called_out() {
        let selection = Selection {
            category: "Nope".to_string(),
            chart_kind: ChartKind::Line,
            range: (0, 0),
            clicks: 0,
        };
        let out = format_selection(&selection, &[]);
        assert!(out.contains("not present"));
    }
}
