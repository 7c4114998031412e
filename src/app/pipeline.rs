//! Shared dashboard pipeline used by both the CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! category filter -> month window -> cumulative sum -> four chart specs
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).
//! Everything here is a pure function of `(dataset, selection)`: no terminal,
//! no I/O, no hidden state, so it is safely callable on every UI event.

use chrono::NaiveDate;

use crate::domain::{
    Background, ChartKind, ChartSpec, DashboardCharts, Dataset, Selection, SeriesKind, SeriesPoint,
};

/// Compute all four chart panels for the current selection.
///
/// Never fails: a selection that matches nothing (stale category, empty
/// window) yields four empty specs, which render as "no data".
pub fn compute_dashboard(dataset: &Dataset, selection: &Selection) -> DashboardCharts {
    let background = Background::from_clicks(selection.clicks);
    let filtered = filtered_points(dataset, selection);
    let cumulative_points = cumulative(&filtered);

    let by_kind_title = match selection.chart_kind {
        ChartKind::Line => "Monthly Sales (Lines)",
        ChartKind::Bar => "Monthly Sales (Bars)",
    };

    DashboardCharts {
        monthly_line: ChartSpec {
            title: "Monthly Sales".to_string(),
            kind: SeriesKind::Line,
            background,
            points: filtered.clone(),
        },
        monthly_bar: ChartSpec {
            title: "Monthly Sales (Bars)".to_string(),
            kind: SeriesKind::Bar,
            background,
            points: filtered.clone(),
        },
        cumulative: ChartSpec {
            title: "Cumulative Sales".to_string(),
            kind: SeriesKind::Area,
            background,
            points: cumulative_points,
        },
        by_kind: ChartSpec {
            title: by_kind_title.to_string(),
            kind: selection.chart_kind.to_series_kind(),
            background,
            points: filtered,
        },
    }
}

/// Distinct sorted months present in the rows of one category.
///
/// The range-selector handles index into this list, so it is also what the
/// UI uses to label and bound the handles.
pub fn distinct_months(dataset: &Dataset, category: &str) -> Vec<NaiveDate> {
    let mut months: Vec<NaiveDate> = dataset
        .records()
        .iter()
        .filter(|r| r.category == category)
        .map(|r| r.month)
        .collect();
    // Records are already chronologically sorted, so adjacent dedup suffices.
    months.dedup();
    months
}

/// Clamp a raw index pair into valid positions of an `len`-month list.
///
/// Out-of-range indices are pulled back to the last month and an inverted
/// pair is swapped. `None` means there is nothing to index.
pub fn clamp_range(range: (usize, usize), len: usize) -> Option<(usize, usize)> {
    if len == 0 {
        return None;
    }
    let lo = range.0.min(len - 1);
    let hi = range.1.min(len - 1);
    if lo <= hi { Some((lo, hi)) } else { Some((hi, lo)) }
}

fn filtered_points(dataset: &Dataset, selection: &Selection) -> Vec<SeriesPoint> {
    let months = distinct_months(dataset, &selection.category);
    let Some((lo, hi)) = clamp_range(selection.range, months.len()) else {
        return Vec::new();
    };
    let (lower, upper) = (months[lo], months[hi]);

    dataset
        .records()
        .iter()
        .filter(|r| r.category == selection.category && r.month >= lower && r.month <= upper)
        .map(|r| SeriesPoint {
            month: r.month,
            value: r.sales,
        })
        .collect()
}

/// Running total in month order: `cum[0] = v[0]`, `cum[i] = cum[i-1] + v[i]`.
fn cumulative(points: &[SeriesPoint]) -> Vec<SeriesPoint> {
    let mut total = 0.0;
    points
        .iter()
        .map(|p| {
            total += p.value;
            SeriesPoint {
                month: p.month,
                value: total,
            }
        })
        .collect()
}
