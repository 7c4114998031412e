//! ASCII plotting for `report --plot`.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - line points: `o`
//! - bars: `#` columns from the baseline
//! - area: `o` points with `.` fill down to the baseline

use crate::domain::{ChartSpec, SeriesKind};
use crate::report::format::month_label;

const GUTTER: usize = 9;

/// Render one chart spec onto a fixed character grid.
pub fn render_ascii_chart(spec: &ChartSpec, width: usize, height: usize) -> String {
    if spec.points.is_empty() {
        return "(no data for the current selection)\n".to_string();
    }

    let width = width.max(16);
    let height = height.max(5);
    let n = spec.points.len();

    let mut lo = 0.0_f64;
    let mut hi = f64::NEG_INFINITY;
    for p in &spec.points {
        lo = lo.min(p.value);
        hi = hi.max(p.value);
    }
    if hi <= lo {
        hi = lo + 1.0;
    }

    let col_of = |i: usize| if n == 1 { width / 2 } else { i * (width - 1) / (n - 1) };
    let row_of = |v: f64| {
        let t = (v - lo) / (hi - lo);
        let r = (((height - 1) as f64) * t).round() as usize;
        (height - 1) - r.min(height - 1)
    };
    let baseline = row_of(0.0_f64.clamp(lo, hi));

    let mut grid = vec![vec![' '; width]; height];
    for (i, p) in spec.points.iter().enumerate() {
        let col = col_of(i);
        let row = row_of(p.value);
        match spec.kind {
            SeriesKind::Line => grid[row][col] = 'o',
            SeriesKind::Bar => {
                let (top, bottom) = if row <= baseline {
                    (row, baseline)
                } else {
                    (baseline, row)
                };
                for r in top..=bottom {
                    grid[r][col] = '#';
                }
            }
            SeriesKind::Area => {
                grid[row][col] = 'o';
                for r in (row + 1)..=baseline {
                    grid[r][col] = '.';
                }
            }
        }
    }

    let mut out = String::new();
    out.push_str(&format!("{} [{}]\n", spec.title, spec.kind.display_name()));
    for (r, row) in grid.iter().enumerate() {
        let label = if r == 0 {
            format!("{hi:>9.0}")
        } else if r == height - 1 {
            format!("{lo:>9.0}")
        } else {
            " ".repeat(GUTTER)
        };
        out.push_str(&label);
        out.push_str(" |");
        out.extend(row.iter());
        out.push('\n');
    }

    out.push_str(&" ".repeat(GUTTER + 1));
    out.push('+');
    out.push_str(&"-".repeat(width));
    out.push('\n');

    let first = month_label(spec.points[0].month);
    out.push_str(&" ".repeat(GUTTER + 2));
    if n == 1 {
        out.push_str(&first);
    } else {
        let last = month_label(spec.points[n - 1].month);
        let gap = width.saturating_sub(first.len() + last.len());
        out.push_str(&first);
        out.push_str(&" ".repeat(gap));
        out.push_str(&last);
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Background, SeriesPoint};
    use chrono::NaiveDate;

    fn spec(kind: SeriesKind, values: &[f64]) -> ChartSpec {
        let points = values
            .iter()
            .enumerate()
            .map(|(i, &v)| SeriesPoint {
                month: NaiveDate::from_ymd_opt(2023, i as u32 + 1, 1).unwrap(),
                value: v,
            })
            .collect();
        ChartSpec {
            title: "Monthly Sales".to_string(),
            kind,
            background: Background::Light,
            points,
        }
    }

    #[test]
    fn empty_spec_renders_a_hint() {
        let out = render_ascii_chart(&spec(SeriesKind::Line, &[]), 40, 10);
        assert!(out.contains("no data"));
    }

    #[test]
    fn grid_has_fixed_dimensions() {
        let out = render_ascii_chart(&spec(SeriesKind::Line, &[10.0, 20.0, 30.0]), 40, 10);
        // title + height rows + axis + month labels
        assert_eq!(out.lines().count(), 1 + 10 + 1 + 1);
        assert!(out.contains("Jan 2023"));
        assert!(out.contains("Mar 2023"));
    }

    #[test]
    fn max_value_reaches_the_top_row() {
        let out = render_ascii_chart(&spec(SeriesKind::Line, &[0.0, 10.0]), 40, 8);
        let top_row = out.lines().nth(1).unwrap();
        assert!(top_row.contains('o'), "got: {out}");
    }

    #[test]
    fn bars_fill_from_the_baseline() {
        let out = render_ascii_chart(&spec(SeriesKind::Bar, &[5.0, 10.0]), 40, 8);
        assert!(out.matches('#').count() >= 8, "got: {out}");
    }

    #[test]
    fn output_is_deterministic() {
        let a = render_ascii_chart(&spec(SeriesKind::Area, &[3.0, 1.0, 4.0]), 50, 12);
        let b = render_ascii_chart(&spec(SeriesKind::Area, &[3.0, 1.0, 4.0]), 50, 12);
        assert_eq!(a, b);
    }
}
