//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory by the filter/aggregate pipeline
//! - exported to CSV/JSON snapshots
//! - reloaded later for inspection or comparisons

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// User-selectable chart kind for the fourth panel.
///
/// The dashboard exposes exactly two options; `Area` exists only as a render
/// kind (`SeriesKind`) for the cumulative panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
}

impl ChartKind {
    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            ChartKind::Line => "Lines",
            ChartKind::Bar => "Bars",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ChartKind::Line => ChartKind::Bar,
            ChartKind::Bar => ChartKind::Line,
        }
    }

    pub fn to_series_kind(self) -> SeriesKind {
        match self {
            ChartKind::Line => SeriesKind::Line,
            ChartKind::Bar => SeriesKind::Bar,
        }
    }
}

// Display must match the `ValueEnum` argument names so clap can render the
// default value in `--help`.
impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ChartKind::Line => "line",
            ChartKind::Bar => "bar",
        })
    }
}

/// Concrete render kind of a chart panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Line,
    Bar,
    Area,
}

impl SeriesKind {
    pub fn display_name(self) -> &'static str {
        match self {
            SeriesKind::Line => "line",
            SeriesKind::Bar => "bar",
            SeriesKind::Area => "area",
        }
    }
}

/// Chart background, toggled by the click counter.
///
/// Even click counts render on white, odd on a slightly darker neutral.
/// The mapping is a pure function of the counter's parity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Background {
    Light,
    Shaded,
}

impl Background {
    pub fn from_clicks(clicks: u64) -> Self {
        if clicks % 2 == 0 {
            Background::Light
        } else {
            Background::Shaded
        }
    }

    /// CSS-style hex value, kept for snapshot exports.
    pub fn hex(self) -> &'static str {
        match self {
            Background::Light => "#ffffff",
            Background::Shaded => "#f0f0f0",
        }
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Background::Light => (255, 255, 255),
            Background::Shaded => (240, 240, 240),
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Background::Light => "white",
            Background::Shaded => "light gray",
        }
    }
}

/// One row of the sales table.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    pub month: NaiveDate,
    pub category: String,
    pub sales: f64,
}

/// Summary stats about the loaded rows.
#[derive(Debug, Clone)]
pub struct DatasetStats {
    pub n_records: usize,
    pub n_categories: usize,
    pub month_min: NaiveDate,
    pub month_max: NaiveDate,
    pub sales_total: f64,
}

/// The full dataset, immutable after load.
///
/// Records are sorted chronologically at construction (stable, so same-month
/// rows keep their input order) and the category list is derived from the
/// data in first-appearance order.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<SalesRecord>,
    categories: Vec<String>,
    stats: DatasetStats,
}

impl Dataset {
    pub fn from_records(mut records: Vec<SalesRecord>) -> Result<Self, AppError> {
        if records.is_empty() {
            return Err(AppError::data("Dataset contains no rows."));
        }

        records.sort_by_key(|r| r.month);

        let mut categories: Vec<String> = Vec::new();
        let mut sales_total = 0.0;
        for r in &records {
            if !categories.iter().any(|c| c == &r.category) {
                categories.push(r.category.clone());
            }
            sales_total += r.sales;
        }

        let stats = DatasetStats {
            n_records: records.len(),
            n_categories: categories.len(),
            month_min: records[0].month,
            month_max: records[records.len() - 1].month,
            sales_total,
        };

        Ok(Self {
            records,
            categories,
            stats,
        })
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn stats(&self) -> &DatasetStats {
        &self.stats
    }

    /// First category in the data; the default selection.
    pub fn first_category(&self) -> &str {
        &self.categories[0]
    }
}

/// The complete set of current user-chosen filter/display options.
///
/// `range` holds two zero-based indices into the distinct sorted month list
/// of the category-restricted rows. Out-of-range or inverted indices are
/// clamped by the pipeline rather than rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub category: String,
    pub chart_kind: ChartKind,
    pub range: (usize, usize),
    pub clicks: u64,
}

/// One chart-ready data point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub month: NaiveDate,
    pub value: f64,
}

/// A renderable chart description: data plus presentation.
///
/// All series and bounds are computed by the pipeline; renderers only draw.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    pub kind: SeriesKind,
    pub background: Background,
    pub points: Vec<SeriesPoint>,
}

impl ChartSpec {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// The four dashboard panels, in 2×2 grid order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardCharts {
    /// Filtered monthly sales as a line.
    pub monthly_line: ChartSpec,
    /// The same data rendered as bars.
    pub monthly_bar: ChartSpec,
    /// Running cumulative sum as an area.
    pub cumulative: ChartSpec,
    /// Filtered sales rendered per the selected chart kind.
    pub by_kind: ChartSpec,
}

impl DashboardCharts {
    /// Panels in render order: top-left, top-right, bottom-left, bottom-right.
    pub fn panels(&self) -> [&ChartSpec; 4] {
        [
            &self.monthly_line,
            &self.monthly_bar,
            &self.cumulative,
            &self.by_kind,
        ]
    }
}

/// A saved dashboard snapshot (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotFile {
    pub tool: String,
    pub category: String,
    pub chart_kind: ChartKind,
    pub range: [usize; 2],
    pub clicks: u64,
    pub charts: DashboardCharts,
}
