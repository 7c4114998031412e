//! Domain types used throughout the dashboard.
//!
//! This module defines:
//!
//! - the loaded dataset (`SalesRecord`, `Dataset`, `DatasetStats`)
//! - user-controlled view state (`Selection`, `ChartKind`, `Background`)
//! - chart-ready outputs (`SeriesPoint`, `ChartSpec`, `DashboardCharts`)

pub mod types;

pub use types::*;
