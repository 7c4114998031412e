//! CSV ingest and normalization.
//!
//! This module turns a monthly sales CSV into a chronologically sorted
//! `Dataset` that is safe to filter.
//!
//! Design goals:
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **Fail fast**: a malformed row aborts the load with its CSV line number,
//!   so the process never starts on a corrupt dataset
//! - **Deterministic behavior** (stable sort, no hidden coercion)

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;

use crate::domain::{Dataset, SalesRecord};
use crate::error::AppError;

/// Load and sort a sales CSV into a `Dataset`.
pub fn load_sales_csv(path: &Path) -> Result<Dataset, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::usage(format!("Failed to open CSV '{}': {e}", path.display()))
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| AppError::usage(format!("Failed to read CSV headers: {e}")))?
        .clone();

    let header_map = build_header_map(&headers);
    ensure_required_columns_exist(&header_map)?;

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // +2 because:
        // - records() starts at line 1 after headers
        // - CSV is 1-based line numbers
        let line = idx + 2;

        let record = result
            .map_err(|e| AppError::usage(format!("CSV line {line}: parse error: {e}")))?;

        let row = parse_row(&record, &header_map)
            .map_err(|msg| AppError::usage(format!("CSV line {line}: {msg}")))?;
        records.push(row);
    }

    Dataset::from_records(records).map_err(|_| {
        AppError::data(format!(
            "No data rows in CSV '{}' (header only).",
            path.display()
        ))
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header (e.g. "﻿Month"). If we don't strip it, schema validation
    // will incorrectly report missing columns.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn ensure_required_columns_exist(header_map: &HashMap<String, usize>) -> Result<(), AppError> {
    for name in ["month", "category", "sales"] {
        if !header_map.contains_key(name) {
            return Err(AppError::usage(format!(
                "Missing required column: `{name}` (expected columns: Month, Category, Sales)."
            )));
        }
    }
    Ok(())
}

fn parse_row(record: &StringRecord, header_map: &HashMap<String, usize>) -> Result<SalesRecord, String> {
    let month = parse_month(get_required(record, header_map, "month")?)?;
    let category = get_required(record, header_map, "category")?.to_string();
    let sales = parse_sales(get_required(record, header_map, "sales")?)?;

    Ok(SalesRecord {
        month,
        category,
        sales,
    })
}

fn get_required<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Result<&'a str, String> {
    let idx = header_map
        .get(name)
        .ok_or_else(|| format!("Missing required column: `{name}`"))?;
    record
        .get(*idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing required value: `{name}`"))
}

fn parse_month(s: &str) -> Result<NaiveDate, String> {
    // We recommend ISO dates (`YYYY-MM-DD`), but monthly exports often carry
    // `YYYY-MM` or `DD/MM/YYYY`. We accept a small set of common formats to
    // reduce friction while keeping parsing deterministic.
    const FMTS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d"];
    for fmt in FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    // Month-only values are pinned to the first of the month.
    if let Ok(d) = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d") {
        return Ok(d);
    }
    Err(format!(
        "Invalid date '{s}'. Expected one of: YYYY-MM-DD, YYYY-MM, DD/MM/YYYY, YYYY/MM/DD."
    ))
}

fn parse_sales(s: &str) -> Result<f64, String> {
    let v = s
        .parse::<f64>()
        .map_err(|_| format!("Invalid `Sales` value '{s}' (expected a number)."))?;
    if !v.is_finite() {
        return Err(format!("Non-finite `Sales` value '{s}'."));
    }
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_csv(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sales.csv");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn loads_and_sorts_chronologically() {
        let (_dir, path) = write_csv(
            "Month,Category,Sales\n\
             2023-03-01,A,300\n\
             2023-01-01,A,100\n\
             2023-02-01,B,200\n",
        );
        let dataset = load_sales_csv(&path).unwrap();

        let months: Vec<NaiveDate> = dataset.records().iter().map(|r| r.month).collect();
        let expected: Vec<NaiveDate> = (1..=3)
            .map(|m| NaiveDate::from_ymd_opt(2023, m, 1).unwrap())
            .collect();
        assert_eq!(months, expected);
        // Categories in first-appearance order after the sort.
        assert_eq!(dataset.categories(), &["A".to_string(), "B".to_string()]);
        assert_eq!(dataset.stats().n_records, 3);
        assert_eq!(dataset.stats().sales_total, 600.0);
    }

    #[test]
    fn headers_are_case_insensitive_and_bom_tolerant() {
        let (_dir, path) = write_csv("\u{feff}MONTH,category,SaLeS\n2023-01,A,10\n");
        let dataset = load_sales_csv(&path).unwrap();
        assert_eq!(dataset.records().len(), 1);
    }

    #[test]
    fn month_only_dates_pin_to_first_of_month() {
        let (_dir, path) = write_csv("Month,Category,Sales\n2023-05,A,10\n");
        let dataset = load_sales_csv(&path).unwrap();
        assert_eq!(
            dataset.records()[0].month,
            NaiveDate::from_ymd_opt(2023, 5, 1).unwrap()
        );
    }

    #[test]
    fn malformed_date_is_fatal_with_line_number() {
        let (_dir, path) = write_csv(
            "Month,Category,Sales\n\
             2023-01-01,A,100\n\
             not-a-date,A,100\n",
        );
        let err = load_sales_csv(&path).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("line 3"), "got: {err}");
    }

    #[test]
    fn malformed_sales_is_fatal() {
        let (_dir, path) = write_csv("Month,Category,Sales\n2023-01-01,A,lots\n");
        let err = load_sales_csv(&path).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("Sales"), "got: {err}");
    }

    #[test]
    fn missing_column_is_fatal() {
        let (_dir, path) = write_csv("Month,Sales\n2023-01-01,100\n");
        let err = load_sales_csv(&path).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("category"), "got: {err}");
    }

    #[test]
    fn header_only_file_is_a_dataset_error() {
        let (_dir, path) = write_csv("Month,Category,Sales\n");
        let err = load_sales_csv(&path).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn missing_file_is_fatal() {
        let err = load_sales_csv(Path::new("/nonexistent/sales.csv")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
