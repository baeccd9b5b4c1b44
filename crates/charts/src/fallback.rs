//! Fallback Reconstructor
//!
//! Best-effort chart rebuilt from the tabular rows when the chart payload is
//! unusable. Two heuristics, first match wins:
//!
//! 1. Monthly time series: every row carries a year, a month number and a
//!    month name. Labels are `"{month name} {year}"`, one "Total Sales" series.
//! 2. First string column as labels, first number column as values.

use askdata_core::{scalar_to_string, value_as_number, ChartDescription, ChartType, Dataset, Row};
use serde_json::Value;

use crate::error::{ChartError, ChartResult};

/// Name of the series produced by the time-series heuristic.
pub const TIME_SERIES_LABEL: &str = "Total Sales";

/// Value columns tried, in order, for the time-series heuristic.
const VALUE_PREFERENCE: &[&str] = &["TotalSales", "Sales", "Value", "Amount"];

/// Rebuild a chart from rows.
pub fn reconstruct_from_rows(rows: &[Row]) -> ChartResult<ChartDescription> {
    if rows.is_empty() {
        return Err(ChartError::reconstruction("no tabular rows"));
    }

    if let Some(chart) = time_series(rows) {
        tracing::debug!("[FallbackReconstructor] Rows look like a monthly series");
        return Ok(chart);
    }

    if let Some(chart) = first_label_and_value(rows) {
        return Ok(chart);
    }

    Err(ChartError::reconstruction(
        "rows have no usable label/value columns",
    ))
}

struct MonthlyRow<'a> {
    year: &'a Value,
    month_name: &'a str,
}

fn monthly_row(row: &Row) -> Option<MonthlyRow<'_>> {
    let mut year = None;
    let mut month_number = None;
    let mut month_name = None;

    for (key, value) in row {
        let key = key.to_lowercase();
        if key.contains("year") && year.is_none() && value_as_number(value).is_some() {
            year = Some(value);
        } else if key.contains("month") {
            match value {
                Value::String(name) if value_as_number(value).is_none() => {
                    month_name.get_or_insert(name.as_str());
                }
                _ if value_as_number(value).is_some() => {
                    month_number.get_or_insert(value);
                }
                _ => {}
            }
        }
    }

    month_number?;
    Some(MonthlyRow {
        year: year?,
        month_name: month_name?,
    })
}

fn time_series(rows: &[Row]) -> Option<ChartDescription> {
    let monthly: Vec<MonthlyRow<'_>> = rows.iter().map(monthly_row).collect::<Option<_>>()?;

    let labels = monthly
        .iter()
        .map(|m| format!("{} {}", m.month_name, scalar_to_string(m.year)))
        .collect();
    let data = rows.iter().map(preferred_value).collect();

    Some(ChartDescription::frontend(
        ChartType::Line,
        labels,
        vec![Dataset::new(TIME_SERIES_LABEL, data)],
    ))
}

/// First column matching the preference list, compared without case or
/// separators so `total_sales` matches `TotalSales`.
fn preferred_value(row: &Row) -> f64 {
    VALUE_PREFERENCE
        .iter()
        .find_map(|wanted| {
            let wanted = squash(wanted);
            row.iter()
                .find(|(key, _)| squash(key) == wanted)
                .and_then(|(_, value)| value_as_number(value))
        })
        .unwrap_or(0.0)
}

fn squash(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn first_label_and_value(rows: &[Row]) -> Option<ChartDescription> {
    let first = &rows[0];
    let label_key = first
        .iter()
        .find(|(_, value)| value.is_string())
        .map(|(key, _)| key)?;
    let value_key = first
        .iter()
        .find(|(_, value)| value.is_number())
        .map(|(key, _)| key)?;

    let labels = rows
        .iter()
        .map(|row| row.get(label_key).map(scalar_to_string).unwrap_or_default())
        .collect();
    let data = rows
        .iter()
        .map(|row| row.get(value_key).and_then(value_as_number).unwrap_or(0.0))
        .collect();

    Some(ChartDescription::frontend(
        ChartType::Line,
        labels,
        vec![Dataset::new(humanize_column(value_key), data)],
    ))
}

/// `total_sales` -> `total sales`, `avgSaleAmount` -> `avg Sale Amount`.
pub fn humanize_column(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for c in name.chars() {
        if c == '_' || c == '-' {
            out.push(' ');
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower {
            out.push(' ');
        }
        prev_lower = c.is_lowercase() || c.is_ascii_digit();
        out.push(c);
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}
