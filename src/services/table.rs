//! Table Helpers
//!
//! Column discovery, cell formatting and CSV export for the tabular part of
//! an answer.

use chrono::{NaiveDate, Utc};
use serde_json::Value;

use askdata_core::Row;

/// Column names of the table: the keys of the first row, in payload order.
pub fn table_columns(rows: &[Row]) -> Vec<String> {
    rows.first()
        .map(|row| row.keys().cloned().collect())
        .unwrap_or_default()
}

/// Text shown in one table cell.
///
/// Null renders as `-`; numbers get thousands separators and at most three
/// fraction digits.
pub fn format_cell_value(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) => group_thousands(f),
            None => n.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

fn group_thousands(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let rounded = format!("{:.3}", value.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let negative = value < 0.0 && (int_part != "0" || !frac_part.is_empty());
    let sign = if negative { "-" } else { "" };
    if frac_part.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac_part)
    }
}

/// Render rows as CSV: a header line, then one line per row.
///
/// Cells are the raw values (not display-formatted); missing and null cells
/// are empty. Values containing commas, quotes or newlines are quoted.
pub fn rows_to_csv(rows: &[Row]) -> String {
    let columns = table_columns(rows);
    if columns.is_empty() {
        return String::new();
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(
        columns
            .iter()
            .map(|c| csv_field(c))
            .collect::<Vec<_>>()
            .join(","),
    );
    for row in rows {
        let line = columns
            .iter()
            .map(|column| match row.get(column) {
                None | Some(Value::Null) => String::new(),
                Some(Value::String(s)) => csv_field(s),
                Some(other) => csv_field(&other.to_string()),
            })
            .collect::<Vec<_>>()
            .join(",");
        lines.push(line);
    }
    lines.join("\n")
}

fn csv_field(text: &str) -> String {
    if text.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}

/// File name for a CSV export made today (UTC).
pub fn export_filename() -> String {
    export_filename_for(Utc::now().date_naive())
}

pub fn export_filename_for(date: NaiveDate) -> String {
    format!("data-export-{}.csv", date.format("%Y-%m-%d"))
}
