//! Chat Response Envelope
//!
//! `RawChatResponse` mirrors the loosely-typed payload returned by the
//! analytics service. `ChatResponse` is the normalized, immutable answer the
//! application keeps once the chart pipeline has run.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::chart::ChartDescription;

/// One tabular result row: column name to scalar, in payload order.
pub type Row = serde_json::Map<String, Value>;

/// Status reported for a successful answer.
pub const STATUS_VALID: &str = "valid";
/// Status reported when the answer could not be produced.
pub const STATUS_ERROR: &str = "error";

/// The payload exactly as the service sent it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawChatResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sql_query: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub insight: String,
    /// Usually an array of row objects; occasionally a JSON string
    #[serde(default)]
    pub data: Value,
    /// A string in one of several dialects, or an object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_data: Option<Value>,
}

impl RawChatResponse {
    /// Tabular rows, coerced to a sequence of objects.
    ///
    /// A string that does not hold a JSON array, or any other non-array
    /// shape, yields no rows. Non-object array elements are skipped.
    pub fn rows(&self) -> Vec<Row> {
        coerce_rows(&self.data)
    }
}

/// Coerce a `data` value into rows.
pub fn coerce_rows(data: &Value) -> Vec<Row> {
    match data {
        Value::Array(items) => collect_rows(items),
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(Value::Array(items)) => collect_rows(&items),
            _ => {
                tracing::warn!(
                    "[ChatResponse] Tabular data is an unparseable string ({} chars), using no rows",
                    text.len()
                );
                Vec::new()
            }
        },
        Value::Null => Vec::new(),
        other => {
            tracing::warn!(
                "[ChatResponse] Tabular data is not an array (found {}), using no rows",
                json_kind(other)
            );
            Vec::new()
        }
    }
}

fn collect_rows(items: &[Value]) -> Vec<Row> {
    items
        .iter()
        .filter_map(|item| item.as_object().cloned())
        .collect()
}

/// Short name of a JSON value's kind, for diagnostics.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// The normalized answer to one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub status: String,
    pub message: Option<String>,
    pub sql_query: String,
    pub insight: String,
    pub data: Vec<Row>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_data: Option<ChartDescription>,
}

impl ChatResponse {
    /// Assemble a response from the raw payload and the pipeline's chart.
    pub fn from_raw(raw: RawChatResponse, chart: Option<ChartDescription>) -> Self {
        let data = raw.rows();
        let status = if raw.status.is_empty() {
            STATUS_VALID.to_string()
        } else {
            raw.status
        };
        Self {
            status,
            message: raw.message,
            sql_query: raw.sql_query,
            insight: raw.insight,
            data,
            chart_data: chart,
        }
    }

    /// An error answer carrying a human-readable message and nothing else.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_ERROR.to_string(),
            message: Some(message.into()),
            sql_query: String::new(),
            insight: String::new(),
            data: Vec::new(),
            chart_data: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.status.eq_ignore_ascii_case(STATUS_ERROR)
    }

    pub fn has_chart(&self) -> bool {
        self.chart_data.is_some()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
