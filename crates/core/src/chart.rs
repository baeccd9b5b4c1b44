//! Chart Description Model
//!
//! Canonical, post-normalization representation of a chart returned by the
//! analytics service. This is the contract between the payload pipeline and
//! the renderer: camelCase dataset properties, a render mode, and a chart type.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Where the chart is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// The client draws from labels + datasets
    Frontend,
    /// The service supplies a pre-rendered image
    Backend,
}

impl RenderMode {
    /// Parse the exact wire value (`frontend` / `backend`).
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "frontend" => Some(Self::Frontend),
            "backend" => Some(Self::Backend),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RenderMode::Frontend => "frontend",
            RenderMode::Backend => "backend",
        }
    }
}

/// Chart kind requested by the service.
///
/// `Other` keeps an unsupported name around so callers can log it; the
/// synthesizer draws it as a bar chart.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChartType {
    Bar,
    Line,
    Pie,
    /// Accepts both `donut` and `doughnut`
    Donut,
    Area,
    StackedBar,
    Other(String),
}

impl ChartType {
    /// Every supported chart type, in display order.
    pub const SUPPORTED: [ChartType; 6] = [
        ChartType::Bar,
        ChartType::Line,
        ChartType::Pie,
        ChartType::Donut,
        ChartType::Area,
        ChartType::StackedBar,
    ];

    /// Parse a chart type name, case-insensitively.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "bar" => Self::Bar,
            "line" => Self::Line,
            "pie" => Self::Pie,
            "donut" | "doughnut" => Self::Donut,
            "area" => Self::Area,
            "stacked_bar" => Self::StackedBar,
            _ => Self::Other(value.trim().to_string()),
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, ChartType::Other(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            ChartType::Bar => "bar",
            ChartType::Line => "line",
            ChartType::Pie => "pie",
            ChartType::Donut => "donut",
            ChartType::Area => "area",
            ChartType::StackedBar => "stacked_bar",
            ChartType::Other(name) => name,
        }
    }
}

impl std::fmt::Display for ChartType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ChartType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ChartType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(ChartType::parse(&raw))
    }
}

/// A color property: one color for the whole dataset or one per point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Paint {
    Single(String),
    PerPoint(Vec<String>),
}

impl From<&str> for Paint {
    fn from(color: &str) -> Self {
        Paint::Single(color.to_string())
    }
}

/// Fill strategy of a line/area dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Fill {
    /// `true` / `false`
    Enabled(bool),
    /// Fill towards the dataset with this index
    Dataset(i64),
    /// Named target such as `origin`
    Target(String),
}

/// One named series of values aligned to the shared labels.
///
/// Style overrides of the wrong shape (a color given as a number, a width
/// that is not numeric) are dropped instead of failing the whole dataset.
/// A `null` data point is drawn as zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default, deserialize_with = "lenient_string")]
    pub label: String,
    #[serde(default, deserialize_with = "lenient_numbers")]
    pub data: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_option")]
    pub background_color: Option<Paint>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_option")]
    pub border_color: Option<Paint>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_number")]
    pub border_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_option")]
    pub fill: Option<Fill>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_number")]
    pub tension: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_option")]
    pub point_background_color: Option<Paint>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_option")]
    pub point_border_color: Option<Paint>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_number")]
    pub point_border_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_number")]
    pub point_radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_number")]
    pub point_hover_radius: Option<f64>,
    /// Unrecognized properties, passed through untouched
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Dataset {
    /// Create a plain dataset with no style overrides.
    pub fn new(label: impl Into<String>, data: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            data,
            ..Default::default()
        }
    }

    /// Sum of all values, used for percentage-of-total labels.
    pub fn total(&self) -> f64 {
        self.data.iter().sum()
    }
}

/// The nested config holder (`chart_config` on the wire).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default, deserialize_with = "lenient_labels")]
    pub labels: Vec<String>,
    #[serde(default)]
    pub datasets: Vec<Dataset>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_option")]
    pub image_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_option")]
    pub alt_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_option")]
    pub title: Option<String>,
}

/// Canonical chart description handed to the display layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDescription {
    pub render_mode: RenderMode,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_option")]
    pub chart_type: Option<ChartType>,
    #[serde(default)]
    pub chart_config: ChartConfig,
}

impl ChartDescription {
    /// Build a frontend chart from labels and datasets.
    pub fn frontend(chart_type: ChartType, labels: Vec<String>, datasets: Vec<Dataset>) -> Self {
        Self {
            render_mode: RenderMode::Frontend,
            chart_type: Some(chart_type),
            chart_config: ChartConfig {
                labels,
                datasets,
                ..Default::default()
            },
        }
    }

    /// Build a backend chart around an embedded image payload.
    pub fn backend(image_data: impl Into<String>) -> Self {
        Self {
            render_mode: RenderMode::Backend,
            chart_type: None,
            chart_config: ChartConfig {
                image_data: Some(image_data.into()),
                ..Default::default()
            },
        }
    }

    pub fn is_frontend(&self) -> bool {
        self.render_mode == RenderMode::Frontend
    }

    pub fn labels(&self) -> &[String] {
        &self.chart_config.labels
    }

    pub fn datasets(&self) -> &[Dataset] {
        &self.chart_config.datasets
    }

    /// Chart type to draw with; a missing type draws as a bar chart.
    pub fn effective_chart_type(&self) -> ChartType {
        self.chart_type.clone().unwrap_or(ChartType::Bar)
    }

    /// Heading shown above the chart.
    pub fn display_title(&self) -> String {
        if let Some(title) = self.chart_config.title.as_deref().filter(|t| !t.is_empty()) {
            return title.to_string();
        }
        match self.datasets().first() {
            Some(dataset) if !dataset.label.is_empty() => dataset.label.clone(),
            _ => {
                let kind = self
                    .chart_type
                    .as_ref()
                    .map(|t| t.as_str().to_string())
                    .unwrap_or_else(|| "Chart".to_string());
                format!("{} Visualization", kind)
            }
        }
    }
}

/// Interpret a JSON scalar as a number.
///
/// Numbers pass through; strings are accepted when they parse as a number
/// once thousands separators are removed.
pub fn value_as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', "").parse::<f64>().ok(),
        _ => None,
    }
}

fn lenient_numbers<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
    let raw = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    raw.iter()
        .map(|v| match v {
            Value::Null => Ok(0.0),
            other => value_as_number(other)
                .ok_or_else(|| D::Error::custom(format!("non-numeric data point: {}", other))),
        })
        .collect()
}

fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(value_as_number))
}

fn lenient_option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|v| serde_json::from_value(v).ok()))
}

fn lenient_labels<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => Ok(items.iter().map(scalar_to_string).collect()),
        _ => Ok(Vec::new()),
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().map(scalar_to_string).unwrap_or_default())
}

/// Render a JSON scalar as display text (`null` becomes empty).
pub fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chart_type_parse_aliases() {
        assert_eq!(ChartType::parse("doughnut"), ChartType::Donut);
        assert_eq!(ChartType::parse("Donut"), ChartType::Donut);
        assert_eq!(ChartType::parse(" STACKED_BAR "), ChartType::StackedBar);
        assert_eq!(
            ChartType::parse("radar"),
            ChartType::Other("radar".to_string())
        );
        assert!(!ChartType::parse("radar").is_supported());
    }

    #[test]
    fn test_render_mode_is_exact() {
        assert_eq!(RenderMode::parse("frontend"), Some(RenderMode::Frontend));
        assert_eq!(RenderMode::parse("Frontend"), None);
    }

    #[test]
    fn test_dataset_deserializes_camel_case_and_extras() {
        let dataset: Dataset = serde_json::from_value(json!({
            "label": "Revenue",
            "data": [1, "2.5", "1,000"],
            "backgroundColor": ["#111111", "#222222"],
            "borderWidth": 2,
            "stack": "a"
        }))
        .unwrap();

        assert_eq!(dataset.data, vec![1.0, 2.5, 1000.0]);
        assert_eq!(
            dataset.background_color,
            Some(Paint::PerPoint(vec![
                "#111111".to_string(),
                "#222222".to_string()
            ]))
        );
        assert_eq!(dataset.border_width, Some(2.0));
        assert_eq!(dataset.extra.get("stack"), Some(&json!("a")));
    }

    #[test]
    fn test_dataset_rejects_non_numeric_data() {
        let result: Result<Dataset, _> =
            serde_json::from_value(json!({"label": "x", "data": [1, "abc"]}));
        assert!(result.is_err());
    }

    #[test]
    fn test_dataset_tolerates_misshapen_overrides() {
        let dataset: Dataset = serde_json::from_value(json!({
            "label": "x",
            "data": [1, null, 3],
            "borderWidth": "2",
            "tension": "0.4",
            "pointRadius": "large",
            "backgroundColor": 5,
            "fill": 0.5
        }))
        .unwrap();

        assert_eq!(dataset.data, vec![1.0, 0.0, 3.0]);
        assert_eq!(dataset.border_width, Some(2.0));
        assert_eq!(dataset.tension, Some(0.4));
        assert_eq!(dataset.point_radius, None);
        assert_eq!(dataset.background_color, None);
        assert_eq!(dataset.fill, None);
        assert!(dataset.extra.is_empty());
    }

    #[test]
    fn test_numeric_labels_become_strings() {
        let config: ChartConfig =
            serde_json::from_value(json!({"labels": [2023, "2024"], "datasets": []})).unwrap();
        assert_eq!(config.labels, vec!["2023", "2024"]);
    }

    #[test]
    fn test_backend_chart_ignores_stray_fields() {
        let chart: ChartDescription = serde_json::from_value(json!({
            "render_mode": "backend",
            "chart_type": 3,
            "chart_config": {"image_data": "AAAA", "labels": "n/a", "title": 2024}
        }))
        .unwrap();
        assert_eq!(chart.chart_type, None);
        assert!(chart.labels().is_empty());
        assert_eq!(chart.chart_config.title, None);
        assert_eq!(chart.chart_config.image_data.as_deref(), Some("AAAA"));
    }

    #[test]
    fn test_display_title() {
        let chart = ChartDescription::frontend(
            ChartType::Line,
            vec!["a".to_string()],
            vec![Dataset::new("Total Sales", vec![1.0])],
        );
        assert_eq!(chart.display_title(), "Total Sales");

        let unnamed = ChartDescription::frontend(
            ChartType::Pie,
            vec!["a".to_string()],
            vec![Dataset::new("", vec![1.0])],
        );
        assert_eq!(unnamed.display_title(), "pie Visualization");
    }

    #[test]
    fn test_chart_description_serialization_shape() {
        let chart = ChartDescription::backend("data:image/png;base64,AAAA");
        let json = serde_json::to_value(&chart).unwrap();
        assert_eq!(json["render_mode"], "backend");
        assert_eq!(
            json["chart_config"]["image_data"],
            "data:image/png;base64,AAAA"
        );
        assert!(json.get("chart_type").is_none());
    }
}
