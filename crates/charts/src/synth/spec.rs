//! Rendering specification types.
//!
//! A `ChartSpec` is what the rendering library receives. It serializes to the
//! camelCase configuration shape chart libraries expect, with every label,
//! tooltip line and legend entry already formatted.

use serde::Serialize;
use serde_json::{Map, Value};

use askdata_core::{ChartType, Fill, Paint};

/// Drawing primitive used by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    Bar,
    Line,
    Pie,
    Doughnut,
}

/// Complete rendering specification for one frontend chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    /// Chart kind this was synthesized as (unknown kinds become bar)
    #[serde(skip)]
    pub kind: ChartType,
    #[serde(rename = "type")]
    pub renderer: RendererKind,
    pub data: SpecData,
    pub options: SpecOptions,
}

impl ChartSpec {
    pub fn labels(&self) -> &[String] {
        &self.data.labels
    }

    pub fn datasets(&self) -> &[StyledDataset] {
        &self.data.datasets
    }

    /// Formatted value labels of dataset `index`, if labels are shown.
    pub fn value_labels(&self, index: usize) -> Option<&[String]> {
        let datalabels = self.options.plugins.as_ref()?.datalabels.as_ref()?;
        if !datalabels.display {
            return None;
        }
        datalabels.labels.get(index).map(Vec::as_slice)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecData {
    pub labels: Vec<String>,
    pub datasets: Vec<StyledDataset>,
}

/// A dataset with its final styling applied.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyledDataset {
    pub label: String,
    pub data: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Paint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<Paint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_skipped: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<Fill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover_background_color: Option<Paint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover_border_color: Option<Paint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover_border_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_background_color: Option<Paint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_border_color: Option<Paint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_border_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_hover_radius: Option<f64>,
    /// Properties the service sent that styling does not override
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    /// Hover across all datasets at one index
    pub index_interaction: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugins: Option<Plugins>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scales: Option<Scales>,
    /// Donut hole size, e.g. `50%`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cutout: Option<String>,
}

impl Default for SpecOptions {
    fn default() -> Self {
        Self {
            responsive: true,
            maintain_aspect_ratio: false,
            index_interaction: false,
            plugins: None,
            scales: None,
            cutout: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plugins {
    pub legend: Legend,
    pub tooltip: Tooltip,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datalabels: Option<DataLabels>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Top,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Legend {
    pub display: bool,
    pub position: LegendPosition,
    pub use_point_style: bool,
    /// Explicit entries; empty means one entry per dataset
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<LegendItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendItem {
    pub text: String,
    pub fill_style: String,
}

/// Tooltip styling plus the pre-formatted body line for every point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tooltip {
    pub background_color: String,
    pub border_color: String,
    /// `[dataset][point]` -> `"{dataset}: {value}"`
    pub lines: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelAnchor {
    /// Above the bar or point
    End,
    /// Middle of the slice
    Center,
}

/// Value labels drawn on the chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataLabels {
    pub display: bool,
    pub anchor: LabelAnchor,
    /// `[dataset][point]` formatted text
    pub labels: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scales {
    pub x: Axis,
    pub y: Axis,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub stacked: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub begin_at_zero: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}
