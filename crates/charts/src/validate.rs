//! Structural Validator
//!
//! Confirms a parsed candidate has the minimal shape needed to render before
//! any normalization or decoding happens.

use serde_json::Value;

use askdata_core::{json_kind, value_as_number, ChartType, RenderMode};

use crate::error::ValidationIssue;

/// Knobs for the validator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Let chart types outside the supported set through (they draw as bar charts)
    pub accept_unknown_chart_types: bool,
}

/// Validate a candidate, returning its render mode on success.
pub fn validate_candidate(
    candidate: Option<&Value>,
    options: &ValidationOptions,
) -> Result<RenderMode, ValidationIssue> {
    let candidate = candidate.ok_or(ValidationIssue::Missing)?;
    let object = candidate
        .as_object()
        .ok_or_else(|| ValidationIssue::NotAnObject(json_kind(candidate)))?;

    let mode = match object.get("render_mode") {
        Some(Value::String(mode)) => RenderMode::parse(mode)
            .ok_or_else(|| ValidationIssue::InvalidRenderMode(format!("'{}'", mode)))?,
        Some(other) => return Err(ValidationIssue::InvalidRenderMode(json_kind(other).to_string())),
        None => return Err(ValidationIssue::InvalidRenderMode("nothing".to_string())),
    };

    match mode {
        RenderMode::Frontend => validate_frontend(object, options)?,
        RenderMode::Backend => validate_backend(object)?,
    }
    Ok(mode)
}

/// Shorthand for callers that only need accept/reject.
pub fn is_renderable(candidate: Option<&Value>, options: &ValidationOptions) -> bool {
    validate_candidate(candidate, options).is_ok()
}

fn validate_frontend(
    object: &serde_json::Map<String, Value>,
    options: &ValidationOptions,
) -> Result<(), ValidationIssue> {
    let chart_type = match object.get("chart_type") {
        Some(Value::String(name)) if !name.trim().is_empty() => ChartType::parse(name),
        _ => return Err(ValidationIssue::MissingChartType),
    };
    if !chart_type.is_supported() && !options.accept_unknown_chart_types {
        return Err(ValidationIssue::UnsupportedChartType(
            chart_type.as_str().to_string(),
        ));
    }

    let config = object
        .get("chart_config")
        .and_then(Value::as_object)
        .ok_or(ValidationIssue::MissingChartConfig)?;

    let labels = config
        .get("labels")
        .and_then(Value::as_array)
        .ok_or(ValidationIssue::InvalidLabels)?;

    let datasets = config
        .get("datasets")
        .and_then(Value::as_array)
        .filter(|d| !d.is_empty())
        .ok_or(ValidationIssue::EmptyDatasets)?;

    for (index, dataset) in datasets.iter().enumerate() {
        let data = dataset
            .get("data")
            .and_then(Value::as_array)
            .ok_or(ValidationIssue::InvalidDatasetData(index))?;
        // null is a gap; anything else must read as a number
        if let Some(position) = data
            .iter()
            .position(|v| !v.is_null() && value_as_number(v).is_none())
        {
            return Err(ValidationIssue::NonNumericData {
                dataset: index,
                position,
            });
        }
        if data.len() != labels.len() {
            tracing::warn!(
                "[ChartValidator] Dataset {} has {} values for {} labels; extra values will not be drawn",
                index,
                data.len(),
                labels.len()
            );
        }
    }

    Ok(())
}

fn validate_backend(object: &serde_json::Map<String, Value>) -> Result<(), ValidationIssue> {
    let config = object
        .get("chart_config")
        .and_then(Value::as_object)
        .ok_or(ValidationIssue::MissingChartConfig)?;
    match config.get("image_data") {
        Some(Value::String(image)) if !image.trim().is_empty() => Ok(()),
        _ => Err(ValidationIssue::MissingImageData),
    }
}
