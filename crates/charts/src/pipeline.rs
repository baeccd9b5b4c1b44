//! Chart Pipeline
//!
//! Orchestrates parse -> validate -> normalize -> decode for the `chart_data`
//! field of one answer, with the tabular-row fallback when the payload cannot
//! be parsed. Nothing here fails the answer: every rejection is logged and
//! turns into an absent chart.

use serde_json::Value;

use askdata_core::{ChartDescription, Row};

use crate::error::{ChartError, ChartResult};
use crate::fallback::reconstruct_from_rows;
use crate::lenient::parse_chart_payload;
use crate::normalize::normalize_candidate;
use crate::validate::{validate_candidate, ValidationOptions};

/// Where the final chart came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartSource {
    /// Parsed from `chart_data`
    Payload,
    /// Rebuilt from the tabular rows
    Reconstructed,
    /// No chart will be shown
    Omitted,
}

/// Result of running the pipeline over one answer.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutcome {
    pub chart: Option<ChartDescription>,
    pub source: ChartSource,
}

impl PipelineOutcome {
    fn omitted() -> Self {
        Self {
            chart: None,
            source: ChartSource::Omitted,
        }
    }
}

/// Stateless chart pipeline; cheap to construct per request.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChartPipeline {
    options: ValidationOptions,
}

impl ChartPipeline {
    pub fn new(options: ValidationOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    /// Turn a raw `chart_data` value plus the answer's rows into a chart.
    ///
    /// The row fallback only runs when a payload was sent but could not be
    /// parsed. A parsed payload that fails validation is dropped.
    pub fn process(&self, chart_data: Option<&Value>, rows: &[Row]) -> PipelineOutcome {
        let raw = match chart_data {
            None | Some(Value::Null) => {
                tracing::debug!("[ChartPipeline] Answer has no chart payload");
                return PipelineOutcome::omitted();
            }
            Some(raw) => raw,
        };

        let candidate = match parse_chart_payload(raw) {
            Some(candidate) => candidate,
            None => {
                tracing::info!("[ChartPipeline] Payload unparseable, trying row fallback");
                return self.reconstruct(rows);
            }
        };

        match self.accept(&candidate) {
            Ok(chart) => {
                tracing::info!(
                    "[ChartPipeline] Chart accepted from payload ({} mode, type {})",
                    chart.render_mode.as_str(),
                    chart.effective_chart_type()
                );
                PipelineOutcome {
                    chart: Some(chart),
                    source: ChartSource::Payload,
                }
            }
            Err(e) => {
                tracing::warn!("[ChartPipeline] Dropping chart: {}", e);
                PipelineOutcome::omitted()
            }
        }
    }

    /// Validate, normalize, then decode a parsed candidate.
    pub fn accept(&self, candidate: &Value) -> ChartResult<ChartDescription> {
        validate_candidate(Some(candidate), &self.options)?;
        let normalized = normalize_candidate(candidate);
        serde_json::from_value(normalized).map_err(|e| ChartError::decode(e.to_string()))
    }

    fn reconstruct(&self, rows: &[Row]) -> PipelineOutcome {
        let rebuilt = reconstruct_from_rows(rows).and_then(|chart| {
            let candidate =
                serde_json::to_value(&chart).map_err(|e| ChartError::decode(e.to_string()))?;
            self.accept(&candidate)
        });

        match rebuilt {
            Ok(chart) => {
                tracing::info!(
                    "[ChartPipeline] Chart reconstructed from {} rows ({} labels)",
                    rows.len(),
                    chart.labels().len()
                );
                PipelineOutcome {
                    chart: Some(chart),
                    source: ChartSource::Reconstructed,
                }
            }
            Err(e) => {
                tracing::warn!("[ChartPipeline] No chart for this answer: {}", e);
                PipelineOutcome::omitted()
            }
        }
    }
}
