//! Chart Pipeline Errors
//!
//! Failures local to chart handling. None of these ever fail a whole answer:
//! the pipeline logs them and drops the chart.

use thiserror::Error;

/// Error type for the chart pipeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    /// The payload string could not be parsed, even after repairs
    #[error("Parse error: {0}")]
    Parse(String),

    /// The parsed candidate lacks fields required to render
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationIssue),

    /// A validated candidate could not be decoded into the chart model
    #[error("Decode error: {0}")]
    Decode(String),

    /// Tabular rows did not match any reconstruction heuristic
    #[error("Reconstruction error: {0}")]
    Reconstruction(String),
}

/// Result type alias for chart pipeline errors
pub type ChartResult<T> = Result<T, ChartError>;

impl ChartError {
    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create a reconstruction error
    pub fn reconstruction(msg: impl Into<String>) -> Self {
        Self::Reconstruction(msg.into())
    }
}

/// Why the structural validator rejected a candidate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    #[error("chart payload is missing")]
    Missing,

    #[error("chart payload must be an object, found {0}")]
    NotAnObject(&'static str),

    #[error("render_mode must be 'frontend' or 'backend', found {0}")]
    InvalidRenderMode(String),

    #[error("chart_type is required for frontend charts")]
    MissingChartType,

    #[error("unsupported chart_type '{0}'")]
    UnsupportedChartType(String),

    #[error("chart_config is required")]
    MissingChartConfig,

    #[error("chart_config.labels must be an array")]
    InvalidLabels,

    #[error("chart_config.datasets must be a non-empty array")]
    EmptyDatasets,

    #[error("dataset {0} has no data array")]
    InvalidDatasetData(usize),

    #[error("dataset {dataset} has a non-numeric value at position {position}")]
    NonNumericData { dataset: usize, position: usize },

    #[error("chart_config.image_data is required for backend charts")]
    MissingImageData,
}
