//! AskData Charts
//!
//! The chart side of an answer, from raw `chart_data` to a rendering spec.
//!
//! ## Module Organization
//!
//! - `lenient` - Lenient payload parser and loose-literal emitter
//! - `validate` - Structural validator
//! - `normalize` - Dataset property-name normalizer
//! - `fallback` - Chart reconstruction from tabular rows
//! - `pipeline` - Orchestration of the above (`ChartPipeline`)
//! - `synth` - Chart spec synthesizer (`synthesize`, `ChartSpec`)
//! - `error` - `ChartError`, `ValidationIssue`

pub mod error;
pub mod fallback;
pub mod lenient;
pub mod normalize;
pub mod pipeline;
pub mod synth;
pub mod validate;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{ChartError, ChartResult, ValidationIssue};

// ── Payload Pipeline ───────────────────────────────────────────────────
pub use fallback::{humanize_column, reconstruct_from_rows};
pub use lenient::{parse_chart_payload, parse_lenient, repair, to_object_literal};
pub use normalize::{is_canonical, normalize_candidate};
pub use pipeline::{ChartPipeline, ChartSource, PipelineOutcome};
pub use validate::{is_renderable, validate_candidate, ValidationOptions};

// ── Spec Synthesis ─────────────────────────────────────────────────────
pub use synth::{
    format_number, format_percentage, slice_colors, synthesize, with_opacity, ChartSpec,
    RendererKind, StyledDataset,
};
