//! Chart spec synthesis: palette, number formatting, and per-kind rules.

pub mod format;
pub mod palette;
pub mod spec;
pub mod synthesizer;

pub use format::{format_number, format_percentage};
pub use palette::{color_for, slice_colors, with_opacity, PALETTE};
pub use spec::{
    Axis, ChartSpec, DataLabels, LabelAnchor, Legend, LegendItem, LegendPosition, Plugins,
    RendererKind, Scales, SpecData, SpecOptions, StyledDataset, Tooltip,
};
pub use synthesizer::synthesize;
