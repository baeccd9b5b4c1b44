//! Chart Spec Synthesizer
//!
//! Turns a canonical frontend `ChartDescription` into a `ChartSpec` with
//! per-kind styling:
//!
//! | kind        | renderer | notes                                             |
//! |-------------|----------|---------------------------------------------------|
//! | bar         | bar      | solid palette fill, rounded corners               |
//! | line        | line     | no fill, tension 0.4, styled points               |
//! | area        | line     | dataset 0 fills to origin, dataset k to k-1       |
//! | pie / donut | pie/doughnut | slice colors, percentage labels, right legend |
//! | stacked_bar | bar      | stacked axes only                                 |
//!
//! Unknown kinds are drawn as bar charts.

use askdata_core::{ChartDescription, ChartType, Dataset, Fill, Paint};

use super::format::{format_number, format_percentage};
use super::palette::{color_for, slice_colors, with_opacity, ACCENT, WHITE};
use super::spec::{
    Axis, ChartSpec, DataLabels, LabelAnchor, Legend, LegendItem, LegendPosition, Plugins,
    RendererKind, Scales, SpecData, SpecOptions, StyledDataset, Tooltip,
};

const TOOLTIP_BACKGROUND: &str = "rgba(0, 0, 0, 0.9)";
const HOVER_OPACITY: f64 = 0.8;
const AREA_OPACITY: f64 = 0.4;
const CURVE_TENSION: f64 = 0.4;
const DONUT_CUTOUT: &str = "50%";

/// Synthesize the rendering spec for a frontend chart.
///
/// Backend charts carry a pre-rendered image and return `None`.
pub fn synthesize(chart: &ChartDescription) -> Option<ChartSpec> {
    if !chart.is_frontend() {
        tracing::debug!("[ChartSynthesizer] Backend chart, nothing to synthesize");
        return None;
    }

    let labels = chart.labels().to_vec();
    let datasets: Vec<Dataset> = chart
        .datasets()
        .iter()
        .map(|dataset| aligned(dataset, labels.len()))
        .collect();

    let spec = match chart.effective_chart_type() {
        ChartType::Bar => bar_chart(labels, &datasets),
        ChartType::Line => line_chart(labels, &datasets),
        ChartType::Area => area_chart(labels, &datasets),
        ChartType::Pie => round_chart(ChartType::Pie, labels, &datasets),
        ChartType::Donut => round_chart(ChartType::Donut, labels, &datasets),
        ChartType::StackedBar => stacked_bar_chart(labels, &datasets),
        ChartType::Other(name) => {
            tracing::warn!(
                "[ChartSynthesizer] Chart type '{}' not implemented, drawing a bar chart",
                name
            );
            bar_chart(labels, &datasets)
        }
    };
    Some(spec)
}

/// Drop values beyond the label count.
fn aligned(dataset: &Dataset, label_count: usize) -> Dataset {
    let mut dataset = dataset.clone();
    if dataset.data.len() > label_count {
        tracing::debug!(
            "[ChartSynthesizer] Truncating '{}' from {} to {} values",
            dataset.label,
            dataset.data.len(),
            label_count
        );
        dataset.data.truncate(label_count);
    }
    dataset
}

fn base(dataset: &Dataset) -> StyledDataset {
    StyledDataset {
        label: dataset.label.clone(),
        data: dataset.data.clone(),
        extra: dataset.extra.clone(),
        ..Default::default()
    }
}

fn bar_chart(labels: Vec<String>, datasets: &[Dataset]) -> ChartSpec {
    let styled = datasets
        .iter()
        .enumerate()
        .map(|(i, dataset)| {
            let color = color_for(i);
            StyledDataset {
                background_color: Some(color.into()),
                border_color: Some(color.into()),
                border_width: Some(2.0),
                border_radius: Some(6.0),
                border_skipped: Some(false),
                hover_background_color: Some(Paint::Single(with_opacity(color, HOVER_OPACITY))),
                hover_border_color: Some(color.into()),
                hover_border_width: Some(3.0),
                ..base(dataset)
            }
        })
        .collect();

    ChartSpec {
        kind: ChartType::Bar,
        renderer: RendererKind::Bar,
        options: cartesian_options(&labels, datasets, true, false),
        data: SpecData {
            labels,
            datasets: styled,
        },
    }
}

fn line_chart(labels: Vec<String>, datasets: &[Dataset]) -> ChartSpec {
    let styled = datasets
        .iter()
        .enumerate()
        .map(|(i, dataset)| {
            let color = color_for(i);
            StyledDataset {
                background_color: Some("transparent".into()),
                border_color: Some(color.into()),
                border_width: Some(3.0),
                fill: Some(Fill::Enabled(false)),
                tension: Some(CURVE_TENSION),
                point_background_color: Some(color.into()),
                point_border_color: Some(WHITE.into()),
                point_border_width: Some(2.0),
                point_radius: Some(6.0),
                point_hover_radius: Some(8.0),
                ..base(dataset)
            }
        })
        .collect();

    ChartSpec {
        kind: ChartType::Line,
        renderer: RendererKind::Line,
        options: cartesian_options(&labels, datasets, true, true),
        data: SpecData {
            labels,
            datasets: styled,
        },
    }
}

/// Each dataset after the first fills down to its predecessor, which looks
/// like a stack without summing values.
fn area_fill(index: usize) -> Fill {
    match index {
        0 => Fill::Target("origin".to_string()),
        k => Fill::Dataset(k as i64 - 1),
    }
}

fn area_chart(labels: Vec<String>, datasets: &[Dataset]) -> ChartSpec {
    let styled = datasets
        .iter()
        .enumerate()
        .map(|(i, dataset)| {
            let color = color_for(i);
            StyledDataset {
                background_color: Some(Paint::Single(with_opacity(color, AREA_OPACITY))),
                border_color: Some(color.into()),
                border_width: Some(2.0),
                fill: Some(area_fill(i)),
                tension: Some(CURVE_TENSION),
                point_background_color: Some(color.into()),
                point_border_color: Some(WHITE.into()),
                point_border_width: Some(2.0),
                point_radius: Some(4.0),
                point_hover_radius: Some(6.0),
                ..base(dataset)
            }
        })
        .collect();

    let show_labels = datasets.len() == 1;
    ChartSpec {
        kind: ChartType::Area,
        renderer: RendererKind::Line,
        options: cartesian_options(&labels, datasets, show_labels, true),
        data: SpecData {
            labels,
            datasets: styled,
        },
    }
}

/// Pie and donut share everything except the cutout.
fn round_chart(kind: ChartType, labels: Vec<String>, datasets: &[Dataset]) -> ChartSpec {
    let colors = slice_colors(labels.len());
    let hover_colors: Vec<String> = colors
        .iter()
        .map(|c| with_opacity(c, HOVER_OPACITY))
        .collect();

    let styled = datasets
        .iter()
        .map(|dataset| StyledDataset {
            background_color: Some(Paint::PerPoint(colors.clone())),
            border_color: Some(WHITE.into()),
            border_width: Some(2.0),
            hover_background_color: Some(Paint::PerPoint(hover_colors.clone())),
            hover_border_color: Some(WHITE.into()),
            hover_border_width: Some(3.0),
            ..base(dataset)
        })
        .collect();

    let percentages: Vec<Vec<String>> = datasets
        .iter()
        .map(|dataset| {
            let total = dataset.total();
            dataset
                .data
                .iter()
                .map(|v| format_percentage(*v, total))
                .collect()
        })
        .collect();

    let tooltip_lines: Vec<Vec<String>> = datasets
        .iter()
        .zip(&percentages)
        .map(|(dataset, shares)| {
            dataset
                .data
                .iter()
                .zip(shares)
                .map(|(v, share)| format!("{}: {} ({})", dataset.label, format_number(*v), share))
                .collect()
        })
        .collect();

    let legend_items = legend_with_shares(&labels, datasets.first(), &colors);

    let (renderer, cutout) = match kind {
        ChartType::Donut => (RendererKind::Doughnut, Some(DONUT_CUTOUT.to_string())),
        _ => (RendererKind::Pie, None),
    };

    ChartSpec {
        kind,
        renderer,
        data: SpecData {
            labels,
            datasets: styled,
        },
        options: SpecOptions {
            index_interaction: true,
            plugins: Some(Plugins {
                legend: Legend {
                    display: true,
                    position: LegendPosition::Right,
                    use_point_style: true,
                    items: legend_items,
                },
                tooltip: tooltip(tooltip_lines),
                datalabels: Some(DataLabels {
                    display: true,
                    anchor: LabelAnchor::Center,
                    labels: percentages,
                }),
            }),
            cutout,
            ..Default::default()
        },
    }
}

/// `"{label} ({share})"` for each label, computed from the first dataset.
fn legend_with_shares(
    labels: &[String],
    dataset: Option<&Dataset>,
    colors: &[String],
) -> Vec<LegendItem> {
    let Some(dataset) = dataset else {
        return Vec::new();
    };
    let total = dataset.total();
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let value = dataset.data.get(i).copied().unwrap_or(0.0);
            LegendItem {
                text: format!("{} ({})", label, format_percentage(value, total)),
                fill_style: colors.get(i).cloned().unwrap_or_else(|| ACCENT.to_string()),
            }
        })
        .collect()
}

fn stacked_bar_chart(labels: Vec<String>, datasets: &[Dataset]) -> ChartSpec {
    let styled = datasets
        .iter()
        .map(|dataset| StyledDataset {
            background_color: dataset.background_color.clone(),
            border_color: dataset.border_color.clone(),
            border_width: dataset.border_width,
            ..base(dataset)
        })
        .collect();

    let stacked = Axis {
        stacked: true,
        ..Default::default()
    };

    ChartSpec {
        kind: ChartType::StackedBar,
        renderer: RendererKind::Bar,
        data: SpecData {
            labels,
            datasets: styled,
        },
        options: SpecOptions {
            scales: Some(Scales {
                x: stacked.clone(),
                y: stacked,
            }),
            ..Default::default()
        },
    }
}

fn tooltip(lines: Vec<Vec<String>>) -> Tooltip {
    Tooltip {
        background_color: TOOLTIP_BACKGROUND.to_string(),
        border_color: ACCENT.to_string(),
        lines,
    }
}

/// Options shared by bar, line and area charts.
fn cartesian_options(
    labels: &[String],
    datasets: &[Dataset],
    show_labels: bool,
    vertical_grid: bool,
) -> SpecOptions {
    let value_labels: Vec<Vec<String>> = datasets
        .iter()
        .map(|dataset| dataset.data.iter().map(|v| format_number(*v)).collect())
        .collect();
    let tooltip_lines: Vec<Vec<String>> = datasets
        .iter()
        .map(|dataset| {
            dataset
                .data
                .iter()
                .map(|v| format!("{}: {}", dataset.label, format_number(*v)))
                .collect()
        })
        .collect();

    SpecOptions {
        index_interaction: true,
        plugins: Some(Plugins {
            legend: Legend {
                display: true,
                position: LegendPosition::Top,
                use_point_style: true,
                items: Vec::new(),
            },
            tooltip: tooltip(tooltip_lines),
            datalabels: Some(DataLabels {
                display: show_labels,
                anchor: LabelAnchor::End,
                labels: value_labels,
            }),
        }),
        scales: Some(Scales {
            x: Axis {
                grid: Some(vertical_grid),
                title: (!labels.is_empty()).then(|| "Categories".to_string()),
                ..Default::default()
            },
            y: Axis {
                begin_at_zero: true,
                grid: Some(true),
                title: Some("Values".to_string()),
                ..Default::default()
            },
        }),
        ..Default::default()
    }
}
