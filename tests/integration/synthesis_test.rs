//! Spec Synthesis Integration Tests
//!
//! Charts accepted by the pipeline, synthesized into rendering specs and
//! checked in the serialized shape the drawing library receives.

use askdata::{synthesize, ChartPipeline, ChartSpec};
use askdata_charts::{slice_colors, RendererKind, ValidationOptions};
use askdata_core::{ChartType, Fill, Paint};
use serde_json::{json, Value};

fn spec_for(pipeline: &ChartPipeline, payload: Value) -> ChartSpec {
    let chart = pipeline
        .process(Some(&payload), &[])
        .chart
        .expect("payload should be accepted");
    synthesize(&chart).expect("frontend chart should synthesize")
}

fn spec_from(payload: Value) -> ChartSpec {
    spec_for(&ChartPipeline::default(), payload)
}

#[test]
fn test_pie_percentages_sum_to_hundred() {
    let spec = spec_from(json!(
        "{render_mode:'frontend',chart_type:'pie',chart_config:{labels:['North','South','East'],datasets:[{label:'Share',data:[30,30,40]}]}}"
    ));

    let labels = spec.value_labels(0).unwrap();
    assert_eq!(labels, ["30.0%", "30.0%", "40.0%"]);
    let sum: f64 = labels
        .iter()
        .map(|l| l.trim_end_matches('%').parse::<f64>().unwrap())
        .sum();
    assert!((sum - 100.0).abs() < 0.1);

    let json = serde_json::to_value(&spec).unwrap();
    assert_eq!(json["type"], "pie");
    assert_eq!(json["options"]["plugins"]["legend"]["items"][0]["text"], "North (30.0%)");
}

#[test]
fn test_doughnut_alias_synthesizes_donut() {
    let spec = spec_from(json!({
        "render_mode": "frontend",
        "chart_type": "doughnut",
        "chart_config": {"labels": ["a", "b", "c", "d"], "datasets": [{"label": "x", "data": [1, 1, 1, 1]}]}
    }));

    assert_eq!(spec.kind, ChartType::Donut);
    assert_eq!(spec.renderer, RendererKind::Doughnut);
    let json = serde_json::to_value(&spec).unwrap();
    assert_eq!(json["options"]["cutout"], "50%");
    assert_eq!(json["options"]["plugins"]["datalabels"]["labels"][0][3], "25.0%");
}

#[test]
fn test_zero_total_pie_renders_zero_percent() {
    let spec = spec_from(json!({
        "render_mode": "frontend",
        "chart_type": "pie",
        "chart_config": {"labels": ["a", "b"], "datasets": [{"label": "x", "data": [0, 0]}]}
    }));
    assert_eq!(spec.value_labels(0).unwrap(), ["0.0%", "0.0%"]);
}

#[test]
fn test_area_datasets_fill_to_predecessor() {
    let spec = spec_from(json!({
        "render_mode": "frontend",
        "chart_type": "area",
        "chart_config": {
            "labels": ["Jan", "Feb"],
            "datasets": [
                {"label": "Online", "data": [5, 6]},
                {"label": "Retail", "data": [7, 8]},
                {"label": "Wholesale", "data": [9, 10]}
            ]
        }
    }));

    assert_eq!(spec.renderer, RendererKind::Line);
    let fills: Vec<_> = spec.datasets().iter().map(|d| d.fill.clone()).collect();
    assert_eq!(
        fills,
        vec![
            Some(Fill::Target("origin".to_string())),
            Some(Fill::Dataset(0)),
            Some(Fill::Dataset(1)),
        ]
    );
    // Labels are suppressed once there is more than one series
    assert!(spec.value_labels(0).is_none());

    let json = serde_json::to_value(&spec).unwrap();
    assert_eq!(json["data"]["datasets"][0]["fill"], "origin");
    assert_eq!(json["data"]["datasets"][2]["fill"], 1);
}

#[test]
fn test_single_area_dataset_keeps_value_labels() {
    let spec = spec_from(json!({
        "render_mode": "frontend",
        "chart_type": "area",
        "chart_config": {"labels": ["Jan", "Feb"], "datasets": [{"label": "Orders", "data": [1500, 2500000]}]}
    }));
    assert_eq!(spec.value_labels(0).unwrap(), ["1.5K", "2.5M"]);
}

#[test]
fn test_stacked_bar_keeps_normalized_styles() {
    let spec = spec_from(json!({
        "render_mode": "frontend",
        "chart_type": "stacked_bar",
        "chart_config": {
            "labels": ["a", "b"],
            "datasets": [{"label": "x", "data": [1, 2], "backgroundcolor": "#118DFF", "borderwidth": 1}]
        }
    }));

    let dataset = &spec.datasets()[0];
    assert_eq!(dataset.background_color, Some(Paint::from("#118DFF")));
    assert_eq!(dataset.border_width, Some(1.0));
    assert!(spec.options.plugins.is_none());

    let json = serde_json::to_value(&spec).unwrap();
    assert_eq!(json["type"], "bar");
    assert_eq!(json["options"]["scales"]["x"]["stacked"], true);
    assert_eq!(json["options"]["scales"]["y"]["stacked"], true);
}

#[test]
fn test_unknown_type_synthesizes_as_bar() {
    let pipeline = ChartPipeline::new(ValidationOptions {
        accept_unknown_chart_types: true,
    });
    let spec = spec_for(
        &pipeline,
        json!("{render_mode:'frontend',chart_type:'radar',chart_config:{labels:['a','b'],datasets:[{label:'x',data:[3,4]}]}}"),
    );

    assert_eq!(spec.kind, ChartType::Bar);
    assert_eq!(spec.renderer, RendererKind::Bar);
    assert_eq!(spec.value_labels(0).unwrap(), ["3", "4"]);
}

#[test]
fn test_mismatched_lengths_are_truncated() {
    let spec = spec_from(json!({
        "render_mode": "frontend",
        "chart_type": "line",
        "chart_config": {"labels": ["a", "b"], "datasets": [{"label": "x", "data": [1, 2, 3, 4]}]}
    }));
    assert_eq!(spec.datasets()[0].data, vec![1.0, 2.0]);
}

#[test]
fn test_overflow_slice_colors_are_reproducible() {
    let labels: Vec<String> = (1..=15).map(|i| format!("Store {}", i)).collect();
    let payload = json!({
        "render_mode": "frontend",
        "chart_type": "pie",
        "chart_config": {"labels": labels, "datasets": [{"label": "Sales", "data": vec![1; 15]}]}
    });

    let first = spec_from(payload.clone());
    let second = spec_from(payload);
    assert_eq!(first, second);

    match &first.datasets()[0].background_color {
        Some(Paint::PerPoint(colors)) => {
            assert_eq!(colors, &slice_colors(15));
            let mut unique = colors.clone();
            unique.sort();
            unique.dedup();
            assert_eq!(unique.len(), 15);
        }
        other => panic!("expected per-slice colors, got {:?}", other),
    }
}
