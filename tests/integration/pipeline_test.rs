//! Chart Pipeline Integration Tests
//!
//! Raw answers, as the service sends them, through the lenient parser,
//! validator, normalizer and row fallback into the final `ChatResponse`.

use askdata::{ChartPipeline, ChartSource, ChatResponse, RawChatResponse};
use askdata_charts::{
    normalize_candidate, parse_chart_payload, to_object_literal, ValidationOptions,
};
use askdata_core::{ChartDescription, ChartType, Dataset, Paint, RenderMode};
use serde_json::{json, Value};

// ============================================================================
// Helpers
// ============================================================================

fn raw_answer(chart_data: Value, data: Value) -> RawChatResponse {
    serde_json::from_value(json!({
        "status": "valid",
        "message": null,
        "sql_query": "SELECT product_name, SUM(amount) AS total_sales FROM sales GROUP BY product_name",
        "insight": "Product B sold twice as much as product A.",
        "data": data,
        "chart_data": chart_data
    }))
    .unwrap()
}

fn normalize_answer(pipeline: &ChartPipeline, raw: RawChatResponse) -> (ChatResponse, ChartSource) {
    let rows = raw.rows();
    let outcome = pipeline.process(raw.chart_data.as_ref(), &rows);
    (ChatResponse::from_raw(raw, outcome.chart), outcome.source)
}

fn product_rows() -> Value {
    json!([
        {"product_name": "A", "total_sales": 10},
        {"product_name": "B", "total_sales": 20}
    ])
}

fn styled_bar_chart() -> ChartDescription {
    let mut revenue = Dataset::new("Revenue", vec![120.5, 98.0, 143.25]);
    revenue.background_color = Some(Paint::from("#118DFF"));
    revenue.border_width = Some(2.0);
    let mut target = Dataset::new("Target", vec![100.0, 100.0, 100.0]);
    target.border_color = Some(Paint::PerPoint(vec![
        "#111111".to_string(),
        "#222222".to_string(),
        "#333333".to_string(),
    ]));
    ChartDescription::frontend(
        ChartType::Bar,
        vec!["Q1 2024".into(), "Q2 2024".into(), "Q3 2024".into()],
        vec![revenue, target],
    )
}

// ============================================================================
// Loose-literal round trip
// ============================================================================

#[test]
fn test_loose_literal_round_trip_preserves_structure() {
    let mut backend = ChartDescription::backend("iVBORw0KGgoAAAANSUhEUgAAAAE");
    backend.chart_config.alt_text = Some("Monthly revenue".to_string());

    let charts = vec![
        styled_bar_chart(),
        ChartDescription::frontend(
            ChartType::Donut,
            vec!["North".into(), "South".into()],
            vec![Dataset::new("Share", vec![60.0, 40.0])],
        ),
        backend,
    ];

    for chart in charts {
        let canonical = serde_json::to_value(&chart).unwrap();
        let loose = Value::String(to_object_literal(&canonical));

        let candidate = parse_chart_payload(&loose).expect("loose literal should parse");
        assert_eq!(normalize_candidate(&candidate), canonical);

        let outcome = ChartPipeline::default().process(Some(&loose), &[]);
        assert_eq!(outcome.source, ChartSource::Payload);
        assert_eq!(outcome.chart.unwrap(), chart);
    }
}

#[test]
fn test_loose_literal_round_trip_with_delimiters_in_text() {
    let mut chart = ChartDescription::frontend(
        ChartType::Line,
        vec![
            "Region, East: 2024".into(),
            "[draft] West".into(),
            "Men's wear".into(),
            "True or None".into(),
            "a: 'b', c".into(),
        ],
        vec![Dataset::new("Sales, net: USD", vec![1.0, 2.5, 3.0, 4.0, 5.0])],
    );
    chart.chart_config.title = Some("Revenue by region, note: estimates".to_string());

    let canonical = serde_json::to_value(&chart).unwrap();
    let loose = Value::String(to_object_literal(&canonical));

    let outcome = ChartPipeline::default().process(Some(&loose), &[]);
    assert_eq!(outcome.source, ChartSource::Payload);
    assert_eq!(outcome.chart.unwrap(), chart);
}

// ============================================================================
// Truncation recovery
// ============================================================================

#[test]
fn test_truncated_payload_recovers_chart() {
    let raw = raw_answer(
        json!("{render_mode:'frontend',chart_type:'bar',chart_config:{labels:['a','b'],datasets:[{label:'x',data:[1,2,3."),
        product_rows(),
    );
    let (response, source) = normalize_answer(&ChartPipeline::default(), raw);

    assert_eq!(source, ChartSource::Payload);
    let chart = response.chart_data.unwrap();
    assert_eq!(chart.render_mode, RenderMode::Frontend);
    assert_eq!(chart.chart_type, Some(ChartType::Bar));
    assert_eq!(chart.labels(), ["a", "b"]);
    assert_eq!(chart.datasets()[0].label, "x");
    assert_eq!(chart.datasets()[0].data, vec![1.0, 2.0]);
}

#[test]
fn test_multiline_payload_with_trailing_commas() {
    let payload = json!(
        "{\n  render_mode: 'frontend',\n  chart_type: 'line',\n  chart_config: {\n    labels: ['Jan', 'Feb',],\n    datasets: [{label: 'Orders', data: [5, 8,],},],\n  },\n}"
    );
    let (response, _) = normalize_answer(
        &ChartPipeline::default(),
        raw_answer(payload, json!([])),
    );
    let chart = response.chart_data.unwrap();
    assert_eq!(chart.labels(), ["Jan", "Feb"]);
    assert_eq!(chart.datasets()[0].data, vec![5.0, 8.0]);
}

// ============================================================================
// Alias normalization
// ============================================================================

#[test]
fn test_alias_properties_are_canonical_after_pipeline() {
    let payload = json!({
        "render_mode": "frontend",
        "chart_type": "line",
        "chart_config": {
            "labels": ["a", "b"],
            "datasets": [{
                "label": "x",
                "data": [1, 2],
                "backgroundcolor": "#111",
                "bordercolor": "#222",
                "borderwidth": 2,
                "pointbackgroundcolor": "#333",
                "pointbordercolor": "#444",
                "pointborderwidth": 1
            }]
        }
    });
    let (response, _) = normalize_answer(
        &ChartPipeline::default(),
        raw_answer(payload.clone(), json!([])),
    );

    let chart = response.chart_data.unwrap();
    let dataset = &chart.datasets()[0];
    assert_eq!(dataset.background_color, Some(Paint::from("#111")));
    assert_eq!(dataset.border_color, Some(Paint::from("#222")));
    assert_eq!(dataset.border_width, Some(2.0));
    assert_eq!(dataset.point_background_color, Some(Paint::from("#333")));
    assert_eq!(dataset.point_border_color, Some(Paint::from("#444")));
    assert_eq!(dataset.point_border_width, Some(1.0));
    assert!(dataset.extra.is_empty());

    let serialized = serde_json::to_value(&chart).unwrap();
    let keys: Vec<&String> = serialized["chart_config"]["datasets"][0]
        .as_object()
        .unwrap()
        .keys()
        .collect();
    for alias in ["backgroundcolor", "bordercolor", "borderwidth"] {
        assert!(!keys.iter().any(|k| k.as_str() == alias), "{} remained", alias);
    }

    // The raw payload the caller still holds is untouched
    assert!(payload["chart_config"]["datasets"][0]
        .get("backgroundcolor")
        .is_some());
}

// ============================================================================
// Fallback reconstruction
// ============================================================================

#[test]
fn test_unusable_payload_rebuilt_from_rows() {
    let (response, source) = normalize_answer(
        &ChartPipeline::default(),
        raw_answer(json!("chart could not be generated"), product_rows()),
    );

    assert_eq!(source, ChartSource::Reconstructed);
    let chart = response.chart_data.unwrap();
    assert_eq!(chart.chart_type, Some(ChartType::Line));
    assert_eq!(chart.labels(), ["A", "B"]);
    assert_eq!(chart.datasets().len(), 1);
    assert_eq!(chart.datasets()[0].label, "total sales");
    assert_eq!(chart.datasets()[0].data, vec![10.0, 20.0]);
}

#[test]
fn test_monthly_rows_rebuilt_as_time_series() {
    let rows = json!([
        {"sale_year": 2024, "month": 1, "month_name": "January", "TotalSales": 1200.5},
        {"sale_year": 2024, "month": 2, "month_name": "February", "TotalSales": 980}
    ]);
    let (response, source) = normalize_answer(
        &ChartPipeline::default(),
        raw_answer(json!("{{{ not json"), rows),
    );

    assert_eq!(source, ChartSource::Reconstructed);
    let chart = response.chart_data.unwrap();
    assert_eq!(chart.labels(), ["January 2024", "February 2024"]);
    assert_eq!(chart.datasets()[0].label, "Total Sales");
    assert_eq!(chart.datasets()[0].data, vec![1200.5, 980.0]);
}

#[test]
fn test_no_fallback_columns_omits_chart() {
    let rows = json!([{"flag": true}, {"flag": false}]);
    let (response, source) = normalize_answer(
        &ChartPipeline::default(),
        raw_answer(json!("garbage"), rows),
    );
    assert_eq!(source, ChartSource::Omitted);
    assert!(!response.has_chart());
    assert_eq!(response.data.len(), 2);
}

// ============================================================================
// Validator rejection and unknown types
// ============================================================================

#[test]
fn test_rejected_payload_keeps_rest_of_answer() {
    let raw = raw_answer(json!("{render_mode:'frontend'}"), product_rows());
    let insight = raw.insight.clone();
    let (response, source) = normalize_answer(&ChartPipeline::default(), raw);

    assert_eq!(source, ChartSource::Omitted);
    assert!(response.chart_data.is_none());
    assert_eq!(response.insight, insight);
    assert_eq!(response.data.len(), 2);
    assert!(!response.is_error());
}

#[test]
fn test_unknown_type_follows_validation_options() {
    let payload = json!("{render_mode:'frontend',chart_type:'radar',chart_config:{labels:['a','b'],datasets:[{label:'x',data:[1,2]}]}}");

    let (strict, _) = normalize_answer(
        &ChartPipeline::default(),
        raw_answer(payload.clone(), json!([])),
    );
    assert!(!strict.has_chart());

    let lenient = ChartPipeline::new(ValidationOptions {
        accept_unknown_chart_types: true,
    });
    let (accepted, _) = normalize_answer(&lenient, raw_answer(payload, json!([])));
    let chart = accepted.chart_data.unwrap();
    assert_eq!(chart.chart_type, Some(ChartType::Other("radar".to_string())));
}

// ============================================================================
// Tabular data coercion
// ============================================================================

#[test]
fn test_string_rows_are_coerced() {
    let rows_as_text = Value::String(product_rows().to_string());
    let (response, _) = normalize_answer(
        &ChartPipeline::default(),
        raw_answer(Value::Null, rows_as_text),
    );
    assert_eq!(response.data.len(), 2);
    assert_eq!(response.data[1]["product_name"], "B");
}

#[test]
fn test_unparseable_rows_become_empty() {
    let (response, _) = normalize_answer(
        &ChartPipeline::default(),
        raw_answer(Value::Null, json!("not a table")),
    );
    assert!(response.data.is_empty());
    assert_eq!(response.status, "valid");
}
