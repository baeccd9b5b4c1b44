//! Chat Flow Integration Tests
//!
//! Questions through `AppState` with the demo transport: answers are
//! normalized, recorded in the session history, drawn through a chart slot
//! and exported as CSV.

use std::sync::{Arc, Mutex};

use askdata::{
    export_filename, rows_to_csv, synthesize, table_columns, AppState, ChartRenderer, ChartSlot,
    ConfigService, Drawable, RenderedChart, SettingsUpdate,
};
use askdata_core::{ChartType, Paint};
use tempfile::TempDir;

// ============================================================================
// Helpers
// ============================================================================

async fn demo_state(dir: &TempDir) -> AppState {
    let mut config = ConfigService::with_path(dir.path().join("config.json")).unwrap();
    config
        .update_config(SettingsUpdate {
            demo_mode: Some(true),
            demo_delay_ms: Some(0),
            ..Default::default()
        })
        .unwrap();
    let state = AppState::new();
    state.initialize_with(config).await.unwrap();
    state
}

/// Renderer that records draw and release calls.
#[derive(Clone, Default)]
struct RecordingRenderer {
    events: Arc<Mutex<Vec<String>>>,
}

impl RecordingRenderer {
    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

struct RecordedChart {
    name: String,
    events: Arc<Mutex<Vec<String>>>,
}

impl RenderedChart for RecordedChart {
    fn release(&mut self) {
        self.events
            .lock()
            .unwrap()
            .push(format!("release {}", self.name));
    }
}

impl ChartRenderer for RecordingRenderer {
    fn draw(&self, drawable: &Drawable) -> Box<dyn RenderedChart> {
        let name = match drawable {
            Drawable::Spec(spec) => spec.kind.to_string(),
            Drawable::BackendImage { .. } => "image".to_string(),
        };
        self.events.lock().unwrap().push(format!("draw {}", name));
        Box::new(RecordedChart {
            name,
            events: self.events.clone(),
        })
    }
}

// ============================================================================
// Demo answers
// ============================================================================

#[tokio::test]
async fn test_sales_question_yields_bar_chart() {
    let dir = tempfile::tempdir().unwrap();
    let state = demo_state(&dir).await;

    let exchange = state.ask("  Show me sales for FY2024 ").await.unwrap();
    assert_eq!(exchange.question, "Show me sales for FY2024");
    assert_eq!(exchange.summary(), "Response received");
    assert!(!exchange.connection_error);

    let response = &exchange.response;
    assert_eq!(response.data.len(), 8);
    let chart = response.chart_data.as_ref().unwrap();
    assert_eq!(chart.chart_type, Some(ChartType::Bar));
    assert_eq!(chart.labels().len(), 8);
    assert_eq!(chart.labels()[1], "Samsung TV 55\"");
    assert_eq!(chart.display_title(), "Total Sales");
    assert_eq!(chart.datasets()[0].data[0], 125000.0);

    let spec = synthesize(chart).unwrap();
    assert_eq!(spec.value_labels(0).unwrap()[0], "125.0K");
}

#[tokio::test]
async fn test_inventory_aliases_are_normalized() {
    let dir = tempfile::tempdir().unwrap();
    let state = demo_state(&dir).await;

    let exchange = state.ask("Which items are low on stock?").await.unwrap();
    let chart = exchange.response.chart_data.as_ref().unwrap();
    assert_eq!(chart.chart_type, Some(ChartType::StackedBar));

    let datasets = chart.datasets();
    assert_eq!(datasets.len(), 2);
    assert_eq!(datasets[0].background_color, Some(Paint::from("#118DFF")));
    assert_eq!(datasets[1].border_width, Some(1.0));
    assert!(datasets.iter().all(|d| d.extra.is_empty()));
}

#[tokio::test]
async fn test_error_answer_has_no_chart() {
    let dir = tempfile::tempdir().unwrap();
    let state = demo_state(&dir).await;

    let exchange = state.ask("show an error").await.unwrap();
    assert!(exchange.response.is_error());
    assert!(exchange.response.message.is_some());
    assert!(!exchange.response.has_chart());
    assert!(!exchange.connection_error);
    assert_eq!(exchange.summary(), "Error occurred");
}

#[tokio::test]
async fn test_empty_question_is_rejected_and_not_recorded() {
    let dir = tempfile::tempdir().unwrap();
    let state = demo_state(&dir).await;

    assert!(state.ask("   ").await.is_err());
    assert!(state.history().await.is_empty());
}

// ============================================================================
// History, display and export
// ============================================================================

#[tokio::test]
async fn test_history_replays_through_chart_slot() {
    let dir = tempfile::tempdir().unwrap();
    let state = demo_state(&dir).await;

    state.ask("sales by product").await.unwrap();
    state.ask("top customers").await.unwrap();
    state.ask("inventory levels").await.unwrap();

    let history = state.history().await;
    let questions: Vec<&str> = history.iter().map(|e| e.question.as_str()).collect();
    assert_eq!(questions, ["sales by product", "top customers", "inventory levels"]);

    let renderer = RecordingRenderer::default();
    let mut slot = ChartSlot::new(renderer.clone());
    for exchange in &history {
        match &exchange.response.chart_data {
            Some(chart) => {
                assert!(slot.show(chart));
            }
            None => slot.clear(),
        }
    }
    drop(slot);

    assert_eq!(
        renderer.events(),
        [
            "draw bar",
            "release bar",
            "draw stacked_bar",
            "release stacked_bar"
        ]
    );

    // Replaying an exchange looks it up by id
    let first = state.get_exchange(&history[0].id).await.unwrap();
    assert_eq!(first.question, "sales by product");
}

#[tokio::test]
async fn test_customer_rows_export_as_csv() {
    let dir = tempfile::tempdir().unwrap();
    let state = demo_state(&dir).await;

    let exchange = state.ask("list customers").await.unwrap();
    let rows = &exchange.response.data;
    assert!(!exchange.response.has_chart());
    assert_eq!(
        table_columns(rows),
        [
            "customer_id",
            "first_name",
            "last_name",
            "email",
            "total_orders",
            "lifetime_value",
            "last_order_date"
        ]
    );

    let path = dir.path().join(export_filename());
    std::fs::write(&path, rows_to_csv(rows)).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    let mut lines = written.lines();
    assert_eq!(
        lines.next(),
        Some("customer_id,first_name,last_name,email,total_orders,lifetime_value,last_order_date")
    );
    assert_eq!(
        lines.next(),
        Some("1001,John,Smith,j.smith@email.com,12,15000,2025-05-28")
    );
    assert_eq!(lines.count(), 4);
}

// ============================================================================
// Transport failures
// ============================================================================

#[tokio::test]
async fn test_unreachable_service_records_connection_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/api/query", listener.local_addr().unwrap());
    drop(listener);

    let dir = tempfile::tempdir().unwrap();
    let mut config = ConfigService::with_path(dir.path().join("config.json")).unwrap();
    config
        .update_config(SettingsUpdate {
            api_url: Some(url),
            api_timeout_ms: Some(2_000),
            ..Default::default()
        })
        .unwrap();
    let state = AppState::new();
    state.initialize_with(config).await.unwrap();

    let exchange = state.ask("sales by region").await.unwrap();
    assert!(exchange.connection_error);
    assert!(exchange.response.is_error());
    assert!(exchange
        .response
        .message
        .as_deref()
        .unwrap()
        .starts_with("Error"));
    assert!(exchange.response.data.is_empty());
    assert_eq!(state.history().await.len(), 1);
}
