//! AskData - application library
//!
//! Application layer of the AskData client. It includes:
//! - Chat service: question in, normalized answer out
//! - Session history, chart display slot and table helpers
//! - JSON config storage
//! - Data models and utilities
//!
//! The chart pipeline lives in `askdata-charts`, the transports in
//! `askdata-transport`.

pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;

// ── Workspace crates ──
pub use askdata_charts::{synthesize, ChartPipeline, ChartSource, ChartSpec, PipelineOutcome};
pub use askdata_core::{ChartDescription, ChatResponse, ProxyConfig, RawChatResponse, Row};
pub use askdata_transport::{QueryTransport, TransportError};

// ── Application ──
pub use models::chat::ChatExchange;
pub use models::response::CommandResponse;
pub use models::settings::{AppConfig, SettingsUpdate};
pub use services::{
    export_filename, format_cell_value, prepare_question, rows_to_csv, table_columns,
    ChartRenderer, ChartSlot, ChatService, Drawable, RenderedChart, SessionHistory,
};
pub use state::AppState;
pub use storage::ConfigService;
pub use utils::error::{AppError, AppResult};
