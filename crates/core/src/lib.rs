//! AskData Core
//!
//! Foundational types for the AskData workspace. This crate has no
//! dependencies on the transport, the chart pipeline, or the application
//! layer.
//!
//! ## Module Organization
//!
//! - `error` - Core error types (`CoreError`, `CoreResult`)
//! - `chart` - Canonical chart model (`ChartDescription`, `Dataset`, `ChartType`)
//! - `response` - Answer envelope (`RawChatResponse`, `ChatResponse`, `Row`)
//! - `proxy` - Proxy configuration data types

pub mod chart;
pub mod error;
pub mod proxy;
pub mod response;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{CoreError, CoreResult};

// ── Chart Model ────────────────────────────────────────────────────────
pub use chart::{
    scalar_to_string, value_as_number, ChartConfig, ChartDescription, ChartType, Dataset, Fill,
    Paint, RenderMode,
};

// ── Response Envelope ──────────────────────────────────────────────────
pub use response::{
    coerce_rows, json_kind, ChatResponse, RawChatResponse, Row, STATUS_ERROR, STATUS_VALID,
};

// ── Proxy Types ────────────────────────────────────────────────────────
pub use proxy::{ProxyConfig, ProxyProtocol};
