//! Chat Service
//!
//! Turns a user question into a `ChatExchange`: prepare the question, send
//! it through the transport once, then run the chart pipeline over the raw
//! answer. Chart failures never fail the exchange; only transport failures
//! produce an error answer.

use std::sync::Arc;

use askdata_charts::{ChartPipeline, ChartSource};
use askdata_core::{ChatResponse, RawChatResponse};
use askdata_transport::{build_transport, QueryTransport};

use crate::models::chat::ChatExchange;
use crate::models::settings::AppConfig;
use crate::utils::error::{AppError, AppResult};

pub struct ChatService {
    transport: Arc<dyn QueryTransport>,
    pipeline: ChartPipeline,
}

impl ChatService {
    pub fn new(transport: Arc<dyn QueryTransport>, pipeline: ChartPipeline) -> Self {
        Self {
            transport,
            pipeline,
        }
    }

    /// Build the transport and pipeline described by `config`.
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let transport = build_transport(&config.transport_config())?;
        Ok(Self::new(
            transport,
            ChartPipeline::new(config.validation_options()),
        ))
    }

    pub fn transport_name(&self) -> &'static str {
        self.transport.name()
    }

    /// Ask one question.
    ///
    /// Errors only for an empty question, before anything is sent.
    pub async fn ask(&self, question: &str) -> AppResult<ChatExchange> {
        let prepared = prepare_question(question)?;
        tracing::info!(
            "[ChatService] Sending question via {} transport",
            self.transport.name()
        );

        let exchange = match self.transport.send(&prepared).await {
            Ok(raw) => ChatExchange::new(question.trim(), self.normalize(raw)),
            Err(e) => {
                tracing::warn!("[ChatService] Transport failed: {}", e);
                ChatExchange::new(question.trim(), ChatResponse::error(e.to_string()))
                    .with_connection_error(e.is_connection_failure())
            }
        };
        Ok(exchange)
    }

    /// Run the chart pipeline over a raw answer.
    pub fn normalize(&self, raw: RawChatResponse) -> ChatResponse {
        let rows = raw.rows();
        let outcome = self.pipeline.process(raw.chart_data.as_ref(), &rows);
        if outcome.source == ChartSource::Reconstructed {
            tracing::info!("[ChatService] Chart rebuilt from {} rows", rows.len());
        }
        ChatResponse::from_raw(raw, outcome.chart)
    }
}

/// Trim the question and expand `FY` to `Financial Year`.
pub fn prepare_question(question: &str) -> AppResult<String> {
    let trimmed = question.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("question is empty"));
    }
    Ok(trimmed.replace("FY", "Financial Year"))
}
