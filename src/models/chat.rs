//! Chat Models
//!
//! One question and its normalized answer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use askdata_core::ChatResponse;

/// A question/answer pair as kept in the session history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatExchange {
    pub id: String,
    /// The question as the user typed it (trimmed)
    pub question: String,
    pub timestamp: DateTime<Utc>,
    pub response: ChatResponse,
    /// Set when the service could not be reached at all
    #[serde(default)]
    pub connection_error: bool,
}

impl ChatExchange {
    pub fn new(question: impl Into<String>, response: ChatResponse) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            question: question.into(),
            timestamp: Utc::now(),
            response,
            connection_error: false,
        }
    }

    pub fn with_connection_error(mut self, connection_error: bool) -> Self {
        self.connection_error = connection_error;
        self
    }

    /// One-line status for lists.
    pub fn summary(&self) -> &'static str {
        if self.response.is_error() {
            "Error occurred"
        } else {
            "Response received"
        }
    }
}
