//! Session History
//!
//! Ordered, bounded record of the exchanges of one session. Oldest entries
//! are evicted once `limit` is exceeded.
//!
//! The `VecDeque` owns the order; replaying an exchange by id goes through
//! an unbounded `mini_moka` cache keyed by id. The cache holds exactly the
//! retained entries: every push inserts and every eviction invalidates, so
//! a miss means the exchange is gone.
//!
//! Only the normalized answer is kept; chart specifications are recomputed
//! every time an exchange is displayed.

use std::collections::VecDeque;
use std::sync::Arc;

use mini_moka::sync::Cache;

use crate::models::chat::ChatExchange;

pub struct SessionHistory {
    limit: usize,
    entries: VecDeque<Arc<ChatExchange>>,
    by_id: Cache<String, Arc<ChatExchange>>,
}

impl SessionHistory {
    /// Create a history holding at most `limit` exchanges (minimum 1).
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            limit,
            entries: VecDeque::with_capacity(limit),
            by_id: Cache::builder().build(),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Change the limit, evicting the oldest entries that no longer fit.
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit.max(1);
        self.evict_overflow();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append an exchange, evicting the oldest ones past the limit.
    pub fn push(&mut self, exchange: ChatExchange) -> Arc<ChatExchange> {
        let exchange = Arc::new(exchange);
        self.by_id.insert(exchange.id.clone(), exchange.clone());
        self.entries.push_back(exchange.clone());
        self.evict_overflow();
        exchange
    }

    fn evict_overflow(&mut self) {
        while self.entries.len() > self.limit {
            if let Some(evicted) = self.entries.pop_front() {
                tracing::debug!("[SessionHistory] Evicting exchange {}", evicted.id);
                self.by_id.invalidate(&evicted.id);
            }
        }
    }

    /// All retained exchanges, oldest first.
    pub fn list(&self) -> Vec<Arc<ChatExchange>> {
        self.entries.iter().cloned().collect()
    }

    pub fn latest(&self) -> Option<Arc<ChatExchange>> {
        self.entries.back().cloned()
    }

    pub fn get(&self, id: &str) -> Option<Arc<ChatExchange>> {
        self.by_id.get(&id.to_string())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.by_id.invalidate_all();
    }
}

impl Default for SessionHistory {
    fn default() -> Self {
        Self::new(50)
    }
}
