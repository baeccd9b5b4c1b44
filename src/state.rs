//! Application State
//!
//! Holds the config service, the chat service built from it, and the
//! session history.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::chat::ChatExchange;
use crate::models::settings::{AppConfig, SettingsUpdate};
use crate::services::{ChatService, SessionHistory};
use crate::storage::ConfigService;
use crate::utils::error::{AppError, AppResult};

pub struct AppState {
    /// Configuration service for app settings
    config: Arc<RwLock<Option<ConfigService>>>,
    /// Chat service matching the current config
    chat: Arc<RwLock<Option<Arc<ChatService>>>>,
    /// Exchanges of this session
    history: Arc<RwLock<SessionHistory>>,
    /// Whether the state has been initialized
    initialized: Arc<RwLock<bool>>,
}

impl AppState {
    /// Create a new uninitialized app state
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(None)),
            chat: Arc::new(RwLock::new(None)),
            history: Arc::new(RwLock::new(SessionHistory::default())),
            initialized: Arc::new(RwLock::new(false)),
        }
    }

    /// Initialize from the config file in the default location
    pub async fn initialize(&self) -> AppResult<()> {
        if *self.initialized.read().await {
            return Ok(());
        }
        let config = ConfigService::new()?;
        self.initialize_with(config).await
    }

    /// Initialize from an already loaded config service
    pub async fn initialize_with(&self, config_service: ConfigService) -> AppResult<()> {
        let mut initialized = self.initialized.write().await;
        if *initialized {
            return Ok(());
        }

        let config = config_service.get_config_clone();
        {
            let chat = ChatService::from_config(&config)?;
            let mut chat_lock = self.chat.write().await;
            *chat_lock = Some(Arc::new(chat));
        }
        {
            let mut history = self.history.write().await;
            history.set_limit(config.history_limit);
        }
        {
            let mut config_lock = self.config.write().await;
            *config_lock = Some(config_service);
        }

        tracing::info!(
            "[AppState] Initialized (demo_mode: {}, history_limit: {})",
            config.demo_mode,
            config.history_limit
        );
        *initialized = true;
        Ok(())
    }

    /// Check if config is healthy
    pub fn is_config_healthy(&self) -> bool {
        if let Ok(guard) = self.config.try_read() {
            if let Some(ref config) = *guard {
                return config.is_healthy();
            }
        }
        false
    }

    /// Get the current configuration
    pub async fn get_config(&self) -> AppResult<AppConfig> {
        let guard = self.config.read().await;
        match &*guard {
            Some(config) => Ok(config.get_config_clone()),
            None => Err(AppError::config("Config service not initialized")),
        }
    }

    /// Update the configuration and rebuild the chat service to match
    pub async fn update_config(&self, update: SettingsUpdate) -> AppResult<AppConfig> {
        let updated = {
            let mut guard = self.config.write().await;
            match &mut *guard {
                Some(config) => config.update_config(update)?,
                None => return Err(AppError::config("Config service not initialized")),
            }
        };

        let chat = ChatService::from_config(&updated)?;
        *self.chat.write().await = Some(Arc::new(chat));
        self.history.write().await.set_limit(updated.history_limit);
        Ok(updated)
    }

    /// Ask a question and record the exchange in the session history
    pub async fn ask(&self, question: &str) -> AppResult<Arc<ChatExchange>> {
        let chat = self
            .chat
            .read()
            .await
            .clone()
            .ok_or_else(|| AppError::internal("Chat service not initialized"))?;

        let exchange = chat.ask(question).await?;
        Ok(self.history.write().await.push(exchange))
    }

    /// All exchanges of this session, oldest first
    pub async fn history(&self) -> Vec<Arc<ChatExchange>> {
        self.history.read().await.list()
    }

    pub async fn get_exchange(&self, id: &str) -> AppResult<Arc<ChatExchange>> {
        self.history
            .read()
            .await
            .get(id)
            .ok_or_else(|| AppError::not_found(format!("exchange {}", id)))
    }

    pub async fn clear_history(&self) {
        self.history.write().await.clear();
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
