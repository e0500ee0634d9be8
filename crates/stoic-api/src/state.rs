use std::sync::Arc;
use stoic_llm::{ChatClient, ChatOptions};
use crate::config::Config;

/// Shared application state passed to all handlers
///
/// Requests are handled statelessly; this only carries read-only config
/// and the upstream client, both behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub llm_client: Arc<dyn ChatClient>,
    pub chat_options: ChatOptions,
}

impl AppState {
    pub fn new(config: Config, llm_client: Arc<dyn ChatClient>) -> Self {
        let chat_options = ChatOptions::from(&config.llm);
        Self {
            config: Arc::new(config),
            llm_client,
            chat_options,
        }
    }

    pub fn model(&self) -> &str {
        &self.config.llm.model
    }
}
