use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::pacing::{RandomPacer, ResponsePacer};
use crate::store::chat::ChatStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub chats: ChatStore,
    pub pacer: Arc<dyn ResponsePacer>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let pacer = RandomPacer::from_config(&config.chat);
        Self::with_pacer(config, Arc::new(pacer))
    }

    pub fn with_pacer(config: AppConfig, pacer: Arc<dyn ResponsePacer>) -> Self {
        Self {
            config: Arc::new(config),
            chats: ChatStore::new(),
            pacer,
        }
    }
}
