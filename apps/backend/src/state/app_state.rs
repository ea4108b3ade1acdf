use std::sync::Arc;

use crate::adapters::games_mem::InMemoryGameStore;
use crate::config::AppConfig;
use crate::realtime::hub::GameEventHub;
use crate::services::game_flow::GameFlowService;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    /// Game flow service; owns storage and the notifier seam
    pub games: Arc<GameFlowService>,
    /// Event hub backing the SSE streams
    pub hub: Arc<GameEventHub>,
}

impl AppState {
    /// Wire the in-memory store and event hub for `config`.
    pub fn new(config: AppConfig) -> Self {
        let hub = Arc::new(GameEventHub::new(config.sse_channel_capacity));
        let store = Arc::new(InMemoryGameStore::new());
        let games = Arc::new(GameFlowService::new(store, hub.clone()));
        Self { config, games, hub }
    }

    /// Create a test AppState with default configuration
    pub fn for_tests() -> Self {
        Self::new(AppConfig::default())
    }
}
