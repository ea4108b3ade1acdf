//! Game flow orchestration service - bridges the pure domain state machine with
//! storage and the event notifier.
//!
//! Every mutation runs under the game's own lock, so at most one write per game
//! is in flight. Reads go straight to the store.

mod mutation;
mod orchestration;
mod player_actions;
mod round_lifecycle;

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::realtime::hub::GameNotifier;
use crate::repos::games::GameStore;

pub use mutation::GameFlowMutationResult;
pub use orchestration::CreateGame;

pub struct GameFlowService {
    store: Arc<dyn GameStore>,
    notifier: Arc<dyn GameNotifier>,
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl GameFlowService {
    pub fn new(store: Arc<dyn GameStore>, notifier: Arc<dyn GameNotifier>) -> Self {
        Self {
            store,
            notifier,
            locks: DashMap::new(),
        }
    }

    fn lock_for(&self, code: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(code.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    fn forget_lock(&self, code: &str) {
        self.locks.remove(code);
    }

    pub fn store(&self) -> &dyn GameStore {
        self.store.as_ref()
    }
}
