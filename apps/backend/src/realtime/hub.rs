use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::broadcast;
use tracing::debug;
use uuid::Uuid;

use crate::error::AppError;
use crate::realtime::protocol::GameEvent;

/// Receives events after a mutation commits.
#[async_trait]
pub trait GameNotifier: Send + Sync {
    /// Deliver `event` to observers of its game, returning how many received it.
    async fn notify(&self, event: GameEvent) -> Result<usize, AppError>;

    /// The game is gone; release whatever is held for its observers.
    fn close_game(&self, _game_code: &str) {}
}

pub struct Subscription {
    pub client_id: Uuid,
    pub receiver: broadcast::Receiver<Arc<GameEvent>>,
}

/// Per-game broadcast channels.
///
/// Receivers that fall more than `capacity` events behind skip ahead
/// (`RecvError::Lagged`); publishers never wait on them.
pub struct GameEventHub {
    channels: DashMap<String, broadcast::Sender<Arc<GameEvent>>>,
    capacity: usize,
}

impl GameEventHub {
    pub fn new(capacity: usize) -> Self {
        Self {
            channels: DashMap::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn subscribe(&self, game_code: &str) -> Subscription {
        let sender = self
            .channels
            .entry(game_code.to_string())
            .or_insert_with(|| broadcast::channel(self.capacity).0);
        let receiver = sender.subscribe();
        Subscription {
            client_id: Uuid::new_v4(),
            receiver,
        }
    }

    pub fn publish(&self, event: GameEvent) -> usize {
        let code = event.game_code.clone();
        let delivered = match self.channels.get(&code) {
            Some(sender) => sender.send(Arc::new(event)).unwrap_or(0),
            None => 0,
        };
        if delivered == 0 {
            self.prune(&code);
        }
        delivered
    }

    pub fn subscriber_count(&self, game_code: &str) -> usize {
        self.channels
            .get(game_code)
            .map(|sender| sender.receiver_count())
            .unwrap_or(0)
    }

    /// Drop the channel for `game_code` if nobody is listening.
    pub fn prune(&self, game_code: &str) {
        if self
            .channels
            .remove_if(game_code, |_, sender| sender.receiver_count() == 0)
            .is_some()
        {
            debug!(game_code = %game_code, "Pruned idle event channel");
        }
    }

    /// Drop the channel unconditionally; open streams see it close.
    pub fn close(&self, game_code: &str) {
        self.channels.remove(game_code);
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }
}

#[async_trait]
impl GameNotifier for GameEventHub {
    async fn notify(&self, event: GameEvent) -> Result<usize, AppError> {
        Ok(self.publish(event))
    }

    fn close_game(&self, game_code: &str) {
        self.close(game_code);
    }
}
