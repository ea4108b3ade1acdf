use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::domain::game_transition::{derive_game_transitions, GameTransition};
use crate::domain::state::Game;
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::errors::ErrorCode;
use crate::realtime::protocol::{EventType, GameEvent};
use crate::repos::games::require_game;
use crate::services::game_flow::GameFlowService;

#[derive(Debug)]
pub struct GameFlowMutationResult<T> {
    pub final_game: Game,
    pub old_version: u32,
    pub transitions: Vec<GameTransition>,
    pub outcome: T,
}

impl<T> GameFlowMutationResult<T> {
    pub fn final_version(&self) -> u32 {
        self.final_game.version
    }
}

impl GameFlowService {
    /// Apply `mutation` to game `code` and commit it as one new version.
    ///
    /// The mutation runs on a copy; an error leaves the stored game untouched.
    /// After the write commits, `event` is published. A failed publish is
    /// logged and does not undo the write.
    pub async fn run_mutation<T, F>(
        &self,
        code: &str,
        expected_version: Option<u32>,
        event: EventType,
        mutation: F,
    ) -> Result<GameFlowMutationResult<T>, AppError>
    where
        F: FnOnce(&mut Game) -> Result<T, DomainError>,
    {
        let lock = self.lock_for(code);
        let guard = lock.lock().await;

        let before = match require_game(self.store.as_ref(), code).await {
            Ok(game) => game,
            Err(err) => {
                drop(guard);
                self.forget_lock(code);
                return Err(err.into());
            }
        };
        let old_version = before.version;

        if let Some(expected) = expected_version {
            if old_version != expected {
                return Err(AppError::conflict(
                    ErrorCode::OptimisticLock,
                    format!(
                        "Game lock version mismatch: expected {expected}, but game has version {old_version}"
                    ),
                ));
            }
        }

        let mut after = before.clone();
        let outcome = mutation(&mut after).map_err(|err| {
            debug!(game_code = %code, event = event.as_str(), error = %err, "Mutation rejected");
            err
        })?;

        after.version = old_version + 1;
        after.updated_at = OffsetDateTime::now_utc();
        self.store.replace(after.clone(), old_version).await?;

        let transitions = derive_game_transitions(&before, &after);
        info!(
            game_code = %code,
            version = after.version,
            event = event.as_str(),
            transitions = transitions.len(),
            "Game mutation committed"
        );

        self.publish(event, &after, &transitions).await;

        Ok(GameFlowMutationResult {
            final_game: after,
            old_version,
            transitions,
            outcome,
        })
    }

    pub(super) async fn publish(&self, event: EventType, game: &Game, transitions: &[GameTransition]) {
        let message = match GameEvent::mutation(event, game, transitions) {
            Ok(message) => message,
            Err(err) => {
                warn!(game_code = %game.code, event = event.as_str(), error = %err, "Failed to encode game event");
                return;
            }
        };
        match self.notifier.notify(message).await {
            Ok(delivered) => {
                debug!(game_code = %game.code, event = event.as_str(), delivered, "Game event published");
            }
            Err(err) => {
                warn!(game_code = %game.code, event = event.as_str(), error = %err, "Failed to publish game event");
            }
        }
    }
}
