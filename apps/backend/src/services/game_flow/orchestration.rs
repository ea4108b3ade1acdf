use serde::Deserialize;
use time::OffsetDateTime;
use tracing::{info, warn};

use super::GameFlowService;
use crate::domain::lifecycle;
use crate::domain::standings::{current_standings, Standing};
use crate::domain::state::{Game, GameConfig, NewPlayer};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError};
use crate::errors::ErrorCode;
use crate::realtime::protocol::{EventType, GameEvent};
use crate::repos::games::require_game;
use crate::utils::game_code::generate_game_code;

const CODE_ATTEMPTS: usize = 5;

/// Input for a new game.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGame {
    #[serde(default, alias = "game_name")]
    pub name: Option<String>,
    pub players: Vec<NewPlayer>,
    #[serde(flatten)]
    pub config: GameConfig,
}

impl GameFlowService {
    /// Create a game under a fresh random code.
    pub async fn create_game(&self, input: CreateGame) -> Result<Game, AppError> {
        let now = OffsetDateTime::now_utc();

        for attempt in 1..=CODE_ATTEMPTS {
            let game = lifecycle::create_game(
                generate_game_code(),
                input.name.clone(),
                input.players.clone(),
                input.config,
                now,
            )?;

            match self.store.insert(game.clone()).await {
                Ok(()) => {
                    info!(
                        game_code = %game.code,
                        players = game.player_count(),
                        max_rounds = game.max_rounds,
                        "Game created"
                    );
                    self.publish(EventType::GameCreated, &game, &[]).await;
                    return Ok(game);
                }
                Err(DomainError::Conflict(ConflictKind::GameCodeTaken, _)) => {
                    warn!(attempt, "Game code collision, retrying");
                }
                Err(err) => return Err(err.into()),
            }
        }

        Err(AppError::conflict(
            ErrorCode::GameCodeTaken,
            format!("Could not allocate a unique game code after {CODE_ATTEMPTS} attempts"),
        ))
    }

    pub async fn get_game(&self, code: &str) -> Result<Game, AppError> {
        Ok(require_game(self.store.as_ref(), code).await?)
    }

    pub async fn standings(&self, code: &str) -> Result<Vec<Standing>, AppError> {
        let game = self.get_game(code).await?;
        Ok(current_standings(&game))
    }

    /// Delete a game and tell its observers. Returns the deleted game's last version.
    pub async fn delete_game(
        &self,
        code: &str,
        expected_version: Option<u32>,
    ) -> Result<u32, AppError> {
        let lock = self.lock_for(code);
        let guard = lock.lock().await;

        let game = require_game(self.store.as_ref(), code).await?;
        if let Some(expected) = expected_version {
            if game.version != expected {
                return Err(AppError::conflict(
                    ErrorCode::OptimisticLock,
                    format!(
                        "Game lock version mismatch: expected {expected}, but game has version {}",
                        game.version
                    ),
                ));
            }
        }

        self.store.remove(code).await?;
        info!(game_code = %code, version = game.version, "Game deleted");

        if let Err(err) = self
            .notifier
            .notify(GameEvent::deleted(code, game.version))
            .await
        {
            warn!(game_code = %code, error = %err, "Failed to publish game event");
        }
        self.notifier.close_game(code);

        drop(guard);
        self.forget_lock(code);
        Ok(game.version)
    }
}
