//! In-memory adapter for the game repository.

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::domain::state::Game;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::repos::games::GameStore;

/// DashMap-backed implementation of GameStore.
#[derive(Debug, Default)]
pub struct InMemoryGameStore {
    games: DashMap<String, Game>,
}

impl InMemoryGameStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GameStore for InMemoryGameStore {
    async fn insert(&self, game: Game) -> Result<(), DomainError> {
        match self.games.entry(game.code.clone()) {
            Entry::Occupied(_) => Err(DomainError::conflict(
                ConflictKind::GameCodeTaken,
                format!("Game code {} already in use", game.code),
            )),
            Entry::Vacant(slot) => {
                slot.insert(game);
                Ok(())
            }
        }
    }

    async fn find(&self, code: &str) -> Result<Option<Game>, DomainError> {
        Ok(self.games.get(code).map(|g| g.value().clone()))
    }

    async fn replace(&self, game: Game, expected_version: u32) -> Result<(), DomainError> {
        let Some(mut stored) = self.games.get_mut(&game.code) else {
            return Err(DomainError::not_found(
                NotFoundKind::Game,
                format!("Game {} not found", game.code),
            ));
        };
        if stored.version != expected_version {
            return Err(DomainError::conflict(
                ConflictKind::OptimisticLock,
                format!(
                    "Game lock version mismatch: expected {expected_version}, but game has version {}",
                    stored.version
                ),
            ));
        }
        *stored = game;
        Ok(())
    }

    async fn remove(&self, code: &str) -> Result<bool, DomainError> {
        Ok(self.games.remove(code).is_some())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.games.len())
    }
}
