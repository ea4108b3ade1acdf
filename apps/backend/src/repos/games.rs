//! Game repository trait for the service layer.

use async_trait::async_trait;

use crate::domain::state::Game;
use crate::errors::domain::{DomainError, NotFoundKind};

/// Storage seam for whole-game snapshots.
///
/// `replace` is a compare-and-swap on `version`: the stored game must still be
/// at `expected_version`, otherwise the call fails with `OptimisticLock`.
#[async_trait]
pub trait GameStore: Send + Sync {
    /// Insert a new game. Fails with `GameCodeTaken` if the code exists.
    async fn insert(&self, game: Game) -> Result<(), DomainError>;

    async fn find(&self, code: &str) -> Result<Option<Game>, DomainError>;

    async fn replace(&self, game: Game, expected_version: u32) -> Result<(), DomainError>;

    /// Remove a game, returning whether it existed.
    async fn remove(&self, code: &str) -> Result<bool, DomainError>;

    async fn count(&self) -> Result<usize, DomainError>;
}

pub async fn require_game(store: &dyn GameStore, code: &str) -> Result<Game, DomainError> {
    store.find(code).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Game, format!("Game {code} not found"))
    })
}
