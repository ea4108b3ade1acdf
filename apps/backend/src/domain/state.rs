use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::rules::{BidRestriction, GameVariant};
use crate::domain::tally::sentinel;
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    Setup,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoundStatus {
    Bidding,
    Playing,
    Completed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub bid_restriction: BidRestriction,
    #[serde(default)]
    pub game_variant: GameVariant,
    #[serde(default)]
    pub first_dealer_index: usize,
}

/// Player as supplied when creating a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPlayer {
    pub membership_id: String,
    pub player_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub membership_id: String,
    pub player_name: String,
    /// Sum of this player's scores over completed rounds.
    pub total_score: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerResult {
    #[serde(with = "sentinel")]
    pub bid: Option<u8>,
    #[serde(with = "sentinel")]
    pub actual: Option<u8>,
    pub score: i32,
    pub delta: i32,
    pub total_score: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub round_number: u8,
    pub dealer_index: usize,
    pub cards_count: u8,
    pub player_results: Vec<PlayerResult>,
    pub status: RoundStatus,
    #[serde(with = "time::serde::rfc3339::option", default)]
    pub completed_at: Option<OffsetDateTime>,
}

impl Round {
    pub fn new(round_number: u8, dealer_index: usize, cards_count: u8, players: usize) -> Self {
        Self {
            round_number,
            dealer_index,
            cards_count,
            player_results: vec![PlayerResult::default(); players],
            status: RoundStatus::Bidding,
            completed_at: None,
        }
    }

    /// Clear every entry and return to BIDDING.
    pub fn reset(&mut self) {
        for result in &mut self.player_results {
            *result = PlayerResult::default();
        }
        self.status = RoundStatus::Bidding;
        self.completed_at = None;
    }

    pub fn bids(&self) -> Vec<Option<u8>> {
        self.player_results.iter().map(|r| r.bid).collect()
    }

    pub fn actuals(&self) -> Vec<Option<u8>> {
        self.player_results.iter().map(|r| r.actual).collect()
    }

    pub fn all_bids_in(&self) -> bool {
        self.player_results.iter().all(|r| r.bid.is_some())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub version: u32,
    pub config: GameConfig,
    pub players: Vec<Player>,
    pub rounds: Vec<Round>,
    pub current_round: u8,
    pub max_rounds: u8,
    pub status: GameStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Game {
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Position of `round_no` in `rounds`, or `OutOfRange`.
    pub fn round_index(&self, round_no: u8) -> Result<usize, DomainError> {
        if round_no == 0 || round_no > self.max_rounds {
            return Err(DomainError::validation(
                ValidationKind::OutOfRange,
                format!("round {round_no} outside 1..={}", self.max_rounds),
            ));
        }
        Ok(round_no as usize - 1)
    }

    pub fn round(&self, round_no: u8) -> Result<&Round, DomainError> {
        let idx = self.round_index(round_no)?;
        Ok(&self.rounds[idx])
    }

    pub fn round_mut(&mut self, round_no: u8) -> Result<&mut Round, DomainError> {
        let idx = self.round_index(round_no)?;
        Ok(&mut self.rounds[idx])
    }

    pub fn is_completed(&self) -> bool {
        self.status == GameStatus::Completed
    }
}
