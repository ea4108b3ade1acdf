//! Read-only projections over a game: standings and the scoreboard.

use serde::Serialize;

use crate::domain::scoring::completed_totals;
use crate::domain::state::{Game, GameStatus, Player, Round};
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standing {
    pub position: usize,
    pub player_index: usize,
    pub membership_id: String,
    pub player_name: String,
    pub total_score: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinalStanding {
    pub player_name: String,
    pub total_score: i32,
    pub position: usize,
}

/// Players ranked by score over COMPLETED rounds, ties kept in seat order.
pub fn current_standings(game: &Game) -> Vec<Standing> {
    let totals = completed_totals(game);
    let mut ranked: Vec<(usize, i32)> = totals.into_iter().enumerate().collect();
    // sort_by is stable, so equal totals keep declaration order
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    ranked
        .into_iter()
        .enumerate()
        .map(|(pos, (idx, total))| {
            let player = &game.players[idx];
            Standing {
                position: pos + 1,
                player_index: idx,
                membership_id: player.membership_id.clone(),
                player_name: player.player_name.clone(),
                total_score: total,
            }
        })
        .collect()
}

pub fn final_standings(game: &Game) -> Result<Vec<FinalStanding>, DomainError> {
    if game.status != GameStatus::Completed {
        return Err(DomainError::validation(
            ValidationKind::GameNotComplete,
            format!("game {} has not been finalized", game.code),
        ));
    }
    Ok(current_standings(game)
        .into_iter()
        .map(|s| FinalStanding {
            player_name: s.player_name,
            total_score: s.total_score,
            position: s.position,
        })
        .collect())
}

#[derive(Debug, Clone, Serialize)]
pub struct Scoreboard<'a> {
    pub game_code: &'a str,
    pub status: GameStatus,
    pub current_round: u8,
    pub max_rounds: u8,
    pub players: &'a [Player],
    pub rounds: &'a [Round],
    pub standings: Vec<Standing>,
}

pub fn scoreboard(game: &Game) -> Scoreboard<'_> {
    Scoreboard {
        game_code: &game.code,
        status: game.status,
        current_round: game.current_round,
        max_rounds: game.max_rounds,
        players: &game.players,
        rounds: &game.rounds,
        standings: current_standings(game),
    }
}
