use serde::Serialize;

use crate::domain::state::{Game, GameStatus, RoundStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameTransition {
    /// Edge-triggered: a round moved between BIDDING/PLAYING/COMPLETED.
    RoundStatusChanged {
        round_number: u8,
        from: RoundStatus,
        to: RoundStatus,
    },

    /// Edge-triggered: `current_round` moved.
    CurrentRoundChanged { from: u8, to: u8 },

    /// Edge-triggered: game moved IN_PROGRESS -> COMPLETED.
    GameCompleted,
}

/// Derive transitions by diffing two versions of the same game.
pub fn derive_game_transitions(before: &Game, after: &Game) -> Vec<GameTransition> {
    let mut transitions = Vec::new();

    for (old, new) in before.rounds.iter().zip(&after.rounds) {
        if old.status != new.status {
            transitions.push(GameTransition::RoundStatusChanged {
                round_number: new.round_number,
                from: old.status,
                to: new.status,
            });
        }
    }

    if before.current_round != after.current_round {
        transitions.push(GameTransition::CurrentRoundChanged {
            from: before.current_round,
            to: after.current_round,
        });
    }

    if before.status != GameStatus::Completed && after.status == GameStatus::Completed {
        transitions.push(GameTransition::GameCompleted);
    }

    transitions
}
