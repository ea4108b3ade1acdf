//! Domain layer: pure Wizard scoring logic, no I/O.

pub mod bidding;
pub mod game_transition;
pub mod lifecycle;
pub mod rules;
pub mod scoring;
pub mod standings;
pub mod state;
pub mod tally;

#[cfg(test)]
mod tests_bidding;
#[cfg(test)]
mod tests_game_transition;

// Re-exports for ergonomics
pub use game_transition::{derive_game_transitions, GameTransition};
pub use rules::{BidRestriction, GameVariant, ScoringRules};
pub use scoring::round_score;
pub use standings::{current_standings, final_standings, FinalStanding, Standing};
pub use state::{Game, GameConfig, GameStatus, NewPlayer, Player, PlayerResult, Round, RoundStatus};
