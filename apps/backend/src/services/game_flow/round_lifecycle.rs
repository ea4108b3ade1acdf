use time::OffsetDateTime;

use super::{GameFlowMutationResult, GameFlowService};
use crate::domain::lifecycle;
use crate::domain::standings::{final_standings, FinalStanding};
use crate::error::AppError;
use crate::realtime::protocol::EventType;

impl GameFlowService {
    /// Score a PLAYING round. Outcome: the round numbers whose totals were recomputed.
    pub async fn complete_round(
        &self,
        code: &str,
        round_no: u8,
        expected_version: Option<u32>,
    ) -> Result<GameFlowMutationResult<Vec<u8>>, AppError> {
        let now = OffsetDateTime::now_utc();
        self.run_mutation(code, expected_version, EventType::RoundCompleted, |game| {
            lifecycle::complete_round(game, round_no, now)
        })
        .await
    }

    pub async fn restart_round(
        &self,
        code: &str,
        round_no: u8,
        expected_version: Option<u32>,
    ) -> Result<GameFlowMutationResult<()>, AppError> {
        self.run_mutation(code, expected_version, EventType::RoundRestarted, |game| {
            lifecycle::restart_round(game, round_no)
        })
        .await
    }

    /// Correct a COMPLETED round. Outcome: the recalculated round numbers.
    pub async fn edit_round(
        &self,
        code: &str,
        round_no: u8,
        bids: Option<&[i32]>,
        results: Option<&[i32]>,
        expected_version: Option<u32>,
    ) -> Result<GameFlowMutationResult<Vec<u8>>, AppError> {
        self.run_mutation(code, expected_version, EventType::RoundEdited, |game| {
            lifecycle::edit_round(game, round_no, bids, results)
        })
        .await
    }

    pub async fn next_round(
        &self,
        code: &str,
        expected_version: Option<u32>,
    ) -> Result<GameFlowMutationResult<u8>, AppError> {
        self.run_mutation(code, expected_version, EventType::RoundAdvanced, lifecycle::next_round)
            .await
    }

    pub async fn prev_round(
        &self,
        code: &str,
        expected_version: Option<u32>,
    ) -> Result<GameFlowMutationResult<u8>, AppError> {
        self.run_mutation(code, expected_version, EventType::RoundRewound, lifecycle::prev_round)
            .await
    }

    /// Close the game and rank its players.
    pub async fn finalize_game(
        &self,
        code: &str,
        expected_version: Option<u32>,
    ) -> Result<GameFlowMutationResult<Vec<FinalStanding>>, AppError> {
        self.run_mutation(code, expected_version, EventType::GameFinalized, |game| {
            lifecycle::finalize_game(game)?;
            final_standings(game)
        })
        .await
    }
}
