use super::{GameFlowMutationResult, GameFlowService};
use crate::domain::lifecycle;
use crate::domain::state::RoundStatus;
use crate::error::AppError;
use crate::realtime::protocol::EventType;

impl GameFlowService {
    /// Replace the bids of the current round.
    ///
    /// `bids` holds one entry per player in seat order; `-1` leaves a seat unset.
    /// The outcome is the round status after the write (PLAYING once all seats bid).
    pub async fn submit_bids(
        &self,
        code: &str,
        round_no: u8,
        bids: &[i32],
        expected_version: Option<u32>,
    ) -> Result<GameFlowMutationResult<RoundStatus>, AppError> {
        self.run_mutation(code, expected_version, EventType::BidsSubmitted, |game| {
            lifecycle::submit_bids(game, round_no, bids)
        })
        .await
    }

    /// Replace the trick counts of a PLAYING round.
    pub async fn submit_results(
        &self,
        code: &str,
        round_no: u8,
        actuals: &[i32],
        expected_version: Option<u32>,
    ) -> Result<GameFlowMutationResult<()>, AppError> {
        self.run_mutation(code, expected_version, EventType::ResultsSubmitted, |game| {
            lifecycle::submit_results(game, round_no, actuals)
        })
        .await
    }
}
