//! Game and round state machine.
//!
//! Every operation validates fully before it writes, so a failed call leaves
//! the game untouched. Callers own the `Game` value; nothing here is shared.

use std::collections::HashSet;

use time::OffsetDateTime;

use crate::domain::bidding::validate_bid_restriction;
use crate::domain::rules::{
    cards_for_round, dealer_for_round, max_rounds, MAX_PLAYERS, MIN_PLAYERS,
};
use crate::domain::scoring::{recalculate_from, sync_player_totals};
use crate::domain::state::{Game, GameConfig, GameStatus, NewPlayer, Player, Round, RoundStatus};
use crate::domain::tally::parse_entries;
use crate::errors::domain::{DomainError, ValidationKind};

fn invalid_config(detail: impl Into<String>) -> DomainError {
    DomainError::validation(ValidationKind::InvalidConfiguration, detail)
}

fn wrong_state(detail: impl Into<String>) -> DomainError {
    DomainError::validation(ValidationKind::WrongRoundState, detail)
}

fn ensure_open(game: &Game) -> Result<(), DomainError> {
    if game.is_completed() {
        return Err(DomainError::validation(
            ValidationKind::GameCompleted,
            format!("game {} is already completed", game.code),
        ));
    }
    Ok(())
}

fn ensure_current(game: &Game, round_no: u8) -> Result<(), DomainError> {
    if round_no != game.current_round {
        return Err(wrong_state(format!(
            "round {round_no} is not the current round ({})",
            game.current_round
        )));
    }
    Ok(())
}

fn ensure_status(round: &Round, expected: RoundStatus) -> Result<(), DomainError> {
    if round.status != expected {
        return Err(wrong_state(format!(
            "round {} is {:?}, expected {:?}",
            round.round_number, round.status, expected
        )));
    }
    Ok(())
}

/// Build a new game with every round pre-populated in BIDDING.
pub fn create_game(
    code: String,
    name: Option<String>,
    players: Vec<NewPlayer>,
    config: GameConfig,
    now: OffsetDateTime,
) -> Result<Game, DomainError> {
    let count = players.len();
    let max = max_rounds(count).ok_or_else(|| {
        invalid_config(format!(
            "player count {count} outside {MIN_PLAYERS}..={MAX_PLAYERS}"
        ))
    })?;
    if config.first_dealer_index >= count {
        return Err(invalid_config(format!(
            "first dealer index {} outside 0..{count}",
            config.first_dealer_index
        )));
    }

    let mut seen = HashSet::new();
    for (idx, p) in players.iter().enumerate() {
        if p.player_name.trim().is_empty() {
            return Err(invalid_config(format!("player {idx} has an empty name")));
        }
        if p.membership_id.trim().is_empty() {
            return Err(invalid_config(format!(
                "player {idx} has an empty membership id"
            )));
        }
        if !seen.insert(p.membership_id.as_str()) {
            return Err(invalid_config(format!(
                "player {idx} repeats membership id {}",
                p.membership_id
            )));
        }
    }

    let mut rounds = Vec::with_capacity(max as usize);
    for round_no in 1..=max {
        let cards = cards_for_round(round_no, max)
            .ok_or_else(|| invalid_config(format!("no card count for round {round_no}")))?;
        let dealer = dealer_for_round(config.first_dealer_index, round_no, count);
        rounds.push(Round::new(round_no, dealer, cards, count));
    }

    let mut game = Game {
        code,
        name: name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()),
        version: 1,
        config,
        players: players
            .into_iter()
            .map(|p| Player {
                membership_id: p.membership_id,
                player_name: p.player_name.trim().to_string(),
                total_score: 0,
            })
            .collect(),
        rounds,
        current_round: 1,
        max_rounds: max,
        status: GameStatus::Setup,
        created_at: now,
        updated_at: now,
    };
    game.status = GameStatus::InProgress;
    Ok(game)
}

/// Replace the bids of the current round. Moves to PLAYING once every seat has bid.
pub fn submit_bids(game: &mut Game, round_no: u8, raw: &[i32]) -> Result<RoundStatus, DomainError> {
    ensure_open(game)?;
    let restriction = game.config.bid_restriction;
    let players = game.player_count();
    let idx = game.round_index(round_no)?;
    ensure_current(game, round_no)?;

    let round = &mut game.rounds[idx];
    ensure_status(round, RoundStatus::Bidding)?;
    let bids = parse_entries(
        raw,
        players,
        round.cards_count,
        ValidationKind::InvalidBid,
        round_no,
    )?;
    validate_bid_restriction(round, restriction, &bids)?;

    for (result, bid) in round.player_results.iter_mut().zip(bids) {
        result.bid = bid;
    }
    if round.all_bids_in() {
        round.status = RoundStatus::Playing;
    }
    Ok(round.status)
}

/// Replace the trick counts of a PLAYING round. Totals are checked at completion.
pub fn submit_results(game: &mut Game, round_no: u8, raw: &[i32]) -> Result<(), DomainError> {
    ensure_open(game)?;
    let players = game.player_count();
    let round = game.round_mut(round_no)?;
    ensure_status(round, RoundStatus::Playing)?;
    let actuals = parse_entries(
        raw,
        players,
        round.cards_count,
        ValidationKind::InvalidResult,
        round_no,
    )?;

    for (result, actual) in round.player_results.iter_mut().zip(actuals) {
        result.actual = actual;
    }
    Ok(())
}

fn check_tricks_add_up(round: &Round, actuals: &[Option<u8>]) -> Result<(), DomainError> {
    if let Some(player) = actuals.iter().position(Option::is_none) {
        return Err(DomainError::validation(
            ValidationKind::IncompleteRound,
            format!(
                "round {}: player {player} has no result",
                round.round_number
            ),
        ));
    }
    let total: u32 = actuals.iter().flatten().map(|&a| u32::from(a)).sum();
    if total != u32::from(round.cards_count) {
        return Err(DomainError::validation(
            ValidationKind::IncompleteRound,
            format!(
                "round {}: tricks won {total} != cards dealt {}",
                round.round_number, round.cards_count
            ),
        ));
    }
    Ok(())
}

/// Score a PLAYING round and mark it COMPLETED. Does not move `current_round`.
pub fn complete_round(
    game: &mut Game,
    round_no: u8,
    now: OffsetDateTime,
) -> Result<Vec<u8>, DomainError> {
    ensure_open(game)?;
    let idx = game.round_index(round_no)?;
    {
        let round = &mut game.rounds[idx];
        ensure_status(round, RoundStatus::Playing)?;
        check_tricks_add_up(round, &round.actuals())?;
        round.status = RoundStatus::Completed;
        round.completed_at = Some(now);
    }
    Ok(recalculate_from(game, idx))
}

/// Clear the current round back to BIDDING. Other rounds keep their scores.
///
/// A COMPLETED round changes only through [`edit_round`].
pub fn restart_round(game: &mut Game, round_no: u8) -> Result<(), DomainError> {
    ensure_open(game)?;
    let idx = game.round_index(round_no)?;
    ensure_current(game, round_no)?;
    let round = &mut game.rounds[idx];
    if round.status == RoundStatus::Completed {
        return Err(wrong_state(format!(
            "round {round_no} is COMPLETED; use an edit to change it"
        )));
    }
    round.reset();
    Ok(())
}

/// Overwrite bids and/or results of a COMPLETED round and cascade totals.
///
/// Supplied lists must be complete. Returns the recalculated round numbers.
pub fn edit_round(
    game: &mut Game,
    round_no: u8,
    bids: Option<&[i32]>,
    results: Option<&[i32]>,
) -> Result<Vec<u8>, DomainError> {
    ensure_open(game)?;
    if bids.is_none() && results.is_none() {
        return Err(DomainError::validation(
            ValidationKind::Other("EmptyEdit".into()),
            format!("round {round_no}: edit supplies neither bids nor results"),
        ));
    }
    let players = game.player_count();
    let restriction = game.config.bid_restriction;
    let idx = game.round_index(round_no)?;
    let round = &game.rounds[idx];
    ensure_status(round, RoundStatus::Completed)?;

    let new_bids = match bids {
        Some(raw) => {
            let parsed = parse_entries(
                raw,
                players,
                round.cards_count,
                ValidationKind::InvalidBid,
                round_no,
            )?;
            if let Some(player) = parsed.iter().position(Option::is_none) {
                return Err(DomainError::validation(
                    ValidationKind::InvalidBid,
                    format!("round {round_no}: player {player} bid cannot be cleared by an edit"),
                ));
            }
            validate_bid_restriction(round, restriction, &parsed)?;
            Some(parsed)
        }
        None => None,
    };
    let new_actuals = match results {
        Some(raw) => {
            let parsed = parse_entries(
                raw,
                players,
                round.cards_count,
                ValidationKind::InvalidResult,
                round_no,
            )?;
            check_tricks_add_up(round, &parsed)?;
            Some(parsed)
        }
        None => None,
    };

    let round = &mut game.rounds[idx];
    if let Some(bids) = new_bids {
        for (result, bid) in round.player_results.iter_mut().zip(bids) {
            result.bid = bid;
        }
    }
    if let Some(actuals) = new_actuals {
        for (result, actual) in round.player_results.iter_mut().zip(actuals) {
            result.actual = actual;
        }
    }
    Ok(recalculate_from(game, idx))
}

pub fn next_round(game: &mut Game) -> Result<u8, DomainError> {
    ensure_open(game)?;
    if game.current_round >= game.max_rounds {
        return Err(DomainError::validation(
            ValidationKind::OutOfRange,
            format!("already at the last round ({})", game.max_rounds),
        ));
    }
    game.current_round += 1;
    Ok(game.current_round)
}

pub fn prev_round(game: &mut Game) -> Result<u8, DomainError> {
    ensure_open(game)?;
    if game.current_round <= 1 {
        return Err(DomainError::validation(
            ValidationKind::OutOfRange,
            "already at the first round",
        ));
    }
    game.current_round -= 1;
    Ok(game.current_round)
}

/// Close the game once every round is COMPLETED. Terminal.
pub fn finalize_game(game: &mut Game) -> Result<(), DomainError> {
    ensure_open(game)?;
    let open: Vec<String> = game
        .rounds
        .iter()
        .filter(|r| r.status != RoundStatus::Completed)
        .map(|r| r.round_number.to_string())
        .collect();
    if !open.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::GameNotComplete,
            format!("rounds not completed: {}", open.join(", ")),
        ));
    }
    game.status = GameStatus::Completed;
    sync_player_totals(game);
    Ok(())
}
