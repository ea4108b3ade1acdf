use crate::domain::rules::ScoringRules;
use crate::domain::state::{Game, RoundStatus};

/// Score for one player in one round.
pub fn round_score(bid: u8, actual: u8, rules: &ScoringRules) -> i32 {
    let bid = i32::from(bid);
    let actual = i32::from(actual);
    if bid == actual {
        rules.exact_bid_base + rules.per_trick_bonus * bid
    } else {
        -rules.per_trick_penalty * (bid - actual).abs()
    }
}

/// Recompute scores and running totals for round index `from` onwards.
///
/// Rounds before `from` are read, never written. Only COMPLETED rounds add to
/// the running total; open rounds have their computed fields zeroed. Returns
/// the round numbers whose results were recomputed, and resyncs player totals.
pub fn recalculate_from(game: &mut Game, from: usize) -> Vec<u8> {
    let rules = game.config.game_variant.scoring_rules();
    let players = game.player_count();

    let mut running = vec![0i32; players];
    for round in game.rounds.iter().take(from) {
        if round.status == RoundStatus::Completed {
            for (total, result) in running.iter_mut().zip(&round.player_results) {
                *total += result.score;
            }
        }
    }

    let mut touched = Vec::new();
    for round in game.rounds.iter_mut().skip(from) {
        if round.status != RoundStatus::Completed {
            for result in &mut round.player_results {
                result.score = 0;
                result.delta = 0;
                result.total_score = 0;
            }
            continue;
        }
        for (total, result) in running.iter_mut().zip(&mut round.player_results) {
            let score = match (result.bid, result.actual) {
                (Some(bid), Some(actual)) => round_score(bid, actual, &rules),
                _ => 0,
            };
            result.score = score;
            result.delta = score;
            *total += score;
            result.total_score = *total;
        }
        touched.push(round.round_number);
    }

    sync_player_totals(game);
    touched
}

/// Per-player sum of scores over COMPLETED rounds.
pub fn completed_totals(game: &Game) -> Vec<i32> {
    let mut totals = vec![0i32; game.player_count()];
    for round in game
        .rounds
        .iter()
        .filter(|r| r.status == RoundStatus::Completed)
    {
        for (total, result) in totals.iter_mut().zip(&round.player_results) {
            *total += result.score;
        }
    }
    totals
}

pub fn sync_player_totals(game: &mut Game) {
    let totals = completed_totals(game);
    for (player, total) in game.players.iter_mut().zip(totals) {
        player.total_score = total;
    }
}
