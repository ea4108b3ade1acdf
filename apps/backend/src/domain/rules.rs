use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

pub const DECK_SIZE: u8 = 60;
pub const MIN_PLAYERS: usize = 3;
pub const MAX_PLAYERS: usize = 6;

/// Rounds played for a table of `player_count`: the whole deck divided evenly.
pub fn max_rounds(player_count: usize) -> Option<u8> {
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&player_count) {
        return None;
    }
    Some(DECK_SIZE / player_count as u8)
}

// Round N deals N cards.
pub fn cards_for_round(round_no: u8, max_rounds: u8) -> Option<u8> {
    if round_no == 0 || round_no > max_rounds {
        return None;
    }
    Some(round_no)
}

pub fn valid_bid_range(cards: u8) -> RangeInclusive<u8> {
    0..=cards
}

pub fn dealer_for_round(first_dealer: usize, round_no: u8, player_count: usize) -> usize {
    (first_dealer + round_no as usize - 1) % player_count
}

/// Seat order for bidding: starts left of the dealer, ends with the dealer.
pub fn bid_order(dealer: usize, player_count: usize) -> Vec<usize> {
    (1..=player_count)
        .map(|offset| (dealer + offset) % player_count)
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BidRestriction {
    #[default]
    NoRestrictions,
    CannotMatchCards,
    MustMatchCards,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameVariant {
    #[default]
    Standard,
    Anniversary,
}

/// Numeric scoring constants for one variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringRules {
    pub exact_bid_base: i32,
    pub per_trick_bonus: i32,
    pub per_trick_penalty: i32,
}

impl ScoringRules {
    pub const STANDARD: ScoringRules = ScoringRules {
        exact_bid_base: 20,
        per_trick_bonus: 10,
        per_trick_penalty: 10,
    };
}

impl GameVariant {
    pub fn scoring_rules(self) -> ScoringRules {
        match self {
            GameVariant::Standard => ScoringRules::STANDARD,
            // No distinct ANNIVERSARY constants have been supplied yet.
            GameVariant::Anniversary => ScoringRules::STANDARD,
        }
    }
}
