use crate::domain::lifecycle::{next_round, submit_bids};
use crate::domain::rules::BidRestriction;
use crate::domain::state::{GameConfig, RoundStatus};
use crate::domain::test_state_helpers::{new_game, new_game_with};
use crate::errors::domain::ValidationKind;

#[test]
fn partial_bids_keep_round_in_bidding() {
    let mut game = new_game(3);
    let status = submit_bids(&mut game, 1, &[1, -1, 0]).unwrap();
    assert_eq!(status, RoundStatus::Bidding);
    assert_eq!(game.rounds[0].bids(), vec![Some(1), None, Some(0)]);

    // Overwritable while still bidding
    let status = submit_bids(&mut game, 1, &[0, 1, 0]).unwrap();
    assert_eq!(status, RoundStatus::Playing);
    assert_eq!(game.rounds[0].bids(), vec![Some(0), Some(1), Some(0)]);
}

#[test]
fn bids_above_cards_are_rejected() {
    let mut game = new_game(4);
    let err = submit_bids(&mut game, 1, &[2, 0, 0, 0]).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::InvalidBid));
    assert!(err.to_string().contains("round 1"));
    assert!(game.rounds[0].bids().iter().all(Option::is_none));
}

#[test]
fn negative_bids_other_than_unset_are_rejected() {
    let mut game = new_game(4);
    let err = submit_bids(&mut game, 1, &[0, -3, 0, 0]).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::InvalidBid));
}

#[test]
fn bid_count_must_match_players() {
    let mut game = new_game(4);
    let err = submit_bids(&mut game, 1, &[0, 0, 0]).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::InvalidBid));
}

#[test]
fn bids_only_for_current_round() {
    let mut game = new_game(4);
    let err = submit_bids(&mut game, 2, &[0, 0, 0, 0]).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::WrongRoundState));

    let err = submit_bids(&mut game, 16, &[0, 0, 0, 0]).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::OutOfRange));
}

#[test]
fn bids_rejected_once_playing() {
    let mut game = new_game(3);
    submit_bids(&mut game, 1, &[0, 0, 0]).unwrap();
    let err = submit_bids(&mut game, 1, &[1, 0, 0]).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::WrongRoundState));
}

#[test]
fn cannot_match_cards_blocks_the_dealer_total() {
    let mut game = new_game_with(
        4,
        GameConfig {
            bid_restriction: BidRestriction::CannotMatchCards,
            ..GameConfig::default()
        },
    );
    next_round(&mut game).unwrap();
    next_round(&mut game).unwrap();
    // Round 3 deals 3 cards; dealer is seat 2
    assert_eq!(game.rounds[2].dealer_index, 2);

    let err = submit_bids(&mut game, 3, &[1, 1, 0, 1]).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::InvalidBid));
    assert!(err.to_string().contains("player 2"));

    assert!(submit_bids(&mut game, 3, &[1, 1, 1, 1]).is_ok());
}

#[test]
fn must_match_cards_requires_exact_total() {
    let mut game = new_game_with(
        3,
        GameConfig {
            bid_restriction: BidRestriction::MustMatchCards,
            ..GameConfig::default()
        },
    );
    assert!(submit_bids(&mut game, 1, &[0, 0, 0]).is_err());
    assert!(submit_bids(&mut game, 1, &[0, -1, 0]).is_ok());
    assert!(submit_bids(&mut game, 1, &[0, 1, 0]).is_ok());
}
