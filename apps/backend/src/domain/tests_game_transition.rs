use crate::domain::game_transition::{derive_game_transitions, GameTransition};
use crate::domain::lifecycle::{finalize_game, next_round, submit_bids};
use crate::domain::state::RoundStatus;
use crate::domain::test_state_helpers::{new_game, play_rounds};

#[test]
fn test_derive_round_status_change() {
    let before = new_game(3);
    let mut after = before.clone();
    submit_bids(&mut after, 1, &[0, 0, 0]).unwrap();

    let transitions = derive_game_transitions(&before, &after);
    assert_eq!(
        transitions,
        vec![GameTransition::RoundStatusChanged {
            round_number: 1,
            from: RoundStatus::Bidding,
            to: RoundStatus::Playing,
        }]
    );
}

#[test]
fn test_partial_bids_yield_no_transitions() {
    let before = new_game(3);
    let mut after = before.clone();
    submit_bids(&mut after, 1, &[0, -1, 0]).unwrap();
    assert!(derive_game_transitions(&before, &after).is_empty());
}

#[test]
fn test_derive_current_round_change() {
    let before = new_game(3);
    let mut after = before.clone();
    next_round(&mut after).unwrap();
    let transitions = derive_game_transitions(&before, &after);
    assert!(transitions.contains(&GameTransition::CurrentRoundChanged { from: 1, to: 2 }));
}

#[test]
fn test_derive_game_completed() {
    let mut before = new_game(6);
    play_rounds(&mut before, 10);
    let mut after = before.clone();
    finalize_game(&mut after).unwrap();
    let transitions = derive_game_transitions(&before, &after);
    assert_eq!(transitions, vec![GameTransition::GameCompleted]);
}

#[test]
fn test_transition_wire_shape() {
    let json = serde_json::to_value(GameTransition::CurrentRoundChanged { from: 2, to: 3 }).unwrap();
    assert_eq!(json["kind"], "current_round_changed");
    assert_eq!(json["to"], 3);
}
