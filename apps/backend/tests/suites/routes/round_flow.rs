// Round lifecycle over HTTP: bids, results, completion, edits, navigation,
// restart, finalization and the read-only projections.

use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use serde_json::{json, Value};
use wizard_backend::state::app_state::AppState;

use crate::common::json_body;
use crate::support::app_builder::create_test_app;
use crate::support::game_requests::{call_ok, create_body, create_game, mutate, play_round, GAMES};

fn totals(game: &Value) -> Vec<i64> {
    game["players"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["total_score"].as_i64().unwrap())
        .collect()
}

#[actix_web::test]
async fn a_round_from_bids_to_scores() {
    let app = create_test_app(AppState::for_tests())
        .with_prod_routes()
        .build()
        .await;
    let game = create_game(&app, create_body(3)).await;

    // Partial bids keep the round in BIDDING
    let (etag, body) = call_ok(
        &app,
        mutate("PUT", &game.code, "/rounds/1/bids", &game.etag, Some(json!({ "bids": [1, -1, -1] }))),
    )
    .await;
    assert_eq!(body["round_number"], 1);
    assert_eq!(body["game"]["rounds"][0]["status"], "BIDDING");
    assert_eq!(body["transitions"], json!([]));

    let (etag, body) = call_ok(
        &app,
        mutate("PUT", &game.code, "/rounds/1/bids", &etag, Some(json!({ "bids": [1, 0, 0] }))),
    )
    .await;
    assert_eq!(body["game"]["rounds"][0]["status"], "PLAYING");
    assert_eq!(
        body["transitions"],
        json!([{ "kind": "round_status_changed", "round_number": 1, "from": "BIDDING", "to": "PLAYING" }])
    );

    let (etag, _) = call_ok(
        &app,
        mutate("PUT", &game.code, "/rounds/1/results", &etag, Some(json!({ "results": [1, 0, 0] }))),
    )
    .await;

    let (_, body) = call_ok(&app, mutate("POST", &game.code, "/rounds/1/complete", &etag, None)).await;
    assert_eq!(body["recalculated_rounds"], json!([1]));
    assert_eq!(body["game"]["rounds"][0]["status"], "COMPLETED");
    assert_eq!(body["game"]["rounds"][0]["player_results"][0]["score"], 30);
    assert_eq!(totals(&body["game"]), vec![30, 20, 20]);
    // Completing does not advance the current round
    assert_eq!(body["game"]["current_round"], 1);
}

#[actix_web::test]
async fn complete_rejects_tricks_that_do_not_add_up() {
    let app = create_test_app(AppState::for_tests())
        .with_prod_routes()
        .build()
        .await;
    let game = create_game(&app, create_body(3)).await;

    let (etag, _) = call_ok(
        &app,
        mutate("PUT", &game.code, "/rounds/1/bids", &game.etag, Some(json!({ "bids": [0, 0, 0] }))),
    )
    .await;
    let (etag, _) = call_ok(
        &app,
        mutate("PUT", &game.code, "/rounds/1/results", &etag, Some(json!({ "results": [1, 1, 0] }))),
    )
    .await;

    let resp = test::call_service(&app, mutate("POST", &game.code, "/rounds/1/complete", &etag, None)).await;
    assert_problem_details_from_service_response(
        resp,
        "INCOMPLETE_ROUND",
        StatusCode::BAD_REQUEST,
        Some("tricks won 2 != cards dealt 1"),
    )
    .await;
}

#[actix_web::test]
async fn out_of_range_entries_are_rejected() {
    let app = create_test_app(AppState::for_tests())
        .with_prod_routes()
        .build()
        .await;
    let game = create_game(&app, create_body(3)).await;

    let resp = test::call_service(
        &app,
        mutate("PUT", &game.code, "/rounds/1/bids", &game.etag, Some(json!({ "bids": [2, 0, 0] }))),
    )
    .await;
    assert_problem_details_from_service_response(resp, "INVALID_BID", StatusCode::BAD_REQUEST, Some("player 0"))
        .await;

    // Wrong length
    let resp = test::call_service(
        &app,
        mutate("PUT", &game.code, "/rounds/1/bids", &game.etag, Some(json!({ "bids": [0, 0] }))),
    )
    .await;
    assert_problem_details_from_service_response(resp, "INVALID_BID", StatusCode::BAD_REQUEST, None).await;
}

#[actix_web::test]
async fn results_need_a_playing_round() {
    let app = create_test_app(AppState::for_tests())
        .with_prod_routes()
        .build()
        .await;
    let game = create_game(&app, create_body(3)).await;

    let resp = test::call_service(
        &app,
        mutate("PUT", &game.code, "/rounds/1/results", &game.etag, Some(json!({ "results": [1, 0, 0] }))),
    )
    .await;
    assert_problem_details_from_service_response(resp, "WRONG_ROUND_STATE", StatusCode::CONFLICT, None).await;
}

#[actix_web::test]
async fn bid_restriction_binds_the_dealer() {
    let app = create_test_app(AppState::for_tests())
        .with_prod_routes()
        .build()
        .await;
    let mut body = create_body(3);
    body["bid_restriction"] = json!("CANNOT_MATCH_CARDS");
    let game = create_game(&app, body).await;

    let resp = test::call_service(
        &app,
        mutate("PUT", &game.code, "/rounds/1/bids", &game.etag, Some(json!({ "bids": [1, 0, 0] }))),
    )
    .await;
    assert_problem_details_from_service_response(resp, "INVALID_BID", StatusCode::BAD_REQUEST, Some("bids last"))
        .await;
}

#[actix_web::test]
async fn round_navigation_and_bounds() {
    let app = create_test_app(AppState::for_tests())
        .with_prod_routes()
        .build()
        .await;
    let game = create_game(&app, create_body(3)).await;

    let resp = test::call_service(&app, mutate("POST", &game.code, "/prev-round", &game.etag, None)).await;
    assert_problem_details_from_service_response(resp, "OUT_OF_RANGE", StatusCode::BAD_REQUEST, Some("first round"))
        .await;

    let (etag, body) = call_ok(&app, mutate("POST", &game.code, "/next-round", &game.etag, None)).await;
    assert_eq!(body["round_number"], 2);
    assert_eq!(body["transitions"], json!([{ "kind": "current_round_changed", "from": 1, "to": 2 }]));

    // Bids go to the current round only
    let resp = test::call_service(
        &app,
        mutate("PUT", &game.code, "/rounds/1/bids", &etag, Some(json!({ "bids": [0, 0, 0] }))),
    )
    .await;
    assert_problem_details_from_service_response(resp, "WRONG_ROUND_STATE", StatusCode::CONFLICT, None).await;

    let (_, body) = call_ok(&app, mutate("POST", &game.code, "/prev-round", &etag, None)).await;
    assert_eq!(body["round_number"], 1);

    let resp = test::call_service(
        &app,
        mutate("PUT", &game.code, "/rounds/99/bids", &etag, Some(json!({ "bids": [0, 0, 0] }))),
    )
    .await;
    // The stale ETag is checked first
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn edit_recalculates_completed_rounds() {
    let app = create_test_app(AppState::for_tests())
        .with_prod_routes()
        .build()
        .await;
    let game = create_game(&app, create_body(3)).await;

    let etag = play_round(&app, &game, 1, 3, game.etag.clone()).await;
    let (etag, _) = call_ok(&app, mutate("POST", &game.code, "/next-round", &etag, None)).await;
    let etag = play_round(&app, &game, 2, 3, etag).await;

    // Round 1: seat 0 bid 0 and took 1 (-10); seats 1-2 scored 20.
    // Round 2: seat 0 bid 0 and took 2 (-20); seats 1-2 scored 20.
    let req = test::TestRequest::get()
        .uri(&format!("{GAMES}/{}", game.code))
        .to_request();
    let current = json_body(test::call_service(&app, req).await, 200).await;
    assert_eq!(totals(&current), vec![-30, 40, 40]);

    // Move round 1's trick to seat 1: seat 0 now 20, seat 1 now -10
    let (_, body) = call_ok(
        &app,
        mutate("PUT", &game.code, "/rounds/1/edit", &etag, Some(json!({ "results": [0, 1, 0] }))),
    )
    .await;
    assert_eq!(body["recalculated_rounds"], json!([1, 2]));
    assert_eq!(body["round_number"], 1);
    assert!(body["message"].as_str().unwrap().contains("Round 1 updated"));
    assert_eq!(body["game"]["rounds"][0]["player_results"][1]["score"], -10);
    assert_eq!(body["game"]["rounds"][1]["player_results"][0]["total_score"], 0);
    assert_eq!(totals(&body["game"]), vec![0, 10, 40]);
}

#[actix_web::test]
async fn edit_rejects_open_rounds_and_empty_bodies() {
    let app = create_test_app(AppState::for_tests())
        .with_prod_routes()
        .build()
        .await;
    let game = create_game(&app, create_body(3)).await;

    let resp = test::call_service(
        &app,
        mutate("PUT", &game.code, "/rounds/1/edit", &game.etag, Some(json!({ "bids": [0, 0, 0] }))),
    )
    .await;
    assert_problem_details_from_service_response(resp, "WRONG_ROUND_STATE", StatusCode::CONFLICT, None).await;

    let etag = play_round(&app, &game, 1, 3, game.etag.clone()).await;
    let resp = test::call_service(&app, mutate("PUT", &game.code, "/rounds/1/edit", &etag, Some(json!({})))).await;
    assert_problem_details_from_service_response(
        resp,
        "VALIDATION_ERROR",
        StatusCode::BAD_REQUEST,
        Some("neither bids nor results"),
    )
    .await;
}

#[actix_web::test]
async fn restart_clears_the_current_round() {
    let app = create_test_app(AppState::for_tests())
        .with_prod_routes()
        .build()
        .await;
    let game = create_game(&app, create_body(3)).await;
    let etag = play_round(&app, &game, 1, 3, game.etag.clone()).await;
    let (etag, _) = call_ok(&app, mutate("POST", &game.code, "/next-round", &etag, None)).await;
    let (etag, _) = call_ok(
        &app,
        mutate("PUT", &game.code, "/rounds/2/bids", &etag, Some(json!({ "bids": [0, 0, 0] }))),
    )
    .await;

    let (_, body) = call_ok(&app, mutate("POST", &game.code, "/rounds/2/restart", &etag, None)).await;
    let round = &body["game"]["rounds"][1];
    assert_eq!(round["status"], "BIDDING");
    assert_eq!(round["player_results"][0]["bid"], -1);
    assert_eq!(round["player_results"][0]["actual"], -1);
    assert_eq!(body["game"]["rounds"][0]["status"], "COMPLETED");
    assert_eq!(totals(&body["game"]), vec![-10, 20, 20]);
    assert_eq!(
        body["transitions"],
        json!([{ "kind": "round_status_changed", "round_number": 2, "from": "PLAYING", "to": "BIDDING" }])
    );
}

#[actix_web::test]
async fn restart_of_a_completed_round_is_rejected() {
    let app = create_test_app(AppState::for_tests())
        .with_prod_routes()
        .build()
        .await;
    let game = create_game(&app, create_body(3)).await;
    let etag = play_round(&app, &game, 1, 3, game.etag.clone()).await;

    let resp = test::call_service(&app, mutate("POST", &game.code, "/rounds/1/restart", &etag, None)).await;
    assert_problem_details_from_service_response(
        resp,
        "WRONG_ROUND_STATE",
        StatusCode::CONFLICT,
        Some("round 1"),
    )
    .await;
}

#[actix_web::test]
async fn full_game_finalizes_with_standings() {
    let app = create_test_app(AppState::for_tests())
        .with_prod_routes()
        .build()
        .await;
    // Six players play ten rounds
    let game = create_game(&app, create_body(6)).await;

    let resp = test::call_service(&app, mutate("POST", &game.code, "/finalize", &game.etag, None)).await;
    assert_problem_details_from_service_response(resp, "GAME_NOT_COMPLETE", StatusCode::CONFLICT, Some("1, 2"))
        .await;

    let mut etag = game.etag.clone();
    for round in 1..=10u8 {
        etag = play_round(&app, &game, round, 6, etag).await;
        if round < 10 {
            etag = call_ok(&app, mutate("POST", &game.code, "/next-round", &etag, None)).await.0;
        }
    }

    let (etag, body) = call_ok(&app, mutate("POST", &game.code, "/finalize", &etag, None)).await;
    assert_eq!(body["game"]["status"], "COMPLETED");
    assert!(body["transitions"]
        .as_array()
        .unwrap()
        .contains(&json!({ "kind": "game_completed" })));

    let ranked = body["final_standings"].as_array().unwrap();
    assert_eq!(ranked.len(), 6);
    assert_eq!(ranked[0], json!({ "player_name": "P1", "total_score": 200, "position": 1 }));
    assert_eq!(ranked[5], json!({ "player_name": "P0", "total_score": -550, "position": 6 }));

    // Terminal: no more writes
    let resp = test::call_service(&app, mutate("POST", &game.code, "/prev-round", &etag, None)).await;
    assert_problem_details_from_service_response(resp, "GAME_COMPLETED", StatusCode::CONFLICT, None).await;

    let req = test::TestRequest::get()
        .uri(&format!("{GAMES}/{}/standings", game.code))
        .to_request();
    let standings = json_body(test::call_service(&app, req).await, 200).await;
    assert_eq!(standings["status"], "COMPLETED");
    assert_eq!(standings["final_standings"][5]["player_name"], "P0");
    assert_eq!(standings["standings"][0]["membership_id"], "m1");
}

#[actix_web::test]
async fn scoreboard_and_standings_track_completed_rounds() {
    let app = create_test_app(AppState::for_tests())
        .with_prod_routes()
        .build()
        .await;
    let game = create_game(&app, create_body(4)).await;
    let etag = play_round(&app, &game, 1, 4, game.etag.clone()).await;

    let req = test::TestRequest::get()
        .uri(&format!("{GAMES}/{}/scoreboard", game.code))
        .to_request();
    let board = json_body(test::call_service(&app, req).await, 200).await;
    assert_eq!(board["game_code"], game.code.as_str());
    assert_eq!(board["max_rounds"], 15);
    assert_eq!(board["rounds"].as_array().unwrap().len(), 15);
    assert_eq!(board["standings"][0]["player_name"], "P1");
    assert_eq!(board["standings"][3]["player_name"], "P0");
    assert_eq!(board["standings"][3]["total_score"], -10);

    let req = test::TestRequest::get()
        .uri(&format!("{GAMES}/{}/standings", game.code))
        .to_request();
    let standings = json_body(test::call_service(&app, req).await, 200).await;
    assert_eq!(standings["status"], "IN_PROGRESS");
    assert!(standings.get("final_standings").is_none());
    assert_eq!(standings["standings"][0]["position"], 1);

    let req = test::TestRequest::get()
        .uri(&format!("{GAMES}/{}/scoreboard", game.code))
        .insert_header(("If-None-Match", etag))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_MODIFIED);
}

#[actix_web::test]
async fn round_numbers_outside_the_game_are_out_of_range() {
    let app = create_test_app(AppState::for_tests())
        .with_prod_routes()
        .build()
        .await;
    // Three players: rounds 1..=20
    let game = create_game(&app, create_body(3)).await;

    for round in ["0", "21", "300", "-2"] {
        let path = format!("/rounds/{round}/bids");
        let resp = test::call_service(
            &app,
            mutate("PUT", &game.code, &path, &game.etag, Some(json!({ "bids": [0, 0, 0] }))),
        )
        .await;
        assert_problem_details_from_service_response(resp, "OUT_OF_RANGE", StatusCode::BAD_REQUEST, None)
            .await;
    }

    let resp = test::call_service(
        &app,
        mutate("PUT", &game.code, "/rounds/two/bids", &game.etag, Some(json!({ "bids": [0, 0, 0] }))),
    )
    .await;
    assert_problem_details_from_service_response(resp, "INVALID_ROUND_NUMBER", StatusCode::BAD_REQUEST, None)
        .await;
}
