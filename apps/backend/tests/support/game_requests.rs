//! Request helpers for the `/api/wizard/games` routes.

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header::{ETAG, IF_MATCH};
use actix_web::{test, Error};
use serde_json::{json, Value};

pub const GAMES: &str = "/api/wizard/games";

/// Body for creating a game with `n` players named P0..Pn.
pub fn create_body(n: usize) -> Value {
    let players: Vec<Value> = (0..n)
        .map(|i| json!({ "membership_id": format!("m{i}"), "player_name": format!("P{i}") }))
        .collect();
    json!({ "name": "Friday night", "players": players })
}

/// A game created over HTTP: its code and current ETag.
#[derive(Debug, Clone)]
pub struct CreatedGame {
    pub code: String,
    pub etag: String,
}

pub async fn create_game<S>(app: &S, body: Value) -> CreatedGame
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let req = test::TestRequest::post()
        .uri(GAMES)
        .set_json(body)
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status().as_u16(), 201, "create should succeed");

    let etag = resp
        .headers()
        .get(ETAG)
        .and_then(|v| v.to_str().ok())
        .expect("create returns an ETag")
        .to_string();
    let game: Value = test::read_body_json(resp).await;
    CreatedGame {
        code: game["code"].as_str().expect("game code").to_string(),
        etag,
    }
}

/// `PUT`/`POST` to `path` under the game with `If-Match: etag`.
pub fn mutate(method: &str, code: &str, path: &str, etag: &str, body: Option<Value>) -> Request {
    let uri = format!("{GAMES}/{code}{path}");
    let req = match method {
        "PUT" => test::TestRequest::put(),
        "DELETE" => test::TestRequest::delete(),
        _ => test::TestRequest::post(),
    }
    .uri(&uri)
    .insert_header((IF_MATCH, etag.to_string()));

    match body {
        Some(body) => req.set_json(body).to_request(),
        None => req.to_request(),
    }
}

/// Send `req`, assert 200 and return the new ETag with the JSON body.
pub async fn call_ok<S>(app: &S, req: Request) -> (String, Value)
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let resp = test::call_service(app, req).await;
    let status = resp.status().as_u16();
    let etag = resp
        .headers()
        .get(ETAG)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = test::read_body(resp).await;
    assert_eq!(status, 200, "body: {}", String::from_utf8_lossy(&body));
    let json: Value = serde_json::from_slice(&body).expect("JSON body");
    (etag.expect("mutation returns an ETag"), json)
}

/// Play round `round` to completion: everyone bids 0, seat 0 takes every trick.
///
/// Returns the ETag after completion.
pub async fn play_round<S>(app: &S, game: &CreatedGame, round: u8, players: usize, etag: String) -> String
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let bids = vec![0; players];
    let mut results = vec![0; players];
    results[0] = i32::from(round);

    let path = format!("/rounds/{round}");
    let (etag, _) = call_ok(
        app,
        mutate("PUT", &game.code, &format!("{path}/bids"), &etag, Some(json!({ "bids": bids }))),
    )
    .await;
    let (etag, _) = call_ok(
        app,
        mutate(
            "PUT",
            &game.code,
            &format!("{path}/results"),
            &etag,
            Some(json!({ "results": results })),
        ),
    )
    .await;
    let (etag, _) = call_ok(
        app,
        mutate("POST", &game.code, &format!("{path}/complete"), &etag, None),
    )
    .await;
    etag
}
