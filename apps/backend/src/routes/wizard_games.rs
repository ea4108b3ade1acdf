//! Scorekeeping routes under `/api/wizard/games`.
//!
//! Reads return the game with its ETag. Writes require `If-Match` and answer
//! with the new game, the transitions the write caused, and a fresh ETag.

use actix_web::http::header::{ETAG, IF_NONE_MATCH, LOCATION};
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse, Result};
use serde::{Deserialize, Serialize};

use crate::domain::game_transition::GameTransition;
use crate::domain::standings::{
    current_standings, final_standings, scoreboard, FinalStanding, Standing,
};
use crate::domain::state::{Game, GameStatus};
use crate::error::AppError;
use crate::extractors::{ExpectedVersion, GameCode, RoundNumber, ValidatedJson};
use crate::http::etag::game_etag;
use crate::services::game_flow::{CreateGame, GameFlowMutationResult};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct BidsBody {
    bids: Vec<i32>,
}

#[derive(Debug, Deserialize)]
struct ResultsBody {
    results: Vec<i32>,
}

#[derive(Debug, Deserialize)]
struct EditRoundBody {
    #[serde(default)]
    bids: Option<Vec<i32>>,
    #[serde(default)]
    results: Option<Vec<i32>>,
}

#[derive(Debug, Serialize)]
struct MutationResponse {
    game: Game,
    transitions: Vec<GameTransition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    round_number: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    recalculated_rounds: Option<Vec<u8>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    final_standings: Option<Vec<FinalStanding>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl MutationResponse {
    fn from_result<T>(result: GameFlowMutationResult<T>) -> (Self, T) {
        let response = MutationResponse {
            game: result.final_game,
            transitions: result.transitions,
            round_number: None,
            recalculated_rounds: None,
            final_standings: None,
            message: None,
        };
        (response, result.outcome)
    }

    fn into_http(self) -> HttpResponse {
        let etag = game_etag(&self.game.code, self.game.version);
        HttpResponse::Ok().insert_header((ETAG, etag)).json(self)
    }
}

#[derive(Debug, Serialize)]
struct StandingsResponse {
    game_code: String,
    status: GameStatus,
    standings: Vec<Standing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    final_standings: Option<Vec<FinalStanding>>,
}

/// True when `If-None-Match` names `etag` (or is `*`).
fn not_modified(req: &HttpRequest, etag: &str) -> bool {
    req.headers()
        .get(IF_NONE_MATCH)
        .and_then(|value| value.to_str().ok())
        .map(|client| {
            client.trim() == "*" || client.split(',').map(str::trim).any(|tag| tag == etag)
        })
        .unwrap_or(false)
}

/// POST /api/wizard/games
async fn create_game(
    body: ValidatedJson<CreateGame>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let game = app_state.games.create_game(body.into_inner()).await?;
    let etag = game_etag(&game.code, game.version);
    let location = format!("/api/wizard/games/{}", game.code);

    Ok(HttpResponse::Created()
        .insert_header((ETAG, etag))
        .insert_header((LOCATION, location))
        .json(game))
}

/// GET /api/wizard/games/{code}
///
/// Supports `If-None-Match`: a matching ETag answers `304 Not Modified`.
async fn get_game(
    http_req: HttpRequest,
    code: GameCode,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let game = app_state.games.get_game(code.as_str()).await?;
    let etag = game_etag(&game.code, game.version);

    if not_modified(&http_req, &etag) {
        return Ok(HttpResponse::build(StatusCode::NOT_MODIFIED)
            .insert_header((ETAG, etag))
            .finish());
    }

    Ok(HttpResponse::Ok().insert_header((ETAG, etag)).json(game))
}

/// DELETE /api/wizard/games/{code}
async fn delete_game(
    code: GameCode,
    expected: ExpectedVersion,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    app_state
        .games
        .delete_game(code.as_str(), Some(expected.0))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// PUT /api/wizard/games/{code}/rounds/{round}/bids
async fn submit_bids(
    code: GameCode,
    round: RoundNumber,
    expected: ExpectedVersion,
    body: ValidatedJson<BidsBody>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let result = app_state
        .games
        .submit_bids(code.as_str(), round.0, &body.bids, Some(expected.0))
        .await?;
    let (mut response, _status) = MutationResponse::from_result(result);
    response.round_number = Some(round.0);
    Ok(response.into_http())
}

/// PUT /api/wizard/games/{code}/rounds/{round}/results
async fn submit_results(
    code: GameCode,
    round: RoundNumber,
    expected: ExpectedVersion,
    body: ValidatedJson<ResultsBody>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let result = app_state
        .games
        .submit_results(code.as_str(), round.0, &body.results, Some(expected.0))
        .await?;
    let (mut response, ()) = MutationResponse::from_result(result);
    response.round_number = Some(round.0);
    Ok(response.into_http())
}

/// POST /api/wizard/games/{code}/rounds/{round}/complete
async fn complete_round(
    code: GameCode,
    round: RoundNumber,
    expected: ExpectedVersion,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let result = app_state
        .games
        .complete_round(code.as_str(), round.0, Some(expected.0))
        .await?;
    let (mut response, recalculated) = MutationResponse::from_result(result);
    response.round_number = Some(round.0);
    response.recalculated_rounds = Some(recalculated);
    Ok(response.into_http())
}

/// POST /api/wizard/games/{code}/rounds/{round}/restart
async fn restart_round(
    code: GameCode,
    round: RoundNumber,
    expected: ExpectedVersion,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let result = app_state
        .games
        .restart_round(code.as_str(), round.0, Some(expected.0))
        .await?;
    let (mut response, ()) = MutationResponse::from_result(result);
    response.round_number = Some(round.0);
    Ok(response.into_http())
}

/// PUT /api/wizard/games/{code}/rounds/{round}/edit
///
/// Either list may be omitted; an omitted list keeps the stored values.
async fn edit_round(
    code: GameCode,
    round: RoundNumber,
    expected: ExpectedVersion,
    body: ValidatedJson<EditRoundBody>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let result = app_state
        .games
        .edit_round(
            code.as_str(),
            round.0,
            body.bids.as_deref(),
            body.results.as_deref(),
            Some(expected.0),
        )
        .await?;
    let (mut response, recalculated) = MutationResponse::from_result(result);
    response.message = Some(format!(
        "Round {} updated; {} round(s) recalculated",
        round.0,
        recalculated.len()
    ));
    response.round_number = Some(round.0);
    response.recalculated_rounds = Some(recalculated);
    Ok(response.into_http())
}

/// POST /api/wizard/games/{code}/next-round
async fn next_round(
    code: GameCode,
    expected: ExpectedVersion,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let result = app_state
        .games
        .next_round(code.as_str(), Some(expected.0))
        .await?;
    let (mut response, current) = MutationResponse::from_result(result);
    response.round_number = Some(current);
    Ok(response.into_http())
}

/// POST /api/wizard/games/{code}/prev-round
async fn prev_round(
    code: GameCode,
    expected: ExpectedVersion,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let result = app_state
        .games
        .prev_round(code.as_str(), Some(expected.0))
        .await?;
    let (mut response, current) = MutationResponse::from_result(result);
    response.round_number = Some(current);
    Ok(response.into_http())
}

/// POST /api/wizard/games/{code}/finalize
async fn finalize_game(
    code: GameCode,
    expected: ExpectedVersion,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let result = app_state
        .games
        .finalize_game(code.as_str(), Some(expected.0))
        .await?;
    let (mut response, standings) = MutationResponse::from_result(result);
    response.final_standings = Some(standings);
    Ok(response.into_http())
}

/// GET /api/wizard/games/{code}/scoreboard
async fn get_scoreboard(
    http_req: HttpRequest,
    code: GameCode,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let game = app_state.games.get_game(code.as_str()).await?;
    let etag = game_etag(&game.code, game.version);

    if not_modified(&http_req, &etag) {
        return Ok(HttpResponse::build(StatusCode::NOT_MODIFIED)
            .insert_header((ETAG, etag))
            .finish());
    }

    Ok(HttpResponse::Ok()
        .insert_header((ETAG, etag))
        .json(scoreboard(&game)))
}

/// GET /api/wizard/games/{code}/standings
async fn get_standings(
    code: GameCode,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let game = app_state.games.get_game(code.as_str()).await?;
    let standings = current_standings(&game);
    let ranked = if game.is_completed() {
        Some(final_standings(&game)?)
    } else {
        None
    };

    let etag = game_etag(&game.code, game.version);
    Ok(HttpResponse::Ok()
        .insert_header((ETAG, etag))
        .json(StandingsResponse {
            game_code: game.code,
            status: game.status,
            standings,
            final_standings: ranked,
        }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::post().to(create_game)));
    cfg.service(web::resource("/").route(web::post().to(create_game)));
    cfg.service(
        web::resource("/{code}")
            .route(web::get().to(get_game))
            .route(web::delete().to(delete_game)),
    );
    cfg.service(web::resource("/{code}/scoreboard").route(web::get().to(get_scoreboard)));
    cfg.service(web::resource("/{code}/standings").route(web::get().to(get_standings)));
    cfg.service(web::resource("/{code}/finalize").route(web::post().to(finalize_game)));
    cfg.service(web::resource("/{code}/next-round").route(web::post().to(next_round)));
    cfg.service(web::resource("/{code}/prev-round").route(web::post().to(prev_round)));
    cfg.service(
        web::resource("/{code}/rounds/{round}/bids").route(web::put().to(submit_bids)),
    );
    cfg.service(
        web::resource("/{code}/rounds/{round}/results").route(web::put().to(submit_results)),
    );
    cfg.service(
        web::resource("/{code}/rounds/{round}/complete").route(web::post().to(complete_round)),
    );
    cfg.service(
        web::resource("/{code}/rounds/{round}/restart").route(web::post().to(restart_round)),
    );
    cfg.service(web::resource("/{code}/rounds/{round}/edit").route(web::put().to(edit_round)));
}
