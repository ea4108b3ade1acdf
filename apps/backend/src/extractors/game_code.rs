use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::utils::game_code::is_valid_game_code;

/// Game code extracted from the `{code}` path parameter.
///
/// Only the shape is checked here; whether the game exists is the service's call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameCode(pub String);

impl GameCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromRequest for GameCode {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(parse_game_code(req.match_info().get("code")))
    }
}

fn parse_game_code(raw: Option<&str>) -> Result<GameCode, AppError> {
    let raw = raw.ok_or_else(|| {
        AppError::bad_request(ErrorCode::InvalidGameCode, "Missing code parameter")
    })?;
    let code = raw.to_ascii_lowercase();
    if !is_valid_game_code(&code) {
        return Err(AppError::bad_request(
            ErrorCode::InvalidGameCode,
            format!("Invalid game code: {raw}"),
        ));
    }
    Ok(GameCode(code))
}
