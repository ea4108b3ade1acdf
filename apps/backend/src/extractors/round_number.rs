use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};

use crate::error::AppError;
use crate::errors::ErrorCode;

/// 1-based round number from the `{round}` path parameter.
///
/// Non-numeric input is `INVALID_ROUND_NUMBER`. Numbers that can never name a
/// round (zero, negative, above 255) are `OUT_OF_RANGE`, like rounds past the
/// game's `max_rounds`, which the domain rejects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundNumber(pub u8);

impl FromRequest for RoundNumber {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(parse_round_number(req.match_info().get("round")))
    }
}

fn parse_round_number(raw: Option<&str>) -> Result<RoundNumber, AppError> {
    let raw = raw.ok_or_else(|| {
        AppError::bad_request(ErrorCode::InvalidRoundNumber, "Missing round parameter")
    })?;
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::bad_request(
            ErrorCode::InvalidRoundNumber,
            format!("Round number must be an integer, got: {raw}"),
        ));
    }
    match raw.parse::<u8>() {
        Ok(n) if n >= 1 => Ok(RoundNumber(n)),
        _ => Err(AppError::bad_request(
            ErrorCode::OutOfRange,
            format!("round {raw} is out of range"),
        )),
    }
}
