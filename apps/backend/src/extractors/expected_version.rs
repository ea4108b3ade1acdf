use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::http::header::{ToStrError, IF_MATCH};
use actix_web::{FromRequest, HttpRequest};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::http::etag::parse_game_etag;

/// Game version the client last saw, taken from the `If-Match` header.
///
/// Mutating routes require it: a missing header is `428 Precondition Required`,
/// a malformed one `400 INVALID_HEADER`. A tag minted for another game than the
/// `{code}` in the path never matches and is a `409 OPTIMISTIC_LOCK`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpectedVersion(pub u32);

impl FromRequest for ExpectedVersion {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let header = req.headers().get(IF_MATCH).map(|value| value.to_str());
        let path_code = req.match_info().get("code");
        ready(expected_version(header, path_code))
    }
}

fn expected_version(
    header: Option<Result<&str, ToStrError>>,
    path_code: Option<&str>,
) -> Result<ExpectedVersion, AppError> {
    let raw = header
        .ok_or_else(|| {
            AppError::precondition_required(
                "If-Match header with the current game ETag is required",
            )
        })?
        .map_err(|_| AppError::bad_request(ErrorCode::InvalidHeader, "If-Match is not valid ASCII"))?;

    let (tag_code, version) = parse_game_etag(raw)?;
    if let Some(path_code) = path_code {
        if !tag_code.eq_ignore_ascii_case(path_code) {
            return Err(AppError::conflict(
                ErrorCode::OptimisticLock,
                format!("If-Match names game {tag_code}, not {path_code}"),
            ));
        }
    }
    Ok(ExpectedVersion(version))
}
