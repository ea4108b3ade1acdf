//! ETag helpers for optimistic concurrency control.
//!
//! Games are versioned; the version travels as an ETag on reads and comes back
//! in `If-Match` on writes.

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Generate an ETag for a game resource.
///
/// Format: `"wizard-{code}-v{version}"` (with quotes, as required by HTTP spec)
///
/// # Example
/// ```
/// # use wizard_backend::http::etag::game_etag;
/// let etag = game_etag("0a1b2c3d4e5f", 5);
/// assert_eq!(etag, r#""wizard-0a1b2c3d4e5f-v5""#);
/// ```
pub fn game_etag(code: &str, version: u32) -> String {
    format!(r#""wizard-{code}-v{version}""#)
}

/// Split an ETag into the game code and version it names.
///
/// Accepts ETags in the format `"wizard-{code}-v{version}"`, quoted or not,
/// and a weak `W/` prefix. The code is returned lowercased.
///
/// # Errors
/// Returns `AppError::bad_request` with `ErrorCode::InvalidHeader` if the
/// `wizard-` prefix or version marker is missing, the code is empty, or the
/// version is not a u32.
pub fn parse_game_etag(s: &str) -> Result<(String, u32), AppError> {
    let s = s.trim();
    let s = s.strip_prefix("W/").unwrap_or(s).trim_matches('"');

    let invalid = |reason: &str| {
        AppError::bad_request(
            ErrorCode::InvalidHeader,
            format!("Invalid ETag format: {reason}. Expected format: \"wizard-{{code}}-v{{version}}\", got: \"{s}\""),
        )
    };

    let rest = s
        .strip_prefix("wizard-")
        .ok_or_else(|| invalid("missing wizard- prefix"))?;
    let (code, version_str) = rest
        .rsplit_once("-v")
        .ok_or_else(|| invalid("missing version marker"))?;
    if code.is_empty() {
        return Err(invalid("missing game code"));
    }

    let version = version_str.parse::<u32>().map_err(|_| {
        AppError::bad_request(
            ErrorCode::InvalidHeader,
            format!("Invalid ETag format: version must be a valid integer, got: \"{version_str}\""),
        )
    })?;
    Ok((code.to_ascii_lowercase(), version))
}
