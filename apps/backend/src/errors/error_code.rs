//! Error codes for the Wizard scoring backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Game rules
    /// Bad player list or game configuration
    InvalidConfiguration,
    /// Invalid bid provided
    InvalidBid,
    /// Invalid trick count provided
    InvalidResult,
    /// Round cannot be completed yet
    IncompleteRound,
    /// Round is in the wrong state for this operation
    WrongRoundState,
    /// Game still has open rounds
    GameNotComplete,
    /// Round number or navigation out of range
    OutOfRange,
    /// Game has already been finalized
    GameCompleted,

    // Request Validation
    /// Invalid game code provided
    InvalidGameCode,
    /// Invalid round number in path
    InvalidRoundNumber,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,
    /// Invalid or missing HTTP header
    InvalidHeader,
    /// Precondition required for this operation
    PreconditionRequired,

    // Resource Not Found
    /// Game not found
    GameNotFound,
    /// General not found error
    NotFound,

    // Conflicts
    /// Optimistic lock conflict
    OptimisticLock,
    /// Generated game code collided with an existing game
    GameCodeTaken,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidConfiguration => "INVALID_CONFIGURATION",
            Self::InvalidBid => "INVALID_BID",
            Self::InvalidResult => "INVALID_RESULT",
            Self::IncompleteRound => "INCOMPLETE_ROUND",
            Self::WrongRoundState => "WRONG_ROUND_STATE",
            Self::GameNotComplete => "GAME_NOT_COMPLETE",
            Self::OutOfRange => "OUT_OF_RANGE",
            Self::GameCompleted => "GAME_COMPLETED",

            Self::InvalidGameCode => "INVALID_GAME_CODE",
            Self::InvalidRoundNumber => "INVALID_ROUND_NUMBER",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::InvalidHeader => "INVALID_HEADER",
            Self::PreconditionRequired => "PRECONDITION_REQUIRED",

            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::OptimisticLock => "OPTIMISTIC_LOCK",
            Self::GameCodeTaken => "GAME_CODE_TAKEN",
            Self::Conflict => "CONFLICT",

            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
