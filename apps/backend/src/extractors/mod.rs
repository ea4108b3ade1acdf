pub mod expected_version;
pub mod game_code;
pub mod round_number;
pub mod validated_json;

pub use expected_version::ExpectedVersion;
pub use game_code::GameCode;
pub use round_number::RoundNumber;
pub use validated_json::ValidatedJson;
