//! Game code generation.
//!
//! Game codes are 12 lowercase hex characters encoding 6 random bytes.

use rand::Rng;

pub const GAME_CODE_LEN: usize = 12;

/// Generate a random game code.
pub fn generate_game_code() -> String {
    let mut bytes = [0u8; GAME_CODE_LEN / 2];
    rand::rng().fill(&mut bytes);

    let mut s = String::with_capacity(GAME_CODE_LEN);
    for b in bytes {
        s.push_str(&format!("{b:02x}"));
    }
    s
}

/// Whether `code` has the shape produced by [`generate_game_code`].
pub fn is_valid_game_code(code: &str) -> bool {
    code.len() == GAME_CODE_LEN
        && code
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}
