//! Per-player bid and trick entries.
//!
//! Entries are `Option<u8>` in memory. On the wire an unset entry is `-1`, and
//! raw submissions arrive as `i32` so that out-of-range input can be reported
//! instead of failing deserialization.

use crate::domain::rules::valid_bid_range;
use crate::errors::domain::{DomainError, ValidationKind};

/// Wire sentinel for "not yet submitted".
pub const UNSET: i32 = -1;

pub fn to_wire(entry: Option<u8>) -> i32 {
    entry.map(i32::from).unwrap_or(UNSET)
}

/// Validate one raw submission against the round's card count.
///
/// `kind` selects the error raised (`InvalidBid` or `InvalidResult`).
pub fn parse_entries(
    raw: &[i32],
    player_count: usize,
    cards: u8,
    kind: ValidationKind,
    round_no: u8,
) -> Result<Vec<Option<u8>>, DomainError> {
    let label = match kind {
        ValidationKind::InvalidBid => "bid",
        _ => "result",
    };

    if raw.len() != player_count {
        return Err(DomainError::validation(
            kind,
            format!(
                "round {round_no}: expected {player_count} {label}s, got {}",
                raw.len()
            ),
        ));
    }

    let range = valid_bid_range(cards);
    raw.iter()
        .enumerate()
        .map(|(player, &value)| {
            if value == UNSET {
                return Ok(None);
            }
            match u8::try_from(value) {
                Ok(v) if range.contains(&v) => Ok(Some(v)),
                _ => Err(DomainError::validation(
                    kind.clone(),
                    format!(
                        "round {round_no}: player {player} {label} {value} outside 0..={cards}"
                    ),
                )),
            }
        })
        .collect()
}

pub mod sentinel {
    //! `serde(with)` helpers for `Option<u8>` fields that use `-1` on the wire.

    use serde::{Deserialize, Deserializer, Serializer};

    use super::{to_wire, UNSET};

    pub fn serialize<S: Serializer>(value: &Option<u8>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_i32(to_wire(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u8>, D::Error> {
        let raw = i32::deserialize(d)?;
        if raw == UNSET {
            return Ok(None);
        }
        u8::try_from(raw)
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("entry {raw} out of range")))
    }
}
