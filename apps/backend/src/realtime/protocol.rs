use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::game_transition::GameTransition;
use crate::domain::state::Game;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Connected,
    Heartbeat,
    GameCreated,
    BidsSubmitted,
    ResultsSubmitted,
    RoundCompleted,
    RoundRestarted,
    RoundEdited,
    RoundAdvanced,
    RoundRewound,
    GameFinalized,
    GameDeleted,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Connected => "connected",
            EventType::Heartbeat => "heartbeat",
            EventType::GameCreated => "game_created",
            EventType::BidsSubmitted => "bids_submitted",
            EventType::ResultsSubmitted => "results_submitted",
            EventType::RoundCompleted => "round_completed",
            EventType::RoundRestarted => "round_restarted",
            EventType::RoundEdited => "round_edited",
            EventType::RoundAdvanced => "round_advanced",
            EventType::RoundRewound => "round_rewound",
            EventType::GameFinalized => "game_finalized",
            EventType::GameDeleted => "game_deleted",
        }
    }
}

/// One message on a game's event channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameEvent {
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub game_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl GameEvent {
    /// Event for a committed mutation: carries the full game and its transitions.
    pub fn mutation(
        event_type: EventType,
        game: &Game,
        transitions: &[GameTransition],
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            event_type,
            game_code: game.code.clone(),
            version: Some(game.version),
            timestamp: OffsetDateTime::now_utc(),
            data: Some(json!({
                "game": serde_json::to_value(game)?,
                "transitions": serde_json::to_value(transitions)?,
            })),
        })
    }

    pub fn connected(game_code: &str, client_id: Uuid, subscribers: usize) -> Self {
        Self {
            event_type: EventType::Connected,
            game_code: game_code.to_string(),
            version: None,
            timestamp: OffsetDateTime::now_utc(),
            data: Some(json!({
                "client_id": client_id.to_string(),
                "subscribers": subscribers,
            })),
        }
    }

    pub fn heartbeat(game_code: &str) -> Self {
        Self {
            event_type: EventType::Heartbeat,
            game_code: game_code.to_string(),
            version: None,
            timestamp: OffsetDateTime::now_utc(),
            data: None,
        }
    }

    pub fn deleted(game_code: &str, version: u32) -> Self {
        Self {
            event_type: EventType::GameDeleted,
            game_code: game_code.to_string(),
            version: Some(version),
            timestamp: OffsetDateTime::now_utc(),
            data: None,
        }
    }
}

/// Encode as one `text/event-stream` frame.
pub fn format_sse(event: &GameEvent) -> Result<Bytes, serde_json::Error> {
    let payload = serde_json::to_string(event)?;
    Ok(Bytes::from(format!(
        "event: {}\ndata: {payload}\n\n",
        event.event_type.as_str()
    )))
}
