//! Server-sent event stream for one game.
//!
//! Frames follow `event: <type>\ndata: <json>\n\n`. A stream opens with a
//! `connected` event, relays every event published for the game, interleaves
//! `heartbeat` events, and ends after relaying `game_deleted`.

use std::convert::Infallible;
use std::future::ready;
use std::sync::Arc;
use std::time::Duration;

use actix_web::http::header::CACHE_CONTROL;
use actix_web::{web, HttpResponse};
use bytes::Bytes;
use futures_util::stream::{self, Stream, StreamExt};
use tokio::time::{interval_at, Instant};
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::{BroadcastStream, IntervalStream};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::AppError;
use crate::extractors::game_code::GameCode;
use crate::realtime::hub::{GameEventHub, Subscription};
use crate::realtime::protocol::{format_sse, EventType, GameEvent};
use crate::state::app_state::AppState;

/// Logs the disconnect and releases the game's channel when the stream is dropped.
struct SubscriptionGuard {
    hub: Arc<GameEventHub>,
    code: String,
    client_id: Uuid,
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        info!(game_code = %self.code, client_id = %self.client_id, "SSE client disconnected");
        self.hub.prune(&self.code);
    }
}

/// Encoded SSE frames for `code`, starting with `connected`.
pub fn event_stream(
    hub: Arc<GameEventHub>,
    code: String,
    heartbeat: Duration,
) -> impl Stream<Item = Result<Bytes, Infallible>> + 'static {
    let Subscription {
        client_id,
        receiver,
    } = hub.subscribe(&code);
    let hello = GameEvent::connected(&code, client_id, hub.subscriber_count(&code));
    info!(game_code = %code, client_id = %client_id, "SSE client connected");

    let lag_code = code.clone();
    let events = BroadcastStream::new(receiver)
        .filter_map(move |item| {
            let event = match item {
                Ok(event) => Some(event),
                Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                    warn!(game_code = %lag_code, client_id = %client_id, skipped, "SSE client lagged, events skipped");
                    None
                }
            };
            ready(event)
        })
        // game_deleted is the last event relayed; `None` ends the stream
        .flat_map(|event: Arc<GameEvent>| {
            let last = event.event_type == EventType::GameDeleted;
            stream::iter(std::iter::once(Some(event)).chain(last.then_some(None)))
        })
        .chain(stream::once(ready(None)));

    let heartbeat_code = code.clone();
    let heartbeats = IntervalStream::new(interval_at(Instant::now() + heartbeat, heartbeat))
        .map(move |_| Some(Arc::new(GameEvent::heartbeat(&heartbeat_code))));

    // Heartbeats alone never end the stream
    let live = stream::select(events, heartbeats)
        .take_while(|item| ready(item.is_some()))
        .filter_map(ready);

    let guard = SubscriptionGuard {
        hub,
        code,
        client_id,
    };

    stream::once(ready(Arc::new(hello)))
        .chain(live)
        .filter_map(move |event| {
            let _held = &guard;
            let frame = match format_sse(&event) {
                Ok(bytes) => Some(Ok::<Bytes, Infallible>(bytes)),
                Err(err) => {
                    warn!(game_code = %event.game_code, error = %err, "Failed to encode SSE frame");
                    None
                }
            };
            ready(frame)
        })
}

/// GET /api/wizard/games/{code}/events
async fn subscribe_events(
    code: GameCode,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    // Subscribed first: a concurrent delete shows up as 404 or as game_deleted
    let stream = event_stream(
        app_state.hub.clone(),
        code.0.clone(),
        app_state.config.sse_heartbeat,
    );
    app_state.games.get_game(code.as_str()).await?;

    Ok(HttpResponse::Ok()
        .content_type("text/event-stream")
        .insert_header((CACHE_CONTROL, "no-cache"))
        .insert_header(("X-Accel-Buffering", "no"))
        .streaming(stream))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/{code}/events").route(web::get().to(subscribe_events)));
}
