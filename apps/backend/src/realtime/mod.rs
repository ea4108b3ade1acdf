pub mod hub;
pub mod protocol;

pub use hub::{GameEventHub, GameNotifier, Subscription};
pub use protocol::{format_sse, EventType, GameEvent};
