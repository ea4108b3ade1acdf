//! Service layer: orchestration between the domain core, storage and realtime.

pub mod game_flow;
