//! Backend test support utilities
//!
//! Shared by the backend's integration tests: logging setup and assertions on
//! the problem-details error contract. Nothing here depends on backend types.

pub mod logging;
pub mod problem_details;
