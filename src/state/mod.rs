//! State module for tracking harvest progress
//!
//! - `RunState`: Running until the row ceiling or frontier exhaustion
//! - `StopReason`: which of the two ended the run

mod run_state;

pub use run_state::{RunState, StopReason};
