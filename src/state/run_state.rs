//! Run state definitions for the harvest loop
//!
//! A run starts `Running` and moves to `Done` once either the row ceiling
//! is reached or no player is left to explore.

use std::fmt;

/// Overall state of a harvest run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunState {
    /// Below the row ceiling with players still pending
    Running,

    /// Finished; see [`StopReason`]
    Done(StopReason),
}

/// Why a run reached `Done`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StopReason {
    /// The record total reached the configured ceiling
    RowCeiling,

    /// The pending player queue ran empty
    FrontierExhausted,
}

impl RunState {
    /// Evaluates the loop condition
    ///
    /// The ceiling takes precedence when both conditions hold.
    pub fn evaluate(total_records: usize, max_rows: usize, pending_players: usize) -> Self {
        if total_records >= max_rows {
            Self::Done(StopReason::RowCeiling)
        } else if pending_players == 0 {
            Self::Done(StopReason::FrontierExhausted)
        } else {
            Self::Running
        }
    }

    /// Returns true if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done(_))
    }

    pub fn stop_reason(&self) -> Option<StopReason> {
        match self {
            Self::Running => None,
            Self::Done(reason) => Some(*reason),
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => write!(f, "running"),
            Self::Done(reason) => write!(f, "done ({})", reason),
        }
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RowCeiling => write!(f, "row ceiling reached"),
            Self::FrontierExhausted => write!(f, "frontier exhausted"),
        }
    }
}
