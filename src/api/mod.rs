//! Remote API boundary
//!
//! [`MatchApi`] is the seam between the harvest loop and the network:
//! - `RiotApi`: the HTTP implementation over the rate-limited fetch client
//! - `Routing`: regional match host vs. per-platform hosts

mod riot;
mod routing;

#[cfg(test)]
pub(crate) mod stub;

pub use riot::{MatchApi, RiotApi, TOKEN_HEADER};
pub use routing::Routing;
