//! Data model for harvested matches
//!
//! - `RankInfo` / `LeagueEntry`: ladder standings per (platform, summoner)
//! - `MasteryInfo` / `ChampionMastery`: per-champion mastery per player
//! - `StatSnapshot`: terminal champion stats from the timeline
//! - `FlatRecord`: one output row per match participant

mod mastery;
mod rank;
mod record;
mod timeline;

pub use mastery::{
    epoch_millis_to_utc, truncate_millis, ChampionMastery, MasteryInfo, MasteryMap,
};
pub use rank::{LeagueEntry, QueueStanding, RankInfo, FLEX_QUEUE, SOLO_QUEUE};
pub use record::{csv_cell, record_columns, FlatRecord, MATCH_COLUMNS, PARTICIPANT_FIELDS};
pub use timeline::{StatSnapshot, FINAL_STATS};

pub(crate) use timeline::scalar_or_null;

/// Player identifier ("puuid")
pub type PlayerId = String;

/// Match identifier
pub type MatchId = String;
