//! Champion mastery joined into every record

use crate::model::rank::opt_int;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;

/// One entry of the champion-mastery-v4 by-puuid response
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChampionMastery {
    pub champion_id: Option<i64>,
    pub champion_level: Option<i64>,
    pub champion_points: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_millis")]
    pub last_play_time: Option<i64>,
    pub champion_points_since_last_level: Option<i64>,
    pub champion_points_until_next_level: Option<i64>,
    pub tokens_earned: Option<i64>,
}

/// Mastery of one player on one champion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MasteryInfo {
    pub level: Option<i64>,
    pub points: Option<i64>,
    /// Epoch milliseconds
    pub last_play_time: Option<i64>,
    pub points_since_last_level: Option<i64>,
    pub points_until_next_level: Option<i64>,
    pub tokens_earned: Option<i64>,
}

/// Every champion a player has mastery on, keyed by champion id
pub type MasteryMap = HashMap<i64, MasteryInfo>;

impl From<&ChampionMastery> for MasteryInfo {
    fn from(entry: &ChampionMastery) -> Self {
        Self {
            level: entry.champion_level,
            points: entry.champion_points,
            last_play_time: entry.last_play_time,
            points_since_last_level: entry.champion_points_since_last_level,
            points_until_next_level: entry.champion_points_until_next_level,
            tokens_earned: entry.tokens_earned,
        }
    }
}

impl MasteryInfo {
    /// All-null mastery
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds the per-champion map; entries without a champion id are dropped
    pub fn map_from_entries(entries: &[ChampionMastery]) -> MasteryMap {
        entries
            .iter()
            .filter_map(|entry| entry.champion_id.map(|id| (id, MasteryInfo::from(entry))))
            .collect()
    }

    pub const COLUMNS: [&'static str; 7] = [
        "champion_mastery_level",
        "champion_mastery_points",
        "champion_mastery_lastPlayTime",
        "champion_mastery_lastPlayTime_utc",
        "champion_mastery_pointsSinceLastLevel",
        "champion_mastery_pointsUntilNextLevel",
        "champion_mastery_tokensEarned",
    ];

    /// Values for [`MasteryInfo::COLUMNS`]
    pub fn columns(&self) -> Vec<(&'static str, Value)> {
        let utc = epoch_millis_to_utc(self.last_play_time)
            .map(Value::String)
            .unwrap_or(Value::Null);

        let values = [
            opt_int(self.level),
            opt_int(self.points),
            opt_int(self.last_play_time),
            utc,
            opt_int(self.points_since_last_level),
            opt_int(self.points_until_next_level),
            opt_int(self.tokens_earned),
        ];

        Self::COLUMNS.iter().copied().zip(values).collect()
    }
}

/// Reads an epoch-millisecond JSON number, truncating a fractional value
pub fn truncate_millis(value: &Value) -> Option<i64> {
    if let Some(ms) = value.as_i64() {
        return Some(ms);
    }
    value.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)
}

fn deserialize_millis<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(truncate_millis))
}

/// Formats epoch milliseconds as an RFC 3339 UTC timestamp
///
/// Zero and absent timestamps yield None rather than the epoch.
pub fn epoch_millis_to_utc(ms: Option<i64>) -> Option<String> {
    let ms = ms.filter(|ms| *ms != 0)?;
    DateTime::<Utc>::from_timestamp_millis(ms)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}
