//! Ladder standings joined into every record

use serde::Deserialize;
use serde_json::Value;

/// Queue type of the solo/duo ladder
pub const SOLO_QUEUE: &str = "RANKED_SOLO_5x5";

/// Queue type of the flex ladder
pub const FLEX_QUEUE: &str = "RANKED_FLEX_SR";

/// One entry of the league-v4 by-summoner response
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueEntry {
    pub queue_type: Option<String>,
    pub tier: Option<String>,
    pub rank: Option<String>,
    pub league_points: Option<i64>,
    pub wins: Option<i64>,
    pub losses: Option<i64>,
}

/// Standing on a single ladder
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueueStanding {
    pub tier: Option<String>,
    /// Division within the tier ("I".."IV")
    pub rank: Option<String>,
    pub league_points: Option<i64>,
    pub wins: Option<i64>,
    pub losses: Option<i64>,
}

impl QueueStanding {
    fn from_entry(entry: &LeagueEntry) -> Self {
        Self {
            tier: entry.tier.clone(),
            rank: entry.rank.clone(),
            league_points: entry.league_points,
            wins: entry.wins,
            losses: entry.losses,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Solo and flex standings for one (platform, summoner)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankInfo {
    pub solo: QueueStanding,
    pub flex: QueueStanding,
}

impl RankInfo {
    /// All-null standings
    pub fn empty() -> Self {
        Self::default()
    }

    /// Picks the solo and flex entries; other queues are ignored
    pub fn from_entries(entries: &[LeagueEntry]) -> Self {
        let mut info = Self::empty();
        for entry in entries {
            match entry.queue_type.as_deref() {
                Some(SOLO_QUEUE) => info.solo = QueueStanding::from_entry(entry),
                Some(FLEX_QUEUE) => info.flex = QueueStanding::from_entry(entry),
                _ => {}
            }
        }
        info
    }

    /// Column names contributed to a flat record, in order
    pub const COLUMNS: [&'static str; 10] = [
        "solo_tier",
        "solo_rank",
        "solo_lp",
        "solo_wins",
        "solo_losses",
        "flex_tier",
        "flex_rank",
        "flex_lp",
        "flex_wins",
        "flex_losses",
    ];

    /// Values for [`RankInfo::COLUMNS`]
    pub fn columns(&self) -> Vec<(&'static str, Value)> {
        let values = [&self.solo, &self.flex]
            .into_iter()
            .flat_map(|standing| {
                [
                    opt_str(&standing.tier),
                    opt_str(&standing.rank),
                    opt_int(standing.league_points),
                    opt_int(standing.wins),
                    opt_int(standing.losses),
                ]
            });

        Self::COLUMNS.iter().copied().zip(values).collect()
    }
}

pub(crate) fn opt_str(value: &Option<String>) -> Value {
    value.clone().map(Value::String).unwrap_or(Value::Null)
}

pub(crate) fn opt_int(value: Option<i64>) -> Value {
    value.map(Value::from).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(queue: &str, tier: &str, lp: i64) -> LeagueEntry {
        LeagueEntry {
            queue_type: Some(queue.to_string()),
            tier: Some(tier.to_string()),
            rank: Some("II".to_string()),
            league_points: Some(lp),
            wins: Some(10),
            losses: Some(8),
        }
    }

    #[test]
    fn test_from_entries_picks_both_ladders() {
        let info = RankInfo::from_entries(&[
            entry(SOLO_QUEUE, "GOLD", 55),
            entry("CHERRY", "NONE", 0),
            entry(FLEX_QUEUE, "SILVER", 12),
        ]);

        assert_eq!(info.solo.tier.as_deref(), Some("GOLD"));
        assert_eq!(info.solo.league_points, Some(55));
        assert_eq!(info.flex.tier.as_deref(), Some("SILVER"));
    }

    #[test]
    fn test_missing_ladder_is_null() {
        let info = RankInfo::from_entries(&[entry(SOLO_QUEUE, "GOLD", 55)]);
        assert!(info.flex.is_empty());

        let columns = info.columns();
        assert_eq!(columns.len(), RankInfo::COLUMNS.len());
        assert_eq!(columns[0], ("solo_tier", Value::from("GOLD")));
        assert_eq!(columns[5], ("flex_tier", Value::Null));
        assert_eq!(columns[9], ("flex_losses", Value::Null));
    }

    #[test]
    fn test_deserialize_league_entry() {
        let json = r#"{"queueType":"RANKED_SOLO_5x5","tier":"EMERALD","rank":"IV",
            "leaguePoints":3,"wins":40,"losses":38,"hotStreak":false}"#;
        let parsed: LeagueEntry = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.tier.as_deref(), Some("EMERALD"));
        assert_eq!(parsed.wins, Some(40));
    }
}
