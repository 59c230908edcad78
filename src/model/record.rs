//! Flat per-participant record and its fixed column layout

use crate::model::mastery::MasteryInfo;
use crate::model::rank::RankInfo;
use crate::model::timeline::FINAL_STATS;
use serde_json::Value;

/// Match-level columns, in order
pub const MATCH_COLUMNS: [&str; 9] = [
    "game_id",
    "game_start_utc",
    "game_duration",
    "game_mode",
    "game_type",
    "game_version",
    "map_id",
    "platform_id",
    "queue_id",
];

/// Participant columns copied straight from the payload: (column, JSON key)
pub const PARTICIPANT_FIELDS: [(&str, &str); 46] = [
    ("participant_id", "participantId"),
    ("puuid", "puuid"),
    ("summoner_name", "summonerName"),
    ("summoner_id", "summonerId"),
    ("summoner_level", "summonerLevel"),
    ("champion_id", "championId"),
    ("champion_name", "championName"),
    ("team_id", "teamId"),
    ("win", "win"),
    ("individual_position", "individualPosition"),
    ("team_position", "teamPosition"),
    ("lane", "lane"),
    ("role", "role"),
    ("kills", "kills"),
    ("deaths", "deaths"),
    ("assists", "assists"),
    ("baron_kills", "baronKills"),
    ("dragon_kills", "dragonKills"),
    ("gold_earned", "goldEarned"),
    ("gold_spent", "goldSpent"),
    ("total_damage_dealt", "totalDamageDealt"),
    ("total_damage_dealt_to_champions", "totalDamageDealtToChampions"),
    ("physical_damage_dealt_to_champions", "physicalDamageDealtToChampions"),
    ("magic_damage_dealt_to_champions", "magicDamageDealtToChampions"),
    ("true_damage_dealt_to_champions", "trueDamageDealtToChampions"),
    ("damage_dealt_to_objectives", "damageDealtToObjectives"),
    ("damage_dealt_to_turrets", "damageDealtToTurrets"),
    ("total_damage_taken", "totalDamageTaken"),
    ("physical_damage_taken", "physicalDamageTaken"),
    ("magic_damage_taken", "magicDamageTaken"),
    ("true_damage_taken", "trueDamageTaken"),
    ("time_ccing_others", "timeCCingOthers"),
    ("vision_score", "visionScore"),
    ("wards_placed", "wardsPlaced"),
    ("wards_killed", "wardsKilled"),
    ("vision_wards_bought_in_game", "visionWardsBoughtInGame"),
    ("item0", "item0"),
    ("item1", "item1"),
    ("item2", "item2"),
    ("item3", "item3"),
    ("item4", "item4"),
    ("item5", "item5"),
    ("item6", "item6"),
    ("champ_level", "champLevel"),
    ("total_minions_killed", "totalMinionsKilled"),
    ("neutral_minions_killed", "neutralMinionsKilled"),
];

/// Full column header shared by every record
pub fn record_columns() -> Vec<&'static str> {
    MATCH_COLUMNS
        .iter()
        .copied()
        .chain(PARTICIPANT_FIELDS.iter().map(|(column, _)| *column))
        .chain(RankInfo::COLUMNS.iter().copied())
        .chain(MasteryInfo::COLUMNS.iter().copied())
        .chain(FINAL_STATS.iter().map(|(_, column)| *column))
        .collect()
}

/// One row: ordered column/value pairs
///
/// Values are JSON scalars or null.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatRecord {
    fields: Vec<(&'static str, Value)>,
}

impl FlatRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, column: &'static str, value: Value) {
        self.fields.push((column, value));
    }

    pub fn extend(&mut self, columns: impl IntoIterator<Item = (&'static str, Value)>) {
        self.fields.extend(columns);
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, value)| value)
    }

    pub fn columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(name, _)| *name)
    }

    /// True when this record has exactly `header`'s columns in the same order
    pub fn has_columns(&self, header: &[&str]) -> bool {
        self.fields.len() == header.len()
            && self.columns().zip(header.iter()).all(|(a, b)| a == *b)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Cell text for each column, in order
    pub fn to_csv_row(&self) -> Vec<String> {
        self.fields.iter().map(|(_, value)| csv_cell(value)).collect()
    }
}

/// Renders a value as CSV cell text; null is an empty cell
pub fn csv_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
