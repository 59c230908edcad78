//! Terminal per-participant champion stats from a match timeline

use serde_json::Value;

/// Champion stats read from the last timeline frame, paired with their column names
pub const FINAL_STATS: [(&str, &str); 25] = [
    ("abilityHaste", "final_abilityHaste"),
    ("abilityPower", "final_abilityPower"),
    ("armor", "final_armor"),
    ("armorPen", "final_armorPen"),
    ("armorPenPercent", "final_armorPenPercent"),
    ("attackDamage", "final_attackDamage"),
    ("attackSpeed", "final_attackSpeed"),
    ("bonusArmorPenPercent", "final_bonusArmorPenPercent"),
    ("bonusMagicPenPercent", "final_bonusMagicPenPercent"),
    ("ccReduction", "final_ccReduction"),
    ("cooldownReduction", "final_cooldownReduction"),
    ("health", "final_health"),
    ("healthMax", "final_healthMax"),
    ("healthRegen", "final_healthRegen"),
    ("lifesteal", "final_lifesteal"),
    ("magicPen", "final_magicPen"),
    ("magicPenPercent", "final_magicPenPercent"),
    ("magicResist", "final_magicResist"),
    ("movementSpeed", "final_movementSpeed"),
    ("omnivamp", "final_omnivamp"),
    ("physicalVamp", "final_physicalVamp"),
    ("power", "final_power"),
    ("powerMax", "final_powerMax"),
    ("powerRegen", "final_powerRegen"),
    ("spellVamp", "final_spellVamp"),
];

/// One participant's champion stats at the end of the match
#[derive(Debug, Clone, PartialEq)]
pub struct StatSnapshot {
    /// Same order as [`FINAL_STATS`]
    values: Vec<Value>,
}

impl StatSnapshot {
    /// Every stat null
    pub fn empty() -> Self {
        Self {
            values: vec![Value::Null; FINAL_STATS.len()],
        }
    }

    /// Extracts the snapshot for `participant_id` from the timeline's last frame
    ///
    /// Missing timeline, frames, participant frame or stat all give nulls.
    pub fn from_timeline(timeline: Option<&Value>, participant_id: Option<i64>) -> Self {
        let champion_stats = timeline
            .zip(participant_id)
            .and_then(|(timeline, id)| {
                timeline
                    .pointer("/info/frames")
                    .and_then(Value::as_array)
                    .and_then(|frames| frames.last())
                    .and_then(|frame| frame.get("participantFrames"))
                    .and_then(|frames| frames.get(id.to_string()))
                    .and_then(|frame| frame.get("championStats"))
            });

        let Some(stats) = champion_stats else {
            return Self::empty();
        };

        let values = FINAL_STATS
            .iter()
            .map(|(field, _)| scalar_or_null(stats.get(*field)))
            .collect();

        Self { values }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        FINAL_STATS
            .iter()
            .position(|(name, _)| *name == field)
            .map(|i| &self.values[i])
    }

    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Value::is_null)
    }

    /// Column/value pairs in [`FINAL_STATS`] order
    pub fn columns(&self) -> Vec<(&'static str, Value)> {
        FINAL_STATS
            .iter()
            .map(|(_, column)| *column)
            .zip(self.values.iter().cloned())
            .collect()
    }
}

/// Keeps scalar JSON values; nested objects and arrays become null
pub(crate) fn scalar_or_null(value: Option<&Value>) -> Value {
    match value {
        Some(v @ (Value::Bool(_) | Value::Number(_) | Value::String(_))) => v.clone(),
        _ => Value::Null,
    }
}
