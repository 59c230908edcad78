//! Match flattening and enrichment
//!
//! Turns a match payload (plus optional timeline) into one [`FlatRecord`] per
//! participant. Rank and mastery are joined through the response cache,
//! terminal stats come from the last timeline frame, and every participant's
//! puuid is pushed into the frontier.

use crate::api::MatchApi;
use crate::cache::ResponseCache;
use crate::harvest::frontier::Frontier;
use crate::model::{
    epoch_millis_to_utc, scalar_or_null, truncate_millis, FlatRecord, StatSnapshot,
    PARTICIPANT_FIELDS,
};
use serde_json::Value;

/// Produces the flat records for one match
///
/// Returns an empty vector when the payload is absent or has no `info`.
/// Records keep the participant order of the payload.
pub async fn enrich<A>(
    api: &A,
    cache: &mut ResponseCache,
    frontier: &mut Frontier,
    match_payload: Option<&Value>,
    timeline: Option<&Value>,
) -> Vec<FlatRecord>
where
    A: MatchApi + ?Sized,
{
    let Some(info) = match_payload.and_then(|payload| payload.get("info")) else {
        return Vec::new();
    };

    let platform = info.get("platformId").and_then(Value::as_str);
    let match_fields = match_columns(info);

    let participants = info
        .get("participants")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let mut records = Vec::with_capacity(participants.len());
    for participant in participants {
        let puuid = participant.get("puuid").and_then(Value::as_str);
        if let Some(puuid) = puuid {
            frontier.push_player(puuid);
        }

        let summoner_id = participant.get("summonerId").and_then(Value::as_str);
        let champion_id = participant.get("championId").and_then(Value::as_i64);
        let participant_id = participant.get("participantId").and_then(Value::as_i64);

        let rank = cache.rank(api, summoner_id, platform).await;
        let mastery = cache.mastery(api, puuid, champion_id, platform).await;
        let stats = StatSnapshot::from_timeline(timeline, participant_id);

        let mut record = FlatRecord::new();
        record.extend(match_fields.iter().cloned());
        record.extend(participant_columns(participant));
        record.extend(rank.columns());
        record.extend(mastery.columns());
        record.extend(stats.columns());
        records.push(record);
    }

    records
}

/// Match-level columns shared by every participant of the match
pub fn match_columns(info: &Value) -> Vec<(&'static str, Value)> {
    let start_utc = info
        .get("gameStartTimestamp")
        .and_then(truncate_millis)
        .and_then(|ms| epoch_millis_to_utc(Some(ms)))
        .map(Value::String)
        .unwrap_or(Value::Null);

    vec![
        ("game_id", scalar_or_null(info.get("gameId"))),
        ("game_start_utc", start_utc),
        ("game_duration", scalar_or_null(info.get("gameDuration"))),
        ("game_mode", scalar_or_null(info.get("gameMode"))),
        ("game_type", scalar_or_null(info.get("gameType"))),
        ("game_version", scalar_or_null(info.get("gameVersion"))),
        ("map_id", scalar_or_null(info.get("mapId"))),
        ("platform_id", scalar_or_null(info.get("platformId"))),
        ("queue_id", scalar_or_null(info.get("queueId"))),
    ]
}

/// Pass-through projection of a participant sub-record
pub fn participant_columns(participant: &Value) -> Vec<(&'static str, Value)> {
    PARTICIPANT_FIELDS
        .iter()
        .map(|(column, key)| (*column, scalar_or_null(participant.get(*key))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::stub::{match_payload, StubApi};
    use crate::model::{record_columns, ChampionMastery, LeagueEntry, FLEX_QUEUE};
    use serde_json::json;

    const PLAYERS: [&str; 10] = ["P0", "P1", "P2", "P3", "P4", "P5", "P6", "P7", "P8", "P9"];

    #[tokio::test]
    async fn test_absent_payload_gives_nothing() {
        let api = StubApi::new();
        let mut cache = ResponseCache::new();
        let mut frontier = Frontier::new();

        let records = enrich(&api, &mut cache, &mut frontier, None, None).await;
        assert!(records.is_empty());

        let no_info = json!({ "metadata": {} });
        let records = enrich(&api, &mut cache, &mut frontier, Some(&no_info), None).await;
        assert!(records.is_empty());
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_one_record_per_participant_with_fixed_columns() {
        let api = StubApi::new();
        let mut cache = ResponseCache::new();
        let mut frontier = Frontier::new();
        let payload = match_payload("M1", "EUW1", &PLAYERS);

        let records = enrich(&api, &mut cache, &mut frontier, Some(&payload), None).await;

        assert_eq!(records.len(), PLAYERS.len());
        let header = record_columns();
        for (i, record) in records.iter().enumerate() {
            assert!(record.has_columns(&header));
            assert_eq!(record.get("game_id"), Some(&json!(42)));
            assert_eq!(record.get("queue_id"), Some(&json!(420)));
            assert_eq!(record.get("platform_id"), Some(&json!("EUW1")));
            assert_eq!(
                record.get("game_start_utc"),
                Some(&json!("2023-11-14T22:13:20.000Z"))
            );
            assert_eq!(record.get("puuid"), Some(&json!(PLAYERS[i])));
        }
    }

    #[tokio::test]
    async fn test_participants_expand_frontier() {
        let api = StubApi::new();
        let mut cache = ResponseCache::new();
        let mut frontier = Frontier::with_seed("P0");
        let payload = match_payload("M1", "EUW1", &["P0", "P1", "P2"]);

        enrich(&api, &mut cache, &mut frontier, Some(&payload), None).await;

        assert_eq!(frontier.known_players(), 3);
        assert_eq!(frontier.pending_len(), 3);
    }

    #[tokio::test]
    async fn test_rank_mastery_and_stats_are_joined() {
        let mut api = StubApi::new();
        api.leagues.insert(
            "S-P0".to_string(),
            vec![LeagueEntry {
                queue_type: Some(FLEX_QUEUE.to_string()),
                tier: Some("PLATINUM".to_string()),
                league_points: Some(77),
                ..Default::default()
            }],
        );
        api.masteries.insert(
            "P0".to_string(),
            vec![ChampionMastery {
                champion_id: Some(100),
                champion_level: Some(6),
                last_play_time: Some(1_700_000_000_000),
                ..Default::default()
            }],
        );
        let timeline = json!({
            "info": { "frames": [ { "participantFrames": {
                "1": { "championStats": { "armor": 80, "healthMax": 2100 } }
            } } ] }
        });

        let mut cache = ResponseCache::new();
        let mut frontier = Frontier::new();
        let payload = match_payload("M1", "EUW1", &["P0", "P1"]);

        let records = enrich(
            &api,
            &mut cache,
            &mut frontier,
            Some(&payload),
            Some(&timeline),
        )
        .await;

        let first = &records[0];
        assert_eq!(first.get("flex_tier"), Some(&json!("PLATINUM")));
        assert_eq!(first.get("flex_lp"), Some(&json!(77)));
        assert_eq!(first.get("solo_tier"), Some(&Value::Null));
        assert_eq!(first.get("champion_mastery_level"), Some(&json!(6)));
        assert_eq!(
            first.get("champion_mastery_lastPlayTime_utc"),
            Some(&json!("2023-11-14T22:13:20.000Z"))
        );
        assert_eq!(first.get("final_armor"), Some(&json!(80)));
        assert_eq!(first.get("final_healthMax"), Some(&json!(2100)));

        // Second participant: rank/mastery lookups failed, no timeline frame
        let second = &records[1];
        assert_eq!(second.get("flex_tier"), Some(&Value::Null));
        assert_eq!(second.get("champion_mastery_level"), Some(&Value::Null));
        assert_eq!(second.get("champion_mastery_lastPlayTime_utc"), Some(&Value::Null));
        assert_eq!(second.get("final_armor"), Some(&Value::Null));
    }

    #[tokio::test]
    async fn test_zero_start_timestamp_is_null() {
        let api = StubApi::new();
        let mut cache = ResponseCache::new();
        let mut frontier = Frontier::new();
        let mut payload = match_payload("M1", "EUW1", &["P0"]);
        payload["info"]["gameStartTimestamp"] = json!(0);

        let records = enrich(&api, &mut cache, &mut frontier, Some(&payload), None).await;
        assert_eq!(records[0].get("game_start_utc"), Some(&Value::Null));
    }

    #[tokio::test]
    async fn test_repeated_players_hit_cache() {
        let api = StubApi::new();
        let mut cache = ResponseCache::new();
        let mut frontier = Frontier::new();
        let first = match_payload("M1", "EUW1", &["P0", "P1"]);
        let second = match_payload("M2", "EUW1", &["P0", "P1"]);

        enrich(&api, &mut cache, &mut frontier, Some(&first), None).await;
        enrich(&api, &mut cache, &mut frontier, Some(&second), None).await;

        assert_eq!(api.calls_to("league:"), 2);
        assert_eq!(api.calls_to("mastery:"), 2);
    }
}
