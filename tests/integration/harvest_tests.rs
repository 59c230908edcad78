//! Integration tests for the harvester
//!
//! These tests use wiremock to serve a small fake match API and run the
//! full harvest cycle end-to-end, checking the CSV artifacts on disk.

use rift_harvest::api::TOKEN_HEADER;
use rift_harvest::config::{parse_config, validate, Config};
use rift_harvest::model::record_columns;
use rift_harvest::{harvest, Coordinator, StopReason};
use serde_json::{json, Value};
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing every host at the mock server
fn create_test_config(server: &MockServer, out_dir: &Path, extra_crawl: &str) -> Config {
    let host = server.uri().trim_start_matches("http://").to_string();
    let toml = format!(
        r#"
[api]
api-key = "RGAPI-test"
match-region-url = "{uri}"
default-platform-domain = "{host}"
scheme = "http"

[api.platforms]
EUW1 = "{host}"

[crawl]
initial-puuid = "P0"
max-rows = 1000
chunk-size = 3
{extra_crawl}

[fetch]
requests-per-window = 100
window-ms = 1000
max-attempts = 2
server-error-cooldown-ms = 10
transport-error-delay-ms = 10
default-retry-after-secs = 1
request-timeout-secs = 5

[output]
directory = "{dir}"
file-prefix = "harvest"
"#,
        uri = server.uri(),
        host = host,
        dir = out_dir.display(),
        extra_crawl = extra_crawl,
    );

    let config = parse_config(&toml).expect("Failed to parse test config");
    validate(&config).expect("Test config should be valid");
    config
}

fn participant(id: i64, puuid: &str, champion_id: i64) -> Value {
    json!({
        "participantId": id,
        "puuid": puuid,
        "summonerName": format!("Summoner {}", puuid),
        "summonerId": format!("S-{}", puuid),
        "championId": champion_id,
        "championName": "Jinx",
        "teamId": 100,
        "win": true,
        "kills": 7,
        "deaths": 2,
        "assists": 11,
        "goldEarned": 12345,
        "item0": 3031
    })
}

fn match_payload(game_id: i64, participants: Vec<Value>) -> Value {
    json!({
        "metadata": { "matchId": format!("EUW1_{}", game_id) },
        "info": {
            "gameId": game_id,
            "gameDuration": 1650,
            "gameMode": "CLASSIC",
            "gameType": "MATCHED_GAME",
            "gameVersion": "14.3.558.1",
            "mapId": 11,
            "queueId": 420,
            "platformId": "EUW1",
            "gameStartTimestamp": 1_700_000_000_000_i64,
            "participants": participants
        }
    })
}

async fn mount_json(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .and(header(TOKEN_HEADER, "RGAPI-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Two matches: EUW1_1 (P0, P1) with a timeline and EUW1_2 (P1, P2) without
async fn mount_fake_api(server: &MockServer) {
    mount_json(server, "/lol/match/v5/matches/by-puuid/P0/ids", json!(["EUW1_1"])).await;
    mount_json(
        server,
        "/lol/match/v5/matches/by-puuid/P1/ids",
        json!(["EUW1_1", "EUW1_2"]),
    )
    .await;
    mount_json(server, "/lol/match/v5/matches/by-puuid/P2/ids", json!(["EUW1_2"])).await;

    mount_json(
        server,
        "/lol/match/v5/matches/EUW1_1",
        match_payload(1, vec![participant(1, "P0", 222), participant(2, "P1", 51)]),
    )
    .await;
    mount_json(
        server,
        "/lol/match/v5/matches/EUW1_2",
        match_payload(2, vec![participant(1, "P1", 51), participant(2, "P2", 222)]),
    )
    .await;
    mount_json(
        server,
        "/lol/match/v5/matches/EUW1_1/timeline",
        json!({
            "info": { "frames": [
                { "participantFrames": { "1": { "championStats": { "armor": 10 } } } },
                { "participantFrames": {
                    "1": { "championStats": { "armor": 95, "attackDamage": 310 } },
                    "2": { "championStats": { "armor": 120 } }
                } }
            ] }
        }),
    )
    .await;
    // EUW1_2 has no timeline mock: the fake API answers 404

    Mock::given(method("GET"))
        .and(path_regex(r"^/lol/league/v4/entries/by-summoner/[^/]+$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "queueType": "RANKED_SOLO_5x5", "tier": "GOLD", "rank": "II",
              "leaguePoints": 64, "wins": 30, "losses": 25 }
        ])))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex(
            r"^/lol/champion-mastery/v4/champion-masteries/by-puuid/[^/]+$",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "championId": 222, "championLevel": 7, "championPoints": 250000,
              "lastPlayTime": 1700000000123.0, "championPointsSinceLastLevel": 228400,
              "championPointsUntilNextLevel": 0, "tokensEarned": 0 }
        ])))
        .mount(server)
        .await;
}

fn csv_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".csv"))
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn test_full_harvest_writes_single_cumulative_artifact() {
    let server = MockServer::start().await;
    mount_fake_api(&server).await;
    let temp = TempDir::new().unwrap();
    let config = create_test_config(&server, temp.path(), "");

    let stats = harvest(config).await.expect("Harvest failed");

    assert_eq!(stats.records, 4);
    assert_eq!(stats.matches_processed, 2);
    assert_eq!(stats.players_explored, 3);
    assert_eq!(stats.stop_reason, Some(StopReason::FrontierExhausted));

    // 3 histories + 2 details + 2 timelines + 3 ranks + 3 masteries
    assert_eq!(stats.fetch.requests, 13);
    assert_eq!(stats.fetch.terminal_failures, 1);
    assert_eq!(stats.cache.ranks.hits, 1);

    assert_eq!(csv_files(temp.path()), vec!["harvest_4.csv"]);

    let mut reader = csv::Reader::from_path(temp.path().join("harvest_4.csv")).unwrap();
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, record_columns());

    let col = |name: &str| headers.iter().position(|h| h == name).unwrap();
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 4);

    // First match, first participant: every join filled in
    let first = &rows[0];
    assert_eq!(&first[col("game_id")], "1");
    assert_eq!(&first[col("game_start_utc")], "2023-11-14T22:13:20.000Z");
    assert_eq!(&first[col("puuid")], "P0");
    assert_eq!(&first[col("solo_tier")], "GOLD");
    assert_eq!(&first[col("flex_tier")], "");
    assert_eq!(&first[col("champion_mastery_level")], "7");
    assert_eq!(&first[col("champion_mastery_lastPlayTime")], "1700000000123");
    assert_eq!(
        &first[col("champion_mastery_lastPlayTime_utc")],
        "2023-11-14T22:13:20.123Z"
    );
    assert_eq!(&first[col("final_armor")], "95");
    assert_eq!(&first[col("final_attackDamage")], "310");
    assert_eq!(&first[col("final_health")], "");

    // P1 plays a champion without mastery
    assert_eq!(&rows[1][col("champion_mastery_level")], "");
    assert_eq!(&rows[1][col("final_armor")], "120");

    // Second match has no timeline
    assert_eq!(&rows[2][col("game_id")], "2");
    assert_eq!(&rows[2][col("final_armor")], "");
    assert_eq!(&rows[3][col("puuid")], "P2");
}

#[tokio::test]
async fn test_per_record_ceiling_stops_mid_match() {
    let server = MockServer::start().await;
    mount_fake_api(&server).await;
    let temp = TempDir::new().unwrap();
    let mut config = create_test_config(&server, temp.path(), r#"ceiling-policy = "per-record""#);
    config.crawl.max_rows = 3;

    let mut coordinator = Coordinator::from_config(config).unwrap();
    let stats = coordinator.run().await.unwrap();

    assert_eq!(stats.records, 3);
    assert_eq!(stats.stop_reason, Some(StopReason::RowCeiling));
    assert_eq!(csv_files(temp.path()), vec!["harvest_3.csv"]);

    // Counters come through a direct run too:
    // 2 histories + 2 details + 2 timelines + 3 ranks + 3 masteries
    assert_eq!(stats.fetch.requests, 12);
    assert_eq!(stats.fetch.terminal_failures, 1);
}

#[tokio::test]
async fn test_end_of_match_ceiling_keeps_whole_match() {
    let server = MockServer::start().await;
    mount_fake_api(&server).await;
    let temp = TempDir::new().unwrap();
    let mut config = create_test_config(&server, temp.path(), "");
    config.crawl.max_rows = 3;

    let stats = harvest(config).await.unwrap();

    assert_eq!(stats.records, 4);
    assert_eq!(stats.stop_reason, Some(StopReason::RowCeiling));
    // P2 was discovered but never explored
    assert_eq!(stats.players_pending, 1);
}

#[tokio::test]
async fn test_delta_mode_keeps_every_chunk() {
    let server = MockServer::start().await;
    mount_fake_api(&server).await;
    let temp = TempDir::new().unwrap();
    let mut config = create_test_config(&server, temp.path(), "");
    config.output.mode = rift_harvest::config::OutputMode::Delta;

    let stats = harvest(config).await.unwrap();

    assert_eq!(stats.artifacts_written, 2);
    assert_eq!(csv_files(temp.path()), vec!["harvest_3.csv", "harvest_4.csv"]);

    let mut reader = csv::Reader::from_path(temp.path().join("harvest_4.csv")).unwrap();
    assert_eq!(reader.records().count(), 1);
}

#[tokio::test]
async fn test_unreachable_seed_player_ends_run_cleanly() {
    let server = MockServer::start().await;
    // Nothing mounted: every request is a 404
    let temp = TempDir::new().unwrap();
    let config = create_test_config(&server, temp.path(), "");

    let stats = harvest(config).await.unwrap();

    assert_eq!(stats.records, 0);
    assert_eq!(stats.players_abandoned, 1);
    assert_eq!(stats.fetch.requests, 1);
    assert!(csv_files(temp.path()).is_empty());
}
