use crate::api::routing::Routing;
use crate::config::Config;
use crate::fetch::{FetchClient, FetchError, FetchStats};
use crate::model::{ChampionMastery, LeagueEntry};
use crate::{ConfigError, HarvestError};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::Value;

/// Header carrying the API credential
pub const TOKEN_HEADER: &str = "X-Riot-Token";

/// The remote operations a harvest needs
///
/// Every error is permanent for that call; transient conditions have already
/// been retried by the fetch layer.
#[async_trait]
pub trait MatchApi: Send + Sync {
    /// Most recent match ids for a player, newest first
    async fn match_ids_by_puuid(&self, puuid: &str, count: u32)
        -> Result<Vec<String>, FetchError>;

    async fn match_detail(&self, match_id: &str) -> Result<Value, FetchError>;

    async fn match_timeline(&self, match_id: &str) -> Result<Value, FetchError>;

    /// Ladder entries of a summoner on a platform
    async fn league_entries(
        &self,
        summoner_id: &str,
        platform: &str,
    ) -> Result<Vec<LeagueEntry>, FetchError>;

    /// Mastery on every champion for a player
    async fn champion_masteries(
        &self,
        puuid: &str,
        platform: Option<&str>,
    ) -> Result<Vec<ChampionMastery>, FetchError>;

    /// Request counters of the underlying client, if it keeps any
    fn fetch_stats(&self) -> Option<FetchStats> {
        None
    }
}

/// [`MatchApi`] over HTTP against the Riot endpoints
pub struct RiotApi {
    client: FetchClient,
    routing: Routing,
    headers: HeaderMap,
}

impl RiotApi {
    pub fn new(client: FetchClient, routing: Routing, api_key: &str) -> Result<Self, ConfigError> {
        let token = HeaderValue::from_str(api_key).map_err(|_| {
            ConfigError::Validation("api_key contains characters not allowed in a header".into())
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(TOKEN_HEADER, token);

        Ok(Self {
            client,
            routing,
            headers,
        })
    }

    /// Builds the fetch client and routing from a full configuration
    pub fn from_config(config: &Config) -> Result<Self, HarvestError> {
        let client = FetchClient::from_config(&config.fetch)?;
        let routing = Routing::from_config(&config.api);
        Ok(Self::new(client, routing, &config.api.api_key)?)
    }

}

#[async_trait]
impl MatchApi for RiotApi {
    async fn match_ids_by_puuid(
        &self,
        puuid: &str,
        count: u32,
    ) -> Result<Vec<String>, FetchError> {
        let url = format!(
            "{}/lol/match/v5/matches/by-puuid/{}/ids",
            self.routing.match_base(),
            puuid
        );
        self.client
            .fetch_json(&url, &[("count", count.to_string())], &self.headers)
            .await
    }

    async fn match_detail(&self, match_id: &str) -> Result<Value, FetchError> {
        let url = format!(
            "{}/lol/match/v5/matches/{}",
            self.routing.match_base(),
            match_id
        );
        self.client.fetch_json(&url, &[], &self.headers).await
    }

    async fn match_timeline(&self, match_id: &str) -> Result<Value, FetchError> {
        let url = format!(
            "{}/lol/match/v5/matches/{}/timeline",
            self.routing.match_base(),
            match_id
        );
        self.client.fetch_json(&url, &[], &self.headers).await
    }

    async fn league_entries(
        &self,
        summoner_id: &str,
        platform: &str,
    ) -> Result<Vec<LeagueEntry>, FetchError> {
        let url = format!(
            "{}/lol/league/v4/entries/by-summoner/{}",
            self.routing.platform_base(Some(platform)),
            summoner_id
        );
        self.client.fetch_json(&url, &[], &self.headers).await
    }

    async fn champion_masteries(
        &self,
        puuid: &str,
        platform: Option<&str>,
    ) -> Result<Vec<ChampionMastery>, FetchError> {
        let url = format!(
            "{}/lol/champion-mastery/v4/champion-masteries/by-puuid/{}",
            self.routing.platform_base(platform),
            puuid
        );
        self.client.fetch_json(&url, &[], &self.headers).await
    }

    fn fetch_stats(&self) -> Option<FetchStats> {
        Some(self.client.stats())
    }
}
