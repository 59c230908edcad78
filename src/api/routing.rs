use crate::config::ApiConfig;
use std::collections::BTreeMap;

/// Request routing for the two API scopes
///
/// Match history, match detail and timeline calls go to the regional match
/// host. Rank and mastery calls go to the platform host of the player.
#[derive(Debug, Clone)]
pub struct Routing {
    match_region_url: String,
    default_platform_domain: String,
    platforms: BTreeMap<String, String>,
    scheme: String,
}

impl Routing {
    pub fn new(
        match_region_url: &str,
        default_platform_domain: &str,
        platforms: BTreeMap<String, String>,
        scheme: &str,
    ) -> Self {
        Self {
            match_region_url: match_region_url.trim_end_matches('/').to_string(),
            default_platform_domain: default_platform_domain.to_string(),
            platforms,
            scheme: scheme.to_string(),
        }
    }

    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(
            &config.match_region_url,
            &config.default_platform_domain,
            config.platforms.clone(),
            &config.scheme,
        )
    }

    /// Base URL for match-region calls, without a trailing slash
    pub fn match_base(&self) -> &str {
        &self.match_region_url
    }

    /// Host for a platform code; unknown or missing codes use the default host
    pub fn platform_host(&self, platform: Option<&str>) -> &str {
        platform
            .and_then(|code| self.platforms.get(&code.to_ascii_uppercase()))
            .map(String::as_str)
            .unwrap_or(&self.default_platform_domain)
    }

    /// Base URL for platform-scoped calls
    pub fn platform_base(&self, platform: Option<&str>) -> String {
        format!("{}://{}", self.scheme, self.platform_host(platform))
    }
}
