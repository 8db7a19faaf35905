//! Client configuration

use crate::error::ConfigError;
use reqwest::Url;
use std::time::Duration;

pub const API_URL_VAR: &str = "SHELF_API_URL";
pub const ASSET_URL_VAR: &str = "SHELF_ASSET_URL";
pub const TIMEOUT_VAR: &str = "SHELF_TIMEOUT_SECS";

const DEFAULT_API_URL: &str = "http://localhost:3000/api";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where the catalog service lives and how long to wait for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base of the REST API, e.g. `http://localhost:3000/api`
    pub api_url: Url,

    /// Base that relative cover paths are resolved against
    pub asset_url: Url,

    /// Per-request timeout
    pub timeout: Duration,
}

impl ClientConfig {
    /// Build a config from an API URL; assets default to the API's origin
    pub fn new(api_url: &str) -> Result<Self, ConfigError> {
        let api_url = parse_url(API_URL_VAR, api_url)?;
        let asset_url = origin_of(&api_url);
        Ok(Self {
            api_url,
            asset_url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Read `SHELF_API_URL`, `SHELF_ASSET_URL` and `SHELF_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = lookup(API_URL_VAR).unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let mut config = Self::new(&api_url)?;

        if let Some(asset_url) = lookup(ASSET_URL_VAR) {
            config = config.with_asset_url(&asset_url)?;
        }

        if let Some(raw) = lookup(TIMEOUT_VAR) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::InvalidValue {
                    var: TIMEOUT_VAR.to_string(),
                    value: raw.clone(),
                })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Override where covers are served from
    pub fn with_asset_url(mut self, asset_url: &str) -> Result<Self, ConfigError> {
        self.asset_url = parse_url(ASSET_URL_VAR, asset_url)?;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// URL for an API path such as `books/42`
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Resolve a stored `cover_path` to a fetchable URL.
    /// Absolute URLs are returned unchanged; blank paths have no URL.
    pub fn cover_url(&self, cover_path: &str) -> Option<Url> {
        let cover_path = cover_path.trim();
        if cover_path.is_empty() {
            return None;
        }
        if let Ok(url) = Url::parse(cover_path) {
            return Some(url);
        }
        with_trailing_slash(&self.asset_url)
            .join(cover_path.trim_start_matches('/'))
            .ok()
    }
}

fn parse_url(var: &str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidUrl {
        var: var.to_string(),
        message: format!("{} ({})", e, raw),
    })
}

fn origin_of(url: &Url) -> Url {
    let mut origin = url.clone();
    origin.set_path("/");
    origin.set_query(None);
    origin.set_fragment(None);
    origin
}

/// `Url::join` replaces the last segment unless the base ends with '/'
fn with_trailing_slash(url: &Url) -> Url {
    let mut base = url.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base
}
