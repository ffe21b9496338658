use crate::cache::CacheStore;
use crate::config::FilterConfig;
use crate::error::FetchError;
use crate::query;
use crate::ranking;
use crate::types::{GitHubSearchResponse, Repository};
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::header::ACCEPT;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_ENDPOINT: &str = "https://api.github.com/search/repositories";
const ACCEPT_GITHUB_V3: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!("gh-trending/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub endpoint: String,
    pub proxy: Option<String>,
    /// Honour HTTP(S)_PROXY from the environment when no explicit proxy is set.
    pub system_proxy: bool,
    pub timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        FetchOptions {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            proxy: None,
            system_proxy: true,
            timeout: Duration::from_secs(10),
        }
    }
}

/// Where a ranked result set came from.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Live(Vec<Repository>),
    Cached(Vec<Repository>),
    /// Live fetch failed and there was nothing usable in the cache.
    Empty,
}

impl FetchOutcome {
    pub fn repositories(&self) -> &[Repository] {
        match self {
            FetchOutcome::Live(repos) | FetchOutcome::Cached(repos) => repos,
            FetchOutcome::Empty => &[],
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, FetchOutcome::Live(_))
    }

    pub fn source(&self) -> &'static str {
        match self {
            FetchOutcome::Live(_) => "live",
            FetchOutcome::Cached(_) => "cached",
            FetchOutcome::Empty => "none",
        }
    }
}

pub struct Fetcher {
    client: reqwest::blocking::Client,
    endpoint: String,
    cache: CacheStore,
}

impl Fetcher {
    pub fn new(options: &FetchOptions, cache: CacheStore) -> Result<Self, FetchError> {
        let mut builder = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(options.timeout);

        if let Some(proxy) = &options.proxy {
            let proxy = reqwest::Proxy::all(proxy)
                .map_err(|e| FetchError::Client(format!("invalid proxy '{}': {}", proxy, e)))?;
            builder = builder.proxy(proxy);
        } else if !options.system_proxy {
            builder = builder.no_proxy();
        }

        let client = builder
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Fetcher {
            client,
            endpoint: options.endpoint.clone(),
            cache,
        })
    }

    /// Fetch and rank live data, falling back to the cache on any failure.
    pub fn fetch(&self, filter: &FilterConfig) -> FetchOutcome {
        self.fetch_at(filter, Utc::now())
    }

    fn fetch_at(&self, filter: &FilterConfig, now: DateTime<Utc>) -> FetchOutcome {
        match self.fetch_live(filter, now.date_naive()) {
            Ok(mut repos) => {
                ranking::rank(&mut repos, now);
                if let Err(e) = self.cache.save(&repos) {
                    warn!("could not update cache: {}", e);
                }
                info!(count = repos.len(), "fetched live data");
                FetchOutcome::Live(repos)
            }
            Err(e) => {
                warn!("failed to fetch live data ({}), using cache", e);
                self.fallback(now)
            }
        }
    }

    fn fetch_live(
        &self,
        filter: &FilterConfig,
        today: NaiveDate,
    ) -> Result<Vec<Repository>, FetchError> {
        let url = query::search_url(&self.endpoint, filter, today);
        debug!(%url, "querying search API");

        let resp = self
            .client
            .get(&url)
            .header(ACCEPT, ACCEPT_GITHUB_V3)
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = resp.text()?;
        let result: GitHubSearchResponse = serde_json::from_str(&body)?;
        if result.items.is_empty() {
            return Err(FetchError::Empty);
        }
        Ok(result.items)
    }

    fn fallback(&self, now: DateTime<Utc>) -> FetchOutcome {
        let mut repos = match self.cache.load() {
            Ok(repos) => repos,
            Err(e) => {
                warn!("cache unavailable: {}", e);
                return FetchOutcome::Empty;
            }
        };

        if repos.is_empty() {
            return FetchOutcome::Empty;
        }
        ranking::rank(&mut repos, now);
        info!(count = repos.len(), path = %self.cache.path().display(), "serving cached data");
        FetchOutcome::Cached(repos)
    }
}
