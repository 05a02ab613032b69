use std::path::PathBuf;
use std::time::Duration;

use feed_core::{Error, Result};
use tracing::warn;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const API_URL_ENV: &str = "NEWS_API_URL";
pub const DATA_DIR_ENV: &str = "NEWS_DATA_DIR";

pub const API_TIMEOUT: Duration = Duration::from_millis(3000);
pub const HEALTH_TIMEOUT: Duration = Duration::from_millis(2000);
pub const FETCH_LIMIT: usize = 1000;

#[derive(Debug, Clone)]
pub struct LoaderConfig {
    pub base_url: Url,
    pub data_dir: PathBuf,
    pub api_timeout: Duration,
    pub health_timeout: Duration,
    pub fetch_limit: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            api_timeout: API_TIMEOUT,
            health_timeout: HEALTH_TIMEOUT,
            fetch_limit: FETCH_LIMIT,
        }
    }
}

impl LoaderConfig {
    /// Defaults overridden by `NEWS_API_URL` and `NEWS_DATA_DIR` when set.
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var(API_URL_ENV).ok(),
            std::env::var(DATA_DIR_ENV).ok(),
        )
    }

    /// Blank values are ignored. An unusable API URL is logged and the
    /// default kept, so the static fallback still gets its turn.
    pub fn from_vars(api_url: Option<String>, data_dir: Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            config = config.with_base_url_or_default(&url);
        }
        if let Some(dir) = data_dir.filter(|d| !d.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }
        config
    }

    /// Like [`with_base_url`](Self::with_base_url) but keeps the current
    /// URL when `url` is rejected.
    pub fn with_base_url_or_default(self, url: &str) -> Self {
        match self.clone().with_base_url(url) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring API URL {:?} ({}), using {}", url, e, self.base_url);
                self
            }
        }
    }

    pub fn with_base_url(mut self, url: &str) -> Result<Self> {
        let parsed = Url::parse(url.trim())?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::InvalidUrl(format!("unsupported scheme: {}", url)));
        }
        self.base_url = parsed;
        Ok(self)
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_api_timeout(mut self, timeout: Duration) -> Self {
        self.api_timeout = timeout;
        self
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{}/{}", base, path))?)
    }

    /// `{base}/api/news?limit=1000`
    pub fn news_url(&self) -> Result<Url> {
        let mut url = self.endpoint("api/news")?;
        url.query_pairs_mut()
            .append_pair("limit", &self.fetch_limit.to_string());
        Ok(url)
    }

    pub fn health_url(&self) -> Result<Url> {
        self.endpoint("api/health")
    }
}
