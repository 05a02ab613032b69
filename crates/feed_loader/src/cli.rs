use clap::Args;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::LoaderConfig;

/// Where the feed comes from. Flags win over `NEWS_API_URL` /
/// `NEWS_DATA_DIR`.
#[derive(Args, Debug, Clone, Default)]
pub struct LoaderArgs {
    /// Base URL of the news API (e.g. http://localhost:8000)
    #[arg(long, global = true)]
    pub api_url: Option<String>,
    /// Directory holding news.json, academic.json, summary.json and meta.json
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
    /// API timeout in milliseconds
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,
}

impl LoaderArgs {
    /// Never fails: a rejected URL is logged and the previous one kept.
    pub fn into_config(self) -> LoaderConfig {
        let mut config = LoaderConfig::from_env();
        if let Some(url) = self.api_url {
            config = config.with_base_url_or_default(&url);
        }
        if let Some(dir) = self.data_dir {
            config = config.with_data_dir(dir);
        }
        if let Some(ms) = self.timeout_ms {
            config = config.with_api_timeout(Duration::from_millis(ms));
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override() {
        let args = LoaderArgs {
            api_url: Some("http://news.internal:9000".to_string()),
            data_dir: Some(PathBuf::from("/srv/feed")),
            timeout_ms: Some(500),
        };
        let config = args.into_config();
        assert_eq!(config.base_url.as_str(), "http://news.internal:9000/");
        assert_eq!(config.data_dir, PathBuf::from("/srv/feed"));
        assert_eq!(config.api_timeout, Duration::from_millis(500));
    }

    #[test]
    fn test_bad_flag_url_keeps_previous() {
        let args = LoaderArgs {
            api_url: Some("::".to_string()),
            data_dir: Some(PathBuf::from("/srv/feed")),
            ..Default::default()
        };
        let config = args.into_config();
        assert_eq!(config.base_url.scheme(), "http");
        assert_eq!(config.data_dir, PathBuf::from("/srv/feed"));
    }
}
