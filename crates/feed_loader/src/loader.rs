use chrono::Utc;
use feed_core::{Article, ArticleSource, CollectionKind, Error, FeedData, Result};
use std::time::Duration;

use crate::api::ApiSource;
use crate::config::LoaderConfig;
use crate::dataset::{StaticDataset, StaticSource};
use crate::logging::Logger;

/// Fetches the primary collection with a deadline and falls back to the
/// bundled snapshot. Public entry points never fail: every error degrades
/// to the fallback, then to an empty collection.
pub struct FeedLoader {
    primary: Box<dyn ArticleSource>,
    fallback: Box<dyn ArticleSource>,
    dataset: StaticDataset,
    api: Option<ApiSource>,
    timeout: Duration,
    logger: Logger,
}

impl FeedLoader {
    pub fn new(config: &LoaderConfig) -> Result<Self> {
        let api = ApiSource::new(config)?;
        let dataset = StaticDataset::new(&config.data_dir);
        Ok(Self {
            primary: Box::new(api.clone()),
            fallback: Box::new(StaticSource::new(dataset.clone(), CollectionKind::News)),
            dataset,
            api: Some(api),
            timeout: config.api_timeout,
            logger: Logger::new().with_prefix("[loader]"),
        })
    }

    /// Loader over arbitrary sources. Health checks report false.
    pub fn with_sources(
        primary: Box<dyn ArticleSource>,
        fallback: Box<dyn ArticleSource>,
        dataset: StaticDataset,
        timeout: Duration,
    ) -> Self {
        Self {
            primary,
            fallback,
            dataset,
            api: None,
            timeout,
            logger: Logger::new().with_prefix("[loader]"),
        }
    }

    /// Loader prefix followed by the source's own, e.g. `[loader] [api]`.
    fn source_logger(&self, source: &dyn ArticleSource) -> Logger {
        self.logger.clone().with_prefix(format!("[{}]", source.name()))
    }

    async fn fetch_primary(&self) -> Result<Vec<Article>> {
        // dropping the timed-out future cancels the request
        tokio::time::timeout(self.timeout, self.primary.fetch_articles())
            .await
            .map_err(|_| Error::Timeout(self.timeout))?
    }

    async fn fetch_fallback(&self) -> Vec<Article> {
        let logger = self.source_logger(self.fallback.as_ref());
        match self.fallback.fetch_articles().await {
            Ok(articles) => {
                logger.info(&format!("Loaded {} fallback articles", articles.len()));
                articles
            }
            Err(e) => {
                logger.error(&format!("Failed to load fallback data: {}", e));
                Vec::new()
            }
        }
    }

    /// Primary articles, or the fallback snapshot when the primary source
    /// errors or misses its deadline. No retry.
    pub async fn load_articles(&self) -> Vec<Article> {
        let logger = self.source_logger(self.primary.as_ref());
        match self.fetch_primary().await {
            Ok(articles) => {
                logger.info(&format!("Fetched news: {} items", articles.len()));
                articles
            }
            Err(Error::Timeout(after)) => {
                logger.warn(&format!(
                    "API request timed out after {} seconds, falling back to static JSON",
                    after.as_secs_f32()
                ));
                self.fetch_fallback().await
            }
            Err(e) => {
                logger.warn(&format!(
                    "API request failed, falling back to static JSON: {}",
                    e
                ));
                self.fetch_fallback().await
            }
        }
    }

    /// Bundled collection of `kind`, empty when unreadable.
    pub async fn load_static(&self, kind: CollectionKind) -> Vec<Article> {
        match self.dataset.articles(kind).await {
            Ok(articles) => articles,
            Err(e) => {
                self.logger
                    .warn(&format!("Could not read {}: {}", kind.file_name(), e));
                Vec::new()
            }
        }
    }

    /// Both collections plus the summary and last-updated stamp. A readable
    /// `meta.json` without a timestamp counts as updated now.
    pub async fn load_feed(&self) -> FeedData {
        let news = self.load_articles().await;
        let academic = self.load_static(CollectionKind::Academic).await;

        let summary = self.dataset.summary().await.unwrap_or_else(|e| {
            self.logger.debug(&format!("No summary available: {}", e));
            None
        });
        let last_updated = match self.dataset.meta().await {
            Ok(meta) => Some(meta.last_updated.unwrap_or_else(Utc::now)),
            Err(e) => {
                self.logger.debug(&format!("No metadata available: {}", e));
                None
            }
        };

        FeedData {
            news,
            academic,
            summary,
            last_updated,
        }
    }

    pub async fn check_health(&self) -> bool {
        match &self.api {
            Some(api) => api.check_health().await,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_server::{closed_port, serve, stall};
    use async_trait::async_trait;
    use std::fs;

    struct FakeSource {
        delay: Duration,
        articles: Option<Vec<Article>>,
    }

    #[async_trait]
    impl ArticleSource for FakeSource {
        fn name(&self) -> &str {
            "fake"
        }

        async fn fetch_articles(&self) -> Result<Vec<Article>> {
            tokio::time::sleep(self.delay).await;
            self.articles
                .clone()
                .ok_or_else(|| Error::Dataset("fake failure".to_string()))
        }
    }

    fn titled(titles: &[&str]) -> Vec<Article> {
        titles
            .iter()
            .map(|t| Article {
                title: t.to_string(),
                ..Default::default()
            })
            .collect()
    }

    fn fake(delay_ms: u64, articles: Option<Vec<Article>>) -> Box<dyn ArticleSource> {
        Box::new(FakeSource {
            delay: Duration::from_millis(delay_ms),
            articles,
        })
    }

    fn loader(primary: Box<dyn ArticleSource>, fallback: Box<dyn ArticleSource>) -> FeedLoader {
        FeedLoader::with_sources(
            primary,
            fallback,
            StaticDataset::new("/nonexistent"),
            Duration::from_millis(3000),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_primary_returns_fallback_exactly() {
        let snapshot = titled(&["from disk", "also from disk"]);
        let loader = loader(
            fake(5000, Some(titled(&["too late"]))),
            fake(0, Some(snapshot.clone())),
        );
        assert_eq!(loader.load_articles().await, snapshot);
    }

    #[tokio::test(start_paused = true)]
    async fn test_primary_just_in_time() {
        let loader = loader(
            fake(2999, Some(titled(&["live"]))),
            fake(0, Some(titled(&["disk"]))),
        );
        assert_eq!(loader.load_articles().await, titled(&["live"]));
    }

    #[tokio::test]
    async fn test_failing_primary_returns_fallback() {
        let loader = loader(fake(0, None), fake(0, Some(titled(&["disk"]))));
        assert_eq!(loader.load_articles().await, titled(&["disk"]));
    }

    #[tokio::test]
    async fn test_both_failing_returns_empty() {
        let loader = loader(fake(0, None), fake(0, None));
        assert!(loader.load_articles().await.is_empty());
        assert!(!loader.check_health().await);
    }

    #[tokio::test]
    async fn test_load_feed_from_dataset_when_api_down() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("news.json"),
            r#"[{"title": "Fallback news", "body": "", "source": "s", "url": "u", "published_at": "2024-01-01"}]"#,
        )
        .unwrap();
        fs::write(dir.path().join("academic.json"), "[]").unwrap();
        fs::write(dir.path().join("summary.json"), r#"{"summary": "Quiet day."}"#).unwrap();
        fs::write(dir.path().join("meta.json"), "{}").unwrap();

        let config = LoaderConfig::default()
            .with_base_url(&closed_port().await)
            .unwrap()
            .with_data_dir(dir.path());
        let loader = FeedLoader::new(&config).unwrap();
        let feed = loader.load_feed().await;

        assert_eq!(feed.news.len(), 1);
        assert_eq!(feed.news[0].title, "Fallback news");
        assert!(feed.academic.is_empty());
        assert_eq!(feed.summary.as_deref(), Some("Quiet day."));
        assert!(feed.last_updated.is_some());
        assert!(!loader.check_health().await);
    }

    #[tokio::test]
    async fn test_load_feed_prefers_api() {
        let base = serve("200 OK", r#"[{"title": "Live one"}, {"title": "Live two"}]"#).await;
        let dir = tempfile::tempdir().unwrap();
        let config = LoaderConfig::default()
            .with_base_url(&base)
            .unwrap()
            .with_data_dir(dir.path());
        let loader = FeedLoader::new(&config).unwrap();
        let feed = loader.load_feed().await;

        assert_eq!(feed.news.len(), 2);
        assert!(feed.academic.is_empty());
        assert!(feed.summary.is_none());
        assert!(feed.last_updated.is_none());
        assert!(loader.check_health().await);
    }

    #[tokio::test]
    async fn test_unanswered_request_reports_timeout() {
        let config = LoaderConfig::default()
            .with_base_url(&stall().await)
            .unwrap()
            .with_api_timeout(Duration::from_millis(100));
        let loader = FeedLoader::new(&config).unwrap();
        assert!(matches!(
            loader.fetch_primary().await,
            Err(Error::Timeout(after)) if after == Duration::from_millis(100)
        ));
    }

    #[tokio::test]
    async fn test_malformed_env_url_still_loads_dataset() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("news.json"),
            r#"[{"title": "Snapshot story", "body": "b", "source": "s", "url": "u"}]"#,
        )
        .unwrap();

        let config = LoaderConfig::from_vars(
            Some("localhost:8000/typo".to_string()),
            Some(dir.path().display().to_string()),
        );
        let loader = FeedLoader::new(&config).unwrap();

        let news = loader.load_static(CollectionKind::News).await;
        assert_eq!(news.len(), 1);
        assert_eq!(news[0].title, "Snapshot story");
    }

    #[test]
    fn test_source_prefixes() {
        let loader = FeedLoader::new(&LoaderConfig::default()).unwrap();
        let primary = loader.source_logger(loader.primary.as_ref());
        let fallback = loader.source_logger(loader.fallback.as_ref());
        assert_eq!(primary.format("up"), "[loader] [api] up");
        assert_eq!(fallback.format("read"), "[loader] [static] read");
    }
}
