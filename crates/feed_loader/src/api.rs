use async_trait::async_trait;
use feed_core::{Article, ArticleSource, Error, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use url::Url;

use crate::config::LoaderConfig;

/// Live article list served by the backend's `/api/news`.
#[derive(Debug, Clone)]
pub struct ApiSource {
    client: Client,
    news_url: Url,
    health_url: Url,
    health_timeout: Duration,
}

impl ApiSource {
    /// The client carries no request timeout of its own; `FeedLoader`
    /// applies the API deadline around each fetch.
    pub fn new(config: &LoaderConfig) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            news_url: config.news_url()?,
            health_url: config.health_url()?,
            health_timeout: config.health_timeout,
        })
    }

    pub fn news_url(&self) -> &Url {
        &self.news_url
    }

    /// True when `/api/health` answers 2xx within the health timeout.
    pub async fn check_health(&self) -> bool {
        let request = self.client.get(self.health_url.clone()).send();
        match tokio::time::timeout(self.health_timeout, request).await {
            Ok(Ok(response)) => response.status().is_success(),
            _ => false,
        }
    }
}

#[async_trait]
impl ArticleSource for ApiSource {
    fn name(&self) -> &str {
        "api"
    }

    async fn fetch_articles(&self) -> Result<Vec<Article>> {
        let response = self
            .client
            .get(self.news_url.clone())
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status(status.as_u16()));
        }

        Ok(response.json::<Vec<Article>>().await?)
    }
}
