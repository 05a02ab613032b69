use async_trait::async_trait;
use feed_core::{Article, ArticleSource, CollectionKind, Meta, Result, Summary};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const SUMMARY_FILE: &str = "summary.json";
pub const META_FILE: &str = "meta.json";

/// Directory of bundled JSON snapshots used when the API is unavailable.
#[derive(Debug, Clone)]
pub struct StaticDataset {
    dir: PathBuf,
}

impl StaticDataset {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn read_json<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let content = tokio::fs::read_to_string(self.dir.join(name)).await?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Articles of one collection. A file whose top level is not an array
    /// holds no articles.
    pub async fn articles(&self, kind: CollectionKind) -> Result<Vec<Article>> {
        let value: Value = self.read_json(kind.file_name()).await?;
        if !value.is_array() {
            warn!("{} is not a JSON array, treating it as empty", kind.file_name());
            return Ok(Vec::new());
        }
        Ok(serde_json::from_value(value)?)
    }

    pub async fn summary(&self) -> Result<Option<String>> {
        let summary: Summary = self.read_json(SUMMARY_FILE).await?;
        Ok(summary.summary.filter(|s| !s.trim().is_empty()))
    }

    pub async fn meta(&self) -> Result<Meta> {
        self.read_json(META_FILE).await
    }
}

/// One collection of a [`StaticDataset`] exposed as an [`ArticleSource`].
#[derive(Debug, Clone)]
pub struct StaticSource {
    dataset: StaticDataset,
    kind: CollectionKind,
}

impl StaticSource {
    pub fn new(dataset: StaticDataset, kind: CollectionKind) -> Self {
        Self { dataset, kind }
    }
}

#[async_trait]
impl ArticleSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch_articles(&self) -> Result<Vec<Article>> {
        self.dataset.articles(self.kind).await
    }
}
