use async_trait::async_trait;
use crate::types::Article;
use crate::Result;

#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Short name used in log lines
    fn name(&self) -> &str;

    /// Fetch the whole collection this source serves
    async fn fetch_articles(&self) -> Result<Vec<Article>>;
}
