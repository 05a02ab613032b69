use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// One news item as served by `/api/news` or the bundled datasets.
///
/// Text fields that are missing or `null` in the JSON come through as empty
/// strings so matching code never has to care.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub source: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
    #[serde(default, deserialize_with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hn_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_position: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_serper: Option<bool>,
}

impl Article {
    /// Text shown on a card: the summary when there is one, the body otherwise.
    pub fn display_body(&self) -> &str {
        match self.summary.as_deref() {
            Some(summary) if !summary.is_empty() => summary,
            _ => &self.body,
        }
    }
}

/// Which of the two article collections a view is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    #[default]
    News,
    Academic,
}

impl CollectionKind {
    pub fn toggled(self) -> Self {
        match self {
            CollectionKind::News => CollectionKind::Academic,
            CollectionKind::Academic => CollectionKind::News,
        }
    }

    /// Name of the bundled dataset holding this collection.
    pub fn file_name(self) -> &'static str {
        match self {
            CollectionKind::News => "news.json",
            CollectionKind::Academic => "academic.json",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectionKind::News => write!(f, "News"),
            CollectionKind::Academic => write!(f, "Academic"),
        }
    }
}

/// Contents of `summary.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Summary {
    #[serde(default)]
    pub summary: Option<String>,
}

/// Contents of `meta.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default, deserialize_with = "timestamp")]
    pub last_updated: Option<DateTime<Utc>>,
}

/// Everything a feed session needs. Replaced as a whole on refresh.
#[derive(Debug, Clone, Default)]
pub struct FeedData {
    pub news: Vec<Article>,
    pub academic: Vec<Article>,
    pub summary: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl FeedData {
    pub fn collection(&self, kind: CollectionKind) -> &[Article] {
        match kind {
            CollectionKind::News => &self.news,
            CollectionKind::Academic => &self.academic,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.news.is_empty() && self.academic.is_empty()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn timestamp<'de, D>(deserializer: D) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .as_deref()
        .and_then(parse_timestamp))
}

/// Parses the timestamp shapes the backend emits. Naive values are UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
