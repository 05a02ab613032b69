use std::collections::HashMap;

use feed_core::Article;
use tracing::debug;

use crate::tokenize::{is_numeric, tokenize};
use crate::vocabulary::{is_ai_word, is_stop_word, MIN_WORD_FREQUENCY, MIN_WORD_LENGTH};

pub const COMMON_TAGS: usize = 5;
pub const RARE_TAGS: usize = 3;
pub const MAX_TAGS: usize = COMMON_TAGS + RARE_TAGS;

/// Ranked tags split into the five most frequent and the three after them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    ranked: Vec<(String, usize)>,
}

impl TagSet {
    pub fn common(&self) -> impl Iterator<Item = &str> {
        self.ranked.iter().take(COMMON_TAGS).map(|(w, _)| w.as_str())
    }

    pub fn rare(&self) -> impl Iterator<Item = &str> {
        self.ranked.iter().skip(COMMON_TAGS).map(|(w, _)| w.as_str())
    }

    /// Tags with their corpus-wide counts, most frequent first.
    pub fn ranked(&self) -> &[(String, usize)] {
        &self.ranked
    }

    pub fn into_tags(self) -> Vec<String> {
        self.ranked.into_iter().map(|(w, _)| w).collect()
    }

    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }
}

fn is_candidate(token: &str) -> bool {
    token.len() >= MIN_WORD_LENGTH && !is_stop_word(token) && !is_numeric(token) && is_ai_word(token)
}

/// Counts allow-listed words across `articles` and ranks them.
///
/// Ties keep the order in which the words were first seen.
pub fn rank_tags<'a>(articles: impl IntoIterator<Item = &'a Article>) -> TagSet {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut scanned = 0;

    for article in articles {
        scanned += 1;
        let text = format!("{} {}", article.title, article.body);
        for token in tokenize(&text) {
            if !is_candidate(&token) {
                continue;
            }
            match index.get(&token) {
                Some(&slot) => counts[slot].1 += 1,
                None => {
                    index.insert(token.clone(), counts.len());
                    counts.push((token, 1));
                }
            }
        }
    }

    counts.retain(|(_, count)| *count >= MIN_WORD_FREQUENCY);
    // stable: equal counts stay in first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(MAX_TAGS);

    debug!("Extracted {} tags from {} articles", counts.len(), scanned);
    TagSet { ranked: counts }
}

/// Common tags followed by rare ones, at most eight.
pub fn extract_tags(articles: &[Article]) -> Vec<String> {
    rank_tags(articles).into_tags()
}
