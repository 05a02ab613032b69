//! Approximate matching for free-text search.
//!
//! `BitapMatcher` scores a pattern against a field the way bitap-style
//! matchers do: the fraction of the pattern that had to be edited, plus how
//! far the match starts from the expected location, scaled by `distance`.
//! With the default location of 0 and distance of 100, a perfect match must
//! start within the first 30 characters of a field to pass a 0.3 threshold.

use feed_core::{Article, FuzzyMatcher};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::tokenize::field_token_count;

pub const DEFAULT_THRESHOLD: f64 = 0.3;
pub const DEFAULT_DISTANCE: usize = 100;

/// Article fields free-text search looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchKey {
    Title,
    Body,
}

impl SearchKey {
    pub fn value(self, article: &Article) -> &str {
        match self {
            SearchKey::Title => &article.title,
            SearchKey::Body => &article.body,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOptions {
    pub keys: Vec<SearchKey>,
    /// Highest score still accepted; 0.0 demands a perfect match.
    pub threshold: f64,
    /// Characters of offset that cost a full point of score.
    pub distance: usize,
    /// Where in a field a match is expected to start.
    pub location: usize,
    pub ignore_location: bool,
    pub case_sensitive: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            keys: vec![SearchKey::Title, SearchKey::Body],
            threshold: DEFAULT_THRESHOLD,
            distance: DEFAULT_DISTANCE,
            location: 0,
            ignore_location: false,
            case_sensitive: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BitapMatcher {
    threshold: f64,
    distance: usize,
    location: usize,
    ignore_location: bool,
}

impl BitapMatcher {
    pub fn new(options: &SearchOptions) -> Self {
        Self {
            threshold: options.threshold,
            distance: options.distance,
            location: options.location,
            ignore_location: options.ignore_location,
        }
    }

    fn proximity_score(&self, errors: usize, start: usize, pattern_len: usize) -> f64 {
        let accuracy = errors as f64 / pattern_len as f64;
        if self.ignore_location {
            return accuracy;
        }
        let proximity = start.abs_diff(self.location);
        if self.distance == 0 {
            return if proximity > 0 { 1.0 } else { accuracy };
        }
        accuracy + proximity as f64 / self.distance as f64
    }

    /// Lowest score over every substring of `text`, via an edit-distance
    /// table that also tracks where each alignment starts.
    fn best_score(&self, pattern: &[char], text: &[char]) -> f64 {
        let m = pattern.len();
        // (edits, start) per pattern prefix, for the previous text column
        let mut prev: Vec<(usize, usize)> = (0..=m).map(|i| (i, 0)).collect();
        let mut best = self.proximity_score(m, 0, m);

        for (j, &tc) in text.iter().enumerate() {
            let mut col: Vec<(usize, usize)> = Vec::with_capacity(m + 1);
            col.push((0, j + 1));
            for i in 1..=m {
                let cost = usize::from(pattern[i - 1] != tc);
                let diag = (prev[i - 1].0 + cost, prev[i - 1].1);
                let up = (col[i - 1].0 + 1, col[i - 1].1);
                let left = (prev[i].0 + 1, prev[i].1);
                let cell = [diag, up, left]
                    .into_iter()
                    .min_by_key(|(edits, start)| (*edits, start.abs_diff(self.location)))
                    .unwrap_or(diag);
                col.push(cell);
            }

            let (edits, start) = col[m];
            let score = self.proximity_score(edits, start, m);
            if score < best {
                best = score;
                if best == 0.0 {
                    break;
                }
            }
            prev = col;
        }

        best
    }
}

impl Default for BitapMatcher {
    fn default() -> Self {
        Self::new(&SearchOptions::default())
    }
}

impl FuzzyMatcher for BitapMatcher {
    fn name(&self) -> &str {
        "bitap"
    }

    fn score(&self, pattern: &str, text: &str) -> Option<f64> {
        let pattern: Vec<char> = pattern.chars().collect();
        if pattern.is_empty() {
            return Some(0.0);
        }
        let text: Vec<char> = text.chars().collect();
        let score = self.best_score(&pattern, &text).min(1.0);
        (score <= self.threshold).then_some(score)
    }
}

/// One article that survived free-text search.
#[derive(Debug, Clone)]
pub struct SearchHit<'a> {
    pub article: &'a Article,
    /// Position in the searched collection.
    pub index: usize,
    /// Combined matcher score, lower is better.
    pub score: f64,
}

impl SearchHit<'_> {
    pub fn relevance(&self) -> f64 {
        1.0 - self.score
    }
}

/// Free-text search over a collection, backed by any `FuzzyMatcher`.
pub struct Searcher {
    options: SearchOptions,
    matcher: Box<dyn FuzzyMatcher>,
}

impl Searcher {
    pub fn new(options: SearchOptions) -> Self {
        let matcher = Box::new(BitapMatcher::new(&options));
        Self { options, matcher }
    }

    pub fn with_matcher(options: SearchOptions, matcher: Box<dyn FuzzyMatcher>) -> Self {
        Self { options, matcher }
    }

    fn field_score(&self, pattern: &str, text: &str) -> Option<f64> {
        if text.is_empty() {
            return None;
        }
        if self.options.case_sensitive {
            self.matcher.score(pattern, text)
        } else {
            self.matcher.score(pattern, &text.to_lowercase())
        }
    }

    /// Articles matching `query` in any key, most relevant first. Equal
    /// scores keep collection order. An empty query matches nothing.
    pub fn search<'a>(&self, articles: &'a [Article], query: &str) -> Vec<SearchHit<'a>> {
        if query.is_empty() || self.options.keys.is_empty() {
            return Vec::new();
        }
        let pattern = if self.options.case_sensitive {
            query.to_string()
        } else {
            query.to_lowercase()
        };
        let weight = 1.0 / self.options.keys.len() as f64;

        let mut hits: Vec<SearchHit<'a>> = articles
            .iter()
            .enumerate()
            .filter_map(|(index, article)| {
                let mut total = 1.0;
                let mut matched = false;
                for key in &self.options.keys {
                    let text = key.value(article);
                    if let Some(score) = self.field_score(&pattern, text) {
                        matched = true;
                        let score = if score == 0.0 { f64::EPSILON } else { score };
                        total *= score.powf(weight * field_norm(text));
                    }
                }
                matched.then_some(SearchHit { article, index, score: total })
            })
            .collect();

        hits.sort_by(|a, b| {
            a.score
                .partial_cmp(&b.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.index.cmp(&b.index))
        });

        debug!(
            "{} search for {:?} matched {}/{} articles",
            self.matcher.name(),
            query,
            hits.len(),
            articles.len()
        );
        hits
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(SearchOptions::default())
    }
}

/// Longer fields weigh less: `1 / sqrt(tokens)`, rounded to three places.
fn field_norm(text: &str) -> f64 {
    let norm = 1.0 / (field_token_count(text) as f64).sqrt();
    (norm * 1000.0).round() / 1000.0
}
