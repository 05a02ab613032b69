//! Tag extraction and article narrowing for the feed.
//!
//! Everything here is a pure function of the article collection it is
//! given plus the fixed word lists in [`vocabulary`].

pub mod filter;
pub mod fuzzy;
pub mod tags;
pub mod tokenize;
pub mod vocabulary;

pub use filter::{count_tag_matches, filter_by_tag, matches_tag, narrow};
pub use fuzzy::{BitapMatcher, SearchHit, SearchKey, SearchOptions, Searcher};
pub use tags::{extract_tags, rank_tags, TagSet};
