use chrono::{DateTime, Utc};
use feed_core::{Article, CollectionKind, FeedData};
use feed_search::{count_tag_matches, narrow, rank_tags, Searcher, TagSet};
use tracing::{debug, info};

use crate::pagination::Pagination;

/// What a tag click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagClick {
    /// The tag is now selected; `switched` when the view moved to Academic
    /// because only that collection mentions the tag.
    Selected { switched: bool },
    /// The tag was already selected and has been cleared.
    Cleared,
}

/// Narrowed results of the active collection with the page window applied.
#[derive(Debug)]
pub struct FeedView<'a> {
    results: Vec<&'a Article>,
    shown: usize,
    has_more: bool,
    other_count: usize,
}

impl<'a> FeedView<'a> {
    /// The cards inside the current window.
    pub fn visible(&self) -> &[&'a Article] {
        &self.results[..self.shown]
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Matches across both collections, as shown beside the search box.
    pub fn result_count(&self) -> usize {
        self.results.len() + self.other_count
    }
}

/// View state of one reader: loaded collections, derived tags, the
/// committed query, the selected tag, the active collection and the
/// pagination window.
pub struct FeedSession {
    data: FeedData,
    tags: TagSet,
    searcher: Searcher,
    active: CollectionKind,
    query: String,
    tag: Option<String>,
    pagination: Pagination,
    show_summary: bool,
}

impl FeedSession {
    pub fn new(data: FeedData) -> Self {
        Self::with_searcher(data, Searcher::default())
    }

    pub fn with_searcher(data: FeedData, searcher: Searcher) -> Self {
        let tags = rank_tags(data.news.iter().chain(&data.academic));
        Self {
            data,
            tags,
            searcher,
            active: CollectionKind::News,
            query: String::new(),
            tag: None,
            pagination: Pagination::default(),
            show_summary: false,
        }
    }

    /// Swaps in freshly loaded data. Tags are recomputed and the window
    /// starts over; query, tag and collection stay as they were.
    pub fn replace_data(&mut self, data: FeedData) {
        self.tags = rank_tags(data.news.iter().chain(&data.academic));
        self.data = data;
        self.pagination.reset();
        info!(
            "Feed refreshed: {} news, {} academic, {} tags",
            self.data.news.len(),
            self.data.academic.len(),
            self.tags.len()
        );
    }

    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    pub fn active(&self) -> CollectionKind {
        self.active
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn selected_tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.data.last_updated
    }

    pub fn window(&self) -> usize {
        self.pagination.window()
    }

    /// Applies a committed (already debounced) search value.
    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query != self.query {
            debug!("Search committed: {:?}", query);
            self.query = query;
            self.pagination.reset();
        }
    }

    pub fn set_collection(&mut self, kind: CollectionKind) {
        if kind != self.active {
            self.active = kind;
            self.pagination.reset();
        }
    }

    pub fn toggle_collection(&mut self) -> CollectionKind {
        self.set_collection(self.active.toggled());
        self.active
    }

    fn set_tag(&mut self, tag: Option<String>) {
        if tag != self.tag {
            self.tag = tag;
            self.pagination.reset();
        }
    }

    /// Selects `tag`, or clears it when it is already selected. Selecting a
    /// tag no news article mentions, while some academic article does,
    /// moves the view to Academic.
    pub fn click_tag(&mut self, tag: &str) -> TagClick {
        if self.tag.as_deref() == Some(tag) {
            self.set_tag(None);
            return TagClick::Cleared;
        }
        self.set_tag(Some(tag.to_string()));

        let switched = self.active == CollectionKind::News
            && count_tag_matches(&self.data.news, tag) == 0
            && count_tag_matches(&self.data.academic, tag) > 0;
        if switched {
            self.set_collection(CollectionKind::Academic);
            info!("Switched to academic view for tag '{}'", tag);
        }
        TagClick::Selected { switched }
    }

    pub fn show_more(&mut self) {
        self.pagination.show_more();
    }

    /// Narrowed collection of `kind`: fuzzy search when a query is set,
    /// the tag filter otherwise.
    pub fn filtered(&self, kind: CollectionKind) -> Vec<&Article> {
        narrow(
            self.data.collection(kind),
            self.tag.as_deref(),
            &self.query,
            &self.searcher,
        )
    }

    pub fn results(&self) -> Vec<&Article> {
        self.filtered(self.active)
    }

    /// One snapshot of what the reader sees: the active collection is
    /// searched once and the other one only counted.
    pub fn view(&self) -> FeedView<'_> {
        let results = self.results();
        let other_count = self.filtered(self.active.toggled()).len();
        FeedView {
            shown: self.pagination.visible_len(results.len()),
            has_more: self.pagination.has_more(results.len()),
            results,
            other_count,
        }
    }

    pub fn toggle_summary(&mut self) -> bool {
        self.show_summary = !self.show_summary;
        self.show_summary
    }

    /// Summary text when the panel is open and there is something to show.
    pub fn summary_panel(&self) -> Option<&str> {
        if self.show_summary {
            self.data.summary.as_deref()
        } else {
            None
        }
    }

    /// Nothing loaded and no summary panel open.
    pub fn is_empty_state(&self) -> bool {
        self.data.is_empty() && !self.show_summary
    }
}
