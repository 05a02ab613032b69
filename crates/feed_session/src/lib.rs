//! Reader-side state for the feed: debounced search input, the "load more"
//! window and the composed tag/search view over both collections.

pub mod debounce;
pub mod pagination;
pub mod session;

pub use debounce::{Debounce, Debouncer, SEARCH_DEBOUNCE};
pub use pagination::{Pagination, PAGE_SIZE};
pub use session::{FeedSession, FeedView, TagClick};
