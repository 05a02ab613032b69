pub mod error;
pub mod matcher;
pub mod source;
pub mod types;

pub use error::Error;
pub use matcher::FuzzyMatcher;
pub use source::ArticleSource;
pub use types::{Article, CollectionKind, FeedData, Meta, Summary};

pub type Result<T> = std::result::Result<T, Error>;
