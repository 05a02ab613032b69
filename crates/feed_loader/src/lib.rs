//! Data Loader: live API first, bundled JSON snapshot second, empty last.

pub mod api;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod loader;
pub mod logging;

pub use api::ApiSource;
pub use cli::LoaderArgs;
pub use config::LoaderConfig;
pub use dataset::{StaticDataset, StaticSource};
pub use loader::FeedLoader;
pub use logging::{init_logging, Logger};
