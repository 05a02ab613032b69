use clap::{ArgAction, Parser, Subcommand};
use feed_core::{CollectionKind, Result};
use feed_loader::{init_logging, FeedLoader, LoaderArgs};
use feed_session::FeedSession;
use std::io::{stdout, IsTerminal};
use tracing::{info, Level};

mod browse;
mod render;

#[derive(Parser, Debug)]
#[command(author, version, about = "Browse the AI news feed from the terminal", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    loader: LoaderArgs,
    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// Disable colors
    #[arg(long, global = true)]
    plain: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the tags derived from both collections
    Tags,
    /// Print one page of cards
    List {
        /// Show the academic collection instead of news
        #[arg(long)]
        academic: bool,
        /// Only articles mentioning this tag
        #[arg(long)]
        tag: Option<String>,
        /// Fuzzy search over title and body; overrides --tag
        #[arg(long)]
        query: Option<String>,
        /// How many pages of 20 to show
        #[arg(long, default_value_t = 1)]
        pages: usize,
    },
    /// Print the AI-generated daily summary
    Summary,
    /// Check whether the news API is reachable
    Health,
    /// Interactive search, tags and paging
    Browse,
}

fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(log_level(cli.verbose));
    let styled = !cli.plain && stdout().is_terminal();

    let config = cli.loader.into_config();
    info!("📰 Loading feed from {} (fallback {})", config.base_url, config.data_dir.display());
    let loader = FeedLoader::new(&config)?;

    match cli.command {
        Commands::Health => {
            if loader.check_health().await {
                println!("API healthy at {}", config.base_url);
            } else {
                println!("API unreachable at {}", config.base_url);
            }
        }
        Commands::Tags => {
            let session = FeedSession::new(loader.load_feed().await);
            let tags = session.tags();
            if tags.is_empty() {
                println!("No tags.");
            }
            for (i, (tag, count)) in tags.ranked().iter().enumerate() {
                let kind = if i < feed_search::tags::COMMON_TAGS { "common" } else { "rare" };
                println!("{:>2}. {:<16} {:>4}  {}", i + 1, tag, count, kind);
            }
        }
        Commands::Summary => {
            let feed = loader.load_feed().await;
            match feed.summary {
                Some(summary) => println!("{}", summary),
                None => println!("No summary available."),
            }
        }
        Commands::List { academic, tag, query, pages } => {
            let mut session = FeedSession::new(loader.load_feed().await);
            if academic {
                session.set_collection(CollectionKind::Academic);
            }
            if let Some(tag) = tag {
                session.click_tag(&tag.to_lowercase());
            }
            if let Some(query) = query {
                session.set_query(query);
            }
            for _ in 1..pages.max(1) {
                session.show_more();
            }
            print!("{}", render::page(&session, styled));
        }
        Commands::Browse => {
            let session = FeedSession::new(loader.load_feed().await);
            browse::run(&loader, session, styled).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_list() {
        let cli = Cli::parse_from([
            "feed", "list", "--tag", "AI", "--pages", "2", "--data-dir", "/tmp/feed", "-vv",
        ]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.loader.data_dir.as_deref(), Some(std::path::Path::new("/tmp/feed")));
        match cli.command {
            Commands::List { tag, pages, academic, .. } => {
                assert_eq!(tag.as_deref(), Some("AI"));
                assert_eq!(pages, 2);
                assert!(!academic);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_log_level() {
        assert_eq!(log_level(0), Level::WARN);
        assert_eq!(log_level(5), Level::DEBUG);
    }
}
