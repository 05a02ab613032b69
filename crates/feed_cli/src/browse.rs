use feed_core::Result;
use feed_loader::FeedLoader;
use feed_session::{Debouncer, FeedSession, TagClick, SEARCH_DEBOUNCE};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::render;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Raw search text, committed after the debounce period
    Search(String),
    Tag(String),
    Toggle,
    More,
    Summary,
    Refresh,
    Clear,
    Help,
    Quit,
    Unknown(String),
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(rest) = line.trim_start().strip_prefix(':') else {
        return Command::Search(line.trim().to_string());
    };
    let mut parts = rest.splitn(2, char::is_whitespace);
    let name = parts.next().unwrap_or_default();
    let arg = parts.next().map(str::trim).unwrap_or_default();
    match name {
        "tag" | "t" if !arg.is_empty() => Command::Tag(arg.to_lowercase()),
        "toggle" => Command::Toggle,
        "more" | "m" => Command::More,
        "summary" => Command::Summary,
        "refresh" => Command::Refresh,
        "clear" => Command::Clear,
        "help" | "h" => Command::Help,
        "quit" | "q" => Command::Quit,
        _ => Command::Unknown(rest.to_string()),
    }
}

const HELP: &str = "\
type to search (committed after 300ms of quiet)
  :tag <name>   select / clear a tag
  :toggle       switch between News and Academic
  :more         show 20 more results
  :summary      show / hide the AI summary
  :refresh      reload the feed
  :clear        clear the search
  :quit         leave";

/// Interactive loop over stdin. Search lines go through the debouncer;
/// colon commands act on the session immediately.
pub async fn run(loader: &FeedLoader, mut session: FeedSession, styled: bool) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut debouncer: Debouncer<String> = Debouncer::spawn(SEARCH_DEBOUNCE);

    println!("{}", HELP);
    print!("{}", render::page(&session, styled));

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match parse_command(&line) {
                    Command::Search(text) => {
                        debouncer.push(text);
                        continue;
                    }
                    Command::Clear => {
                        debouncer.push(String::new());
                        continue;
                    }
                    Command::Tag(tag) => {
                        if let TagClick::Selected { switched: true } = session.click_tag(&tag) {
                            println!("Switched to academic view for tag '{}'", tag);
                        }
                    }
                    Command::Toggle => {
                        session.toggle_collection();
                    }
                    Command::More => session.show_more(),
                    Command::Summary => {
                        if session.toggle_summary() && session.summary_panel().is_none() {
                            println!("No summary available.");
                        }
                    }
                    Command::Refresh => session.replace_data(loader.load_feed().await),
                    Command::Help => {
                        println!("{}", HELP);
                        continue;
                    }
                    Command::Quit => break,
                    Command::Unknown(cmd) => {
                        println!("unknown command :{} (try :help)", cmd);
                        continue;
                    }
                }
                print!("{}", render::page(&session, styled));
            }
            Some(query) = debouncer.next_commit() => {
                debug!("Committed search {:?}", query);
                session.set_query(query);
                print!("{}", render::page(&session, styled));
            }
        }
    }

    Ok(())
}
