//! Plain-text cards for the terminal.

use chrono::{DateTime, Utc};
use crossterm::style::Stylize;
use feed_core::Article;
use feed_session::FeedSession;
use scraper::Html;
use std::fmt::Write;

const BODY_PREVIEW_CHARS: usize = 280;

pub const EMPTY_MESSAGE: &str =
    "No news articles available at the moment. The data might still be generating.";

/// Decodes HTML entities (`&amp;`, `&#39;`, ...) and leaves markup as text.
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    let escaped = text.replace('<', "&lt;");
    Html::parse_fragment(&escaped).root_element().text().collect()
}

pub fn format_date(date: Option<DateTime<Utc>>) -> String {
    date.map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_default()
}

fn preview(text: &str, max: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max {
        return flat;
    }
    let cut: String = flat.chars().take(max).collect();
    format!("{}...", cut.trim_end())
}

/// What one card shows, before styling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub title: String,
    pub body: String,
    pub byline: String,
    pub url: String,
}

impl CardView {
    pub fn new(article: &Article) -> Self {
        let date = format_date(article.published_at);
        let byline = match (article.source.is_empty(), date.is_empty()) {
            (false, false) => format!("{} • {}", article.source, date),
            (false, true) => article.source.clone(),
            (true, _) => date,
        };
        Self {
            title: decode_entities(&article.title),
            body: preview(&decode_entities(article.display_body()), BODY_PREVIEW_CHARS),
            byline,
            url: article.url.clone(),
        }
    }

    pub fn render(&self, styled: bool) -> String {
        let mut out = String::new();
        if styled {
            let _ = writeln!(out, "{}", self.title.as_str().bold());
        } else {
            let _ = writeln!(out, "{}", self.title);
        }
        if !self.body.is_empty() {
            let _ = writeln!(out, "  {}", self.body);
        }
        if styled {
            let _ = writeln!(out, "  {}", self.byline.as_str().dark_grey());
        } else {
            let _ = writeln!(out, "  {}", self.byline);
        }
        if !self.url.is_empty() {
            let _ = writeln!(out, "  read more: {}", self.url);
        }
        out
    }
}

/// Common tags, then the rare ones after a `|`. The selected tag is
/// bracketed.
pub fn tag_bar(session: &FeedSession) -> String {
    let selected = session.selected_tag();
    let mark = |tag: &str| {
        if Some(tag) == selected {
            format!("[{}]", tag)
        } else {
            tag.to_string()
        }
    };
    let tags = session.tags();
    let common: Vec<String> = tags.common().map(mark).collect();
    let rare: Vec<String> = tags.rare().map(mark).collect();
    if rare.is_empty() {
        common.join("  ")
    } else {
        format!("{}  |  {}", common.join("  "), rare.join("  "))
    }
}

pub fn footer(last_updated: Option<DateTime<Utc>>) -> String {
    match last_updated {
        Some(date) => format!("Last updated: {}", date.format("%Y-%m-%d %H:%M UTC")),
        None => "Last updated: Loading...".to_string(),
    }
}

/// Summary panel, tag bar, result counter, the visible cards and footer.
pub fn page(session: &FeedSession, styled: bool) -> String {
    let mut out = String::new();

    if let Some(summary) = session.summary_panel() {
        let _ = writeln!(out, "your daily ai news summary\n{}\n", summary);
    }

    let tags = tag_bar(session);
    if !tags.is_empty() {
        let _ = writeln!(out, "tags: {}", tags);
    }
    let view = session.view();
    let _ = writeln!(
        out,
        "{} results · showing {}{}",
        view.result_count(),
        session.active(),
        if session.query().is_empty() {
            String::new()
        } else {
            format!(" · search {:?}", session.query())
        }
    );

    if session.is_empty_state() {
        let _ = writeln!(out, "\n{}", EMPTY_MESSAGE);
    }

    for article in view.visible() {
        let _ = writeln!(out);
        out.push_str(&CardView::new(article).render(styled));
    }

    if view.has_more() {
        let _ = writeln!(out, "\n(more results: use :more)");
    }
    let _ = writeln!(out, "\n{}", footer(session.last_updated()));
    out
}
