use feed_core::Article;

use crate::fuzzy::Searcher;
use crate::tokenize::contains_ignore_case;

/// True when the article's title or body contains `tag`, ignoring case.
pub fn matches_tag(article: &Article, tag: &str) -> bool {
    let tag = tag.to_lowercase();
    contains_ignore_case(&article.title, &tag) || contains_ignore_case(&article.body, &tag)
}

/// Articles mentioning `tag`, in collection order. `None` keeps everything.
pub fn filter_by_tag<'a>(articles: &'a [Article], tag: Option<&str>) -> Vec<&'a Article> {
    match tag {
        None => articles.iter().collect(),
        Some(tag) => articles.iter().filter(|a| matches_tag(a, tag)).collect(),
    }
}

pub fn count_tag_matches(articles: &[Article], tag: &str) -> usize {
    articles.iter().filter(|a| matches_tag(a, tag)).count()
}

/// The feed's narrowing pipeline.
///
/// A non-empty query searches the whole collection and the selected tag is
/// ignored for that query. Otherwise the tag filter result stands in
/// collection order.
pub fn narrow<'a>(
    articles: &'a [Article],
    tag: Option<&str>,
    query: &str,
    searcher: &Searcher,
) -> Vec<&'a Article> {
    if !query.is_empty() {
        return searcher
            .search(articles, query)
            .into_iter()
            .map(|hit| hit.article)
            .collect();
    }
    filter_by_tag(articles, tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str, body: &str) -> Article {
        Article {
            title: title.to_string(),
            body: body.to_string(),
            ..Default::default()
        }
    }

    fn corpus() -> Vec<Article> {
        vec![
            article("AI chips", "nvidia"),
            article("Weather", "rain all week"),
            article("Robots", "new ai lab opens"),
            article("", ""),
        ]
    }

    #[test]
    fn test_none_is_identity() {
        let articles = corpus();
        let filtered = filter_by_tag(&articles, None);
        assert_eq!(filtered.len(), articles.len());
        for (a, b) in filtered.iter().zip(articles.iter()) {
            assert!(std::ptr::eq(*a, b));
        }
    }

    #[test]
    fn test_tag_case_insensitive() {
        let articles = corpus();
        let upper = filter_by_tag(&articles, Some("AI"));
        let lower = filter_by_tag(&articles, Some("ai"));
        assert_eq!(upper, lower);
        // "rain" contains "ai" too: plain substring semantics
        assert_eq!(upper.len(), 3);
    }

    #[test]
    fn test_tag_matches_body_only_articles() {
        let articles = corpus();
        let filtered = filter_by_tag(&articles, Some("nvidia"));
        assert_eq!(filtered, vec![&articles[0]]);
        assert_eq!(count_tag_matches(&articles, "NVIDIA"), 1);
    }

    #[test]
    fn test_empty_collection() {
        assert!(filter_by_tag(&[], Some("ai")).is_empty());
        assert!(narrow(&[], Some("ai"), "robots", &Searcher::default()).is_empty());
    }

    #[test]
    fn test_query_supersedes_tag() {
        let articles = corpus();
        let searcher = Searcher::default();
        let narrowed = narrow(&articles, Some("nvidia"), "robots", &searcher);
        assert_eq!(narrowed, vec![&articles[2]]);
    }

    #[test]
    fn test_empty_query_uses_tag_filter() {
        let articles = corpus();
        let narrowed = narrow(&articles, Some("nvidia"), "", &Searcher::default());
        assert_eq!(narrowed, vec![&articles[0]]);
        let all = narrow(&articles, None, "", &Searcher::default());
        assert_eq!(all.len(), 4);
    }
}
