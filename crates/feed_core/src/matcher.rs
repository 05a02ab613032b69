/// Approximate string matching backend used by free-text search.
///
/// Scores live in `[0, 1]` with `0.0` a perfect match. `None` means the
/// best alignment was worse than the matcher's threshold.
pub trait FuzzyMatcher: Send + Sync {
    fn name(&self) -> &str;

    fn score(&self, pattern: &str, text: &str) -> Option<f64>;
}
