/// Word characters are ASCII letters, digits and `_`. Everything else,
/// non-ASCII letters included, separates tokens.
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Lowercases `text` and splits it on runs of non-word characters.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !is_word_char(c))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn is_numeric(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// Case-insensitive substring check; an empty needle always matches.
pub fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Whitespace-delimited token count, never below one.
pub fn field_token_count(text: &str) -> usize {
    text.split_whitespace().count().max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_splits_on_punctuation() {
        assert_eq!(
            tokenize("OpenAI's GPT-4: new LLM!"),
            vec!["openai", "s", "gpt", "4", "new", "llm"]
        );
    }

    #[test]
    fn test_tokenize_non_ascii_letters_split() {
        assert_eq!(tokenize("café ai"), vec!["caf", "ai"]);
    }

    #[test]
    fn test_tokenize_keeps_underscores() {
        assert_eq!(tokenize("snake_case"), vec!["snake_case"]);
    }

    #[test]
    fn test_is_numeric() {
        assert!(is_numeric("2024"));
        assert!(!is_numeric("gpt4"));
        assert!(!is_numeric(""));
    }

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("New NVIDIA chips", "nvidia"));
        assert!(contains_ignore_case("", ""));
        assert!(!contains_ignore_case("", "ai"));
    }
}
