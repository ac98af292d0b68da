use std::collections::HashSet;

use super::normalize::normalize;

const EXACT_MATCH: f64 = 1.0;
const PARTIAL_MATCH: f64 = 0.5;

/// Lexical relevance of `chunk` for `keywords`.
///
/// Every keyword earns 1.0 when it is one of the chunk's words, and another
/// 0.5 for each distinct chunk word that contains it or is contained by it.
/// An exact hit therefore scores 1.5. Repeated keywords count each time.
pub fn score_chunk(chunk: &str, keywords: &[String]) -> f64 {
    if keywords.is_empty() {
        return 0.0;
    }

    let normalized = normalize(chunk);
    let chunk_words: HashSet<&str> = normalized.split_whitespace().collect();

    keywords
        .iter()
        .map(|keyword| {
            let keyword = keyword.as_str();
            let exact = if chunk_words.contains(keyword) {
                EXACT_MATCH
            } else {
                0.0
            };
            let partial = chunk_words
                .iter()
                .filter(|word| word.contains(keyword) || keyword.contains(**word))
                .count() as f64
                * PARTIAL_MATCH;
            exact + partial
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kw(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_score_no_keywords_is_zero() {
        assert_eq!(score_chunk("anything at all", &[]), 0.0);
    }

    #[test]
    fn test_score_exact_match_includes_partial_bonus() {
        assert_eq!(score_chunk("Cats are mammals.", &kw(&["cats"])), 1.5);
    }

    #[test]
    fn test_score_partial_match_both_directions() {
        // "chat" is inside "chatting"; "chatbot" contains "chat"
        assert_eq!(score_chunk("we were chatting", &kw(&["chat"])), 0.5);
        assert_eq!(score_chunk("the chat window", &kw(&["chatbot"])), 0.5);
    }

    #[test]
    fn test_score_bonus_is_per_chunk_word() {
        // "a" and "at" are substrings of "cat"; "cat" matches exactly
        let score = score_chunk("a cat at cat", &kw(&["cat"]));
        assert_eq!(score, 1.0 + 3.0 * 0.5);
    }

    #[test]
    fn test_score_duplicate_keywords_count_twice() {
        let once = score_chunk("dogs bark", &kw(&["dogs"]));
        let twice = score_chunk("dogs bark", &kw(&["dogs", "dogs"]));
        assert_eq!(twice, once * 2.0);
    }

    #[test]
    fn test_score_unrelated_is_zero() {
        assert_eq!(score_chunk("cats are mammals.", &kw(&["dogs"])), 0.0);
        assert_eq!(score_chunk("", &kw(&["dogs"])), 0.0);
        assert_eq!(score_chunk("--- ...", &kw(&["dogs"])), 0.0);
    }
}
