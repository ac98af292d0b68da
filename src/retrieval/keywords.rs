use super::normalize::normalize;

/// Common English function words ignored when building a query.
pub const STOPWORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "in", "on", "at", "to", "for",
    "of", "with", "by", "from", "as", "is", "was", "are", "were", "been",
    "be", "have", "has", "had", "do", "does", "did", "will", "would", "could",
    "should", "may", "might", "must", "can", "this", "that", "these", "those",
    "i", "you", "he", "she", "it", "we", "they", "what", "which", "who",
    "when", "where", "why", "how", "all", "each", "every", "both", "few",
    "more", "most", "other", "some", "such", "no", "not", "only", "own",
    "same", "so", "than", "too", "very", "just", "about", "into", "through",
    "during", "before", "after", "above", "below", "between", "under", "again",
    "further", "then", "once", "here", "there", "any", "if", "because", "until",
];

const MIN_KEYWORD_LEN: usize = 3;

pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token)
}

/// Normalized query tokens of at least three characters that are not
/// stopwords, in query order. Duplicates are kept.
pub fn extract_keywords(query: &str) -> Vec<String> {
    normalize(query)
        .split_whitespace()
        .filter(|token| token.len() >= MIN_KEYWORD_LEN && !is_stopword(token))
        .map(str::to_string)
        .collect()
}
