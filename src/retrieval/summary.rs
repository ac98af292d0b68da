use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use super::keywords::is_stopword;

/// Sentences kept in an extractive summary.
pub const SUMMARY_SENTENCES: usize = 7;

/// Questions produced for "important questions".
pub const QUESTION_COUNT: usize = 5;

const MIN_QUESTION_KEYWORD_CHARS: usize = 5;

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+").expect("word regex is valid"));

static SENTENCE_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+").expect("sentence break regex is valid"));

/// A generated study question: the keyword it asks about and the sentence
/// that answers it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionPair {
    pub keyword: String,
    pub answer: String,
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split after each `.`, `!` or `?` that is followed by whitespace.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for m in SENTENCE_BREAK_RE.find_iter(text) {
        // the terminator is a single ASCII byte
        sentences.push(text[start..m.start() + 1].trim());
        start = m.end();
    }
    sentences.push(text[start..].trim());

    sentences.retain(|s| !s.is_empty());
    sentences
}

fn word_frequencies(text: &str) -> HashMap<String, usize> {
    let lowered = text.to_lowercase();
    let mut freq = HashMap::new();
    for word in WORD_RE.find_iter(&lowered).map(|m| m.as_str()) {
        if !is_stopword(word) {
            *freq.entry(word.to_string()).or_insert(0) += 1;
        }
    }
    freq
}

/// Distinct sentences, best first. A sentence scores the document-wide
/// frequency of each of its words; ties keep document order.
fn rank_sentences<'a>(sentences: &[&'a str], freq: &HashMap<String, usize>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    let mut scored: Vec<(&str, usize)> = sentences
        .iter()
        .copied()
        .filter(|s| seen.insert(*s))
        .map(|s| {
            let lowered = s.to_lowercase();
            let score = WORD_RE
                .find_iter(&lowered)
                .map(|m| freq.get(m.as_str()).copied().unwrap_or(0))
                .sum();
            (s, score)
        })
        .collect();

    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.into_iter().map(|(s, _)| s).collect()
}

/// Extractive summary: the `limit` highest-scoring sentences, in the order
/// they appear in the document. Short documents are returned whole.
pub fn summarize_text(text: &str, limit: usize) -> String {
    let text = collapse_whitespace(text);
    let sentences = split_sentences(&text);
    if sentences.len() <= limit {
        return text;
    }

    let freq = word_frequencies(&text);
    let best: HashSet<&str> = rank_sentences(&sentences, &freq)
        .into_iter()
        .take(limit)
        .collect();

    sentences
        .iter()
        .copied()
        .filter(|s| best.contains(s))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Up to `count` question/answer pairs taken from the highest-scoring
/// sentences. Each asks about the sentence's longest non-stopword of at
/// least five characters; sentences without one are skipped.
pub fn generate_questions(text: &str, count: usize) -> Vec<QuestionPair> {
    let text = collapse_whitespace(text);
    let sentences = split_sentences(&text);
    if sentences.is_empty() || count == 0 {
        return Vec::new();
    }

    let freq = word_frequencies(&text);
    let mut pairs = Vec::new();

    for sentence in rank_sentences(&sentences, &freq) {
        let keyword = WORD_RE
            .find_iter(sentence)
            .map(|m| m.as_str())
            .filter(|w| {
                w.chars().count() >= MIN_QUESTION_KEYWORD_CHARS && !is_stopword(&w.to_lowercase())
            })
            // first of the longest
            .fold(None::<&str>, |best, w| match best {
                Some(b) if b.chars().count() >= w.chars().count() => Some(b),
                _ => Some(w),
            });

        if let Some(keyword) = keyword {
            pairs.push(QuestionPair {
                keyword: keyword.to_string(),
                answer: sentence.to_string(),
            });
        }
        if pairs.len() == count {
            break;
        }
    }

    pairs
}
