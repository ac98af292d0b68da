use std::sync::LazyLock;

use regex::Regex;

use super::keywords::extract_keywords;
use super::ranker::{rank, ScoredChunk};

pub const NO_DOCUMENT_MESSAGE: &str =
    "📄 Please upload a PDF first so I can help answer your questions.";

pub const REPHRASE_MESSAGE: &str =
    "🤔 Could you please rephrase your question with more specific terms?";

const NOT_FOUND_SUGGESTIONS: &str = "**Suggestions:**\n\
• Try using different keywords\n\
• Check if the topic is covered in the document\n\
• Ask about the main subjects of the PDF";

const NOT_FOUND_KEYWORDS: usize = 3;
const HEADER_KEYWORDS: usize = 4;
const SENTENCES_PER_PARAGRAPH: usize = 3;

/// Answer `question` from the chunks of the chat's document.
///
/// Always returns text: one of the fixed prompts when there is no document,
/// no usable keyword or no matching passage, otherwise a markdown answer
/// quoting the best passages.
pub fn find_best_answer<S: AsRef<str>>(question: &str, chunks: &[S]) -> String {
    if chunks.is_empty() {
        return NO_DOCUMENT_MESSAGE.to_string();
    }

    let keywords = extract_keywords(question);
    if keywords.is_empty() {
        return REPHRASE_MESSAGE.to_string();
    }

    let ranked = rank(&keywords, chunks);
    if ranked.is_empty() {
        return not_found_message(&keywords);
    }

    format_answer(&keywords, &ranked)
}

fn not_found_message(keywords: &[String]) -> String {
    let shown = leading(keywords, NOT_FOUND_KEYWORDS);
    format!("❌ I couldn't find information about \"{shown}\" in the PDF.\n\n{NOT_FOUND_SUGGESTIONS}")
}

fn format_answer(keywords: &[String], ranked: &[ScoredChunk<'_>]) -> String {
    let mut response = format!(
        "## 📖 Answer\n\n**Keywords matched:** {}\n\n---\n\n",
        leading(keywords, HEADER_KEYWORDS)
    );

    let labelled = ranked.len() > 1;
    for (position, passage) in ranked.iter().enumerate() {
        if labelled {
            response.push_str(&format!("### Passage {}\n\n", position + 1));
        }
        response.push_str(&format_chunk_text(passage.chunk));
        response.push_str("\n\n");
    }

    let plural = if ranked.len() > 1 { "s" } else { "" };
    response.push_str(&format!(
        "---\n\n*Found {} relevant section{plural} in the document.*",
        ranked.len()
    ));

    response
}

fn leading(keywords: &[String], n: usize) -> String {
    keywords.iter().take(n).map(String::as_str).collect::<Vec<_>>().join(", ")
}

/// Render a passage as a blockquote, or as bullets when it spans more than
/// one paragraph of three sentences.
pub fn format_chunk_text(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");

    let mut sentences = split_sentences(&collapsed);
    if sentences.is_empty() {
        sentences.push(collapsed.as_str());
    }

    let paragraphs: Vec<String> = sentences
        .chunks(SENTENCES_PER_PARAGRAPH)
        .map(|group| {
            group
                .iter()
                .map(|sentence| sentence.trim())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();

    if let [only] = paragraphs.as_slice() {
        return format!("> {only}");
    }

    paragraphs
        .iter()
        .map(|p| format!("• {p}"))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Runs of non-terminal characters closed by one or more of `.`, `!` or
/// `?`. Text after the last terminator is not part of any sentence.
static SENTENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^.!?]+[.!?]+").expect("sentence regex is valid"));

fn split_sentences(text: &str) -> Vec<&str> {
    SENTENCE_RE.find_iter(text).map(|m| m.as_str()).collect()
}
