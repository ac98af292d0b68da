use super::answer::{find_best_answer, NO_DOCUMENT_MESSAGE};
use super::summary::{generate_questions, summarize_text, QUESTION_COUNT, SUMMARY_SENTENCES};

pub const NO_QUESTIONS_MESSAGE: &str =
    "🤔 I couldn't find enough content in the PDF to build questions from.";

/// What a chat message asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatCommand {
    Summary,
    Questions,
    Ask,
}

impl ChatCommand {
    /// Case-insensitive substring match; summaries win over questions.
    pub fn detect(message: &str) -> Self {
        let lowered = message.to_lowercase();
        if lowered.contains("summary") || lowered.contains("summarize") {
            Self::Summary
        } else if lowered.contains("important question") || lowered.contains("generate question") {
            Self::Questions
        } else {
            Self::Ask
        }
    }
}

/// Reply to a chat message from the chat's document text and chunks.
pub fn respond<S: AsRef<str>>(message: &str, text: &str, chunks: &[S]) -> String {
    let command = ChatCommand::detect(message);
    if command != ChatCommand::Ask && text.trim().is_empty() {
        return NO_DOCUMENT_MESSAGE.to_string();
    }

    match command {
        ChatCommand::Summary => format!(
            "## 📝 Summary\n\n{}",
            summarize_text(text, SUMMARY_SENTENCES)
        ),
        ChatCommand::Questions => format_questions(text),
        ChatCommand::Ask => find_best_answer(message, chunks),
    }
}

fn format_questions(text: &str) -> String {
    let pairs = generate_questions(text, QUESTION_COUNT);
    if pairs.is_empty() {
        return NO_QUESTIONS_MESSAGE.to_string();
    }

    pairs
        .iter()
        .enumerate()
        .map(|(i, pair)| format!("Q{}: {}\nA: {}", i + 1, pair.keyword, pair.answer))
        .collect::<Vec<_>>()
        .join("\n")
}
