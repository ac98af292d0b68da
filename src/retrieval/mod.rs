//! Lexical retrieval over a single document: chunking, keyword extraction,
//! overlap scoring, ranking, answer formatting and extractive summaries.
//! Everything here is pure.

pub mod answer;
pub mod chunker;
pub mod command;
pub mod keywords;
pub mod normalize;
pub mod ranker;
pub mod scorer;
pub mod summary;
pub mod title;

pub use answer::find_best_answer;
pub use chunker::{prepare_chunks, DEFAULT_CHUNK_SIZE};
pub use command::{respond, ChatCommand};
pub use keywords::extract_keywords;
pub use normalize::normalize;
pub use ranker::{rank, ScoredChunk, MAX_PASSAGES};
pub use scorer::score_chunk;
pub use summary::{generate_questions, summarize_text, QuestionPair};
pub use title::generate_chat_title;
