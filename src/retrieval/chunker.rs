/// Number of words per chunk when the caller does not choose one.
pub const DEFAULT_CHUNK_SIZE: usize = 180;

/// Split document text into consecutive, non-overlapping windows of
/// `chunk_size` words. The last window may be shorter.
///
/// A `chunk_size` of zero falls back to [`DEFAULT_CHUNK_SIZE`].
pub fn prepare_chunks(text: &str, chunk_size: usize) -> Vec<String> {
    let chunk_size = if chunk_size == 0 {
        DEFAULT_CHUNK_SIZE
    } else {
        chunk_size
    };

    let words: Vec<&str> = text.split_whitespace().collect();

    words
        .chunks(chunk_size)
        .map(|window| window.join(" "))
        .filter(|chunk| !chunk.trim().is_empty())
        .collect()
}
