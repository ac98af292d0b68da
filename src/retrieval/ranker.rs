use super::scorer::score_chunk;

/// Most passages returned for a single question.
pub const MAX_PASSAGES: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredChunk<'a> {
    pub chunk: &'a str,
    pub index: usize,
    pub score: f64,
}

/// Score every chunk, keep the ones with a positive score and return the
/// best [`MAX_PASSAGES`] of them. Equal scores keep document order.
pub fn rank<'a, S: AsRef<str>>(keywords: &[String], chunks: &'a [S]) -> Vec<ScoredChunk<'a>> {
    let mut scored: Vec<ScoredChunk<'a>> = chunks
        .iter()
        .enumerate()
        .map(|(index, chunk)| {
            let chunk = chunk.as_ref();
            ScoredChunk {
                chunk,
                index,
                score: score_chunk(chunk, keywords),
            }
        })
        .filter(|scored| scored.score > 0.0)
        .collect();

    // sort_by is stable, so ties stay in chunk order
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(MAX_PASSAGES);
    scored
}
