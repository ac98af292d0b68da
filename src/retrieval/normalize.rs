/// Lowercases `text`, turns every character that is not an ASCII word
/// character or whitespace into a space, and collapses whitespace runs.
///
/// The result only ever contains `[a-z0-9_]` and single spaces, so it is a
/// fixed point: `normalize(&normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    let lowered: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    lowered.split_whitespace().collect::<Vec<_>>().join(" ")
}
