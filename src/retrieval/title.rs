const MAX_TITLE_CHARS: usize = 25;

/// Chat title for an uploaded file: the name without a trailing `.pdf`,
/// cut to 25 characters followed by `...` when longer.
pub fn generate_chat_title(file_name: &str) -> String {
    let base = strip_pdf_extension(file_name);

    if base.chars().count() > MAX_TITLE_CHARS {
        let truncated: String = base.chars().take(MAX_TITLE_CHARS).collect();
        format!("{truncated}...")
    } else {
        base.to_string()
    }
}

fn strip_pdf_extension(file_name: &str) -> &str {
    let split = file_name.len().saturating_sub(4);
    match file_name.get(split..) {
        Some(ext) if ext.eq_ignore_ascii_case(".pdf") => &file_name[..split],
        _ => file_name,
    }
}
