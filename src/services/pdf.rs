use std::time::Duration;

use anyhow::{Context, Result};

/// Whether an upload looks like a PDF, by MIME type or, for generic
/// types, by file extension.
pub fn is_pdf(content_type: &str, filename: &str) -> bool {
    if content_type == "application/pdf" {
        return true;
    }
    matches!(content_type, "application/octet-stream" | "")
        && filename.to_lowercase().ends_with(".pdf")
}

/// Extract the text of a PDF.
///
/// Extraction is CPU-bound, so it runs on the blocking pool and is given
/// up on after `timeout`.
pub async fn extract_text(bytes: Vec<u8>, filename: &str, timeout: Duration) -> Result<String> {
    let fname = filename.to_string();
    tracing::info!("extract_text: starting extraction for '{fname}' ({} bytes)", bytes.len());

    let handle = tokio::task::spawn_blocking(move || {
        let result = extract_pdf(&bytes);
        match &result {
            Ok(text) => tracing::info!("extract_text: '{fname}' extraction succeeded, {} chars", text.len()),
            Err(e) => tracing::error!("extract_text: '{fname}' extraction failed: {e:#}"),
        }
        result
    });

    match tokio::time::timeout(timeout, handle).await {
        Ok(join_result) => join_result.context("Text extraction task panicked")?,
        Err(_) => anyhow::bail!(
            "Text extraction timed out after {}s for '{filename}'",
            timeout.as_secs()
        ),
    }
}

// Readers accept the header anywhere in the first kilobyte
const PDF_HEADER_WINDOW: usize = 1024;

fn has_pdf_header(bytes: &[u8]) -> bool {
    bytes[..bytes.len().min(PDF_HEADER_WINDOW)]
        .windows(5)
        .any(|w| w == b"%PDF-")
}

fn extract_pdf(bytes: &[u8]) -> Result<String> {
    if !has_pdf_header(bytes) {
        anyhow::bail!("No PDF header found in the first {PDF_HEADER_WINDOW} bytes");
    }

    // pdftotext (poppler) is faster and copes with more layouts when present
    match extract_pdf_pdftotext(bytes) {
        Ok(text) if !text.trim().is_empty() => {
            tracing::info!("PDF extracted via pdftotext ({} chars)", text.len());
            return Ok(text.trim().to_string());
        }
        Ok(_) => tracing::warn!("pdftotext returned empty text, falling back to pdf_extract"),
        Err(e) => tracing::warn!("pdftotext failed ({e:#}), falling back to pdf_extract"),
    }

    let text = pdf_extract::extract_text_from_mem(bytes).context("Failed to extract text from PDF")?;
    Ok(text.trim().to_string())
}

fn extract_pdf_pdftotext(bytes: &[u8]) -> Result<String> {
    use std::io::Write;
    use std::process::Command;

    let mut tmp = tempfile::NamedTempFile::new().context("Failed to create temp file")?;
    tmp.write_all(bytes).context("Failed to write PDF to temp file")?;
    tmp.flush()?;

    let output = Command::new("pdftotext")
        .arg(tmp.path())
        .arg("-")
        .output()
        .context("Failed to run pdftotext; is poppler-utils installed?")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("pdftotext exited with {}: {stderr}", output.status);
    }

    String::from_utf8(output.stdout).context("pdftotext output is not valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_pdf() {
        assert!(is_pdf("application/pdf", "whatever"));
        assert!(is_pdf("application/octet-stream", "Guide.PDF"));
        assert!(is_pdf("", "guide.pdf"));
        assert!(!is_pdf("text/plain", "guide.pdf"));
        assert!(!is_pdf("application/octet-stream", "image.png"));
    }

    #[test]
    fn test_has_pdf_header() {
        assert!(has_pdf_header(b"%PDF-1.7\n..."));
        assert!(has_pdf_header(b"\xEF\xBB\xBF%PDF-1.4"));
        assert!(!has_pdf_header(b"PK\x03\x04"));
        assert!(!has_pdf_header(b""));
    }

    #[tokio::test]
    async fn test_extract_rejects_non_pdf_bytes() {
        let result = extract_text(b"just some text".to_vec(), "notes.pdf", Duration::from_secs(5)).await;
        assert!(result.is_err());
    }
}
