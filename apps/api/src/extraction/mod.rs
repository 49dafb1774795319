//! Text Extraction: turns uploaded documents into plain text for prompting.
//!
//! The endpoint only sees the `TextExtractor` trait. `DocumentExtractor` is the
//! default backend: PDF via `pdf-extract`, DOCX via `docx`, UTF-8 text as-is.
//! Legacy binary Word (`.doc`, `application/msword`) and other formats are
//! rejected with [`ExtractError::Unsupported`].
//!
//! `AppState` holds an `Arc<dyn TextExtractor>`.

pub mod docx;
#[cfg(test)]
pub mod test_fixtures;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

/// Extracted text is capped at this many characters before prompting.
pub const MAX_EXTRACTED_CHARS: usize = 15_000;

/// Human-readable list of accepted upload formats.
pub const SUPPORTED_FORMATS: &str = "PDF, DOCX, plain text";

const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX extraction failed: {0}")]
    Docx(String),

    #[error(
        "Unsupported document format (file: {file_name}, content type: {content_type}); \
         supported formats are {}",
        SUPPORTED_FORMATS
    )]
    Unsupported {
        file_name: String,
        content_type: String,
    },

    #[error("Extraction worker failed: {0}")]
    Worker(String),
}

/// A single uploaded file part.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    /// Multipart field name the document arrived under.
    pub field: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    PlainText,
}

/// Extraction backend trait. Implement this to swap the parsing library
/// without touching the endpoint.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Raw text of the document, before trimming and capping.
    async fn extract_text(&self, document: UploadedDocument) -> Result<String, ExtractError>;

    /// Extracted text, trimmed and capped at [`MAX_EXTRACTED_CHARS`].
    async fn extract_capped(&self, document: UploadedDocument) -> Result<String, ExtractError> {
        let field = document.field.clone();
        let raw = self.extract_text(document).await?;
        let capped = cap_text(&raw);
        debug!(
            field = %field,
            raw_chars = raw.chars().count(),
            kept_chars = capped.chars().count(),
            "Extracted document text"
        );
        Ok(capped)
    }
}

/// Default extractor. Parsing runs on the blocking pool since it is CPU-bound
/// and the PDF backend may panic on hostile input.
pub struct DocumentExtractor;

#[async_trait]
impl TextExtractor for DocumentExtractor {
    async fn extract_text(&self, document: UploadedDocument) -> Result<String, ExtractError> {
        tokio::task::spawn_blocking(move || extract_document(&document))
            .await
            .map_err(|e| ExtractError::Worker(e.to_string()))?
    }
}

/// Synchronous extraction, dispatching on the detected document kind.
pub fn extract_document(document: &UploadedDocument) -> Result<String, ExtractError> {
    let kind = detect_kind(document).ok_or_else(|| ExtractError::Unsupported {
        file_name: document.file_name.clone().unwrap_or_default(),
        content_type: document.content_type.clone().unwrap_or_default(),
    })?;
    debug!(
        field = %document.field,
        bytes = document.data.len(),
        ?kind,
        "Extracting document"
    );

    match kind {
        DocumentKind::Pdf => pdf_extract::extract_text_from_mem(&document.data)
            .map_err(|e| ExtractError::Pdf(e.to_string())),
        DocumentKind::Docx => docx::extract_docx_text(&document.data),
        DocumentKind::PlainText => Ok(decode_plain_text(&document.data)),
    }
}

/// Detects the document kind from magic bytes, then declared content type,
/// then file extension. Undeclared UTF-8 payloads are treated as plain text.
pub fn detect_kind(document: &UploadedDocument) -> Option<DocumentKind> {
    let data = &document.data;

    if data.starts_with(b"%PDF-") {
        return Some(DocumentKind::Pdf);
    }
    if data.starts_with(b"PK\x03\x04") {
        return Some(DocumentKind::Docx);
    }

    let content_type = document
        .content_type
        .as_deref()
        .map(|ct| ct.split(';').next().unwrap_or("").trim().to_lowercase())
        .unwrap_or_default();
    match content_type.as_str() {
        "application/pdf" => return Some(DocumentKind::Pdf),
        DOCX_MIME => return Some(DocumentKind::Docx),
        ct if ct.starts_with("text/") => return Some(DocumentKind::PlainText),
        _ => {}
    }

    let file_name = document
        .file_name
        .as_deref()
        .unwrap_or_default()
        .to_lowercase();
    if file_name.ends_with(".pdf") {
        return Some(DocumentKind::Pdf);
    }
    if file_name.ends_with(".docx") {
        return Some(DocumentKind::Docx);
    }
    if file_name.ends_with(".txt") || file_name.ends_with(".md") {
        return Some(DocumentKind::PlainText);
    }

    if std::str::from_utf8(data).is_ok() && !data.contains(&0) {
        return Some(DocumentKind::PlainText);
    }

    None
}

fn decode_plain_text(data: &[u8]) -> String {
    let text = String::from_utf8_lossy(data);
    text.strip_prefix('\u{feff}').unwrap_or(&text).to_string()
}

/// Trims surrounding whitespace and keeps at most the first
/// [`MAX_EXTRACTED_CHARS`] characters.
pub fn cap_text(text: &str) -> String {
    let trimmed = text.trim();
    match trimmed.char_indices().nth(MAX_EXTRACTED_CHARS) {
        Some((cut, _)) => trimmed[..cut].to_string(),
        None => trimmed.to_string(),
    }
}
