//! Text extraction from uploaded document buffers.
//!
//! The dispatcher normalizes a file's declared media type, sniffed content
//! type, and extension into one canonical [`MediaKind`] before any extractor
//! is chosen, then routes the byte buffer to the matching format-specific
//! extractor.

mod archive;
mod metrics;
mod pdf;
mod word;

use thiserror::Error;

pub use metrics::{reading_time_minutes, word_count};
pub use pdf::extract_pdf;
pub use word::extract_word;

/// Errors that can occur during text extraction.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("No readable text found in the document")]
    EmptyContent,

    #[error("Could not read the PDF file: {0}")]
    MalformedPdf(String),

    #[error("Could not read the Word document: {0}")]
    MalformedDocument(String),

    #[error("Could not open the archive: {0}")]
    MalformedArchive(#[from] zip::result::ZipError),

    #[error("Archive contains no supported files")]
    NoSupportedEntries,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of text extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    /// Extracted text content, trimmed and non-empty.
    pub text: String,
    /// Number of pages; present only when the source was a PDF. Archives
    /// never report one, even when an entry was a PDF.
    pub page_count: Option<u32>,
}

/// Canonical format tag produced by the normalization step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    PlainText,
    Pdf,
    Word,
    Archive,
    Unrecognized,
}

impl MediaKind {
    /// Map a MIME type to a media kind.
    pub fn from_mime(mime: &str) -> Self {
        match mime.to_ascii_lowercase().as_str() {
            "text/plain" => Self::PlainText,
            "application/pdf" => Self::Pdf,
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Self::Word
            }
            "application/zip" | "application/x-zip" | "application/x-zip-compressed" => {
                Self::Archive
            }
            _ => Self::Unrecognized,
        }
    }

    /// Map a file name's extension to a media kind.
    pub fn from_extension(name: &str) -> Self {
        let ext = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "txt" => Self::PlainText,
            "pdf" => Self::Pdf,
            "docx" => Self::Word,
            "zip" => Self::Archive,
            _ => Self::Unrecognized,
        }
    }

    /// Normalize declared type, sniffed content, and extension into one tag.
    ///
    /// The declared type wins when recognized; content sniffing is consulted
    /// next (declared types and extensions routinely disagree); the extension
    /// is the final fallback, which is what recognizes a zip whose media type
    /// was never declared.
    pub fn detect(declared: Option<&str>, name: &str, bytes: &[u8]) -> Self {
        if let Some(mime) = declared {
            let kind = Self::from_mime(mime);
            if kind != Self::Unrecognized {
                return kind;
            }
        }
        if let Some(sniffed) = infer::get(bytes) {
            let kind = Self::from_mime(sniffed.mime_type());
            if kind != Self::Unrecognized {
                return kind;
            }
        }
        Self::from_extension(name)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PlainText => "plain text",
            Self::Pdf => "PDF",
            Self::Word => "Word document",
            Self::Archive => "zip archive",
            Self::Unrecognized => "unrecognized",
        }
    }
}

/// An uploaded file: byte buffer, declared media type, display name.
///
/// Constructed from user input at upload time and consumed once by
/// [`extract`]; not retained afterwards.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub declared_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl SourceFile {
    pub fn new(name: String, declared_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            name,
            declared_type,
            bytes,
        }
    }

    /// The normalized media kind of this file.
    pub fn media_kind(&self) -> MediaKind {
        MediaKind::detect(self.declared_type.as_deref(), &self.name, &self.bytes)
    }
}

/// Extract text from a source file based on its normalized media kind.
///
/// Fails with [`ExtractError::UnsupportedFormat`] when the kind matches no
/// extractor, and with [`ExtractError::EmptyContent`] when extraction
/// succeeded but yielded only whitespace.
pub fn extract(source: &SourceFile) -> Result<ExtractionResult, ExtractError> {
    let kind = source.media_kind();
    tracing::debug!("Extracting {} as {}", source.name, kind.as_str());

    let result = match kind {
        MediaKind::PlainText => ExtractionResult {
            text: String::from_utf8_lossy(&source.bytes).into_owned(),
            page_count: None,
        },
        MediaKind::Pdf => pdf::extract_pdf(&source.bytes)?,
        MediaKind::Word => ExtractionResult {
            text: word::extract_word(&source.bytes)?,
            page_count: None,
        },
        MediaKind::Archive => archive::extract_archive(&source.bytes)?,
        MediaKind::Unrecognized => {
            return Err(ExtractError::UnsupportedFormat(
                source
                    .declared_type
                    .clone()
                    .unwrap_or_else(|| source.name.clone()),
            ))
        }
    };

    let trimmed = result.text.trim();
    if trimmed.is_empty() {
        return Err(ExtractError::EmptyContent);
    }

    Ok(ExtractionResult {
        text: trimmed.to_string(),
        page_count: result.page_count,
    })
}
