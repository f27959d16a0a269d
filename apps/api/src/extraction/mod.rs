//! Text Extractor: turns an uploaded resume into plain text.
//!
//! The parser is picked from the declared filename's extension only; the bytes
//! are never sniffed. Parsing is CPU-bound, so callers run it on the blocking pool.

use bytes::Bytes;
use thiserror::Error;

mod pdf;
mod word;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported file type for '{0}'. Only PDF or DOCX allowed")]
    UnsupportedType(String),

    #[error("Could not read PDF '{filename}': {reason}")]
    Pdf { filename: String, reason: String },

    #[error("Could not read Word document '{filename}': {reason}")]
    Word { filename: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Word,
}

impl DocumentKind {
    /// Case-insensitive extension match. `.doc` goes through the OOXML reader as well.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let lower = filename.to_lowercase();
        if lower.ends_with(".pdf") {
            Some(DocumentKind::Pdf)
        } else if lower.ends_with(".docx") || lower.ends_with(".doc") {
            Some(DocumentKind::Word)
        } else {
            None
        }
    }
}

/// An uploaded resume: raw bytes plus the filename the client declared.
#[derive(Debug, Clone)]
pub struct ResumeDocument {
    pub filename: String,
    pub bytes: Bytes,
}

impl ResumeDocument {
    pub fn extract_text(&self) -> Result<String, ExtractError> {
        extract_text(&self.bytes, &self.filename)
    }
}

pub fn extract_text(bytes: &[u8], filename: &str) -> Result<String, ExtractError> {
    match DocumentKind::from_filename(filename) {
        Some(DocumentKind::Pdf) => pdf::extract_pdf(bytes).map_err(|e| ExtractError::Pdf {
            filename: filename.to_string(),
            reason: e.to_string(),
        }),
        Some(DocumentKind::Word) => word::extract_word(bytes).map_err(|e| ExtractError::Word {
            filename: filename.to_string(),
            reason: e.to_string(),
        }),
        None => Err(ExtractError::UnsupportedType(filename.to_string())),
    }
}
