//! Base64 PDFs as delivered inside JSON payloads.

use std::fmt;
use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD, Engine};
use bytes::Bytes;
use tracing::info;

use crate::errors::ApiError;
use crate::models::Comparison;

const PDF_MAGIC: &[u8] = b"%PDF";
const DATA_URL_PREFIX: &str = "data:application/pdf;base64,";

pub fn is_pdf(bytes: &[u8]) -> bool {
    bytes.starts_with(PDF_MAGIC)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PdfKind {
    Resume,
    CoverLetter,
}

impl fmt::Display for PdfKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PdfKind::Resume => write!(f, "resume"),
            PdfKind::CoverLetter => write!(f, "cover letter"),
        }
    }
}

/// Download name for a comparison's PDF.
pub fn file_name_for(kind: PdfKind, title: &str, company: &str) -> String {
    match kind {
        PdfKind::Resume => format!("{title}_{company}_Resume.pdf"),
        PdfKind::CoverLetter => {
            let strip = |s: &str| s.split_whitespace().collect::<String>();
            format!("{}_{}_cover_letter.pdf", strip(title), strip(company))
        }
    }
}

/// A decoded PDF. Construction fails unless the bytes start with `%PDF`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfDocument {
    bytes: Bytes,
}

impl PdfDocument {
    /// Decodes standard base64, with or without a `data:` URL prefix.
    pub fn from_base64(encoded: &str) -> Result<Self, ApiError> {
        let encoded = encoded.trim();
        let encoded = encoded.strip_prefix(DATA_URL_PREFIX).unwrap_or(encoded);
        let bytes = STANDARD
            .decode(encoded)
            .map_err(|e| ApiError::InvalidPdf(format!("bad base64: {e}")))?;
        Self::from_bytes(bytes)
    }

    pub fn from_bytes(bytes: impl Into<Bytes>) -> Result<Self, ApiError> {
        let bytes = bytes.into();
        if !is_pdf(&bytes) {
            return Err(ApiError::InvalidPdf("missing %PDF header".into()));
        }
        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Extracted text of the document, for showing in a terminal.
    pub fn text_preview(&self) -> Result<String, ApiError> {
        pdf_extract::extract_text_from_mem(&self.bytes)
            .map_err(|e| ApiError::InvalidPdf(e.to_string()))
    }

    pub async fn write_to(&self, dir: &Path, file_name: &str) -> Result<PathBuf, ApiError> {
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(file_name);
        tokio::fs::write(&path, &self.bytes).await?;
        info!("Wrote {} bytes to {}", self.bytes.len(), path.display());
        Ok(path)
    }
}

/// The comparison's PDF of `kind`: `None` when it has not been built yet.
pub fn document_for(
    comparison: &Comparison,
    kind: PdfKind,
) -> Option<Result<PdfDocument, ApiError>> {
    let encoded = match kind {
        PdfKind::Resume => comparison.resume.as_deref(),
        PdfKind::CoverLetter => comparison.cover_letter.as_deref(),
    }?;
    (!encoded.trim().is_empty()).then(|| PdfDocument::from_base64(encoded))
}

/// Writes every built PDF of `comparison` into `dir`, returning the written paths.
pub async fn save_documents(comparison: &Comparison, dir: &Path) -> Result<Vec<PathBuf>, ApiError> {
    let mut written = Vec::new();
    for kind in [PdfKind::Resume, PdfKind::CoverLetter] {
        if let Some(document) = document_for(comparison, kind) {
            let name = file_name_for(kind, &comparison.title, &comparison.company);
            written.push(document?.write_to(dir, &name).await?);
        }
    }
    Ok(written)
}
