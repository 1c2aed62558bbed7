//! PDF text extraction.
//!
//! `PdfExtractor` is the seam the normalizer depends on. The default backend wraps
//! `pdf-extract`, which is CPU-bound and synchronous, so it runs inside
//! `tokio::task::spawn_blocking`. Pages are extracted in document order and the
//! combined text is only returned once every page is done.

use async_trait::async_trait;
use bytes::Bytes;
use tracing::{debug, warn};

use crate::errors::ExtractionError;

#[async_trait]
pub trait PdfExtractor: Send + Sync {
    /// Returns page texts joined by `\n`, with each page's text runs joined by one space.
    async fn extract_text(&self, bytes: Bytes) -> Result<String, ExtractionError>;
}

/// `pdf-extract` backed extractor.
pub struct PdfTextExtractor;

#[async_trait]
impl PdfExtractor for PdfTextExtractor {
    async fn extract_text(&self, bytes: Bytes) -> Result<String, ExtractionError> {
        let pages =
            tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem_by_pages(&bytes))
                .await
                // pdf-extract panics on some malformed documents; treat that as unreadable too.
                .map_err(|e| {
                    warn!("PDF extraction task failed: {e}");
                    ExtractionError::PdfUnreadable
                })?
                .map_err(|e| {
                    warn!("PDF extraction failed: {e}");
                    ExtractionError::PdfUnreadable
                })?;

        let text = join_pages(&pages);
        debug!(
            "Extracted {} chars from {} PDF pages",
            text.chars().count(),
            pages.len()
        );
        Ok(text)
    }
}

/// Collapses whitespace inside each page to single spaces and joins pages with `\n`.
pub fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    pages
        .iter()
        .map(|page| page.as_ref().split_whitespace().collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
