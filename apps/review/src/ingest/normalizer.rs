//! Normalizer — validates a `RawInput` and turns it into a `NormalizedPayload`.
//!
//! Order of checks for files:
//! 1. size (independent of type) → `FileTooLarge`
//! 2. declared MIME type: PDF → image → plain text → `UnsupportedType`
//!
//! Minimum-length rules differ per path and are kept that way on purpose:
//! - PDF text under the threshold is an extraction failure (`InsufficientContent`)
//! - plain-text files under the threshold pass with a warning
//! - pasted text only has to be non-blank

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::{debug, warn};

use crate::errors::{ExtractionError, PipelineError, ValidationError};
use crate::ingest::models::{FileArtifact, Normalized, NormalizedPayload, RawInput};
use crate::ingest::{
    PdfExtractor, BYTES_PER_MB, IMAGE_MIME_TYPES, MAX_FILE_SIZE_MB, MIN_CONTENT_CHARS,
    PDF_MIME_TYPES, TEXT_MIME_TYPES,
};

pub const SHORT_TEXT_FILE_WARNING: &str =
    "The uploaded text file seems too short to be a complete resume.";

#[derive(Clone)]
pub struct Normalizer {
    pdf: Arc<dyn PdfExtractor>,
}

impl Normalizer {
    pub fn new(pdf: Arc<dyn PdfExtractor>) -> Self {
        Self { pdf }
    }

    pub async fn normalize(&self, input: RawInput) -> Result<Normalized, PipelineError> {
        match input {
            RawInput::Text(text) => normalize_pasted(text),
            RawInput::File(file) => self.normalize_file(file).await,
        }
    }

    async fn normalize_file(&self, file: FileArtifact) -> Result<Normalized, PipelineError> {
        if file.size_bytes > MAX_FILE_SIZE_MB * BYTES_PER_MB {
            return Err(ValidationError::FileTooLarge {
                size_mb: file.size_mb(),
            }
            .into());
        }

        let mime = file.mime_type.as_str();
        debug!(
            "Normalizing {} ({}, {} bytes)",
            file.file_name, mime, file.size_bytes
        );

        if PDF_MIME_TYPES.contains(&mime) {
            let bytes = file
                .read()
                .await
                .map_err(|e| {
                    warn!("Could not read {}: {e}", file.file_name);
                    ExtractionError::PdfUnreadable
                })?;
            let text = self.pdf.extract_text(bytes).await?;
            if trimmed_len(&text) < MIN_CONTENT_CHARS {
                return Err(ValidationError::InsufficientContent.into());
            }
            Ok(Normalized {
                payload: NormalizedPayload::PlainText(text),
                warning: None,
            })
        } else if IMAGE_MIME_TYPES.contains(&mime) {
            let bytes = file
                .read()
                .await
                .map_err(|source| ExtractionError::FileRead {
                    kind: "image",
                    source,
                })?;
            Ok(Normalized {
                payload: NormalizedPayload::InlineMedia {
                    data: STANDARD.encode(&bytes),
                    mime_type: file.mime_type.clone(),
                },
                warning: None,
            })
        } else if TEXT_MIME_TYPES.contains(&mime) {
            let bytes = file
                .read()
                .await
                .map_err(|source| ExtractionError::FileRead {
                    kind: "text",
                    source,
                })?;
            let text = String::from_utf8_lossy(&bytes).into_owned();
            let warning = if trimmed_len(&text) < MIN_CONTENT_CHARS {
                warn!(
                    "Text file {} is only {} chars after trimming",
                    file.file_name,
                    trimmed_len(&text)
                );
                Some(SHORT_TEXT_FILE_WARNING.to_string())
            } else {
                None
            };
            Ok(Normalized {
                payload: NormalizedPayload::PlainText(text),
                warning,
            })
        } else {
            Err(ValidationError::UnsupportedType {
                extension: file.extension_label(),
            }
            .into())
        }
    }
}

fn normalize_pasted(text: String) -> Result<Normalized, PipelineError> {
    if text.trim().is_empty() {
        return Err(ValidationError::EmptyInput.into());
    }
    Ok(Normalized {
        payload: NormalizedPayload::PlainText(text),
        warning: None,
    })
}

fn trimmed_len(text: &str) -> usize {
    text.trim().chars().count()
}
