use thiserror::Error;

use crate::ingest::{Modality, MAX_FILE_SIZE_MB};
use crate::llm_client::LlmError;

/// Input rejected before anything is sent for analysis.
/// The `Display` text is the user-facing message, remediation hint included.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("File is too large ({size_mb:.1}MB). Maximum allowed size is {max}MB.", max = MAX_FILE_SIZE_MB)]
    FileTooLarge { size_mb: f64 },

    #[error("Unsupported file type: {extension}. Please upload a PDF, Image (JPG, PNG, WebP), or Text file.")]
    UnsupportedType { extension: String },

    #[error("Please paste your resume text first.")]
    EmptyInput,

    #[error(
        "We could not extract enough text from this PDF. It might be empty, password-protected, \
         or a scanned image. Please try an image upload or copy-pasting text."
    )]
    InsufficientContent,
}

/// The bytes of an upload could not be turned into content.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Failed to parse the PDF file. It might be encrypted or corrupted.")]
    PdfUnreadable,

    #[error("Failed to read {kind} file. Try pasting the resume text instead.")]
    FileRead {
        kind: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// The analysis round-trip failed or returned something unusable.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("analysis request failed: {0}")]
    Request(#[from] LlmError),

    #[error("malformed analysis response: {0}")]
    MalformedResponse(String),

    #[error("analysis timed out after {secs}s")]
    Timeout { secs: u64 },
}

/// Everything that can end a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("An analysis is already in progress. Wait for it to finish before submitting again.")]
    Busy,
}

pub const TEXT_ANALYSIS_FAILED: &str = "Failed to analyze resume. Please try again.";
pub const IMAGE_ANALYSIS_FAILED: &str =
    "Failed to analyze the resume image. Ensure the image is clear and contains readable text.";

impl PipelineError {
    /// The single string shown to the user for this failure.
    ///
    /// Local failures surface verbatim. Remote failures collapse to a retry hint,
    /// tailored for image submissions.
    pub fn user_message(&self, modality: Modality) -> String {
        match self {
            PipelineError::Validation(e) => e.to_string(),
            PipelineError::Extraction(e) => e.to_string(),
            PipelineError::Analysis(AnalysisError::Timeout { secs }) => {
                format!("The analysis did not finish within {secs} seconds. Please try again.")
            }
            PipelineError::Analysis(_) => match modality {
                Modality::Image => IMAGE_ANALYSIS_FAILED.to_string(),
                Modality::Text => TEXT_ANALYSIS_FAILED.to_string(),
            },
            PipelineError::Busy => self.to_string(),
        }
    }
}
