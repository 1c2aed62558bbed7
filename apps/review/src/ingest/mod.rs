// Input Normalizer
// Turns pasted text or an uploaded file into a payload ready for analysis.
// Size and type checks happen here; nothing in this module talks to the network.

pub mod models;
pub mod normalizer;
pub mod pdf;

pub use models::{FileArtifact, Modality, NormalizedPayload, RawInput};
pub use normalizer::Normalizer;
pub use pdf::{PdfExtractor, PdfTextExtractor};

/// Uploads larger than this are rejected before they are read.
pub const MAX_FILE_SIZE_MB: u64 = 5;
pub const BYTES_PER_MB: u64 = 1024 * 1024;
/// File-derived text shorter than this (after trimming) is suspect.
pub const MIN_CONTENT_CHARS: usize = 50;

pub const PDF_MIME_TYPES: &[&str] = &["application/pdf"];
pub const IMAGE_MIME_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp"];
pub const TEXT_MIME_TYPES: &[&str] = &["text/plain"];
