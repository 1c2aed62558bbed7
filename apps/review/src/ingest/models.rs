use std::path::{Path, PathBuf};

use bytes::Bytes;
use tracing::warn;

use crate::errors::ExtractionError;

/// What the user handed us. Lives only until normalization finishes.
#[derive(Debug, Clone)]
pub enum RawInput {
    Text(String),
    File(FileArtifact),
}

#[derive(Debug, Clone)]
enum FileContent {
    Loaded(Bytes),
    OnDisk(PathBuf),
}

/// An uploaded file: declared MIME type, size and name known up front,
/// content read on demand (after the size check passes).
#[derive(Debug, Clone)]
pub struct FileArtifact {
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    content: FileContent,
}

impl FileArtifact {
    pub fn from_bytes(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        let bytes = bytes.into();
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            size_bytes: bytes.len() as u64,
            content: FileContent::Loaded(bytes),
        }
    }

    /// Builds an artifact from a path. Only metadata is touched here.
    pub async fn from_path(
        path: &Path,
        mime_type: impl Into<String>,
    ) -> Result<Self, ExtractionError> {
        let metadata = tokio::fs::metadata(path).await.map_err(|source| {
            warn!("Could not open {}: {source}", path.display());
            ExtractionError::FileRead {
                kind: "resume",
                source,
            }
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self {
            file_name,
            mime_type: mime_type.into(),
            size_bytes: metadata.len(),
            content: FileContent::OnDisk(path.to_path_buf()),
        })
    }

    /// Size in binary megabytes, as shown to the user.
    pub fn size_mb(&self) -> f64 {
        self.size_bytes as f64 / super::BYTES_PER_MB as f64
    }

    /// Upper-cased filename suffix, or `"Unknown"` when there is none.
    pub fn extension_label(&self) -> String {
        match self.file_name.rsplit_once('.') {
            Some((_, ext)) if !ext.is_empty() => ext.to_uppercase(),
            _ => "Unknown".to_string(),
        }
    }

    /// Reads the full content. Completes before any downstream step sees the bytes.
    pub async fn read(&self) -> std::io::Result<Bytes> {
        match &self.content {
            FileContent::Loaded(bytes) => Ok(bytes.clone()),
            FileContent::OnDisk(path) => tokio::fs::read(path).await.map(Bytes::from),
        }
    }
}

/// Content ready for the analysis gateway. Consumed by value on submission.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedPayload {
    PlainText(String),
    /// Base64-encoded bytes plus their MIME type.
    InlineMedia { data: String, mime_type: String },
}

impl NormalizedPayload {
    pub fn modality(&self) -> Modality {
        match self {
            NormalizedPayload::PlainText(_) => Modality::Text,
            NormalizedPayload::InlineMedia { .. } => Modality::Image,
        }
    }
}

/// Which kind of content went to the gateway. Picks the failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Modality {
    #[default]
    Text,
    Image,
}

/// Normalizer output: the payload plus an optional non-fatal warning.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub payload: NormalizedPayload,
    pub warning: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_label_uppercases_last_suffix() {
        let f = FileArtifact::from_bytes("resume.final.docx", "application/msword", vec![1u8]);
        assert_eq!(f.extension_label(), "DOCX");
    }

    #[test]
    fn test_extension_label_defaults_to_unknown() {
        let f = FileArtifact::from_bytes("README", "application/octet-stream", vec![1u8]);
        assert_eq!(f.extension_label(), "Unknown");
        let f = FileArtifact::from_bytes("trailing.", "application/octet-stream", vec![1u8]);
        assert_eq!(f.extension_label(), "Unknown");
    }

    #[test]
    fn test_size_mb_uses_binary_megabytes() {
        let f = FileArtifact::from_bytes("a.txt", "text/plain", vec![0u8; 1024 * 1024]);
        assert!((f.size_mb() - 1.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_from_path_reads_metadata_then_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cv.txt");
        tokio::fs::write(&path, b"hello").await.unwrap();

        let f = FileArtifact::from_path(&path, "text/plain").await.unwrap();
        assert_eq!(f.file_name, "cv.txt");
        assert_eq!(f.size_bytes, 5);
        assert_eq!(f.read().await.unwrap().as_ref(), b"hello");
    }

    #[tokio::test]
    async fn test_missing_path_is_file_read_error_with_hint() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileArtifact::from_path(&dir.path().join("nope.pdf"), "application/pdf")
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractionError::FileRead { kind: "resume", .. }));
        assert_eq!(
            err.to_string(),
            "Failed to read resume file. Try pasting the resume text instead."
        );
    }

    #[test]
    fn test_payload_modality() {
        assert_eq!(
            NormalizedPayload::PlainText("x".into()).modality(),
            Modality::Text
        );
        let media = NormalizedPayload::InlineMedia {
            data: "AAAA".into(),
            mime_type: "image/png".into(),
        };
        assert_eq!(media.modality(), Modality::Image);
    }
}
