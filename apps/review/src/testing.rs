//! In-process fakes for the pipeline seams. Test builds only.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::Notify;

use crate::analysis::models::{
    AnalysisReport, EducationItem, ExperienceItem, Improvement, PersonalInfo, Priority,
    ScoreBreakdown, Sections,
};
use crate::analysis::AnalysisGateway;
use crate::errors::{AnalysisError, ExtractionError};
use crate::history::store::{KeyValueStore, StoreError};
use crate::ingest::{NormalizedPayload, PdfExtractor};

pub fn sample_report(overall: u8) -> AnalysisReport {
    AnalysisReport {
        personal_info: PersonalInfo {
            name: "Jane Doe".to_string(),
            email: Some("jane@example.com".to_string()),
            phone: None,
            linkedin: Some("linkedin.com/in/janedoe".to_string()),
        },
        score: ScoreBreakdown {
            overall,
            formatting: 80,
            impact: 64,
            keywords: 71,
            relevance: 77,
        },
        summary: "Backend engineer with strong systems ownership.".to_string(),
        sections: Sections {
            experience: vec![ExperienceItem {
                company: "Acme".to_string(),
                role: "Senior Engineer".to_string(),
                duration: "2019 - Present".to_string(),
                description: vec!["Cut p99 latency by 40%".to_string()],
            }],
            education: vec![EducationItem {
                institution: "TU Berlin".to_string(),
                degree: "MSc Computer Science".to_string(),
                year: "2016".to_string(),
            }],
            skills: vec!["Rust".to_string(), "PostgreSQL".to_string()],
        },
        improvements: vec![Improvement {
            category: "Impact".to_string(),
            suggestion: "Quantify outcomes for the last two roles.".to_string(),
            priority: Priority::High,
        }],
        upskilling: vec!["Kubernetes operators".to_string()],
    }
}

pub struct FakePdf {
    text: Option<String>,
    calls: AtomicUsize,
}

impl FakePdf {
    pub fn returning(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            text: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PdfExtractor for FakePdf {
    async fn extract_text(&self, _bytes: Bytes) -> Result<String, ExtractionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.text.clone().ok_or(ExtractionError::PdfUnreadable)
    }
}

/// Records every payload. Optionally blocks until `release()` is called.
pub struct FakeGateway {
    overall: u8,
    fail: bool,
    gate: Option<Notify>,
    calls: AtomicUsize,
    payloads: Mutex<Vec<NormalizedPayload>>,
}

impl FakeGateway {
    pub fn succeeding(overall: u8) -> Self {
        Self {
            overall,
            fail: false,
            gate: None,
            calls: AtomicUsize::new(0),
            payloads: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::succeeding(0)
        }
    }

    pub fn gated(overall: u8) -> Self {
        Self {
            gate: Some(Notify::new()),
            ..Self::succeeding(overall)
        }
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn payloads(&self) -> Vec<NormalizedPayload> {
        self.payloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnalysisGateway for FakeGateway {
    async fn submit(&self, payload: NormalizedPayload) -> Result<AnalysisReport, AnalysisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.payloads.lock().unwrap().push(payload);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if self.fail {
            Err(AnalysisError::MalformedResponse("missing score".to_string()))
        } else {
            Ok(sample_report(self.overall))
        }
    }
}

#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A store whose writes always fail.
pub struct ReadOnlyStore;

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only",
        )))
    }
}

/// A minimal valid PDF with one Helvetica text line per page.
pub fn pdf_with_pages(pages: &[&str]) -> Vec<u8> {
    let page_count = pages.len();
    let kids: Vec<String> = (0..page_count)
        .map(|i| format!("{} 0 R", 4 + 2 * i))
        .collect();

    let mut objects = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        format!(
            "<< /Type /Pages /Kids [{}] /Count {page_count} >>",
            kids.join(" ")
        ),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_string(),
    ];
    for (i, text) in pages.iter().enumerate() {
        let content = format!("BT /F1 12 Tf 72 720 Td ({text}) Tj ET");
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
            5 + 2 * i
        ));
        objects.push(format!(
            "<< /Length {} >>\nstream\n{content}\nendstream",
            content.len()
        ));
    }

    let mut out = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
    }

    let xref_at = out.len();
    let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in offsets {
        xref.push_str(&format!("{offset:010} 00000 n \n"));
    }
    xref.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_at}\n%%EOF\n",
        objects.len() + 1
    ));
    out.extend_from_slice(xref.as_bytes());
    out
}
