//! Analysis Gateway — one normalized payload in, one report (or one failure) out.
//!
//! The orchestrator holds an `Arc<dyn AnalysisGateway>`; `GeminiGateway` is the
//! production backend. Implementations make exactly one remote call per `submit`
//! and never retry.

use async_trait::async_trait;
use tracing::info;

use crate::analysis::models::AnalysisReport;
use crate::errors::AnalysisError;
use crate::ingest::NormalizedPayload;
use crate::llm_client::prompts::{
    analysis_response_schema, ANALYSIS_SYSTEM, IMAGE_PROMPT, TEXT_PROMPT_PREFIX,
};
use crate::llm_client::{LlmClient, LlmError, PromptPart};

#[async_trait]
pub trait AnalysisGateway: Send + Sync {
    /// Consumes the payload. Malformed responses come back as `MalformedResponse`,
    /// never as a partially filled report.
    async fn submit(&self, payload: NormalizedPayload) -> Result<AnalysisReport, AnalysisError>;
}

pub struct GeminiGateway {
    llm: LlmClient,
    response_schema: serde_json::Value,
}

impl GeminiGateway {
    pub fn new(llm: LlmClient) -> Self {
        Self {
            llm,
            response_schema: analysis_response_schema(),
        }
    }
}

#[async_trait]
impl AnalysisGateway for GeminiGateway {
    async fn submit(&self, payload: NormalizedPayload) -> Result<AnalysisReport, AnalysisError> {
        let result = match &payload {
            NormalizedPayload::PlainText(text) => {
                info!("Submitting {} chars of resume text", text.chars().count());
                let prompt = format!("{TEXT_PROMPT_PREFIX}{text}");
                self.llm
                    .call_json::<AnalysisReport>(
                        &[PromptPart::Text(&prompt)],
                        ANALYSIS_SYSTEM,
                        &self.response_schema,
                    )
                    .await
            }
            NormalizedPayload::InlineMedia { data, mime_type } => {
                info!("Submitting {mime_type} resume image ({} base64 chars)", data.len());
                self.llm
                    .call_json::<AnalysisReport>(
                        &[
                            PromptPart::InlineData {
                                mime_type: mime_type.as_str(),
                                data: data.as_str(),
                            },
                            PromptPart::Text(IMAGE_PROMPT),
                        ],
                        ANALYSIS_SYSTEM,
                        &self.response_schema,
                    )
                    .await
            }
        };

        result.map_err(map_llm_error)
    }
}

/// Sorts client failures into the analysis error taxonomy.
fn map_llm_error(e: LlmError) -> AnalysisError {
    match e {
        LlmError::Parse(e) => AnalysisError::MalformedResponse(e.to_string()),
        LlmError::EmptyContent => {
            AnalysisError::MalformedResponse("response contained no text".to_string())
        }
        LlmError::Timeout { secs } => AnalysisError::Timeout { secs },
        other => AnalysisError::Request(other),
    }
}
