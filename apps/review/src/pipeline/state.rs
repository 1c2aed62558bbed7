use serde::Serialize;

use crate::analysis::ResumeAnalysis;
use crate::history::HistoryEntry;

/// Orchestrator lifecycle. `Succeeded` and `Failed` are passed through on the
/// way back to `Idle`; a run never rests in them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum PipelineState {
    #[default]
    Idle,
    Normalizing,
    Analyzing,
    Succeeded,
    Failed,
}

impl PipelineState {
    pub fn is_busy(self) -> bool {
        matches!(self, PipelineState::Normalizing | PipelineState::Analyzing)
    }
}

/// What the presentation layer shows. Exactly one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Pending,
    Analyzing,
    Error,
    Result,
}

/// Read-only snapshot of session state handed to the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub state: PipelineState,
    pub analysis: Option<ResumeAnalysis>,
    pub error: Option<String>,
    /// Informational only; never aborts a run.
    pub notices: Vec<String>,
    pub history: Vec<HistoryEntry>,
}

impl SessionView {
    pub fn status(&self) -> SessionStatus {
        if self.state.is_busy() {
            SessionStatus::Analyzing
        } else if self.error.is_some() {
            SessionStatus::Error
        } else if self.analysis.is_some() {
            SessionStatus::Result
        } else {
            SessionStatus::Pending
        }
    }
}
