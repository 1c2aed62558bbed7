//! Analysis Orchestrator — runs one submission through the pipeline.
//!
//! Flow: begin (single-flight check) → normalize → analyze → stamp id/timestamp →
//!       append history → expose result → Idle.
//!
//! Each step runs at most once per submission and strictly in that order. A
//! submission that arrives while another run is in flight is rejected with
//! `PipelineError::Busy` and does not touch the running one.
//!
//! Locks are never held across an `.await`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::analysis::{AnalysisGateway, AnalysisReport, ResumeAnalysis};
use crate::errors::PipelineError;
use crate::history::{HistoryEntry, HistoryLog};
use crate::ingest::{Modality, Normalizer, RawInput};
use crate::pipeline::state::{PipelineState, SessionView};

pub const HISTORY_NOT_SAVED: &str =
    "This analysis could not be saved to your history. It is still shown below.";

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct Submission {
    pub analysis: ResumeAnalysis,
    pub notices: Vec<String>,
}

#[derive(Debug, Default)]
struct Session {
    state: PipelineState,
    current: Option<ResumeAnalysis>,
    error: Option<String>,
    notices: Vec<String>,
    last_timestamp: i64,
}

pub struct Orchestrator {
    normalizer: Normalizer,
    gateway: Arc<dyn AnalysisGateway>,
    history: Mutex<HistoryLog>,
    session: Mutex<Session>,
}

impl Orchestrator {
    pub fn new(
        normalizer: Normalizer,
        gateway: Arc<dyn AnalysisGateway>,
        history: HistoryLog,
    ) -> Self {
        Self {
            normalizer,
            gateway,
            history: Mutex::new(history),
            session: Mutex::new(Session::default()),
        }
    }

    /// Runs one submission end to end.
    pub async fn submit(&self, input: RawInput) -> Result<Submission, PipelineError> {
        let run = self.begin()?;

        let normalized = match self.normalizer.normalize(input).await {
            Ok(n) => n,
            Err(e) => return Err(run.fail(e, Modality::default())),
        };
        if let Some(warning) = normalized.warning {
            run.note(warning);
        }

        let modality = normalized.payload.modality();
        run.enter(PipelineState::Analyzing);

        match self.gateway.submit(normalized.payload).await {
            Ok(report) => Ok(run.succeed(report)),
            Err(e) => Err(run.fail(e.into(), modality)),
        }
    }

    /// Snapshot for the presentation layer.
    pub fn view(&self) -> SessionView {
        let history = self.history_entries();
        let session = self.session();
        SessionView {
            state: session.state,
            analysis: session.current.clone(),
            error: session.error.clone(),
            notices: session.notices.clone(),
            history,
        }
    }

    /// Most recent first.
    pub fn history_entries(&self) -> Vec<HistoryEntry> {
        self.history().all().to_vec()
    }

    fn begin(&self) -> Result<InFlight<'_>, PipelineError> {
        let mut session = self.session();
        if session.state != PipelineState::Idle {
            warn!(
                "Rejecting submission: pipeline is {:?}",
                session.state
            );
            return Err(PipelineError::Busy);
        }
        session.state = PipelineState::Normalizing;
        session.error = None;
        session.notices.clear();
        info!("Pipeline: Idle -> Normalizing");
        Ok(InFlight {
            orchestrator: self,
            finished: false,
        })
    }

    fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn history(&self) -> MutexGuard<'_, HistoryLog> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// One active run. Dropping it unfinished (e.g. the caller abandoned the
/// future) returns the orchestrator to `Idle`.
struct InFlight<'a> {
    orchestrator: &'a Orchestrator,
    finished: bool,
}

impl InFlight<'_> {
    fn enter(&self, next: PipelineState) {
        let mut session = self.orchestrator.session();
        info!("Pipeline: {:?} -> {:?}", session.state, next);
        session.state = next;
    }

    fn note(&self, notice: String) {
        self.orchestrator.session().notices.push(notice);
    }

    fn succeed(mut self, report: AnalysisReport) -> Submission {
        let analysis = {
            let mut session = self.orchestrator.session();
            session.state = PipelineState::Succeeded;
            // Non-decreasing within a session even if the wall clock steps back.
            let timestamp = Utc::now().timestamp_millis().max(session.last_timestamp);
            session.last_timestamp = timestamp;
            ResumeAnalysis {
                id: Uuid::new_v4().to_string(),
                timestamp,
                report,
            }
        };

        let entry = HistoryEntry::from_analysis(&analysis);
        if let Err(e) = self.orchestrator.history().append(entry) {
            warn!("Failed to persist history entry {}: {e}", analysis.id);
            self.note(HISTORY_NOT_SAVED.to_string());
        }

        let notices = {
            let mut session = self.orchestrator.session();
            session.current = Some(analysis.clone());
            session.state = PipelineState::Idle;
            session.notices.clone()
        };
        self.finished = true;

        info!(
            "Pipeline: analysis {} succeeded (overall {}/100)",
            analysis.id, analysis.report.score.overall
        );
        Submission { analysis, notices }
    }

    fn fail(mut self, err: PipelineError, modality: Modality) -> PipelineError {
        error!("Pipeline run failed: {err}");
        let message = err.user_message(modality);
        {
            let mut session = self.orchestrator.session();
            session.state = PipelineState::Failed;
            session.error = Some(message);
            session.state = PipelineState::Idle;
        }
        self.finished = true;
        err
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.finished {
            warn!("Pipeline run abandoned before completion");
            self.orchestrator.session().state = PipelineState::Idle;
        }
    }
}
