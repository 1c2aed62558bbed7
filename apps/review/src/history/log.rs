//! History Log — the bounded, most-recent-first record of past analyses.
//!
//! Only a projection of each analysis is kept (id, name, overall score, time).
//! The whole list is rewritten under a single key on every append.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::analysis::ResumeAnalysis;
use crate::history::store::{KeyValueStore, StoreError};

pub const HISTORY_KEY: &str = "resume_analysis_history";
pub const MAX_HISTORY_ENTRIES: usize = 10;
const UNTITLED: &str = "Untitled";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    #[serde(rename = "name")]
    pub display_name: String,
    pub overall_score: u8,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl HistoryEntry {
    pub fn from_analysis(analysis: &ResumeAnalysis) -> Self {
        let name = analysis.report.personal_info.name.trim();
        Self {
            id: analysis.id.clone(),
            display_name: if name.is_empty() {
                UNTITLED.to_string()
            } else {
                name.to_string()
            },
            overall_score: analysis.report.score.overall,
            timestamp: analysis.timestamp,
        }
    }
}

pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
    store: Arc<dyn KeyValueStore>,
}

impl HistoryLog {
    /// Reads the persisted log once. Absent data is an empty log; unreadable data
    /// is logged and also treated as empty.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let entries = match read_entries(store.as_ref()) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Ignoring unreadable analysis history: {e}");
                Vec::new()
            }
        };
        info!("Loaded {} history entries", entries.len());
        Self { entries, store }
    }

    /// Prepends `entry`, keeps the newest `MAX_HISTORY_ENTRIES`, and persists.
    ///
    /// The in-memory log is updated even if persisting fails.
    pub fn append(&mut self, entry: HistoryEntry) -> Result<(), StoreError> {
        self.entries.insert(0, entry);
        self.entries.truncate(MAX_HISTORY_ENTRIES);
        self.persist()
    }

    /// Most recent first.
    pub fn all(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn persist(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string(&self.entries)?;
        self.store.set(HISTORY_KEY, &json)
    }
}

fn read_entries(store: &dyn KeyValueStore) -> Result<Vec<HistoryEntry>, StoreError> {
    let Some(raw) = store.get(HISTORY_KEY)? else {
        return Ok(Vec::new());
    };
    let mut entries: Vec<HistoryEntry> = serde_json::from_str(&raw)?;
    entries.truncate(MAX_HISTORY_ENTRIES);
    Ok(entries)
}
