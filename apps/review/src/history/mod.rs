// History Log
// Bounded, persisted record of past analyses (summary projections only).

pub mod log;
pub mod store;

pub use log::{HistoryEntry, HistoryLog};
pub use store::{FileStore, KeyValueStore};
