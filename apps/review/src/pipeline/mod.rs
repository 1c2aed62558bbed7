// Analysis Orchestrator
// Single-flight state machine: Idle → Normalizing → Analyzing → {Succeeded, Failed} → Idle.

pub mod orchestrator;
pub mod state;

pub use orchestrator::Orchestrator;
pub use state::{SessionStatus, SessionView};
