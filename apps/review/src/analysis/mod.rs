// Analysis Gateway and the structured result it produces.
// All model calls go through llm_client — no direct HTTP here.

pub mod gateway;
pub mod models;

pub use gateway::{AnalysisGateway, GeminiGateway};
pub use models::{AnalysisReport, Priority, ResumeAnalysis};
