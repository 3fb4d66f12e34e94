pub mod analyzer;
pub mod api;
pub mod config;
pub mod features;

pub use analyzer::{analyze, AnalysisResult, ThreatLevel};
pub use api::{create_router, run_server, ApiError};
pub use config::Config;
