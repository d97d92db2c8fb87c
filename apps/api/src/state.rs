use std::sync::Arc;

use crate::analysis::narrative::NarrativeGenerator;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable narrative backend. Production wires the LLM-backed
    /// generator; tests substitute a canned one.
    pub narrative: Arc<dyn NarrativeGenerator>,
}
