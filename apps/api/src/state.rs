use std::sync::Arc;

use crate::config::Config;
use crate::errors::AppError;
use crate::textkernel::DocumentService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Parsing and scoring backend. `None` when credentials are not configured.
    documents: Option<Arc<dyn DocumentService>>,
}

impl AppState {
    pub fn new(config: Config, documents: Option<Arc<dyn DocumentService>>) -> Self {
        Self { config, documents }
    }

    /// The configured backend, or a configuration error. Checked before any
    /// external call is made.
    pub fn documents(&self) -> Result<&dyn DocumentService, AppError> {
        self.documents.as_deref().ok_or_else(|| {
            AppError::Configuration(
                "TEXTKERNEL_ACCOUNT_ID and TEXTKERNEL_API_KEY must be set".to_string(),
            )
        })
    }
}
