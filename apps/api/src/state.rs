use std::sync::Arc;

use sqlx::PgPool;

use crate::selection::orchestrator::Selector;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Daily pipeline: directory client, eligibility policy and ranking adapter.
    pub selector: Arc<Selector>,
}
