use sqlx::PgPool;
use std::sync::Arc;

use crate::services::valuation::ValuationPipeline;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub pipeline: Arc<ValuationPipeline>,
}

impl AppState {
    pub fn new(db: PgPool, pipeline: ValuationPipeline) -> Self {
        Self {
            db,
            pipeline: Arc::new(pipeline),
        }
    }
}
