use std::sync::Arc;

use tokio::sync::RwLock;

use crate::calculate::Analyzer;
use crate::catalog::RankingsCatalog;
use crate::session::AnalysisSession;

/// Latest analysis; each new pool replaces it whole.
pub type SharedSession = Arc<RwLock<Option<AnalysisSession>>>;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<RankingsCatalog>,
    pub analyzer: Arc<Analyzer>,
    pub session: SharedSession,
    pub cors_origin: String,
}

impl AppState {
    pub fn new(catalog: RankingsCatalog, analyzer: Analyzer) -> Self {
        Self {
            catalog: Arc::new(catalog),
            analyzer: Arc::new(analyzer),
            session: Arc::new(RwLock::new(None)),
            cors_origin: "*".to_string(),
        }
    }

    pub fn with_cors_origin(mut self, origin: impl Into<String>) -> Self {
        self.cors_origin = origin.into();
        self
    }
}
