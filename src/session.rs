//! Analysis sessions.
//!
//! A session owns one analyzed pool and the archetype currently selected for
//! display. A new pool list means a new session; nothing is carried over.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::calculate::{self, Analyzer};
use crate::catalog::RankingsCatalog;
use crate::ingest::resolve_pool;
use crate::models::{
    ArchetypeAnalysis, ColorPair, PairSuggestion, PoolAnalysis, PoolCard, PoolId, PoolOverview,
    ResolvedPool,
};

/// Number of color suggestions shown with a pool.
pub const DEFAULT_SUGGESTIONS: usize = 2;

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisSession {
    pub id: PoolId,
    pub created_at: DateTime<Utc>,
    pub pool: ResolvedPool,
    pub analysis: PoolAnalysis,
    pub selected: Option<ColorPair>,
    #[serde(skip)]
    cards: Vec<PoolCard>,
}

impl AnalysisSession {
    /// Resolve and analyze a pool list. The best-scoring archetype starts selected.
    pub fn new(catalog: &RankingsCatalog, analyzer: &Analyzer, text: &str) -> Self {
        let pool = resolve_pool(catalog, text);
        let cards = pool.cards();
        let analysis = analyzer.analyze(&cards);
        let selected = analysis.ranked().first().map(|a| a.pair);
        let id = PoolId::for_pool(&pool);

        info!(
            "Session {}: {} cards, best archetype {:?}",
            id,
            cards.len(),
            selected
        );

        Self {
            id,
            created_at: Utc::now(),
            pool,
            analysis,
            selected,
            cards,
        }
    }

    /// Expanded pool cards, list order.
    pub fn cards(&self) -> &[PoolCard] {
        &self.cards
    }

    pub fn select(&mut self, pair: ColorPair) {
        self.selected = Some(pair);
    }

    pub fn selected_analysis(&self) -> Option<&ArchetypeAnalysis> {
        self.selected.and_then(|pair| self.analysis.get(pair))
    }

    pub fn overview(&self) -> PoolOverview {
        calculate::pool_overview(&self.cards)
    }

    pub fn suggestions(&self) -> Vec<PairSuggestion> {
        calculate::suggest_color_pairs(&self.cards, DEFAULT_SUGGESTIONS)
    }
}
