use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::{detect_synergies, is_creature_or_generator};
use crate::ingest::resolve_pool;
use crate::models::{CardRecord, Synergy};

#[derive(Debug, Serialize)]
pub struct CardResponse {
    pub card: Arc<CardRecord>,
    pub is_land: bool,
    pub is_creature: bool,
}

/// Look a card up by exact or partial name.
pub async fn get_card(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<CardResponse>, ApiError> {
    let card = state
        .catalog
        .lookup(&name)
        .ok_or_else(|| ApiError::NotFound(format!("Card {}", name)))?;

    Ok(Json(CardResponse {
        card: card.clone(),
        is_land: card.is_land(),
        is_creature: is_creature_or_generator(card),
    }))
}

#[derive(Debug, Deserialize)]
pub struct SynergyRequest {
    pub card: String,
    /// Pool list to check against; the current session's pool when absent
    #[serde(default)]
    pub list: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SynergyResponse {
    pub card: String,
    pub pool_size: usize,
    pub synergies: Vec<Synergy>,
}

pub async fn synergies(
    State(state): State<AppState>,
    Json(req): Json<SynergyRequest>,
) -> Result<Json<SynergyResponse>, ApiError> {
    let card_name = state
        .catalog
        .lookup(&req.card)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| req.card.trim().to_string());

    let pool = match req.list.as_deref() {
        Some(list) => resolve_pool(&state.catalog, list).cards(),
        None => {
            let guard = state.session.read().await;
            let session = guard.as_ref().ok_or_else(|| {
                ApiError::BadRequest("No pool list given and no pool has been analyzed".to_string())
            })?;
            session.cards().to_vec()
        }
    };

    Ok(Json(SynergyResponse {
        synergies: detect_synergies(&pool, &card_name),
        card: card_name,
        pool_size: pool.len(),
    }))
}
