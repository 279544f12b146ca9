use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{ArchetypeAnalysis, ColorPair, PairSuggestion, PoolCard, PoolOverview};
use crate::session::AnalysisSession;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub list: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    pub pair: String,
}

/// One row of the archetype ranking.
#[derive(Debug, Serialize)]
pub struct ArchetypeSummary {
    pub pair: ColorPair,
    pub score: u32,
    pub raw_score: u32,
    pub creature_count: u32,
    pub creature_penalty: u32,
    pub fitting: usize,
    pub splash: usize,
}

impl From<&ArchetypeAnalysis> for ArchetypeSummary {
    fn from(a: &ArchetypeAnalysis) -> Self {
        Self {
            pair: a.pair,
            score: a.score,
            raw_score: a.raw_score,
            creature_count: a.creature_count,
            creature_penalty: a.creature_penalty,
            fitting: a.fitting_cards.len(),
            splash: a.splash_cards.len(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub card_count: u32,
    pub not_found: Vec<String>,
    pub selected: Option<ColorPair>,
    pub archetypes: Vec<ArchetypeSummary>,
    pub suggestions: Vec<PairSuggestion>,
    pub overview: PoolOverview,
    pub lands: Vec<PoolCard>,
    pub selected_analysis: Option<ArchetypeAnalysis>,
}

impl From<&AnalysisSession> for SessionResponse {
    fn from(session: &AnalysisSession) -> Self {
        Self {
            id: session.id.to_string(),
            created_at: session.created_at,
            card_count: session.pool.card_count(),
            not_found: session.pool.not_found.iter().map(|n| n.to_string()).collect(),
            selected: session.selected,
            archetypes: session
                .analysis
                .ranked()
                .into_iter()
                .map(ArchetypeSummary::from)
                .collect(),
            suggestions: session.suggestions(),
            overview: session.overview(),
            lands: session.analysis.lands.clone(),
            selected_analysis: session.selected_analysis().cloned(),
        }
    }
}

/// Analyze a pool list and make it the current session.
pub async fn analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    if req.list.trim().is_empty() {
        return Err(ApiError::BadRequest("Pool list is empty".to_string()));
    }

    let session = AnalysisSession::new(&state.catalog, &state.analyzer, &req.list);
    let response = SessionResponse::from(&session);
    info!("Analyzed pool {} ({} cards)", session.id, response.card_count);

    *state.session.write().await = Some(session);
    Ok(Json(response))
}

pub async fn get_session(
    State(state): State<AppState>,
) -> Result<Json<SessionResponse>, ApiError> {
    let guard = state.session.read().await;
    let session = guard
        .as_ref()
        .ok_or_else(|| ApiError::NotFound("No pool has been analyzed".to_string()))?;
    Ok(Json(SessionResponse::from(session)))
}

/// Switch the archetype shown for the current session.
pub async fn select_pair(
    State(state): State<AppState>,
    Json(req): Json<SelectRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let pair: ColorPair = req.pair.parse().map_err(ApiError::BadRequest)?;

    let mut guard = state.session.write().await;
    let session = guard
        .as_mut()
        .ok_or_else(|| ApiError::NotFound("No pool has been analyzed".to_string()))?;
    session.select(pair);
    Ok(Json(SessionResponse::from(&*session)))
}

#[cfg(test)]
mod tests {
    use crate::api::build_router;
    use crate::api::state::AppState;
    use crate::calculate::Analyzer;
    use crate::catalog::RankingsCatalog;
    use crate::models::{CardRecord, Grade};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::util::ServiceExt;

    fn setup_test_state() -> AppState {
        let catalog = RankingsCatalog::new(vec![
            CardRecord::new("Bold Wolf", Grade::B, "1G".parse().ok(), "Creature — Wolf")
                .with_good_in("WG"),
            CardRecord::new("Azure Drake", Grade::BMinus, "2UR".parse().ok(), "Creature — Drake"),
            CardRecord::new("Tide Caller", Grade::C, "1U".parse().ok(), "Creature — Merfolk"),
            CardRecord::new("Starting Town", Grade::C, None, "Land — Town"),
        ]);
        AppState::new(catalog, Analyzer::default())
    }

    async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }

    async fn post_json(app: axum::Router, uri: &str, body: &str) -> (StatusCode, Value) {
        let resp = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_analyze_creates_session() {
        let state = setup_test_state();
        let app = build_router(state.clone());

        let (status, json) = post_json(
            app,
            "/api/analyze",
            r#"{"list": "10 Bold Wolf\n4 Tide Caller\n1 Starting Town\n2 Nonexistent Card"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["card_count"], 15);
        assert_eq!(json["not_found"][0], "2 Nonexistent Card");
        assert_eq!(json["archetypes"].as_array().unwrap().len(), 10);
        assert_eq!(json["lands"][0]["name"], "Starting Town");
        assert_eq!(json["selected"], "UG");
        assert_eq!(json["selected_analysis"]["pair"], "UG");
        assert_eq!(json["id"].as_str().unwrap().len(), 16);

        assert!(state.session.read().await.is_some());
    }

    #[tokio::test]
    async fn test_analyze_rejects_empty_list() {
        let app = build_router(setup_test_state());
        let (status, json) = post_json(app, "/api/analyze", r#"{"list": "   "}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_get_session_before_analyze() {
        let app = build_router(setup_test_state());
        let (status, json) = get_json(app, "/api/session").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_select_pair_updates_session() {
        let state = setup_test_state();
        post_json(
            build_router(state.clone()),
            "/api/analyze",
            r#"{"list": "2 Azure Drake\n4 Bold Wolf"}"#,
        )
        .await;

        let (status, json) = post_json(
            build_router(state.clone()),
            "/api/session/select",
            r#"{"pair": "gu"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["selected"], "UG");
        let splash = json["selected_analysis"]["splash_cards"].as_array().unwrap();
        assert_eq!(splash.len(), 2);
        assert_eq!(splash[0]["splash"]["extra_colors"][0], "R");

        let (status, json) = get_json(build_router(state), "/api/session").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["selected"], "UG");
    }

    #[tokio::test]
    async fn test_select_unknown_pair() {
        let state = setup_test_state();
        post_json(build_router(state.clone()), "/api/analyze", r#"{"list": "1 Bold Wolf"}"#).await;

        let (status, _) = post_json(
            build_router(state),
            "/api/session/select",
            r#"{"pair": "WX"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_select_without_session() {
        let app = build_router(setup_test_state());
        let (status, _) = post_json(app, "/api/session/select", r#"{"pair": "WU"}"#).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_new_analysis_replaces_session() {
        let state = setup_test_state();
        let (_, first) =
            post_json(build_router(state.clone()), "/api/analyze", r#"{"list": "1 Bold Wolf"}"#).await;
        let (_, second) =
            post_json(build_router(state.clone()), "/api/analyze", r#"{"list": "1 Tide Caller"}"#).await;
        assert_ne!(first["id"], second["id"]);

        let (_, current) = get_json(build_router(state), "/api/session").await;
        assert_eq!(current["id"], second["id"]);
    }
}
