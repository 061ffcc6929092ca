use anyhow::Result;
use axum::{extract::{Path, Query, State}, http::StatusCode, routing::{get, put}, Json, Router};
use engine::{FailedDocument, Language, NavEntry, Phase, QueryOutcome, ResultView, SearchSession};
use fetcher::{load_document, DocumentClient, LOAD_ERROR_PLACEHOLDER};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub const DEFAULT_RESULT_LIMIT: usize = 5;
pub const MAX_RESULT_LIMIT: usize = 50;
pub const DEFAULT_PREVIEW_CHARS: usize = 100;

pub const MSG_LOADING: &str = "Loading...";
pub const MSG_DISCOVERY_FAILED: &str = "Failed to load articles.";
pub const MSG_NO_ARTICLES: &str = "No articles found.";

#[derive(Debug, Clone)]
pub struct UiSettings {
    pub result_limit: usize,
    pub preview_chars: usize,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self { result_limit: DEFAULT_RESULT_LIMIT, preview_chars: DEFAULT_PREVIEW_CHARS }
    }
}

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    pub k: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Ranked hits for the query.
    Results,
    /// Query below the minimum length; show the full navigation.
    Navigation,
    /// Index not ready.
    Unavailable,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub language: Language,
    pub mode: SearchMode,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<ResultView>,
}

#[derive(Serialize)]
pub struct NavResponse {
    pub language: Language,
    pub phase: Phase,
    pub entries: Vec<NavEntry>,
    pub message: Option<&'static str>,
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub phase: Phase,
    pub ready: bool,
    pub language: Language,
    pub documents: usize,
    pub indexed_items: usize,
    pub failures: Vec<FailedDocument>,
    pub built_at: Option<String>,
}

#[derive(Serialize)]
pub struct DocResponse {
    pub id: String,
    pub title: String,
    pub language: Language,
    pub html: String,
}

#[derive(Deserialize)]
pub struct LanguageRequest {
    pub language: String,
}

#[derive(Clone)]
pub struct AppState {
    pub session: Arc<SearchSession>,
    pub client: DocumentClient,
    pub settings: UiSettings,
}

impl AppState {
    pub fn new(session: Arc<SearchSession>, client: DocumentClient, settings: UiSettings) -> Self {
        Self { session, client, settings }
    }
}

pub fn build_app(state: AppState) -> Result<Router> {
    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/status", get(status_handler))
        .route("/nav", get(nav_handler))
        .route("/search", get(search_handler))
        .route("/doc/:id", get(doc_handler))
        .route("/language", put(language_handler))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());
    Ok(app)
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Json<SearchResponse> {
    let start = std::time::Instant::now();
    let language = state.session.language();
    let (mode, hits) = match state.session.query_in(&params.q, language) {
        QueryOutcome::BelowMinimum => (SearchMode::Navigation, Vec::new()),
        QueryOutcome::NotReady => (SearchMode::Unavailable, Vec::new()),
        QueryOutcome::Results(hits) => (SearchMode::Results, hits),
    };

    let total_hits = hits.len();
    let k = params.k.unwrap_or(state.settings.result_limit).clamp(1, MAX_RESULT_LIMIT);
    let results: Vec<ResultView> = hits
        .iter()
        .take(k)
        .map(|hit| ResultView::from_scored(hit, state.settings.preview_chars))
        .collect();

    let elapsed = start.elapsed();
    tracing::debug!(query = %params.q, total_hits, took_us = elapsed.as_micros() as u64, "search");
    Json(SearchResponse { query: params.q, language, mode, took_s: elapsed.as_secs_f64(), total_hits, results })
}

pub async fn nav_handler(State(state): State<AppState>) -> Json<NavResponse> {
    // Labels are rendered per request from the discovered documents, so they follow both
    // the end of discovery and language changes without waiting for the index build.
    let phase = state.session.phase();
    let language = state.session.language();
    let entries = state.session.navigation(language);
    let message = match phase {
        Phase::DiscoveryFailed => Some(MSG_DISCOVERY_FAILED),
        Phase::Pending | Phase::Discovering => Some(MSG_LOADING),
        _ if entries.is_empty() => Some(MSG_NO_ARTICLES),
        _ => None,
    };
    Json(NavResponse { language, phase, entries, message })
}

pub async fn status_handler(State(state): State<AppState>) -> Json<StatusResponse> {
    let session = &state.session;
    let index = session.index();
    Json(StatusResponse {
        phase: session.phase(),
        ready: session.is_ready(),
        language: session.language(),
        documents: session.descriptors().len(),
        indexed_items: index.map_or(0, |i| i.len()),
        failures: session.failures(),
        built_at: index.and_then(|i| OffsetDateTime::from(i.built_at()).format(&Rfc3339).ok()),
    })
}

pub async fn doc_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DocResponse>, (StatusCode, Json<serde_json::Value>)> {
    let Some(descriptor) = state.session.descriptor(&id).cloned() else {
        return Err((StatusCode::NOT_FOUND, Json(serde_json::json!({ "error": "not found" }))));
    };

    let body = load_document(&state.client, &descriptor.download_url)
        .await
        .map_err(|_| (StatusCode::BAD_GATEWAY, Json(serde_json::json!({ "error": LOAD_ERROR_PLACEHOLDER }))))?;

    // Language is read after the fetch so a switch made while loading still applies.
    let language = state.session.language();
    Ok(Json(DocResponse {
        id: descriptor.id.clone(),
        title: descriptor.title(language).to_string(),
        language,
        html: body.render(language),
    }))
}

pub async fn language_handler(
    State(state): State<AppState>,
    Json(req): Json<LanguageRequest>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let language: Language = req.language.parse().map_err(|e: engine::Error| (StatusCode::BAD_REQUEST, e.to_string()))?;
    let changed = state.session.set_language(language);
    Ok(Json(serde_json::json!({ "language": language, "changed": changed })))
}
