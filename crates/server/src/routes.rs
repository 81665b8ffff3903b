use axum::extract::{Path, Query, State};
use axum::response::{Html, Redirect};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use cinedeck_core::types::{ALL_GENRES, MovieRecord};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::controller::CloseReason;
use crate::error::AppError;
use crate::render::render_page;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(ui_router())
        .nest("/api/v1", api_router())
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

fn ui_router() -> Router<AppState> {
    Router::new()
        .route("/", get(page))
        .route("/search", post(search))
        .route("/filter", get(filter))
        .route("/movies/{id}", get(open_movie))
        .route("/modal/close", get(close_modal).post(close_modal))
}

fn api_router() -> Router<AppState> {
    Router::new()
        .route("/movies", get(list_movies))
        .route("/movies/{id}", get(get_movie))
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

// ---------------------------------------------------------------------------
// Page and user actions
// ---------------------------------------------------------------------------

async fn page(State(state): State<AppState>) -> Html<String> {
    Html(render_page(&state.view().await))
}

#[derive(Deserialize)]
struct SearchForm {
    #[serde(default)]
    q: String,
}

async fn search(State(state): State<AppState>, Form(form): Form<SearchForm>) -> Redirect {
    state.submit_search(&form.q).await;
    Redirect::to("/")
}

#[derive(Deserialize)]
struct FilterParams {
    #[serde(default = "default_genre")]
    genre: String,
}

fn default_genre() -> String {
    ALL_GENRES.to_string()
}

async fn filter(State(state): State<AppState>, Query(params): Query<FilterParams>) -> Redirect {
    state.select_genre(&params.genre).await;
    Redirect::to("/")
}

async fn open_movie(State(state): State<AppState>, Path(id): Path<String>) -> Redirect {
    state.open_detail(&id).await;
    Redirect::to("/")
}

#[derive(Deserialize)]
struct CloseParams {
    via: Option<String>,
}

async fn close_modal(State(state): State<AppState>, Query(params): Query<CloseParams>) -> Redirect {
    let reason = params
        .via
        .as_deref()
        .and_then(CloseReason::parse)
        .unwrap_or_default();
    state.close_modal(reason).await;
    Redirect::to("/")
}

// ---------------------------------------------------------------------------
// JSON API
// ---------------------------------------------------------------------------

async fn list_movies(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> Json<Vec<MovieRecord>> {
    let controller = state.controller.lock().await;
    Json(controller.store().filter_by_genre(&params.genre))
}

async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MovieRecord>, AppError> {
    debug!(%id, "api detail lookup");
    let record = state.api.lookup_detail(&id).await?;
    Ok(Json(record))
}
