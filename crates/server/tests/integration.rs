use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::http::StatusCode;
use axum_test::TestServer;
use cinedeck_core::error::ApiError;
use cinedeck_core::types::{MovieRecord, SearchHit, TitleKind};
use cinedeck_metadata::MovieApi;
use cinedeck_server::controller::ViewState;
use cinedeck_server::render::{DETAIL_NOT_FOUND, NO_GENRE_MATCH};
use cinedeck_server::routes::build_router;
use cinedeck_server::state::AppState;
use serde_json::Value;

/// In-memory stand-in for the OMDb API that counts every call.
#[derive(Default)]
struct FakeApi {
    movies: HashMap<String, MovieRecord>,
    searches: HashMap<String, Vec<String>>,
    broken_ids: Vec<String>,
    search_calls: AtomicUsize,
    lookup_calls: AtomicUsize,
}

impl FakeApi {
    fn with_movie(mut self, id: &str, title: &str, genres: &str) -> Self {
        let rec = MovieRecord {
            title: title.to_string(),
            year: Some("2001".into()),
            genres: genres.split(", ").map(|s| s.to_string()).collect(),
            runtime_minutes: Some(90),
            runtime_raw: Some("90 min".into()),
            found: true,
            ..MovieRecord::not_found(id)
        };
        self.movies.insert(id.to_string(), rec);
        self
    }

    fn with_search(mut self, query: &str, ids: &[&str]) -> Self {
        self.searches.insert(
            query.to_string(),
            ids.iter().map(|s| s.to_string()).collect(),
        );
        self
    }

    fn with_broken(mut self, id: &str) -> Self {
        self.broken_ids.push(id.to_string());
        self
    }

    fn calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst) + self.lookup_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl MovieApi for FakeApi {
    fn name(&self) -> &str {
        "fake"
    }

    async fn lookup_by_id(&self, id: &str) -> Result<MovieRecord, ApiError> {
        self.lookup_calls.fetch_add(1, Ordering::SeqCst);
        if self.broken_ids.iter().any(|b| b == id) {
            return Err(ApiError::Transport("connection reset".into()));
        }
        self.movies
            .get(id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("{id}: Incorrect IMDb ID.")))
    }

    async fn lookup_detail(&self, id: &str) -> Result<MovieRecord, ApiError> {
        let mut rec = self.lookup_by_id(id).await?;
        rec.plot = Some(format!("Full plot of {}.", rec.title));
        Ok(rec)
    }

    async fn search_by_title(&self, query: &str) -> Result<Vec<SearchHit>, ApiError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if query == "offline" {
            return Err(ApiError::Transport("OMDb returned 503".into()));
        }
        let ids = self
            .searches
            .get(query)
            .filter(|ids| !ids.is_empty())
            .ok_or_else(|| ApiError::NotFound(format!("{query}: Movie not found!")))?;
        Ok(ids
            .iter()
            .map(|id| SearchHit {
                id: id.clone(),
                title: id.clone(),
                year: Some("1995".to_string()),
                kind: Some(TitleKind::Movie),
            })
            .collect())
    }
}

fn fake_api() -> FakeApi {
    FakeApi::default()
        .with_movie("tt0468569", "The Dark Knight", "Action, Crime, Drama")
        .with_movie("tt0133093", "The Matrix", "Action, Sci-Fi")
        .with_movie("tt0111161", "The Shawshank Redemption", "Drama")
        .with_movie("tt0096895", "Batman", "Action, Adventure")
        .with_movie("tt0372784", "Batman Begins", "Action, Crime, Drama")
        .with_search("batman", &["tt0372784", "tt0096895"])
        .with_search("partial", &["tt0468569", "tt-broken", "tt0133093"])
        .with_broken("tt-broken")
}

async fn test_app(api: Arc<FakeApi>, catalogue: &[&str]) -> (TestServer, AppState) {
    let state = AppState::new(api, catalogue.iter().map(|s| s.to_string()).collect());
    state.load_catalogue().await;
    let server = TestServer::new(build_router(state.clone())).unwrap();
    (server, state)
}

async fn default_app() -> (TestServer, AppState, Arc<FakeApi>) {
    let api = Arc::new(fake_api());
    let (server, state) =
        test_app(api.clone(), &["tt0468569", "tt0133093", "tt0111161"]).await;
    (server, state, api)
}

async fn page(server: &TestServer) -> String {
    let resp = server.get("/").await;
    resp.assert_status_ok();
    resp.text()
}

fn card_count(html: &str) -> usize {
    html.matches(r#"class="movie-card""#).count()
}

async fn stored_ids(state: &AppState) -> Vec<String> {
    let controller = state.controller.lock().await;
    controller
        .store()
        .current()
        .iter()
        .map(|r| r.id.clone())
        .collect()
}

#[tokio::test]
async fn health_endpoint_returns_ok() {
    let (server, _, _) = default_app().await;
    let resp = server.get("/health").await;
    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn start_page_shows_catalogue() {
    let (server, state, _) = default_app().await;
    let html = page(&server).await;
    assert_eq!(card_count(&html), 3);
    assert!(html.contains("The Dark Knight"));
    assert!(html.contains("1h 30min"));
    assert!(!html.contains(r#"<body class="modal-open">"#));
    assert_eq!(state.controller.lock().await.state(), ViewState::Loaded);
}

#[tokio::test]
async fn catalogue_with_no_successes_shows_error() {
    let api = Arc::new(fake_api());
    let (server, state) = test_app(api, &["tt-missing", "tt-broken"]).await;
    let html = page(&server).await;
    assert!(html.contains("Could not load popular movies."));
    assert_eq!(card_count(&html), 0);
    assert_eq!(state.controller.lock().await.state(), ViewState::Error);
}

#[tokio::test]
async fn blank_search_issues_no_calls() {
    let (server, state, api) = default_app().await;
    let before = api.calls();

    let resp = server
        .post("/search")
        .form(&[("q", "   ")])
        .await;
    resp.assert_status(StatusCode::SEE_OTHER);

    assert_eq!(api.calls(), before);
    assert_eq!(stored_ids(&state).await.len(), 3);
    let html = page(&server).await;
    assert!(html.contains("Enter a title."));
    assert_eq!(card_count(&html), 3);
}

#[tokio::test]
async fn search_replaces_store_in_hit_order() {
    let (server, state, _) = default_app().await;
    server.get("/filter").add_query_param("genre", "Sci-Fi").await;

    server.post("/search").form(&[("q", "batman")]).await;

    assert_eq!(stored_ids(&state).await, ["tt0372784", "tt0096895"]);
    let html = page(&server).await;
    assert_eq!(card_count(&html), 2);
    assert!(html.find("Batman Begins").unwrap() < html.find(">Batman<").unwrap());
    assert!(html.contains("Found 2 movies for &quot;batman&quot;."));
    assert!(html.contains(r#"<option value="all" selected>"#));
}

#[tokio::test]
async fn partial_lookup_failure_keeps_successes() {
    let (server, state, _) = default_app().await;
    server.post("/search").form(&[("q", "partial")]).await;

    assert_eq!(stored_ids(&state).await, ["tt0468569", "tt0133093"]);
    assert_eq!(card_count(&page(&server).await), 2);
}

#[tokio::test]
async fn search_without_match_shows_empty_state() {
    let (server, state, _) = default_app().await;
    server.post("/search").form(&[("q", "nothing here")]).await;

    let html = page(&server).await;
    assert!(html.contains("No movies found for &quot;nothing here&quot;."));
    assert!(html.contains("Try a different search term."));
    assert_eq!(card_count(&html), 0);
    assert_eq!(state.controller.lock().await.state(), ViewState::Empty);
}

#[tokio::test]
async fn search_transport_failure_shows_status() {
    let (server, state, _) = default_app().await;
    server.post("/search").form(&[("q", "offline")]).await;

    let html = page(&server).await;
    assert!(html.contains("Could not reach the server."));
    assert_eq!(state.controller.lock().await.state(), ViewState::Error);
    assert_eq!(stored_ids(&state).await.len(), 3);
}

#[tokio::test]
async fn genre_filter_is_local() {
    let (server, state, api) = default_app().await;
    let before = api.calls();

    let resp = server.get("/filter").add_query_param("genre", "Drama").await;
    resp.assert_status(StatusCode::SEE_OTHER);
    let html = page(&server).await;
    assert_eq!(card_count(&html), 2);
    assert!(!html.contains("The Matrix"));

    server.get("/filter").add_query_param("genre", "Western").await;
    let html = page(&server).await;
    assert!(html.contains(NO_GENRE_MATCH));
    assert_eq!(card_count(&html), 0);

    server.get("/filter").add_query_param("genre", "all").await;
    assert_eq!(card_count(&page(&server).await), 3);

    assert_eq!(api.calls(), before);
    assert_eq!(stored_ids(&state).await.len(), 3);
}

#[tokio::test]
async fn card_opens_detail_overlay() {
    let (server, _, _) = default_app().await;
    let resp = server.get("/movies/tt0133093").await;
    resp.assert_status(StatusCode::SEE_OTHER);

    let html = page(&server).await;
    assert!(html.contains(r#"<body class="modal-open">"#));
    assert!(html.contains("Full plot of The Matrix."));
    assert!(html.contains("<strong>Runtime:</strong> 90 min"));
}

#[tokio::test]
async fn missing_detail_shows_placeholder() {
    let (server, _, _) = default_app().await;
    server.get("/movies/tt0000000").await;

    let html = page(&server).await;
    assert!(html.contains("modal-overlay is-visible"));
    assert!(html.contains(DETAIL_NOT_FOUND));
}

#[tokio::test]
async fn every_close_route_restores_scrolling() {
    let (server, state, _) = default_app().await;

    for via in ["button", "backdrop", "escape"] {
        server.get("/movies/tt0111161").await;
        assert!(state.view().await.scroll_locked());

        let resp = if via == "button" {
            server.post("/modal/close").add_query_param("via", via).await
        } else {
            server.get("/modal/close").add_query_param("via", via).await
        };
        resp.assert_status(StatusCode::SEE_OTHER);

        assert!(!state.view().await.scroll_locked());
        let html = page(&server).await;
        assert!(html.contains("<body>"));
        assert!(!html.contains("modal-overlay is-visible"));
    }
}

#[tokio::test]
async fn api_lists_filtered_store() {
    let (server, _, _) = default_app().await;

    let resp = server.get("/api/v1/movies").await;
    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body.as_array().unwrap().len(), 3);

    let resp = server
        .get("/api/v1/movies")
        .add_query_param("genre", "Sci-Fi")
        .await;
    let body: Value = resp.json();
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["id"], "tt0133093");
}

#[tokio::test]
async fn api_detail_not_found_uses_error_envelope() {
    let (server, _, _) = default_app().await;

    let resp = server.get("/api/v1/movies/tt0468569").await;
    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["title"], "The Dark Knight");

    let resp = server.get("/api/v1/movies/tt9999999").await;
    resp.assert_status(StatusCode::NOT_FOUND);
    let body: Value = resp.json();
    assert_eq!(body["error"]["code"], "not_found");

    let resp = server.get("/api/v1/movies/tt-broken").await;
    resp.assert_status(StatusCode::BAD_GATEWAY);
    let body: Value = resp.json();
    assert_eq!(body["error"]["code"], "transport_error");
}
