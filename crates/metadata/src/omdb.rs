//! OMDb (Open Movie Database) client.
//!
//! Every call is a GET against one endpoint with the API key and the call
//! shape as query parameters: `i=<id>` for lookups, `s=<query>` for search.
//! The API reports "no match" in-band with `"Response": "False"` and an HTTP
//! 200, which maps to `ApiError::NotFound` rather than a transport failure.

use cinedeck_core::error::ApiError;
use cinedeck_core::types::{MovieRecord, SearchHit, TitleKind};
use tracing::debug;

use crate::provider::MovieApi;

pub const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";

/// Marker OMDb uses for any missing field.
const NOT_AVAILABLE: &str = "N/A";

pub struct OmdbClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl OmdbClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            client: reqwest::Client::new(),
        }
    }

    async fn get_json(&self, params: &[(&str, &str)]) -> Result<serde_json::Value, ApiError> {
        let mut all_params = vec![("apikey", self.api_key.as_str())];
        all_params.extend_from_slice(params);

        debug!(url = %self.base_url, ?params, "OMDb request");

        let resp = self
            .client
            .get(&self.base_url)
            .query(&all_params)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(ApiError::Transport(format!(
                "OMDb returned {}",
                resp.status()
            )));
        }

        resp.json()
            .await
            .map_err(|e| ApiError::Parse(format!("parse JSON: {e}")))
    }
}

#[async_trait::async_trait]
impl MovieApi for OmdbClient {
    fn name(&self) -> &str {
        "omdb"
    }

    async fn lookup_by_id(&self, id: &str) -> Result<MovieRecord, ApiError> {
        let data = self.get_json(&[("i", id)]).await?;
        parse_movie(id, &data)
    }

    async fn lookup_detail(&self, id: &str) -> Result<MovieRecord, ApiError> {
        let data = self.get_json(&[("i", id), ("plot", "full")]).await?;
        parse_movie(id, &data)
    }

    async fn search_by_title(&self, query: &str) -> Result<Vec<SearchHit>, ApiError> {
        let data = self.get_json(&[("s", query)]).await?;
        parse_search(query, &data)
    }
}

/// Fail with `NotFound` if the body carries OMDb's in-band "no match" flag.
fn check_response(subject: &str, data: &serde_json::Value) -> Result<(), ApiError> {
    if !data.is_object() {
        return Err(ApiError::Parse("expected a JSON object".into()));
    }
    match data["Response"].as_str() {
        Some("True") => Ok(()),
        Some("False") => {
            let reason = data["Error"].as_str().unwrap_or("no match");
            Err(ApiError::NotFound(format!("{subject}: {reason}")))
        }
        _ => Err(ApiError::Parse("missing Response field".into())),
    }
}

/// Treat absent, empty and `"N/A"` string fields alike.
fn field(data: &serde_json::Value, key: &str) -> Option<String> {
    data[key]
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != NOT_AVAILABLE)
        .map(|s| s.to_string())
}

fn parse_genres(raw: Option<&str>) -> Vec<String> {
    raw.map(|g| {
        g.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty() && *s != NOT_AVAILABLE)
            .map(|s| s.to_string())
            .collect()
    })
    .unwrap_or_default()
}

/// Leading integer of a runtime like `"148 min"`.
fn parse_runtime_minutes(raw: &str) -> Option<u32> {
    let digits: String = raw
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

fn parse_movie(requested_id: &str, data: &serde_json::Value) -> Result<MovieRecord, ApiError> {
    check_response(requested_id, data)?;

    let title = data["Title"]
        .as_str()
        .ok_or_else(|| ApiError::Parse(format!("{requested_id}: missing Title")))?;
    let runtime_raw = field(data, "Runtime");

    Ok(MovieRecord {
        id: field(data, "imdbID").unwrap_or_else(|| requested_id.to_string()),
        title: title.to_string(),
        year: field(data, "Year"),
        genres: parse_genres(data["Genre"].as_str()),
        runtime_minutes: runtime_raw.as_deref().and_then(parse_runtime_minutes),
        runtime_raw,
        rating: field(data, "imdbRating"),
        poster_url: field(data, "Poster"),
        plot: field(data, "Plot"),
        director: field(data, "Director"),
        actors: field(data, "Actors"),
        found: true,
    })
}

fn parse_search(query: &str, data: &serde_json::Value) -> Result<Vec<SearchHit>, ApiError> {
    check_response(query, data)?;

    let results = data["Search"]
        .as_array()
        .ok_or_else(|| ApiError::Parse("missing Search array".into()))?;

    let hits: Vec<SearchHit> = results
        .iter()
        .filter_map(|r| {
            Some(SearchHit {
                id: field(r, "imdbID")?,
                title: r["Title"].as_str().unwrap_or("Unknown").to_string(),
                year: field(r, "Year"),
                kind: r["Type"].as_str().and_then(TitleKind::parse),
            })
        })
        .collect();

    if hits.is_empty() {
        return Err(ApiError::NotFound(format!("{query}: no results")));
    }
    Ok(hits)
}
