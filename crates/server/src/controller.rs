//! Interaction controller.
//!
//! A synchronous state machine over one logical page. Network-backed
//! transitions are split into a `begin_*` step that hands out a ticket and a
//! `finish_*` step that applies the outcome. A completion whose ticket is no
//! longer the latest of its kind is discarded, so a slow superseded response
//! never overwrites a newer one.

use cinedeck_core::error::ApiError;
use cinedeck_core::store::MovieStore;
use cinedeck_core::types::{GenreSelection, MovieRecord};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

pub const MSG_LOADING_POPULAR: &str = "Loading popular movies...";
pub const MSG_POPULAR_FAILED: &str = "Could not load popular movies.";
pub const MSG_ENTER_TITLE: &str = "Enter a title.";
pub const MSG_UNREACHABLE: &str = "Could not reach the server.";
pub const MSG_DETAILS_FAILED: &str = "Could not load movie details.";
pub const SUBTITLE_POPULAR: &str = "Hand-picked favourites from the catalogue.";
pub const SUBTITLE_FOUND: &str = "The most talked-about movies matching your search.";
pub const SUBTITLE_NONE: &str = "Try a different search term.";

/// Logical view state of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Empty,
    Error,
}

impl ViewState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Loading => "Loading",
            Self::Loaded => "Loaded",
            Self::Empty => "Empty",
            Self::Error => "Error",
        }
    }
}

impl std::fmt::Display for ViewState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the overlay was dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CloseReason {
    #[default]
    Button,
    Backdrop,
    Escape,
}

impl CloseReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::Backdrop => "backdrop",
            Self::Escape => "escape",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "button" => Some(Self::Button),
            "backdrop" => Some(Self::Backdrop),
            "escape" => Some(Self::Escape),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModalContent {
    Detail(MovieRecord),
    NotFound,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Open(ModalContent),
}

impl ModalState {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }

    pub fn content(&self) -> Option<&ModalContent> {
        match self {
            Self::Open(c) => Some(c),
            Self::Closed => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Headline {
    #[default]
    Popular,
    SearchResults(String),
}

/// What the results grid shows.
#[derive(Debug, Clone, PartialEq)]
pub enum Results {
    Cards(Vec<MovieRecord>),
    /// A genre filter matched nothing in a nonempty store.
    NoGenreMatch,
}

impl Default for Results {
    fn default() -> Self {
        Self::Cards(Vec::new())
    }
}

/// Everything the page displays. This is the rendering target.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub status: String,
    pub query: String,
    pub headline: Headline,
    pub subtitle: String,
    pub genre: GenreSelection,
    pub results: Results,
    pub modal: ModalState,
}

impl Default for PageView {
    fn default() -> Self {
        Self {
            status: String::new(),
            query: String::new(),
            headline: Headline::Popular,
            subtitle: SUBTITLE_POPULAR.to_string(),
            genre: GenreSelection::All,
            results: Results::default(),
            modal: ModalState::Closed,
        }
    }
}

impl PageView {
    /// Page scrolling is disabled exactly while the overlay is open.
    pub fn scroll_locked(&self) -> bool {
        self.modal.is_open()
    }
}

/// Handle for an in-flight load or search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    seq: u64,
    query: Option<String>,
}

impl LoadTicket {
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }
}

/// Handle for an in-flight detail lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailTicket {
    seq: u64,
    pub id: String,
}

/// Outcome of `search_by_title` followed by `lookup_many`.
pub struct SearchOutcome {
    pub hit_count: usize,
    pub results: Vec<Result<MovieRecord, ApiError>>,
}

#[derive(Debug, Default)]
pub struct Controller {
    state: ViewState,
    store: MovieStore,
    view: PageView,
    load_seq: u64,
    detail_seq: u64,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn store(&self) -> &MovieStore {
        &self.store
    }

    pub fn view(&self) -> &PageView {
        &self.view
    }

    fn next_load(&mut self, query: Option<String>) -> LoadTicket {
        self.load_seq += 1;
        LoadTicket {
            seq: self.load_seq,
            query,
        }
    }

    fn is_current(&self, ticket: &LoadTicket) -> bool {
        if ticket.seq != self.load_seq {
            debug!(
                ticket = ticket.seq,
                latest = self.load_seq,
                "discarding superseded completion"
            );
            return false;
        }
        true
    }

    fn transition(&mut self, to: ViewState) {
        if self.state != to {
            info!(from = %self.state, to = %to, "view state");
        }
        self.state = to;
    }

    /// App start: show the loading status and ask for the catalogue.
    pub fn begin_initial_load(&mut self) -> LoadTicket {
        self.transition(ViewState::Loading);
        self.view.status = MSG_LOADING_POPULAR.to_string();
        self.view.headline = Headline::Popular;
        self.view.subtitle = SUBTITLE_POPULAR.to_string();
        self.next_load(None)
    }

    /// Returns whether the outcome was applied.
    pub fn finish_initial_load(
        &mut self,
        ticket: &LoadTicket,
        results: Vec<Result<MovieRecord, ApiError>>,
    ) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        let records = cinedeck_metadata::successes(results);
        if records.is_empty() {
            error!("no catalogue title could be loaded");
            self.transition(ViewState::Error);
            self.view.status = MSG_POPULAR_FAILED.to_string();
            self.view.results = Results::default();
            return true;
        }

        info!(count = records.len(), "catalogue loaded");
        self.install(records);
        self.view.status.clear();
        true
    }

    /// Search submit. Returns `None` without touching anything but the status
    /// line when the query is blank.
    pub fn begin_search(&mut self, raw_query: &str) -> Option<LoadTicket> {
        let query = raw_query.trim();
        if query.is_empty() {
            self.view.status = MSG_ENTER_TITLE.to_string();
            return None;
        }

        self.transition(ViewState::Loading);
        self.view.query = query.to_string();
        self.view.status = format!("Searching for movies matching \"{query}\"...");
        self.view.results = Results::default();
        Some(self.next_load(Some(query.to_string())))
    }

    /// Returns whether the outcome was applied.
    pub fn finish_search(
        &mut self,
        ticket: &LoadTicket,
        outcome: Result<SearchOutcome, ApiError>,
    ) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        let query = ticket.query().unwrap_or_default().to_string();

        let outcome = match outcome {
            Ok(o) => o,
            Err(ApiError::NotFound(reason)) => {
                debug!(%query, %reason, "search: no match");
                self.transition(ViewState::Empty);
                self.view.status = format!("No movies found for \"{query}\".");
                self.view.headline = Headline::SearchResults(query);
                self.view.subtitle = SUBTITLE_NONE.to_string();
                self.view.results = Results::default();
                return true;
            }
            Err(e) => {
                warn!(%query, error = %e, "search failed");
                self.fail(MSG_UNREACHABLE);
                return true;
            }
        };

        let records = cinedeck_metadata::successes(outcome.results);
        if records.is_empty() {
            warn!(%query, hits = outcome.hit_count, "no search hit could be looked up");
            self.fail(MSG_DETAILS_FAILED);
            return true;
        }

        info!(%query, hits = outcome.hit_count, loaded = records.len(), "search loaded");
        self.install(records);
        self.view.status = format!(
            "Found {} movies for \"{query}\".",
            outcome.hit_count
        );
        self.view.headline = Headline::SearchResults(query);
        self.view.subtitle = SUBTITLE_FOUND.to_string();
        true
    }

    fn fail(&mut self, message: &str) {
        self.transition(ViewState::Error);
        self.view.status = message.to_string();
        self.view.results = Results::default();
    }

    /// Replace the store, reset the genre selector and show every record.
    fn install(&mut self, records: Vec<MovieRecord>) {
        self.store.replace_all(records);
        self.view.genre = GenreSelection::All;
        self.view.results = Results::Cards(self.store.current().to_vec());
        self.transition(ViewState::Loaded);
    }

    /// Genre change. Re-renders from the store; status and store are untouched.
    pub fn select_genre(&mut self, genre: &str) {
        let selection = GenreSelection::parse(genre);
        let filtered = self.store.filter_by_genre(selection.as_str());
        debug!(genre = %selection, matched = filtered.len(), "genre filter");

        self.view.results = if filtered.is_empty() && !self.store.is_empty() {
            Results::NoGenreMatch
        } else {
            Results::Cards(filtered)
        };
        self.view.genre = selection;
    }

    /// Card activation. The overlay opens once the lookup completes.
    pub fn begin_detail(&mut self, id: &str) -> DetailTicket {
        self.detail_seq += 1;
        DetailTicket {
            seq: self.detail_seq,
            id: id.to_string(),
        }
    }

    /// Returns whether the outcome was applied.
    pub fn finish_detail(
        &mut self,
        ticket: &DetailTicket,
        outcome: Result<MovieRecord, ApiError>,
    ) -> bool {
        if ticket.seq != self.detail_seq {
            debug!(id = %ticket.id, "discarding superseded detail");
            return false;
        }

        let content = match outcome {
            Ok(rec) => ModalContent::Detail(rec),
            Err(e) if e.is_not_found() => {
                debug!(id = %ticket.id, "detail: not found");
                ModalContent::NotFound
            }
            Err(e) => {
                warn!(id = %ticket.id, error = %e, "detail lookup failed");
                ModalContent::Failed
            }
        };
        self.view.modal = ModalState::Open(content);
        true
    }

    /// Closing also invalidates any detail lookup still in flight.
    pub fn close_modal(&mut self, reason: CloseReason) {
        self.detail_seq += 1;
        if self.view.modal.is_open() {
            debug!(via = reason.as_str(), "modal closed");
        }
        self.view.modal = ModalState::Closed;
    }
}
