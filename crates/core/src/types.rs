use serde::{Deserialize, Serialize};

/// Sentinel value of the genre selector meaning "no filter".
pub const ALL_GENRES: &str = "all";

/// Normalized representation of one title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub id: String,
    pub title: String,
    pub year: Option<String>,
    pub genres: Vec<String>,
    pub runtime_minutes: Option<u32>,
    /// Runtime exactly as the provider reported it, e.g. `"148 min"`.
    pub runtime_raw: Option<String>,
    pub rating: Option<String>,
    pub poster_url: Option<String>,
    pub plot: Option<String>,
    pub director: Option<String>,
    pub actors: Option<String>,
    pub found: bool,
}

impl MovieRecord {
    /// Placeholder for an id the provider does not know. Carries no other data.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            year: None,
            genres: Vec::new(),
            runtime_minutes: None,
            runtime_raw: None,
            rating: None,
            poster_url: None,
            plot: None,
            director: None,
            actors: None,
            found: false,
        }
    }

    /// First listed genre, used for the card badge.
    pub fn primary_genre(&self) -> Option<&str> {
        self.genres.first().map(String::as_str)
    }

    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }
}

/// Title kind reported by the search endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleKind {
    Movie,
    Series,
    Episode,
    Game,
}

impl TitleKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Series => "series",
            Self::Episode => "episode",
            Self::Game => "game",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "movie" => Some(Self::Movie),
            "series" => Some(Self::Series),
            "episode" => Some(Self::Episode),
            "game" => Some(Self::Game),
            _ => None,
        }
    }
}

impl std::fmt::Display for TitleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lightweight search result, prior to the full detail lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: String,
    pub title: String,
    pub year: Option<String>,
    pub kind: Option<TitleKind>,
}

/// Current value of the genre selector.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GenreSelection {
    #[default]
    All,
    Genre(String),
}

impl GenreSelection {
    pub fn parse(value: &str) -> Self {
        if value == ALL_GENRES || value.is_empty() {
            Self::All
        } else {
            Self::Genre(value.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_GENRES,
            Self::Genre(g) => g,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl std::fmt::Display for GenreSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
