//! HTML rendering of cards, the detail overlay and the full page.
//!
//! Every function here is a pure function of its input. Interpolated text is
//! always escaped.

use cinedeck_core::types::{ALL_GENRES, GenreSelection, MovieRecord};

use crate::controller::{Headline, ModalContent, PageView, Results};

pub const PLACEHOLDER_POSTER: &str = "https://via.placeholder.com/300x450?text=No+image";
pub const NO_RATING: &str = "-";
pub const NO_GENRE_MATCH: &str = "No movies found for this genre.";
pub const NO_DESCRIPTION: &str = "No description available.";
pub const DETAIL_NOT_FOUND: &str = "Could not fetch details.";
pub const DETAIL_FAILED: &str = "Something went wrong.";

/// Discrete options of the genre selector, after the "all" sentinel.
pub const GENRE_OPTIONS: &[&str] = &[
    "Action",
    "Adventure",
    "Animation",
    "Biography",
    "Comedy",
    "Crime",
    "Drama",
    "Family",
    "Fantasy",
    "History",
    "Horror",
    "Music",
    "Mystery",
    "Romance",
    "Sci-Fi",
    "Thriller",
    "War",
    "Western",
];

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Format total minutes as `"{h}h {m}min"`, `"{h}h"` or `"{m}min"`.
pub fn format_runtime(minutes: Option<u32>) -> String {
    let Some(m) = minutes else {
        return String::new();
    };
    let (h, r) = (m / 60, m % 60);
    match (h, r) {
        (0, r) => format!("{r}min"),
        (h, 0) => format!("{h}h"),
        (h, r) => format!("{h}h {r}min"),
    }
}

/// Display fields of one result card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieCard {
    pub id: String,
    pub title: String,
    pub year: String,
    pub genre: String,
    pub runtime: String,
    pub rating: String,
    pub poster: String,
}

impl MovieCard {
    pub fn from_record(rec: &MovieRecord) -> Self {
        Self {
            id: rec.id.clone(),
            title: rec.title.clone(),
            year: rec.year.clone().unwrap_or_default(),
            genre: rec.primary_genre().unwrap_or_default().to_string(),
            runtime: format_runtime(rec.runtime_minutes),
            rating: rec.rating.clone().unwrap_or_else(|| NO_RATING.to_string()),
            poster: poster_or_placeholder(rec),
        }
    }

    pub fn to_html(&self) -> String {
        format!(
            r#"<a class="movie-card" href="/movies/{path_id}" data-id="{id}">
  <div class="movie-card-image-wrapper">
    <img src="{poster}" alt="{title}">
    <div class="movie-badge">{rating}</div>
  </div>
  <div class="movie-card-content">
    <div class="movie-title">{title}</div>
    <div class="movie-year-type">
      <span>{year}</span><span>&bull;</span><span>&#9201; {runtime}</span><span>&bull;</span><span>{genre}</span>
    </div>
  </div>
</a>
"#,
            path_id = escape(&urlencoding::encode(&self.id)),
            id = escape(&self.id),
            poster = escape(&self.poster),
            title = escape(&self.title),
            rating = escape(&self.rating),
            year = escape(&self.year),
            runtime = escape(&self.runtime),
            genre = escape(&self.genre),
        )
    }
}

fn poster_or_placeholder(rec: &MovieRecord) -> String {
    rec.poster_url
        .clone()
        .unwrap_or_else(|| PLACEHOLDER_POSTER.to_string())
}

/// One card per record, in input order.
pub fn render_cards(records: &[MovieRecord]) -> String {
    records
        .iter()
        .map(|r| MovieCard::from_record(r).to_html())
        .collect()
}

/// Inner markup of the results grid.
pub fn render_results(results: &Results) -> String {
    match results {
        Results::Cards(records) => render_cards(records),
        Results::NoGenreMatch => format!(r#"<p class="results-empty">{NO_GENRE_MATCH}</p>"#),
    }
}

fn or_dash(value: Option<&str>) -> String {
    escape(value.unwrap_or("-"))
}

pub fn render_detail(rec: &MovieRecord) -> String {
    let genres = if rec.genres.is_empty() {
        None
    } else {
        Some(rec.genres.join(", "))
    };

    format!(
        r#"<div class="modal-body">
  <img src="{poster}" alt="{title}">
  <div>
    <h3>{title}</h3>
    <div class="movie-meta">
      <strong>Year:</strong> {year}<br>
      <strong>Genre:</strong> {genres}<br>
      <strong>Runtime:</strong> {runtime}<br>
      <strong>IMDb:</strong> {rating}<br>
      <strong>Director:</strong> {director}<br>
      <strong>Actors:</strong> {actors}
    </div>
    <p class="movie-plot">{plot}</p>
  </div>
</div>
"#,
        poster = escape(&poster_or_placeholder(rec)),
        title = escape(&rec.title),
        year = or_dash(rec.year.as_deref()),
        genres = or_dash(genres.as_deref()),
        runtime = or_dash(rec.runtime_raw.as_deref()),
        rating = or_dash(rec.rating.as_deref()),
        director = or_dash(rec.director.as_deref()),
        actors = or_dash(rec.actors.as_deref()),
        plot = escape(rec.plot.as_deref().unwrap_or(NO_DESCRIPTION)),
    )
}

pub fn render_modal_content(content: &ModalContent) -> String {
    match content {
        ModalContent::Detail(rec) => render_detail(rec),
        ModalContent::NotFound => format!("<p>{DETAIL_NOT_FOUND}</p>"),
        ModalContent::Failed => format!("<p>{DETAIL_FAILED}</p>"),
    }
}

fn genre_option(value: &str, label: &str, selected: bool) -> String {
    let sel = if selected { " selected" } else { "" };
    format!(
        "<option value=\"{}\"{sel}>{}</option>\n",
        escape(value),
        escape(label)
    )
}

fn render_genre_options(selected: &GenreSelection) -> String {
    let all = genre_option(ALL_GENRES, "All genres", selected.is_all());
    let rest: String = GENRE_OPTIONS
        .iter()
        .map(|g| genre_option(g, g, selected.as_str() == *g))
        .collect();
    all + &rest
}

fn render_headline(headline: &Headline) -> String {
    match headline {
        Headline::Popular => "Popular movies".to_string(),
        Headline::SearchResults(q) => format!(
            r#"Search results for <span class="highlight">"{}"</span>"#,
            escape(q)
        ),
    }
}

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; background: #0f172a; color: #e2e8f0; margin: 0; }
body.modal-open { overflow: hidden; }
main { max-width: 1200px; margin: 0 auto; padding: 1.5rem; }
.controls { display: flex; gap: 0.75rem; flex-wrap: wrap; }
.message { min-height: 1.5rem; color: #94a3b8; }
.highlight { color: #38bdf8; }
.results { display: grid; grid-template-columns: repeat(auto-fill, minmax(180px, 1fr)); gap: 1rem; }
.results-empty { grid-column: 1 / -1; text-align: center; color: #94a3b8; padding: 2rem; }
.movie-card { display: block; color: inherit; text-decoration: none; background: #1e293b; border-radius: 0.5rem; overflow: hidden; }
.movie-card-image-wrapper { position: relative; }
.movie-card img { width: 100%; display: block; }
.movie-badge { position: absolute; top: 0.5rem; right: 0.5rem; background: #facc15; color: #0f172a; padding: 0 0.4rem; border-radius: 0.25rem; }
.movie-card-content { padding: 0.5rem; }
.movie-year-type span { margin-right: 0.25rem; font-size: 0.85rem; color: #94a3b8; }
.modal-overlay { display: none; position: fixed; inset: 0; }
.modal-overlay.is-visible { display: flex; align-items: center; justify-content: center; }
.modal-backdrop { position: absolute; inset: 0; background: rgba(0, 0, 0, 0.7); }
.modal { position: relative; background: #1e293b; padding: 1.5rem; border-radius: 0.5rem; max-width: 800px; }
.modal-body { display: flex; gap: 1rem; }
.modal-body img { max-width: 240px; }
.modal-close { position: absolute; top: 0.5rem; right: 0.5rem; }
"#;

const ESCAPE_SCRIPT: &str = r#"
document.addEventListener("keydown", function (e) {
  if (e.key === "Escape" && document.body.classList.contains("modal-open")) {
    window.location.href = "/modal/close?via=escape";
  }
});
"#;

/// Full HTML document for the current view.
pub fn render_page(view: &PageView) -> String {
    let modal_open = view.modal.is_open();
    let body_class = if modal_open { r#" class="modal-open""# } else { "" };
    let overlay_class = if modal_open {
        "modal-overlay is-visible"
    } else {
        "modal-overlay"
    };
    let modal_inner = view
        .modal
        .content()
        .map(render_modal_content)
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>cinedeck</title>
<style>{STYLE}</style>
</head>
<body{body_class}>
<main>
  <header class="controls">
    <form id="search-form" method="post" action="/search">
      <input id="search-input" type="text" name="q" value="{query}" placeholder="Search for a movie title">
      <button type="submit">Search</button>
    </form>
    <form id="genre-form" method="get" action="/filter">
      <select id="genre-filter" name="genre" onchange="this.form.submit()">
{genre_options}      </select>
      <noscript><button type="submit">Filter</button></noscript>
    </form>
  </header>
  <p id="message" class="message">{status}</p>
  <h2 class="results-title">{headline}</h2>
  <p class="results-subtitle">{subtitle}</p>
  <section id="results" class="results">
{results}  </section>
</main>
<div id="modal-overlay" class="{overlay_class}">
  <a class="modal-backdrop" href="/modal/close?via=backdrop" aria-label="Close"></a>
  <div class="modal">
    <form method="post" action="/modal/close?via=button">
      <button id="modal-close" class="modal-close" type="submit" aria-label="Close">&times;</button>
    </form>
    <div id="modal-content">{modal_inner}</div>
  </div>
</div>
<script>{ESCAPE_SCRIPT}</script>
</body>
</html>
"#,
        query = escape(&view.query),
        genre_options = render_genre_options(&view.genre),
        status = escape(&view.status),
        headline = render_headline(&view.headline),
        subtitle = escape(&view.subtitle),
        results = render_results(&view.results),
    )
}
