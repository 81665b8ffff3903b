use anyhow::{Context, bail};

use cinedeck_metadata::omdb::DEFAULT_BASE_URL;

/// IMDb ids of the default "popular" catalogue shown at start.
pub const POPULAR_MOVIES: &[&str] = &[
    "tt0468569",
    "tt0133093",
    "tt0111161",
    "tt0109830",
    "tt0088763",
    "tt0382932",
    "tt0081505",
    "tt0078748",
    "tt0114369",
    "tt1375666",
    "tt0816692",
    "tt0090605",
    "tt0338013",
    "tt0112573",
    "tt0114709",
    "tt1049413",
    "tt0167260",
    "tt0080684",
    "tt0068646",
    "tt0110912",
    "tt0120737",
    "tt0120689",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_key: String,
    pub api_url: String,
    pub bind_addr: String,
    pub catalogue: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let api_key = lookup("CINEDECK_OMDB_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .context("CINEDECK_OMDB_API_KEY must be set")?;

        let api_url = lookup("CINEDECK_OMDB_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let bind_addr = lookup("CINEDECK_BIND").unwrap_or_else(|| "0.0.0.0:8080".to_string());

        let catalogue = match lookup("CINEDECK_CATALOGUE") {
            Some(list) => {
                let ids = parse_id_list(&list);
                if ids.is_empty() {
                    bail!("CINEDECK_CATALOGUE contains no ids");
                }
                ids
            }
            None => POPULAR_MOVIES.iter().map(|s| s.to_string()).collect(),
        };

        Ok(Self {
            api_key,
            api_url,
            bind_addr,
            catalogue,
        })
    }
}

fn parse_id_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}
