// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Games catalog API client.
//!
//! Handles:
//! - Filtered listing (platform, genre, sort order)
//! - Single game lookup by ID
//! - Title search with platform and release-year filters (done client-side,
//!   the API has no search endpoint)

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::Game;

/// Number of games on the front page.
pub const POPULAR_LIMIT: usize = 8;

const PLATFORM_ALL: &str = "all";

/// Sort orders accepted by the catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortBy {
    #[default]
    Relevance,
    #[serde(alias = "popular")]
    Popularity,
    Alphabetical,
    ReleaseDate,
    /// Oldest first: requested as `release-date` and reversed locally.
    #[serde(rename = "release-date-old")]
    ReleaseDateOldest,
}

impl SortBy {
    /// Value sent as `sort-by`.
    fn api_value(&self) -> &'static str {
        match self {
            SortBy::Relevance => "relevance",
            SortBy::Popularity => "popularity",
            SortBy::Alphabetical => "alphabetical",
            SortBy::ReleaseDate | SortBy::ReleaseDateOldest => "release-date",
        }
    }
}

/// Filters for the catalog listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogQuery {
    /// Platform filter; `None` or "all" for every platform
    #[serde(default)]
    pub platform: Option<String>,
    /// Genre ("category" in the API); `None` or "All" for every genre
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub sort: SortBy,
}

impl CatalogQuery {
    /// Query string parameters for `GET /games`.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let platform = self
            .platform
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(PLATFORM_ALL);

        let mut params = vec![("platform", platform.to_string())];
        if let Some(genre) = self
            .genre
            .as_deref()
            .filter(|g| !g.is_empty() && !g.eq_ignore_ascii_case("all"))
        {
            params.push(("category", genre.to_string()));
        }
        params.push(("sort-by", self.sort.api_value().to_string()));
        params
    }
}

/// Filters for a title search.
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    /// Case-insensitive substring of the title
    pub text: String,
    /// Exact platform name; `None` or "all" for every platform
    pub platform: Option<String>,
    /// Only games released in this year or later
    pub from_year: Option<u16>,
}

impl SearchQuery {
    pub fn matches(&self, game: &Game) -> bool {
        let platform_ok = match self.platform.as_deref() {
            None | Some("") | Some(PLATFORM_ALL) => true,
            Some(platform) => game.platform == platform,
        };
        // Games without a parseable year never pass a year filter
        let year_ok = match self.from_year {
            None => true,
            Some(year) => game.release_year().is_some_and(|y| y >= year),
        };
        platform_ok && year_ok && game.title_matches(&self.text)
    }
}

/// Body of `GET /games`: the games, or a status object when nothing matches.
#[derive(Deserialize)]
#[serde(untagged)]
enum GamesResponse {
    Games(Vec<Game>),
    Status {
        status: i64,
        #[serde(default)]
        status_message: String,
    },
}

impl GamesResponse {
    fn into_games(self) -> Vec<Game> {
        match self {
            GamesResponse::Games(games) => games,
            GamesResponse::Status {
                status,
                status_message,
            } => {
                tracing::debug!(status, message = %status_message, "Catalog returned no games");
                Vec::new()
            }
        }
    }
}

/// Catalog API client.
#[derive(Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
    api_host: String,
    api_key: String,
}

impl CatalogClient {
    /// Create a new client for the catalog at `base_url`.
    pub fn new(base_url: String, api_host: String, api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_host,
            api_key,
        }
    }

    /// List games matching the filters, in the requested order.
    pub async fn list_games(&self, query: &CatalogQuery) -> Result<Vec<Game>, AppError> {
        let mut games = self.fetch_games(&query.params()).await?;
        if query.sort == SortBy::ReleaseDateOldest {
            games.reverse();
        }
        tracing::debug!(count = games.len(), sort = ?query.sort, "Fetched catalog listing");
        Ok(games)
    }

    /// The most popular games, at most `limit`.
    pub async fn popular(&self, limit: usize) -> Result<Vec<Game>, AppError> {
        let query = CatalogQuery {
            sort: SortBy::Popularity,
            ..Default::default()
        };
        let mut games = self.list_games(&query).await?;
        games.truncate(limit);
        Ok(games)
    }

    /// Get a single game (with description and screenshots) by ID.
    pub async fn game(&self, id: u64) -> Result<Game, AppError> {
        self.get_json("game", &[("id", id.to_string())]).await
    }

    /// Search every game in the catalog.
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<Game>, AppError> {
        let games = self.fetch_games(&[]).await?;
        let total = games.len();
        let matched: Vec<Game> = games.into_iter().filter(|g| query.matches(g)).collect();
        tracing::debug!(
            text = %query.text,
            total,
            matched = matched.len(),
            "Searched catalog"
        );
        Ok(matched)
    }

    async fn fetch_games(&self, query: &[(&str, String)]) -> Result<Vec<Game>, AppError> {
        let response: GamesResponse = self.get_json("games", query).await?;
        Ok(response.into_games())
    }

    /// GET `<base>/<path>` with the API headers and parse the JSON body.
    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, AppError> {
        let url = format!("{}/{}", self.base_url, path);

        let response = self
            .http
            .get(&url)
            .header("x-rapidapi-host", &self.api_host)
            .header("x-rapidapi-key", &self.api_key)
            .query(query)
            .send()
            .await
            .map_err(|e| AppError::CatalogApi(e.to_string()))?;

        self.check_response_json(response).await
    }

    /// Check response and parse JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            if status.as_u16() == 404 {
                return Err(AppError::NotFound("Game not found in catalog".to_string()));
            }
            if status.as_u16() == 429 {
                tracing::warn!("Catalog rate limit hit (429)");
            }
            return Err(AppError::CatalogApi(format!("HTTP {}: {}", status, body)));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::CatalogApi(format!("Failed to decode response: {}", e)))
    }
}
