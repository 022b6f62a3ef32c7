use std::time::Duration;

use reqwest::{Client as HttpClient, StatusCode};

use crate::{
    error::{AppError, AppResult},
    models::{TmdbGenre, TmdbGenreList, TmdbMovie, TmdbPage},
    services::providers::CatalogProvider,
};

const MAX_RETRIES: u32 = 5;
const BASE_DELAY_MS: u64 = 500;
const MAX_DELAY_MS: u64 = 10_000;

/// TMDB API provider
///
/// Pulls the paginated top-rated movie listing and the genre listing,
/// authenticating with a bearer token. Transient failures (429 and 5xx)
/// are retried with exponential backoff before being surfaced.
#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_token: String,
    api_url: String,
}

impl TmdbProvider {
    pub fn new(api_token: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_token,
            api_url,
        }
    }

    /// GET an endpoint, retrying transient failures with exponential backoff
    async fn get_with_retry(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> AppResult<reqwest::Response> {
        let mut delay = BASE_DELAY_MS;
        let mut last_error = None;

        for attempt in 1..=MAX_RETRIES {
            if attempt > 1 {
                tokio::time::sleep(Duration::from_millis(delay)).await;
                delay = (delay * 2).min(MAX_DELAY_MS);
            }

            match self
                .http_client
                .get(url)
                .bearer_auth(&self.api_token)
                .header("accept", "application/json")
                .query(query)
                .send()
                .await
            {
                Ok(response) if response.status().is_success() => return Ok(response),
                Ok(response) if is_transient(response.status()) => {
                    tracing::warn!(
                        url = %url,
                        status = %response.status(),
                        attempt,
                        "Transient TMDB error, retrying"
                    );
                    last_error = Some(AppError::ExternalApi(format!(
                        "TMDB returned status {}",
                        response.status()
                    )));
                }
                Ok(response) => {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    return Err(AppError::ExternalApi(format!(
                        "TMDB returned status {}: {}",
                        status, body
                    )));
                }
                Err(e) => {
                    tracing::warn!(url = %url, error = %e, attempt, "TMDB request failed, retrying");
                    last_error = Some(AppError::HttpClient(e));
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| AppError::ExternalApi("TMDB retries exhausted".to_string())))
    }
}

fn is_transient(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

#[async_trait::async_trait]
impl CatalogProvider for TmdbProvider {
    async fn fetch_movies(&self, pages: u32) -> AppResult<Vec<TmdbMovie>> {
        let url = format!("{}/movie/top_rated", self.api_url);
        let mut movies = Vec::new();

        for page in 1..=pages {
            let response = self
                .get_with_retry(
                    &url,
                    &[
                        ("language", "en-US".to_string()),
                        ("page", page.to_string()),
                    ],
                )
                .await?;

            let listing: TmdbPage = response.json().await?;
            let fetched = listing.results.len();
            movies.extend(listing.results);

            tracing::debug!(page, fetched, total = movies.len(), "Fetched listing page");

            if page >= listing.total_pages {
                break;
            }
        }

        tracing::info!(
            movies = movies.len(),
            provider = self.name(),
            "Movie listing fetched"
        );

        Ok(movies)
    }

    async fn fetch_genres(&self) -> AppResult<Vec<TmdbGenre>> {
        let url = format!("{}/genre/movie/list", self.api_url);
        let response = self
            .get_with_retry(&url, &[("language", "en-US".to_string())])
            .await?;

        let listing: TmdbGenreList = response.json().await?;

        tracing::info!(
            genres = listing.genres.len(),
            provider = self.name(),
            "Genre listing fetched"
        );

        Ok(listing.genres)
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
