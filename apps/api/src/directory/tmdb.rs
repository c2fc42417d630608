use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;

use super::{CandidateDetail, DirectoryError, PeopleDirectory, PopularPage};

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
const LANGUAGE: &str = "en-US";

/// HTTP client for the movie-database people endpoints.
///
/// The bearer token is optional at construction time: a missing token turns every
/// request into `DirectoryError::MissingCredential` instead of failing startup.
#[derive(Clone)]
pub struct TmdbClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl TmdbClient {
    pub fn new(base_url: String, token: Option<String>) -> Result<Self, DirectoryError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn token(&self) -> Result<&str, DirectoryError> {
        self.token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(DirectoryError::MissingCredential)
    }

    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<reqwest::Response, DirectoryError> {
        let token = self.token()?;
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(query)
            .send()
            .await?;
        Ok(response)
    }
}

#[async_trait]
impl PeopleDirectory for TmdbClient {
    async fn popular_page(&self, page: u32) -> Result<PopularPage, DirectoryError> {
        let response = self
            .get(
                "/person/popular",
                &[("page", page.to_string()), ("language", LANGUAGE.to_string())],
            )
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::Status {
                status: status.as_u16(),
                resource: format!("popular page {page}"),
            });
        }

        let page: PopularPage = response.json().await?;
        debug!(
            "Fetched popular page {}/{} ({} people)",
            page.page,
            page.total_pages,
            page.results.len()
        );
        Ok(page)
    }

    async fn person_details(&self, id: u64) -> Result<CandidateDetail, DirectoryError> {
        let response = self
            .get(&format!("/person/{id}"), &[("language", LANGUAGE.to_string())])
            .await?;

        let status = response.status();
        // An unknown person simply has no details.
        if status == StatusCode::NOT_FOUND {
            return Ok(CandidateDetail::default());
        }
        if !status.is_success() {
            return Err(DirectoryError::Status {
                status: status.as_u16(),
                resource: format!("person {id}"),
            });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_token_fails_without_network() {
        let client = TmdbClient::new(DEFAULT_BASE_URL.to_string(), None).unwrap();
        let err = client.popular_page(1).await.unwrap_err();
        assert!(matches!(err, DirectoryError::MissingCredential));

        let err = client.person_details(42).await.unwrap_err();
        assert!(matches!(err, DirectoryError::MissingCredential));
    }

    #[tokio::test]
    async fn test_empty_token_counts_as_missing() {
        let client = TmdbClient::new(DEFAULT_BASE_URL.to_string(), Some(String::new())).unwrap();
        assert!(matches!(
            client.popular_page(1).await,
            Err(DirectoryError::MissingCredential)
        ));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = TmdbClient::new("http://localhost:9999/3/".to_string(), None).unwrap();
        assert_eq!(client.base_url, "http://localhost:9999/3");
    }
}
