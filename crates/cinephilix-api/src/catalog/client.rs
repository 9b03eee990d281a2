//! `CatalogClient` - catalog REST API client implementation.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use super::api::CatalogApi;
use super::error::CatalogError;
use super::normalize::normalize_ids;
use super::params::{PageRequest, PeopleSearchParams, TitleSearchParams};
use super::types::{CastMember, CrewMember, Person, Review, SearchPage, Title};

/// Default backend base URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Environment variable overriding the backend base URL.
pub const API_URL_ENV: &str = "CINEPHILIX_API_URL";

/// Catalog API client.
///
/// Performs exactly one attempt per call; there is no retry or caching.
#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct CatalogClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
}

/// Builder for `CatalogClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct CatalogClientBuilder {
    base_url: Option<Url>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl CatalogClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            user_agent: None,
            timeout: None,
        }
    }

    /// Overrides the base URL (default: `http://localhost:3000`).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets a total request timeout. No timeout when unset.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<CatalogClient> {
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };

        let mut builder = Client::builder().user_agent(&user_agent).gzip(true);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().context("failed to build HTTP client")?;

        Ok(CatalogClient {
            http_client,
            base_url,
        })
    }
}

impl CatalogClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> CatalogClientBuilder {
        CatalogClientBuilder::new()
    }

    /// Returns the configured base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| anyhow::anyhow!("base URL cannot be a base: {}", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends a GET request, normalizes identifiers and decodes the body.
    #[instrument(skip_all)]
    async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self.endpoint(segments)?;
        let path = String::from(url.path());

        let request = self
            .http_client
            .get(url)
            .query(query)
            .build()
            .with_context(|| format!("failed to build request: {path}"))?;

        tracing::debug!(url = %request.url(), "catalog API request");

        let result = self.http_client.execute(request).await;
        let response = result.with_context(|| format!("request failed: {path}"))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound { resource: path }.into());
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to read body>"));
            return Err(CatalogError::Status { status, body }.into());
        }

        let body = response
            .text()
            .await
            .with_context(|| format!("failed to read response body: {path}"))?;
        let mut value: serde_json::Value = serde_json::from_str(&body)
            .with_context(|| format!("failed to decode JSON response: {path}"))?;
        normalize_ids(&mut value);
        let raw_result: std::result::Result<T, _> = serde_json::from_value(value);
        let parsed = raw_result.with_context(|| format!("unexpected response shape: {path}"))?;
        Ok(parsed)
    }
}

impl CatalogApi for CatalogClient {
    #[instrument(skip_all)]
    async fn list_titles(&self, page: &PageRequest) -> Result<SearchPage<Title>> {
        self.get_json(&["api", "titles"], &page.to_query()).await
    }

    #[instrument(skip_all)]
    async fn title(&self, id: &str) -> Result<Title> {
        self.get_json(&["api", "titles", id], &[]).await
    }

    #[instrument(skip_all)]
    async fn title_by_imdb_id(&self, imdb_id: &str) -> Result<Title> {
        self.get_json(&["api", "titles", "imdb-id", imdb_id], &[])
            .await
    }

    #[instrument(skip_all)]
    async fn search_titles(&self, params: &TitleSearchParams) -> Result<SearchPage<Title>> {
        self.get_json(&["api", "titles", "search"], &params.to_query())
            .await
    }

    #[instrument(skip_all)]
    async fn title_cast(&self, id: &str) -> Result<Vec<CastMember>> {
        self.get_json(&["api", "titles", id, "cast"], &[]).await
    }

    #[instrument(skip_all)]
    async fn title_crew(&self, id: &str) -> Result<Vec<CrewMember>> {
        self.get_json(&["api", "titles", id, "crew"], &[]).await
    }

    #[instrument(skip_all)]
    async fn title_reviews(&self, id: &str) -> Result<Vec<Review>> {
        self.get_json(&["api", "titles", id, "reviews"], &[]).await
    }

    #[instrument(skip_all)]
    async fn search_people(&self, params: &PeopleSearchParams) -> Result<SearchPage<Person>> {
        self.get_json(&["api", "people", "search"], &params.to_query())
            .await
    }

    #[instrument(skip_all)]
    async fn person(&self, id: &str) -> Result<Person> {
        self.get_json(&["api", "people", id], &[]).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::catalog::{SortOrder, TitleSortField, TitleType};

    fn client_for(server: &MockServer) -> CatalogClient {
        CatalogClient::builder()
            .base_url(server.uri().parse().unwrap())
            .user_agent("test/0.0.0")
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_requires_user_agent() {
        // Arrange & Act
        let result = CatalogClient::builder().build();

        // Assert
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("user_agent is required")
        );
    }

    #[test]
    fn test_builder_defaults_to_localhost() {
        // Arrange & Act
        let client = CatalogClient::builder()
            .user_agent("test/0.0.0")
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        // Assert
        assert_eq!(client.base_url().as_str(), "http://localhost:3000/");
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        // Arrange
        let client = CatalogClient::builder()
            .base_url("http://example.test/backend/".parse().unwrap())
            .user_agent("test/0.0.0")
            .build()
            .unwrap();

        // Act
        let url = client.endpoint(&["api", "titles", "a/b c"]).unwrap();

        // Assert
        assert_eq!(
            url.as_str(),
            "http://example.test/backend/api/titles/a%2Fb%20c"
        );
    }

    #[tokio::test]
    async fn test_title_via_http_normalizes_ids() {
        // Arrange
        let mock_server = MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/catalog/title_inception.json");

        Mock::given(method("GET"))
            .and(path("/api/titles/65a1f0c2e4b0a1b2c3d4e5f6"))
            .respond_with(ResponseTemplate::new(200).set_body_string(json_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);

        // Act
        let title = client.title("65a1f0c2e4b0a1b2c3d4e5f6").await.unwrap();

        // Assert
        assert_eq!(title.id, "65a1f0c2e4b0a1b2c3d4e5f6");
        assert_eq!(title.primary_title, "Inception");
        assert_eq!(title.genres, vec!["Action", "Adventure", "Sci-Fi"]);
    }

    #[tokio::test]
    async fn test_title_by_imdb_id_via_http() {
        // Arrange
        let mock_server = MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/catalog/title_inception.json");

        Mock::given(method("GET"))
            .and(path("/api/titles/imdb-id/tt1375666"))
            .respond_with(ResponseTemplate::new(200).set_body_string(json_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);

        // Act
        let title = client.title_by_imdb_id("tt1375666").await.unwrap();

        // Assert
        assert_eq!(title.tconst.as_deref(), Some("tt1375666"));
    }

    #[tokio::test]
    async fn test_search_titles_sends_filters() {
        // Arrange
        let mock_server = MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/catalog/search_titles_movies_p1.json");

        Mock::given(method("GET"))
            .and(path("/api/titles/search"))
            .and(query_param("titleType", "movie"))
            .and(query_param("ratingRange[]", "7"))
            .and(query_param("ratingRange[]", "10"))
            .and(query_param("sortBy", "rating.weighted"))
            .and(query_param("sortOrder", "desc"))
            .and(query_param("page", "1"))
            .and(query_param("limit", "8"))
            .respond_with(ResponseTemplate::new(200).set_body_string(json_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let params = TitleSearchParams::default()
            .title_type(TitleType::Movie)
            .rating_range(7.0, 10.0)
            .sort(TitleSortField::WeightedRating, SortOrder::Desc)
            .page(1, 8);

        // Act
        let page = client.search_titles(&params).await.unwrap();

        // Assert
        assert_eq!(page.items.len(), 8);
        assert_eq!(page.total, 50);
        assert_eq!(page.last_page(), 7);
        assert_eq!(page.items[0].id, "movie-01");
        assert!(
            page.items
                .windows(2)
                .all(|w| w[0].rating.unwrap().average_rating >= w[1].rating.unwrap().average_rating)
        );
    }

    #[tokio::test]
    async fn test_repeated_search_is_idempotent() {
        // Arrange
        let mock_server = MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/catalog/search_people.json");

        Mock::given(method("GET"))
            .and(path("/api/people/search"))
            .and(query_param("search", "nolan"))
            .respond_with(ResponseTemplate::new(200).set_body_string(json_body))
            .expect(2)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let params = PeopleSearchParams::new("nolan");

        // Act
        let first = client.search_people(&params).await.unwrap();
        let second = client.search_people(&params).await.unwrap();

        // Assert
        assert_eq!(first, second);
        assert_eq!(first.items[0].primary_name, "Christopher Nolan");
    }

    #[tokio::test]
    async fn test_list_titles_sends_skip_take() {
        // Arrange
        let mock_server = MockServer::start().await;
        let json_body = r#"{
            "items": [
                {"_id": "t41", "titleType": "movie", "primaryTitle": "Listed Movie", "genres": []}
            ],
            "total": 41,
            "page": 3,
            "pageSize": 20
        }"#;

        Mock::given(method("GET"))
            .and(path("/api/titles"))
            .and(query_param("skip", "40"))
            .and(query_param("take", "20"))
            .respond_with(ResponseTemplate::new(200).set_body_string(json_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);

        // Act
        let page = client.list_titles(&PageRequest::new(3, 20)).await.unwrap();

        // Assert
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, "t41");
        assert_eq!(page.items[0].primary_title, "Listed Movie");
        assert_eq!(page.total, 41);
        assert_eq!(page.page, 3);
        assert_eq!(page.last_page(), 3);
    }

    #[tokio::test]
    async fn test_detail_tabs_via_http() {
        // Arrange
        let mock_server = MockServer::start().await;
        let id = "65a1f0c2e4b0a1b2c3d4e5f6";

        for (suffix, body) in [
            (
                "cast",
                include_str!("../../../../fixtures/catalog/title_cast.json"),
            ),
            (
                "crew",
                include_str!("../../../../fixtures/catalog/title_crew.json"),
            ),
            (
                "reviews",
                include_str!("../../../../fixtures/catalog/title_reviews.json"),
            ),
        ] {
            Mock::given(method("GET"))
                .and(path(format!("/api/titles/{id}/{suffix}")))
                .respond_with(ResponseTemplate::new(200).set_body_string(body))
                .expect(1)
                .mount(&mock_server)
                .await;
        }

        let client = client_for(&mock_server);

        // Act
        let cast = client.title_cast(id).await.unwrap();
        let crew = client.title_crew(id).await.unwrap();
        let reviews = client.title_reviews(id).await.unwrap();

        // Assert
        assert_eq!(cast.len(), 3);
        assert!(!cast[0].id.is_empty());
        assert_eq!(crew.len(), 2);
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].id, "rev-1");
    }

    #[tokio::test]
    async fn test_person_via_http() {
        // Arrange
        let mock_server = MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/catalog/person_nolan.json");

        Mock::given(method("GET"))
            .and(path("/api/people/nm0634240"))
            .respond_with(ResponseTemplate::new(200).set_body_string(json_body))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);

        // Act
        let person = client.person("nm0634240").await.unwrap();

        // Assert
        assert_eq!(person.primary_name, "Christopher Nolan");
        assert_eq!(person.known_for_titles[0].primary_title, "Inception");
    }

    #[tokio::test]
    async fn test_404_is_not_found() {
        // Arrange
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("{\"message\":\"nope\"}"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);

        // Act
        let err = client.title("missing").await.unwrap_err();

        // Assert
        let catalog_err = err.downcast_ref::<CatalogError>().unwrap();
        assert!(matches!(
            catalog_err,
            CatalogError::NotFound { resource } if resource == "/api/titles/missing"
        ));
    }

    #[tokio::test]
    async fn test_http_error_returns_status() {
        // Arrange
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);

        // Act
        let err = client
            .search_titles(&TitleSearchParams::default())
            .await
            .unwrap_err();

        // Assert
        let message = err.to_string();
        assert!(message.contains("catalog API error"));
        assert!(message.contains("boom"));
        assert!(matches!(
            err.downcast_ref::<CatalogError>(),
            Some(CatalogError::Status { status, .. }) if *status == StatusCode::INTERNAL_SERVER_ERROR
        ));
    }

    #[tokio::test]
    async fn test_invalid_json_is_decode_error() {
        // Arrange
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);

        // Act
        let err = client.person("x").await.unwrap_err();

        // Assert
        assert!(err.to_string().contains("failed to decode JSON response"));
        assert!(err.downcast_ref::<CatalogError>().is_none());
    }
}
