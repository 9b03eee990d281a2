//! `CatalogApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::params::{PageRequest, PeopleSearchParams, TitleSearchParams};
use super::types::{CastMember, CrewMember, Person, Review, SearchPage, Title};

/// Catalog API trait.
///
/// Abstracts the backend for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(CatalogApi: Send)]
pub trait LocalCatalogApi {
    /// Lists titles with offset paging (`skip`/`take`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn list_titles(&self, page: &PageRequest) -> Result<SearchPage<Title>>;

    /// Fetches a single title by backend id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` for an unknown id, or an error if
    /// the HTTP request or JSON parsing fails.
    async fn title(&self, id: &str) -> Result<Title>;

    /// Fetches a single title by IMDb identifier (`tt...`).
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` for an unknown id, or an error if
    /// the HTTP request or JSON parsing fails.
    async fn title_by_imdb_id(&self, imdb_id: &str) -> Result<Title>;

    /// Searches titles with filters, sorting and paging.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn search_titles(&self, params: &TitleSearchParams) -> Result<SearchPage<Title>>;

    /// Fetches the cast of a title.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn title_cast(&self, id: &str) -> Result<Vec<CastMember>>;

    /// Fetches the crew of a title.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn title_crew(&self, id: &str) -> Result<Vec<CrewMember>>;

    /// Fetches user reviews of a title.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn title_reviews(&self, id: &str) -> Result<Vec<Review>>;

    /// Searches people with filters, sorting and paging.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn search_people(&self, params: &PeopleSearchParams) -> Result<SearchPage<Person>>;

    /// Fetches a single person by backend id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` for an unknown id, or an error if
    /// the HTTP request or JSON parsing fails.
    async fn person(&self, id: &str) -> Result<Person>;
}
