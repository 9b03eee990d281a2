//! Catalog REST API client module.
//!
//! Handles HTTP requests to the `/api/titles` and `/api/people` endpoints,
//! normalizes backend identifiers and decodes typed responses.

mod api;
mod client;
mod error;
mod normalize;
mod params;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{CatalogApi, LocalCatalogApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{API_URL_ENV, CatalogClient, CatalogClientBuilder, DEFAULT_BASE_URL};
#[allow(clippy::module_name_repetitions)]
pub use error::{CatalogError, ParseValueError};
pub use normalize::{BACKEND_ID_FIELD, PUBLIC_ID_FIELD, normalize_ids};
pub use params::{
    DEFAULT_PAGE_SIZE, PageRequest, PeopleSearchParams, PeopleSortField, RangeFilter, SortOrder,
    TitleSearchParams, TitleSortField,
};
pub use types::{
    CastMember, CrewMember, KnownForTitle, Person, Principal, Rating, Review, SearchPage, Title,
    TitleType,
};
