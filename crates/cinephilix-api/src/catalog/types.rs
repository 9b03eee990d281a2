//! Catalog response types.
//!
//! All types decode from the backend's camelCase JSON after `_id` has been
//! normalized to `id`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use super::error::ParseValueError;

// --- Title ---

/// Title kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TitleType {
    /// Feature film.
    Movie,
    /// TV series.
    TvSeries,
    /// Single TV episode.
    TvEpisode,
    /// TV mini-series.
    TvMiniSeries,
    /// TV special.
    TvSpecial,
    /// Short film.
    Short,
    /// Documentary.
    Documentary,
    /// Any tag this client does not know about.
    #[serde(other)]
    Other,
}

impl TitleType {
    /// Title types selectable as a search filter.
    pub const SELECTABLE: [Self; 7] = [
        Self::Movie,
        Self::TvSeries,
        Self::TvEpisode,
        Self::TvMiniSeries,
        Self::TvSpecial,
        Self::Short,
        Self::Documentary,
    ];

    /// Backend wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::TvSeries => "tvSeries",
            Self::TvEpisode => "tvEpisode",
            Self::TvMiniSeries => "tvMiniSeries",
            Self::TvSpecial => "tvSpecial",
            Self::Short => "short",
            Self::Documentary => "documentary",
            Self::Other => "other",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Movie => "Movie",
            Self::TvSeries => "TV Series",
            Self::TvEpisode => "TV Episode",
            Self::TvMiniSeries => "TV Mini-Series",
            Self::TvSpecial => "TV Special",
            Self::Short => "Short Film",
            Self::Documentary => "Documentary",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for TitleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TitleType {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::SELECTABLE
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let expected: Vec<&str> = Self::SELECTABLE.iter().map(|t| t.as_str()).collect();
                ParseValueError::new("title type", s, &expected)
            })
    }
}

/// Aggregate rating.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    /// Average rating on a 0-10 scale.
    pub average_rating: f64,
    /// Number of votes.
    #[serde(default)]
    pub num_votes: u64,
}

/// A principal credit attached to a title. The backend sends `name` and
/// `category` either flat or nested (`{ primaryName }`, `{ name }`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawPrincipal")]
pub struct Principal {
    /// Person name. Empty when the backend omits it.
    pub name: String,
    /// Credit category (e.g. "actor", "director").
    pub category: String,
}

#[derive(Deserialize)]
struct RawPrincipal {
    #[serde(default)]
    name: Option<RawPrincipalName>,
    #[serde(default)]
    category: Option<RawCategory>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPrincipalName {
    Flat(String),
    Nested {
        #[serde(rename = "primaryName", default)]
        primary_name: Option<String>,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCategory {
    Flat(String),
    Nested {
        #[serde(default)]
        name: Option<String>,
    },
}

impl From<RawPrincipal> for Principal {
    fn from(raw: RawPrincipal) -> Self {
        let name = match raw.name {
            Some(RawPrincipalName::Flat(name)) => Some(name),
            Some(RawPrincipalName::Nested { primary_name }) => primary_name,
            None => None,
        };
        let category = match raw.category {
            Some(RawCategory::Flat(name)) => Some(name),
            Some(RawCategory::Nested { name }) => name,
            None => None,
        };
        Self {
            name: name.unwrap_or_default(),
            category: category.unwrap_or_default(),
        }
    }
}

/// Drops principals the backend sent without a name.
fn deserialize_principals<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<Principal>, D::Error> {
    let principals: Option<Vec<Principal>> = Option::deserialize(deserializer)?;
    Ok(principals
        .unwrap_or_default()
        .into_iter()
        .filter(|p| !p.name.trim().is_empty())
        .collect())
}

/// Title record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Title {
    /// Backend identifier.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// External catalog identifier (IMDb `tconst`).
    #[serde(default)]
    pub tconst: Option<String>,
    /// Title kind.
    pub title_type: TitleType,
    /// Display title.
    pub primary_title: String,
    /// Original-language title.
    #[serde(default)]
    pub original_title: Option<String>,
    /// Adult content flag.
    #[serde(default)]
    pub is_adult: bool,
    /// Release or first-air year.
    #[serde(default)]
    pub start_year: Option<u32>,
    /// Last-air year (series).
    #[serde(default)]
    pub end_year: Option<u32>,
    /// Runtime in minutes.
    #[serde(default)]
    pub runtime_minutes: Option<u32>,
    /// Ordered genre names.
    #[serde(default, deserialize_with = "deserialize_genres")]
    pub genres: Vec<String>,
    /// Aggregate rating.
    #[serde(default)]
    pub rating: Option<Rating>,
    /// Principal credits.
    #[serde(default, deserialize_with = "deserialize_principals")]
    pub principals: Vec<Principal>,
    /// Poster image URL.
    #[serde(default)]
    pub poster_url: Option<String>,
    /// Plot summary.
    #[serde(default)]
    pub plot: Option<String>,
    /// Embedded cast list (when the backend includes it).
    #[serde(default)]
    pub cast: Option<Vec<CastMember>>,
    /// Embedded crew list (when the backend includes it).
    #[serde(default)]
    pub crew: Option<Vec<CrewMember>>,
    /// Embedded reviews (when the backend includes them).
    #[serde(default)]
    pub reviews: Option<Vec<Review>>,
}

/// Cast credit.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastMember {
    /// Backend identifier.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// Person name.
    pub name: String,
    /// Character played.
    #[serde(default)]
    pub character: Option<String>,
    /// Profile image URL.
    #[serde(default)]
    pub profile_url: Option<String>,
    /// Billing order.
    #[serde(default)]
    pub order: u32,
}

/// Crew credit.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrewMember {
    /// Backend identifier.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// Person name.
    pub name: String,
    /// Department (e.g. "Directing").
    #[serde(default)]
    pub department: String,
    /// Job (e.g. "Director").
    #[serde(default)]
    pub job: String,
    /// Profile image URL.
    #[serde(default)]
    pub profile_url: Option<String>,
}

/// User review.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Backend identifier.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// Author display name.
    pub author: String,
    /// Review text.
    #[serde(default)]
    pub content: String,
    /// Rating given by the author (0-5 stars).
    #[serde(default)]
    pub rating: f64,
    /// Creation timestamp as sent by the backend (RFC 3339).
    #[serde(default)]
    pub created_at: String,
}

// --- Person ---

/// Short title summary in a person's "known for" list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnownForTitle {
    /// Backend identifier.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// Display title.
    pub primary_title: String,
    /// Release year.
    #[serde(default)]
    pub start_year: Option<u32>,
    /// Poster image URL.
    #[serde(default)]
    pub poster_url: Option<String>,
}

/// Person record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Backend identifier.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// Display name.
    pub primary_name: String,
    /// Birth year.
    #[serde(default)]
    pub birth_year: Option<u32>,
    /// Death year.
    #[serde(default)]
    pub death_year: Option<u32>,
    /// Professions (e.g. "actor", "director").
    #[serde(default, deserialize_with = "null_as_default")]
    pub primary_profession: Vec<String>,
    /// Notable titles.
    #[serde(default, deserialize_with = "null_as_default")]
    pub known_for_titles: Vec<KnownForTitle>,
    /// Profile image URL.
    #[serde(default)]
    pub profile_url: Option<String>,
}

// --- Paging ---

/// One page of search results (`{ items, total, page, pageSize }`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage<T> {
    /// Items on this page, in backend order.
    pub items: Vec<T>,
    /// Total number of matches across all pages.
    pub total: u64,
    /// Page number reported by the backend (1-based).
    pub page: u32,
    /// Page size reported by the backend.
    pub page_size: u32,
}

impl<T> SearchPage<T> {
    /// Returns the last page number (at least 1).
    #[must_use]
    pub fn last_page(&self) -> u32 {
        let size = u64::from(self.page_size.max(1));
        u32::try_from(self.total.div_ceil(size))
            .unwrap_or(u32::MAX)
            .max(1)
    }
}

// --- Deserialize helpers ---

/// Accepts identifiers sent as strings or numbers.
fn deserialize_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

/// Accepts genres sent as plain names or as `{ "name": ... }` objects.
fn deserialize_genres<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawGenre {
        Name(String),
        Named { name: String },
    }

    let raw: Option<Vec<RawGenre>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|g| match g {
            RawGenre::Name(name) | RawGenre::Named { name } => name,
        })
        .collect())
}

/// Treats an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
