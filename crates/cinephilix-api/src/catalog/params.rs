//! Catalog API request parameter types.
//!
//! One typed record per search domain. Each record knows how to encode
//! itself as query pairs the way the backend expects: optional fields are
//! omitted, collections and ranges are sent as repeated `key[]` pairs.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::error::ParseValueError;
use super::types::TitleType;

/// Default page size for search requests.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    /// Ascending.
    Asc,
    /// Descending.
    #[default]
    Desc,
}

impl SortOrder {
    /// Backend wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Returns the opposite direction.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            _ => Err(ParseValueError::new("sort order", s, &["asc", "desc"])),
        }
    }
}

/// Inclusive range filter (`min..max`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeFilter<T> {
    /// Lower bound.
    pub min: T,
    /// Upper bound.
    pub max: T,
}

impl<T: Copy + PartialOrd> RangeFilter<T> {
    /// Creates a range, swapping the bounds if given in reverse.
    #[must_use]
    pub fn new(a: T, b: T) -> Self {
        if b < a {
            Self { min: b, max: a }
        } else {
            Self { min: a, max: b }
        }
    }
}

impl<T: fmt::Display> RangeFilter<T> {
    /// Appends the range as two `key[]` pairs.
    fn push_query(&self, key: &'static str, query: &mut Vec<(&'static str, String)>) {
        query.push((key, self.min.to_string()));
        query.push((key, self.max.to_string()));
    }
}

impl<T: fmt::Display> fmt::Display for RangeFilter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.min, self.max)
    }
}

impl<T: FromStr + Copy + PartialOrd> FromStr for RangeFilter<T> {
    type Err = ParseValueError;

    /// Parses `MIN..MAX`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseValueError::new("range", s, &["MIN..MAX"]);
        let (min, max) = s.split_once("..").ok_or_else(invalid)?;
        let min = min.trim().parse::<T>().map_err(|_| invalid())?;
        let max = max.trim().parse::<T>().map_err(|_| invalid())?;
        Ok(Self::new(min, max))
    }
}

/// Sort keys for title search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TitleSortField {
    /// Average rating weighted by vote count (backend formula).
    WeightedRating,
    /// Raw average rating.
    AverageRating,
    /// Number of votes.
    VoteCount,
    /// Title text.
    Title,
    /// Start year.
    StartYear,
    /// Runtime.
    Runtime,
}

impl TitleSortField {
    /// All sort keys, in menu order.
    pub const ALL: [Self; 6] = [
        Self::WeightedRating,
        Self::AverageRating,
        Self::VoteCount,
        Self::Title,
        Self::StartYear,
        Self::Runtime,
    ];

    /// Backend `sortBy` value.
    #[must_use]
    pub const fn as_param(self) -> &'static str {
        match self {
            Self::WeightedRating => "rating.weighted",
            Self::AverageRating => "rating.averageRating",
            Self::VoteCount => "rating.numVotes",
            Self::Title => "primaryTitle",
            Self::StartYear => "startYear",
            Self::Runtime => "runtimeMinutes",
        }
    }

    /// Short name accepted on the command line.
    #[must_use]
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::WeightedRating => "weighted",
            Self::AverageRating => "rating",
            Self::VoteCount => "votes",
            Self::Title => "title",
            Self::StartYear => "year",
            Self::Runtime => "runtime",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::WeightedRating => "Weighted rating",
            Self::AverageRating => "Rating",
            Self::VoteCount => "Number of votes",
            Self::Title => "Title",
            Self::StartYear => "Year",
            Self::Runtime => "Runtime",
        }
    }

    /// Next key in menu order (wraps around).
    #[must_use]
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL
            .get(idx.saturating_add(1))
            .copied()
            .unwrap_or(Self::WeightedRating)
    }
}

impl FromStr for TitleSortField {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.short_name().eq_ignore_ascii_case(s) || f.as_param() == s)
            .ok_or_else(|| {
                let expected: Vec<&str> = Self::ALL.iter().map(|f| f.short_name()).collect();
                ParseValueError::new("title sort field", s, &expected)
            })
    }
}

/// Sort keys for people search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeopleSortField {
    /// Backend popularity score.
    Popularity,
    /// Display name.
    Name,
    /// Birth year.
    BirthYear,
}

impl PeopleSortField {
    /// All sort keys, in menu order.
    pub const ALL: [Self; 3] = [Self::Popularity, Self::Name, Self::BirthYear];

    /// Backend `sortBy` value.
    #[must_use]
    pub const fn as_param(self) -> &'static str {
        match self {
            Self::Popularity => "popularity",
            Self::Name => "primaryName",
            Self::BirthYear => "birthYear",
        }
    }

    /// Short name accepted on the command line.
    #[must_use]
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::Popularity => "popularity",
            Self::Name => "name",
            Self::BirthYear => "birth-year",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Popularity => "Popularity",
            Self::Name => "Name",
            Self::BirthYear => "Birth year",
        }
    }

    /// Next key in menu order (wraps around).
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Popularity => Self::Name,
            Self::Name => Self::BirthYear,
            Self::BirthYear => Self::Popularity,
        }
    }
}

impl FromStr for PeopleSortField {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.short_name().eq_ignore_ascii_case(s) || f.as_param() == s)
            .ok_or_else(|| {
                let expected: Vec<&str> = Self::ALL.iter().map(|f| f.short_name()).collect();
                ParseValueError::new("people sort field", s, &expected)
            })
    }
}

/// Offset-based paging for `GET /api/titles` (`skip`/`take`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: u32,
    /// Items per page.
    pub page_size: u32,
}

impl PageRequest {
    /// Creates a page request. Page 0 is treated as page 1.
    #[must_use]
    pub const fn new(page: u32, page_size: u32) -> Self {
        let page = if page == 0 { 1 } else { page };
        Self { page, page_size }
    }

    /// Number of items to skip: `(page - 1) * page_size`.
    #[must_use]
    pub const fn skip(&self) -> u32 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }

    /// Number of items to take.
    #[must_use]
    pub const fn take(&self) -> u32 {
        self.page_size
    }

    /// Encodes as `skip`/`take` query pairs.
    #[must_use]
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("skip", self.skip().to_string()),
            ("take", self.take().to_string()),
        ]
    }
}

/// Request parameters for `GET /api/titles/search`.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleSearchParams {
    /// Free-text query (title, cast, crew).
    pub search: Option<String>,
    /// Title type filter (`None` = all types).
    pub title_type: Option<TitleType>,
    /// Genre names (all must match; empty = any).
    pub genres: BTreeSet<String>,
    /// Earliest start year.
    pub start_year: Option<u32>,
    /// Latest start year.
    pub end_year: Option<u32>,
    /// Average rating range (0-10).
    pub rating_range: Option<RangeFilter<f64>>,
    /// Adult content flag.
    pub is_adult: Option<bool>,
    /// Runtime range in minutes.
    pub runtime_range: Option<RangeFilter<u32>>,
    /// Original language code.
    pub language: Option<String>,
    /// Sort key (`None` = backend default).
    pub sort_by: Option<TitleSortField>,
    /// Sort direction.
    pub sort_order: SortOrder,
    /// 1-based page number.
    pub page: u32,
    /// Page size.
    pub limit: u32,
}

impl Default for TitleSearchParams {
    fn default() -> Self {
        Self {
            search: None,
            title_type: None,
            genres: BTreeSet::new(),
            start_year: None,
            end_year: None,
            rating_range: None,
            is_adult: None,
            runtime_range: None,
            language: None,
            sort_by: None,
            sort_order: SortOrder::Desc,
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl TitleSearchParams {
    /// Creates params with a free-text query.
    #[must_use]
    pub fn new(search: impl Into<String>) -> Self {
        Self {
            search: Some(search.into()),
            ..Self::default()
        }
    }

    /// Sets the title type filter.
    #[must_use]
    pub const fn title_type(mut self, title_type: TitleType) -> Self {
        self.title_type = Some(title_type);
        self
    }

    /// Adds a genre to the filter set.
    #[must_use]
    pub fn genre(mut self, genre: impl Into<String>) -> Self {
        self.genres.insert(genre.into());
        self
    }

    /// Sets the rating range.
    #[must_use]
    pub fn rating_range(mut self, min: f64, max: f64) -> Self {
        self.rating_range = Some(RangeFilter::new(min, max));
        self
    }

    /// Sets sort key and direction.
    #[must_use]
    pub const fn sort(mut self, field: TitleSortField, order: SortOrder) -> Self {
        self.sort_by = Some(field);
        self.sort_order = order;
        self
    }

    /// Sets page number and page size.
    #[must_use]
    pub const fn page(mut self, page: u32, limit: u32) -> Self {
        self.page = page;
        self.limit = limit;
        self
    }

    /// Encodes as query pairs.
    #[must_use]
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query: Vec<(&'static str, String)> = Vec::new();
        if let Some(search) = self.search.as_deref().map(str::trim)
            && !search.is_empty()
        {
            query.push(("search", String::from(search)));
        }
        if let Some(title_type) = self.title_type {
            query.push(("titleType", String::from(title_type.as_str())));
        }
        for genre in &self.genres {
            query.push(("genres[]", genre.clone()));
        }
        if let Some(year) = self.start_year {
            query.push(("startYear", year.to_string()));
        }
        if let Some(year) = self.end_year {
            query.push(("endYear", year.to_string()));
        }
        if let Some(range) = &self.rating_range {
            range.push_query("ratingRange[]", &mut query);
        }
        if let Some(adult) = self.is_adult {
            query.push(("isAdult", adult.to_string()));
        }
        if let Some(range) = &self.runtime_range {
            range.push_query("runtimeRange[]", &mut query);
        }
        if let Some(ref language) = self.language {
            query.push(("language", language.clone()));
        }
        if let Some(field) = self.sort_by {
            query.push(("sortBy", String::from(field.as_param())));
        }
        query.push(("sortOrder", String::from(self.sort_order.as_str())));
        query.push(("page", self.page.max(1).to_string()));
        query.push(("limit", self.limit.to_string()));
        query
    }
}

/// Request parameters for `GET /api/people/search`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeopleSearchParams {
    /// Free-text query (name).
    pub search: Option<String>,
    /// Profession filter (e.g. "director").
    pub profession: Option<String>,
    /// Birth year range.
    pub birth_year_range: Option<RangeFilter<u32>>,
    /// Sort key (`None` = backend default).
    pub sort_by: Option<PeopleSortField>,
    /// Sort direction.
    pub sort_order: SortOrder,
    /// 1-based page number.
    pub page: u32,
    /// Page size.
    pub limit: u32,
}

impl Default for PeopleSearchParams {
    fn default() -> Self {
        Self {
            search: None,
            profession: None,
            birth_year_range: None,
            sort_by: None,
            sort_order: SortOrder::Desc,
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PeopleSearchParams {
    /// Creates params with a free-text query.
    #[must_use]
    pub fn new(search: impl Into<String>) -> Self {
        Self {
            search: Some(search.into()),
            ..Self::default()
        }
    }

    /// Sets the profession filter.
    #[must_use]
    pub fn profession(mut self, profession: impl Into<String>) -> Self {
        self.profession = Some(profession.into());
        self
    }

    /// Sets sort key and direction.
    #[must_use]
    pub const fn sort(mut self, field: PeopleSortField, order: SortOrder) -> Self {
        self.sort_by = Some(field);
        self.sort_order = order;
        self
    }

    /// Sets page number and page size.
    #[must_use]
    pub const fn page(mut self, page: u32, limit: u32) -> Self {
        self.page = page;
        self.limit = limit;
        self
    }

    /// Encodes as query pairs.
    #[must_use]
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query: Vec<(&'static str, String)> = Vec::new();
        if let Some(search) = self.search.as_deref().map(str::trim)
            && !search.is_empty()
        {
            query.push(("search", String::from(search)));
        }
        if let Some(ref profession) = self.profession {
            query.push(("profession", profession.clone()));
        }
        if let Some(range) = &self.birth_year_range {
            range.push_query("birthYearRange[]", &mut query);
        }
        if let Some(field) = self.sort_by {
            query.push(("sortBy", String::from(field.as_param())));
        }
        query.push(("sortOrder", String::from(self.sort_order.as_str())));
        query.push(("page", self.page.max(1).to_string()));
        query.push(("limit", self.limit.to_string()));
        query
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn pairs<'a>(query: &'a [(&'static str, String)]) -> Vec<(&'static str, &'a str)> {
        query.iter().map(|(k, v)| (*k, v.as_str())).collect()
    }

    #[test]
    fn test_page_request_skip_take() {
        // Arrange
        let cases = [(1, 20, 0), (2, 20, 20), (5, 8, 32), (0, 10, 0)];

        for (page, size, expected_skip) in cases {
            // Act
            let request = PageRequest::new(page, size);

            // Assert
            assert_eq!(request.skip(), expected_skip, "page={page} size={size}");
            assert_eq!(request.take(), size);
        }
    }

    #[test]
    fn test_page_request_zero_becomes_first_page() {
        // Arrange & Act
        let request = PageRequest::new(0, 20);

        // Assert
        assert_eq!(request.page, 1);
        assert_eq!(request.skip(), 0);
        assert_eq!(
            pairs(&request.to_query()),
            vec![("skip", "0"), ("take", "20")]
        );
    }

    #[test]
    fn test_default_title_params_query() {
        // Arrange
        let params = TitleSearchParams::default();

        // Act
        let query = params.to_query();

        // Assert
        assert_eq!(
            pairs(&query),
            vec![("sortOrder", "desc"), ("page", "1"), ("limit", "20")]
        );
    }

    #[test]
    fn test_full_title_params_query() {
        // Arrange
        let mut params = TitleSearchParams::new("  dream  ")
            .title_type(TitleType::Movie)
            .genre("Sci-Fi")
            .genre("Action")
            .rating_range(7.0, 10.0)
            .sort(TitleSortField::WeightedRating, SortOrder::Desc)
            .page(1, 8);
        params.start_year = Some(2000);
        params.end_year = Some(2015);
        params.is_adult = Some(false);
        params.runtime_range = Some(RangeFilter::new(90, 180));
        params.language = Some(String::from("en"));

        // Act
        let query = params.to_query();

        // Assert
        assert_eq!(
            pairs(&query),
            vec![
                ("search", "dream"),
                ("titleType", "movie"),
                ("genres[]", "Action"),
                ("genres[]", "Sci-Fi"),
                ("startYear", "2000"),
                ("endYear", "2015"),
                ("ratingRange[]", "7"),
                ("ratingRange[]", "10"),
                ("isAdult", "false"),
                ("runtimeRange[]", "90"),
                ("runtimeRange[]", "180"),
                ("language", "en"),
                ("sortBy", "rating.weighted"),
                ("sortOrder", "desc"),
                ("page", "1"),
                ("limit", "8"),
            ]
        );
    }

    #[test]
    fn test_blank_search_is_omitted() {
        // Arrange
        let params = TitleSearchParams::new("   ");

        // Act
        let query = params.to_query();

        // Assert
        assert!(query.iter().all(|(k, _)| *k != "search"));
    }

    #[test]
    fn test_people_params_query() {
        // Arrange
        let mut params = PeopleSearchParams::new("nolan")
            .profession("director")
            .sort(PeopleSortField::BirthYear, SortOrder::Asc)
            .page(3, 10);
        params.birth_year_range = Some(RangeFilter::new(1980, 1950));

        // Act
        let query = params.to_query();

        // Assert
        assert_eq!(
            pairs(&query),
            vec![
                ("search", "nolan"),
                ("profession", "director"),
                ("birthYearRange[]", "1950"),
                ("birthYearRange[]", "1980"),
                ("sortBy", "birthYear"),
                ("sortOrder", "asc"),
                ("page", "3"),
                ("limit", "10"),
            ]
        );
    }

    #[test]
    fn test_range_from_str() {
        // Arrange & Act
        let rating: RangeFilter<f64> = "7.5..10".parse().unwrap();
        let runtime: RangeFilter<u32> = "180..90".parse().unwrap();

        // Assert
        assert_eq!(rating, RangeFilter { min: 7.5, max: 10.0 });
        assert_eq!(runtime, RangeFilter { min: 90, max: 180 });
        assert!("7-10".parse::<RangeFilter<f64>>().is_err());
        assert!("a..b".parse::<RangeFilter<u32>>().is_err());
    }

    #[test]
    fn test_sort_field_parse_and_cycle() {
        // Arrange & Act & Assert
        assert_eq!(
            "weighted".parse::<TitleSortField>().unwrap(),
            TitleSortField::WeightedRating
        );
        assert_eq!(
            "rating.numVotes".parse::<TitleSortField>().unwrap(),
            TitleSortField::VoteCount
        );
        assert!("popularity".parse::<TitleSortField>().is_err());
        assert_eq!(TitleSortField::Runtime.next(), TitleSortField::WeightedRating);
        assert_eq!(PeopleSortField::BirthYear.next(), PeopleSortField::Popularity);
        assert_eq!("Desc".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert_eq!(SortOrder::Asc.toggled(), SortOrder::Desc);
    }
}
