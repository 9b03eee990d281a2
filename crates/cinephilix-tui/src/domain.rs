//! Search domains: the filter record, defaults and fetch function behind
//! each browser page.

use std::fmt::Debug;
use std::future::Future;

use anyhow::Result;
use cinephilix_api::catalog::{
    CatalogApi, PeopleSearchParams, PeopleSortField, Person, RangeFilter, SearchPage, SortOrder,
    Title, TitleSearchParams, TitleSortField, TitleType,
};

/// Genre names offered by the genre picker.
pub const GENRES: [&str; 26] = [
    "Action",
    "Adventure",
    "Animation",
    "Biography",
    "Comedy",
    "Crime",
    "Documentary",
    "Drama",
    "Family",
    "Fantasy",
    "Film-Noir",
    "Game-Show",
    "History",
    "Horror",
    "Music",
    "Musical",
    "Mystery",
    "News",
    "Reality-TV",
    "Romance",
    "Sci-Fi",
    "Sport",
    "Talk-Show",
    "Thriller",
    "War",
    "Western",
];

/// Professions offered by the people picker.
pub const PROFESSIONS: [&str; 5] = ["actor", "director", "writer", "producer", "cinematographer"];

/// Full rating scale.
pub const RATING_SCALE: RangeFilter<f64> = RangeFilter {
    min: 0.0,
    max: 10.0,
};

/// Runtime range used by the Explore page (minutes).
pub const EXPLORE_RUNTIME: RangeFilter<u32> = RangeFilter { min: 0, max: 500 };

/// A searchable collection with its own filter record.
///
/// The controller is generic over this trait; each browser page plugs in
/// one implementation.
pub trait SearchDomain {
    /// Typed filter record sent with every fetch.
    type Filters: Clone + Debug + PartialEq + Send + Sync + 'static;
    /// Result item type.
    type Item: Clone + Debug + Send + 'static;

    /// Page name shown in the header.
    fn name(&self) -> &'static str;

    /// Filter record the page starts with and returns to on reset.
    fn defaults(&self, page_size: u32) -> Self::Filters;

    /// Requested page number.
    fn page(filters: &Self::Filters) -> u32;

    /// Sets the requested page number.
    fn set_page(filters: &mut Self::Filters, page: u32);

    /// Current free-text query.
    fn query(filters: &Self::Filters) -> &str;

    /// Replaces the free-text query. Blank text clears it.
    fn set_query(filters: &mut Self::Filters, text: &str);

    /// Values offered by the option picker (genres or professions).
    fn options(&self) -> &'static [&'static str];

    /// Whether an option value is currently selected.
    fn option_selected(filters: &Self::Filters, value: &str) -> bool;

    /// Toggles an option value.
    fn toggle_option(filters: &mut Self::Filters, value: &str);

    /// Advances to the next sort key.
    fn cycle_sort(filters: &mut Self::Filters);

    /// Flips the sort direction.
    fn toggle_order(filters: &mut Self::Filters);

    /// Active filters as `(label, value)` pairs for display.
    fn describe(filters: &Self::Filters) -> Vec<(&'static str, String)>;

    /// Runs the search.
    fn fetch<A: CatalogApi>(
        api: &A,
        filters: &Self::Filters,
    ) -> impl Future<Output = Result<SearchPage<Self::Item>>> + Send;
}

/// Which title page a `TitleDomain` backs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitlePreset {
    /// All titles with the full filter set.
    Explore,
    /// Movies only.
    Movies,
    /// TV series only.
    TvShows,
}

/// Title search domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitleDomain {
    /// Page preset.
    pub preset: TitlePreset,
}

impl TitleDomain {
    /// Creates a title domain for a preset.
    #[must_use]
    pub const fn new(preset: TitlePreset) -> Self {
        Self { preset }
    }
}

/// Cycles the title type filter: all, then each selectable type.
pub fn cycle_title_type(filters: &mut TitleSearchParams) {
    let types = TitleType::SELECTABLE;
    filters.title_type = match filters.title_type {
        None => types.first().copied(),
        Some(current) => types
            .iter()
            .position(|t| *t == current)
            .and_then(|idx| types.get(idx.saturating_add(1)))
            .copied(),
    };
}

/// Cycles the adult filter: any, excluded, included.
pub const fn cycle_adult(filters: &mut TitleSearchParams) {
    filters.is_adult = match filters.is_adult {
        None => Some(false),
        Some(false) => Some(true),
        Some(true) => None,
    };
}

/// Moves the minimum rating by `delta` (whole steps), keeping it in 0-10.
pub fn shift_min_rating(filters: &mut TitleSearchParams, delta: f64) {
    let range = filters.rating_range.unwrap_or(RATING_SCALE);
    let max = range.max.clamp(RATING_SCALE.min, RATING_SCALE.max);
    let min = (range.min + delta).clamp(RATING_SCALE.min, max);
    filters.rating_range = Some(RangeFilter::new(min, max));
}

impl SearchDomain for TitleDomain {
    type Filters = TitleSearchParams;
    type Item = Title;

    fn name(&self) -> &'static str {
        match self.preset {
            TitlePreset::Explore => "Explore",
            TitlePreset::Movies => "Movies",
            TitlePreset::TvShows => "TV Shows",
        }
    }

    fn defaults(&self, page_size: u32) -> TitleSearchParams {
        let base = TitleSearchParams::default()
            .sort(TitleSortField::AverageRating, SortOrder::Desc)
            .page(1, page_size);
        match self.preset {
            TitlePreset::Explore => TitleSearchParams {
                rating_range: Some(RATING_SCALE),
                is_adult: Some(false),
                runtime_range: Some(EXPLORE_RUNTIME),
                ..base
            },
            TitlePreset::Movies => base.title_type(TitleType::Movie),
            TitlePreset::TvShows => base.title_type(TitleType::TvSeries),
        }
    }

    fn page(filters: &TitleSearchParams) -> u32 {
        filters.page
    }

    fn set_page(filters: &mut TitleSearchParams, page: u32) {
        filters.page = page;
    }

    fn query(filters: &TitleSearchParams) -> &str {
        filters.search.as_deref().unwrap_or_default()
    }

    fn set_query(filters: &mut TitleSearchParams, text: &str) {
        filters.search = (!text.trim().is_empty()).then(|| String::from(text));
    }

    fn options(&self) -> &'static [&'static str] {
        &GENRES
    }

    fn option_selected(filters: &TitleSearchParams, value: &str) -> bool {
        filters.genres.contains(value)
    }

    fn toggle_option(filters: &mut TitleSearchParams, value: &str) {
        if !filters.genres.remove(value) {
            filters.genres.insert(String::from(value));
        }
    }

    fn cycle_sort(filters: &mut TitleSearchParams) {
        filters.sort_by = Some(
            filters
                .sort_by
                .map_or(TitleSortField::WeightedRating, TitleSortField::next),
        );
    }

    fn toggle_order(filters: &mut TitleSearchParams) {
        filters.sort_order = filters.sort_order.toggled();
    }

    fn describe(filters: &TitleSearchParams) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        if let Some(ref search) = filters.search {
            out.push(("Search", format!("\"{search}\"")));
        }
        out.push((
            "Type",
            filters
                .title_type
                .map_or_else(|| String::from("All"), |t| String::from(t.label())),
        ));
        if !filters.genres.is_empty() {
            let genres: Vec<&str> = filters.genres.iter().map(String::as_str).collect();
            out.push(("Genres", genres.join(", ")));
        }
        if let Some(range) = filters.rating_range {
            out.push(("Rating", format!("{:.1}-{:.1}", range.min, range.max)));
        }
        if let Some(range) = filters.runtime_range {
            out.push(("Runtime", format!("{}-{} min", range.min, range.max)));
        }
        out.push((
            "Adult",
            String::from(match filters.is_adult {
                None => "any",
                Some(false) => "off",
                Some(true) => "on",
            }),
        ));
        let sort = filters.sort_by.map_or("default", TitleSortField::label);
        out.push(("Sort", format!("{sort} {}", filters.sort_order)));
        out
    }

    fn fetch<A: CatalogApi>(
        api: &A,
        filters: &TitleSearchParams,
    ) -> impl Future<Output = Result<SearchPage<Title>>> + Send {
        api.search_titles(filters)
    }
}

/// People search domain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeopleDomain;

impl SearchDomain for PeopleDomain {
    type Filters = PeopleSearchParams;
    type Item = Person;

    fn name(&self) -> &'static str {
        "People"
    }

    fn defaults(&self, page_size: u32) -> PeopleSearchParams {
        PeopleSearchParams::default()
            .sort(PeopleSortField::Popularity, SortOrder::Desc)
            .page(1, page_size)
    }

    fn page(filters: &PeopleSearchParams) -> u32 {
        filters.page
    }

    fn set_page(filters: &mut PeopleSearchParams, page: u32) {
        filters.page = page;
    }

    fn query(filters: &PeopleSearchParams) -> &str {
        filters.search.as_deref().unwrap_or_default()
    }

    fn set_query(filters: &mut PeopleSearchParams, text: &str) {
        filters.search = (!text.trim().is_empty()).then(|| String::from(text));
    }

    fn options(&self) -> &'static [&'static str] {
        &PROFESSIONS
    }

    fn option_selected(filters: &PeopleSearchParams, value: &str) -> bool {
        filters.profession.as_deref() == Some(value)
    }

    /// Professions are single-select: picking the active one clears it.
    fn toggle_option(filters: &mut PeopleSearchParams, value: &str) {
        filters.profession = if filters.profession.as_deref() == Some(value) {
            None
        } else {
            Some(String::from(value))
        };
    }

    fn cycle_sort(filters: &mut PeopleSearchParams) {
        filters.sort_by = Some(
            filters
                .sort_by
                .map_or(PeopleSortField::Popularity, PeopleSortField::next),
        );
    }

    fn toggle_order(filters: &mut PeopleSearchParams) {
        filters.sort_order = filters.sort_order.toggled();
    }

    fn describe(filters: &PeopleSearchParams) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        if let Some(ref search) = filters.search {
            out.push(("Search", format!("\"{search}\"")));
        }
        out.push((
            "Profession",
            filters
                .profession
                .clone()
                .unwrap_or_else(|| String::from("any")),
        ));
        if let Some(range) = filters.birth_year_range {
            out.push(("Born", range.to_string()));
        }
        let sort = filters.sort_by.map_or("default", PeopleSortField::label);
        out.push(("Sort", format!("{sort} {}", filters.sort_order)));
        out
    }

    fn fetch<A: CatalogApi>(
        api: &A,
        filters: &PeopleSearchParams,
    ) -> impl Future<Output = Result<SearchPage<Person>>> + Send {
        api.search_people(filters)
    }
}
