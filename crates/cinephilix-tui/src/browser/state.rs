//! Browser state management and key handling.

use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use cinephilix_api::catalog::{
    PeopleSearchParams, Person, SearchPage, Title, TitleSearchParams,
};
use crossterm::event::{KeyCode, KeyModifiers};

use crate::controller::{FetchTicket, PageStatus, SearchController};
use crate::debounce::DEFAULT_DEBOUNCE;
use crate::detail::{DetailState, DetailTicket, TitleDetails};
use crate::domain::{
    PeopleDomain, SearchDomain, TitleDomain, TitlePreset, cycle_adult, cycle_title_type,
    shift_min_rating,
};
use crate::present::Presentable;

/// Browser pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PageKind {
    /// All titles with the full filter set.
    #[default]
    Explore,
    /// Movies.
    Movies,
    /// TV series.
    TvShows,
    /// People.
    People,
}

impl PageKind {
    /// All pages in tab order.
    pub const ALL: [Self; 4] = [Self::Explore, Self::Movies, Self::TvShows, Self::People];

    /// Tab label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Explore => "Explore",
            Self::Movies => "Movies",
            Self::TvShows => "TV Shows",
            Self::People => "People",
        }
    }

    /// Position in tab order.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Explore => 0,
            Self::Movies => 1,
            Self::TvShows => 2,
            Self::People => 3,
        }
    }
}

impl fmt::Display for PageKind {
    /// Writes the command-line spelling accepted by `FromStr`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Explore => "explore",
            Self::Movies => "movies",
            Self::TvShows => "tv",
            Self::People => "people",
        })
    }
}

impl FromStr for PageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "explore" => Ok(Self::Explore),
            "movies" | "movie" => Ok(Self::Movies),
            "tv" | "tv-shows" | "tvshows" => Ok(Self::TvShows),
            "people" | "person" => Ok(Self::People),
            _ => Err(format!(
                "invalid page: {s:?} (expected one of: explore, movies, tv, people)"
            )),
        }
    }
}

/// Result presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Grid of cards.
    #[default]
    Grid,
    /// Compact table rows.
    List,
}

impl ViewMode {
    /// The other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Grid => Self::List,
            Self::List => Self::Grid,
        }
    }
}

/// Input mode for the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal navigation mode.
    Normal,
    /// Free-text search input.
    Search,
    /// Genre or profession picker.
    Options,
}

/// Browser startup options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrowserOptions {
    /// Page shown first.
    pub page: PageKind,
    /// Results per page.
    pub page_size: u32,
    /// Debounce window for search input.
    pub debounce: Duration,
    /// Initial presentation.
    pub view: ViewMode,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            page: PageKind::Explore,
            page_size: cinephilix_api::catalog::DEFAULT_PAGE_SIZE,
            debounce: DEFAULT_DEBOUNCE,
            view: ViewMode::Grid,
        }
    }
}

/// Search fetch for either domain.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchTicket {
    /// Title search.
    Titles(FetchTicket<TitleSearchParams>),
    /// People search.
    People(FetchTicket<PeopleSearchParams>),
}

impl From<FetchTicket<TitleSearchParams>> for SearchTicket {
    fn from(ticket: FetchTicket<TitleSearchParams>) -> Self {
        Self::Titles(ticket)
    }
}

impl From<FetchTicket<PeopleSearchParams>> for SearchTicket {
    fn from(ticket: FetchTicket<PeopleSearchParams>) -> Self {
        Self::People(ticket)
    }
}

/// Side effect requested by the state for the event loop to run.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    /// Run a page search.
    Search {
        /// Page the result belongs to.
        page: PageKind,
        /// Fetch to run.
        ticket: SearchTicket,
    },
    /// Load cast, crew and reviews of a title.
    TitleDetail(DetailTicket),
    /// Load a person.
    PersonDetail(DetailTicket),
    /// Open a URL in the system browser.
    OpenUrl(String),
}

/// Outcome of a finished request.
#[derive(Debug)]
pub enum Completion {
    /// Title page search finished.
    Titles {
        /// Page the search belongs to.
        page: PageKind,
        /// Ticket sequence number.
        seq: u64,
        /// Results or error message.
        outcome: Result<SearchPage<Title>, String>,
    },
    /// People page search finished.
    People {
        /// Ticket sequence number.
        seq: u64,
        /// Results or error message.
        outcome: Result<SearchPage<Person>, String>,
    },
    /// Title detail tabs finished.
    TitleDetail {
        /// Ticket sequence number.
        seq: u64,
        /// Loaded tabs.
        details: TitleDetails,
    },
    /// Person detail finished.
    PersonDetail {
        /// Ticket sequence number.
        seq: u64,
        /// Person or error message.
        outcome: Result<Person, String>,
    },
}

/// Opens the detail view for a result item.
pub trait OpenDetail {
    /// Opens `self` in `detail` and returns the load to run.
    fn open_in(self, detail: &mut DetailState) -> Request;
}

impl OpenDetail for Title {
    fn open_in(self, detail: &mut DetailState) -> Request {
        Request::TitleDetail(detail.open_title(self))
    }
}

impl OpenDetail for Person {
    fn open_in(self, detail: &mut DetailState) -> Request {
        Request::PersonDetail(detail.open_person(self))
    }
}

/// Rendered content of one result item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemView {
    /// Card heading.
    pub heading: String,
    /// Card body lines.
    pub lines: Vec<String>,
    /// Table cells.
    pub cells: Vec<String>,
}

/// Page operations used by the browser, independent of the domain.
pub trait BrowserPage {
    /// Page title.
    fn name(&self) -> &'static str;
    /// Request status.
    fn status(&self) -> &PageStatus;
    /// Total matches.
    fn total(&self) -> u64;
    /// Displayed page.
    fn current_page(&self) -> u32;
    /// Last page.
    fn last_page(&self) -> u32;
    /// Number of items on the displayed page.
    fn len(&self) -> usize;
    /// Whether the displayed page has no items.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Whether filters were edited since the last fetch.
    fn has_unapplied_edits(&self) -> bool;
    /// Current free-text query.
    fn query(&self) -> String;
    /// Active filters for display.
    fn describe(&self) -> Vec<(&'static str, String)>;
    /// Option picker values.
    fn options(&self) -> &'static [&'static str];
    /// Whether an option is selected.
    fn option_selected(&self, value: &str) -> bool;
    /// Toggles an option without fetching.
    fn toggle_option(&mut self, value: &str);
    /// Cycles the sort key without fetching.
    fn cycle_sort(&mut self);
    /// Flips the sort direction without fetching.
    fn toggle_order(&mut self);
    /// Records a search edit.
    fn type_query(&mut self, text: &str, now: Instant);
    /// Fires the debounced search when due.
    fn poll_debounce(&mut self, now: Instant) -> Option<SearchTicket>;
    /// Pending debounce deadline.
    fn debounce_deadline(&self) -> Option<Instant>;
    /// Fetches page 1.
    fn apply(&mut self) -> SearchTicket;
    /// Re-fetches as is.
    fn refresh(&mut self) -> SearchTicket;
    /// Restores defaults and fetches.
    fn reset(&mut self) -> SearchTicket;
    /// Next page.
    fn next_page(&mut self) -> Option<SearchTicket>;
    /// Previous page.
    fn prev_page(&mut self) -> Option<SearchTicket>;
    /// Card and row content of every displayed item.
    fn item_views(&self) -> Vec<ItemView>;
    /// Table header.
    fn header(&self) -> &'static [&'static str];
    /// External link of an item.
    fn item_link(&self, index: usize) -> Option<String>;
    /// Opens an item in the detail view.
    fn open_item(&self, index: usize, detail: &mut DetailState) -> Option<Request>;
}

impl<D> BrowserPage for SearchController<D>
where
    D: SearchDomain,
    D::Item: Presentable + OpenDetail,
    FetchTicket<D::Filters>: Into<SearchTicket>,
{
    fn name(&self) -> &'static str {
        self.domain().name()
    }

    fn status(&self) -> &PageStatus {
        Self::status(self)
    }

    fn total(&self) -> u64 {
        Self::total(self)
    }

    fn current_page(&self) -> u32 {
        Self::current_page(self)
    }

    fn last_page(&self) -> u32 {
        Self::last_page(self)
    }

    fn len(&self) -> usize {
        self.results().len()
    }

    fn has_unapplied_edits(&self) -> bool {
        Self::has_unapplied_edits(self)
    }

    fn query(&self) -> String {
        String::from(D::query(self.filters()))
    }

    fn describe(&self) -> Vec<(&'static str, String)> {
        D::describe(self.filters())
    }

    fn options(&self) -> &'static [&'static str] {
        self.domain().options()
    }

    fn option_selected(&self, value: &str) -> bool {
        D::option_selected(self.filters(), value)
    }

    fn toggle_option(&mut self, value: &str) {
        self.edit(|f| D::toggle_option(f, value));
    }

    fn cycle_sort(&mut self) {
        self.edit(D::cycle_sort);
    }

    fn toggle_order(&mut self) {
        self.edit(D::toggle_order);
    }

    fn type_query(&mut self, text: &str, now: Instant) {
        Self::type_query(self, text, now);
    }

    fn poll_debounce(&mut self, now: Instant) -> Option<SearchTicket> {
        Self::poll_debounce(self, now).map(Into::into)
    }

    fn debounce_deadline(&self) -> Option<Instant> {
        Self::debounce_deadline(self)
    }

    fn apply(&mut self) -> SearchTicket {
        Self::apply(self).into()
    }

    fn refresh(&mut self) -> SearchTicket {
        Self::refresh(self).into()
    }

    fn reset(&mut self) -> SearchTicket {
        Self::reset(self).into()
    }

    fn next_page(&mut self) -> Option<SearchTicket> {
        Self::next_page(self).map(Into::into)
    }

    fn prev_page(&mut self) -> Option<SearchTicket> {
        Self::prev_page(self).map(Into::into)
    }

    fn item_views(&self) -> Vec<ItemView> {
        self.results()
            .iter()
            .map(|item| ItemView {
                heading: item.heading(),
                lines: item.card_lines(),
                cells: item.row_cells(),
            })
            .collect()
    }

    fn header(&self) -> &'static [&'static str] {
        <D::Item as Presentable>::HEADER
    }

    fn item_link(&self, index: usize) -> Option<String> {
        self.results()
            .get(index)
            .and_then(Presentable::link)
            .map(String::from)
    }

    fn open_item(&self, index: usize, detail: &mut DetailState) -> Option<Request> {
        let item = self.results().get(index)?.clone();
        Some(item.open_in(detail))
    }
}

/// State for the catalog browser.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct BrowserState {
    explore: SearchController<TitleDomain>,
    movies: SearchController<TitleDomain>,
    tv_shows: SearchController<TitleDomain>,
    people: SearchController<PeopleDomain>,
    /// Visible page.
    pub active: PageKind,
    /// Result presentation.
    pub view: ViewMode,
    /// Current input mode.
    pub input_mode: InputMode,
    /// Text in the search box while typing.
    pub search_input: String,
    /// Selected result index.
    pub cursor: usize,
    /// Selected option in the picker.
    pub option_cursor: usize,
    /// Detail overlay.
    pub detail: DetailState,
    visited: [bool; 4],
    requests: Vec<Request>,
}

impl BrowserState {
    /// Creates browser state. Call [`Self::start`] to issue the first fetch.
    #[must_use]
    pub fn new(options: BrowserOptions) -> Self {
        let title_page = |preset| {
            SearchController::new(TitleDomain::new(preset), options.page_size, options.debounce)
        };
        Self {
            explore: title_page(TitlePreset::Explore),
            movies: title_page(TitlePreset::Movies),
            tv_shows: title_page(TitlePreset::TvShows),
            people: SearchController::new(PeopleDomain, options.page_size, options.debounce),
            active: options.page,
            view: options.view,
            input_mode: InputMode::Normal,
            search_input: String::new(),
            cursor: 0,
            option_cursor: 0,
            detail: DetailState::default(),
            visited: [false; 4],
            requests: Vec::new(),
        }
    }

    /// Issues the initial fetch for the visible page.
    pub fn start(&mut self) {
        self.visit(self.active);
    }

    /// Visible page operations.
    #[must_use]
    pub fn page(&self) -> &dyn BrowserPage {
        self.page_of(self.active)
    }

    fn page_of(&self, kind: PageKind) -> &dyn BrowserPage {
        match kind {
            PageKind::Explore => &self.explore,
            PageKind::Movies => &self.movies,
            PageKind::TvShows => &self.tv_shows,
            PageKind::People => &self.people,
        }
    }

    fn page_mut(&mut self) -> &mut dyn BrowserPage {
        match self.active {
            PageKind::Explore => &mut self.explore,
            PageKind::Movies => &mut self.movies,
            PageKind::TvShows => &mut self.tv_shows,
            PageKind::People => &mut self.people,
        }
    }

    const fn title_page_mut(&mut self) -> Option<&mut SearchController<TitleDomain>> {
        match self.active {
            PageKind::Explore => Some(&mut self.explore),
            PageKind::Movies => Some(&mut self.movies),
            PageKind::TvShows => Some(&mut self.tv_shows),
            PageKind::People => None,
        }
    }

    /// Drains requests produced since the last call.
    pub fn take_requests(&mut self) -> Vec<Request> {
        std::mem::take(&mut self.requests)
    }

    /// Earliest pending debounce deadline across pages.
    #[must_use]
    pub fn debounce_deadline(&self) -> Option<Instant> {
        PageKind::ALL
            .iter()
            .filter_map(|kind| self.page_of(*kind).debounce_deadline())
            .min()
    }

    /// Fires any debounced search that is due.
    pub fn poll_debounce(&mut self, now: Instant) {
        let due = [
            (
                PageKind::Explore,
                self.explore.poll_debounce(now).map(SearchTicket::from),
            ),
            (
                PageKind::Movies,
                self.movies.poll_debounce(now).map(SearchTicket::from),
            ),
            (
                PageKind::TvShows,
                self.tv_shows.poll_debounce(now).map(SearchTicket::from),
            ),
            (
                PageKind::People,
                self.people.poll_debounce(now).map(SearchTicket::from),
            ),
        ];
        for (kind, ticket) in due {
            let Some(ticket) = ticket else { continue };
            if kind == self.active {
                self.cursor = 0;
            }
            self.requests.push(Request::Search { page: kind, ticket });
        }
    }

    /// Applies a finished request.
    pub fn apply_completion(&mut self, completion: Completion) {
        match completion {
            Completion::Titles { page, seq, outcome } => {
                let controller = match page {
                    PageKind::Explore => &mut self.explore,
                    PageKind::Movies => &mut self.movies,
                    PageKind::TvShows => &mut self.tv_shows,
                    PageKind::People => return,
                };
                if controller.complete(seq, outcome) && page == self.active {
                    self.clamp_cursor();
                }
            }
            Completion::People { seq, outcome } => {
                if self.people.complete(seq, outcome) && self.active == PageKind::People {
                    self.clamp_cursor();
                }
            }
            Completion::TitleDetail { seq, details } => {
                self.detail.complete_title(seq, details);
            }
            Completion::PersonDetail { seq, outcome } => {
                self.detail.complete_person(seq, outcome);
            }
        }
    }

    /// Switches to a page, fetching it on first visit.
    pub fn switch_page(&mut self, kind: PageKind) {
        if kind == self.active {
            return;
        }
        self.active = kind;
        self.cursor = 0;
        self.option_cursor = 0;
        self.visit(kind);
    }

    fn visit(&mut self, kind: PageKind) {
        let Some(seen) = self.visited.get_mut(kind.index()) else {
            return;
        };
        if *seen {
            return;
        }
        *seen = true;
        let ticket = self.page_mut().refresh();
        self.requests.push(Request::Search { page: kind, ticket });
    }

    fn push_search(&mut self, ticket: Option<SearchTicket>) {
        if let Some(ticket) = ticket {
            self.cursor = 0;
            self.requests.push(Request::Search {
                page: self.active,
                ticket,
            });
        }
    }

    fn clamp_cursor(&mut self) {
        let len = self.page().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    /// Handles a key press. Returns `true` to exit.
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers, now: Instant) -> bool {
        if key == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }
        if self.detail.is_open() {
            return self.handle_detail_input(key);
        }
        match self.input_mode {
            InputMode::Search => {
                self.handle_search_input(key, now);
                false
            }
            InputMode::Options => {
                self.handle_options_input(key);
                false
            }
            InputMode::Normal => self.handle_normal_input(key),
        }
    }

    fn handle_detail_input(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('q') => return true,
            KeyCode::Esc | KeyCode::Backspace => self.detail.close(),
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => self.detail.next_tab(),
            KeyCode::Char('O') => {
                if let Some(url) = self.detail.link() {
                    self.requests.push(Request::OpenUrl(String::from(url)));
                }
            }
            _ => {}
        }
        false
    }

    fn handle_search_input(&mut self, key: KeyCode, now: Instant) {
        match key {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                let ticket = self.page_mut().apply();
                self.push_search(Some(ticket));
            }
            KeyCode::Backspace => {
                self.search_input.pop();
                let text = self.search_input.clone();
                self.page_mut().type_query(&text, now);
            }
            KeyCode::Char(c) => {
                self.search_input.push(c);
                let text = self.search_input.clone();
                self.page_mut().type_query(&text, now);
            }
            _ => {}
        }
    }

    fn handle_options_input(&mut self, key: KeyCode) {
        let count = self.page().options().len();
        match key {
            KeyCode::Esc | KeyCode::Char('g') => self.input_mode = InputMode::Normal,
            KeyCode::Up | KeyCode::Char('k') => {
                self.option_cursor = self.option_cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.option_cursor.saturating_add(1) < count {
                    self.option_cursor = self.option_cursor.saturating_add(1);
                }
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                if let Some(value) = self.page().options().get(self.option_cursor).copied() {
                    self.page_mut().toggle_option(value);
                }
            }
            _ => {}
        }
    }

    fn handle_normal_input(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('q') => return true,
            KeyCode::Up | KeyCode::Left | KeyCode::Char('k' | 'h') => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Right | KeyCode::Char('j' | 'l') => {
                if self.cursor.saturating_add(1) < self.page().len() {
                    self.cursor = self.cursor.saturating_add(1);
                }
            }
            KeyCode::PageDown | KeyCode::Char('n') => {
                let ticket = self.page_mut().next_page();
                self.push_search(ticket);
            }
            KeyCode::PageUp | KeyCode::Char('p') => {
                let ticket = self.page_mut().prev_page();
                self.push_search(ticket);
            }
            KeyCode::Enter => {
                let cursor = self.cursor;
                let request = match self.active {
                    PageKind::Explore => self.explore.open_item(cursor, &mut self.detail),
                    PageKind::Movies => self.movies.open_item(cursor, &mut self.detail),
                    PageKind::TvShows => self.tv_shows.open_item(cursor, &mut self.detail),
                    PageKind::People => self.people.open_item(cursor, &mut self.detail),
                };
                self.requests.extend(request);
            }
            KeyCode::Char('/') => {
                self.search_input = self.page().query();
                self.input_mode = InputMode::Search;
            }
            KeyCode::Char('g') => {
                self.option_cursor = 0;
                self.input_mode = InputMode::Options;
            }
            KeyCode::Char('t') => {
                if let Some(page) = self.title_page_mut() {
                    page.edit(cycle_title_type);
                }
            }
            KeyCode::Char('x') => {
                if let Some(page) = self.title_page_mut() {
                    page.edit(cycle_adult);
                }
            }
            KeyCode::Char('[') => {
                if let Some(page) = self.title_page_mut() {
                    page.edit(|f| shift_min_rating(f, -1.0));
                }
            }
            KeyCode::Char(']') => {
                if let Some(page) = self.title_page_mut() {
                    page.edit(|f| shift_min_rating(f, 1.0));
                }
            }
            KeyCode::Char('s') => self.page_mut().cycle_sort(),
            KeyCode::Char('o') => self.page_mut().toggle_order(),
            KeyCode::Char('a') => {
                let ticket = self.page_mut().apply();
                self.push_search(Some(ticket));
            }
            KeyCode::Char('R') => {
                let ticket = self.page_mut().reset();
                self.search_input.clear();
                self.push_search(Some(ticket));
            }
            KeyCode::Char('v') => self.view = self.view.toggled(),
            KeyCode::Char('O') => {
                if let Some(url) = self.page().item_link(self.cursor) {
                    self.requests.push(Request::OpenUrl(url));
                }
            }
            KeyCode::Char(c @ '1'..='4') => {
                let kind = c
                    .to_digit(10)
                    .and_then(|d| usize::try_from(d).ok())
                    .and_then(|d| d.checked_sub(1))
                    .and_then(|idx| PageKind::ALL.get(idx).copied());
                if let Some(kind) = kind {
                    self.switch_page(kind);
                }
            }
            _ => {}
        }
        false
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]
    #![allow(clippy::arithmetic_side_effects)]

    use cinephilix_api::catalog::{TitleType, normalize_ids};

    use super::*;

    fn key(state: &mut BrowserState, code: KeyCode) -> bool {
        state.handle_key(code, KeyModifiers::NONE, Instant::now())
    }

    fn titles_page() -> SearchPage<Title> {
        let json = include_str!("../../../../fixtures/catalog/search_titles_movies_p1.json");
        decode(json)
    }

    fn empty_page<T>() -> SearchPage<T> {
        SearchPage {
            items: Vec::new(),
            total: 0,
            page: 1,
            page_size: 8,
        }
    }

    fn decode<T: serde::de::DeserializeOwned>(json: &str) -> T {
        let mut value: serde_json::Value = serde_json::from_str(json).unwrap();
        normalize_ids(&mut value);
        serde_json::from_value(value).unwrap()
    }

    fn search_ticket(request: &Request) -> (PageKind, u64) {
        match request {
            Request::Search {
                page,
                ticket: SearchTicket::Titles(t),
            } => (*page, t.seq),
            Request::Search {
                page,
                ticket: SearchTicket::People(t),
            } => (*page, t.seq),
            other => panic!("expected search request, got {other:?}"),
        }
    }

    fn loaded_state() -> BrowserState {
        let mut state = BrowserState::new(BrowserOptions {
            page: PageKind::Movies,
            page_size: 8,
            ..BrowserOptions::default()
        });
        state.start();
        let requests = state.take_requests();
        let (page, seq) = search_ticket(&requests[0]);
        state.apply_completion(Completion::Titles {
            page,
            seq,
            outcome: Ok(titles_page()),
        });
        state
    }

    #[test]
    fn test_start_fetches_active_page_once() {
        // Arrange
        let mut state = BrowserState::new(BrowserOptions::default());

        // Act
        state.start();
        state.start();
        let requests = state.take_requests();

        // Assert
        assert_eq!(requests.len(), 1);
        assert_eq!(search_ticket(&requests[0]).0, PageKind::Explore);
    }

    #[test]
    fn test_completion_populates_page() {
        // Arrange & Act
        let state = loaded_state();

        // Assert
        assert_eq!(state.page().len(), 8);
        assert_eq!(state.page().total(), 50);
        assert_eq!(state.page().last_page(), 7);
        assert_eq!(*state.page().status(), PageStatus::Idle);
    }

    #[test]
    fn test_filter_edits_wait_for_apply() {
        // Arrange
        let mut state = loaded_state();

        // Act
        key(&mut state, KeyCode::Char('t'));
        key(&mut state, KeyCode::Char('s'));
        key(&mut state, KeyCode::Char(']'));
        let before_apply = state.take_requests();
        let dirty = state.page().has_unapplied_edits();
        key(&mut state, KeyCode::Char('a'));
        let after_apply = state.take_requests();

        // Assert
        assert!(before_apply.is_empty());
        assert!(dirty);
        assert_eq!(after_apply.len(), 1);
        match &after_apply[0] {
            Request::Search {
                ticket: SearchTicket::Titles(t),
                ..
            } => {
                assert_eq!(t.filters.title_type, Some(TitleType::TvSeries));
                assert_eq!(t.filters.page, 1);
            }
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[test]
    fn test_typing_is_debounced() {
        // Arrange
        let mut state = loaded_state();
        let start = Instant::now();

        // Act
        state.handle_key(KeyCode::Char('/'), KeyModifiers::NONE, start);
        for (i, c) in "top".chars().enumerate() {
            let at = start + Duration::from_millis(50 * u64::try_from(i).unwrap());
            state.handle_key(KeyCode::Char(c), KeyModifiers::NONE, at);
        }
        let while_typing = state.take_requests();
        let deadline = state.debounce_deadline().unwrap();
        state.poll_debounce(deadline);
        let settled = state.take_requests();

        // Assert
        assert!(while_typing.is_empty());
        assert_eq!(settled.len(), 1);
        match &settled[0] {
            Request::Search {
                ticket: SearchTicket::Titles(t),
                ..
            } => assert_eq!(t.filters.search.as_deref(), Some("top")),
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[test]
    fn test_page_keys_fetch_neighbours() {
        // Arrange
        let mut state = loaded_state();

        // Act
        key(&mut state, KeyCode::Char('p'));
        let prev = state.take_requests();
        key(&mut state, KeyCode::Char('n'));
        let next = state.take_requests();

        // Assert
        assert!(prev.is_empty());
        assert_eq!(next.len(), 1);
        match &next[0] {
            Request::Search {
                ticket: SearchTicket::Titles(t),
                ..
            } => assert_eq!(t.filters.page, 2),
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[test]
    fn test_reset_issues_exactly_one_fetch() {
        // Arrange
        let mut state = loaded_state();
        key(&mut state, KeyCode::Char('x'));
        key(&mut state, KeyCode::Char('o'));
        state.handle_key(KeyCode::Char('/'), KeyModifiers::NONE, Instant::now());
        state.handle_key(KeyCode::Char('z'), KeyModifiers::NONE, Instant::now());
        key(&mut state, KeyCode::Esc);

        // Act
        key(&mut state, KeyCode::Char('R'));
        let requests = state.take_requests();
        state.poll_debounce(Instant::now() + Duration::from_secs(5));

        // Assert
        assert_eq!(requests.len(), 1);
        assert!(state.take_requests().is_empty());
        assert!(state.search_input.is_empty());
        assert!(!state.page().has_unapplied_edits());
    }

    #[test]
    fn test_enter_opens_detail_and_tab_cycles() {
        // Arrange
        let mut state = loaded_state();
        key(&mut state, KeyCode::Down);

        // Act
        key(&mut state, KeyCode::Enter);
        let requests = state.take_requests();
        key(&mut state, KeyCode::Tab);
        key(&mut state, KeyCode::Esc);

        // Assert
        match &requests[0] {
            Request::TitleDetail(ticket) => assert_eq!(ticket.id, "movie-02"),
            other => panic!("unexpected request: {other:?}"),
        }
        assert!(!state.detail.is_open());
    }

    #[test]
    fn test_switch_page_fetches_on_first_visit_only() {
        // Arrange
        let mut state = loaded_state();

        // Act
        key(&mut state, KeyCode::Char('4'));
        let first = state.take_requests();
        key(&mut state, KeyCode::Char('2'));
        key(&mut state, KeyCode::Char('4'));
        let second = state.take_requests();

        // Assert
        assert_eq!(first.len(), 1);
        assert_eq!(search_ticket(&first[0]).0, PageKind::People);
        assert!(second.is_empty());
        assert_eq!(state.active, PageKind::People);
    }

    #[test]
    fn test_stale_page_completion_is_ignored() {
        // Arrange
        let mut state = loaded_state();
        key(&mut state, KeyCode::Char('a'));
        let first = state.take_requests();
        key(&mut state, KeyCode::Char('a'));
        let second = state.take_requests();
        let (_, old_seq) = search_ticket(&first[0]);
        let (_, new_seq) = search_ticket(&second[0]);

        // Act
        state.apply_completion(Completion::Titles {
            page: PageKind::Movies,
            seq: new_seq,
            outcome: Err(String::from("boom")),
        });
        state.apply_completion(Completion::Titles {
            page: PageKind::Movies,
            seq: old_seq,
            outcome: Ok(empty_page()),
        });

        // Assert
        assert_eq!(
            *state.page().status(),
            PageStatus::Error(String::from("boom"))
        );
        assert_eq!(state.page().len(), 8);
    }

    #[test]
    fn test_options_picker_toggles_genre() {
        // Arrange
        let mut state = loaded_state();

        // Act
        key(&mut state, KeyCode::Char('g'));
        key(&mut state, KeyCode::Down);
        key(&mut state, KeyCode::Char(' '));
        key(&mut state, KeyCode::Esc);

        // Assert
        assert!(state.page().option_selected("Adventure"));
        assert_eq!(state.input_mode, InputMode::Normal);
        assert!(state.take_requests().is_empty());
    }

    #[test]
    fn test_quit_keys() {
        // Arrange
        let mut state = BrowserState::new(BrowserOptions::default());

        // Act & Assert
        assert!(state.handle_key(KeyCode::Char('c'), KeyModifiers::CONTROL, Instant::now()));
        assert!(key(&mut state, KeyCode::Char('q')));
        assert!(!key(&mut state, KeyCode::Char('z')));
    }

    #[test]
    fn test_page_kind_from_str() {
        // Arrange & Act & Assert
        assert_eq!("tv".parse::<PageKind>().unwrap(), PageKind::TvShows);
        assert_eq!("People".parse::<PageKind>().unwrap(), PageKind::People);
        assert!("music".parse::<PageKind>().is_err());
    }
}
