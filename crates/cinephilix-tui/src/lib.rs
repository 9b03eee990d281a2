//! Terminal browser for the Cinephilix catalog.
//!
//! Four search pages (explore, movies, TV shows, people) share one
//! debounced, sequence-fenced search controller. The browser renders
//! results as cards or a compact list and opens a detail overlay with
//! cast, crew and reviews on demand.

pub mod browser;
pub mod controller;
pub mod debounce;
pub mod detail;
pub mod domain;
pub mod format;
pub mod present;

pub use browser::run_browser;
pub use browser::state::{BrowserOptions, PageKind, ViewMode};
