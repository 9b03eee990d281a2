//! API client library for Cinephilix.
//!
//! Provides a client for the catalog REST backend (titles and people).

/// Catalog REST API client.
pub mod catalog;
