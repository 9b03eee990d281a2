//! Application configuration module.
//!
//! Manages the TOML config file holding the backend URL, request timeout
//! and browser defaults.

#[allow(clippy::module_inception)]
mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::{ApiConfig, AppConfig, BrowseConfig, ViewPreference};
pub use paths::{resolve_config_dir, resolve_config_path};
