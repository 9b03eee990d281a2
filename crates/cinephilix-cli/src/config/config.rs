//! `AppConfig` struct and TOML loading.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use cinephilix_api::catalog::{DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE};
use cinephilix_tui::debounce::{DEFAULT_DEBOUNCE, MAX_DEBOUNCE, MIN_DEBOUNCE};
use cinephilix_tui::{BrowserOptions, PageKind, ViewMode};
use serde::{Deserialize, Serialize};
use url::Url;

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Backend connection settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Interactive browser defaults.
    #[serde(default)]
    pub browse: BrowseConfig,
}

/// Backend connection configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ApiConfig {
    /// Backend base URL. `CINEPHILIX_API_URL` takes precedence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Total request timeout in seconds. No timeout when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// Browser presentation configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct BrowseConfig {
    /// Results per page (default: 20).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    /// Search debounce in milliseconds, clamped to 300-500.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debounce_ms: Option<u64>,
    /// Initial result layout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view: Option<ViewPreference>,
}

/// Result layout as written in the config file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ViewPreference {
    /// Card grid.
    Grid,
    /// Compact list.
    List,
}

impl From<ViewPreference> for ViewMode {
    fn from(value: ViewPreference) -> Self {
        match value {
            ViewPreference::Grid => Self::Grid,
            ViewPreference::List => Self::List,
        }
    }
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Resolves the backend base URL: `env_url` > config > default.
    ///
    /// # Errors
    ///
    /// Returns an error if the chosen URL does not parse.
    pub fn base_url(&self, env_url: Option<&str>) -> Result<Url> {
        let raw = env_url
            .filter(|s| !s.trim().is_empty())
            .or(self.api.base_url.as_deref())
            .unwrap_or(DEFAULT_BASE_URL);
        Url::parse(raw.trim()).with_context(|| format!("invalid API base URL: {raw}"))
    }

    /// Request timeout, if configured.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.api
            .timeout_secs
            .filter(|s| *s > 0)
            .map(Duration::from_secs)
    }

    /// Page size for searches and listings.
    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.browse
            .page_size
            .filter(|s| *s > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// Browser startup options for `page`.
    #[must_use]
    pub fn browser_options(&self, page: PageKind) -> BrowserOptions {
        let debounce = self
            .browse
            .debounce_ms
            .map_or(DEFAULT_DEBOUNCE, Duration::from_millis)
            .clamp(MIN_DEBOUNCE, MAX_DEBOUNCE);
        BrowserOptions {
            page,
            page_size: self.page_size(),
            debounce,
            view: self.browse.view.map_or(ViewMode::Grid, ViewMode::from),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_default_config() {
        // Arrange & Act
        let config = AppConfig::default();

        // Assert
        assert_eq!(config.page_size(), 20);
        assert_eq!(config.timeout(), None);
        assert_eq!(
            config.base_url(None).unwrap().as_str(),
            "http://localhost:3000/"
        );
    }

    #[test]
    fn test_serialize_deserialize_roundtrip() {
        // Arrange
        let config = AppConfig {
            api: ApiConfig {
                base_url: Some(String::from("http://catalog.internal:8080")),
                timeout_secs: Some(30),
            },
            browse: BrowseConfig {
                page_size: Some(12),
                debounce_ms: Some(350),
                view: Some(ViewPreference::List),
            },
        };

        // Act
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();

        // Assert
        assert_eq!(parsed, config);
        assert!(toml_str.contains("view = \"list\""));
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_partial_config() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[browse]\npage_size = 8\n").unwrap();

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config.page_size(), 8);
        assert_eq!(config.api, ApiConfig::default());
    }

    #[test]
    fn test_load_invalid_toml_fails() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[browse\n").unwrap();

        // Act
        let result = AppConfig::load(&path);

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn test_base_url_precedence() {
        // Arrange
        let config = AppConfig {
            api: ApiConfig {
                base_url: Some(String::from("http://from-config:4000")),
                timeout_secs: None,
            },
            browse: BrowseConfig::default(),
        };

        // Act
        let from_env = config.base_url(Some("http://from-env:5000")).unwrap();
        let blank_env = config.base_url(Some("  ")).unwrap();

        // Assert
        assert_eq!(from_env.as_str(), "http://from-env:5000/");
        assert_eq!(blank_env.as_str(), "http://from-config:4000/");
    }

    #[test]
    fn test_base_url_invalid() {
        // Arrange
        let config = AppConfig::default();

        // Act
        let result = config.base_url(Some("not a url"));

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn test_browser_options_clamp_debounce() {
        // Arrange
        let mut config = AppConfig::default();
        config.browse.debounce_ms = Some(50);
        config.browse.view = Some(ViewPreference::List);

        // Act
        let low = config.browser_options(PageKind::People);
        config.browse.debounce_ms = Some(2_000);
        let high = config.browser_options(PageKind::People);

        // Assert
        assert_eq!(low.debounce, Duration::from_millis(300));
        assert_eq!(high.debounce, Duration::from_millis(500));
        assert_eq!(low.view, ViewMode::List);
        assert_eq!(low.page, PageKind::People);
    }

    #[test]
    fn test_zero_values_fall_back() {
        // Arrange
        let mut config = AppConfig::default();
        config.browse.page_size = Some(0);
        config.api.timeout_secs = Some(0);

        // Act & Assert
        assert_eq!(config.page_size(), 20);
        assert_eq!(config.timeout(), None);
    }
}
