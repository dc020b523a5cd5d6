//! # Client configuration — `vaxbook.toml`
//!
//! Defines the TOML file read by the launchers at start-up
//! (filename: [`VaxbookConfig::filename`] = `"vaxbook.toml"`).
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:5132"   # REST backend root, no trailing slash needed
//!
//! [grid]
//! dose_levels = [1, 2, 3, 4, 5]         # rows of the dose grid
//! ```
//!
//! ## Types
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`VaxbookConfig`] | Top-level config. Builder helpers (`new`, `with_dose_levels`), TOML (de)serialisation, env override and the canonical filename. |
//! | [`ApiConfig`] | Backend section: `base_url`, default **`http://localhost:5132`**. |
//! | [`GridConfig`] | Grid section: `dose_levels`, default **1 through 5**. |
//!
//! All structs derive `Default` so a missing or empty file equals the default
//! configuration. The `VAXBOOK_API_URL` environment variable overrides
//! `api.base_url` (read at run time on native targets, at compile time on wasm).

use serde::{Deserialize, Serialize};

use crate::grid::DEFAULT_DOSE_LEVELS;

/// Environment variable overriding [`ApiConfig::base_url`].
pub const API_URL_ENV: &str = "VAXBOOK_API_URL";

/// Top-level configuration stored in `vaxbook.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VaxbookConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub grid: GridConfig,
}

/// REST backend configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

/// Dose grid configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_dose_levels")]
    pub dose_levels: Vec<i32>,
}

fn default_base_url() -> String {
    "http://localhost:5132".to_string()
}

fn default_dose_levels() -> Vec<i32> {
    DEFAULT_DOSE_LEVELS.to_vec()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            dose_levels: default_dose_levels(),
        }
    }
}

impl ApiConfig {
    /// Join the base URL with an absolute API path such as `/api/user`.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl VaxbookConfig {
    /// Create a config pointing at the given backend.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api: ApiConfig {
                base_url: base_url.into(),
            },
            grid: GridConfig::default(),
        }
    }

    /// Builder method to set the dose rows.
    pub fn with_dose_levels(mut self, levels: Vec<i32>) -> Self {
        self.grid.dose_levels = levels;
        self
    }

    /// Apply `VAXBOOK_API_URL` if it is set and non-empty.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(url) = env_api_url().filter(|u| !u.trim().is_empty()) {
            self.api.base_url = url.trim().to_string();
        }
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "vaxbook.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn env_api_url() -> Option<String> {
    std::env::var(API_URL_ENV).ok()
}

#[cfg(target_arch = "wasm32")]
fn env_api_url() -> Option<String> {
    option_env!("VAXBOOK_API_URL").map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = VaxbookConfig::from_toml("").unwrap();
        assert_eq!(config, VaxbookConfig::default());
        assert_eq!(config.api.base_url, "http://localhost:5132");
        assert_eq!(config.grid.dose_levels, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_partial_sections() {
        let config = VaxbookConfig::from_toml("[api]\nbase_url = \"https://vax.example.org/\"\n").unwrap();
        assert_eq!(config.api.base_url, "https://vax.example.org/");
        assert_eq!(config.grid, GridConfig::default());
        assert_eq!(
            config.api.endpoint("/api/vaccine"),
            "https://vax.example.org/api/vaccine"
        );
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = VaxbookConfig::new("http://10.0.0.2:8080").with_dose_levels(vec![1, 2, 3]);
        let text = config.to_toml().unwrap();
        assert_eq!(VaxbookConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_env_override() {
        std::env::set_var(API_URL_ENV, " http://override:9000 ");
        let config = VaxbookConfig::default().with_env_overrides();
        std::env::remove_var(API_URL_ENV);
        assert_eq!(config.api.base_url, "http://override:9000");
    }
}
