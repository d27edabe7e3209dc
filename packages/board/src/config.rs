//! # Dashboard configuration: `dashboard.toml`
//!
//! Where the backend lives and where to send visitors who are not allowed on
//! a page. The web crate embeds the file at build time.
//!
//! ## Structure
//!
//! ```toml
//! [gateway]
//! base_url = "http://localhost:8000"   # prefix for every /api/... path
//!
//! [session]
//! home_url = "index.html"              # redirect target on logout or denial
//! ```
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`DashboardConfig`] | Top-level config with TOML (de)serialisation and the canonical filename. |
//! | [`GatewayConfig`] | Backend base URL, default **`http://localhost:8000`**. |
//! | [`SessionConfig`] | Public landing page, default **`index.html`**. |
//!
//! A missing section or key falls back to its default.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Scheme, host and port of the API gateway, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_home_url")]
    pub home_url: String,
}

fn default_home_url() -> String {
    "index.html".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            home_url: default_home_url(),
        }
    }
}

impl DashboardConfig {
    /// Builder method to point at another gateway.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.gateway.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn filename() -> &'static str {
        "dashboard.toml"
    }

    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = DashboardConfig::from_toml("").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.gateway.base_url, "http://localhost:8000");
        assert_eq!(config.session.home_url, "index.html");
    }

    #[test]
    fn test_partial_sections() {
        let config = DashboardConfig::from_toml(
            r#"
            [gateway]
            base_url = "https://api.clinic.example"
            "#,
        )
        .unwrap();
        assert_eq!(config.gateway.base_url, "https://api.clinic.example");
        assert_eq!(config.session, SessionConfig::default());
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = DashboardConfig::default().with_base_url("http://10.0.0.5:9000/");
        assert_eq!(config.gateway.base_url, "http://10.0.0.5:9000");
        let text = config.to_toml().unwrap();
        assert_eq!(DashboardConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        assert!(DashboardConfig::from_toml("[gateway\nbase_url = 3").is_err());
    }
}
