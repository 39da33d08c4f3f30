//! Run configuration
//!
//! Credentials come from the process environment (a `.env` file in the working
//! directory is loaded first by `main`). Nothing is validated up front: a
//! missing key is sent as an empty header and surfaces as an auth failure
//! from Pass2U on the first request.

use std::env;

/// Environment variable names
pub mod vars {
    pub const API_KEY: &str = "API_KEY";
    pub const MODEL_ID: &str = "MODEL_ID";
    pub const API_URL: &str = "PASS2U_API_URL";
    pub const VIEWER_URL: &str = "PASS2U_VIEWER_URL";
}

pub const DEFAULT_API_URL: &str = "https://api.pass2u.net";
pub const DEFAULT_VIEWER_URL: &str = "https://www.pass2u.net/d";

/// Pass2U account settings shared by the client and the roster processor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Sent as the `x-api-key` header
    pub api_key: String,
    /// Pass template ("model") new passes are issued from
    pub model_id: String,
    /// Base URL of the REST API
    pub api_url: String,
    /// Base URL public pass links are built from
    pub viewer_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model_id: String::new(),
            api_url: DEFAULT_API_URL.to_string(),
            viewer_url: DEFAULT_VIEWER_URL.to_string(),
        }
    }
}

impl Config {
    /// Read the configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            api_key: lookup(vars::API_KEY).unwrap_or_default(),
            model_id: lookup(vars::MODEL_ID).unwrap_or_default(),
            api_url: non_empty(vars::API_URL).unwrap_or(defaults.api_url),
            viewer_url: non_empty(vars::VIEWER_URL).unwrap_or(defaults.viewer_url),
        }
    }

    /// Public link for an issued pass
    pub fn viewer_link(&self, pass_id: &str) -> String {
        format!("{}/{}", self.viewer_url.trim_end_matches('/'), pass_id)
    }
}
