//! Configuration loading for the hosting API client
//!
//! The configuration lives in a user-scoped INI file (`~/.hosting-api.ini`):
//!
//! ```ini
//! [Api]
//! Url = https://api.hosting.example/v1
//! Token = 0123456789abcdef
//! ```
//!
//! `User` + `Password` may replace `Token`. The file is read once at startup
//! and the resulting [`ApiConfig`] is immutable afterwards.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// File name of the config file inside the user's home directory
pub const CONFIG_FILE_NAME: &str = ".hosting-api.ini";

/// Header carrying the API token
pub const API_TOKEN_HEADER: &str = "API-TOKEN";

/// CSRF header the provider expects to be present (always empty)
pub const CSRF_TOKEN_HEADER: &str = "X-CSRF-TOKEN";

/// Credentials used to authenticate against the provider API
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// API token sent in the `API-TOKEN` header
    Token(String),
    /// Username/password pair
    Basic {
        /// Username
        user: String,
        /// Password
        password: String,
    },
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::Token(_) => f.debug_tuple("Token").field(&"<REDACTED>").finish(),
            Credentials::Basic { user, .. } => f
                .debug_struct("Basic")
                .field("user", user)
                .field("password", &"<REDACTED>")
                .finish(),
        }
    }
}

/// Immutable API configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
    credentials: Credentials,
}

/// Raw shape of the INI file
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default, alias = "Api")]
    api: Option<ApiSection>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiSection {
    #[serde(default, alias = "Url")]
    url: Option<String>,
    #[serde(default, alias = "Token")]
    token: Option<String>,
    #[serde(default, alias = "User")]
    user: Option<String>,
    #[serde(default, alias = "Password")]
    password: Option<String>,
}

impl ApiConfig {
    /// Create a configuration from already validated parts
    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Result<Self> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(Error::config_invalid("Api URL cannot be empty"));
        }

        Ok(Self {
            base_url,
            credentials,
        })
    }

    /// Load the configuration from the default location in the home directory
    pub fn load() -> Result<Self> {
        Self::load_from(&default_config_path()?)
    }

    /// Load the configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::ConfigMissing {
                path: path.to_path_buf(),
            });
        }

        tracing::debug!("Reading configuration from {}", path.display());

        let raw: ConfigFile = config::Config::builder()
            .add_source(config::File::new(
                &path.to_string_lossy(),
                config::FileFormat::Ini,
            ))
            .build()
            .and_then(|settings| settings.try_deserialize())
            .map_err(|e| {
                Error::config_invalid(format!("Unable to parse {}: {}", path.display(), e))
            })?;

        let section = raw.api.unwrap_or_default();

        let base_url = non_empty(section.url).ok_or_else(|| {
            Error::config_invalid(format!("Api URL not found in {}", path.display()))
        })?;

        let credentials = match (
            non_empty(section.token),
            non_empty(section.user),
            non_empty(section.password),
        ) {
            (Some(token), _, _) => Credentials::Token(token),
            (None, Some(user), Some(password)) => Credentials::Basic { user, password },
            _ => {
                return Err(Error::config_invalid(format!(
                    "No Api credentials (token or username/password) found in {}",
                    path.display()
                )));
            }
        };

        Self::new(base_url, credentials)
    }

    /// Base URL every API path is appended to (no trailing slash)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Configured credentials
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Headers sent with every request
    ///
    /// `API-TOKEN` is only present when a token is configured.
    pub fn headers(&self) -> BTreeMap<&'static str, String> {
        let mut headers = BTreeMap::new();
        headers.insert(CSRF_TOKEN_HEADER, String::new());
        headers.insert("accept", "*/*".to_string());
        if let Credentials::Token(token) = &self.credentials {
            headers.insert(API_TOKEN_HEADER, token.clone());
        }
        headers
    }
}

/// Path of the config file in the current user's home directory
pub fn default_config_path() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(CONFIG_FILE_NAME))
        .ok_or_else(|| Error::config_invalid("Cannot determine the home directory"))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
