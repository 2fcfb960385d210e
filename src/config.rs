// ABOUTME: Client configuration for the Canvas transport loaded from the environment
// ABOUTME: Base URL, bearer credential, HTTP timeouts, page size and user agent
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-only configuration. The client never reads configuration files;
//! programs that do (or that store credentials elsewhere) build a
//! [`ClientConfig`] with [`ClientConfig::new`] and the builder methods.

use std::env;
use std::fmt::{self, Debug, Formatter};
use std::str::FromStr;
use std::sync::Arc;

use canvas_core::constants::DEFAULT_USER_AGENT;
use canvas_core::WireTableError;
use thiserror::Error;
use url::Url;

use crate::stream::{DEFAULT_PER_PAGE, MAX_PER_PAGE, MIN_PER_PAGE};

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default connection timeout in seconds
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Environment variable holding the API base URL
pub const ENV_BASE_URL: &str = "CANVAS_BASE_URL";
/// Environment variable holding the access token
pub const ENV_ACCESS_TOKEN: &str = "CANVAS_ACCESS_TOKEN";
/// Environment variable overriding the request timeout
pub const ENV_TIMEOUT_SECS: &str = "CANVAS_HTTP_TIMEOUT_SECS";
/// Environment variable overriding the connect timeout
pub const ENV_CONNECT_TIMEOUT_SECS: &str = "CANVAS_HTTP_CONNECT_TIMEOUT_SECS";
/// Environment variable overriding the default page size
pub const ENV_PER_PAGE: &str = "CANVAS_PER_PAGE";
/// Environment variable overriding the user agent
pub const ENV_USER_AGENT: &str = "CANVAS_USER_AGENT";

/// Failure to assemble a usable client
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is unset
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    /// A variable is set but unusable
    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        /// Variable or setting name
        key: &'static str,
        /// Raw value
        value: String,
        /// Why it was rejected
        reason: String,
    },

    /// The base URL is not an absolute http(s) URL
    #[error("invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl {
        /// Raw URL
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// The access token is empty
    #[error("access token must not be empty")]
    EmptyToken,

    /// The wire enumeration tables are inconsistent
    #[error("wire enumeration registry is invalid: {0}")]
    WireTable(#[from] WireTableError),

    /// The HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Bearer credential; never printed
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(Arc<str>);

impl AccessToken {
    /// Wrap a raw token
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyToken`] for blank input
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ConfigError> {
        let raw = raw.as_ref().trim();
        if raw.is_empty() {
            return Err(ConfigError::EmptyToken);
        }
        Ok(Self(Arc::from(raw)))
    }

    /// Raw token for the `Authorization` header
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl Debug for AccessToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Settings for one credential / base-URL pair
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Instance root, e.g. `https://school.instructure.com`
    pub base_url: Url,
    /// Bearer credential
    pub access_token: AccessToken,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
    /// Default page size for listings
    pub per_page: u32,
    /// User agent header value
    pub user_agent: String,
}

impl ClientConfig {
    /// Configuration with default timeouts and page size
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not absolute http(s) or the token is empty
    pub fn new(base_url: &str, access_token: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            access_token: AccessToken::new(access_token)?,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            per_page: DEFAULT_PER_PAGE,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        })
    }

    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or any value is invalid
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = env::var(ENV_BASE_URL).map_err(|_| ConfigError::MissingVar(ENV_BASE_URL))?;
        let token =
            env::var(ENV_ACCESS_TOKEN).map_err(|_| ConfigError::MissingVar(ENV_ACCESS_TOKEN))?;

        let mut config = Self::new(&base_url, &token)?;
        if let Some(timeout) = env_parse::<u64>(ENV_TIMEOUT_SECS)? {
            config.timeout_secs = timeout;
        }
        if let Some(timeout) = env_parse::<u64>(ENV_CONNECT_TIMEOUT_SECS)? {
            config.connect_timeout_secs = timeout;
        }
        if let Some(per_page) = env_parse::<u32>(ENV_PER_PAGE)? {
            config = config.with_per_page(per_page);
        }
        if let Ok(agent) = env::var(ENV_USER_AGENT) {
            config.user_agent = agent;
        }
        Ok(config)
    }

    /// Set request and connect timeouts
    #[must_use]
    pub const fn with_timeouts(mut self, timeout_secs: u64, connect_timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self.connect_timeout_secs = connect_timeout_secs;
        self
    }

    /// Set the default page size, clamped to what the API accepts
    #[must_use]
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.clamp(MIN_PER_PAGE, MAX_PER_PAGE);
        self
    }

    /// Set the user agent
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidBaseUrl {
        url: raw.to_owned(),
        reason,
    };
    let url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", url.scheme())));
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host".to_owned()));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("must not carry a query or fragment".to_owned()));
    }
    Ok(url)
}

fn env_parse<T>(key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let Ok(value) = env::var(key) else {
        return Ok(None);
    };
    let parsed = value.trim().parse::<T>();
    match parsed {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) => Err(ConfigError::InvalidValue {
            key,
            reason: e.to_string(),
            value,
        }),
    }
}
