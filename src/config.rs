// ABOUTME: Client configuration loaded from the environment or built directly
// ABOUTME: Account credentials, polling interval, and HTTP timeout knobs
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment-based configuration.
//!
//! The host supplies exactly three inputs: account email, account password,
//! and the refresh interval. HTTP timeouts are exposed for hosts that need
//! them; everything else about the wire protocol is fixed by the vendor.

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::constants::{
    API_BASE_URL, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REFRESH_INTERVAL_SECS,
    DEFAULT_TIMEOUT_SECS,
};

/// HTTP client timeout configuration
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
    /// Connection establishment timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

/// Configuration for one Renpho account client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Account email
    pub email: String,
    /// Account password
    pub password: String,
    /// API base URL; production default, overridable for tests
    pub base_url: String,
    /// How often the host should poll for a new reading
    pub refresh_interval: Duration,
    /// HTTP timeout configuration
    pub http: HttpClientConfig,
}

impl ClientConfig {
    /// Build a configuration with defaults for everything but the credentials
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            base_url: API_BASE_URL.to_owned(),
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_INTERVAL_SECS),
            http: HttpClientConfig::default(),
        }
    }

    /// Load configuration from `RENPHO_*` environment variables.
    ///
    /// `RENPHO_EMAIL` and `RENPHO_PASSWORD` are required; `RENPHO_BASE_URL`,
    /// `RENPHO_REFRESH_INTERVAL_SECS`, `RENPHO_HTTP_TIMEOUT_SECS`, and
    /// `RENPHO_HTTP_CONNECT_TIMEOUT_SECS` are optional overrides.
    ///
    /// # Errors
    ///
    /// Returns an error when a required variable is missing or a numeric
    /// override does not parse.
    pub fn from_env() -> Result<Self> {
        let email = env::var("RENPHO_EMAIL").context("RENPHO_EMAIL is not set")?;
        let password = env::var("RENPHO_PASSWORD").context("RENPHO_PASSWORD is not set")?;

        let mut config = Self::new(email, password);

        if let Ok(base_url) = env::var("RENPHO_BASE_URL") {
            config.base_url = base_url;
        }
        if let Ok(raw) = env::var("RENPHO_REFRESH_INTERVAL_SECS") {
            let secs: u64 = raw
                .parse()
                .context("RENPHO_REFRESH_INTERVAL_SECS is not a number")?;
            config.refresh_interval = Duration::from_secs(secs);
        }
        if let Ok(raw) = env::var("RENPHO_HTTP_TIMEOUT_SECS") {
            config.http.timeout_secs = raw
                .parse()
                .context("RENPHO_HTTP_TIMEOUT_SECS is not a number")?;
        }
        if let Ok(raw) = env::var("RENPHO_HTTP_CONNECT_TIMEOUT_SECS") {
            config.http.connect_timeout_secs = raw
                .parse()
                .context("RENPHO_HTTP_CONNECT_TIMEOUT_SECS is not a number")?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error for empty credentials or a zero refresh interval
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(!self.email.trim().is_empty(), "email must not be empty");
        anyhow::ensure!(!self.password.is_empty(), "password must not be empty");
        anyhow::ensure!(
            !self.refresh_interval.is_zero(),
            "refresh interval must be greater than zero"
        );
        Ok(())
    }
}
