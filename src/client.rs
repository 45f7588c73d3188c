// ABOUTME: Client facade composing the credential manager and the fetcher
// ABOUTME: Implements the reuse-then-relogin retry policy, one retry maximum
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Top-level client.
//!
//! One [`RenphoClient`] per configured account, constructed explicitly with
//! the host's token store injected; there is no ambient global instance.
//! Each call to [`RenphoClient::latest_measurement`] is one refresh cycle:
//! get a valid token (cached in the common case), fetch, and on an observed
//! authentication failure perform exactly one re-login and one retried fetch.

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::api::{Api, HttpTransport, RenphoTransport};
use crate::auth::{CredentialManager, Credentials};
use crate::cache::TokenStore;
use crate::config::ClientConfig;
use crate::errors::Result;
use crate::fetcher::MeasurementFetcher;
use crate::models::MeasurementReading;

/// Client for one Renpho account
pub struct RenphoClient {
    manager: CredentialManager,
    fetcher: MeasurementFetcher,
    refresh_interval: Duration,
}

impl RenphoClient {
    /// Build a client over HTTP using the configuration's base URL and timeouts
    #[must_use]
    pub fn new(config: ClientConfig, store: Arc<dyn TokenStore>) -> Self {
        let transport = Arc::new(HttpTransport::new(config.base_url.clone(), &config.http));
        Self::with_transport(config, transport, store)
    }

    /// Build a client over a custom transport (tests, instrumented hosts)
    #[must_use]
    pub fn with_transport(
        config: ClientConfig,
        transport: Arc<dyn RenphoTransport>,
        store: Arc<dyn TokenStore>,
    ) -> Self {
        let api = Api::new(transport);
        let credentials = Credentials {
            email: config.email,
            password: config.password,
        };

        Self {
            manager: CredentialManager::new(credentials, api.clone(), store),
            fetcher: MeasurementFetcher::new(api),
            refresh_interval: config.refresh_interval,
        }
    }

    /// Polling interval the host configured for this account
    #[must_use]
    pub const fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    /// Run one refresh cycle and return the latest measurement.
    ///
    /// On an authentication failure from the data call the cached session is
    /// discarded, a single re-login is performed, and the fetch is retried
    /// once; whatever that retry returns is the result. All other errors
    /// propagate unchanged for the host to handle on its next scheduled
    /// cycle.
    ///
    /// # Errors
    ///
    /// See [`crate::Error`] for the taxonomy the host receives.
    pub async fn latest_measurement(&self) -> Result<MeasurementReading> {
        let session = self.manager.valid_token().await?;

        match self.fetcher.fetch_latest(&session).await {
            Err(err) if err.is_authentication() => {
                warn!(error = %err, "session rejected by data endpoint, re-authenticating once");
                let fresh = self.manager.invalidate_and_relogin().await?;
                self.fetcher.fetch_latest(&fresh).await
            }
            outcome => outcome,
        }
    }
}
