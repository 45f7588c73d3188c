// ABOUTME: Credential manager owning the Renpho session lifecycle
// ABOUTME: Login, token caching through the host store, and forced re-login
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authentication lifecycle.
//!
//! The server's real session lifetime is undocumented, so the policy here is
//! strictly reactive: a cached token is reused until a data call observes an
//! authentication failure, at which point the orchestration layer asks for
//! exactly one [`CredentialManager::invalidate_and_relogin`]. There is no
//! proactive expiry timer and no login loop; repeated logins can trigger
//! account lockout on the vendor side.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::api::Api;
use crate::cache::TokenStore;
use crate::constants::{endpoints, APP_VERSION, CLIENT_DEVICE_NAME, DEVICE_TYPES, SESSION_STORE_KEY};
use crate::errors::{Error, Result};

/// Account credentials, supplied once by the host configuration
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Account email
    pub email: String,
    /// Account password
    pub password: String,
}

/// A session issued by the login endpoint.
///
/// Opaque to the host; serialized as JSON into the token store and reused
/// verbatim on data calls. `acquired_at` is diagnostic only and never drives
/// re-authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionToken {
    /// Opaque token string sent in the `token` header
    pub token: String,
    /// Numeric account id sent in the `userId` header
    pub user_id: i64,
    /// When this client obtained the token
    pub acquired_at: DateTime<Utc>,
}

/// Decrypted login response document
#[derive(Debug, Deserialize)]
struct LoginDocument {
    #[serde(default)]
    login: Option<LoginInfo>,
}

#[derive(Debug, Deserialize)]
struct LoginInfo {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    id: Option<i64>,
}

/// Owns login, token caching, and forced re-authentication
pub struct CredentialManager {
    credentials: Credentials,
    api: Api,
    store: Arc<dyn TokenStore>,
    // Guards the whole read-check-write of the cached session so a host that
    // parallelizes refreshes cannot race two logins.
    session: Mutex<Option<SessionToken>>,
}

impl CredentialManager {
    /// Create a manager for one account with an injected token store
    #[must_use]
    pub fn new(credentials: Credentials, api: Api, store: Arc<dyn TokenStore>) -> Self {
        Self {
            credentials,
            api,
            store,
            session: Mutex::new(None),
        }
    }

    /// Return a usable session token, logging in only when nothing is cached.
    ///
    /// A cached token is returned without any network call; reuse is the
    /// default path.
    ///
    /// # Errors
    ///
    /// Propagates login failures; see [`CredentialManager::login`].
    pub async fn valid_token(&self) -> Result<SessionToken> {
        let mut session = self.session.lock().await;

        if let Some(token) = session.as_ref() {
            return Ok(token.clone());
        }

        if let Some(stored) = self.store.get(SESSION_STORE_KEY).await? {
            match serde_json::from_str::<SessionToken>(&stored) {
                Ok(token) => {
                    debug!(user_id = token.user_id, "reusing session from token store");
                    *session = Some(token.clone());
                    return Ok(token);
                }
                Err(err) => {
                    // Corrupt cache entry; fall through to a fresh login
                    // rather than failing the refresh.
                    warn!(error = %err, "stored session is unreadable, logging in again");
                }
            }
        }

        self.login_locked(&mut session).await
    }

    /// Perform a fresh login and cache the resulting session.
    ///
    /// # Errors
    ///
    /// - [`Error::Authentication`] when the server rejects the credentials
    /// - [`Error::Network`] / [`Error::Protocol`] for transport and response
    ///   shape problems
    pub async fn login(&self) -> Result<SessionToken> {
        let mut session = self.session.lock().await;
        self.login_locked(&mut session).await
    }

    /// Discard the cached session unconditionally and log in again.
    ///
    /// Called exactly once per failed data call by the orchestration layer,
    /// never in a loop.
    ///
    /// # Errors
    ///
    /// Propagates login failures; see [`CredentialManager::login`].
    pub async fn invalidate_and_relogin(&self) -> Result<SessionToken> {
        let mut session = self.session.lock().await;
        *session = None;
        if let Err(err) = self.store.clear(SESSION_STORE_KEY).await {
            warn!(error = %err, "failed to clear stored session");
        }
        self.login_locked(&mut session).await
    }

    /// Login with the session lock held; caches only a fully parsed success,
    /// so a cancelled login leaves no partial state behind.
    async fn login_locked(&self, session: &mut Option<SessionToken>) -> Result<SessionToken> {
        info!(email = %self.credentials.email, "logging in to Renpho cloud");

        let payload = json!({
            "questionnaire": {},
            "login": {
                "email": self.credentials.email,
                "password": self.credentials.password,
                "areaCode": "US",
                "appRevision": APP_VERSION,
                "cellphoneType": CLIENT_DEVICE_NAME,
                "systemType": "11",
                "platform": "android",
            },
            "bindingList": { "deviceTypes": DEVICE_TYPES },
        });

        let document = self
            .api
            .call(endpoints::LOGIN, &payload, None)
            .await?
            .ok_or_else(|| {
                Error::protocol(endpoints::LOGIN, "login response carried no document")
            })?;

        let parsed: LoginDocument = serde_json::from_str(&document)
            .map_err(|err| Error::protocol(endpoints::LOGIN, format!("bad login document: {err}")))?;

        let info = parsed
            .login
            .ok_or_else(|| Error::protocol(endpoints::LOGIN, "login document missing 'login'"))?;

        let token = match (info.token, info.id) {
            (Some(token), Some(id)) => SessionToken {
                token,
                user_id: id,
                acquired_at: Utc::now(),
            },
            _ => {
                return Err(Error::protocol(
                    endpoints::LOGIN,
                    "login document missing token or user id",
                ))
            }
        };

        match serde_json::to_string(&token) {
            Ok(serialized) => {
                if let Err(err) = self.store.set(SESSION_STORE_KEY, &serialized).await {
                    // The session still works for this process; persistence
                    // just will not survive a restart.
                    warn!(error = %err, "failed to persist session to token store");
                }
            }
            Err(err) => warn!(error = %err, "failed to serialize session for the token store"),
        }

        info!(user_id = token.user_id, "login successful");
        *session = Some(token.clone());
        Ok(token)
    }
}
