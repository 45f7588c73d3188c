// ABOUTME: Wire layer for the Renpho cloud API
// ABOUTME: Encrypted request envelopes, transport trait seam, and response classification
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request/response plumbing shared by the credential manager and the
//! measurement fetcher.
//!
//! Every call is a POST whose body is `{"encryptData": <ciphertext>}` and
//! whose answer is a `{code, msg, data}` envelope; `data` is itself an
//! encrypted JSON document. [`Api::call`] owns that whole dance: serialize,
//! encrypt, send, classify the envelope code, decrypt. Callers get back the
//! decrypted JSON text and parse it into their own typed DTOs.
//!
//! The HTTP round trip sits behind the [`RenphoTransport`] trait so tests can
//! script server behavior without a network.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::auth::SessionToken;
use crate::config::HttpClientConfig;
use crate::constants::{API_CODE_SUCCESS, APP_VERSION, AUTH_ERROR_CODES, AUTH_ERROR_KEYWORDS};
use crate::crypto;
use crate::errors::{Error, Result};

/// Request body wrapper; the only field the server accepts
#[derive(Debug, Clone, Serialize)]
pub struct EncryptedRequest {
    /// Base64 AES ciphertext of the actual JSON payload
    #[serde(rename = "encryptData")]
    pub encrypt_data: String,
}

/// Response envelope common to every endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope {
    /// Server status code; 101 means success
    #[serde(default)]
    pub code: i64,
    /// Human-readable status message
    #[serde(default)]
    pub msg: Option<String>,
    /// Base64 AES ciphertext of the response document, when there is one
    #[serde(default)]
    pub data: Option<String>,
}

/// Transport seam: one POST to a named endpoint, returning the raw envelope
#[async_trait]
pub trait RenphoTransport: Send + Sync {
    /// Send `body` to `endpoint`, attaching session headers when present
    ///
    /// # Errors
    ///
    /// Returns [`Error::Network`] for connectivity/timeout failures and
    /// [`Error::Protocol`] when the response is not an envelope.
    async fn post(
        &self,
        endpoint: &str,
        body: &EncryptedRequest,
        session: Option<&SessionToken>,
    ) -> Result<ApiEnvelope>;
}

/// Production transport over a pooled reqwest client
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Build a transport for `base_url` with the configured timeouts
    #[must_use]
    pub fn new(base_url: impl Into<String>, http: &HttpClientConfig) -> Self {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(http.timeout_secs))
            .connect_timeout(Duration::from_secs(http.connect_timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl RenphoTransport for HttpTransport {
    async fn post(
        &self,
        endpoint: &str,
        body: &EncryptedRequest,
        session: Option<&SessionToken>,
    ) -> Result<ApiEnvelope> {
        let url = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        );

        // Header fingerprint of the vendor's Android client; the server
        // rejects requests without it.
        let mut request = self
            .client
            .post(&url)
            .header("Content-Type", "application/json;charset=UTF-8")
            .header("language", "en")
            .header("appVersion", APP_VERSION)
            .header("platform", "android")
            .header("area", "US")
            .header("timeZone", "-6")
            .header("systemVersion", "16")
            .header("languageCode", "en")
            .header("userArea", "US")
            .json(body);

        if let Some(session) = session {
            request = request
                .header("token", &session.token)
                .header("userId", session.user_id.to_string());
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            if status == reqwest::StatusCode::UNAUTHORIZED
                || status == reqwest::StatusCode::FORBIDDEN
            {
                return Err(Error::authentication(format!(
                    "server rejected request with HTTP {status}"
                )));
            }
            return Err(Error::protocol(
                endpoint,
                format!("unexpected HTTP status {status}"),
            ));
        }

        response.json::<ApiEnvelope>().await.map_err(|err| {
            if err.is_decode() {
                Error::protocol(endpoint, format!("response is not a valid envelope: {err}"))
            } else {
                Error::Network { source: err }
            }
        })
    }
}

/// Shared encrypted-call helper over an injected transport
#[derive(Clone)]
pub struct Api {
    transport: Arc<dyn RenphoTransport>,
}

impl Api {
    /// Wrap a transport
    #[must_use]
    pub fn new(transport: Arc<dyn RenphoTransport>) -> Self {
        Self { transport }
    }

    /// Perform one encrypted API call and return the decrypted response
    /// document, if the server sent one.
    ///
    /// # Errors
    ///
    /// - [`Error::Authentication`] when the envelope code or message reports
    ///   an auth failure
    /// - [`Error::Protocol`] for any other non-success envelope, or when the
    ///   response document cannot be decrypted
    /// - [`Error::Network`] passed through from the transport
    pub async fn call(
        &self,
        endpoint: &str,
        payload: &serde_json::Value,
        session: Option<&SessionToken>,
    ) -> Result<Option<String>> {
        let plaintext = payload.to_string();
        let body = EncryptedRequest {
            encrypt_data: crypto::encrypt(&plaintext),
        };

        let envelope = self.transport.post(endpoint, &body, session).await?;

        if envelope.code != API_CODE_SUCCESS {
            let msg = envelope.msg.unwrap_or_else(|| "unknown error".to_owned());
            debug!(endpoint, code = envelope.code, msg = %msg, "API call failed");
            if is_auth_failure(envelope.code, &msg) {
                return Err(Error::authentication(msg));
            }
            return Err(Error::protocol(
                endpoint,
                format!("server error code {}: {msg}", envelope.code),
            ));
        }

        match envelope.data {
            None => Ok(None),
            Some(data) => {
                let document = crypto::decrypt(&data).map_err(|err| {
                    Error::protocol(endpoint, format!("cannot decode response document: {err}"))
                })?;
                Ok(Some(document))
            }
        }
    }
}

/// Classify a non-success envelope as an authentication failure.
///
/// The server is not consistent about auth error codes, so the message text
/// is checked against known keywords as a fallback.
fn is_auth_failure(code: i64, msg: &str) -> bool {
    if AUTH_ERROR_CODES.contains(&code) {
        return true;
    }
    let msg = msg.to_lowercase();
    AUTH_ERROR_KEYWORDS
        .iter()
        .any(|keyword| msg.contains(keyword))
}
