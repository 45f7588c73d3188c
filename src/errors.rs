// ABOUTME: Error taxonomy for the Renpho client
// ABOUTME: Distinguishes auth failures, empty data, network trouble, and protocol surprises
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Unified error handling
//!
//! One error enum covers the whole refresh cycle. The variants matter to the
//! host: [`Error::Authentication`] is user-correctable (or triggers the single
//! internal re-login when raised mid-fetch), [`Error::DataUnavailable`] is the
//! normal "no weigh-in yet" state, [`Error::Network`] is retryable on the next
//! scheduled cycle, and [`Error::Protocol`] means the server-side API changed
//! shape and should be surfaced verbatim for diagnostics.

use thiserror::Error;

/// Error type for all Renpho client operations
#[derive(Debug, Error)]
pub enum Error {
    /// Bad credentials, or a session token the server no longer accepts
    #[error("authentication failed: {message}")]
    Authentication {
        /// Server-reported reason, suitable for showing to the user
        message: String,
    },

    /// The account has no measurement record yet (new account, scale never synced)
    #[error("no measurement available yet")]
    DataUnavailable,

    /// Connectivity or timeout problem reaching the Renpho cloud
    #[error("network error talking to Renpho cloud")]
    Network {
        /// Underlying transport error
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with something this client does not understand
    #[error("unexpected response from '{endpoint}': {detail}")]
    Protocol {
        /// Endpoint that produced the response
        endpoint: String,
        /// What was wrong with it
        detail: String,
    },

    /// The host-provided token store failed
    #[error("token store error: {message}")]
    Store {
        /// Description of the storage failure
        message: String,
    },
}

impl Error {
    /// Authentication failure with a server-reported reason
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Protocol violation observed on `endpoint`
    pub fn protocol(endpoint: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Protocol {
            endpoint: endpoint.into(),
            detail: detail.into(),
        }
    }

    /// Token store failure
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// True when this error should drive the one-shot re-login retry
    #[must_use]
    pub const fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }
}

impl From<reqwest::Error> for Error {
    fn from(source: reqwest::Error) -> Self {
        Self::Network { source }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authentication_errors_are_flagged_for_retry() {
        assert!(Error::authentication("token expired").is_authentication());
        assert!(!Error::DataUnavailable.is_authentication());
        assert!(!Error::protocol("user/login", "missing token").is_authentication());
    }

    #[test]
    fn display_includes_endpoint_for_protocol_errors() {
        let err = Error::protocol("healthManage/dailyCalories", "data field not base64");
        let text = err.to_string();
        assert!(text.contains("healthManage/dailyCalories"));
        assert!(text.contains("not base64"));
    }
}
