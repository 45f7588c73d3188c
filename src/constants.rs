// ABOUTME: Constants for the Renpho cloud API wire protocol
// ABOUTME: Endpoints, fixed headers, payload cipher key, and error classification tables
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire-protocol constants.
//!
//! Everything here is dictated by the vendor's mobile client: the endpoints,
//! the header fingerprint, and the payload cipher key are protocol
//! compatibility requirements, not tunables.

/// Production API base URL
pub const API_BASE_URL: &str = "https://cloud.renpho.com";

/// AES-128 key embedded in the vendor's mobile app.
///
/// This is a publicly known constant required for wire-format compatibility;
/// it provides no confidentiality and is not treated as a secret.
pub const PAYLOAD_CIPHER_KEY: &[u8; 16] = b"ed*wijdi$h6fe3ew";

/// App version reported in request headers and the login payload
pub const APP_VERSION: &str = "7.5.0";

/// API endpoints, relative to [`API_BASE_URL`]
pub mod endpoints {
    /// Login / session creation
    pub const LOGIN: &str = "renpho-aggregation/user/login";
    /// Daily health report carrying the latest weigh-in record
    pub const DAILY_REPORT: &str = "RenphoHealth/healthManage/dailyCalories";
}

/// Scale device-type codes sent in the login binding list
pub const DEVICE_TYPES: [&str; 7] = ["02D3", "02D5", "0B18", "0B38", "0B58", "0B78", "0BA6"];

/// Envelope `code` value the server returns on success
pub const API_CODE_SUCCESS: i64 = 101;

/// Envelope `code` values that indicate an authentication failure
pub const AUTH_ERROR_CODES: [i64; 5] = [102, 103, 104, 401, 403];

/// `msg` substrings that indicate an authentication failure when the code
/// is not one of [`AUTH_ERROR_CODES`]
pub const AUTH_ERROR_KEYWORDS: [&str; 6] = [
    "token",
    "login",
    "unauthorized",
    "expired",
    "invalid",
    "forbidden",
];

/// Device-model string this client reports in the login payload
pub const CLIENT_DEVICE_NAME: &str = "renpho-health";

/// Key under which the cached session is written to the host's token store
pub const SESSION_STORE_KEY: &str = "renpho_session";

/// Default refresh interval for the host polling loop (one hour)
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 3600;

/// Default HTTP request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default HTTP connect timeout in seconds
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
