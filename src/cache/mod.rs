// ABOUTME: Token cache abstraction consumed from the host application
// ABOUTME: Pluggable key-value backend for the cached session token
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Token cache abstraction.
//!
//! The host owns persistent storage; this crate only needs an opaque string
//! key-value interface to park the session token between refresh cycles.
//! Hosts with real persistence implement [`TokenStore`] over whatever they
//! have (a config entry, a database row, a file); [`memory::InMemoryTokenStore`]
//! covers tests and hosts that accept a fresh login per process.
//!
//! The cached value is write-only from the host's perspective: it is set,
//! cleared, and reused by this crate, never interpreted by the host.

pub mod memory;

use crate::errors::Result;

/// Host-provided key-value store for the cached session token
#[async_trait::async_trait]
pub trait TokenStore: Send + Sync {
    /// Fetch the value stored under `key`, if any
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Store`] when the backing storage fails
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Store`] when the backing storage fails
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the value stored under `key`, if any
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Store`] when the backing storage fails
    async fn clear(&self, key: &str) -> Result<()>;
}
