// ABOUTME: Library entry point for the renpho-health client crate
// ABOUTME: Wires the auth, fetch, cipher, and cache modules together
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![deny(unsafe_code)]

//! # Renpho Health client
//!
//! A small polling client for the Renpho Health cloud API. It logs in with
//! account credentials, caches the session token through a host-provided
//! key-value store, and retrieves the most recent body-composition
//! measurement as a fixed set of named, optional readings.
//!
//! ## Behavior
//!
//! - **Token reuse first**: a cached session is used without any network
//!   call; a login happens only when nothing is cached.
//! - **Reactive re-auth**: when a data call reports the token invalid, the
//!   client re-logs-in exactly once and retries the fetch once. Nothing else
//!   is retried internally; the host's scheduler owns backoff.
//! - **Wire-compatible cipher**: request and response payloads go through
//!   the vendor's deterministic AES-128-ECB transform, reproduced bit for
//!   bit for protocol compatibility.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use renpho_health::{ClientConfig, InMemoryTokenStore, RenphoClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ClientConfig::new("user@example.com", "hunter2");
//!     let client = RenphoClient::new(config, Arc::new(InMemoryTokenStore::new()));
//!
//!     match client.latest_measurement().await {
//!         Ok(reading) => println!("weight: {:?} kg", reading.weight_kg),
//!         Err(renpho_health::Error::DataUnavailable) => println!("no weigh-in yet"),
//!         Err(err) => eprintln!("refresh failed: {err}"),
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod auth;
pub mod cache;
pub mod client;
pub mod config;
pub mod constants;
pub mod crypto;
pub mod errors;
pub mod fetcher;
pub mod logging;
pub mod models;

pub use auth::{Credentials, SessionToken};
pub use cache::memory::InMemoryTokenStore;
pub use cache::TokenStore;
pub use client::RenphoClient;
pub use config::{ClientConfig, HttpClientConfig};
pub use errors::{Error, Result};
pub use models::{BodyMetric, MeasurementReading};
