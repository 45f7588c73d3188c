// ABOUTME: Cryptography module for the vendor payload cipher
// ABOUTME: Centralizes the AES-ECB wire-compatibility transform
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Payload cipher required by the Renpho cloud API

pub mod codec;

pub use codec::{decrypt, decrypt_with_key, encrypt, encrypt_with_key, CipherError};
