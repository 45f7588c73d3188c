// ABOUTME: AES-128-ECB payload codec matching the Renpho mobile client
// ABOUTME: PKCS#7 padding and base64 text encoding, deliberately deterministic
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Payload encryption for the Renpho cloud API.
//!
//! The vendor's mobile client encrypts every request body, and most response
//! bodies, with AES-128 in electronic-codebook mode under a fixed key shipped
//! inside the app. ECB with a static key is not confidentiality; it is a
//! wire-format requirement. The server rejects anything else, so this codec
//! reproduces the scheme bit for bit: PKCS#7 padding to the 16-byte block
//! size, then standard-alphabet base64. No IV, no randomness, identical input
//! always yields identical output.

use aes::Aes128;
use base64::{engine::general_purpose, Engine};
use cipher::block_padding::Pkcs7;
use cipher::{BlockDecryptMut, BlockEncryptMut, KeyInit};
use thiserror::Error;

use crate::constants::PAYLOAD_CIPHER_KEY;

type Aes128EcbEnc = ecb::Encryptor<Aes128>;
type Aes128EcbDec = ecb::Decryptor<Aes128>;

/// Failures while decoding a server payload
#[derive(Debug, Error)]
pub enum CipherError {
    /// Ciphertext was not valid base64
    #[error("ciphertext is not valid base64")]
    Base64(#[from] base64::DecodeError),

    /// Ciphertext length or padding bytes did not match PKCS#7
    #[error("ciphertext has invalid length or padding")]
    Padding,

    /// Decrypted bytes were not UTF-8 text
    #[error("decrypted payload is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Encrypt `plaintext` with the vendor's embedded app key.
#[must_use]
pub fn encrypt(plaintext: &str) -> String {
    encrypt_with_key(plaintext, PAYLOAD_CIPHER_KEY)
}

/// Decrypt a base64 ciphertext produced with the vendor's embedded app key.
///
/// # Errors
///
/// Returns [`CipherError`] when the input is not base64, not a whole number
/// of cipher blocks, not PKCS#7 padded, or not UTF-8 after decryption.
pub fn decrypt(ciphertext: &str) -> Result<String, CipherError> {
    decrypt_with_key(ciphertext, PAYLOAD_CIPHER_KEY)
}

/// Encrypt `plaintext` under an explicit 128-bit key.
#[must_use]
pub fn encrypt_with_key(plaintext: &str, key: &[u8; 16]) -> String {
    let ciphertext =
        Aes128EcbEnc::new(key.into()).encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());
    general_purpose::STANDARD.encode(ciphertext)
}

/// Decrypt a base64 ciphertext under an explicit 128-bit key.
///
/// # Errors
///
/// Returns [`CipherError`] when the input is not base64, not a whole number
/// of cipher blocks, not PKCS#7 padded, or not UTF-8 after decryption.
pub fn decrypt_with_key(ciphertext: &str, key: &[u8; 16]) -> Result<String, CipherError> {
    let raw = general_purpose::STANDARD.decode(ciphertext)?;
    let plaintext = Aes128EcbDec::new(key.into())
        .decrypt_padded_vec_mut::<Pkcs7>(&raw)
        .map_err(|_| CipherError::Padding)?;
    Ok(String::from_utf8(plaintext)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_preserves_plaintext() {
        for input in ["", "a", "exactly 16 bytes", "{\"data\":\"2026-08-30\"}"] {
            let ciphertext = encrypt(input);
            assert_eq!(decrypt(&ciphertext).unwrap(), input);
        }
    }

    #[test]
    fn encryption_is_deterministic() {
        let first = encrypt("{\"login\":{}}");
        let second = encrypt("{\"login\":{}}");
        assert_eq!(first, second);
    }

    #[test]
    fn garbage_base64_is_rejected() {
        assert!(matches!(
            decrypt("not base64 at all!"),
            Err(CipherError::Base64(_))
        ));
    }

    #[test]
    fn truncated_ciphertext_is_rejected() {
        let ciphertext = encrypt("some payload that spans blocks");
        // Drop the last block boundary: 8 raw bytes is not a whole AES block.
        let raw = general_purpose::STANDARD.decode(&ciphertext).unwrap();
        let truncated = general_purpose::STANDARD.encode(&raw[..8]);
        assert!(matches!(decrypt(&truncated), Err(CipherError::Padding)));
    }
}
