//! Authenticated encryption of checkout payloads into URL-safe tokens.
//!
//! Token layout: `base64url(nonce || ciphertext || tag)` without padding, where
//! the key is derived from a shared passphrase with PBKDF2-HMAC-SHA256 over a
//! fixed salt. The passphrase ships with the client, so this keeps PII out of
//! casual view in URLs and logs; it does not keep it from anyone who reads the
//! client.

use std::collections::BTreeMap;

use aes_gcm::{
    Aes256Gcm, Key, Nonce,
    aead::{Aead, AeadCore, KeyInit, OsRng},
};
use base64::{
    Engine, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use sha2::Sha256;

/// Salt mixed into the key derivation. Changing it invalidates every token.
pub const KEY_SALT: &[u8] = b"emagrecenter-salt-v1";

pub const PBKDF2_ITERATIONS: u32 = 100_000;

const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;

/// URL-safe alphabet, no padding on encode, padding tolerated on decode.
const TOKEN_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// A flat string record, the shape the checkout service expects.
pub type Record = BTreeMap<String, String>;

#[derive(Debug, thiserror::Error)]
pub enum CipherError {
    #[error("Token is not valid base64url: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("Token is too short: {0} bytes")]
    Truncated(usize),

    /// Wrong passphrase or tampered token.
    #[error("Token failed authentication")]
    Authentication,

    #[error("Encryption failed")]
    Encryption,

    #[error("Payload is not a JSON string record: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// AES-256-GCM cipher keyed from a passphrase.
#[derive(Clone)]
pub struct CheckoutCipher {
    cipher: Aes256Gcm,
}

impl CheckoutCipher {
    /// Derive the key from `passphrase`. This runs 100 000 PBKDF2 rounds, so
    /// build the cipher once and reuse it.
    pub fn new(passphrase: &str) -> Self {
        let mut key = [0u8; 32];
        pbkdf2::pbkdf2_hmac::<Sha256>(passphrase.as_bytes(), KEY_SALT, PBKDF2_ITERATIONS, &mut key);
        Self {
            cipher: Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key)),
        }
    }

    /// Encrypt `record` under a fresh random nonce.
    pub fn encrypt(&self, record: &Record) -> Result<String, CipherError> {
        let plaintext = serde_json::to_vec(record)?;
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext.as_slice())
            .map_err(|_| CipherError::Encryption)?;

        let mut combined = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        combined.extend_from_slice(&nonce);
        combined.extend_from_slice(&ciphertext);
        Ok(TOKEN_ENGINE.encode(combined))
    }

    /// Decode, authenticate and parse a token produced by [`encrypt`].
    ///
    /// [`encrypt`]: CheckoutCipher::encrypt
    pub fn decrypt(&self, token: &str) -> Result<Record, CipherError> {
        let combined = TOKEN_ENGINE.decode(token.trim())?;
        if combined.len() < NONCE_LEN + TAG_LEN {
            return Err(CipherError::Truncated(combined.len()));
        }

        let (nonce, ciphertext) = combined.split_at(NONCE_LEN);
        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| CipherError::Authentication)?;
        Ok(serde_json::from_slice(&plaintext)?)
    }
}

impl std::fmt::Debug for CheckoutCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CheckoutCipher { .. }")
    }
}
