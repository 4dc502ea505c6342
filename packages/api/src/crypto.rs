//! # Sealing payloads and cookie tokens
//!
//! The gateway and this application share one symmetric project key (the
//! `encryption_key`, 64 hex chars). Payloads handed over on the login
//! redirect and the `auth` cookie token are both *sealed* blobs:
//!
//! ```text
//! hex( nonce[12] || AES-256-GCM(key, nonce, plaintext) )
//! ```
//!
//! [`SealingKey::open`] fails on anything that was not sealed under the same
//! key, including truncated or tampered tokens.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Key, Nonce,
};
use rand::RngCore;

/// Key length in bytes (AES-256).
pub const KEY_LEN: usize = 32;

const NONCE_LEN: usize = 12;

#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    #[error("encryption key must be {expected} bytes, got {actual}")]
    KeyLength { expected: usize, actual: usize },

    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("sealed token is too short")]
    Truncated,

    #[error("encryption failed")]
    Seal,

    #[error("decryption failed")]
    Open,
}

/// A validated 32-byte project key.
#[derive(Clone)]
pub struct SealingKey([u8; KEY_LEN]);

impl std::fmt::Debug for SealingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SealingKey(..)")
    }
}

impl SealingKey {
    /// Parse a key from 64 hex characters.
    pub fn from_hex(hex_key: &str) -> Result<Self, CryptoError> {
        let bytes = hex::decode(hex_key.trim())?;
        if bytes.len() != KEY_LEN {
            return Err(CryptoError::KeyLength {
                expected: KEY_LEN,
                actual: bytes.len(),
            });
        }
        let mut key = [0u8; KEY_LEN];
        key.copy_from_slice(&bytes);
        Ok(Self(key))
    }

    /// A fresh random key.
    pub fn generate() -> Self {
        let mut key = [0u8; KEY_LEN];
        rand::thread_rng().fill_bytes(&mut key);
        Self(key)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    fn cipher(&self) -> Aes256Gcm {
        Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&self.0))
    }

    /// Encrypt `plaintext` under a random nonce and hex-encode the result.
    pub fn seal(&self, plaintext: &[u8]) -> Result<String, CryptoError> {
        let mut nonce_bytes = [0u8; NONCE_LEN];
        rand::thread_rng().fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = self
            .cipher()
            .encrypt(nonce, plaintext)
            .map_err(|_| CryptoError::Seal)?;

        let mut sealed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        sealed.extend_from_slice(&nonce_bytes);
        sealed.extend_from_slice(&ciphertext);
        Ok(hex::encode(sealed))
    }

    /// Reverse of [`seal`](Self::seal).
    pub fn open(&self, token: &str) -> Result<Vec<u8>, CryptoError> {
        let sealed = hex::decode(token.trim())?;
        if sealed.len() <= NONCE_LEN {
            return Err(CryptoError::Truncated);
        }
        let (nonce_bytes, ciphertext) = sealed.split_at(NONCE_LEN);

        self.cipher()
            .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
            .map_err(|_| CryptoError::Open)
    }
}
