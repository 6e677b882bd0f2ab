//! Symmetric encryption for vault payloads
//!
//! AES-256-GCM keyed by the SHA-256 digest of a passphrase. Stored text is
//! `base64(nonce || ciphertext)` with a fresh nonce per write.

use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::{Engine as _, engine::general_purpose};
use sha2::{Digest, Sha256};

use crate::error::{DecodeError, StorageError};

/// Passphrase used when the config does not set `encryption_key`
pub const DEFAULT_PASSPHRASE: &str = "weekly-wow-tasks-secure-key";

const NONCE_LEN: usize = 12;

pub struct Cipher {
    aead: Aes256Gcm,
}

impl Cipher {
    pub fn new(passphrase: &str) -> Self {
        let key = Sha256::digest(passphrase.as_bytes());
        Self {
            aead: Aes256Gcm::new(&key),
        }
    }

    pub fn encrypt(&self, plaintext: &str) -> Result<String, StorageError> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .aead
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|e| StorageError::Encryption(e.to_string()))?;

        let mut sealed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        sealed.extend_from_slice(&nonce);
        sealed.extend_from_slice(&ciphertext);
        Ok(general_purpose::STANDARD.encode(sealed))
    }

    pub fn decrypt(&self, stored: &str) -> Result<String, DecodeError> {
        let sealed = general_purpose::STANDARD.decode(stored.trim())?;
        if sealed.len() < NONCE_LEN {
            return Err(DecodeError::Truncated);
        }

        let (nonce, ciphertext) = sealed.split_at(NONCE_LEN);
        let plaintext = self
            .aead
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| DecodeError::Decrypt)?;
        Ok(String::from_utf8(plaintext)?)
    }
}

impl Default for Cipher {
    fn default() -> Self {
        Self::new(DEFAULT_PASSPHRASE)
    }
}
