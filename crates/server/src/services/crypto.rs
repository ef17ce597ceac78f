//! Credential cryptography.
//!
//! Two schemes, one per credential backend:
//! - CMS backend: reversible AES-256-GCM cipher (the record store holds the
//!   ciphertext; sign-in decrypts and compares). Token format is
//!   base64(nonce || ciphertext) with a random 96-bit nonce; the key is the
//!   SHA-256 of the configured secret.
//! - Local backend: hex SHA-256 digest of `salt + password` with a random
//!   16-byte hex salt.
//!
//! Decryption failures of any kind (bad base64, short token, wrong key,
//! tampered ciphertext) yield `None` and are treated upstream as an
//! authentication failure.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use rand::RngCore;
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// AES-GCM nonce length in bytes.
const NONCE_LEN: usize = 12;

/// Errors that can occur when producing a ciphertext.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// The cipher failed to encrypt.
    #[error("encryption failed")]
    Encrypt,
}

/// Reversible password cipher for the CMS credential backend.
#[derive(Clone)]
pub struct PasswordCipher {
    cipher: Aes256Gcm,
}

impl PasswordCipher {
    /// Derive a cipher from the configured secret.
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        let key_bytes = Sha256::digest(secret.expose_secret().as_bytes());
        let key = Key::<Aes256Gcm>::from_slice(&key_bytes);
        Self {
            cipher: Aes256Gcm::new(key),
        }
    }

    /// Encrypt a password into its stored token form.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::Encrypt` if the cipher fails.
    pub fn encrypt(&self, plaintext: &str) -> Result<String, CryptoError> {
        let mut nonce_bytes = [0u8; NONCE_LEN];
        rand::rng().fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = self
            .cipher
            .encrypt(nonce, plaintext.as_bytes())
            .map_err(|_| CryptoError::Encrypt)?;

        let mut token = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        token.extend_from_slice(&nonce_bytes);
        token.extend_from_slice(&ciphertext);
        Ok(BASE64.encode(token))
    }

    /// Decrypt a stored token back to the password.
    ///
    /// Any failure returns `None`; callers treat that as an authentication
    /// failure rather than an error.
    #[must_use]
    pub fn decrypt(&self, token: &str) -> Option<String> {
        let raw = BASE64.decode(token).ok()?;
        if raw.len() <= NONCE_LEN {
            return None;
        }
        let (nonce_bytes, ciphertext) = raw.split_at(NONCE_LEN);
        let nonce = Nonce::from_slice(nonce_bytes);

        let plaintext = self.cipher.decrypt(nonce, ciphertext).ok()?;
        String::from_utf8(plaintext).ok()
    }
}

/// Generate a random 16-byte salt, hex-encoded.
#[must_use]
pub fn generate_salt() -> String {
    let mut bytes = [0u8; 16];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Hex SHA-256 digest of `salt + password`.
#[must_use]
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}
