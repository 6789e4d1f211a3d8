//! Credential encryption.
//!
//! Credentials are sealed with XChaCha20-Poly1305 and stored as base64
//! text. Blob layout before encoding:
//! `[nonce: 24 bytes][ciphertext + Poly1305 tag: N + 16 bytes]`.

use crate::entity::{EncryptedCredentials, IntegrationCredentials};
use crate::error::CipherError;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chacha20poly1305::{
    XChaCha20Poly1305, XNonce,
    aead::{Aead, KeyInit},
};
use rand::RngCore;

/// Nonce size for XChaCha20-Poly1305 (24 bytes).
const NONCE_LEN: usize = 24;

/// Poly1305 authentication tag size.
const TAG_LEN: usize = 16;

/// Pure conversion between plaintext credentials and the stored blob.
///
/// Implementations must be invertible: `decrypt(encrypt(c)) == c`.
pub trait CredentialCipher: Send + Sync {
    /// Seals plaintext credentials into an opaque blob.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or sealing fails.
    fn encrypt(
        &self,
        credentials: &IntegrationCredentials,
    ) -> Result<EncryptedCredentials, CipherError>;

    /// Opens a blob previously produced by [`encrypt`](Self::encrypt).
    fn decrypt(
        &self,
        encrypted: &EncryptedCredentials,
    ) -> Result<IntegrationCredentials, CipherError>;
}

/// XChaCha20-Poly1305 credential cipher with a fixed 32-byte key.
pub struct XChaCha20CredentialCipher {
    key: [u8; 32],
}

impl XChaCha20CredentialCipher {
    /// Creates a cipher from a 32-byte key.
    #[must_use]
    pub const fn new(key: [u8; 32]) -> Self {
        Self { key }
    }
}

impl CredentialCipher for XChaCha20CredentialCipher {
    fn encrypt(
        &self,
        credentials: &IntegrationCredentials,
    ) -> Result<EncryptedCredentials, CipherError> {
        let plaintext = serde_json::to_vec(credentials).map_err(|e| CipherError::Serialization {
            reason: e.to_string(),
        })?;

        let cipher = XChaCha20Poly1305::new((&self.key).into());

        let mut nonce_bytes = [0u8; NONCE_LEN];
        rand::rng().fill_bytes(&mut nonce_bytes);
        let nonce = XNonce::from_slice(&nonce_bytes);

        let ciphertext = cipher
            .encrypt(nonce, plaintext.as_slice())
            .map_err(|e| CipherError::Encryption {
                reason: e.to_string(),
            })?;

        let mut blob = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        blob.extend_from_slice(&nonce_bytes);
        blob.extend_from_slice(&ciphertext);

        Ok(EncryptedCredentials::new(BASE64.encode(blob)))
    }

    fn decrypt(
        &self,
        encrypted: &EncryptedCredentials,
    ) -> Result<IntegrationCredentials, CipherError> {
        let blob = BASE64
            .decode(encrypted.as_str())
            .map_err(|e| CipherError::Encoding {
                reason: e.to_string(),
            })?;

        if blob.len() < NONCE_LEN + TAG_LEN {
            return Err(CipherError::Decryption {
                reason: "blob too short".to_string(),
            });
        }

        let (nonce_bytes, ciphertext) = blob.split_at(NONCE_LEN);
        let nonce = XNonce::from_slice(nonce_bytes);
        let cipher = XChaCha20Poly1305::new((&self.key).into());

        let plaintext = cipher
            .decrypt(nonce, ciphertext)
            .map_err(|e| CipherError::Decryption {
                reason: e.to_string(),
            })?;

        serde_json::from_slice(&plaintext).map_err(|e| CipherError::Serialization {
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cipher() -> XChaCha20CredentialCipher {
        XChaCha20CredentialCipher::new([0x42; 32])
    }

    fn sample_credentials() -> IntegrationCredentials {
        IntegrationCredentials {
            api_key: Some("sk_live_123".to_string()),
            region: Some("eu-west-1".to_string()),
            ..IntegrationCredentials::default()
        }
    }

    #[test]
    fn round_trip() {
        let credentials = sample_credentials();
        let encrypted = cipher().encrypt(&credentials).expect("encrypt");
        let decrypted = cipher().decrypt(&encrypted).expect("decrypt");
        assert_eq!(decrypted, credentials);
    }

    #[test]
    fn blob_is_not_plaintext() {
        let encrypted = cipher().encrypt(&sample_credentials()).expect("encrypt");
        assert!(!encrypted.as_str().contains("sk_live_123"));
    }

    #[test]
    fn wrong_key_fails() {
        let encrypted = cipher().encrypt(&sample_credentials()).expect("encrypt");
        let other = XChaCha20CredentialCipher::new([0x43; 32]);
        assert!(matches!(
            other.decrypt(&encrypted),
            Err(CipherError::Decryption { .. })
        ));
    }

    #[test]
    fn tampered_blob_fails() {
        let encrypted = cipher().encrypt(&sample_credentials()).expect("encrypt");
        let mut blob = BASE64.decode(encrypted.as_str()).expect("decode");
        let last = blob.len() - 1;
        blob[last] ^= 0x01;
        let tampered = EncryptedCredentials::new(BASE64.encode(blob));

        assert!(matches!(
            cipher().decrypt(&tampered),
            Err(CipherError::Decryption { .. })
        ));
    }

    #[test]
    fn truncated_blob_fails() {
        let truncated = EncryptedCredentials::new(BASE64.encode([0u8; 16]));
        assert!(matches!(
            cipher().decrypt(&truncated),
            Err(CipherError::Decryption { .. })
        ));
    }

    #[test]
    fn invalid_base64_fails() {
        let bogus = EncryptedCredentials::new("not base64!!!");
        assert!(matches!(
            cipher().decrypt(&bogus),
            Err(CipherError::Encoding { .. })
        ));
    }

    #[test]
    fn different_nonces_produce_different_blobs() {
        let credentials = sample_credentials();
        let first = cipher().encrypt(&credentials).expect("encrypt");
        let second = cipher().encrypt(&credentials).expect("encrypt");
        assert_ne!(first, second);
    }
}
