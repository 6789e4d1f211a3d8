//! Error types for the integration crate.
//!
//! Each collaborator seam has its own error type:
//! - `StoreError`: errors from the integration store
//! - `CacheError`: errors from cache invalidation
//! - `VerifierError`: provider credential verification failures
//! - `CipherError`: credential encryption/decryption failures
//! - `UpdateError`: the update workflow's error taxonomy

use cobalt_courier_core::IntegrationId;
use std::fmt;

/// Errors from integration store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A query against the store failed.
    QueryFailed { reason: String },
    /// A stored record could not be converted to a domain value.
    InvalidRecord { reason: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QueryFailed { reason } => {
                write!(f, "store query failed: {reason}")
            }
            Self::InvalidRecord { reason } => {
                write!(f, "invalid store record: {reason}")
            }
        }
    }
}

impl std::error::Error for StoreError {}

/// Errors from cache invalidation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Connection to the cache backend failed.
    ConnectionFailed { reason: String },
    /// The invalidation itself failed.
    ClearFailed { reason: String },
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConnectionFailed { reason } => {
                write!(f, "cache connection failed: {reason}")
            }
            Self::ClearFailed { reason } => {
                write!(f, "cache clear failed: {reason}")
            }
        }
    }
}

impl std::error::Error for CacheError {}

/// Errors from provider credential verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifierError {
    /// The provider rejected the credentials.
    Rejected { provider_id: String, reason: String },
    /// The provider could not be reached to verify.
    ProviderUnreachable { provider_id: String, reason: String },
}

impl fmt::Display for VerifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected {
                provider_id,
                reason,
            } => {
                write!(f, "provider '{provider_id}' rejected credentials: {reason}")
            }
            Self::ProviderUnreachable {
                provider_id,
                reason,
            } => {
                write!(f, "provider '{provider_id}' unreachable: {reason}")
            }
        }
    }
}

impl std::error::Error for VerifierError {}

/// Errors from credential encryption and decryption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CipherError {
    /// Credential serialization failed.
    Serialization { reason: String },
    /// Sealing the plaintext failed.
    Encryption { reason: String },
    /// Opening the blob failed (wrong key, tampering, or truncation).
    Decryption { reason: String },
    /// The stored blob is not valid base64.
    Encoding { reason: String },
}

impl fmt::Display for CipherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Serialization { reason } => {
                write!(f, "credential serialization failed: {reason}")
            }
            Self::Encryption { reason } => {
                write!(f, "credential encryption failed: {reason}")
            }
            Self::Decryption { reason } => {
                write!(f, "credential decryption failed: {reason}")
            }
            Self::Encoding { reason } => {
                write!(f, "credential blob encoding invalid: {reason}")
            }
        }
    }
}

impl std::error::Error for CipherError {}

/// Errors from the integration update workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateError {
    /// No integration with this id exists in the target environment.
    NotFound { integration_id: IntegrationId },
    /// Credential re-verification was requested and did not pass.
    ValidationFailed(VerifierError),
    /// The request named no fields to update.
    NoFieldsToUpdate,
    /// Store error.
    Store(StoreError),
    /// Cache invalidation error.
    Cache(CacheError),
    /// Credential cipher error.
    Cipher(CipherError),
}

impl fmt::Display for UpdateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { integration_id } => {
                write!(f, "integration not found: {integration_id}")
            }
            Self::ValidationFailed(e) => {
                write!(f, "credential verification failed: {e}")
            }
            Self::NoFieldsToUpdate => write!(f, "no fields to update"),
            Self::Store(e) => write!(f, "store error: {e}"),
            Self::Cache(e) => write!(f, "cache error: {e}"),
            Self::Cipher(e) => write!(f, "cipher error: {e}"),
        }
    }
}

impl std::error::Error for UpdateError {}

impl From<StoreError> for UpdateError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

impl From<CacheError> for UpdateError {
    fn from(e: CacheError) -> Self {
        Self::Cache(e)
    }
}

impl From<CipherError> for UpdateError {
    fn from(e: CipherError) -> Self {
        Self::Cipher(e)
    }
}
