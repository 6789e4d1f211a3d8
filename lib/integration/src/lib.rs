//! Provider integration management.
//!
//! An integration binds a third-party delivery provider to one communication
//! channel within an environment. This crate owns the update workflow:
//! partial updates, optional credential re-verification, credential
//! encryption at rest, cache invalidation, and the single-active-per-channel
//! cascade.

pub mod cache;
pub mod channel;
pub mod cipher;
pub mod deactivate;
pub mod entity;
pub mod error;
pub mod store;
pub mod update;
pub mod verify;

#[cfg(test)]
pub(crate) mod test_support;

pub use cache::{CacheInvalidator, CacheNamespace, CacheScope};
pub use channel::{ChannelType, ParseChannelError};
pub use cipher::{CredentialCipher, XChaCha20CredentialCipher};
pub use deactivate::{DeactivateSiblingsCommand, SiblingDeactivator};
pub use entity::{EncryptedCredentials, Integration, IntegrationCredentials};
pub use error::{CacheError, CipherError, StoreError, UpdateError, VerifierError};
pub use store::{IntegrationChanges, IntegrationStore};
pub use update::{UpdateIntegration, UpdateIntegrationRequest};
pub use verify::{CredentialCheck, CredentialVerifier};
