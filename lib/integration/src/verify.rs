//! Provider credential verification contract.

use crate::channel::ChannelType;
use crate::entity::IntegrationCredentials;
use crate::error::VerifierError;
use async_trait::async_trait;

/// What the verifier needs to confirm a credential set is usable.
///
/// `provider_id` and `channel` come from the stored integration; the
/// credentials are the caller-supplied plaintext that has not been
/// persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialCheck {
    /// Provider implementation to verify against.
    pub provider_id: String,
    /// Channel the provider delivers to.
    pub channel: ChannelType,
    /// Credentials to verify.
    pub credentials: IntegrationCredentials,
}

/// Confirms provider credentials are usable.
///
/// Treated as a black box: any error means the credentials must not be
/// persisted, and the cause is kept for diagnostics.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Verifies the credentials described by `check`.
    async fn verify(&self, check: &CredentialCheck) -> Result<(), VerifierError>;
}
