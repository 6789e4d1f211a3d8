//! The integration update workflow.
//!
//! Step order is load-bearing:
//! 1. Existence check, scoped to the target environment
//! 2. Unconditional cache invalidation, before any write
//! 3. Optional credential re-verification against the provider
//! 4. Partial update set construction (absence means "leave alone")
//! 5. Targeted persist
//! 6. Cascade deactivation of channel siblings when activating
//! 7. Re-fetch of the authoritative post-update state
//!
//! Invalidating before the write means a failure partway through leaves a
//! cold cache rather than a stale one.

use crate::cache::{CacheInvalidator, CacheNamespace, CacheScope};
use crate::cipher::CredentialCipher;
use crate::deactivate::{DeactivateSiblingsCommand, SiblingDeactivator};
use crate::entity::{Integration, IntegrationCredentials};
use crate::error::UpdateError;
use crate::store::{IntegrationChanges, IntegrationStore};
use crate::verify::{CredentialCheck, CredentialVerifier};
use cobalt_courier_core::{EnvironmentId, IntegrationId, OrganizationId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// A caller-supplied partial update for one integration.
///
/// Optional fields distinguish "not requested" from any requested value;
/// `active: Some(false)` is an explicit deactivation, not an omission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateIntegrationRequest {
    /// Target integration.
    pub integration_id: IntegrationId,
    /// Environment the target must belong to.
    pub environment_id: EnvironmentId,
    /// Organization the target belongs to.
    pub organization_id: OrganizationId,
    /// New active flag, when requested.
    #[serde(default)]
    pub active: Option<bool>,
    /// New plaintext credentials, when requested.
    #[serde(default)]
    pub credentials: Option<IntegrationCredentials>,
    /// Whether to re-verify credentials with the provider before persisting.
    #[serde(default)]
    pub check_credentials: bool,
}

/// The integration update workflow.
///
/// Holds its collaborators explicitly; construct one per wiring, call
/// [`execute`](Self::execute) per request.
pub struct UpdateIntegration {
    store: Arc<dyn IntegrationStore>,
    cache: Arc<dyn CacheInvalidator>,
    verifier: Arc<dyn CredentialVerifier>,
    cipher: Arc<dyn CredentialCipher>,
    deactivator: SiblingDeactivator,
}

impl UpdateIntegration {
    /// Creates the workflow over its collaborators.
    #[must_use]
    pub fn new(
        store: Arc<dyn IntegrationStore>,
        cache: Arc<dyn CacheInvalidator>,
        verifier: Arc<dyn CredentialVerifier>,
        cipher: Arc<dyn CredentialCipher>,
        deactivator: SiblingDeactivator,
    ) -> Self {
        Self {
            store,
            cache,
            verifier,
            cipher,
            deactivator,
        }
    }

    /// Applies a partial update and returns the post-update integration.
    ///
    /// # Errors
    ///
    /// - [`UpdateError::NotFound`] when `(integration_id, environment_id)`
    ///   matches nothing
    /// - [`UpdateError::ValidationFailed`] when requested re-verification
    ///   does not pass; nothing is persisted
    /// - [`UpdateError::NoFieldsToUpdate`] when the request names no field
    /// - [`UpdateError::Store`] / [`UpdateError::Cache`] /
    ///   [`UpdateError::Cipher`] for dependency failures, unmodified
    pub async fn execute(
        &self,
        request: UpdateIntegrationRequest,
    ) -> Result<Integration, UpdateError> {
        debug!(
            integration_id = %request.integration_id,
            environment_id = %request.environment_id,
            "updating integration"
        );

        let existing = self
            .store
            .find_by_id(request.integration_id, request.environment_id)
            .await?
            .ok_or(UpdateError::NotFound {
                integration_id: request.integration_id,
            })?;

        // Cleared before the write, and before the empty-set check below:
        // any attempted change must leave the cache cold, never stale.
        self.cache
            .clear(
                &[CacheNamespace::Integration],
                &CacheScope::environment(request.environment_id),
            )
            .await?;

        if request.check_credentials {
            let check = CredentialCheck {
                provider_id: existing.provider_id.clone(),
                channel: existing.channel,
                credentials: request.credentials.clone().unwrap_or_default(),
            };
            self.verifier
                .verify(&check)
                .await
                .map_err(UpdateError::ValidationFailed)?;
        }

        let mut changes = IntegrationChanges::default();
        if let Some(active) = request.active {
            changes.active = Some(active);
        }
        if let Some(ref credentials) = request.credentials {
            changes.credentials = Some(self.cipher.encrypt(credentials)?);
        }
        if changes.is_empty() {
            return Err(UpdateError::NoFieldsToUpdate);
        }

        self.store
            .update(request.integration_id, request.environment_id, &changes)
            .await?;

        if request.active == Some(true) && !existing.channel.allows_concurrent_active() {
            self.deactivator
                .execute(&DeactivateSiblingsCommand {
                    environment_id: request.environment_id,
                    organization_id: request.organization_id,
                    channel: existing.channel,
                    keep: request.integration_id,
                })
                .await?;
        }

        self.store
            .find_by_id(request.integration_id, request.environment_id)
            .await?
            .ok_or(UpdateError::NotFound {
                integration_id: request.integration_id,
            })
    }
}
