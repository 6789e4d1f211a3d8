//! Store contract for integration records.
//!
//! The store owns the persistent state. The workflow never replaces whole
//! records: writes go through [`IntegrationChanges`], a partial field set,
//! so concurrent writers touching disjoint fields do not clobber each other.

use crate::channel::ChannelType;
use crate::entity::{EncryptedCredentials, Integration};
use crate::error::StoreError;
use async_trait::async_trait;
use chrono::Utc;
use cobalt_courier_core::{EnvironmentId, IntegrationId, OrganizationId};

/// A partial update to a single integration.
///
/// `None` means "leave the field as it is"; `Some` means "replace it",
/// including `Some(false)` for deactivation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrationChanges {
    /// New active flag, if requested.
    pub active: Option<bool>,
    /// New encrypted credentials, if requested.
    pub credentials: Option<EncryptedCredentials>,
}

impl IntegrationChanges {
    /// True when no field would change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_none() && self.credentials.is_none()
    }

    /// The change set used by cascade deactivation.
    #[must_use]
    pub fn deactivate() -> Self {
        Self {
            active: Some(false),
            credentials: None,
        }
    }

    /// Applies this change set to an in-memory record, bumping `updated_at`.
    pub fn apply_to(&self, integration: &mut Integration) {
        if let Some(active) = self.active {
            integration.active = active;
        }
        if let Some(ref credentials) = self.credentials {
            integration.credentials = credentials.clone();
        }
        integration.updated_at = Utc::now();
    }
}

/// Persistent storage for integration records.
///
/// Every operation is scoped: lookups carry the environment so that tenant
/// isolation is enforced by the query itself, not by callers filtering.
#[async_trait]
pub trait IntegrationStore: Send + Sync {
    /// Fetches one integration by id within an environment.
    async fn find_by_id(
        &self,
        id: IntegrationId,
        environment_id: EnvironmentId,
    ) -> Result<Option<Integration>, StoreError>;

    /// Fetches all active integrations for a channel within an environment.
    async fn find_active(
        &self,
        environment_id: EnvironmentId,
        organization_id: OrganizationId,
        channel: ChannelType,
    ) -> Result<Vec<Integration>, StoreError>;

    /// Applies a partial update to the integration matching
    /// `(id, environment_id)`. Fields absent from `changes` keep their
    /// stored value.
    async fn update(
        &self,
        id: IntegrationId,
        environment_id: EnvironmentId,
        changes: &IntegrationChanges,
    ) -> Result<(), StoreError>;
}
