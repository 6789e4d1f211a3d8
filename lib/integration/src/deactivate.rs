//! Cascade deactivation of sibling integrations.
//!
//! Activating an integration on a single-active channel must switch off
//! every other active integration sharing that channel and environment.
//! This component only mutates data; cache invalidation stays with the
//! update workflow.

use crate::channel::ChannelType;
use crate::store::{IntegrationChanges, IntegrationStore};
use crate::error::StoreError;
use cobalt_courier_core::{EnvironmentId, IntegrationId, OrganizationId};
use std::sync::Arc;
use tracing::debug;

/// Scope of a cascade deactivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeactivateSiblingsCommand {
    /// Environment the cascade runs in.
    pub environment_id: EnvironmentId,
    /// Organization the cascade runs in.
    pub organization_id: OrganizationId,
    /// Channel whose siblings are deactivated.
    pub channel: ChannelType,
    /// The one integration left untouched.
    pub keep: IntegrationId,
}

/// Deactivates every active integration on a channel except one.
pub struct SiblingDeactivator {
    store: Arc<dyn IntegrationStore>,
}

impl SiblingDeactivator {
    /// Creates a deactivator over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn IntegrationStore>) -> Self {
        Self { store }
    }

    /// Runs the cascade and returns how many integrations were deactivated.
    ///
    /// Idempotent: a second run with no intervening activation finds no
    /// active siblings and returns 0.
    pub async fn execute(&self, command: &DeactivateSiblingsCommand) -> Result<u64, StoreError> {
        let siblings = self
            .store
            .find_active(
                command.environment_id,
                command.organization_id,
                command.channel,
            )
            .await?;

        let mut deactivated = 0u64;
        for sibling in siblings {
            if sibling.id == command.keep {
                continue;
            }
            self.store
                .update(
                    sibling.id,
                    command.environment_id,
                    &IntegrationChanges::deactivate(),
                )
                .await?;
            deactivated += 1;
        }

        if deactivated > 0 {
            debug!(
                channel = %command.channel,
                environment_id = %command.environment_id,
                deactivated,
                "deactivated sibling integrations"
            );
        }

        Ok(deactivated)
    }
}
