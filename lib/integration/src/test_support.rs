//! In-memory fakes for exercising the workflow without real backends.

use crate::cache::{CacheInvalidator, CacheNamespace, CacheScope};
use crate::channel::ChannelType;
use crate::entity::Integration;
use crate::error::{CacheError, StoreError, VerifierError};
use crate::store::{IntegrationChanges, IntegrationStore};
use crate::verify::{CredentialCheck, CredentialVerifier};
use async_trait::async_trait;
use cobalt_courier_core::{EnvironmentId, IntegrationId, OrganizationId};
use std::collections::HashMap;
use std::sync::Mutex;

/// Integration store backed by a mutex-guarded map.
///
/// Records every `update` call so tests can assert on the exact change
/// sets the workflow issued.
pub struct InMemoryIntegrationStore {
    records: Mutex<HashMap<IntegrationId, Integration>>,
    updates: Mutex<Vec<(IntegrationId, IntegrationChanges)>>,
}

impl InMemoryIntegrationStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            updates: Mutex::new(Vec::new()),
        }
    }

    /// Seeds a record, bypassing the workflow.
    pub fn insert(&self, integration: Integration) {
        self.records
            .lock()
            .expect("store lock")
            .insert(integration.id, integration);
    }

    /// Reads a record directly, ignoring environment scoping.
    pub fn get(&self, id: IntegrationId) -> Option<Integration> {
        self.records.lock().expect("store lock").get(&id).cloned()
    }

    /// Every `(id, changes)` pair passed to `update`, in call order.
    pub fn updates(&self) -> Vec<(IntegrationId, IntegrationChanges)> {
        self.updates.lock().expect("updates lock").clone()
    }
}

#[async_trait]
impl IntegrationStore for InMemoryIntegrationStore {
    async fn find_by_id(
        &self,
        id: IntegrationId,
        environment_id: EnvironmentId,
    ) -> Result<Option<Integration>, StoreError> {
        Ok(self
            .records
            .lock()
            .expect("store lock")
            .get(&id)
            .filter(|integration| integration.environment_id == environment_id)
            .cloned())
    }

    async fn find_active(
        &self,
        environment_id: EnvironmentId,
        organization_id: OrganizationId,
        channel: ChannelType,
    ) -> Result<Vec<Integration>, StoreError> {
        Ok(self
            .records
            .lock()
            .expect("store lock")
            .values()
            .filter(|integration| {
                integration.environment_id == environment_id
                    && integration.organization_id == organization_id
                    && integration.channel == channel
                    && integration.active
            })
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        id: IntegrationId,
        environment_id: EnvironmentId,
        changes: &IntegrationChanges,
    ) -> Result<(), StoreError> {
        self.updates
            .lock()
            .expect("updates lock")
            .push((id, changes.clone()));

        let mut records = self.records.lock().expect("store lock");
        if let Some(integration) = records
            .get_mut(&id)
            .filter(|integration| integration.environment_id == environment_id)
        {
            changes.apply_to(integration);
        }
        Ok(())
    }
}

/// Cache invalidator that records every clear instead of clearing anything.
pub struct RecordingCacheInvalidator {
    clears: Mutex<Vec<(Vec<CacheNamespace>, EnvironmentId)>>,
}

impl RecordingCacheInvalidator {
    pub fn new() -> Self {
        Self {
            clears: Mutex::new(Vec::new()),
        }
    }

    /// Every `(namespaces, environment)` pair passed to `clear`.
    pub fn clears(&self) -> Vec<(Vec<CacheNamespace>, EnvironmentId)> {
        self.clears.lock().expect("clears lock").clone()
    }
}

#[async_trait]
impl CacheInvalidator for RecordingCacheInvalidator {
    async fn clear(
        &self,
        namespaces: &[CacheNamespace],
        scope: &CacheScope,
    ) -> Result<(), CacheError> {
        self.clears
            .lock()
            .expect("clears lock")
            .push((namespaces.to_vec(), scope.environment_id));
        Ok(())
    }
}

/// Verifier that records every check and returns a fixed outcome.
pub struct StubCredentialVerifier {
    outcome: Result<(), VerifierError>,
    checks: Mutex<Vec<CredentialCheck>>,
}

impl StubCredentialVerifier {
    /// Accepts every credential set.
    pub fn ok() -> Self {
        Self {
            outcome: Ok(()),
            checks: Mutex::new(Vec::new()),
        }
    }

    /// Rejects every credential set with the given error.
    pub fn failing(error: VerifierError) -> Self {
        Self {
            outcome: Err(error),
            checks: Mutex::new(Vec::new()),
        }
    }

    /// Every check the workflow submitted.
    pub fn checks(&self) -> Vec<CredentialCheck> {
        self.checks.lock().expect("checks lock").clone()
    }
}

#[async_trait]
impl CredentialVerifier for StubCredentialVerifier {
    async fn verify(&self, check: &CredentialCheck) -> Result<(), VerifierError> {
        self.checks.lock().expect("checks lock").push(check.clone());
        self.outcome.clone()
    }
}
