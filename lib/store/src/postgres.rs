//! PostgreSQL-backed integration store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use cobalt_courier_core::{EnvironmentId, IntegrationId, OrganizationId};
use cobalt_courier_integration::channel::ChannelType;
use cobalt_courier_integration::entity::{EncryptedCredentials, Integration};
use cobalt_courier_integration::error::StoreError;
use cobalt_courier_integration::store::{IntegrationChanges, IntegrationStore};
use sqlx::{FromRow, PgPool};
use std::str::FromStr;

/// Row type for integration queries.
#[derive(FromRow)]
struct IntegrationRow {
    id: String,
    environment_id: String,
    organization_id: String,
    provider_id: String,
    channel: String,
    active: bool,
    credentials: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl IntegrationRow {
    fn try_into_integration(self) -> Result<Integration, StoreError> {
        let id = IntegrationId::from_str(&self.id).map_err(|e| StoreError::InvalidRecord {
            reason: format!("invalid integration id '{}': {}", self.id, e),
        })?;
        let environment_id =
            EnvironmentId::from_str(&self.environment_id).map_err(|e| StoreError::InvalidRecord {
                reason: format!("invalid environment id '{}': {}", self.environment_id, e),
            })?;
        let organization_id = OrganizationId::from_str(&self.organization_id).map_err(|e| {
            StoreError::InvalidRecord {
                reason: format!("invalid organization id '{}': {}", self.organization_id, e),
            }
        })?;
        let channel = ChannelType::from_str(&self.channel).map_err(|e| StoreError::InvalidRecord {
            reason: e.to_string(),
        })?;

        Ok(Integration {
            id,
            environment_id,
            organization_id,
            provider_id: self.provider_id,
            channel,
            active: self.active,
            credentials: EncryptedCredentials::new(self.credentials),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn query_failed(e: sqlx::Error) -> StoreError {
    StoreError::QueryFailed {
        reason: e.to_string(),
    }
}

/// Integration store backed by a PostgreSQL pool.
pub struct PgIntegrationStore {
    pool: PgPool,
}

impl PgIntegrationStore {
    /// Creates a store over the given pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IntegrationStore for PgIntegrationStore {
    async fn find_by_id(
        &self,
        id: IntegrationId,
        environment_id: EnvironmentId,
    ) -> Result<Option<Integration>, StoreError> {
        let row: Option<IntegrationRow> = sqlx::query_as(
            r#"
            SELECT id, environment_id, organization_id, provider_id, channel,
                   active, credentials, created_at, updated_at
            FROM integrations
            WHERE id = $1 AND environment_id = $2
            "#,
        )
        .bind(id.to_string())
        .bind(environment_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(query_failed)?;

        match row {
            Some(r) => Ok(Some(r.try_into_integration()?)),
            None => Ok(None),
        }
    }

    async fn find_active(
        &self,
        environment_id: EnvironmentId,
        organization_id: OrganizationId,
        channel: ChannelType,
    ) -> Result<Vec<Integration>, StoreError> {
        let rows: Vec<IntegrationRow> = sqlx::query_as(
            r#"
            SELECT id, environment_id, organization_id, provider_id, channel,
                   active, credentials, created_at, updated_at
            FROM integrations
            WHERE environment_id = $1 AND organization_id = $2
              AND channel = $3 AND active = TRUE
            ORDER BY created_at ASC
            "#,
        )
        .bind(environment_id.to_string())
        .bind(organization_id.to_string())
        .bind(channel.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(query_failed)?;

        rows.into_iter().map(|r| r.try_into_integration()).collect()
    }

    async fn update(
        &self,
        id: IntegrationId,
        environment_id: EnvironmentId,
        changes: &IntegrationChanges,
    ) -> Result<(), StoreError> {
        // COALESCE keeps the stored value for fields the change set omits,
        // so this stays a targeted partial write.
        sqlx::query(
            r#"
            UPDATE integrations
            SET active = COALESCE($3, active),
                credentials = COALESCE($4, credentials),
                updated_at = $5
            WHERE id = $1 AND environment_id = $2
            "#,
        )
        .bind(id.to_string())
        .bind(environment_id.to_string())
        .bind(changes.active)
        .bind(changes.credentials.as_ref().map(EncryptedCredentials::as_str))
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(query_failed)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(channel: &str) -> IntegrationRow {
        let now = Utc::now();
        IntegrationRow {
            id: IntegrationId::new().to_string(),
            environment_id: EnvironmentId::new().to_string(),
            organization_id: OrganizationId::new().to_string(),
            provider_id: "sendgrid".to_string(),
            channel: channel.to_string(),
            active: true,
            credentials: "AQIDBA==".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn row_converts_to_integration() {
        let row = row("email");
        let expected_id = row.id.clone();

        let integration = row.try_into_integration().expect("conversion");
        assert_eq!(integration.id.to_string(), expected_id);
        assert_eq!(integration.channel, ChannelType::Email);
        assert!(integration.active);
        assert_eq!(integration.credentials.as_str(), "AQIDBA==");
    }

    #[test]
    fn row_with_bad_id_is_invalid() {
        let mut row = row("email");
        row.id = "not an id".to_string();

        let err = row.try_into_integration().unwrap_err();
        assert!(matches!(err, StoreError::InvalidRecord { .. }));
        assert!(err.to_string().contains("not an id"));
    }

    #[test]
    fn row_with_unknown_channel_is_invalid() {
        let row = row("carrier_pigeon");

        let err = row.try_into_integration().unwrap_err();
        assert!(matches!(err, StoreError::InvalidRecord { .. }));
        assert!(err.to_string().contains("carrier_pigeon"));
    }
}
