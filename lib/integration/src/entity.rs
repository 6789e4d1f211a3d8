//! The integration entity and its credential types.
//!
//! An integration configures a third-party provider for one communication
//! channel within an environment. Credentials are encrypted before they
//! ever reach the store; the plaintext form only lives in requests and in
//! verifier calls.

use crate::channel::ChannelType;
use chrono::{DateTime, Utc};
use cobalt_courier_core::{EnvironmentId, IntegrationId, OrganizationId};
use serde::{Deserialize, Serialize};

/// Plaintext provider credentials, as supplied by a caller.
///
/// Which fields a provider needs varies; absent fields are omitted from the
/// serialized form entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationCredentials {
    /// Provider API key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Provider API secret.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,
    /// Account user name (SMTP and similar).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Account password.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Server host name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// Server port.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Whether to use a TLS connection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secure: Option<bool>,
    /// Sending domain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    /// Provider region.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Display name used as the sender.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_name: Option<String>,
}

impl IntegrationCredentials {
    /// Creates an API-key credential set.
    #[must_use]
    pub fn api_key(key: impl Into<String>) -> Self {
        Self {
            api_key: Some(key.into()),
            ..Self::default()
        }
    }

    /// Creates a user/password credential set for a host.
    #[must_use]
    pub fn basic(
        user: impl Into<String>,
        password: impl Into<String>,
        host: impl Into<String>,
    ) -> Self {
        Self {
            user: Some(user.into()),
            password: Some(password.into()),
            host: Some(host.into()),
            ..Self::default()
        }
    }
}

/// An encrypted credential blob, opaque to everything but the cipher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncryptedCredentials(String);

impl EncryptedCredentials {
    /// Wraps an already-encrypted blob.
    #[must_use]
    pub fn new(blob: impl Into<String>) -> Self {
        Self(blob.into())
    }

    /// Returns the blob text, e.g. for binding to a database column.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A configured connection to a third-party provider for one channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Integration {
    /// Unique identifier.
    pub id: IntegrationId,
    /// Environment this integration belongs to.
    pub environment_id: EnvironmentId,
    /// Organization this integration belongs to.
    pub organization_id: OrganizationId,
    /// Which provider implementation this integration configures.
    pub provider_id: String,
    /// The communication channel the provider delivers to.
    pub channel: ChannelType,
    /// Whether this integration is currently used for delivery.
    pub active: bool,
    /// Provider credentials, encrypted at rest.
    pub credentials: EncryptedCredentials,
    /// When the integration was created.
    pub created_at: DateTime<Utc>,
    /// When the integration was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Integration {
    /// Creates a new, inactive integration.
    #[must_use]
    pub fn new(
        environment_id: EnvironmentId,
        organization_id: OrganizationId,
        provider_id: impl Into<String>,
        channel: ChannelType,
        credentials: EncryptedCredentials,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: IntegrationId::new(),
            environment_id,
            organization_id,
            provider_id: provider_id.into(),
            channel,
            active: false,
            credentials,
            created_at: now,
            updated_at: now,
        }
    }
}
