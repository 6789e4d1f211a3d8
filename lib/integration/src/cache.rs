//! Cache invalidation contract for derived integration data.
//!
//! The workflow never reads through this cache; it only clears it. Clear
//! failures propagate: a swallowed failure would risk serving stale data
//! after an update.

use crate::error::CacheError;
use async_trait::async_trait;
use cobalt_courier_core::EnvironmentId;

/// Namespaces of derived data kept in the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheNamespace {
    /// Cached integration lookups (e.g. active provider per channel).
    Integration,
    /// Cached environment metadata.
    Environment,
}

impl CacheNamespace {
    /// Returns the key prefix for this namespace.
    #[must_use]
    pub const fn prefix(&self) -> &'static str {
        match self {
            Self::Integration => "integration",
            Self::Environment => "environment",
        }
    }

    /// Builds the full cache key for this namespace under a scope.
    #[must_use]
    pub fn scoped_key(&self, scope: &CacheScope) -> String {
        format!("{}:{}", self.prefix(), scope.environment_id)
    }
}

/// The scope a cache clear applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheScope {
    /// Environment whose cached entries are cleared.
    pub environment_id: EnvironmentId,
}

impl CacheScope {
    /// Scopes a clear to one environment.
    #[must_use]
    pub const fn environment(environment_id: EnvironmentId) -> Self {
        Self { environment_id }
    }
}

/// Invalidates cached derived data.
#[async_trait]
pub trait CacheInvalidator: Send + Sync {
    /// Clears every entry under the given namespaces within the scope.
    async fn clear(
        &self,
        namespaces: &[CacheNamespace],
        scope: &CacheScope,
    ) -> Result<(), CacheError>;
}
