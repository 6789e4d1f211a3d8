//! PostgreSQL persistence for cobalt-courier.
//!
//! Implements the integration store contract over a connection pool, plus
//! configuration loading and schema migrations.

pub mod config;
pub mod postgres;

pub use config::{StoreConfig, run_migrations};
pub use postgres::PgIntegrationStore;
