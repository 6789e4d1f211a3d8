//! Core domain types for the cobalt-courier platform.
//!
//! This crate provides the strongly-typed identifiers shared by the
//! integration workflow and store crates.

pub mod id;

pub use id::{EnvironmentId, IntegrationId, OrganizationId, ParseIdError};
