//! Data-store collaborators
//!
//! The remote data store owns readings and tenants. This module defines the
//! boundary the billing engine talks to, plus a file-backed implementation
//! that works over exported JSON (or CSV) snapshots.
//!
//! Every fetch is a fresh, complete snapshot: nothing here caches, paginates
//! or retries. Failures surface as [`BillingError::Collaborator`].
//!
//! [`BillingError::Collaborator`]: crate::error::BillingError::Collaborator

pub mod file;
pub mod file_io;

pub use file::JsonFileSource;

use crate::error::BillingResult;
use crate::models::{MeterReading, NewTenant, Tenant, TenantId};

/// Yields the current full collection of meter readings
pub trait ReadingSource {
    fn fetch_readings(&self) -> BillingResult<Vec<MeterReading>>;
}

/// Lists and mutates tenants in the data store
pub trait TenantSource {
    /// List tenants, optionally filtered by the store's own search
    fn list_tenants(&self, search: Option<&str>) -> BillingResult<Vec<Tenant>>;

    /// Create a tenant, returning it with its store-issued ID
    fn add_tenant(&self, tenant: &NewTenant) -> BillingResult<Tenant>;

    /// Remove a tenant by ID
    fn delete_tenant(&self, id: &TenantId) -> BillingResult<()>;
}
