//! File-backed data store
//!
//! Serves readings from a JSON array (or headed CSV) snapshot and keeps
//! tenants in a JSON file, applying the same duplicate rule the remote store
//! enforces. Mutations are written atomically.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::file_io::{read_csv, read_json, write_json_atomic};
use super::{ReadingSource, TenantSource};
use crate::config::paths::BillingPaths;
use crate::error::{BillingError, BillingResult};
use crate::models::{MeterReading, NewTenant, Tenant, TenantId};

/// Data store backed by snapshot files on disk
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    readings_path: PathBuf,
    tenants_path: PathBuf,
}

impl JsonFileSource {
    /// Create a source over explicit snapshot paths
    pub fn new(readings_path: PathBuf, tenants_path: PathBuf) -> Self {
        Self {
            readings_path,
            tenants_path,
        }
    }

    /// Create a source over the standard data directory
    pub fn from_paths(paths: &BillingPaths) -> Self {
        Self::new(paths.readings_file(), paths.tenants_file())
    }

    /// Replace the readings snapshot path (e.g. an ad-hoc CSV export)
    pub fn with_readings_path(mut self, path: PathBuf) -> Self {
        self.readings_path = path;
        self
    }

    pub fn readings_path(&self) -> &Path {
        &self.readings_path
    }

    fn is_csv(&self) -> bool {
        self.readings_path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
    }

    fn load_tenants(&self) -> BillingResult<Vec<Tenant>> {
        read_json(&self.tenants_path)
    }
}

impl ReadingSource for JsonFileSource {
    fn fetch_readings(&self) -> BillingResult<Vec<MeterReading>> {
        let readings: Vec<MeterReading> = if self.is_csv() {
            read_csv(&self.readings_path)
        } else {
            read_json(&self.readings_path)
        }
        .map_err(|e| BillingError::collaborator("Fetch readings", e))?;

        debug!(
            path = %self.readings_path.display(),
            count = readings.len(),
            "loaded readings snapshot"
        );
        Ok(readings)
    }
}

impl TenantSource for JsonFileSource {
    fn list_tenants(&self, search: Option<&str>) -> BillingResult<Vec<Tenant>> {
        let tenants = self
            .load_tenants()
            .map_err(|e| BillingError::collaborator("Fetch tenants", e))?;

        Ok(match search.filter(|q| !q.is_empty()) {
            Some(query) => tenants.into_iter().filter(|t| t.matches(query)).collect(),
            None => tenants,
        })
    }

    fn add_tenant(&self, new: &NewTenant) -> BillingResult<Tenant> {
        let mut tenants = self
            .load_tenants()
            .map_err(|e| BillingError::collaborator("Add tenant", e))?;

        if let Some(existing) = tenants.iter().find(|t| is_duplicate(t, new)) {
            return Err(BillingError::duplicate_tenant(format!(
                "{} (room {})",
                existing.name, existing.room_number
            )));
        }

        let tenant = Tenant {
            id: TenantId::new(),
            room_number: new.room_number.clone(),
            student_id: new.student_id.clone(),
            name: new.name.clone(),
        };
        tenants.push(tenant.clone());

        write_json_atomic(&self.tenants_path, &tenants)
            .map_err(|e| BillingError::collaborator("Add tenant", e))?;

        info!(tenant_id = %tenant.id, room = %tenant.room_number, "tenant added");
        Ok(tenant)
    }

    fn delete_tenant(&self, id: &TenantId) -> BillingResult<()> {
        let mut tenants = self
            .load_tenants()
            .map_err(|e| BillingError::collaborator("Delete tenant", e))?;

        let before = tenants.len();
        tenants.retain(|t| &t.id != id);
        if tenants.len() == before {
            return Err(BillingError::tenant_not_found(id.to_string()));
        }

        write_json_atomic(&self.tenants_path, &tenants)
            .map_err(|e| BillingError::collaborator("Delete tenant", e))?;

        info!(tenant_id = %id, "tenant deleted");
        Ok(())
    }
}

/// Same student, or same name in the same room
fn is_duplicate(existing: &Tenant, new: &NewTenant) -> bool {
    let same_student =
        !new.student_id.is_empty() && existing.student_id.eq_ignore_ascii_case(&new.student_id);
    let same_occupant = existing.room_number.eq_ignore_ascii_case(&new.room_number)
        && existing.name.to_lowercase() == new.name.to_lowercase();
    same_student || same_occupant
}
