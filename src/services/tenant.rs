//! Tenant directory
//!
//! Keeps an in-memory snapshot of the tenant list served by a
//! [`TenantSource`]. Adds and deletes go through the source and are followed
//! by a fresh fetch; a failed call leaves the snapshot exactly as it was.

use tracing::{debug, warn};

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::error::{BillingError, BillingResult};
use crate::models::{NewTenant, Tenant, TenantId};
use crate::sources::TenantSource;

/// Service for tenant management
pub struct TenantDirectory<'a> {
    source: &'a dyn TenantSource,
    audit: Option<&'a AuditLogger>,
    search: Option<String>,
    tenants: Vec<Tenant>,
}

impl<'a> TenantDirectory<'a> {
    /// Create a directory over a tenant source, with an empty snapshot
    pub fn new(source: &'a dyn TenantSource) -> Self {
        Self {
            source,
            audit: None,
            search: None,
            tenants: Vec::new(),
        }
    }

    /// Record successful mutations in the audit log
    pub fn with_audit(mut self, audit: &'a AuditLogger) -> Self {
        self.audit = Some(audit);
        self
    }

    /// The current snapshot
    pub fn tenants(&self) -> &[Tenant] {
        &self.tenants
    }

    /// The search string used by the last successful refresh
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Re-fetch the tenant list, passing `search` to the source verbatim
    pub fn refresh(&mut self, search: Option<&str>) -> BillingResult<&[Tenant]> {
        let tenants = self.source.list_tenants(search).inspect_err(|e| {
            warn!(error = %e, "tenant refresh failed, keeping previous list");
        })?;

        debug!(count = tenants.len(), "tenant list refreshed");
        self.tenants = tenants;
        self.search = search.map(str::to_string);
        Ok(&self.tenants)
    }

    /// Validate and add a tenant, then reload the list
    pub fn add(&mut self, new: &NewTenant) -> BillingResult<Tenant> {
        let new = new.normalized();
        new.validate()
            .map_err(|e| BillingError::Validation(e.to_string()))?;

        let tenant = self.source.add_tenant(&new)?;

        if let Some(audit) = self.audit {
            audit.log(&AuditEntry::create(
                EntityType::Tenant,
                tenant.id.to_string(),
                Some(tenant.name.clone()),
                &tenant,
            ))?;
        }

        let search = self.search.clone();
        self.refresh(search.as_deref())?;
        Ok(tenant)
    }

    /// Delete a tenant by ID, then reload the list
    pub fn delete(&mut self, id: &TenantId) -> BillingResult<()> {
        let existing = self.tenants.iter().find(|t| &t.id == id).cloned();

        self.source.delete_tenant(id)?;

        if let Some(audit) = self.audit {
            let name = existing.as_ref().map(|t| t.name.clone());
            audit.log(&AuditEntry::delete(
                EntityType::Tenant,
                id.to_string(),
                name,
                &existing,
            ))?;
        }

        let search = self.search.clone();
        self.refresh(search.as_deref())?;
        Ok(())
    }

    /// Look up a tenant in the snapshot by ID
    pub fn find(&self, id: &TenantId) -> Option<&Tenant> {
        self.tenants.iter().find(|t| &t.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::sources::JsonFileSource;
    use std::cell::{Cell, RefCell};
    use tempfile::TempDir;

    /// In-memory store that can be told to fail every call
    #[derive(Default)]
    struct FlakyStore {
        tenants: RefCell<Vec<Tenant>>,
        failing: Cell<bool>,
        last_search: RefCell<Option<String>>,
    }

    impl FlakyStore {
        fn check(&self, op: &'static str) -> BillingResult<()> {
            if self.failing.get() {
                Err(BillingError::collaborator(op, "connection refused"))
            } else {
                Ok(())
            }
        }
    }

    impl TenantSource for FlakyStore {
        fn list_tenants(&self, search: Option<&str>) -> BillingResult<Vec<Tenant>> {
            self.check("Fetch tenants")?;
            *self.last_search.borrow_mut() = search.map(str::to_string);
            Ok(self
                .tenants
                .borrow()
                .iter()
                .filter(|t| search.map_or(true, |q| t.matches(q)))
                .cloned()
                .collect())
        }

        fn add_tenant(&self, new: &NewTenant) -> BillingResult<Tenant> {
            self.check("Add tenant")?;
            let tenant = Tenant {
                id: TenantId::new(),
                room_number: new.room_number.clone(),
                student_id: new.student_id.clone(),
                name: new.name.clone(),
            };
            self.tenants.borrow_mut().push(tenant.clone());
            Ok(tenant)
        }

        fn delete_tenant(&self, id: &TenantId) -> BillingResult<()> {
            self.check("Delete tenant")?;
            self.tenants.borrow_mut().retain(|t| &t.id != id);
            Ok(())
        }
    }

    #[test]
    fn test_add_then_refetch() {
        let store = FlakyStore::default();
        let mut directory = TenantDirectory::new(&store);

        let tenant = directory
            .add(&NewTenant::new(" 101 ", "6501", " Somchai "))
            .unwrap();

        assert_eq!(tenant.name, "Somchai");
        assert_eq!(tenant.room_number, "101");
        assert_eq!(directory.tenants().len(), 1);
        assert_eq!(directory.find(&tenant.id), Some(&tenant));
    }

    #[test]
    fn test_add_rejects_missing_fields_before_calling_store() {
        let store = FlakyStore::default();
        store.failing.set(true);
        let mut directory = TenantDirectory::new(&store);

        let err = directory.add(&NewTenant::new("101", "", "  ")).unwrap_err();
        assert!(err.is_validation_notice());
        assert!(!err.is_collaborator_failure());
    }

    #[test]
    fn test_search_passed_through_verbatim() {
        let store = FlakyStore::default();
        let mut directory = TenantDirectory::new(&store);
        directory.add(&NewTenant::new("101", "6501", "Somchai")).unwrap();
        directory.add(&NewTenant::new("202", "6502", "Suda")).unwrap();

        let found = directory.refresh(Some("SUDA")).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(store.last_search.borrow().as_deref(), Some("SUDA"));
        assert_eq!(directory.search(), Some("SUDA"));
    }

    #[test]
    fn test_failure_leaves_snapshot_untouched() {
        let store = FlakyStore::default();
        let mut directory = TenantDirectory::new(&store);
        let tenant = directory.add(&NewTenant::new("101", "6501", "Somchai")).unwrap();
        let before = directory.tenants().to_vec();

        store.failing.set(true);
        assert!(directory.refresh(None).unwrap_err().is_collaborator_failure());
        assert!(directory
            .add(&NewTenant::new("202", "", "Suda"))
            .unwrap_err()
            .is_collaborator_failure());
        assert!(directory.delete(&tenant.id).unwrap_err().is_collaborator_failure());

        assert_eq!(directory.tenants(), before.as_slice());
    }

    #[test]
    fn test_delete_refetches() {
        let store = FlakyStore::default();
        let mut directory = TenantDirectory::new(&store);
        let tenant = directory.add(&NewTenant::new("101", "6501", "Somchai")).unwrap();

        directory.delete(&tenant.id).unwrap();
        assert!(directory.tenants().is_empty());
    }

    #[test]
    fn test_mutations_are_audited() {
        let temp = TempDir::new().unwrap();
        let source = JsonFileSource::new(
            temp.path().join("readings.json"),
            temp.path().join("tenants.json"),
        );
        let audit = AuditLogger::new(temp.path().join("audit.log"));
        let mut directory = TenantDirectory::new(&source).with_audit(&audit);

        let tenant = directory.add(&NewTenant::new("101", "6501", "Somchai")).unwrap();
        directory.delete(&tenant.id).unwrap();

        let entries = audit.read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].operation, Operation::Create);
        assert_eq!(entries[1].operation, Operation::Delete);
        assert_eq!(entries[1].entity_name.as_deref(), Some("Somchai"));
    }

    #[test]
    fn test_duplicate_from_store_is_a_notice() {
        let temp = TempDir::new().unwrap();
        let source = JsonFileSource::new(
            temp.path().join("readings.json"),
            temp.path().join("tenants.json"),
        );
        let mut directory = TenantDirectory::new(&source);

        directory.add(&NewTenant::new("101", "6501", "Somchai")).unwrap();
        let err = directory
            .add(&NewTenant::new("101", "", "somchai"))
            .unwrap_err();
        assert!(matches!(err, BillingError::Duplicate { .. }));
        assert_eq!(directory.tenants().len(), 1);
    }
}
