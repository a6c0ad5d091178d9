//! Tenant CLI commands
//!
//! Implements CLI commands for tenant management.

use clap::Subcommand;

use crate::audit::AuditLogger;
use crate::config::BillingPaths;
use crate::display::format_tenant_list;
use crate::error::{BillingError, BillingResult};
use crate::models::{NewTenant, TenantId};
use crate::services::TenantDirectory;
use crate::sources::JsonFileSource;

/// Tenant subcommands
#[derive(Subcommand, Debug)]
pub enum TenantCommands {
    /// List tenants
    List {
        /// Search by room number, student ID, or name
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Add a tenant
    Add {
        /// Room number
        #[arg(short, long)]
        room: String,
        /// Full name
        #[arg(short, long)]
        name: String,
        /// Student ID
        #[arg(long)]
        student_id: Option<String>,
    },
    /// Delete a tenant
    Delete {
        /// Tenant ID
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a tenant command
pub fn handle_tenant_command(paths: &BillingPaths, cmd: TenantCommands) -> BillingResult<()> {
    let source = JsonFileSource::from_paths(paths);
    let audit = AuditLogger::new(paths.audit_log());
    let mut directory = TenantDirectory::new(&source).with_audit(&audit);

    match cmd {
        TenantCommands::List { search } => {
            let tenants = directory.refresh(search.as_deref())?;
            println!("{}", format_tenant_list(tenants));
            if !tenants.is_empty() {
                println!("\nTotal: {} tenants", tenants.len());
            }
        }

        TenantCommands::Add {
            room,
            name,
            student_id,
        } => {
            directory.refresh(None)?;
            let new = NewTenant::new(room, student_id.unwrap_or_default(), name);
            let tenant = directory.add(&new)?;
            println!(
                "Added tenant: {} (room {}, ID {})",
                tenant.name, tenant.room_number, tenant.id
            );
        }

        TenantCommands::Delete { id, force } => {
            let id: TenantId = id.parse().map_err(BillingError::Validation)?;

            directory.refresh(None)?;
            let tenant = directory
                .find(&id)
                .cloned()
                .ok_or_else(|| BillingError::tenant_not_found(id.to_string()))?;

            if !force {
                println!(
                    "About to delete tenant: {} (room {})",
                    tenant.name, tenant.room_number
                );
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            directory.delete(&id)?;
            println!("Deleted tenant: {}", tenant.name);
        }
    }

    Ok(())
}
