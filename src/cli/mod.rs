//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod export;
pub mod readings;
pub mod tenant;

pub use audit::{handle_audit_command, AuditArgs};
pub use export::{handle_export_command, ExportArgs};
pub use readings::{handle_readings_command, ReadingArgs};
pub use tenant::{handle_tenant_command, TenantCommands};
