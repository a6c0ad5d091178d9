//! Audit logging for dorm-billing
//!
//! Records tenant creates/deletes made through the data store and every
//! exported report in an append-only JSON-lines log (`audit.log`).

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
