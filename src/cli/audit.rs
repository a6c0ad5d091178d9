//! Audit CLI command
//!
//! Prints the most recent audit log entries, oldest first.

use clap::Args;

use crate::audit::AuditLogger;
use crate::config::BillingPaths;
use crate::error::BillingResult;

/// Options for the `audit` command
#[derive(Args, Debug, Clone)]
pub struct AuditArgs {
    /// Number of entries to show
    #[arg(short = 'n', long, default_value = "20")]
    pub limit: usize,
}

/// Format the last `limit` entries, one per line
pub fn format_recent_entries(paths: &BillingPaths, limit: usize) -> BillingResult<String> {
    let entries = AuditLogger::new(paths.audit_log()).read_recent(limit)?;

    if entries.is_empty() {
        return Ok("No audit entries.".to_string());
    }

    Ok(entries
        .iter()
        .map(|entry| entry.format_human_readable())
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Handle the `audit` command
pub fn handle_audit_command(paths: &BillingPaths, args: AuditArgs) -> BillingResult<()> {
    println!("{}", format_recent_entries(paths, args.limit)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{AuditEntry, EntityType};
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_recent_entries_in_order() {
        let temp = TempDir::new().unwrap();
        let paths = BillingPaths::with_base_dir(temp.path().to_path_buf());
        let logger = AuditLogger::new(paths.audit_log());

        logger
            .log(&AuditEntry::create(
                EntityType::Tenant,
                "t-1",
                Some("Somchai".to_string()),
                &json!({}),
            ))
            .unwrap();
        logger
            .log(&AuditEntry::export("report_2024-05.csv", &json!({"rows": 2})))
            .unwrap();

        let output = format_recent_entries(&paths, 1).unwrap();
        assert!(output.contains("EXPORT Report report_2024-05.csv"));
        assert!(!output.contains("Somchai"));

        let output = format_recent_entries(&paths, 5).unwrap();
        assert_eq!(output.lines().count(), 2);
        assert!(output.lines().next().unwrap().contains("CREATE Tenant t-1 (Somchai)"));
    }

    #[test]
    fn test_missing_log() {
        let temp = TempDir::new().unwrap();
        let paths = BillingPaths::with_base_dir(temp.path().to_path_buf());
        assert_eq!(format_recent_entries(&paths, 5).unwrap(), "No audit entries.");
    }
}
