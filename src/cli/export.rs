//! CLI command for report export
//!
//! Writes the CSV report for the selected readings to disk and records the
//! export in the audit log.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use serde_json::json;

use super::readings::ReadingArgs;
use crate::audit::{AuditEntry, AuditLogger};
use crate::config::{BillingPaths, Settings};
use crate::error::{BillingError, BillingResult};

/// Options for the `export` command
#[derive(Args, Debug, Clone, Default)]
pub struct ExportArgs {
    #[command(flatten)]
    pub filter: ReadingArgs,

    /// Directory to write the report into (defaults to the reports directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Handle the `export` command, returning the path written
pub fn handle_export_command(
    paths: &BillingPaths,
    settings: &Settings,
    args: ExportArgs,
) -> BillingResult<PathBuf> {
    let dashboard = args.filter.load_dashboard(paths, settings)?;
    let document = dashboard.export(settings.date_locale)?;
    let rows = dashboard.visible_rows().len();

    let output_dir = args.output.unwrap_or_else(|| paths.reports_dir());
    let output_path = write_document(&output_dir, &document.file_name, &document.content)?;

    paths.ensure_directories()?;
    AuditLogger::new(paths.audit_log()).log(&AuditEntry::export(
        document.file_name.clone(),
        &json!({
            "period": dashboard.criteria().period_label(),
            "rows": rows,
            "path": output_path.display().to_string(),
        }),
    ))?;

    println!("Exported {} readings to {}", rows, output_path.display());
    Ok(output_path)
}

fn write_document(dir: &Path, file_name: &str, content: &str) -> BillingResult<PathBuf> {
    fs::create_dir_all(dir)
        .map_err(|e| BillingError::Export(format!("Failed to create {}: {}", dir.display(), e)))?;

    let path = dir.join(file_name);
    fs::write(&path, content)
        .map_err(|e| BillingError::Export(format!("Failed to write {}: {}", path.display(), e)))?;

    Ok(path)
}
