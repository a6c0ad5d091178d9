//! Path management for dorm-billing
//!
//! Provides XDG-compliant path resolution for configuration, data snapshots,
//! exported reports, and the audit log.
//!
//! ## Path Resolution Order
//!
//! 1. `DORM_BILLING_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/dorm-billing` or `~/.config/dorm-billing`
//! 3. Windows: `%APPDATA%\dorm-billing`

use std::path::PathBuf;

use crate::error::BillingError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "DORM_BILLING_DATA_DIR";

/// Manages all paths used by dorm-billing
#[derive(Debug, Clone)]
pub struct BillingPaths {
    /// Base directory for all dorm-billing data
    base_dir: PathBuf,
}

impl BillingPaths {
    /// Create a new BillingPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, BillingError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create BillingPaths with a custom base directory
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/dorm-billing/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory holding the store snapshots
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the default directory for exported reports
    pub fn reports_dir(&self) -> PathBuf {
        self.base_dir.join("reports")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to the readings snapshot
    pub fn readings_file(&self) -> PathBuf {
        self.data_dir().join("readings.json")
    }

    /// Get the path to the tenants snapshot
    pub fn tenants_file(&self) -> PathBuf {
        self.data_dir().join("tenants.json")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), BillingError> {
        for dir in [self.base_dir.clone(), self.data_dir(), self.reports_dir()] {
            std::fs::create_dir_all(&dir).map_err(|e| {
                BillingError::Io(format!("Failed to create {}: {}", dir.display(), e))
            })?;
        }

        Ok(())
    }

    /// Check if dorm-billing has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, BillingError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let home = std::env::var("HOME")
                .map_err(|_| BillingError::Config("HOME environment variable not set".into()))?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("dorm-billing"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, BillingError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| BillingError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("dorm-billing"))
}
