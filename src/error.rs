//! Custom error types for dorm-billing
//!
//! This module defines the error hierarchy for the library using thiserror
//! for ergonomic error definitions. Anomalous meter usage is deliberately not
//! part of this hierarchy: it travels on the billed row as data.

use thiserror::Error;

/// The main error type for dorm-billing operations
#[derive(Error, Debug)]
pub enum BillingError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// CSV snapshot parsing errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// User input that failed validation (e.g. missing tenant fields)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Export requested for a filter that selects no readings
    #[error("No readings to export for {period}")]
    EmptyExport { period: String },

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// A fetch/add/delete against the remote data store failed
    #[error("{operation} failed: {message}")]
    Collaborator {
        operation: &'static str,
        message: String,
    },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl BillingError {
    /// Create a "not found" error for tenants
    pub fn tenant_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Tenant",
            identifier: identifier.into(),
        }
    }

    /// Create a duplicate error for tenants
    pub fn duplicate_tenant(identifier: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type: "Tenant",
            identifier: identifier.into(),
        }
    }

    /// Wrap a failure raised by the remote data store
    pub fn collaborator(operation: &'static str, source: impl std::fmt::Display) -> Self {
        Self::Collaborator {
            operation,
            message: source.to_string(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a dismissible, user-facing notice
    pub fn is_validation_notice(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::Duplicate { .. } | Self::EmptyExport { .. }
        )
    }

    /// Check if this error came from the remote data store boundary
    pub fn is_collaborator_failure(&self) -> bool {
        matches!(self, Self::Collaborator { .. })
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for BillingError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BillingError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for BillingError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// Result type alias for dorm-billing operations
pub type BillingResult<T> = Result<T, BillingError>;
