//! Tenant model
//!
//! Tenants are created and deleted through the data store; this crate only
//! validates new-tenant input before handing it over.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::TenantId;

/// A dormitory tenant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: TenantId,
    pub room_number: String,
    #[serde(default)]
    pub student_id: String,
    pub name: String,
}

impl Tenant {
    /// Case-insensitive match against room number, student ID, or name
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.room_number.to_lowercase().contains(&query)
            || self.student_id.to_lowercase().contains(&query)
            || self.name.to_lowercase().contains(&query)
    }
}

/// Input for adding a tenant
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTenant {
    pub room_number: String,
    #[serde(default)]
    pub student_id: String,
    pub name: String,
}

impl NewTenant {
    pub fn new(
        room_number: impl Into<String>,
        student_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            room_number: room_number.into(),
            student_id: student_id.into(),
            name: name.into(),
        }
    }

    /// Trim surrounding whitespace from every field
    pub fn normalized(&self) -> Self {
        Self {
            room_number: self.room_number.trim().to_string(),
            student_id: self.student_id.trim().to_string(),
            name: self.name.trim().to_string(),
        }
    }

    /// Validate the input
    pub fn validate(&self) -> Result<(), TenantValidationError> {
        if self.name.trim().is_empty() {
            return Err(TenantValidationError::EmptyName);
        }

        if self.room_number.trim().is_empty() {
            return Err(TenantValidationError::EmptyRoomNumber);
        }

        Ok(())
    }
}

/// Validation errors for new tenants
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TenantValidationError {
    EmptyName,
    EmptyRoomNumber,
}

impl fmt::Display for TenantValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Tenant name cannot be empty"),
            Self::EmptyRoomNumber => write!(f, "Room number cannot be empty"),
        }
    }
}

impl std::error::Error for TenantValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        assert!(NewTenant::new("101", "6501", "Somchai").validate().is_ok());
        assert!(NewTenant::new("101", "", "Somchai").validate().is_ok());
        assert_eq!(
            NewTenant::new("101", "6501", "  ").validate(),
            Err(TenantValidationError::EmptyName)
        );
        assert_eq!(
            NewTenant::new("", "6501", "Somchai").validate(),
            Err(TenantValidationError::EmptyRoomNumber)
        );
    }

    #[test]
    fn test_normalized() {
        let t = NewTenant::new(" 101 ", " 6501", "Somchai  ").normalized();
        assert_eq!(t, NewTenant::new("101", "6501", "Somchai"));
    }

    #[test]
    fn test_matches() {
        let tenant = Tenant {
            id: TenantId::from("1"),
            room_number: "B-204".into(),
            student_id: "6501234".into(),
            name: "Suda Rattana".into(),
        };
        assert!(tenant.matches("b-2"));
        assert!(tenant.matches("6501"));
        assert!(tenant.matches("RATTANA"));
        assert!(!tenant.matches("101"));
    }
}
