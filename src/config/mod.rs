//! Configuration module for dorm-billing
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - Default unit rates and display preferences

pub mod paths;
pub mod settings;

pub use paths::BillingPaths;
pub use settings::{DateLocale, Settings};
