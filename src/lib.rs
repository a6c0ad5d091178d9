//! dorm-billing - water and electricity billing for dormitories
//!
//! This library turns meter readings fetched from the dormitory's data store
//! into per-room and per-tenant charges, filters the reading history by
//! month and free text, and produces a spreadsheet-ready CSV report.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and user settings (default rates, date format)
//! - `error`: Custom error types
//! - `models`: Core data models (readings, tenants, rates, money, periods)
//! - `services`: Billing calculator, reading filter, tenant directory, dashboard
//! - `sources`: Data-store boundary and the file-backed snapshot adapter
//! - `export`: CSV report export
//! - `display`: Terminal tables
//! - `audit`: Audit logging of tenant changes and exports
//! - `cli`: Command handlers for the `dormbill` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use dorm_billing::config::{BillingPaths, Settings};
//! use dorm_billing::services::Dashboard;
//! use dorm_billing::sources::JsonFileSource;
//!
//! let paths = BillingPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//!
//! let mut dashboard = Dashboard::default();
//! dashboard.set_rates(settings.default_rates);
//! dashboard.refresh(&JsonFileSource::from_paths(&paths))?;
//! let rows = dashboard.visible_rows();
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod sources;

pub use error::{BillingError, BillingResult};
