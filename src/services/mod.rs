//! Service layer for dorm-billing
//!
//! Billing computation, reading filters, and the two stateful sessions built
//! on them: the tenant directory and the reading dashboard.

pub mod billing;
pub mod dashboard;
pub mod filter;
pub mod tenant;

pub use billing::{bill_reading, bill_readings, BilledReading, BillingSummary, UsageAnomaly};
pub use dashboard::Dashboard;
pub use filter::FilterCriteria;
pub use tenant::TenantDirectory;
