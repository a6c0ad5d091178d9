//! Display formatting for terminal output
//!
//! Tables for billed readings and tenants, plus the totals block printed
//! under the readings table.

pub mod reading;
pub mod tenant;

pub use reading::{format_reading_table, format_summary};
pub use tenant::format_tenant_list;
