//! Core data models for dorm-billing
//!
//! This module contains the data structures of the billing domain: meter
//! readings, tenants, unit rates, billing periods, and money.

pub mod ids;
pub mod money;
pub mod period;
pub mod rates;
pub mod reading;
pub mod tenant;

pub use ids::{ReadingId, TenantId};
pub use money::Money;
pub use period::BillingPeriod;
pub use rates::RateConfig;
pub use reading::{MeterReading, MeterType};
pub use tenant::{NewTenant, Tenant};
