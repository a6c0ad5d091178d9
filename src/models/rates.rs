//! Unit rate configuration
//!
//! Rates are passed explicitly into every billing computation and are never
//! snapshotted onto readings, so changing a rate reprices every reading of
//! that meter type on the next computation.

use serde::{Deserialize, Serialize};

use super::money::Money;
use super::reading::MeterType;
use crate::error::{BillingError, BillingResult};

/// Price per metered unit for each meter type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateConfig {
    /// Price per unit of water
    pub water: Money,
    /// Price per unit (kWh) of electricity
    pub electric: Money,
}

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            water: Money::from_units(17),
            electric: Money::from_units(7),
        }
    }
}

impl RateConfig {
    /// Create a rate configuration, rejecting negative rates
    pub fn new(water: Money, electric: Money) -> BillingResult<Self> {
        let mut rates = Self::default();
        rates.set(MeterType::Water, water)?;
        rates.set(MeterType::Electric, electric)?;
        Ok(rates)
    }

    /// Get the unit price for a meter type
    pub fn rate_for(&self, meter_type: MeterType) -> Money {
        match meter_type {
            MeterType::Water => self.water,
            MeterType::Electric => self.electric,
        }
    }

    /// Replace the unit price for a meter type
    ///
    /// Zero is accepted (promotional rate); negative prices are not.
    pub fn set(&mut self, meter_type: MeterType, rate: Money) -> BillingResult<()> {
        if rate.is_negative() {
            return Err(BillingError::Validation(format!(
                "{} rate cannot be negative: {}",
                meter_type, rate
            )));
        }

        match meter_type {
            MeterType::Water => self.water = rate,
            MeterType::Electric => self.electric = rate,
        }
        Ok(())
    }
}
