//! Dashboard session
//!
//! Holds the inputs the user can change (the readings snapshot, the unit
//! rates, the period and search filter) and derives everything else on
//! demand. Setters only store input; every getter recomputes from scratch.

use tracing::{debug, warn};

use crate::config::DateLocale;
use crate::error::BillingResult;
use crate::export::{export_report_csv, ExportDocument};
use crate::models::{BillingPeriod, MeterReading, MeterType, Money, RateConfig};
use crate::sources::ReadingSource;

use super::billing::{bill_readings, BilledReading, BillingSummary};
use super::filter::FilterCriteria;

/// One user's view over the reading history
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    readings: Vec<MeterReading>,
    rates: RateConfig,
    criteria: FilterCriteria,
}

impl Dashboard {
    /// Start a session over readings that were already fetched
    pub fn with_readings(rates: RateConfig, readings: Vec<MeterReading>) -> Self {
        Self {
            readings,
            rates,
            criteria: FilterCriteria::default(),
        }
    }

    pub fn readings(&self) -> &[MeterReading] {
        &self.readings
    }

    pub fn rates(&self) -> &RateConfig {
        &self.rates
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn set_rates(&mut self, rates: RateConfig) {
        self.rates = rates;
    }

    /// Change one unit price; a negative price is rejected and nothing changes
    pub fn set_rate(&mut self, meter_type: MeterType, rate: Money) -> BillingResult<()> {
        self.rates.set(meter_type, rate)
    }

    pub fn set_period(&mut self, period: Option<BillingPeriod>) {
        self.criteria.period = period;
    }

    pub fn set_search(&mut self, search_term: impl Into<String>) {
        self.criteria.search_term = search_term.into();
    }

    /// Replace the snapshot with a fresh fetch
    ///
    /// On failure the previous snapshot stays in place and the error is
    /// returned to the caller, which decides whether to try again.
    pub fn refresh(&mut self, source: &dyn ReadingSource) -> BillingResult<usize> {
        match source.fetch_readings() {
            Ok(readings) => {
                debug!(count = readings.len(), "reading snapshot replaced");
                self.readings = readings;
                Ok(self.readings.len())
            }
            Err(e) => {
                warn!(error = %e, "reading refresh failed, keeping previous snapshot");
                Err(e)
            }
        }
    }

    /// Every reading billed at the current rates
    pub fn billed_rows(&self) -> Vec<BilledReading> {
        bill_readings(&self.readings, &self.rates)
    }

    /// Readings matching the current filter, billed at the current rates
    pub fn visible_rows(&self) -> Vec<BilledReading> {
        bill_readings(self.criteria.apply(&self.readings), &self.rates)
    }

    /// Totals over the visible rows
    pub fn summary(&self) -> BillingSummary {
        BillingSummary::from_rows(&self.visible_rows())
    }

    /// Build the report for the visible rows
    pub fn export(&self, locale: DateLocale) -> BillingResult<ExportDocument> {
        let rows = self.visible_rows();
        let selected: Vec<&BilledReading> = rows.iter().collect();
        export_report_csv(&selected, self.criteria.period.as_ref(), locale)
    }
}
