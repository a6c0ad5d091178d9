//! Billing calculator
//!
//! Turns a raw meter reading plus the current rates into usage, cost, and the
//! per-tenant share. Everything here is a pure function of its inputs, so it
//! is recomputed on every rate change or data refresh instead of cached.

use serde::Serialize;
use tracing::{debug, warn};

use crate::models::{MeterReading, MeterType, Money, RateConfig, ReadingId};

/// Data-quality signal attached to a billed reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UsageAnomaly {
    /// The meter apparently ran backwards (bad entry or meter swap)
    NegativeUsage { usage: f64 },
}

impl std::fmt::Display for UsageAnomaly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NegativeUsage { usage } => write!(f, "negative usage ({})", usage),
        }
    }
}

/// A reading with its derived billing fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BilledReading {
    pub reading: MeterReading,
    /// Previous cumulative value after fallback resolution
    pub previous_reading: f64,
    /// Consumption after fallback resolution; may be negative when flagged
    pub usage: f64,
    pub unit_price: Money,
    /// Room total (usage x unit price)
    pub total_cost: Money,
    /// Room total split across tenants, rounded up to a whole unit
    pub per_tenant_cost: Money,
    pub anomaly: Option<UsageAnomaly>,
}

impl BilledReading {
    pub fn is_anomalous(&self) -> bool {
        self.anomaly.is_some()
    }

    /// The meter column: "previous - current"
    pub fn meter_span(&self) -> String {
        format!(
            "{} - {}",
            format_quantity(self.previous_reading),
            format_quantity(self.reading.reading_value)
        )
    }
}

impl AsRef<MeterReading> for BilledReading {
    fn as_ref(&self) -> &MeterReading {
        &self.reading
    }
}

/// Bill a single reading at the given rates
pub fn bill_reading(reading: &MeterReading, rates: &RateConfig) -> BilledReading {
    let (previous_reading, usage) = resolve_usage(reading);

    let anomaly = if usage < 0.0 {
        warn!(
            reading_id = %reading.id,
            room = %reading.room_number,
            usage,
            "reading has negative usage"
        );
        Some(UsageAnomaly::NegativeUsage { usage })
    } else {
        None
    };

    let unit_price = rates.rate_for(reading.meter_type);
    let total_cost = unit_price.times_quantity(usage);
    let per_tenant_cost = total_cost.split_ceil(reading.tenant_count);

    BilledReading {
        reading: reading.clone(),
        previous_reading,
        usage,
        unit_price,
        total_cost,
        per_tenant_cost,
        anomaly,
    }
}

/// Bill every reading in order
pub fn bill_readings<'a, I>(readings: I, rates: &RateConfig) -> Vec<BilledReading>
where
    I: IntoIterator<Item = &'a MeterReading>,
{
    readings
        .into_iter()
        .map(|reading| bill_reading(reading, rates))
        .collect()
}

/// Resolve `(previous, usage)` for a reading.
///
/// Precedence, in this order:
/// 1. a stored previous reading wins and usage is `current - previous`; a
///    stored usage that disagrees is ignored
/// 2. otherwise a stored usage gives `previous = current - usage`
/// 3. with neither, previous equals current and usage is zero. This is the
///    first-reading fallback; it also hides data-entry omissions.
///
/// A previous reading of `0` next to a stored usage is an unset column, not
/// a meter that started at zero, so step 2 applies. Without a stored usage a
/// `0` previous reading still counts.
///
/// Do not swap steps 1 and 2: the stored previous value is the ground truth.
fn resolve_usage(reading: &MeterReading) -> (f64, f64) {
    let current = reading.reading_value;
    let previous = reading
        .previous_reading
        .filter(|previous| *previous != 0.0 || reading.usage.is_none());

    match (previous, reading.usage) {
        (Some(previous), stored) => {
            let usage = current - previous;
            if let Some(stored) = stored.filter(|stored| *stored != usage) {
                debug!(
                    reading_id = %reading.id,
                    stored,
                    derived = usage,
                    "stored usage disagrees with meter values"
                );
            }
            (previous, usage)
        }
        (None, Some(usage)) => (current - usage, usage),
        (None, None) => (current, 0.0),
    }
}

/// Aggregate figures over a set of billed readings
///
/// Anomalous rows are counted separately and left out of the totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BillingSummary {
    pub row_count: usize,
    pub water_usage: f64,
    pub water_cost: Money,
    pub electric_usage: f64,
    pub electric_cost: Money,
    pub anomalous: Vec<ReadingId>,
}

impl BillingSummary {
    pub fn from_rows<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a BilledReading>,
    {
        let mut summary = Self::default();

        for row in rows {
            summary.row_count += 1;

            if row.is_anomalous() {
                summary.anomalous.push(row.reading.id.clone());
                continue;
            }

            match row.reading.meter_type {
                MeterType::Water => {
                    summary.water_usage += row.usage;
                    summary.water_cost += row.total_cost;
                }
                MeterType::Electric => {
                    summary.electric_usage += row.usage;
                    summary.electric_cost += row.total_cost;
                }
            }
        }

        summary
    }

    pub fn grand_total(&self) -> Money {
        self.water_cost + self.electric_cost
    }
}

/// Render a meter quantity without a trailing ".0" for whole values
pub fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
