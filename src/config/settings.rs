//! User settings for dorm-billing
//!
//! Manages the default unit rates, currency symbol, and date rendering used
//! in tables and exported reports.

use chrono::{DateTime, Datelike, FixedOffset};
use serde::{Deserialize, Serialize};

use super::paths::BillingPaths;
use crate::error::BillingError;
use crate::models::{MeterType, RateConfig};

/// Offset between the Buddhist Era and the Gregorian calendar
const BUDDHIST_ERA_OFFSET: i32 = 543;

/// How dates are rendered in tables and reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DateLocale {
    /// Thai short date: day/month/Buddhist-era year, no padding ("3/5/2567")
    #[default]
    Thai,
    /// ISO 8601 calendar date ("2024-05-03")
    Iso,
}

impl DateLocale {
    /// Render the calendar date of a timestamp, in its recorded offset
    pub fn format_date(&self, timestamp: &DateTime<FixedOffset>) -> String {
        match self {
            Self::Thai => format!(
                "{}/{}/{}",
                timestamp.day(),
                timestamp.month(),
                timestamp.year() + BUDDHIST_ERA_OFFSET
            ),
            Self::Iso => timestamp.format("%Y-%m-%d").to_string(),
        }
    }
}

/// User settings for dorm-billing
///
/// Rates are stored in minor units (1700 = 17.00 per unit).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Unit rates each session starts from
    #[serde(default)]
    pub default_rates: RateConfig,

    /// Currency symbol shown in terminal tables
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date rendering for tables and exports
    #[serde(default)]
    pub date_locale: DateLocale,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "฿".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            default_rates: RateConfig::default(),
            currency_symbol: default_currency(),
            date_locale: DateLocale::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or use defaults if the file doesn't exist
    pub fn load_or_create(paths: &BillingPaths) -> Result<Self, BillingError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - `init` decides when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| BillingError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| BillingError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BillingPaths) -> Result<(), BillingError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| BillingError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| BillingError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    fn validate(&self) -> Result<(), BillingError> {
        for meter_type in [MeterType::Water, MeterType::Electric] {
            let rate = self.default_rates.rate_for(meter_type);
            if rate.is_negative() {
                return Err(BillingError::Config(format!(
                    "default {} rate cannot be negative: {}",
                    meter_type, rate
                )));
            }
        }
        Ok(())
    }
}
