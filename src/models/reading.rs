//! Meter reading model
//!
//! A reading is a snapshot of one room's cumulative water or electricity
//! meter, as recorded by dormitory staff and served by the remote data store.
//! Readings are read-only to this crate.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ReadingId;

/// The utility a meter measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeterType {
    Water,
    Electric,
}

impl MeterType {
    /// Human label used in tables and reports
    pub fn label(&self) -> &'static str {
        match self {
            Self::Water => "Water",
            Self::Electric => "Electric",
        }
    }
}

impl fmt::Display for MeterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A recorded meter reading
///
/// Field names follow the data store's snake_case JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeterReading {
    /// Identifier issued by the data store
    pub id: ReadingId,

    /// Room label, e.g. "101" or "B-204"
    pub room_number: String,

    pub meter_type: MeterType,

    /// Current cumulative meter value
    pub reading_value: f64,

    /// Prior cumulative value, when the store has one
    #[serde(default)]
    pub previous_reading: Option<f64>,

    /// Pre-computed consumption delta, when the store has one
    #[serde(default)]
    pub usage: Option<f64>,

    /// Number of tenants sharing this room's bill
    #[serde(default)]
    pub tenant_count: u32,

    /// Display names of the tenants (joined upstream)
    #[serde(default)]
    pub tenant_names: Option<String>,

    /// Student IDs of the tenants (joined upstream)
    #[serde(default)]
    pub student_ids: Option<String>,

    /// Who took the reading
    #[serde(default)]
    pub recorder_name: Option<String>,

    /// Relative reference to the meter photo in the data store
    #[serde(default)]
    pub image_url: Option<String>,

    /// When the reading was recorded, in the recorder's offset
    pub created_at: DateTime<FixedOffset>,
}

impl MeterReading {
    /// Create a reading with only the required fields set
    pub fn new(
        id: impl Into<ReadingId>,
        room_number: impl Into<String>,
        meter_type: MeterType,
        reading_value: f64,
        created_at: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            id: id.into(),
            room_number: room_number.into(),
            meter_type,
            reading_value,
            previous_reading: None,
            usage: None,
            tenant_count: 0,
            tenant_names: None,
            student_ids: None,
            recorder_name: None,
            image_url: None,
            created_at,
        }
    }
}

impl AsRef<MeterReading> for MeterReading {
    fn as_ref(&self) -> &MeterReading {
        self
    }
}
