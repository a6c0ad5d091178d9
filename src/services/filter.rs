//! Reading filter
//!
//! Narrows a reading collection by billing period and a free-text search over
//! room number and tenant names. The filter borrows its input and is cheap
//! enough to re-run on every keystroke.

use serde::{Deserialize, Serialize};

use crate::models::{BillingPeriod, MeterReading};

/// What the user is currently looking at
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Month to show; `None` shows every period
    pub period: Option<BillingPeriod>,
    /// Case-insensitive text matched against room number and tenant names
    pub search_term: String,
}

impl FilterCriteria {
    pub fn new(period: Option<BillingPeriod>, search_term: impl Into<String>) -> Self {
        Self {
            period,
            search_term: search_term.into(),
        }
    }

    /// Criteria that match everything
    pub fn all() -> Self {
        Self::default()
    }

    /// Whether these criteria leave a collection unchanged
    pub fn is_empty(&self) -> bool {
        self.period.is_none() && self.search_term.is_empty()
    }

    /// Check the period predicate
    pub fn matches_period(&self, reading: &MeterReading) -> bool {
        match &self.period {
            None => true,
            Some(period) => period.contains(&reading.created_at),
        }
    }

    /// Check the text predicate
    ///
    /// A missing tenant name only fails its own half of the match.
    pub fn matches_text(&self, reading: &MeterReading) -> bool {
        if self.search_term.is_empty() {
            return true;
        }

        let term = self.search_term.to_lowercase();
        reading.room_number.to_lowercase().contains(&term)
            || reading
                .tenant_names
                .as_deref()
                .is_some_and(|names| names.to_lowercase().contains(&term))
    }

    /// Check both predicates
    pub fn matches(&self, reading: &MeterReading) -> bool {
        self.matches_period(reading) && self.matches_text(reading)
    }

    /// Select the matching items, preserving their order
    pub fn apply<'a, T>(&self, items: &'a [T]) -> Vec<&'a T>
    where
        T: AsRef<MeterReading>,
    {
        items
            .iter()
            .filter(|item| self.matches(AsRef::<MeterReading>::as_ref(*item)))
            .collect()
    }

    /// Label for the active period, used in notices and report names
    pub fn period_label(&self) -> String {
        self.period
            .map(|p| p.to_string())
            .unwrap_or_else(|| "all periods".to_string())
    }
}
