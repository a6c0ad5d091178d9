//! Money type for representing currency amounts
//!
//! Internally stores amounts in minor units (satang, cents; i64) to avoid
//! floating-point drift when totals are summed. Provides the arithmetic the
//! billing calculator needs, including the round-up split across tenants.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};

const MINOR_PER_UNIT: i64 = 100;

/// Represents a monetary amount stored as hundredths of the currency unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from minor units
    ///
    /// # Examples
    /// ```
    /// use dorm_billing::models::Money;
    /// let amount = Money::from_minor(1750); // 17.50
    /// ```
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Create a Money amount from whole currency units
    ///
    /// # Examples
    /// ```
    /// use dorm_billing::models::Money;
    /// let rate = Money::from_units(17);
    /// assert_eq!(rate.minor(), 1700);
    /// ```
    pub const fn from_units(units: i64) -> Self {
        Self(units * MINOR_PER_UNIT)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in minor units
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / MINOR_PER_UNIT
    }

    /// Get the minor portion (0-99)
    pub const fn minor_part(&self) -> i64 {
        (self.0 % MINOR_PER_UNIT).abs()
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Price a metered quantity at this unit rate
    ///
    /// The product is rounded half away from zero to the nearest minor unit.
    pub fn times_quantity(&self, quantity: f64) -> Self {
        Self((self.0 as f64 * quantity).round() as i64)
    }

    /// Divide across `parts` payers, rounding each share up to a whole unit
    ///
    /// Rounding is always toward positive infinity so the shares never sum
    /// to less than the amount. Zero parts is treated as a single payer.
    pub fn split_ceil(&self, parts: u32) -> Self {
        let divisor = i64::from(parts.max(1)) * MINOR_PER_UNIT;
        Self(ceil_div(self.0, divisor) * MINOR_PER_UNIT)
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "17", "7.5", "7.50", "฿17", "$17.25"
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let s = s.trim();

        // Handle negative sign at start
        let (negative, s) = if let Some(stripped) = s.strip_prefix('-') {
            (true, stripped)
        } else {
            (false, s)
        };

        // Remove currency symbol if present
        let s = s.trim_start_matches(['$', '฿']).trim();

        let minor = if let Some((units, fraction)) = s.split_once('.') {
            let units: i64 = if units.is_empty() {
                0
            } else {
                units
                    .parse()
                    .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?
            };

            if !fraction.chars().all(|c| c.is_ascii_digit()) {
                return Err(MoneyParseError::InvalidFormat(s.to_string()));
            }

            // Pad or truncate the fraction to 2 digits
            let minor: i64 = match fraction.len() {
                0 => 0,
                1 => fraction
                    .parse::<i64>()
                    .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?
                    * 10,
                _ => fraction[..2]
                    .parse()
                    .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?,
            };

            units
                .checked_mul(MINOR_PER_UNIT)
                .and_then(|major| major.checked_add(minor))
                .ok_or_else(|| MoneyParseError::InvalidFormat(s.to_string()))?
        } else {
            s.parse::<i64>()
                .ok()
                .and_then(|units| units.checked_mul(MINOR_PER_UNIT))
                .ok_or_else(|| MoneyParseError::InvalidFormat(s.to_string()))?
        };

        Ok(Self(if negative { -minor } else { minor }))
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!("-{}{}", symbol, self.abs_plain())
        } else {
            format!("{}{}", symbol, self)
        }
    }

    fn abs_plain(&self) -> String {
        format!("{}.{:02}", self.units().abs(), self.minor_part())
    }
}

/// Integer division rounding toward positive infinity (divisor > 0)
fn ceil_div(numerator: i64, divisor: i64) -> i64 {
    -((-numerator).div_euclid(divisor))
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

/// Plain decimal rendering ("340.00", "-10.50"), suitable for spreadsheets
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-{}", self.abs_plain())
        } else {
            f.write_str(&self.abs_plain())
        }
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_out_of_range() {
        assert!(matches!(
            Money::parse("99999999999999999"),
            Err(MoneyParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            Money::parse("99999999999999999.50"),
            Err(MoneyParseError::InvalidFormat(_))
        ));
        assert_eq!(
            Money::parse("92233720368547758.07"),
            Ok(Money::from_minor(i64::MAX))
        );
    }

    #[test]
    fn test_from_minor() {
        let m = Money::from_minor(1050);
        assert_eq!(m.minor(), 1050);
        assert_eq!(m.units(), 10);
        assert_eq!(m.minor_part(), 50);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_minor(34000).to_string(), "340.00");
        assert_eq!(Money::from_minor(0).to_string(), "0.00");
        assert_eq!(Money::from_minor(-1050).to_string(), "-10.50");
        assert_eq!(Money::from_minor(-5).to_string(), "-0.05");
        assert_eq!(Money::from_minor(1700).format_with_symbol("฿"), "฿17.00");
        assert_eq!(Money::from_minor(-1700).format_with_symbol("฿"), "-฿17.00");
    }

    #[test]
    fn test_times_quantity() {
        assert_eq!(Money::from_units(17).times_quantity(20.0), Money::from_units(340));
        assert_eq!(Money::from_units(7).times_quantity(0.5), Money::from_minor(350));
        assert_eq!(Money::from_units(17).times_quantity(-10.0), Money::from_units(-170));
        assert!(Money::zero().times_quantity(1234.0).is_zero());
    }

    #[test]
    fn test_split_ceil() {
        // 340 / 3 = 113.33 -> 114
        assert_eq!(Money::from_units(340).split_ceil(3), Money::from_units(114));
        // exact split stays exact
        assert_eq!(Money::from_units(300).split_ceil(3), Money::from_units(100));
        // fractional total with a single payer still rounds up
        assert_eq!(Money::from_minor(1001).split_ceil(1), Money::from_units(11));
        // zero payers behaves like one
        assert_eq!(Money::from_units(340).split_ceil(0), Money::from_units(340));
        // negative amounts round toward positive infinity too
        assert_eq!(Money::from_units(-170).split_ceil(3), Money::from_units(-56));
    }

    #[test]
    fn test_split_never_under_recovers() {
        for total in [1, 99, 100, 101, 33_333, 34_000] {
            for tenants in 1..=7u32 {
                let total = Money::from_minor(total);
                let share = total.split_ceil(tenants);
                assert!(share.minor() * i64::from(tenants) >= total.minor());
            }
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("17").unwrap().minor(), 1700);
        assert_eq!(Money::parse("7.5").unwrap().minor(), 750);
        assert_eq!(Money::parse("฿17.25").unwrap().minor(), 1725);
        assert_eq!(Money::parse("$0.05").unwrap().minor(), 5);
        assert_eq!(Money::parse("-3").unwrap().minor(), -300);
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("1.2.3").is_err());
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 200, 300].into_iter().map(Money::from_minor).sum();
        assert_eq!(total.minor(), 600);
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_minor(1700);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "1700");
    }
}
