//! Sky Address Mapper
//!
//! Converts calendar dates into positions on the 1001-day spiral and back.
//!
//! # The Cycle
//!
//! ```text
//! 1001 days = 11 Solar Months × 13 Lunar Months × 7 Prime Days
//!
//! K = (S-1)·91 + (L-1)·7 + (P-1)        K ∈ [0, 1000]
//! ```
//!
//! Every date maps to exactly one address. An address maps back to a
//! canonical representative date (`anchor + K`), which is only one of
//! infinitely many dates sharing that address.

use std::fmt;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::core::error::{AtlasError, Result};

/// Length of the full spiral in days.
pub const CYCLE_DAYS: i64 = 1001;

/// Days in one Solar Month (13 Lunar Months of 7 days).
pub const SOLAR_MONTH_DAYS: i64 = 91;

/// Days in one Lunar Month.
pub const LUNAR_MONTH_DAYS: i64 = 7;

/// Number of Solar Months (S axis).
pub const SOLAR_MONTHS: u8 = 11;

/// Number of Lunar Months (L axis).
pub const LUNAR_MONTHS: u8 = 13;

/// Number of Prime Days (P axis), one per gate.
pub const PRIME_DAYS: u8 = 7;

/// Date format accepted everywhere a date is parsed from text.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .map_err(|_| AtlasError::invalid_date(input))
}

// =============================================================================
// SkyAddress
// =============================================================================

/// A position on the spiral: the (S, L, P) triple plus its raw index K.
///
/// Fields are private so every value in circulation satisfies the range
/// invariants; descriptor lookups keyed by an address are therefore total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SkyAddress {
    solar_month: u8,
    lunar_month: u8,
    prime_day: u8,
    k: u16,
}

impl SkyAddress {
    /// Map a date onto the spiral relative to `anchor`.
    ///
    /// Dates before the anchor wrap backwards: `anchor - 1 day` is K = 1000.
    pub fn compute(date: NaiveDate, anchor: NaiveDate) -> Self {
        let offset = (date - anchor).num_days();
        Self::from_index(offset.rem_euclid(CYCLE_DAYS) as u16)
    }

    /// Decode a raw spiral index. `k` is reduced modulo the cycle length.
    pub fn from_index(k: u16) -> Self {
        let k = (k as i64).rem_euclid(CYCLE_DAYS);
        let solar = k / SOLAR_MONTH_DAYS + 1;
        let remainder = k % SOLAR_MONTH_DAYS;
        let lunar = remainder / LUNAR_MONTH_DAYS + 1;
        let prime = remainder % LUNAR_MONTH_DAYS + 1;

        Self {
            solar_month: solar as u8,
            lunar_month: lunar as u8,
            prime_day: prime as u8,
            k: k as u16,
        }
    }

    /// Build an address from its three axes, validating each range.
    pub fn from_coordinate(solar_month: u8, lunar_month: u8, prime_day: u8) -> Result<Self> {
        check_axis("Solar Month", solar_month, SOLAR_MONTHS)?;
        check_axis("Lunar Month", lunar_month, LUNAR_MONTHS)?;
        check_axis("Prime Day", prime_day, PRIME_DAYS)?;

        let k = (solar_month as i64 - 1) * SOLAR_MONTH_DAYS
            + (lunar_month as i64 - 1) * LUNAR_MONTH_DAYS
            + (prime_day as i64 - 1);

        Ok(Self {
            solar_month,
            lunar_month,
            prime_day,
            k: k as u16,
        })
    }

    /// Solar Month, 1-11.
    pub fn solar_month(&self) -> u8 {
        self.solar_month
    }

    /// Lunar Month, 1-13.
    pub fn lunar_month(&self) -> u8 {
        self.lunar_month
    }

    /// Prime Day, 1-7. Also the active gate id.
    pub fn prime_day(&self) -> u8 {
        self.prime_day
    }

    /// Position on the spiral, 0-1000.
    pub fn k(&self) -> u16 {
        self.k
    }

    /// The canonical date carrying this address: `anchor + K` days.
    ///
    /// Fails when `anchor + K` is past the last representable date.
    pub fn representative_date(&self, anchor: NaiveDate) -> Result<NaiveDate> {
        anchor
            .checked_add_signed(Duration::days(self.k as i64))
            .ok_or_else(|| {
                AtlasError::invalid_config(format!(
                    "anchor date {} is too late to reach K={}",
                    anchor, self.k
                ))
            })
    }

    /// "K/1001" progress string.
    pub fn spiral_position(&self) -> String {
        format!("{}/{}", self.k, CYCLE_DAYS)
    }

    /// Tuple form `(S, L, P, K)`.
    pub fn as_tuple(&self) -> (u8, u8, u8, u16) {
        (self.solar_month, self.lunar_month, self.prime_day, self.k)
    }
}

impl fmt::Display for SkyAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}•{}•{}", self.solar_month, self.lunar_month, self.prime_day)
    }
}

fn check_axis(axis: &'static str, value: u8, max: u8) -> Result<()> {
    if value == 0 || value > max {
        return Err(AtlasError::CoordinateOutOfRange {
            axis,
            value: value as i64,
            min: 1,
            max: max as i64,
        });
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
