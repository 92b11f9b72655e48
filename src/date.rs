//! Date register codec for the day, date, month and year registers.
//!
//! The codec does not validate the calendar. A date such as February 30
//! encodes and decodes unchanged, exactly as the device itself would accept
//! it; use [`Date::is_valid_calendar_date`] or the chrono conversion in
//! [`crate::datetime`] when the distinction matters.

use chrono::NaiveDate;

use crate::bcd::{
    clamp, decode_bcd, encode_bcd, ONES_MASK, TENS_MASK_1BIT, TENS_MASK_2BIT, TENS_MASK_4BIT,
};
use crate::registers::{self, Month, Year};

/// Day of week ordinal stored in the day register.
///
/// The device only counts 1 through 7 and wraps at midnight; which ordinal
/// stands for which weekday is up to the application as long as the sequence
/// stays contiguous. The variant names follow the common 1 = Sunday
/// convention, which is also what the chrono conversion uses.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DayOfWeek {
    /// Ordinal 1
    Sunday = 1,
    /// Ordinal 2
    Monday = 2,
    /// Ordinal 3
    Tuesday = 3,
    /// Ordinal 4
    Wednesday = 4,
    /// Ordinal 5
    Thursday = 5,
    /// Ordinal 6
    Friday = 6,
    /// Ordinal 7
    Saturday = 7,
}

impl DayOfWeek {
    /// Value substituted when the day register holds something outside 1-7.
    pub const FALLBACK: DayOfWeek = DayOfWeek::Sunday;

    /// Returns the day for an ordinal in 1-7.
    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        match ordinal {
            1 => Some(DayOfWeek::Sunday),
            2 => Some(DayOfWeek::Monday),
            3 => Some(DayOfWeek::Tuesday),
            4 => Some(DayOfWeek::Wednesday),
            5 => Some(DayOfWeek::Thursday),
            6 => Some(DayOfWeek::Friday),
            7 => Some(DayOfWeek::Saturday),
            _ => None,
        }
    }

    /// Ordinal stored in the day register (1-7).
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    fn decode(raw: u8) -> Self {
        match Self::from_ordinal(raw) {
            Some(day) => day,
            None => {
                warn!(
                    "DS1307: day register held {}, using ordinal {}",
                    raw,
                    Self::FALLBACK.ordinal()
                );
                Self::FALLBACK
            }
        }
    }
}

/// Calendar date as held by the day, date, month and year registers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Date {
    /// Day of week ordinal
    pub day_of_week: DayOfWeek,
    /// Day of month (1-31)
    pub day_of_month: u8,
    /// Month (1-12)
    pub month: u8,
    /// Two digit year (0-99)
    pub year: u8,
}

impl Date {
    /// Creates a date value. Fields are not validated until encoded.
    pub fn new(day_of_week: DayOfWeek, day_of_month: u8, month: u8, year: u8) -> Self {
        Self {
            day_of_week,
            day_of_month,
            month,
            year,
        }
    }

    /// Whether the fields describe a real calendar day in `2000 + year`.
    ///
    /// The day of week is not cross-checked since its meaning is up to the
    /// application.
    pub fn is_valid_calendar_date(&self) -> bool {
        self.year <= 99
            && NaiveDate::from_ymd_opt(
                2000 + i32::from(self.year),
                u32::from(self.month),
                u32::from(self.day_of_month),
            )
            .is_some()
    }

    /// Encodes into the day, date, month and year register bytes.
    pub fn encode(&self) -> [u8; 4] {
        let mut day = registers::Day::default();
        day.set_day(self.day_of_week.ordinal());
        let date = registers::Date(encode_bcd(clamp(self.day_of_month, 1, 31)));
        let month = Month(encode_bcd(clamp(self.month, 1, 12)));
        let year = Year(encode_bcd(clamp(self.year, 0, 99)));
        [day.into(), date.into(), month.into(), year.into()]
    }

    /// Decodes the day, date, month and year register bytes.
    ///
    /// A day register outside 1-7 decodes to [`DayOfWeek::FALLBACK`].
    pub fn decode(raw: &[u8; 4]) -> Self {
        Self {
            day_of_week: DayOfWeek::decode(raw[0]),
            day_of_month: decode_bcd(raw[1], TENS_MASK_2BIT, ONES_MASK),
            month: decode_bcd(raw[2], TENS_MASK_1BIT, ONES_MASK),
            year: decode_bcd(raw[3], TENS_MASK_4BIT, ONES_MASK),
        }
    }
}

impl From<[u8; 4]> for Date {
    fn from(raw: [u8; 4]) -> Self {
        Date::decode(&raw)
    }
}

impl From<&Date> for [u8; 4] {
    fn from(date: &Date) -> [u8; 4] {
        date.encode()
    }
}
