//! `DateTime` conversion for the DS1307 timekeeping registers.
//!
//! This module joins the [`Time`] and [`Date`] codecs into the 7 consecutive
//! registers the device bursts in one transfer, and converts between that
//! block and chrono's `NaiveDateTime`.
//!
//! # Register Model
//!
//! The DS1307 stores date and time in 7 consecutive registers:
//! - Seconds, Minutes, Hours, Day, Date, Month, Year
//!
//! The year register only holds two digits and there is no century flag, so
//! the supported range is 2000 through 2099.
//!
//! # Error Handling
//!
//! Conversion errors are reported via [`DS1307DateTimeError`]. Unlike the
//! register codecs, the conversion into chrono validates the calendar: a
//! device holding February 30 yields [`DS1307DateTimeError::InvalidDateTime`].

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::{Date, DayOfWeek, Hour, Time, TimeRepresentation};

/// Contents of the seven timekeeping registers.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DS1307DateTime {
    /// Seconds, minutes, hours and the clock halt flag
    pub time: Time,
    /// Day, date, month and year
    pub date: Date,
}

impl DS1307DateTime {
    fn convert_year(year: i32) -> Result<u8, DS1307DateTimeError> {
        if year > 2099 {
            error!("Year {} is too late! must be before 2100", year);
            return Err(DS1307DateTimeError::YearNotBefore2100);
        }
        if year < 2000 {
            error!("Year {} is too early! must be greater than 1999", year);
            return Err(DS1307DateTimeError::YearNotAfter1999);
        }
        u8::try_from(year - 2000).map_err(|_| DS1307DateTimeError::InvalidDateTime)
    }

    /// Builds the register contents for `datetime` using the given hour layout.
    ///
    /// The day of week follows the 1 = Sunday convention. The clock halt flag
    /// is cleared, so writing the result starts the oscillator.
    pub fn from_datetime(
        datetime: &NaiveDateTime,
        time_representation: TimeRepresentation,
    ) -> Result<Self, DS1307DateTimeError> {
        let year = Self::convert_year(datetime.year())?;
        let hour =
            u8::try_from(datetime.hour()).map_err(|_| DS1307DateTimeError::InvalidDateTime)?;
        let minute =
            u8::try_from(datetime.minute()).map_err(|_| DS1307DateTimeError::InvalidDateTime)?;
        let second =
            u8::try_from(datetime.second()).map_err(|_| DS1307DateTimeError::InvalidDateTime)?;
        let weekday = u8::try_from(datetime.weekday().number_from_sunday())
            .map_err(|_| DS1307DateTimeError::InvalidDateTime)?;
        let day_of_week =
            DayOfWeek::from_ordinal(weekday).ok_or(DS1307DateTimeError::InvalidDateTime)?;
        let day_of_month =
            u8::try_from(datetime.day()).map_err(|_| DS1307DateTimeError::InvalidDateTime)?;
        let month =
            u8::try_from(datetime.month()).map_err(|_| DS1307DateTimeError::InvalidDateTime)?;

        let raw = DS1307DateTime {
            time: Time::new(Hour::from_24h(hour, time_representation), minute, second),
            date: Date::new(day_of_week, day_of_month, month, year),
        };

        debug!("raw={:?}", raw);

        Ok(raw)
    }

    /// Converts the register contents into a chrono `NaiveDateTime`.
    ///
    /// The stored day of week is not checked against the date. A 12-hour
    /// register outside 1-12 is rejected rather than mapped onto the clock.
    pub fn into_datetime(self) -> Result<NaiveDateTime, DS1307DateTimeError> {
        if !self.time.hour.is_valid() {
            error!("hour register out of range: {:?}", self.time.hour);
            return Err(DS1307DateTimeError::InvalidDateTime);
        }
        let hours = self.time.hour.to_24h();
        debug!(
            "hour={:?} h={} m={} s={}",
            self.time.hour, hours, self.time.minute, self.time.second
        );

        // Validate the date components before creating NaiveDateTime
        NaiveDate::from_ymd_opt(
            2000 + i32::from(self.date.year),
            u32::from(self.date.month),
            u32::from(self.date.day_of_month),
        )
        .and_then(|d| {
            d.and_hms_opt(
                u32::from(hours),
                u32::from(self.time.minute),
                u32::from(self.time.second),
            )
        })
        .ok_or(DS1307DateTimeError::InvalidDateTime)
    }
}

impl From<[u8; 7]> for DS1307DateTime {
    fn from(data: [u8; 7]) -> Self {
        DS1307DateTime {
            time: Time::decode(&[data[0], data[1], data[2]]),
            date: Date::decode(&[data[3], data[4], data[5], data[6]]),
        }
    }
}

impl From<&DS1307DateTime> for [u8; 7] {
    fn from(dt: &DS1307DateTime) -> [u8; 7] {
        let time = dt.time.encode();
        let date = dt.date.encode();
        [time[0], time[1], time[2], date[0], date[1], date[2], date[3]]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Errors that can occur during DS1307 date/time conversion or validation.
pub enum DS1307DateTimeError {
    /// The provided or decoded date/time is invalid (e.g., out of range, not representable)
    InvalidDateTime,
    /// The year is not before 2100 (the DS1307 only stores two year digits)
    YearNotBefore2100,
    /// The year is not after 1999 (the DS1307 only supports years >= 2000)
    YearNotAfter1999,
}
