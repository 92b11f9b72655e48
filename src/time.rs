//! Time register codec for the seconds, minutes and hours registers.
//!
//! The hour register has two layouts sharing one byte. In 24-hour mode the
//! tens digit is two bits wide (bits 5-4). In 12-hour mode bit 5 becomes the
//! PM flag and the tens digit shrinks to bit 4 alone. [`Hour`] models the two
//! layouts as separate variants so a meridian can never be attached to a
//! 24-hour value.
//!
//! Encoding clamps every field into its valid range first and is therefore
//! lossy for out of range input. Decoding never clamps.

use crate::bcd::{
    clamp, decode_bcd, encode_bcd, ONES_MASK, TENS_MASK_1BIT, TENS_MASK_2BIT, TENS_MASK_3BIT,
};
use crate::registers::{Hours, Minutes, Oscillator, Seconds, TimeRepresentation};

/// AM/PM indicator for 12-hour values.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Meridian {
    /// Before noon
    Am,
    /// Noon and after
    Pm,
}

/// Hour field in one of the two register layouts.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Hour {
    /// 24-hour value (0-23)
    TwentyFour(u8),
    /// 12-hour value (1-12) with its meridian
    Twelve {
        /// Hour of the half day (1-12)
        hour: u8,
        /// AM or PM
        meridian: Meridian,
    },
}

impl Hour {
    /// Register layout this hour is encoded with.
    pub fn representation(&self) -> TimeRepresentation {
        match self {
            Hour::TwentyFour(_) => TimeRepresentation::TwentyFourHour,
            Hour::Twelve { .. } => TimeRepresentation::TwelveHour,
        }
    }

    /// Builds an hour from a 0-23 value in the requested representation.
    ///
    /// Midnight becomes 12 AM and noon 12 PM. Values above 23 are clamped.
    pub fn from_24h(hour: u8, representation: TimeRepresentation) -> Self {
        let hour = clamp(hour, 0, 23);
        match representation {
            TimeRepresentation::TwentyFourHour => Hour::TwentyFour(hour),
            TimeRepresentation::TwelveHour => {
                let (hour, meridian) = match hour {
                    0 => (12, Meridian::Am),
                    1..=11 => (hour, Meridian::Am),
                    12 => (12, Meridian::Pm),
                    _ => (hour - 12, Meridian::Pm),
                };
                Hour::Twelve { hour, meridian }
            }
        }
    }

    /// Whether the value is in range for its layout: 0-23, or 1-12 with a
    /// meridian.
    pub fn is_valid(&self) -> bool {
        match *self {
            Hour::TwentyFour(hour) => hour <= 23,
            Hour::Twelve { hour, .. } => (1..=12).contains(&hour),
        }
    }

    /// Returns the hour as a 0-23 value.
    ///
    /// No range check is applied; see [`Hour::is_valid`].
    pub fn to_24h(&self) -> u8 {
        match *self {
            Hour::TwentyFour(hour) => hour,
            Hour::Twelve { hour, meridian } => match (hour, meridian) {
                (12, Meridian::Am) => 0,
                (12, Meridian::Pm) => 12,
                (h, Meridian::Am) => h,
                (h, Meridian::Pm) => h.saturating_add(12),
            },
        }
    }

    /// Converts to the requested representation, keeping the time of day.
    pub fn to_representation(&self, representation: TimeRepresentation) -> Self {
        if self.representation() == representation {
            *self
        } else {
            Hour::from_24h(self.to_24h(), representation)
        }
    }

    pub(crate) fn encode(&self) -> Hours {
        let mut value = Hours::default();
        match *self {
            Hour::TwentyFour(hour) => {
                value.0 = encode_bcd(clamp(hour, 0, 23));
                value.set_time_representation(TimeRepresentation::TwentyFourHour);
            }
            Hour::Twelve { hour, meridian } => {
                value.0 = encode_bcd(clamp(hour, 1, 12));
                value.set_time_representation(TimeRepresentation::TwelveHour);
                value.set_pm(meridian == Meridian::Pm);
            }
        }
        value
    }

    pub(crate) fn decode(raw: Hours) -> Self {
        match raw.time_representation() {
            TimeRepresentation::TwentyFourHour => {
                Hour::TwentyFour(decode_bcd(raw.0, TENS_MASK_2BIT, ONES_MASK))
            }
            TimeRepresentation::TwelveHour => Hour::Twelve {
                hour: decode_bcd(raw.0, TENS_MASK_1BIT, ONES_MASK),
                meridian: if raw.pm() { Meridian::Pm } else { Meridian::Am },
            },
        }
    }
}

/// Time of day as held by the seconds, minutes and hours registers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Time {
    /// Seconds (0-59)
    pub second: u8,
    /// Minutes (0-59)
    pub minute: u8,
    /// Hour and its register layout
    pub hour: Hour,
    /// Clock halt flag, stored in bit 7 of the seconds register
    pub oscillator_disabled: bool,
}

impl Time {
    /// Creates a running-clock time value.
    pub fn new(hour: Hour, minute: u8, second: u8) -> Self {
        Self {
            second,
            minute,
            hour,
            oscillator_disabled: false,
        }
    }

    /// Whether the hour uses the 12-hour layout.
    pub fn is_twelve_hour(&self) -> bool {
        matches!(self.hour, Hour::Twelve { .. })
    }

    /// Meridian of a 12-hour value, `None` in 24-hour mode.
    pub fn meridian(&self) -> Option<Meridian> {
        match self.hour {
            Hour::TwentyFour(_) => None,
            Hour::Twelve { meridian, .. } => Some(meridian),
        }
    }

    /// Oscillator state encoded by the clock halt flag.
    pub fn oscillator(&self) -> Oscillator {
        if self.oscillator_disabled {
            Oscillator::Disabled
        } else {
            Oscillator::Enabled
        }
    }

    /// Encodes into the seconds, minutes and hours register bytes.
    pub fn encode(&self) -> [u8; 3] {
        let mut seconds = Seconds(encode_bcd(clamp(self.second, 0, 59)));
        seconds.set_oscillator(self.oscillator());
        let minutes = Minutes(encode_bcd(clamp(self.minute, 0, 59)));
        let hours = self.hour.encode();
        [seconds.into(), minutes.into(), hours.into()]
    }

    /// Decodes the seconds, minutes and hours register bytes.
    pub fn decode(raw: &[u8; 3]) -> Self {
        let seconds = Seconds(raw[0]);
        Self {
            second: decode_bcd(raw[0], TENS_MASK_3BIT, ONES_MASK),
            minute: decode_bcd(raw[1], TENS_MASK_3BIT, ONES_MASK),
            hour: Hour::decode(Hours(raw[2])),
            oscillator_disabled: seconds.oscillator() == Oscillator::Disabled,
        }
    }
}

impl From<[u8; 3]> for Time {
    fn from(raw: [u8; 3]) -> Self {
        Time::decode(&raw)
    }
}

impl From<&Time> for [u8; 3] {
    fn from(time: &Time) -> [u8; 3] {
        time.encode()
    }
}
