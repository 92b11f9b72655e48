//! Packed BCD helpers shared by the time and date codecs.
//!
//! Every timekeeping register of the DS1307 holds a decimal value as two
//! nibbles: the tens digit in the upper nibble and the ones digit in the lower
//! one. Not every bit of the upper nibble belongs to the tens digit, the
//! remaining high bits carry flags (clock halt, 12/24 hour select, AM/PM), so
//! decoding always takes explicit digit masks.

/// Tens digit mask for fields whose tens digit is 0-1 (12-hour hours, month).
pub const TENS_MASK_1BIT: u8 = 0b0001;
/// Tens digit mask for fields whose tens digit is 0-3 (24-hour hours, date).
pub const TENS_MASK_2BIT: u8 = 0b0011;
/// Tens digit mask for fields whose tens digit is 0-7 (seconds, minutes).
pub const TENS_MASK_3BIT: u8 = 0b0111;
/// Tens digit mask for a full nibble (year).
pub const TENS_MASK_4BIT: u8 = 0b1111;
/// Ones digit mask, the same for every field.
pub const ONES_MASK: u8 = 0b1111;

/// Encodes `value` as a packed BCD byte.
///
/// `value` must be in `0..=99`. Larger values overflow the tens nibble and
/// produce a byte the device will misinterpret, so callers are expected to
/// [`clamp`] first.
pub const fn encode_bcd(value: u8) -> u8 {
    ((value / 10) << 4) | (value % 10)
}

/// Decodes a packed BCD byte.
///
/// `tens_mask` is applied to the upper nibble after shifting it down, and
/// `ones_mask` to the lower nibble, so flag bits outside the digit widths are
/// ignored. No range check is applied: the result reflects exactly what the
/// register held.
pub const fn decode_bcd(byte: u8, tens_mask: u8, ones_mask: u8) -> u8 {
    ((byte >> 4) & tens_mask) * 10 + (byte & ones_mask)
}

/// Saturates `value` to the closed range `min..=max`.
///
/// Unlike [`Ord::clamp`] this never panics; if `min > max` the result is
/// `max`.
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        if min > max {
            max
        } else {
            min
        }
    } else if value > max {
        max
    } else {
        value
    }
}
