//! A platform-agnostic driver for the DS1307 real-time clock.
//!
//! The DS1307 keeps time and date as packed BCD in seven registers and offers
//! 56 bytes of battery-backed RAM. This crate provides:
//!
//! - register codecs for the time ([`Time`]) and date ([`Date`]) registers,
//!   including both hour layouts (24-hour and 12-hour with AM/PM)
//! - conversion of the full register block to and from chrono's
//!   `NaiveDateTime`
//! - a bounds-safe mapping of RAM offsets into the RAM window
//! - a blocking driver over `embedded-hal` and, with the `async` feature, an
//!   async driver over `embedded-hal-async` in [`asynch`]
//!
//! # Features
//!
//! - `async`: async driver
//! - `log`: logging through the `log` crate
//! - `defmt`: logging and `Format` impls through `defmt`
//!
//! # Example
//!
//! ```rust,ignore
//! use ds1307::{Config, DS1307, DEFAULT_ADDRESS};
//!
//! let mut rtc = DS1307::new(i2c, DEFAULT_ADDRESS);
//! rtc.configure(&Config::default())?;
//! let now = rtc.datetime()?;
//! rtc.write_ram_byte(0, 0x42)?;
//! ```
//!
//! # Out of range values
//!
//! Every field is clamped into its valid range before it is encoded, so
//! writes never produce a byte the device would misinterpret. This is lossy:
//! a second of 65 is written as 59. Reads never clamp.
#![no_std]

use embedded_hal::i2c::I2c;
use paste::paste;

cfg_if::cfg_if! {
    if #[cfg(feature = "log")] {
        #[allow(unused_macros)]
        macro_rules! debug {
            ($($arg:tt)*) => { log::debug!($($arg)*) };
        }
        #[allow(unused_macros)]
        macro_rules! warn {
            ($($arg:tt)*) => { log::warn!($($arg)*) };
        }
        #[allow(unused_macros)]
        macro_rules! error {
            ($($arg:tt)*) => { log::error!($($arg)*) };
        }
    } else if #[cfg(feature = "defmt")] {
        #[allow(unused_macros)]
        macro_rules! debug {
            ($($arg:tt)*) => { defmt::debug!($($arg)*) };
        }
        #[allow(unused_macros)]
        macro_rules! warn {
            ($($arg:tt)*) => { defmt::warn!($($arg)*) };
        }
        #[allow(unused_macros)]
        macro_rules! error {
            ($($arg:tt)*) => { defmt::error!($($arg)*) };
        }
    } else {
        #[allow(unused_macros)]
        macro_rules! debug {
            ($($arg:tt)*) => {{}};
        }
        #[allow(unused_macros)]
        macro_rules! warn {
            ($($arg:tt)*) => {{}};
        }
        #[allow(unused_macros)]
        macro_rules! error {
            ($($arg:tt)*) => {{}};
        }
    }
}

#[cfg(feature = "async")]
pub mod asynch;
pub mod bcd;
pub mod date;
pub mod datetime;
pub mod ram;
pub mod registers;
pub mod time;

pub use date::{Date, DayOfWeek};
pub use datetime::{DS1307DateTime, DS1307DateTimeError};
pub use registers::{Oscillator, RegAddr, SquareWaveFrequency, TimeRepresentation};
pub use time::{Hour, Meridian, Time};

use ram::RAM_SIZE;
use registers::{Control, Day, Hours, Minutes, Month, Seconds, Year};

/// I2C address of the DS1307.
pub const DEFAULT_ADDRESS: u8 = 0x68;

/// Device configuration applied by `configure`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Hour register layout used for the running clock
    pub time_representation: TimeRepresentation,
    /// Square wave frequency on SQW/OUT
    pub square_wave_frequency: SquareWaveFrequency,
    /// Drive the square wave on SQW/OUT
    pub square_wave_enable: bool,
    /// Level of SQW/OUT while the square wave is disabled
    pub output_level: bool,
    /// Run or halt the oscillator
    pub oscillator_enable: Oscillator,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            time_representation: TimeRepresentation::TwentyFourHour,
            square_wave_frequency: SquareWaveFrequency::Hz1,
            square_wave_enable: false,
            output_level: false,
            oscillator_enable: Oscillator::Enabled,
        }
    }
}

/// Errors returned by the driver.
#[derive(Debug)]
pub enum DS1307Error<I2CE> {
    /// The bus transaction failed, e.g. the device did not acknowledge
    I2c(I2CE),
    /// The registers do not hold a representable date/time
    DateTime(DS1307DateTimeError),
    /// A RAM burst was longer than the RAM window
    RamLength,
}

impl<I2CE> From<I2CE> for DS1307Error<I2CE> {
    fn from(e: I2CE) -> Self {
        DS1307Error::I2c(e)
    }
}

/// DS1307 Real-Time Clock driver.
///
/// Owns the bus handle and remembers the hour layout the clock runs in, which
/// `set_datetime` uses when encoding. The driver does no locking; share the
/// bus through an `embedded-hal` bus wrapper if other devices use it.
pub struct DS1307<I2C: I2c> {
    i2c: I2C,
    address: u8,
    time_representation: TimeRepresentation,
}

impl<I2C: I2c> DS1307<I2C> {
    /// Creates a new DS1307 driver instance.
    ///
    /// # Arguments
    /// * `i2c` - The I2C bus implementation
    /// * `address` - The I2C address of the device (normally [`DEFAULT_ADDRESS`])
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            time_representation: TimeRepresentation::TwentyFourHour,
        }
    }

    /// Releases the I2C bus.
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Hour layout the driver encodes `set_datetime` values with.
    pub fn time_representation(&self) -> TimeRepresentation {
        self.time_representation
    }

    /// Configures the device according to the provided configuration.
    ///
    /// The current hour is re-encoded in the requested layout, so switching
    /// between 12 and 24 hour mode keeps the time of day.
    pub fn configure(&mut self, config: &Config) -> Result<(), DS1307Error<I2C::Error>> {
        debug!("DS1307: reading control register");
        let mut control = self.control()?;
        control.set_square_wave_frequency(config.square_wave_frequency);
        control.set_square_wave_enable(config.square_wave_enable);
        control.set_output_level(config.output_level);
        debug!("DS1307: writing control: {:?}", control);
        self.set_control(control)?;

        self.set_oscillator(config.oscillator_enable)?;

        let current = Hour::decode(self.hour()?);
        if current.representation() != config.time_representation {
            let hour = current.to_representation(config.time_representation);
            debug!("DS1307: hour {:?}", hour);
            self.set_hour(hour.encode())?;
        }
        self.time_representation = config.time_representation;
        Ok(())
    }

    fn read_block(&mut self, register: u8, data: &mut [u8]) -> Result<(), DS1307Error<I2C::Error>> {
        self.i2c.write_read(self.address, &[register], data)?;
        Ok(())
    }

    fn write_block(&mut self, register: u8, data: &[u8]) -> Result<(), DS1307Error<I2C::Error>> {
        if data.len() > RAM_SIZE {
            return Err(DS1307Error::RamLength);
        }
        let mut buffer = [0u8; RAM_SIZE + 1];
        buffer[0] = register;
        buffer[1..=data.len()].copy_from_slice(data);
        self.i2c.write(self.address, &buffer[..=data.len()])?;
        Ok(())
    }

    /// Reads the seconds, minutes and hours registers.
    pub fn time(&mut self) -> Result<Time, DS1307Error<I2C::Error>> {
        let mut data = [0; 3];
        self.read_block(RegAddr::Seconds as u8, &mut data)?;
        Ok(Time::decode(&data))
    }

    /// Writes the seconds, minutes and hours registers.
    ///
    /// The clock halt flag is written from `time.oscillator_disabled` and the
    /// hour layout of `time` becomes the driver's layout.
    pub fn set_time(&mut self, time: &Time) -> Result<(), DS1307Error<I2C::Error>> {
        let data = time.encode();
        if Time::decode(&data) != *time {
            debug!("DS1307: time {:?} clamped to {:?}", time, data);
        }
        self.write_block(RegAddr::Seconds as u8, &data)?;
        self.time_representation = time.hour.representation();
        Ok(())
    }

    /// Reads the day, date, month and year registers.
    pub fn date(&mut self) -> Result<Date, DS1307Error<I2C::Error>> {
        let mut data = [0; 4];
        self.read_block(RegAddr::Day as u8, &mut data)?;
        Ok(Date::decode(&data))
    }

    /// Writes the day, date, month and year registers.
    ///
    /// The calendar is not validated; February 30 is written as is.
    pub fn set_date(&mut self, date: &Date) -> Result<(), DS1307Error<I2C::Error>> {
        let data = date.encode();
        if Date::decode(&data) != *date {
            debug!("DS1307: date {:?} clamped to {:?}", date, data);
        }
        self.write_block(RegAddr::Day as u8, &data)
    }

    /// Reads all seven timekeeping registers in one transfer.
    pub fn raw_datetime(&mut self) -> Result<DS1307DateTime, DS1307Error<I2C::Error>> {
        let mut data = [0; 7];
        self.read_block(RegAddr::Seconds as u8, &mut data)?;
        Ok(data.into())
    }

    /// Writes all seven timekeeping registers in one transfer.
    pub fn set_raw_datetime(
        &mut self,
        datetime: &DS1307DateTime,
    ) -> Result<(), DS1307Error<I2C::Error>> {
        let data: [u8; 7] = datetime.into();
        self.write_block(RegAddr::Seconds as u8, &data)
    }

    /// Gets the current date and time from the device.
    pub fn datetime(&mut self) -> Result<chrono::NaiveDateTime, DS1307Error<I2C::Error>> {
        let raw = self.raw_datetime()?;
        raw.into_datetime().map_err(DS1307Error::DateTime)
    }

    /// Sets the current date and time and starts the oscillator.
    pub fn set_datetime(
        &mut self,
        datetime: &chrono::NaiveDateTime,
    ) -> Result<(), DS1307Error<I2C::Error>> {
        let raw = DS1307DateTime::from_datetime(datetime, self.time_representation)
            .map_err(DS1307Error::DateTime)?;
        self.set_raw_datetime(&raw)
    }

    /// Whether the oscillator is running (clock halt flag clear).
    pub fn is_running(&mut self) -> Result<bool, DS1307Error<I2C::Error>> {
        Ok(self.second()?.oscillator() == Oscillator::Enabled)
    }

    /// Starts the oscillator, keeping the current seconds value.
    pub fn start(&mut self) -> Result<(), DS1307Error<I2C::Error>> {
        self.set_oscillator(Oscillator::Enabled)
    }

    /// Halts the oscillator, keeping the current seconds value.
    pub fn halt(&mut self) -> Result<(), DS1307Error<I2C::Error>> {
        self.set_oscillator(Oscillator::Disabled)
    }

    fn set_oscillator(&mut self, oscillator: Oscillator) -> Result<(), DS1307Error<I2C::Error>> {
        let mut seconds = self.second()?;
        if seconds.oscillator() != oscillator {
            seconds.set_oscillator(oscillator);
            self.set_second(seconds)?;
        }
        Ok(())
    }

    /// Reads one RAM byte. `offset` wraps around the 56 byte window.
    pub fn read_ram_byte(&mut self, offset: usize) -> Result<u8, DS1307Error<I2C::Error>> {
        let mut data = [0];
        self.read_block(ram::map_offset(offset), &mut data)?;
        Ok(data[0])
    }

    /// Writes one RAM byte. `offset` wraps around the 56 byte window.
    pub fn write_ram_byte(
        &mut self,
        offset: usize,
        value: u8,
    ) -> Result<(), DS1307Error<I2C::Error>> {
        let address = ram::map_offset(offset);
        debug!("DS1307: RAM[{}] <- {}", address, value);
        self.i2c.write(self.address, &[address, value])?;
        Ok(())
    }

    /// Fills `buf` from RAM starting at `offset`, wrapping at the window end.
    ///
    /// # Errors
    /// [`DS1307Error::RamLength`] if `buf` is longer than the window.
    pub fn read_ram(
        &mut self,
        offset: usize,
        buf: &mut [u8],
    ) -> Result<(), DS1307Error<I2C::Error>> {
        if buf.len() > RAM_SIZE {
            return Err(DS1307Error::RamLength);
        }
        for (address, range) in ram::segments(offset, buf.len()) {
            self.read_block(address, &mut buf[range])?;
        }
        Ok(())
    }

    /// Writes `data` to RAM starting at `offset`, wrapping at the window end.
    ///
    /// # Errors
    /// [`DS1307Error::RamLength`] if `data` is longer than the window.
    pub fn write_ram(&mut self, offset: usize, data: &[u8]) -> Result<(), DS1307Error<I2C::Error>> {
        if data.len() > RAM_SIZE {
            return Err(DS1307Error::RamLength);
        }
        for (address, range) in ram::segments(offset, data.len()) {
            self.write_block(address, &data[range])?;
        }
        Ok(())
    }
}

// Register access implementations
macro_rules! impl_register_access {
    ($(($name:ident, $regaddr:expr, $typ:ty)),+) => {
        impl<I2C: I2c> DS1307<I2C> {
            $(
                paste! {
                    #[doc = concat!("Gets the value of the ", stringify!($name), " register.")]
                    pub fn $name(&mut self) -> Result<$typ, DS1307Error<I2C::Error>> {
                        let mut data = [0];
                        self.i2c
                            .write_read(self.address, &[$regaddr as u8], &mut data)?;
                        Ok(<$typ>::from(data[0]))
                    }

                    #[doc = concat!("Sets the value of the ", stringify!($name), " register.")]
                    pub fn [<set_ $name>](&mut self, value: $typ) -> Result<(), DS1307Error<I2C::Error>> {
                        self.i2c.write(
                            self.address,
                            &[$regaddr as u8, value.into()],
                        )?;
                        Ok(())
                    }
                }
            )+
        }
    }
}

impl_register_access!(
    (second, RegAddr::Seconds, Seconds),
    (minute, RegAddr::Minutes, Minutes),
    (hour, RegAddr::Hours, Hours),
    (day, RegAddr::Day, Day),
    (day_of_month, RegAddr::Date, registers::Date),
    (month, RegAddr::Month, Month),
    (year, RegAddr::Year, Year),
    (control, RegAddr::Control, Control)
);

#[cfg(test)]
mod tests {
    extern crate alloc;
    use super::*;
    use alloc::vec;
    use chrono::{Datelike, NaiveDate, Timelike};
    use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTrans};

    const DEVICE_ADDRESS: u8 = 0x68;

    fn setup_mock(expectations: &[I2cTrans]) -> I2cMock {
        I2cMock::new(expectations)
    }

    #[test]
    fn test_read_time() {
        let mock = setup_mock(&[I2cTrans::write_read(
            DEVICE_ADDRESS,
            vec![RegAddr::Seconds as u8],
            vec![0xD8, 0x37, 0x20],
        )]);
        let mut dev = DS1307::new(mock, DEVICE_ADDRESS);

        let time = dev.time().unwrap();
        assert_eq!(
            time,
            Time {
                second: 58,
                minute: 37,
                hour: Hour::TwentyFour(20),
                oscillator_disabled: true,
            }
        );
        dev.i2c.done();
    }

    #[test]
    fn test_set_time_twelve_hour() {
        let mock = setup_mock(&[I2cTrans::write(
            DEVICE_ADDRESS,
            vec![RegAddr::Seconds as u8, 0x05, 0x30, 0b0111_0001],
        )]);
        let mut dev = DS1307::new(mock, DEVICE_ADDRESS);

        let time = Time::new(
            Hour::Twelve {
                hour: 11,
                meridian: Meridian::Pm,
            },
            30,
            5,
        );
        dev.set_time(&time).unwrap();
        assert_eq!(dev.time_representation(), TimeRepresentation::TwelveHour);
        dev.i2c.done();
    }

    #[test]
    fn test_set_time_clamps() {
        let mock = setup_mock(&[I2cTrans::write(
            DEVICE_ADDRESS,
            vec![RegAddr::Seconds as u8, 0x59, 0x59, 0x23],
        )]);
        let mut dev = DS1307::new(mock, DEVICE_ADDRESS);

        dev.set_time(&Time::new(Hour::TwentyFour(99), 60, 65)).unwrap();
        dev.i2c.done();
    }

    #[test]
    fn test_read_and_write_date() {
        let mock = setup_mock(&[
            I2cTrans::write_read(
                DEVICE_ADDRESS,
                vec![RegAddr::Day as u8],
                vec![0x00, 0x30, 0x02, 0x24],
            ),
            I2cTrans::write(
                DEVICE_ADDRESS,
                vec![RegAddr::Day as u8, 0x02, 0x30, 0x02, 0x24],
            ),
        ]);
        let mut dev = DS1307::new(mock, DEVICE_ADDRESS);

        // Malformed day of week and an impossible calendar date
        let date = dev.date().unwrap();
        assert_eq!(date.day_of_week, DayOfWeek::FALLBACK);
        assert_eq!(date.day_of_month, 30);
        assert_eq!(date.month, 2);
        assert!(!date.is_valid_calendar_date());

        dev.set_date(&Date::new(DayOfWeek::Monday, 30, 2, 24)).unwrap();
        dev.i2c.done();
    }

    #[test]
    fn test_configure() {
        let config = Config {
            time_representation: TimeRepresentation::TwelveHour,
            square_wave_frequency: SquareWaveFrequency::Hz4096,
            square_wave_enable: true,
            output_level: false,
            oscillator_enable: Oscillator::Enabled,
        };

        let mock = setup_mock(&[
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Control as u8], vec![0x80]),
            I2cTrans::write(DEVICE_ADDRESS, vec![RegAddr::Control as u8, 0b0001_0001]),
            // Halted clock at 42 seconds
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Seconds as u8], vec![0xC2]),
            I2cTrans::write(DEVICE_ADDRESS, vec![RegAddr::Seconds as u8, 0x42]),
            // 24-hour 15h becomes 3 PM
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Hours as u8], vec![0x15]),
            I2cTrans::write(DEVICE_ADDRESS, vec![RegAddr::Hours as u8, 0x63]),
        ]);

        let mut dev = DS1307::new(mock, DEVICE_ADDRESS);
        dev.configure(&config).unwrap();
        assert_eq!(dev.time_representation(), TimeRepresentation::TwelveHour);
        dev.i2c.done();
    }

    #[test]
    fn test_configure_leaves_unchanged_registers_alone() {
        let config = Config {
            square_wave_enable: true,
            ..Config::default()
        };

        let mock = setup_mock(&[
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Control as u8], vec![0x00]),
            I2cTrans::write(DEVICE_ADDRESS, vec![RegAddr::Control as u8, 0b0001_0000]),
            // Running clock and 24-hour layout already match
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Seconds as u8], vec![0x42]),
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Hours as u8], vec![0x15]),
        ]);

        let mut dev = DS1307::new(mock, DEVICE_ADDRESS);
        dev.configure(&config).unwrap();
        assert_eq!(dev.time_representation(), TimeRepresentation::TwentyFourHour);
        dev.i2c.done();
    }

    #[test]
    fn test_read_datetime() {
        // 2024-03-14 15:30:00
        let datetime_registers = [0x00, 0x30, 0x15, 0x05, 0x14, 0x03, 0x24];

        let mock = setup_mock(&[I2cTrans::write_read(
            DEVICE_ADDRESS,
            vec![RegAddr::Seconds as u8],
            datetime_registers.to_vec(),
        )]);
        let mut dev = DS1307::new(mock, DEVICE_ADDRESS);

        let dt = dev.datetime().unwrap();
        assert_eq!(dt.hour(), 15);
        assert_eq!(dt.minute(), 30);
        assert_eq!(dt.second(), 0);
        assert_eq!(dt.day(), 14);
        assert_eq!(dt.month(), 3);
        assert_eq!(dt.year(), 2024);
        dev.i2c.done();
    }

    #[test]
    fn test_read_invalid_datetime() {
        // February 30th
        let mock = setup_mock(&[I2cTrans::write_read(
            DEVICE_ADDRESS,
            vec![RegAddr::Seconds as u8],
            vec![0x00, 0x00, 0x00, 0x01, 0x30, 0x02, 0x24],
        )]);
        let mut dev = DS1307::new(mock, DEVICE_ADDRESS);

        assert!(matches!(
            dev.datetime(),
            Err(DS1307Error::DateTime(DS1307DateTimeError::InvalidDateTime))
        ));
        dev.i2c.done();
    }

    #[test]
    fn test_read_malformed_twelve_hour_datetime() {
        // 12-hour register holding 13 AM
        let mock = setup_mock(&[I2cTrans::write_read(
            DEVICE_ADDRESS,
            vec![RegAddr::Seconds as u8],
            vec![0x00, 0x00, 0x53, 0x01, 0x01, 0x01, 0x24],
        )]);
        let mut dev = DS1307::new(mock, DEVICE_ADDRESS);

        assert!(matches!(
            dev.datetime(),
            Err(DS1307Error::DateTime(DS1307DateTimeError::InvalidDateTime))
        ));
        dev.i2c.done();
    }

    #[test]
    fn test_set_datetime() {
        let dt = NaiveDate::from_ymd_opt(2024, 3, 14)
            .unwrap()
            .and_hms_opt(15, 30, 0)
            .unwrap();

        let mock = setup_mock(&[I2cTrans::write(
            DEVICE_ADDRESS,
            vec![
                RegAddr::Seconds as u8,
                0x00, // seconds
                0x30, // minutes
                0x15, // hours (24-hour mode)
                0x05, // day (Thursday)
                0x14, // date
                0x03, // month
                0x24, // year
            ],
        )]);
        let mut dev = DS1307::new(mock, DEVICE_ADDRESS);

        dev.set_datetime(&dt).unwrap();
        dev.i2c.done();
    }

    #[test]
    fn test_set_datetime_year_out_of_range() {
        let dt = NaiveDate::from_ymd_opt(2100, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let mock = setup_mock(&[]);
        let mut dev = DS1307::new(mock, DEVICE_ADDRESS);

        assert!(matches!(
            dev.set_datetime(&dt),
            Err(DS1307Error::DateTime(DS1307DateTimeError::YearNotBefore2100))
        ));
        dev.i2c.done();
    }

    #[test]
    fn test_start_and_halt() {
        let mock = setup_mock(&[
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Seconds as u8], vec![0x12]),
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Seconds as u8], vec![0x12]),
            I2cTrans::write(DEVICE_ADDRESS, vec![RegAddr::Seconds as u8, 0x92]),
            // Already running, nothing is written
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Seconds as u8], vec![0x12]),
        ]);
        let mut dev = DS1307::new(mock, DEVICE_ADDRESS);

        assert!(dev.is_running().unwrap());
        dev.halt().unwrap();
        dev.start().unwrap();
        dev.i2c.done();
    }

    #[test]
    fn test_ram_byte_access() {
        let mock = setup_mock(&[
            I2cTrans::write(DEVICE_ADDRESS, vec![0x08 + 5, 0xAB]),
            I2cTrans::write_read(DEVICE_ADDRESS, vec![0x08 + 5], vec![0xAB]),
            // Offset 56 wraps to the window start
            I2cTrans::write(DEVICE_ADDRESS, vec![0x08, 0x01]),
            // Offset 200 wraps to 200 % 56 = 32
            I2cTrans::write_read(DEVICE_ADDRESS, vec![0x08 + 32], vec![0x55]),
        ]);
        let mut dev = DS1307::new(mock, DEVICE_ADDRESS);

        dev.write_ram_byte(5, 0xAB).unwrap();
        assert_eq!(dev.read_ram_byte(5).unwrap(), 0xAB);
        dev.write_ram_byte(56, 0x01).unwrap();
        assert_eq!(dev.read_ram_byte(200).unwrap(), 0x55);
        dev.i2c.done();
    }

    #[test]
    fn test_ram_write_nack_is_reported() {
        let nack = ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data);
        let mock = setup_mock(&[
            I2cTrans::write(DEVICE_ADDRESS, vec![0x08, 0x10]).with_error(nack),
            I2cTrans::write_read(DEVICE_ADDRESS, vec![0x09], vec![0x00]).with_error(nack),
        ]);
        let mut dev = DS1307::new(mock, DEVICE_ADDRESS);

        assert!(matches!(
            dev.write_ram_byte(0, 0x10),
            Err(DS1307Error::I2c(ErrorKind::NoAcknowledge(_)))
        ));
        assert!(matches!(
            dev.read_ram_byte(1),
            Err(DS1307Error::I2c(ErrorKind::NoAcknowledge(_)))
        ));
        dev.i2c.done();
    }

    #[test]
    fn test_ram_burst_splits_at_window_end() {
        let mock = setup_mock(&[
            I2cTrans::write(DEVICE_ADDRESS, vec![0x3E, 1, 2]),
            I2cTrans::write(DEVICE_ADDRESS, vec![0x08, 3, 4, 5]),
            I2cTrans::write_read(DEVICE_ADDRESS, vec![0x3E], vec![1, 2]),
            I2cTrans::write_read(DEVICE_ADDRESS, vec![0x08], vec![3, 4, 5]),
        ]);
        let mut dev = DS1307::new(mock, DEVICE_ADDRESS);

        dev.write_ram(54, &[1, 2, 3, 4, 5]).unwrap();
        let mut buf = [0u8; 5];
        dev.read_ram(54, &mut buf).unwrap();
        assert_eq!(buf, [1, 2, 3, 4, 5]);
        dev.i2c.done();
    }

    #[test]
    fn test_ram_burst_too_long() {
        let mock = setup_mock(&[]);
        let mut dev = DS1307::new(mock, DEVICE_ADDRESS);

        let data = [0u8; RAM_SIZE + 1];
        assert!(matches!(
            dev.write_ram(0, &data),
            Err(DS1307Error::RamLength)
        ));
        let mut buf = [0u8; RAM_SIZE + 1];
        assert!(matches!(
            dev.read_ram(0, &mut buf),
            Err(DS1307Error::RamLength)
        ));
        dev.i2c.done();
    }

    #[test]
    fn test_register_operations() {
        let mock = setup_mock(&[
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Minutes as u8], vec![0x30]),
            I2cTrans::write(DEVICE_ADDRESS, vec![RegAddr::Minutes as u8, 0x45]),
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Date as u8], vec![0x31]),
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Control as u8], vec![0x93]),
        ]);
        let mut dev = DS1307::new(mock, DEVICE_ADDRESS);

        let minutes = dev.minute().unwrap();
        assert_eq!(minutes.ten_minutes(), 3);
        assert_eq!(minutes.minutes(), 0);
        dev.set_minute(Minutes(0x45)).unwrap();

        let date = dev.day_of_month().unwrap();
        assert_eq!(date.ten_date(), 3);
        assert_eq!(date.date(), 1);

        let control = dev.control().unwrap();
        assert!(control.square_wave_enable());
        assert_eq!(
            control.square_wave_frequency(),
            SquareWaveFrequency::Hz32768
        );
        dev.i2c.done();
    }

    #[test]
    fn test_release() {
        let mock = setup_mock(&[]);
        let dev = DS1307::new(mock, DEVICE_ADDRESS);
        let mut mock = dev.release();
        mock.done();
    }
}
