//! Async implementation of the DS1307 driver.
//!
//! This module provides an async interface to the DS1307 RTC device using
//! `embedded-hal-async` traits. It is only available when the `async` feature
//! is enabled.
//!
//! # Example
//!
//! ```rust,ignore
//! use ds1307::asynch::DS1307;
//!
//! // Initialize device
//! let mut rtc = DS1307::new(i2c, 0x68);
//!
//! // Configure asynchronously
//! rtc.configure(&config).await?;
//!
//! // Get current date/time asynchronously
//! let datetime = rtc.datetime().await?;
//! ```

use chrono::NaiveDateTime;
use embedded_hal_async::i2c::I2c;
use paste::paste;

use crate::ram::{self, RAM_SIZE};
use crate::registers::{self, Control, Day, Hours, Minutes, Month, Seconds, Year};
use crate::{
    Config, DS1307DateTime, DS1307Error, Date, Hour, Oscillator, RegAddr, Time, TimeRepresentation,
};

/// DS1307 Real-Time Clock async driver.
///
/// This struct provides the async interface to the DS1307 RTC device.
/// It supports async I2C operations through the `embedded-hal-async` traits.
pub struct DS1307<I2C: I2c> {
    i2c: I2C,
    address: u8,
    time_representation: TimeRepresentation,
}

impl<I2C: I2c> DS1307<I2C> {
    /// Creates a new DS1307 async driver instance.
    ///
    /// # Arguments
    /// * `i2c` - The async I2C bus implementation
    /// * `address` - The I2C address of the device (typically 0x68)
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
    /// # Arguments
    /// * `config` - The configuration to apply
    ///
    /// # Returns
    /// * `Ok(())` on success
    /// * `Err(DS1307Error)` on error
    pub async fn configure(&mut self, config: &Config) -> Result<(), DS1307Error<I2C::Error>> {
        debug!("DS1307: reading control register");
        let mut control = self.control().await?;
        control.set_square_wave_frequency(config.square_wave_frequency);
        control.set_square_wave_enable(config.square_wave_enable);
        control.set_output_level(config.output_level);
        debug!("DS1307: writing control: {:?}", control);
        self.set_control(control).await?;

        self.set_oscillator(config.oscillator_enable).await?;

        debug!("DS1307: reading hours register");
        let current = Hour::decode(self.hour().await?);
        if current.representation() != config.time_representation {
            let hour = current.to_representation(config.time_representation);
            self.set_hour(hour.encode()).await?;
        }
        self.time_representation = config.time_representation;
        Ok(())
    }

    async fn read_block(
        &mut self,
        register: u8,
        data: &mut [u8],
    ) -> Result<(), DS1307Error<I2C::Error>> {
        self.i2c.write_read(self.address, &[register], data).await?;
        Ok(())
    }

    async fn write_block(
        &mut self,
        register: u8,
        data: &[u8],
    ) -> Result<(), DS1307Error<I2C::Error>> {
        if data.len() > RAM_SIZE {
            return Err(DS1307Error::RamLength);
        }
        let mut buffer = [0u8; RAM_SIZE + 1];
        buffer[0] = register;
        buffer[1..=data.len()].copy_from_slice(data);
        self.i2c.write(self.address, &buffer[..=data.len()]).await?;
        Ok(())
    }

    /// Reads the seconds, minutes and hours registers.
    pub async fn time(&mut self) -> Result<Time, DS1307Error<I2C::Error>> {
        let mut data = [0; 3];
        self.read_block(RegAddr::Seconds as u8, &mut data).await?;
        Ok(Time::decode(&data))
    }

    /// Writes the seconds, minutes and hours registers.
    pub async fn set_time(&mut self, time: &Time) -> Result<(), DS1307Error<I2C::Error>> {
        let data = time.encode();
        if Time::decode(&data) != *time {
            debug!("DS1307: time {:?} clamped to {:?}", time, data);
        }
        self.write_block(RegAddr::Seconds as u8, &data).await?;
        self.time_representation = time.hour.representation();
        Ok(())
    }

    /// Reads the day, date, month and year registers.
    pub async fn date(&mut self) -> Result<Date, DS1307Error<I2C::Error>> {
        let mut data = [0; 4];
        self.read_block(RegAddr::Day as u8, &mut data).await?;
        Ok(Date::decode(&data))
    }

    /// Writes the day, date, month and year registers.
    pub async fn set_date(&mut self, date: &Date) -> Result<(), DS1307Error<I2C::Error>> {
        let data = date.encode();
        if Date::decode(&data) != *date {
            debug!("DS1307: date {:?} clamped to {:?}", date, data);
        }
        self.write_block(RegAddr::Day as u8, &data).await
    }

    /// Reads the raw datetime registers from the device.
    pub async fn raw_datetime(&mut self) -> Result<DS1307DateTime, DS1307Error<I2C::Error>> {
        let mut data = [0; 7];
        self.read_block(RegAddr::Seconds as u8, &mut data).await?;
        Ok(data.into())
    }

    /// Writes raw datetime values to the device registers.
    pub async fn set_raw_datetime(
        &mut self,
        datetime: &DS1307DateTime,
    ) -> Result<(), DS1307Error<I2C::Error>> {
        let data: [u8; 7] = datetime.into();
        self.write_block(RegAddr::Seconds as u8, &data).await
    }

    /// Gets the current date and time from the device.
    ///
    /// # Returns
    /// * `Ok(NaiveDateTime)` - The current date and time
    /// * `Err(DS1307Error)` on error
    pub async fn datetime(&mut self) -> Result<NaiveDateTime, DS1307Error<I2C::Error>> {
        let raw = self.raw_datetime().await?;
        raw.into_datetime().map_err(DS1307Error::DateTime)
    }

    /// Sets the current date and time on the device.
    ///
    /// # Arguments
    /// * `datetime` - The date and time to set
    pub async fn set_datetime(
        &mut self,
        datetime: &NaiveDateTime,
    ) -> Result<(), DS1307Error<I2C::Error>> {
        let raw = DS1307DateTime::from_datetime(datetime, self.time_representation)
            .map_err(DS1307Error::DateTime)?;
        self.set_raw_datetime(&raw).await
    }

    /// Whether the oscillator is running (clock halt flag clear).
    pub async fn is_running(&mut self) -> Result<bool, DS1307Error<I2C::Error>> {
        Ok(self.second().await?.oscillator() == Oscillator::Enabled)
    }

    /// Starts the oscillator, keeping the current seconds value.
    pub async fn start(&mut self) -> Result<(), DS1307Error<I2C::Error>> {
        self.set_oscillator(Oscillator::Enabled).await
    }

    /// Halts the oscillator, keeping the current seconds value.
    pub async fn halt(&mut self) -> Result<(), DS1307Error<I2C::Error>> {
        self.set_oscillator(Oscillator::Disabled).await
    }

    async fn set_oscillator(
        &mut self,
        oscillator: Oscillator,
    ) -> Result<(), DS1307Error<I2C::Error>> {
        let mut seconds = self.second().await?;
        if seconds.oscillator() != oscillator {
            seconds.set_oscillator(oscillator);
            self.set_second(seconds).await?;
        }
        Ok(())
    }

    /// Reads one RAM byte. `offset` wraps around the 56 byte window.
    pub async fn read_ram_byte(&mut self, offset: usize) -> Result<u8, DS1307Error<I2C::Error>> {
        let mut data = [0];
        self.read_block(ram::map_offset(offset), &mut data).await?;
        Ok(data[0])
    }

    /// Writes one RAM byte. `offset` wraps around the 56 byte window.
    pub async fn write_ram_byte(
        &mut self,
        offset: usize,
        value: u8,
    ) -> Result<(), DS1307Error<I2C::Error>> {
        let address = ram::map_offset(offset);
        debug!("DS1307: RAM[{}] <- {}", address, value);
        self.i2c.write(self.address, &[address, value]).await?;
        Ok(())
    }

    /// Fills `buf` from RAM starting at `offset`, wrapping at the window end.
    pub async fn read_ram(
        &mut self,
        offset: usize,
        buf: &mut [u8],
    ) -> Result<(), DS1307Error<I2C::Error>> {
        if buf.len() > RAM_SIZE {
            return Err(DS1307Error::RamLength);
        }
        for (address, range) in ram::segments(offset, buf.len()) {
            self.read_block(address, &mut buf[range]).await?;
        }
        Ok(())
    }

    /// Writes `data` to RAM starting at `offset`, wrapping at the window end.
    pub async fn write_ram(
        &mut self,
        offset: usize,
        data: &[u8],
    ) -> Result<(), DS1307Error<I2C::Error>> {
        if data.len() > RAM_SIZE {
            return Err(DS1307Error::RamLength);
        }
        for (address, range) in ram::segments(offset, data.len()) {
            self.write_block(address, &data[range]).await?;
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
                    #[doc = "\n\n# Returns"]
                    #[doc = concat!("* `Ok(", stringify!($typ), ")` - The register value on success")]
                    #[doc = "* `Err(DS1307Error)` on error"]
                    pub async fn $name(&mut self) -> Result<$typ, DS1307Error<I2C::Error>> {
                        let mut data = [0];
                        self.i2c
                            .write_read(self.address, &[$regaddr as u8], &mut data)
                            .await?;
                        Ok(<$typ>::from(data[0]))
                    }

                    #[doc = concat!("Sets the value of the ", stringify!($name), " register.")]
                    pub async fn [<set_ $name>](&mut self, value: $typ) -> Result<(), DS1307Error<I2C::Error>> {
                        self.i2c.write(
                            self.address,
                            &[$regaddr as u8, value.into()],
                        ).await?;
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
