//! ADXL345 3-axis accelerometer over I2C
//!
//! Only what tilt sensing needs: identify the part, enable measurement,
//! read the three axes in one burst.

use embedded_hal::i2c::I2c;

use bathy_core::tilt::Tilt;

/// Default I2C address (SDO/ALT low)
pub const ADXL345_ADDR: u8 = 0x53;

/// Fixed device id in `DEVID`
pub const DEVICE_ID: u8 = 0xE5;

mod reg {
    pub const DEVID: u8 = 0x00;
    pub const BW_RATE: u8 = 0x2C;
    pub const POWER_CTL: u8 = 0x2D;
    pub const DATA_FORMAT: u8 = 0x31;
    pub const DATAX0: u8 = 0x32;
}

/// 100 Hz output data rate
const RATE_100HZ: u8 = 0x0A;
/// `POWER_CTL` measure bit
const MEASURE: u8 = 0x08;
/// Full resolution, ±16 g
const FULL_RES_16G: u8 = 0x0B;

/// Errors that can occur with the accelerometer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Adxl345Error<E> {
    /// Bus transfer failed
    Bus(E),
    /// `DEVID` did not read back as [`DEVICE_ID`]
    WrongDevice(u8),
}

/// Raw axis counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Axes {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

/// ADXL345 driver
pub struct Adxl345<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> Adxl345<I2C> {
    /// Create a driver at the default address
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, ADXL345_ADDR)
    }

    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Check the device id and start measuring
    pub fn init(&mut self) -> Result<(), Adxl345Error<I2C::Error>> {
        let id = self
            .read_register(reg::DEVID)
            .map_err(Adxl345Error::Bus)?;
        if id != DEVICE_ID {
            return Err(Adxl345Error::WrongDevice(id));
        }

        self.write_register(reg::BW_RATE, RATE_100HZ)
            .and_then(|_| self.write_register(reg::DATA_FORMAT, FULL_RES_16G))
            .and_then(|_| self.write_register(reg::POWER_CTL, MEASURE))
            .map_err(Adxl345Error::Bus)
    }

    /// Read all three axes
    pub fn read_axes(&mut self) -> Result<Axes, Adxl345Error<I2C::Error>> {
        let mut buf = [0u8; 6];
        self.i2c
            .write_read(self.address, &[reg::DATAX0], &mut buf)
            .map_err(Adxl345Error::Bus)?;
        Ok(Axes {
            x: i16::from_le_bytes([buf[0], buf[1]]),
            y: i16::from_le_bytes([buf[2], buf[3]]),
            z: i16::from_le_bytes([buf[4], buf[5]]),
        })
    }

    /// Read the axes and convert to roll and pitch
    pub fn read_tilt(&mut self) -> Result<Tilt, Adxl345Error<I2C::Error>> {
        let axes = self.read_axes()?;
        Ok(Tilt::from_axes(axes.x, axes.y, axes.z))
    }

    fn read_register(&mut self, register: u8) -> Result<u8, I2C::Error> {
        let mut buf = [0u8; 1];
        self.i2c.write_read(self.address, &[register], &mut buf)?;
        Ok(buf[0])
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), I2C::Error> {
        self.i2c.write(self.address, &[register, value])
    }
}
