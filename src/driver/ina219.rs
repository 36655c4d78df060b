//! Minimal INA219 driver: just enough of the register map to configure the
//! measurement ranges once and then sample shunt and bus voltage.

use std::fmt::{self, Debug, Display, Formatter};

use embedded_hal::i2c::I2c;

/// Default address of the INA219 on the HatDrive! boards (A0/A1 to GND).
pub const DEFAULT_ADDRESS: u8 = 0x40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub(crate) enum Register {
    Configuration = 0x00,
    ShuntVoltage = 0x01,
    BusVoltage = 0x02,
}

/// 16V bus range, shunt gain /1 (±40mV full scale), 12-bit ADCs, continuous
/// shunt and bus conversions.
pub(crate) const CONFIG_16V_GAIN_1_40MV: u16 = 0b0000_0001_1001_1111;

/// Full scale of the shunt voltage register at gain /1, in 10µV steps.
const SHUNT_FULL_SCALE_10UV: i16 = 4000;

/// Bus voltage register flag: current/power calculation overflowed.
const BUS_FLAG_MATH_OVERFLOW: u16 = 0b01;

/// One raw sample from the chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurement {
    pub bus_voltage_mv: u16,
    pub shunt_voltage_uv: i32,
}

/// Errors reading a measurement.
///
/// `OutOfRange` is a property of the measured signal, not of the transport:
/// the shunt voltage left the configured ±40mV window or the chip flagged a
/// math overflow. Callers are expected to treat it differently from an I2C
/// failure.
#[derive(Debug, Clone, Copy)]
pub enum MeasurementError<E> {
    I2c(E),
    OutOfRange,
}

impl<E> From<E> for MeasurementError<E> {
    fn from(value: E) -> Self {
        Self::I2c(value)
    }
}

impl<E: Debug> Display for MeasurementError<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::I2c(err) => write!(f, "I2C error: {err:?}"),
            Self::OutOfRange => write!(f, "measurement out of the configured range"),
        }
    }
}

impl<E: Debug> std::error::Error for MeasurementError<E> {}

pub struct Ina219<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> Ina219<I2C> {
    /// Open the sensor and write the fixed measurement configuration.
    pub fn new(i2c: I2C, address: u8) -> Result<Ina219<I2C>, I2C::Error> {
        let mut ina = Ina219 { i2c, address };
        ina.write_register(Register::Configuration, CONFIG_16V_GAIN_1_40MV)?;
        Ok(ina)
    }

    /// Read one shunt + bus voltage sample.
    pub fn read_measurement(&mut self) -> Result<Measurement, MeasurementError<I2C::Error>> {
        let shunt = self.read_register(Register::ShuntVoltage)? as i16;
        if shunt.unsigned_abs() > SHUNT_FULL_SCALE_10UV as u16 {
            return Err(MeasurementError::OutOfRange);
        }

        let bus = self.read_register(Register::BusVoltage)?;
        if bus & BUS_FLAG_MATH_OVERFLOW != 0 {
            return Err(MeasurementError::OutOfRange);
        }

        Ok(Measurement {
            // bits 15..3, LSB = 4mV
            bus_voltage_mv: (bus >> 3) * 4,
            // LSB = 10µV
            shunt_voltage_uv: i32::from(shunt) * 10,
        })
    }

    /// Give the bus back, e.g. to check mock expectations in tests.
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn read_register(&mut self, register: Register) -> Result<u16, I2C::Error> {
        let mut buf = [0u8; 2];
        self.i2c.write_read(self.address, &[register as u8], &mut buf)?;
        Ok(u16::from_be_bytes(buf))
    }

    fn write_register(&mut self, register: Register, value: u16) -> Result<(), I2C::Error> {
        let [hi, lo] = value.to_be_bytes();
        self.i2c.write(self.address, &[register as u8, hi, lo])
    }
}
