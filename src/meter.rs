//! The power metering session: poll the INA219 at a fixed cadence and hand
//! each reading to the renderer, until the sensor signals that the measured
//! values left its configured range.

use std::io::Write;
use std::time::Duration;

use anyhow::Context;
use embedded_hal::i2c::I2c;
use log::{debug, info};

use crate::driver::ina219::{self, Ina219, MeasurementError};
use crate::render::Renderer;

/// Shunt resistance on the HatDrive! boards (R020).
pub const SHUNT_OHMS: f64 = 0.02;
/// Maximum current the board is expected to draw.
pub const MAX_EXPECTED_AMPS: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub voltage_v: f64,
    pub current_ma: f64,
}

impl Reading {
    pub fn power_mw(&self) -> f64 {
        self.voltage_v * self.current_ma
    }
}

/// Outcome of one poll: a reading, or the sensor's range-overflow signal.
/// The latter is not an error, it is the session's normal end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sample {
    Reading(Reading),
    OutOfRange,
}

/// Seam between the session loop and the sensor, so the loop can be driven
/// by a scripted sampler in tests.
pub trait PowerSampler {
    fn poll(&mut self) -> anyhow::Result<Sample>;
}

/// `PowerSampler` backed by a real INA219 on an I2C bus.
pub struct Ina219Sampler<I2C> {
    ina: Ina219<I2C>,
}

impl<I2C> Ina219Sampler<I2C>
where
    I2C: I2c,
    I2C::Error: Send + Sync + 'static,
{
    pub fn new(i2c: I2C) -> anyhow::Result<Ina219Sampler<I2C>> {
        let ina = Ina219::new(i2c, ina219::DEFAULT_ADDRESS)
            .map_err(MeasurementError::I2c)
            .context("failed to configure INA219")?;
        Ok(Ina219Sampler { ina })
    }
}

impl<I2C> PowerSampler for Ina219Sampler<I2C>
where
    I2C: I2c,
    I2C::Error: Send + Sync + 'static,
{
    fn poll(&mut self) -> anyhow::Result<Sample> {
        match self.ina.read_measurement() {
            Ok(m) => {
                let reading = Reading {
                    voltage_v: f64::from(m.bus_voltage_mv) / 1000.0,
                    // I = U / R, scaled to mA
                    current_ma: f64::from(m.shunt_voltage_uv) / (SHUNT_OHMS * 1000.0),
                };
                if reading.current_ma.abs() > MAX_EXPECTED_AMPS * 1000.0 {
                    return Ok(Sample::OutOfRange);
                }
                Ok(Sample::Reading(reading))
            }
            Err(MeasurementError::OutOfRange) => Ok(Sample::OutOfRange),
            Err(err @ MeasurementError::I2c(_)) => {
                Err(err).context("failed to read INA219 measurement")
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum SessionState {
    Sampling,
    Stopped,
}

/// Run the metering session until the sensor reports an out-of-range
/// condition. Bus failures abort with an error; there is no retry.
pub fn run_meter<S, W>(
    sampler: &mut S,
    renderer: &mut Renderer,
    out: &mut W,
    delay: Duration,
) -> anyhow::Result<()>
where
    S: PowerSampler + ?Sized,
    W: Write,
{
    renderer.write_header(out)?;

    let mut state = SessionState::Sampling;
    while state == SessionState::Sampling {
        match sampler.poll()? {
            Sample::Reading(reading) => {
                debug!("sampled {:?}", reading);
                renderer.present(out, &reading)?;
                std::thread::sleep(delay);
            }
            Sample::OutOfRange => {
                info!("sensor reading out of range, stopping");
                state = SessionState::Stopped;
            }
        }
    }
    Ok(())
}
