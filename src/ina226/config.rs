//! Configuration primitives for the INA226 driver.

use super::calibration::Calibration;
use super::params::{Averaging, ConversionTime, OperatingMode};
use super::registers::configuration_word;

/// User-facing configuration for one INA226.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Resolved shunt calibration.
    pub calibration: Calibration,
    /// Operating mode selection.
    pub mode: OperatingMode,
    /// Shunt voltage conversion time.
    pub shunt_conversion_time: ConversionTime,
    /// Bus voltage conversion time.
    pub bus_conversion_time: ConversionTime,
    /// Averaging depth.
    pub averaging: Averaging,
}

impl Config {
    /// Begins building a [`Config`] around an already validated calibration.
    pub fn new(calibration: Calibration) -> ConfigBuilder {
        ConfigBuilder::new(calibration)
    }

    /// Configuration register word for this configuration.
    pub fn register_word(&self) -> u16 {
        configuration_word(
            self.mode,
            self.shunt_conversion_time,
            self.bus_conversion_time,
            self.averaging,
        )
    }

    /// Time one complete (averaged) conversion cycle takes, in microseconds.
    pub fn cycle_time_us(&self) -> u32 {
        let per_sample = match self.mode {
            OperatingMode::ShuntTriggered | OperatingMode::ShuntContinuous => {
                self.shunt_conversion_time.micros()
            }
            OperatingMode::BusTriggered | OperatingMode::BusContinuous => {
                self.bus_conversion_time.micros()
            }
            OperatingMode::BothTriggered | OperatingMode::BothContinuous => {
                self.shunt_conversion_time.micros() + self.bus_conversion_time.micros()
            }
            OperatingMode::PowerDown | OperatingMode::PowerDownAlt => 0,
        };
        per_sample * self.averaging.samples()
    }
}

/// Builder for [`Config`] allowing piecemeal construction.
#[derive(Debug, Clone, Copy)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Creates a builder with continuous shunt+bus sampling, 1.1 ms conversions and no averaging.
    pub fn new(calibration: Calibration) -> Self {
        Self {
            config: Config {
                calibration,
                mode: OperatingMode::BothContinuous,
                shunt_conversion_time: ConversionTime::Us1100,
                bus_conversion_time: ConversionTime::Us1100,
                averaging: Averaging::Avg1,
            },
        }
    }

    /// Overrides the operating mode.
    pub fn mode(mut self, mode: OperatingMode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Overrides the shunt voltage conversion time.
    pub fn shunt_conversion_time(mut self, time: ConversionTime) -> Self {
        self.config.shunt_conversion_time = time;
        self
    }

    /// Overrides the bus voltage conversion time.
    pub fn bus_conversion_time(mut self, time: ConversionTime) -> Self {
        self.config.bus_conversion_time = time;
        self
    }

    /// Overrides the averaging depth.
    pub fn averaging(mut self, averaging: Averaging) -> Self {
        self.config.averaging = averaging;
        self
    }

    /// Finalizes the builder and returns the [`Config`].
    pub fn build(self) -> Config {
        self.config
    }
}
