//! Register map definitions for the INA226 current/power monitor.
#![allow(unused_parens)]

use modular_bitfield::prelude::*;

use super::params::{Averaging, ConversionTime, OperatingMode};

/// Register address of `CONFIGURATION`.
pub const REG_CONFIGURATION: u8 = 0x00;
/// Register address of `SHUNT_VOLTAGE`.
pub const REG_SHUNT_VOLTAGE: u8 = 0x01;
/// Register address of `BUS_VOLTAGE`.
pub const REG_BUS_VOLTAGE: u8 = 0x02;
/// Register address of `POWER`.
pub const REG_POWER: u8 = 0x03;
/// Register address of `CURRENT`.
pub const REG_CURRENT: u8 = 0x04;
/// Register address of `CALIBRATION`.
pub const REG_CALIBRATION: u8 = 0x05;
/// Register address of `MASK_ENABLE`.
pub const REG_MASK_ENABLE: u8 = 0x06;
/// Register address of `ALERT_LIMIT`.
pub const REG_ALERT_LIMIT: u8 = 0x07;
/// Register address of `MANUFACTURER_ID`.
pub const REG_MANUFACTURER_ID: u8 = 0xFE;
/// Register address of `DIE_ID`.
pub const REG_DIE_ID: u8 = 0xFF;

/// Expected `MANUFACTURER_ID` value ("TI").
pub const EXPECTED_MANUFACTURER_ID: u16 = 0x5449;
/// Expected `DIE_ID` value.
pub const EXPECTED_DIE_ID: u16 = 0x2260;

/// Soft reset command written to `CONFIGURATION` (bit 15).
pub const RESET_COMMAND: u16 = 1 << 15;

/// Bitfield representation of the `CONFIGURATION` register (address `0x00`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Configuration {
    // Operating mode (bits 2:0).
    pub mode: OperatingMode,
    // Shunt voltage conversion time (bits 5:3).
    pub shunt_conversion_time: ConversionTime,
    // Bus voltage conversion time (bits 8:6).
    pub bus_conversion_time: ConversionTime,
    // Averaging depth (bits 11:9).
    pub averaging: Averaging,
    #[skip]
    __: B3,
    // Soft reset (bit 15).
    pub reset: bool,
}

impl From<u16> for Configuration {
    fn from(value: u16) -> Self {
        Self::from_bytes(value.to_le_bytes())
    }
}

impl From<Configuration> for u16 {
    fn from(value: Configuration) -> Self {
        u16::from_le_bytes(value.into_bytes())
    }
}

/// Bitfield representation of the `MASK_ENABLE` register (address `0x06`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskEnable {
    // Alert latch enable (bit 0).
    pub latch_enable: bool,
    // Alert polarity (bit 1).
    pub alert_polarity: bool,
    // Math overflow flag (bit 2).
    pub math_overflow: bool,
    // Conversion ready flag, cleared by reading this register (bit 3).
    pub conversion_ready: bool,
    // Alert function flag (bit 4).
    pub alert_function: bool,
    #[skip]
    __: B5,
    // Alert on conversion ready (bit 10).
    pub conversion_ready_alert: bool,
    // Alert on power over limit (bit 11).
    pub power_over_limit: bool,
    // Alert on bus voltage under limit (bit 12).
    pub bus_under_voltage: bool,
    // Alert on bus voltage over limit (bit 13).
    pub bus_over_voltage: bool,
    // Alert on shunt voltage under limit (bit 14).
    pub shunt_under_voltage: bool,
    // Alert on shunt voltage over limit (bit 15).
    pub shunt_over_voltage: bool,
}

impl From<u16> for MaskEnable {
    fn from(value: u16) -> Self {
        Self::from_bytes(value.to_le_bytes())
    }
}

/// Composes the configuration word written after calibration.
pub fn configuration_word(
    mode: OperatingMode,
    shunt_conversion_time: ConversionTime,
    bus_conversion_time: ConversionTime,
    averaging: Averaging,
) -> u16 {
    Configuration::new()
        .with_mode(mode)
        .with_shunt_conversion_time(shunt_conversion_time)
        .with_bus_conversion_time(bus_conversion_time)
        .with_averaging(averaging)
        .into()
}

/// Converts a bus voltage code (LSB 1.25 mV) to millivolts.
pub const fn bus_millivolts(raw: u16) -> u32 {
    raw as u32 * 125 / 100
}

/// Converts a signed shunt voltage code (LSB 2.5 µV) to microvolts.
pub const fn shunt_microvolts(raw: u16) -> i32 {
    raw as i16 as i32 * 5 / 2
}
