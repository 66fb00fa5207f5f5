//! Register map definitions for the LTC2983 multi-channel temperature converter.
#![allow(unused_parens)]

use modular_bitfield::prelude::*;

use super::params::{Channel, ExcitationCurrent, ExcitationMode, RtdCurve, SensorType, Wiring};

/// Address of the command/status register (8-bit).
pub const REG_COMMAND_STATUS: u16 = 0x000;
/// Base of the conversion result registers (32-bit, stride 4).
pub const REG_CHANNEL_DATA_BASE: u16 = 0x010;
/// Address of the multi-channel conversion mask (32-bit).
pub const REG_MULTI_CHANNEL_MASK: u16 = 0x0F4;
/// Base of the channel assignment registers (32-bit, stride 4).
pub const REG_CHANNEL_CONFIG_BASE: u16 = 0x200;

/// Command/status value meaning "conversion complete, none in progress".
pub const STATUS_DONE: u8 = 0x40;

/// Scale of the conversion result: LSB = 1/1024 °C.
pub const TEMPERATURE_LSB_DIVISOR: f32 = 1024.0;

/// Maximum value of the 27-bit sense-resistor field.
pub const SENSE_RESISTOR_MAX: u32 = (1 << 27) - 1;

/// Address of a per-channel register in the bank starting at `base`.
///
/// Channel 1 sits at `base`, each following channel four bytes higher.
pub const fn channel_address(base: u16, channel: Channel) -> u16 {
    base - 4 + channel.index() as u16 * 4
}

/// Address of a channel's assignment register.
pub const fn config_address(channel: Channel) -> u16 {
    channel_address(REG_CHANNEL_CONFIG_BASE, channel)
}

/// Address of a channel's conversion result register.
pub const fn data_address(channel: Channel) -> u16 {
    channel_address(REG_CHANNEL_DATA_BASE, channel)
}

/// Bitfield representation of the command/status register (address `0x000`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandStatus {
    // Channel selector, 0 for the multi-channel batch (bits 4:0).
    pub channel: B5,
    #[skip]
    __: B1,
    // Conversion done (bit 6).
    pub done: bool,
    // Start conversion / conversion in progress (bit 7).
    pub start: bool,
}

impl From<u8> for CommandStatus {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<CommandStatus> for u8 {
    fn from(value: CommandStatus) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of an RTD channel assignment word.
///
/// A word read back from an unassigned channel holds zero in the channel and
/// current fields, which no variant names. Decode device data with the
/// `*_or_err` getters; the plain getters panic on those patterns.
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RtdAssignment {
    #[skip]
    __: B12,
    // Curve selection (bits 13:12).
    pub curve: RtdCurve,
    // Excitation current (bits 17:14).
    pub excitation_current: ExcitationCurrent,
    // Excitation ground mode (bits 19:18).
    pub excitation_mode: ExcitationMode,
    // Wiring (bits 21:20).
    pub wiring: Wiring,
    // Sense resistor channel (bits 26:22).
    pub reference_channel: Channel,
    // Sensor type (bits 31:27).
    pub sensor_type: SensorType,
}

impl From<u32> for RtdAssignment {
    fn from(value: u32) -> Self {
        Self::from_bytes(value.to_le_bytes())
    }
}

impl From<RtdAssignment> for u32 {
    fn from(value: RtdAssignment) -> Self {
        u32::from_le_bytes(value.into_bytes())
    }
}

/// Bitfield representation of a sense-resistor channel assignment word.
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SenseResistorAssignment {
    // Resistance field (bits 26:0).
    pub value: B27,
    // Sensor type, always `SenseResistor` (bits 31:27).
    pub sensor_type: SensorType,
}

impl From<u32> for SenseResistorAssignment {
    fn from(value: u32) -> Self {
        Self::from_bytes(value.to_le_bytes())
    }
}

impl From<SenseResistorAssignment> for u32 {
    fn from(value: SenseResistorAssignment) -> Self {
        u32::from_le_bytes(value.into_bytes())
    }
}

/// Bitfield representation of a conversion result register.
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionData {
    // Signed result, LSB = 1/1024 °C (bits 23:0).
    pub value: B24,
    // Result valid (bit 24).
    pub valid: bool,
    // ADC out of range (bit 25).
    pub adc_out_of_range: bool,
    // Sensor under range (bit 26).
    pub sensor_under_range: bool,
    // Sensor over range (bit 27).
    pub sensor_over_range: bool,
    // Cold junction soft fault (bit 28).
    pub cj_soft_fault: bool,
    // Cold junction hard fault (bit 29).
    pub cj_hard_fault: bool,
    // ADC hard fault (bit 30).
    pub adc_hard_fault: bool,
    // Sensor hard fault (bit 31).
    pub sensor_hard_fault: bool,
}

impl From<u32> for ConversionData {
    fn from(value: u32) -> Self {
        Self::from_bytes(value.to_le_bytes())
    }
}

/// Sign-extends the 24-bit result field of a data register value.
///
/// The upper byte (fault flags) is ignored.
pub const fn sign_extend_24(raw: u32) -> i32 {
    ((raw << 8) as i32) >> 8
}

/// Decodes a data register value into degrees Celsius.
pub fn decode_temperature_celsius(raw: u32) -> f32 {
    sign_extend_24(raw) as f32 / TEMPERATURE_LSB_DIVISOR
}

/// Encodes the 27-bit sense-resistor field from a resistance in milliohms.
///
/// The field is `milli_ohms * 1000 / 1024`, computed without intermediate
/// overflow. Returns `None` when the result does not fit 27 bits.
pub const fn sense_resistor_field(milli_ohms: u32) -> Option<u32> {
    let field = milli_ohms as u64 * 1_000 / 1_024;
    if field > SENSE_RESISTOR_MAX as u64 {
        None
    } else {
        Some(field as u32)
    }
}

/// Bit set for `channel` in the multi-channel mask.
pub const fn multi_channel_bit(channel: Channel) -> u32 {
    1 << (channel.index() - 1)
}
