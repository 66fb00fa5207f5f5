//! Device table of the SCM ground-support instrumentation board.
//!
//! One entry per physical device; board variants differ only in this table.

use crate::ina226::params::{Averaging, ConversionTime, OperatingMode};
use crate::ina226::{Calibration, Config as Ina226Config};
use crate::ltc2983::params::{ExcitationCurrent, ExcitationMode, SensorType, Wiring};
use crate::ltc2983::{Channel, RtdChannelConfig};

/// Shunt resistor shared by the current monitors, in micro-ohms.
pub const SHUNT_MICRO_OHMS: u64 = 500_000;
/// Full-scale current of the monitored rails, in milliamps.
pub const FULL_SCALE_MILLI_AMPS: u64 = 50;

/// Calibration of the current monitors, checked at compile time.
pub const CALIBRATION: Calibration =
    match Calibration::new(SHUNT_MICRO_OHMS, FULL_SCALE_MILLI_AMPS) {
        Ok(calibration) => calibration,
        Err(_) => panic!("board shunt calibration is out of range"),
    };

/// One current monitor on the 2-wire bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CurrentMonitorSlot {
    /// Rail label.
    pub label: &'static str,
    /// 7-bit bus address.
    pub address: u8,
}

/// Current monitors of the three sensor channels.
pub const CURRENT_MONITORS: [CurrentMonitorSlot; 3] = [
    CurrentMonitorSlot { label: "CHX", address: 0x40 },
    CurrentMonitorSlot { label: "CHY", address: 0x41 },
    CurrentMonitorSlot { label: "CHZ", address: 0x44 },
];

/// Configuration applied to every current monitor.
pub fn current_monitor_config() -> Ina226Config {
    Ina226Config::new(CALIBRATION)
        .mode(OperatingMode::BothContinuous)
        .shunt_conversion_time(ConversionTime::Us140)
        .bus_conversion_time(ConversionTime::Us140)
        .averaging(Averaging::Avg16)
        .build()
}

/// Channel carrying the shared RTD sense resistor.
pub const REFERENCE_CHANNEL: Channel = Channel::Ch2;
/// Sense resistor value (3.333 kΩ) in milliohms.
pub const REFERENCE_MILLI_OHMS: u32 = 10_000_000 / 3;

/// Channels with a PT-1000 attached.
pub const RTD_CHANNELS: [Channel; 3] = [Channel::Ch4, Channel::Ch6, Channel::Ch8];

/// Definition of one of the board's RTD channels.
pub fn rtd_channel_config(channel: Channel) -> RtdChannelConfig {
    RtdChannelConfig::new(channel, SensorType::Pt1000, REFERENCE_CHANNEL, REFERENCE_MILLI_OHMS)
        .excitation_current(ExcitationCurrent::Ua250)
        .wiring(Wiring::TwoWire)
        .excitation_mode(ExcitationMode::GroundInternal)
        .build()
}

/// Definitions of every RTD channel of the board.
pub fn rtd_channel_configs() -> [RtdChannelConfig; 3] {
    RTD_CHANNELS.map(rtd_channel_config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calibration_matches_shunt_formula() {
        assert_eq!(CALIBRATION.current_lsb_na(), 1_525);
        assert_eq!(CALIBRATION.register_value(), 6_714);
        assert_eq!(current_monitor_config().register_word(), 0x0407);
    }

    #[test]
    fn monitor_addresses_are_distinct() {
        let [a, b, c] = CURRENT_MONITORS.map(|slot| slot.address);
        assert!(a != b && b != c && a != c);
    }

    #[test]
    fn every_rtd_definition_is_encodable() {
        for config in rtd_channel_configs() {
            assert_eq!(config.validate(), Ok(()));
            assert_ne!(config.channel, REFERENCE_CHANNEL);
        }
    }
}
