//! Channel assignment and multi-channel selection for the LTC2983.

use super::params::{Channel, ExcitationCurrent, ExcitationMode, RtdCurve, SensorType, Wiring};
use super::registers::{
    multi_channel_bit, sense_resistor_field, RtdAssignment, SenseResistorAssignment,
};
use crate::error::ConfigError;

/// Definition of one RTD input and the sense resistor it is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RtdChannelConfig {
    /// Channel the RTD is connected to.
    pub channel: Channel,
    /// RTD type; must satisfy [`SensorType::is_rtd`].
    pub sensor_type: SensorType,
    /// Channel the sense resistor is connected to.
    pub reference_channel: Channel,
    /// Sense resistor value in milliohms.
    pub reference_milli_ohms: u32,
    /// Sensor wiring.
    pub wiring: Wiring,
    /// Excitation ground mode.
    pub excitation_mode: ExcitationMode,
    /// Excitation current level.
    pub excitation_current: ExcitationCurrent,
    /// Resistance-to-temperature curve.
    pub curve: RtdCurve,
}

impl RtdChannelConfig {
    /// Begins building a channel definition.
    pub fn new(
        channel: Channel,
        sensor_type: SensorType,
        reference_channel: Channel,
        reference_milli_ohms: u32,
    ) -> RtdChannelConfigBuilder {
        RtdChannelConfigBuilder::new(channel, sensor_type, reference_channel, reference_milli_ohms)
    }

    /// Checks that the definition can be encoded.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.encode().map(|_| ())
    }

    /// Encodes the RTD assignment word and the sense-resistor assignment word.
    pub fn encode(&self) -> Result<(u32, u32), ConfigError> {
        if !self.sensor_type.is_rtd() {
            return Err(ConfigError::NotAnRtd);
        }
        if self.reference_channel == self.channel {
            return Err(ConfigError::ReferenceChannelConflict);
        }
        let resistance = sense_resistor_field(self.reference_milli_ohms)
            .ok_or(ConfigError::SenseResistorOverflow)?;

        let rtd = RtdAssignment::new()
            .with_sensor_type(self.sensor_type)
            .with_reference_channel(self.reference_channel)
            .with_wiring(self.wiring)
            .with_excitation_mode(self.excitation_mode)
            .with_excitation_current(self.excitation_current)
            .with_curve(self.curve);
        let sense = SenseResistorAssignment::new()
            .with_sensor_type(SensorType::SenseResistor)
            .with_value(resistance);

        Ok((rtd.into(), sense.into()))
    }
}

/// Builder for [`RtdChannelConfig`].
#[derive(Debug, Clone, Copy)]
pub struct RtdChannelConfigBuilder {
    config: RtdChannelConfig,
}

impl RtdChannelConfigBuilder {
    /// Creates a builder for a 2-wire, internally grounded RTD at 100 µA on the European curve.
    pub fn new(
        channel: Channel,
        sensor_type: SensorType,
        reference_channel: Channel,
        reference_milli_ohms: u32,
    ) -> Self {
        Self {
            config: RtdChannelConfig {
                channel,
                sensor_type,
                reference_channel,
                reference_milli_ohms,
                wiring: Wiring::TwoWire,
                excitation_mode: ExcitationMode::GroundInternal,
                excitation_current: ExcitationCurrent::Ua100,
                curve: RtdCurve::EuropeanStandard,
            },
        }
    }

    /// Overrides the wiring.
    pub fn wiring(mut self, wiring: Wiring) -> Self {
        self.config.wiring = wiring;
        self
    }

    /// Overrides the excitation ground mode.
    pub fn excitation_mode(mut self, mode: ExcitationMode) -> Self {
        self.config.excitation_mode = mode;
        self
    }

    /// Overrides the excitation current.
    pub fn excitation_current(mut self, current: ExcitationCurrent) -> Self {
        self.config.excitation_current = current;
        self
    }

    /// Overrides the curve.
    pub fn curve(mut self, curve: RtdCurve) -> Self {
        self.config.curve = curve;
        self
    }

    /// Finalizes the builder and returns the [`RtdChannelConfig`].
    pub fn build(self) -> RtdChannelConfig {
        self.config
    }
}

/// Set of channels converted by one multi-channel command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelSelection(u32);

impl ChannelSelection {
    /// Builds a selection from a list of channels; duplicates are merged.
    pub fn from_channels(channels: &[Channel]) -> Self {
        Self(channels.iter().fold(0, |mask, &channel| mask | multi_channel_bit(channel)))
    }

    /// Mask written to the multi-channel register, bit `n - 1` for channel `n`.
    pub const fn bits(&self) -> u32 {
        self.0
    }

    /// Returns `true` when no channel is selected.
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Returns `true` when `channel` is part of the selection.
    pub const fn contains(&self, channel: Channel) -> bool {
        self.0 & multi_channel_bit(channel) != 0
    }

    /// Iterates over the selected channels in ascending order.
    pub fn channels(&self) -> impl Iterator<Item = Channel> + '_ {
        Channel::ALL.into_iter().filter(move |&channel| self.contains(channel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ltc2983::registers::RtdAssignment;

    fn board_rtd() -> RtdChannelConfig {
        RtdChannelConfig::new(Channel::Ch4, SensorType::Pt1000, Channel::Ch2, 10_000_000 / 3)
            .excitation_current(ExcitationCurrent::Ua250)
            .build()
    }

    #[test]
    fn encoded_rtd_word_decodes_back_to_inputs() {
        let config = RtdChannelConfig::new(Channel::Ch7, SensorType::Pt100, Channel::Ch5, 2_000_000)
            .wiring(Wiring::FourWireKelvin)
            .excitation_mode(ExcitationMode::GroundExternal)
            .excitation_current(ExcitationCurrent::Ua500)
            .curve(RtdCurve::Its90)
            .build();

        let (word, _) = config.encode().unwrap();
        let decoded = RtdAssignment::from(word);
        assert_eq!(decoded.sensor_type(), SensorType::Pt100);
        assert_eq!(decoded.reference_channel(), Channel::Ch5);
        assert_eq!(decoded.wiring(), Wiring::FourWireKelvin);
        assert_eq!(decoded.excitation_mode(), ExcitationMode::GroundExternal);
        assert_eq!(decoded.excitation_current(), ExcitationCurrent::Ua500);
        assert_eq!(decoded.curve(), RtdCurve::Its90);
        assert_eq!(word & 0xFFF, 0);
    }

    #[test]
    fn encoding_matches_shift_formula() {
        let config =
            RtdChannelConfig::new(Channel::Ch8, SensorType::Pt1000A375, Channel::Ch12, 1_000_000)
                .wiring(Wiring::ThreeWire)
                .excitation_mode(ExcitationMode::GroundInternal)
                .excitation_current(ExcitationCurrent::Ua10)
                .curve(RtdCurve::American)
                .build();

        let (rtd, sense) = config.encode().unwrap();
        assert_eq!(rtd, 16 << 27 | 12 << 22 | 1 << 20 | 1 << 18 | 2 << 14 | 1 << 12);
        assert_eq!(sense, 29 << 27 | (1_000_000 * 1_000 / 1_024));
    }

    #[test]
    fn board_sense_resistor_word() {
        let (rtd, sense) = board_rtd().encode().unwrap();
        assert_eq!(rtd, 0x7885_8000);
        assert_eq!(sense, (29 << 27) | 3_255_208);
    }

    #[test]
    fn invalid_definitions_are_rejected() {
        let thermistor =
            RtdChannelConfig { sensor_type: SensorType::Thermistor44006, ..board_rtd() };
        assert_eq!(thermistor.validate(), Err(ConfigError::NotAnRtd));

        let self_referenced = RtdChannelConfig { reference_channel: Channel::Ch4, ..board_rtd() };
        assert_eq!(self_referenced.validate(), Err(ConfigError::ReferenceChannelConflict));

        let huge = RtdChannelConfig { reference_milli_ohms: 200_000_000, ..board_rtd() };
        assert_eq!(huge.validate(), Err(ConfigError::SenseResistorOverflow));
    }

    #[test]
    fn selection_of_board_channels() {
        let selection =
            ChannelSelection::from_channels(&[Channel::Ch4, Channel::Ch6, Channel::Ch8]);
        assert_eq!(selection.bits(), 0xA8);
        assert!(selection.contains(Channel::Ch6));
        assert!(!selection.contains(Channel::Ch5));
        assert!(selection.channels().eq([Channel::Ch4, Channel::Ch6, Channel::Ch8]));
    }

    #[test]
    fn duplicate_channels_are_merged_and_empty_is_detected() {
        let selection =
            ChannelSelection::from_channels(&[Channel::Ch1, Channel::Ch1, Channel::Ch20]);
        assert_eq!(selection.bits(), 0x8_0001);
        assert!(ChannelSelection::from_channels(&[]).is_empty());
    }
}
