//! Strongly typed field encodings of the LTC2983 channel assignment words.
//!
//! Only the RTD and sense-resistor paths are configured by this crate; the
//! remaining [`SensorType`] variants exist so every 5-bit code has a name.

use modular_bitfield::prelude::Specifier;

/// Sensor type codes, bits 31:27 of a channel assignment word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 5]
pub enum SensorType {
    /// Channel not assigned.
    Unassigned = 0,
    /// Type J thermocouple.
    ThermocoupleJ = 1,
    /// Type K thermocouple.
    ThermocoupleK = 2,
    /// Type E thermocouple.
    ThermocoupleE = 3,
    /// Type N thermocouple.
    ThermocoupleN = 4,
    /// Type R thermocouple.
    ThermocoupleR = 5,
    /// Type S thermocouple.
    ThermocoupleS = 6,
    /// Type T thermocouple.
    ThermocoupleT = 7,
    /// Type B thermocouple.
    ThermocoupleB = 8,
    /// Custom thermocouple table.
    ThermocoupleCustom = 9,
    /// PT-10 RTD.
    Pt10 = 10,
    /// PT-50 RTD.
    Pt50 = 11,
    /// PT-100 RTD.
    Pt100 = 12,
    /// PT-200 RTD.
    Pt200 = 13,
    /// PT-500 RTD.
    Pt500 = 14,
    /// PT-1000 RTD.
    Pt1000 = 15,
    /// PT-1000 with alpha = 0.00375.
    Pt1000A375 = 16,
    /// NI-120 RTD.
    Ni120 = 17,
    /// Custom RTD table.
    RtdCustom = 18,
    /// 44004/44033 2.252 kΩ thermistor.
    Thermistor44004 = 19,
    /// 44005/44030 3 kΩ thermistor.
    Thermistor44005 = 20,
    /// 44007/44034 5 kΩ thermistor.
    Thermistor44007 = 21,
    /// 44006/44031 10 kΩ thermistor.
    Thermistor44006 = 22,
    /// 44008/44032 30 kΩ thermistor.
    Thermistor44008 = 23,
    /// YSI 400 2.252 kΩ thermistor.
    ThermistorYsi400 = 24,
    /// Spectrum 1003k 1 kΩ thermistor.
    ThermistorSpectrum1003k = 25,
    /// Custom Steinhart-Hart thermistor.
    ThermistorCustomSteinhartHart = 26,
    /// Custom table thermistor.
    ThermistorCustomTable = 27,
    /// Sensing diode.
    Diode = 28,
    /// Reference sense resistor.
    SenseResistor = 29,
    /// Direct ADC reading.
    DirectAdc = 30,
    /// Reserved code.
    Reserved = 31,
}

impl SensorType {
    /// Returns `true` for the resistance-temperature-detector codes.
    pub const fn is_rtd(self) -> bool {
        let code = self as u8;
        code >= Self::Pt10 as u8 && code <= Self::RtdCustom as u8
    }
}

/// Converter input channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 5]
pub enum Channel {
    /// Channel 1.
    Ch1 = 1,
    /// Channel 2.
    Ch2 = 2,
    /// Channel 3.
    Ch3 = 3,
    /// Channel 4.
    Ch4 = 4,
    /// Channel 5.
    Ch5 = 5,
    /// Channel 6.
    Ch6 = 6,
    /// Channel 7.
    Ch7 = 7,
    /// Channel 8.
    Ch8 = 8,
    /// Channel 9.
    Ch9 = 9,
    /// Channel 10.
    Ch10 = 10,
    /// Channel 11.
    Ch11 = 11,
    /// Channel 12.
    Ch12 = 12,
    /// Channel 13.
    Ch13 = 13,
    /// Channel 14.
    Ch14 = 14,
    /// Channel 15.
    Ch15 = 15,
    /// Channel 16.
    Ch16 = 16,
    /// Channel 17.
    Ch17 = 17,
    /// Channel 18.
    Ch18 = 18,
    /// Channel 19.
    Ch19 = 19,
    /// Channel 20.
    Ch20 = 20,
}

impl Channel {
    /// Every channel in ascending order.
    pub const ALL: [Channel; 20] = [
        Self::Ch1,
        Self::Ch2,
        Self::Ch3,
        Self::Ch4,
        Self::Ch5,
        Self::Ch6,
        Self::Ch7,
        Self::Ch8,
        Self::Ch9,
        Self::Ch10,
        Self::Ch11,
        Self::Ch12,
        Self::Ch13,
        Self::Ch14,
        Self::Ch15,
        Self::Ch16,
        Self::Ch17,
        Self::Ch18,
        Self::Ch19,
        Self::Ch20,
    ];

    /// One-based channel index as printed on the datasheet.
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Looks a channel up by its one-based index.
    pub const fn from_index(index: u8) -> Option<Self> {
        if index >= 1 && index <= 20 {
            Some(Self::ALL[index as usize - 1])
        } else {
            None
        }
    }
}

/// Channel selector of a conversion command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConversionTarget {
    /// Convert one channel.
    Single(Channel),
    /// Convert the batch last written to the multi-channel mask.
    Multiple,
}

impl ConversionTarget {
    /// Value of the 5-bit channel field of the command register.
    pub const fn selector(self) -> u8 {
        match self {
            Self::Single(channel) => channel.index(),
            Self::Multiple => 0,
        }
    }
}

/// RTD wiring, bits 21:20.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum Wiring {
    /// 2-wire.
    TwoWire = 0b00,
    /// 3-wire.
    ThreeWire = 0b01,
    /// 4-wire.
    FourWire = 0b10,
    /// 4-wire with Kelvin R_SENSE.
    FourWireKelvin = 0b11,
}

/// Excitation ground mode, bits 19:18.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum ExcitationMode {
    /// Sensor grounded externally.
    GroundExternal = 0b00,
    /// Sensor grounded through the internal switch.
    GroundInternal = 0b01,
}

/// RTD excitation current, bits 17:14.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 4]
pub enum ExcitationCurrent {
    /// 5 µA.
    Ua5 = 0b0001,
    /// 10 µA.
    Ua10 = 0b0010,
    /// 25 µA.
    Ua25 = 0b0011,
    /// 50 µA.
    Ua50 = 0b0100,
    /// 100 µA.
    Ua100 = 0b0101,
    /// 250 µA.
    Ua250 = 0b0110,
    /// 500 µA.
    Ua500 = 0b0111,
    /// 1000 µA.
    Ua1000 = 0b1000,
}

impl ExcitationCurrent {
    /// Returns the excitation current in microamps.
    pub const fn micro_amps(self) -> u32 {
        match self {
            Self::Ua5 => 5,
            Self::Ua10 => 10,
            Self::Ua25 => 25,
            Self::Ua50 => 50,
            Self::Ua100 => 100,
            Self::Ua250 => 250,
            Self::Ua500 => 500,
            Self::Ua1000 => 1_000,
        }
    }
}

/// Resistance-to-temperature curve, bits 13:12.
///
/// PT-1000 (alpha 0.00375), NI-120 and custom RTDs ignore this field; use
/// [`RtdCurve::EuropeanStandard`] for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum RtdCurve {
    /// European standard, alpha = 0.00385.
    #[default]
    EuropeanStandard = 0b00,
    /// American, alpha = 0.003911.
    American = 0b01,
    /// Japanese, alpha = 0.003916.
    Japanese = 0b10,
    /// ITS-90, alpha = 0.003926.
    Its90 = 0b11,
}
