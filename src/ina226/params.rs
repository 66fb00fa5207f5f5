//! Strongly typed field encodings of the INA226 configuration register.
//!
//! ```rust
//! use gse_sensors::ina226::params::{Averaging, ConversionTime, OperatingMode};
//!
//! let mode = OperatingMode::BothContinuous;
//! assert!(mode.is_continuous());
//! assert_eq!(ConversionTime::Us1100.micros(), 1_100);
//! assert_eq!(Averaging::Avg16.samples(), 16);
//! ```

use modular_bitfield::prelude::Specifier;

/// Operating modes encoded in `CONFIG[2:0]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 3]
pub enum OperatingMode {
    /// Power-down.
    PowerDown = 0b000,
    /// Single-shot shunt voltage conversion.
    ShuntTriggered = 0b001,
    /// Single-shot bus voltage conversion.
    BusTriggered = 0b010,
    /// Single-shot shunt and bus conversion.
    BothTriggered = 0b011,
    /// Power-down (alias encoding).
    PowerDownAlt = 0b100,
    /// Continuous shunt voltage conversions.
    ShuntContinuous = 0b101,
    /// Continuous bus voltage conversions.
    BusContinuous = 0b110,
    /// Continuous shunt and bus conversions.
    BothContinuous = 0b111,
}

impl OperatingMode {
    /// Returns `true` for the free-running modes.
    pub const fn is_continuous(self) -> bool {
        matches!(
            self,
            Self::ShuntContinuous | Self::BusContinuous | Self::BothContinuous
        )
    }

    /// Returns `true` for the single-shot modes.
    pub const fn is_triggered(self) -> bool {
        matches!(
            self,
            Self::ShuntTriggered | Self::BusTriggered | Self::BothTriggered
        )
    }
}

/// Conversion time selections for `VSHCT` and `VBUSCT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 3]
pub enum ConversionTime {
    /// 140 µs.
    Us140 = 0b000,
    /// 204 µs.
    Us204 = 0b001,
    /// 332 µs.
    Us332 = 0b010,
    /// 588 µs.
    Us588 = 0b011,
    /// 1.1 ms.
    Us1100 = 0b100,
    /// 2.116 ms.
    Us2116 = 0b101,
    /// 4.156 ms.
    Us4156 = 0b110,
    /// 8.244 ms.
    Us8244 = 0b111,
}

impl ConversionTime {
    /// Returns the conversion time in microseconds.
    pub const fn micros(self) -> u32 {
        match self {
            Self::Us140 => 140,
            Self::Us204 => 204,
            Self::Us332 => 332,
            Self::Us588 => 588,
            Self::Us1100 => 1_100,
            Self::Us2116 => 2_116,
            Self::Us4156 => 4_156,
            Self::Us8244 => 8_244,
        }
    }
}

/// Averaging depths encoded in `CONFIG[11:9]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 3]
pub enum Averaging {
    /// 1 sample.
    Avg1 = 0b000,
    /// 4 samples.
    Avg4 = 0b001,
    /// 16 samples.
    Avg16 = 0b010,
    /// 64 samples.
    Avg64 = 0b011,
    /// 128 samples.
    Avg128 = 0b100,
    /// 256 samples.
    Avg256 = 0b101,
    /// 512 samples.
    Avg512 = 0b110,
    /// 1024 samples.
    Avg1024 = 0b111,
}

impl Averaging {
    /// Number of samples averaged per reported value.
    pub const fn samples(self) -> u32 {
        match self {
            Self::Avg1 => 1,
            Self::Avg4 => 4,
            Self::Avg16 => 16,
            Self::Avg64 => 64,
            Self::Avg128 => 128,
            Self::Avg256 => 256,
            Self::Avg512 => 512,
            Self::Avg1024 => 1_024,
        }
    }
}
