//! Calibration resolution for the INA226 current and power registers.

use crate::error::ConfigError;

/// Current LSB numerator: the current register spans ±2^15 codes.
const CURRENT_REGISTER_CODES: u64 = 32_768;
/// `0.00512 / (current_lsb * r_shunt)` with both terms in nA and µΩ.
const CALIBRATION_NUMERATOR: u64 = 5_120_000_000_000;
/// Largest current magnitude, in microamps, a decoded reading can carry.
const MAX_CURRENT_MICRO_AMPS: u64 = i32::MAX as u64;

/// Scale factors derived from the shunt resistor and the full-scale current.
///
/// Resolved once at configuration time; every current and power decode uses
/// the truncated `current_lsb_na` so the reported values match the device's
/// own scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Calibration {
    shunt_micro_ohms: u64,
    full_scale_milli_amps: u64,
    current_lsb_na: u64,
    register: u16,
}

impl Calibration {
    /// Resolves the current LSB and the calibration register value.
    ///
    /// `current_lsb_na = full_scale_milli_amps * 1_000_000 / 32_768` and
    /// `register = 5.12e12 / (current_lsb_na * shunt_micro_ohms)`, both with
    /// integer truncation. Fails instead of truncating the register to 16 bits,
    /// and when a full-scale code would not fit an `i32` microamp reading.
    pub const fn new(
        shunt_micro_ohms: u64,
        full_scale_milli_amps: u64,
    ) -> Result<Self, ConfigError> {
        if shunt_micro_ohms == 0 {
            return Err(ConfigError::ZeroShuntResistance);
        }

        let current_lsb_na = match full_scale_milli_amps.checked_mul(1_000_000) {
            Some(scaled) => scaled / CURRENT_REGISTER_CODES,
            None => return Err(ConfigError::CalibrationArithmeticOverflow),
        };
        if current_lsb_na == 0 {
            return Err(ConfigError::ZeroFullScaleCurrent);
        }
        if CURRENT_REGISTER_CODES * current_lsb_na / 1_000 > MAX_CURRENT_MICRO_AMPS {
            return Err(ConfigError::CurrentRangeOverflow);
        }

        let divisor = match current_lsb_na.checked_mul(shunt_micro_ohms) {
            Some(divisor) => divisor,
            None => return Err(ConfigError::CalibrationArithmeticOverflow),
        };

        let register = CALIBRATION_NUMERATOR / divisor;
        if register > u16::MAX as u64 {
            return Err(ConfigError::CalibrationOverflow);
        }
        if register == 0 {
            return Err(ConfigError::CalibrationUnderflow);
        }

        Ok(Self {
            shunt_micro_ohms,
            full_scale_milli_amps,
            current_lsb_na,
            register: register as u16,
        })
    }

    /// Shunt resistance in micro-ohms.
    pub const fn shunt_micro_ohms(&self) -> u64 {
        self.shunt_micro_ohms
    }

    /// Full-scale current in milliamps.
    pub const fn full_scale_milli_amps(&self) -> u64 {
        self.full_scale_milli_amps
    }

    /// Current register LSB in nanoamps.
    pub const fn current_lsb_na(&self) -> u64 {
        self.current_lsb_na
    }

    /// Value programmed into the calibration register.
    pub const fn register_value(&self) -> u16 {
        self.register
    }

    /// Converts a raw current register code to microamps.
    ///
    /// Every code fits `i32`: `new` rejects an LSB whose full-scale reading
    /// would not.
    pub const fn current_micro_amps(&self, raw: u16) -> i32 {
        // Two's complement code; sign-extend before scaling.
        let code = raw as i16 as i64;
        (code * self.current_lsb_na as i64 / 1_000) as i32
    }

    /// Converts a raw power register code to microwatts (LSB = 25 x current LSB).
    pub const fn power_micro_watts(&self, raw: u16) -> u64 {
        raw as u64 * 25 * self.current_lsb_na / 1_000
    }
}
