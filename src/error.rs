//! Error handling primitives shared by the INA226 and LTC2983 drivers.

/// Crate-wide result type alias.
pub type Result<T, E> = core::result::Result<T, Error<E>>;

/// Error variants produced by the drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Any error reported by the underlying bus (NACK, short transfer, arbitration loss).
    Bus(E),
    /// The requested configuration cannot be encoded into the device registers.
    Config(ConfigError),
    /// A status poll did not report completion within its bound.
    Timeout,
    /// Identification registers do not match the expected part.
    DeviceIdMismatch,
}

impl<E> From<E> for Error<E> {
    fn from(err: E) -> Self {
        Self::Bus(err)
    }
}

/// Setup-time configuration failures.
///
/// These are raised before any sample is taken; sampling paths never produce them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Shunt resistance of zero micro-ohms.
    ZeroShuntResistance,
    /// Full-scale current too small to yield a non-zero current LSB.
    ZeroFullScaleCurrent,
    /// Intermediate product of the calibration formula overflowed 64 bits.
    CalibrationArithmeticOverflow,
    /// Calibration value does not fit the 16-bit calibration register.
    CalibrationOverflow,
    /// Calibration value truncated to zero.
    CalibrationUnderflow,
    /// Full-scale current in microamps does not fit an `i32` reading.
    CurrentRangeOverflow,
    /// Sensor type passed to the RTD configuration path is not an RTD.
    NotAnRtd,
    /// RTD channel and its reference resistor channel are the same.
    ReferenceChannelConflict,
    /// Reference resistance does not fit the 27-bit sense-resistor field.
    SenseResistorOverflow,
    /// Multi-channel conversion requested with no channel selected.
    EmptyChannelSelection,
}
