//! `#![no_std]` register-level drivers for the sensor chips of the SCM
//! ground-support instrumentation board: the TI INA226 current/voltage
//! monitor and the Analog Devices LTC2983 multi-channel temperature converter.
#![cfg_attr(not(test), no_std)]

#[macro_use]
mod log;

mod error;

pub mod board;
pub mod conversion;
pub mod ina226;
pub mod interface;
pub mod ltc2983;

#[cfg(test)]
mod test_support;

pub use crate::conversion::{ConversionState, PollPolicy};
pub use crate::error::{ConfigError, Error, Result};
pub use crate::ina226::Ina226;
pub use crate::ltc2983::Ltc2983;
