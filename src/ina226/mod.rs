//! TI INA226 current/power monitor on the 2-wire bus.
//!
//! The shunt resistor and full-scale current are resolved once into a
//! [`Calibration`]; the resulting current LSB scales every subsequent
//! current and power read.

pub mod calibration;
pub mod config;
pub mod device;
pub mod params;
pub mod registers;

pub use self::calibration::Calibration;
pub use self::config::{Config, ConfigBuilder};
pub use self::device::Ina226;
