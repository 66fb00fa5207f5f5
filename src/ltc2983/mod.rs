//! Analog Devices LTC2983 multi-channel temperature converter on the 4-wire bus.

pub mod channel;
pub mod device;
pub mod params;
pub mod registers;

pub use self::channel::{ChannelSelection, RtdChannelConfig, RtdChannelConfigBuilder};
pub use self::device::{Faults, Ltc2983, Reading, StatusSnapshot};
pub use self::params::{Channel, ConversionTarget};
