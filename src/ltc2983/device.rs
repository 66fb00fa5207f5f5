//! High-level LTC2983 device driver implementation.
//!
//! Conversions follow trigger → wait → read. Reading a result register
//! before a status poll reported completion is allowed: the device returns
//! the previous or a partially updated result, which the driver passes on
//! (with a warning in the log) instead of failing.

use embedded_hal::delay::DelayNs;
use embedded_hal::spi::SpiDevice;

use super::channel::{ChannelSelection, RtdChannelConfig};
use super::params::{Channel, ConversionTarget};
use super::registers::{
    config_address,
    data_address,
    decode_temperature_celsius,
    sign_extend_24,
    CommandStatus,
    ConversionData,
    REG_COMMAND_STATUS,
    REG_MULTI_CHANNEL_MASK,
};
use crate::conversion::{poll_until, ConversionState, PollPolicy};
use crate::error::{ConfigError, Error, Result};
use crate::interface::spi::SpiInterface;
use crate::interface::RegisterInterface;

/// High-level synchronous driver for the LTC2983.
pub struct Ltc2983<IFACE> {
    interface: IFACE,
    selection: ChannelSelection,
    state: ConversionState,
}

/// Decoded view of the command/status register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSnapshot {
    /// Bit 7: a conversion is in progress.
    pub start: bool,
    /// Bit 6: the last conversion has completed.
    pub done: bool,
    /// Bits 4:0: channel selector of the last command.
    pub channel: u8,
}

impl StatusSnapshot {
    /// Builds a snapshot from the raw register bitfield.
    pub fn from_register(status: CommandStatus) -> Self {
        Self {
            start: status.start(),
            done: status.done(),
            channel: status.channel(),
        }
    }

    /// Returns `true` once the device reports done with no conversion in progress.
    pub fn is_complete(&self) -> bool {
        self.done && !self.start
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for StatusSnapshot {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "StatusSnapshot {{ START: {}, DONE: {}, CHANNEL: {} }}",
            self.start,
            self.done,
            self.channel
        );
    }
}

/// Fault byte of a conversion result register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Faults {
    /// Sensor open, shorted or otherwise unusable.
    pub sensor_hard_fault: bool,
    /// ADC reading unusable.
    pub adc_hard_fault: bool,
    /// Cold-junction sensor hard fault.
    pub cj_hard_fault: bool,
    /// Cold-junction sensor out of its valid range.
    pub cj_soft_fault: bool,
    /// Sensor reading above its normal range.
    pub sensor_over_range: bool,
    /// Sensor reading below its normal range.
    pub sensor_under_range: bool,
    /// ADC input beyond its normal range.
    pub adc_out_of_range: bool,
    /// The device flagged the result as valid.
    pub valid: bool,
}

impl Faults {
    fn from_register(data: ConversionData) -> Self {
        Self {
            sensor_hard_fault: data.sensor_hard_fault(),
            adc_hard_fault: data.adc_hard_fault(),
            cj_hard_fault: data.cj_hard_fault(),
            cj_soft_fault: data.cj_soft_fault(),
            sensor_over_range: data.sensor_over_range(),
            sensor_under_range: data.sensor_under_range(),
            adc_out_of_range: data.adc_out_of_range(),
            valid: data.valid(),
        }
    }

    /// Returns `true` when any hard fault is set; the temperature is meaningless then.
    pub fn is_hard_fault(&self) -> bool {
        self.sensor_hard_fault || self.adc_hard_fault || self.cj_hard_fault
    }
}

/// One decoded conversion result.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    /// Sign-extended 24-bit result code, LSB = 1/1024 °C.
    pub code: i32,
    /// Decoded temperature in degrees Celsius.
    pub celsius: f32,
    /// Fault flags reported alongside the result.
    pub faults: Faults,
}

impl Reading {
    /// Splits a raw data register value into result and fault flags.
    pub fn from_raw(raw: u32) -> Self {
        Self {
            code: sign_extend_24(raw),
            celsius: decode_temperature_celsius(raw),
            faults: Faults::from_register(ConversionData::from(raw)),
        }
    }
}

impl<IFACE> Ltc2983<IFACE> {
    // ==================================================================
    // == Driver Construction & Ownership ===============================
    // ==================================================================
    /// Creates a new driver instance from the provided bus interface.
    pub fn new(interface: IFACE) -> Self {
        Self {
            interface,
            selection: ChannelSelection::default(),
            state: ConversionState::Idle,
        }
    }

    /// Consumes the driver and returns the owned interface.
    pub fn release(self) -> IFACE {
        self.interface
    }

    /// Provides mutable access to the underlying interface.
    pub fn interface_mut(&mut self) -> &mut IFACE {
        &mut self.interface
    }

    /// Returns the state of the most recent conversion batch.
    pub fn conversion_state(&self) -> ConversionState {
        self.state
    }

    /// Returns the batch last written to the multi-channel mask.
    pub fn selection(&self) -> ChannelSelection {
        self.selection
    }
}

impl<SPI> Ltc2983<SpiInterface<SPI>>
where
    SPI: SpiDevice,
{
    /// Convenience constructor for SPI transports.
    pub fn new_spi(spi: SPI) -> Self {
        Self::new(SpiInterface::new(spi))
    }

    /// Releases the driver, returning the SPI device.
    pub fn release_spi(self) -> SPI {
        self.release().release()
    }
}

impl<IFACE, CommE> Ltc2983<IFACE>
where
    IFACE: RegisterInterface<Address = u16, Error = CommE>,
{
    // ==================================================================
    // == Initialization & Channel Configuration ========================
    // ==================================================================
    /// Waits until the device has finished its power-up initialization.
    pub fn init(&mut self, delay: &mut impl DelayNs, policy: PollPolicy) -> Result<(), CommE> {
        poll_until(delay, policy, || self.read_status().map(|status| status.is_complete()))?;
        self.state = ConversionState::Idle;
        Ok(())
    }

    /// Writes the RTD channel assignment followed by its sense resistor assignment.
    ///
    /// The definition is validated before any bus traffic.
    pub fn configure_rtd_channel(&mut self, config: &RtdChannelConfig) -> Result<(), CommE> {
        let (rtd, sense) = config.encode().map_err(Error::Config)?;

        debug!(
            "ltc2983: channel {} rtd {=u32:#x}, sense channel {} {=u32:#x}",
            config.channel.index(),
            rtd,
            config.reference_channel.index(),
            sense
        );
        self.interface.write_register(config_address(config.channel), rtd)?;
        self.interface
            .write_register(config_address(config.reference_channel), sense)?;
        Ok(())
    }

    /// Writes the multi-channel mask converted by [`ConversionTarget::Multiple`].
    pub fn configure_multi_channel(&mut self, channels: &[Channel]) -> Result<(), CommE> {
        let selection = ChannelSelection::from_channels(channels);
        if selection.is_empty() {
            return Err(Error::Config(ConfigError::EmptyChannelSelection));
        }

        self.interface
            .write_register(REG_MULTI_CHANNEL_MASK, selection.bits())?;
        self.selection = selection;
        Ok(())
    }

    // ==================================================================
    // == Conversion Control ============================================
    // ==================================================================
    /// Starts a conversion of one channel or of the configured batch.
    pub fn trigger(&mut self, target: ConversionTarget) -> Result<(), CommE> {
        if target == ConversionTarget::Multiple && self.selection.is_empty() {
            return Err(Error::Config(ConfigError::EmptyChannelSelection));
        }

        let command = CommandStatus::new()
            .with_start(true)
            .with_channel(target.selector());
        trace!("ltc2983: start conversion {=u8:#x}", u8::from(command));
        self.interface
            .write_register(REG_COMMAND_STATUS, u8::from(command))?;
        self.state = ConversionState::Triggered;
        Ok(())
    }

    /// Reads the raw command/status byte.
    pub fn poll_status(&mut self) -> Result<u8, CommE> {
        self.interface
            .read_register(REG_COMMAND_STATUS)
            .map_err(Error::from)
    }

    /// Reads and decodes the command/status register.
    pub fn read_status(&mut self) -> Result<StatusSnapshot, CommE> {
        let raw = self.poll_status()?;
        Ok(StatusSnapshot::from_register(CommandStatus::from(raw)))
    }

    /// Polls the status register until the conversion completes or `policy` is exhausted.
    pub fn wait_for_conversion(
        &mut self,
        delay: &mut impl DelayNs,
        policy: PollPolicy,
    ) -> Result<(), CommE> {
        poll_until(delay, policy, || self.read_status().map(|status| status.is_complete()))?;
        self.state = ConversionState::Done;
        Ok(())
    }

    // ==================================================================
    // == Data Acquisition ==============================================
    // ==================================================================
    /// Reads a channel's 32-bit result register unmodified.
    ///
    /// The low 24 bits hold the signed result, the high 8 bits the fault flags.
    pub fn read_raw_code(&mut self, channel: Channel) -> Result<u32, CommE> {
        if self.state != ConversionState::Done {
            warn!("ltc2983: channel {} read before conversion completed", channel.index());
        }
        self.interface
            .read_register(data_address(channel))
            .map_err(Error::from)
    }

    /// Reads a channel's result and decodes it to degrees Celsius, ignoring fault flags.
    pub fn read_temperature(&mut self, channel: Channel) -> Result<f32, CommE> {
        let raw = self.read_raw_code(channel)?;
        Ok(decode_temperature_celsius(raw))
    }

    /// Reads a channel's result with its fault flags.
    pub fn read_reading(&mut self, channel: Channel) -> Result<Reading, CommE> {
        let raw = self.read_raw_code(channel)?;
        Ok(Reading::from_raw(raw))
    }

    /// Triggers a single-channel conversion, waits for it and reads the result.
    pub fn measure(
        &mut self,
        channel: Channel,
        delay: &mut impl DelayNs,
        policy: PollPolicy,
    ) -> Result<Reading, CommE> {
        self.trigger(ConversionTarget::Single(channel))?;
        self.wait_for_conversion(delay, policy)?;
        self.read_reading(channel)
    }
}
