//! High-level INA226 device driver implementation.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use super::config::Config;
use super::registers::{
    bus_millivolts,
    shunt_microvolts,
    MaskEnable,
    EXPECTED_DIE_ID,
    EXPECTED_MANUFACTURER_ID,
    REG_BUS_VOLTAGE,
    REG_CALIBRATION,
    REG_CONFIGURATION,
    REG_CURRENT,
    REG_DIE_ID,
    REG_MANUFACTURER_ID,
    REG_MASK_ENABLE,
    REG_POWER,
    REG_SHUNT_VOLTAGE,
    RESET_COMMAND,
};
use crate::conversion::{poll_until, ConversionState, PollPolicy};
use crate::error::{Error, Result};
use crate::interface::i2c::I2cInterface;
use crate::interface::RegisterInterface;

// Time the device needs to come out of a soft reset (milliseconds).
const RESET_SETTLE_MS: u32 = 10;

/// High-level synchronous driver for one INA226 current/power monitor.
pub struct Ina226<IFACE> {
    interface: IFACE,
    config: Config,
    state: ConversionState,
}

impl<IFACE> Ina226<IFACE> {
    // ==================================================================
    // == Driver Construction & Ownership ===============================
    // ==================================================================
    /// Creates a new driver instance from the provided bus interface.
    pub fn new(interface: IFACE, config: Config) -> Self {
        Self {
            interface,
            config,
            state: ConversionState::Idle,
        }
    }

    /// Consumes the driver and returns the owned interface.
    pub fn release(self) -> (IFACE, Config) {
        (self.interface, self.config)
    }

    /// Provides mutable access to the underlying interface.
    pub fn interface_mut(&mut self) -> &mut IFACE {
        &mut self.interface
    }

    /// Returns a shared reference to the active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the state of the most recent conversion request.
    pub fn conversion_state(&self) -> ConversionState {
        self.state
    }
}

impl<I2C, D> Ina226<I2cInterface<I2C, D>>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Convenience constructor for the device at the 7-bit `address`.
    ///
    /// `delay` provides the settling wait after each bus transaction.
    pub fn new_i2c(i2c: I2C, address: u8, delay: D, config: Config) -> Self {
        Self::new(I2cInterface::new(i2c, address, delay), config)
    }

    /// Releases the driver, returning the bus, the settling delay and the configuration.
    pub fn release_i2c(self) -> (I2C, D, Config) {
        let (iface, config) = self.release();
        let (i2c, delay) = iface.release();
        (i2c, delay, config)
    }
}

impl<IFACE, CommE> Ina226<IFACE>
where
    IFACE: RegisterInterface<Address = u8, Error = CommE>,
{
    // ==================================================================
    // == Initialization & Configuration ================================
    // ==================================================================
    /// Programs the device with the configuration given at construction.
    pub fn init(&mut self, delay: &mut impl DelayNs) -> Result<(), CommE> {
        self.configure(self.config, delay)
    }

    /// Soft-resets the device, then writes calibration and configuration.
    ///
    /// In continuous modes the device free-runs afterwards and every read
    /// returns the most recent completed conversion. In single-shot modes this
    /// starts the first conversion.
    pub fn configure(&mut self, config: Config, delay: &mut impl DelayNs) -> Result<(), CommE> {
        self.reset()?;
        delay.delay_ms(RESET_SETTLE_MS);

        let calibration = config.calibration.register_value();
        debug!("ina226: calibration register {=u16:#x}", calibration);
        self.interface.write_register(REG_CALIBRATION, calibration)?;
        self.interface
            .write_register(REG_CONFIGURATION, config.register_word())?;

        self.config = config;
        self.state = if config.mode.is_triggered() {
            ConversionState::Triggered
        } else {
            ConversionState::Idle
        };
        Ok(())
    }

    /// Issues a soft reset; all registers return to their power-on values.
    pub fn reset(&mut self) -> Result<(), CommE> {
        debug!("ina226: soft reset");
        self.interface
            .write_register(REG_CONFIGURATION, RESET_COMMAND)
            .map_err(Error::from)
    }

    // ==================================================================
    // == Identification ================================================
    // ==================================================================
    /// Verifies the manufacturer and die identification registers.
    pub fn check_ids(&mut self) -> Result<(), CommE> {
        let manufacturer: u16 = self.interface.read_register(REG_MANUFACTURER_ID)?;
        let die: u16 = self.interface.read_register(REG_DIE_ID)?;

        if manufacturer != EXPECTED_MANUFACTURER_ID || die != EXPECTED_DIE_ID {
            return Err(Error::DeviceIdMismatch);
        }
        Ok(())
    }

    // ==================================================================
    // == Conversion Control ============================================
    // ==================================================================
    /// Starts a new conversion by rewriting the configuration register.
    ///
    /// Single-shot modes perform one conversion; continuous modes restart
    /// their cycle.
    pub fn trigger(&mut self) -> Result<(), CommE> {
        trace!("ina226: trigger");
        self.interface
            .write_register(REG_CONFIGURATION, self.config.register_word())?;
        self.state = ConversionState::Triggered;
        Ok(())
    }

    /// Reads the conversion-ready flag. Reading clears the flag on the device.
    pub fn is_conversion_ready(&mut self) -> Result<bool, CommE> {
        let raw: u16 = self.interface.read_register(REG_MASK_ENABLE)?;
        Ok(MaskEnable::from(raw).conversion_ready())
    }

    /// Polls the conversion-ready flag within the bounds of `policy`.
    pub fn wait_for_conversion(
        &mut self,
        delay: &mut impl DelayNs,
        policy: PollPolicy,
    ) -> Result<(), CommE> {
        poll_until(delay, policy, || self.is_conversion_ready())?;
        self.state = ConversionState::Done;
        Ok(())
    }

    // ==================================================================
    // == Data Acquisition ==============================================
    // ==================================================================
    /// Reads a raw 16-bit register code.
    pub fn read_raw(&mut self, register: u8) -> Result<u16, CommE> {
        self.interface.read_register(register).map_err(Error::from)
    }

    /// Reads the current register and scales it to microamps.
    pub fn read_current_micro_amps(&mut self) -> Result<i32, CommE> {
        let raw = self.read_raw(REG_CURRENT)?;
        Ok(self.config.calibration.current_micro_amps(raw))
    }

    /// Reads the bus voltage register and scales it to millivolts.
    pub fn read_bus_millivolts(&mut self) -> Result<u32, CommE> {
        let raw = self.read_raw(REG_BUS_VOLTAGE)?;
        Ok(bus_millivolts(raw))
    }

    /// Reads the shunt voltage register and scales it to microvolts.
    pub fn read_shunt_microvolts(&mut self) -> Result<i32, CommE> {
        let raw = self.read_raw(REG_SHUNT_VOLTAGE)?;
        Ok(shunt_microvolts(raw))
    }

    /// Reads the power register and scales it to microwatts.
    pub fn read_power_micro_watts(&mut self) -> Result<u64, CommE> {
        let raw = self.read_raw(REG_POWER)?;
        Ok(self.config.calibration.power_micro_watts(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::Ina226;
    use crate::conversion::{ConversionState, PollPolicy};
    use crate::error::Error;
    use crate::ina226::calibration::Calibration;
    use crate::ina226::config::Config;
    use crate::ina226::params::{Averaging, ConversionTime, OperatingMode};
    use crate::test_support::RecordingDelay;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    const ADDR: u8 = 0x40;

    fn board_config() -> Config {
        Config::new(Calibration::new(500_000, 50).unwrap())
            .mode(OperatingMode::BothContinuous)
            .shunt_conversion_time(ConversionTime::Us140)
            .bus_conversion_time(ConversionTime::Us140)
            .averaging(Averaging::Avg16)
            .build()
    }

    fn read_word(register: u8, value: u16) -> [I2cTransaction; 2] {
        [
            I2cTransaction::write(ADDR, vec![register]),
            I2cTransaction::read(ADDR, value.to_be_bytes().to_vec()),
        ]
    }

    #[test]
    fn configure_resets_waits_then_programs_calibration_and_config() {
        let expectations = [
            I2cTransaction::write(ADDR, vec![0x00, 0x80, 0x00]),
            I2cTransaction::write(ADDR, vec![0x05, 0x1A, 0x3A]),
            I2cTransaction::write(ADDR, vec![0x00, 0x04, 0x07]),
        ];
        let mut ina = Ina226::new_i2c(
            I2cMock::new(&expectations),
            ADDR,
            RecordingDelay::new(),
            board_config(),
        );
        let mut delay = RecordingDelay::new();

        ina.init(&mut delay).unwrap();

        assert_eq!(delay.calls_us(), vec![10_000]);
        assert_eq!(ina.conversion_state(), ConversionState::Idle);
        let (mut i2c, settle, _) = ina.release_i2c();
        assert_eq!(settle.calls_us(), vec![10, 10, 10]);
        i2c.done();
    }

    #[test]
    fn current_is_scaled_by_resolved_lsb() {
        let expectations: Vec<_> = [
            read_word(0x04, 1_000),
            read_word(0x04, 0xFC18),
            read_word(0x04, 32_767),
        ]
        .concat();
        let mut ina = Ina226::new_i2c(
            I2cMock::new(&expectations),
            ADDR,
            RecordingDelay::new(),
            board_config(),
        );

        assert_eq!(ina.read_current_micro_amps().unwrap(), 1_525);
        assert_eq!(ina.read_current_micro_amps().unwrap(), -1_525);
        assert_eq!(ina.read_current_micro_amps().unwrap(), 49_969);

        let (mut i2c, _, _) = ina.release_i2c();
        i2c.done();
    }

    #[test]
    fn voltages_and_power_use_fixed_lsbs() {
        let expectations: Vec<_> = [
            read_word(0x02, 0x2580),
            read_word(0x01, 1_000),
            read_word(0x03, 1_000),
        ]
        .concat();
        let mut ina = Ina226::new_i2c(
            I2cMock::new(&expectations),
            ADDR,
            RecordingDelay::new(),
            board_config(),
        );

        assert_eq!(ina.read_bus_millivolts().unwrap(), 12_000);
        assert_eq!(ina.read_shunt_microvolts().unwrap(), 2_500);
        assert_eq!(ina.read_power_micro_watts().unwrap(), 38_125);

        let (mut i2c, _, _) = ina.release_i2c();
        i2c.done();
    }

    #[test]
    fn check_ids_accepts_ina226_and_rejects_others() {
        let expectations: Vec<_> = [
            read_word(0xFE, 0x5449),
            read_word(0xFF, 0x2260),
            read_word(0xFE, 0x5449),
            read_word(0xFF, 0x2270),
        ]
        .concat();
        let mut ina = Ina226::new_i2c(
            I2cMock::new(&expectations),
            ADDR,
            RecordingDelay::new(),
            board_config(),
        );

        assert_eq!(ina.check_ids(), Ok(()));
        assert_eq!(ina.check_ids(), Err(Error::DeviceIdMismatch));

        let (mut i2c, _, _) = ina.release_i2c();
        i2c.done();
    }

    #[test]
    fn single_shot_trigger_then_bounded_wait() {
        let config = Config { mode: OperatingMode::BothTriggered, ..board_config() };
        let mut expectations = vec![I2cTransaction::write(ADDR, vec![0x00, 0x04, 0x03])];
        expectations.extend(read_word(0x06, 0x0000));
        expectations.extend(read_word(0x06, 0x0008));
        let mut ina =
            Ina226::new_i2c(I2cMock::new(&expectations), ADDR, RecordingDelay::new(), config);
        let mut delay = RecordingDelay::new();

        ina.trigger().unwrap();
        assert_eq!(ina.conversion_state(), ConversionState::Triggered);
        ina.wait_for_conversion(&mut delay, PollPolicy::new(4, 500)).unwrap();
        assert_eq!(ina.conversion_state(), ConversionState::Done);
        assert_eq!(delay.calls_us(), vec![500]);

        let (mut i2c, _, _) = ina.release_i2c();
        i2c.done();
    }

    #[test]
    fn wait_times_out_when_flag_never_sets() {
        let expectations: Vec<_> = [read_word(0x06, 0x0000), read_word(0x06, 0x0000)].concat();
        let mut ina = Ina226::new_i2c(
            I2cMock::new(&expectations),
            ADDR,
            RecordingDelay::new(),
            board_config(),
        );
        let mut delay = RecordingDelay::new();

        let result = ina.wait_for_conversion(&mut delay, PollPolicy::new(2, 100));
        assert_eq!(result, Err(Error::Timeout));
        assert_ne!(ina.conversion_state(), ConversionState::Done);

        let (mut i2c, _, _) = ina.release_i2c();
        i2c.done();
    }
}
