use embedded_hal::delay::DelayNs;
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};
use gse_sensors::board;
use gse_sensors::ltc2983::{Channel, ConversionTarget};
use gse_sensors::{ConversionState, Error, Ina226, Ltc2983, PollPolicy};

struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

fn spi_frame(instruction: u8, address: u16, data: SpiTransaction<u8>) -> [SpiTransaction<u8>; 4] {
    let [high, low] = address.to_be_bytes();
    [
        SpiTransaction::transaction_start(),
        SpiTransaction::write_vec(vec![instruction, high, low]),
        data,
        SpiTransaction::transaction_end(),
    ]
}

fn spi_write(address: u16, payload: &[u8]) -> [SpiTransaction<u8>; 4] {
    spi_frame(0x02, address, SpiTransaction::write_vec(payload.to_vec()))
}

fn spi_read(address: u16, response: &[u8]) -> [SpiTransaction<u8>; 4] {
    spi_frame(0x03, address, SpiTransaction::read_vec(response.to_vec()))
}

#[test]
fn current_monitor_setup_then_sampling() {
    let slot = board::CURRENT_MONITORS[0];
    let expectations = [
        I2cTransaction::write(slot.address, vec![0x00, 0x80, 0x00]),
        I2cTransaction::write(slot.address, vec![0x05, 0x1A, 0x3A]),
        I2cTransaction::write(slot.address, vec![0x00, 0x04, 0x07]),
        I2cTransaction::write(slot.address, vec![0x04]),
        I2cTransaction::read(slot.address, vec![0x03, 0xE8]),
        I2cTransaction::write(slot.address, vec![0x02]),
        I2cTransaction::read(slot.address, vec![0x0D, 0xAC]),
    ];
    let mut ina = Ina226::new_i2c(
        I2cMock::new(&expectations),
        slot.address,
        NoDelay,
        board::current_monitor_config(),
    );

    ina.init(&mut NoDelay).unwrap();
    assert_eq!(ina.read_current_micro_amps().unwrap(), 1_525);
    assert_eq!(ina.read_bus_millivolts().unwrap(), 4_375);

    let (mut i2c, _, _) = ina.release_i2c();
    i2c.done();
}

#[test]
fn rtd_batch_configure_trigger_poll_read() {
    let mut expectations = Vec::new();
    for config in board::rtd_channel_configs() {
        let (rtd, sense) = config.encode().unwrap();
        let rtd_address = 0x200 - 4 + u16::from(config.channel.index()) * 4;
        expectations.extend(spi_write(rtd_address, &rtd.to_be_bytes()));
        expectations.extend(spi_write(0x204, &sense.to_be_bytes()));
    }
    expectations.extend(spi_write(0x0F4, &[0x00, 0x00, 0x00, 0xA8]));
    expectations.extend(spi_write(0x000, &[0x80]));
    expectations.extend(spi_read(0x000, &[0x80]));
    expectations.extend(spi_read(0x000, &[0x80]));
    expectations.extend(spi_read(0x000, &[0x40]));
    expectations.extend(spi_read(0x01C, &[0x01, 0x00, 0x5A, 0x00]));
    expectations.extend(spi_read(0x024, &[0x01, 0x01, 0x90, 0x00]));
    expectations.extend(spi_read(0x02C, &[0x01, 0xFF, 0xEC, 0x00]));

    let mut ltc = Ltc2983::new_spi(SpiMock::new(&expectations));
    for config in board::rtd_channel_configs() {
        ltc.configure_rtd_channel(&config).unwrap();
    }
    ltc.configure_multi_channel(&board::RTD_CHANNELS).unwrap();
    ltc.trigger(ConversionTarget::Multiple).unwrap();
    ltc.wait_for_conversion(&mut NoDelay, PollPolicy::default()).unwrap();
    assert_eq!(ltc.conversion_state(), ConversionState::Done);

    let temperatures: Vec<f32> = board::RTD_CHANNELS
        .iter()
        .map(|&channel| ltc.read_temperature(channel).unwrap())
        .collect();
    assert_eq!(temperatures, vec![22.5, 100.0, -5.0]);

    ltc.release_spi().done();
}

#[test]
fn stuck_converter_times_out_instead_of_blocking() {
    let mut expectations = Vec::new();
    expectations.extend(spi_write(0x000, &[0x84]));
    for _ in 0..4 {
        expectations.extend(spi_read(0x000, &[0x84]));
    }

    let mut ltc = Ltc2983::new_spi(SpiMock::new(&expectations));
    ltc.trigger(ConversionTarget::Single(Channel::Ch4)).unwrap();
    let result = ltc.wait_for_conversion(&mut NoDelay, PollPolicy::new(4, 10_000));
    assert_eq!(result, Err(Error::Timeout));
    assert_eq!(ltc.conversion_state(), ConversionState::Triggered);

    ltc.release_spi().done();
}
