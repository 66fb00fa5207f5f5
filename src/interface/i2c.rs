//! 2-wire interface implementation built on top of `embedded-hal` `I2c`.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use super::{RegisterInterface, RegisterWord};

/// Settling time after every transaction; the target latches internally.
pub const SETTLING_DELAY_US: u32 = 10;

/// I2C-based register interface for one addressed device.
pub struct I2cInterface<I2C, D> {
    i2c: I2C,
    address: u8,
    delay: D,
}

impl<I2C, D> I2cInterface<I2C, D> {
    /// Creates a new interface for the device at the 7-bit `address`.
    pub const fn new(i2c: I2C, address: u8, delay: D) -> Self {
        Self { i2c, address, delay }
    }

    /// Returns the 7-bit device address.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Provides mutable access to the wrapped bus.
    pub fn i2c_mut(&mut self) -> &mut I2C {
        &mut self.i2c
    }

    /// Consumes the interface and returns the owned bus and delay.
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }
}

impl<I2C, D> RegisterInterface for I2cInterface<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    type Address = u8;
    type Error = I2C::Error;

    fn read_register<V: RegisterWord>(
        &mut self,
        register: u8,
    ) -> core::result::Result<V, Self::Error> {
        // Pointer write and data read are separate bus transactions with the
        // settling delay in between, not a repeated start.
        self.i2c.write(self.address, &[register])?;
        self.delay.delay_us(SETTLING_DELAY_US);

        let mut buf = [0u8; 4];
        self.i2c.read(self.address, &mut buf[..V::WIDTH])?;
        Ok(V::read_be(&buf))
    }

    fn write_register<V: RegisterWord>(
        &mut self,
        register: u8,
        value: V,
    ) -> core::result::Result<(), Self::Error> {
        let mut frame = [0u8; 5];
        frame[0] = register;
        value.write_be(&mut frame[1..]);

        self.i2c.write(self.address, &frame[..=V::WIDTH])?;
        self.delay.delay_us(SETTLING_DELAY_US);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::I2cInterface;
    use crate::interface::RegisterInterface;
    use crate::test_support::RecordingDelay;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    #[test]
    fn read_word_points_waits_then_reads_two_bytes() {
        let expectations = [
            I2cTransaction::write(0x41, vec![0x02]),
            I2cTransaction::read(0x41, vec![0x12, 0x34]),
        ];
        let mut interface =
            I2cInterface::new(I2cMock::new(&expectations), 0x41, RecordingDelay::new());

        let value: u16 = interface.read_register(0x02).unwrap();
        assert_eq!(value, 0x1234);

        let (mut i2c, delay) = interface.release();
        assert_eq!(delay.calls_us(), vec![10]);
        i2c.done();
    }

    #[test]
    fn write_word_sends_register_then_msb_lsb() {
        let expectations = [I2cTransaction::write(0x40, vec![0x05, 0x1A, 0x36])];
        let mut interface =
            I2cInterface::new(I2cMock::new(&expectations), 0x40, RecordingDelay::new());

        interface.write_register(0x05, 0x1A36u16).unwrap();

        let (mut i2c, delay) = interface.release();
        assert_eq!(delay.total_ns(), 10_000);
        i2c.done();
    }

    #[test]
    fn bus_errors_are_returned_not_swallowed() {
        let expectations = [
            I2cTransaction::write(0x44, vec![0x04]),
            I2cTransaction::read(0x44, vec![0x00, 0x00]).with_error(ErrorKind::Other),
        ];
        let mut interface =
            I2cInterface::new(I2cMock::new(&expectations), 0x44, RecordingDelay::new());

        let result: Result<u16, _> = interface.read_register(0x04);
        assert_eq!(result, Err(ErrorKind::Other));

        let (mut i2c, _) = interface.release();
        i2c.done();
    }
}
