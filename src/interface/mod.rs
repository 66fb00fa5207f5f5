//! Bus transaction abstraction shared by both drivers.
//!
//! Registers are addressed by an interface-specific address type and carry
//! an 8, 16 or 32-bit payload chosen by the caller per register. Payloads are
//! transferred most-significant byte first on every transport.

pub mod i2c;
pub mod spi;

mod sealed {
    pub trait Sealed {}
    impl Sealed for u8 {}
    impl Sealed for u16 {}
    impl Sealed for u32 {}
}

/// Payload widths a register transaction can carry.
pub trait RegisterWord: Copy + sealed::Sealed {
    /// Payload length in bytes.
    const WIDTH: usize;

    /// Serializes the value big-endian into the first [`Self::WIDTH`] bytes of `buf`.
    fn write_be(self, buf: &mut [u8]);

    /// Assembles a value from the first [`Self::WIDTH`] bytes of `buf`, big-endian.
    fn read_be(buf: &[u8]) -> Self;
}

impl RegisterWord for u8 {
    const WIDTH: usize = 1;

    fn write_be(self, buf: &mut [u8]) {
        buf[0] = self;
    }

    fn read_be(buf: &[u8]) -> Self {
        buf[0]
    }
}

impl RegisterWord for u16 {
    const WIDTH: usize = 2;

    fn write_be(self, buf: &mut [u8]) {
        buf[..2].copy_from_slice(&self.to_be_bytes());
    }

    fn read_be(buf: &[u8]) -> Self {
        u16::from_be_bytes([buf[0], buf[1]])
    }
}

impl RegisterWord for u32 {
    const WIDTH: usize = 4;

    fn write_be(self, buf: &mut [u8]) {
        buf[..4].copy_from_slice(&self.to_be_bytes());
    }

    fn read_be(buf: &[u8]) -> Self {
        u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]])
    }
}

/// Abstraction over the register-level bus access required by the drivers.
///
/// An implementation identifies exactly one physical device: the 2-wire
/// variant carries the device address, the 4-wire variant owns the
/// chip-select through its `SpiDevice`.
pub trait RegisterInterface {
    /// Register address type of the transport.
    type Address: Copy;
    /// Error type produced by the concrete bus implementation.
    type Error;

    /// Reads one register with the payload width of `V`.
    fn read_register<V: RegisterWord>(
        &mut self,
        address: Self::Address,
    ) -> core::result::Result<V, Self::Error>;

    /// Writes one register with the payload width of `V`.
    fn write_register<V: RegisterWord>(
        &mut self,
        address: Self::Address,
        value: V,
    ) -> core::result::Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::RegisterWord;

    #[test]
    fn long_words_send_upper_half_first() {
        let mut buf = [0u8; 4];
        0x1234_5678u32.write_be(&mut buf);
        assert_eq!(buf, [0x12, 0x34, 0x56, 0x78]);
        assert_eq!(u32::read_be(&buf), 0x1234_5678);
    }

    #[test]
    fn words_are_assembled_msb_first() {
        assert_eq!(u16::read_be(&[0xAB, 0xCD]), 0xABCD);
        assert_eq!(u8::read_be(&[0x40, 0xFF]), 0x40);
    }
}
