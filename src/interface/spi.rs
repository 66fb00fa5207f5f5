//! 4-wire framed interface implementation built on top of `embedded-hal` `SpiDevice`.
//!
//! Each register access is one `SpiDevice` transaction, so chip-select stays
//! asserted from the instruction byte to the last payload byte and no other
//! device on the bus can interleave. Bit order is MSB first and the clock
//! mode is [`MODE`]; both are fixed by the bus configuration, not at runtime.

use embedded_hal::spi::{Mode, Operation, Phase, Polarity, SpiDevice};

use super::{RegisterInterface, RegisterWord};

/// SPI clock mode expected by the device (CPOL = 0, CPHA = 0).
pub const MODE: Mode = Mode {
    polarity: Polarity::IdleLow,
    phase: Phase::CaptureOnFirstTransition,
};

/// Instruction byte for a memory write.
pub const INSTRUCTION_WRITE: u8 = 0x02;
/// Instruction byte for a memory read.
pub const INSTRUCTION_READ: u8 = 0x03;

/// SPI-based register interface.
pub struct SpiInterface<SPI> {
    spi: SPI,
}

impl<SPI> SpiInterface<SPI> {
    /// Creates a new interface from the provided SPI device abstraction.
    pub const fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Builds the instruction and 16-bit address header of a frame.
    fn header(instruction: u8, address: u16) -> [u8; 3] {
        let [high, low] = address.to_be_bytes();
        [instruction, high, low]
    }

    /// Provides mutable access to the wrapped SPI device.
    pub fn spi_mut(&mut self) -> &mut SPI {
        &mut self.spi
    }

    /// Consumes the interface and returns the owned SPI device.
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI> RegisterInterface for SpiInterface<SPI>
where
    SPI: SpiDevice,
{
    type Address = u16;
    type Error = SPI::Error;

    fn read_register<V: RegisterWord>(
        &mut self,
        address: u16,
    ) -> core::result::Result<V, Self::Error> {
        let header = Self::header(INSTRUCTION_READ, address);
        let mut buf = [0u8; 4];
        let mut operations = [Operation::Write(&header), Operation::Read(&mut buf[..V::WIDTH])];
        self.spi.transaction(&mut operations)?;
        Ok(V::read_be(&buf))
    }

    fn write_register<V: RegisterWord>(
        &mut self,
        address: u16,
        value: V,
    ) -> core::result::Result<(), Self::Error> {
        let header = Self::header(INSTRUCTION_WRITE, address);
        let mut payload = [0u8; 4];
        value.write_be(&mut payload);
        let mut operations = [Operation::Write(&header), Operation::Write(&payload[..V::WIDTH])];
        self.spi.transaction(&mut operations)
    }
}
