//! `LMS6002D` RF Transceiver Register Access
//!
//! The transceiver exposes 128 eight-bit registers over SPI. Each access is a
//! 16-bit frame with chip select held low: the first byte carries the
//! write flag in bit 7 and the register address in bits 0-6, the second byte
//! carries the data (written by the host on writes, shifted out by the chip
//! on reads).

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use crate::gateway::RegisterDevice;

/// `LMS6002D` register addresses
pub mod reg {
    /// Chip revision and version
    pub const CHIP_ID: u8 = 0x04;
    /// Top-level soft reset and enables
    pub const TOP_CTRL: u8 = 0x05;
}

const WRITE_FLAG: u8 = 0x80;
const ADDR_MASK: u8 = 0x7F;

/// Bus failure during a register access
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "embedded", derive(defmt::Format))]
pub enum Lms6Error<S, P> {
    /// SPI transfer failed
    Spi(S),
    /// Chip select could not be driven
    ChipSelect(P),
}

/// Result of an `LMS6002D` register access
pub type Lms6Result<T, S, P> = Result<T, Lms6Error<S, P>>;

/// `LMS6002D` driver
pub struct Lms6<SPI, CS> {
    spi: SPI,
    cs: CS,
}

impl<SPI, CS> Lms6<SPI, CS>
where
    SPI: SpiBus,
    CS: OutputPin,
{
    /// Create a driver. Chip select is assumed idle-high.
    pub const fn new(spi: SPI, cs: CS) -> Self {
        Self { spi, cs }
    }

    /// Read one register
    pub fn read_reg(&mut self, addr: u8) -> Lms6Result<u8, SPI::Error, CS::Error> {
        let mut frame = [addr & ADDR_MASK, 0];
        self.exchange(&mut frame)?;
        Ok(frame[1])
    }

    /// Write one register
    pub fn write_reg(&mut self, addr: u8, value: u8) -> Lms6Result<(), SPI::Error, CS::Error> {
        let mut frame = [WRITE_FLAG | (addr & ADDR_MASK), value];
        self.exchange(&mut frame)
    }

    /// Chip revision (high nibble) and version (low nibble)
    pub fn chip_id(&mut self) -> Lms6Result<u8, SPI::Error, CS::Error> {
        self.read_reg(reg::CHIP_ID)
    }

    /// Give back the bus and chip select
    pub fn release(self) -> (SPI, CS) {
        (self.spi, self.cs)
    }

    fn exchange(&mut self, frame: &mut [u8; 2]) -> Lms6Result<(), SPI::Error, CS::Error> {
        self.cs.set_low().map_err(Lms6Error::ChipSelect)?;
        let result = self
            .spi
            .transfer_in_place(frame)
            .and_then(|()| self.spi.flush());
        // Always deselect, even when the transfer failed
        let deselect = self.cs.set_high();
        result.map_err(Lms6Error::Spi)?;
        deselect.map_err(Lms6Error::ChipSelect)
    }
}

impl<SPI, CS> RegisterDevice for Lms6<SPI, CS>
where
    SPI: SpiBus,
    CS: OutputPin,
{
    fn read(&mut self, addr: u8) -> u8 {
        self.read_reg(addr).unwrap_or_else(|_| {
            warn!("LMS6 read of 0x{:02x} failed", addr);
            0
        })
    }

    fn write(&mut self, addr: u8, value: u8) {
        if self.write_reg(addr, value).is_err() {
            warn!("LMS6 write of 0x{:02x} failed", addr);
        }
    }
}
