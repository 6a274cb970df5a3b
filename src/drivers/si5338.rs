//! `Si5338` Clock Synthesizer Register Access
//!
//! The synthesizer's register map is reached over I2C with a one-byte
//! register pointer. Registers above 255 live behind the page bit in
//! register 255; the legacy protocol only addresses page 0, so paging is left
//! to the host.

use embedded_hal::i2c::I2c;

use crate::config::SI5338_I2C_ADDR;
use crate::gateway::RegisterDevice;

/// `Si5338` register addresses
pub mod reg {
    /// Device revision
    pub const REVID: u8 = 0;
    /// Output enable / disable
    pub const OUTPUT_ENABLE: u8 = 230;
    /// Soft reset
    pub const SOFT_RESET: u8 = 246;
    /// Page select
    pub const PAGE: u8 = 255;
}

/// `Si5338` driver
pub struct Si5338<I2C> {
    i2c: I2C,
    addr: u8,
}

impl<I2C: I2c> Si5338<I2C> {
    /// Create a driver at the board's default address
    pub const fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, SI5338_I2C_ADDR)
    }

    /// Create a driver at a specific 7-bit address
    pub const fn with_address(i2c: I2C, addr: u8) -> Self {
        Self {
            i2c,
            addr: addr & 0x7F,
        }
    }

    /// 7-bit bus address
    #[must_use]
    pub const fn address(&self) -> u8 {
        self.addr
    }

    /// Read one register
    pub fn read_reg(&mut self, reg: u8) -> Result<u8, I2C::Error> {
        let mut buf = [0u8];
        self.i2c.write_read(self.addr, &[reg], &mut buf)?;
        Ok(buf[0])
    }

    /// Write one register
    pub fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), I2C::Error> {
        self.i2c.write(self.addr, &[reg, value])
    }

    /// Device revision
    pub fn revision(&mut self) -> Result<u8, I2C::Error> {
        self.read_reg(reg::REVID)
    }

    /// Give back the bus
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> RegisterDevice for Si5338<I2C> {
    fn read(&mut self, addr: u8) -> u8 {
        self.read_reg(addr).unwrap_or_else(|_| {
            warn!("Si5338 read of {} failed", addr);
            0
        })
    }

    fn write(&mut self, addr: u8, value: u8) {
        if self.write_reg(addr, value).is_err() {
            warn!("Si5338 write of {} failed", addr);
        }
    }
}
