//! System configuration and hardware constants
//!
//! Compile-time settings for the control processor: bus speeds, chip
//! addresses, the host link and the values the config space reports.

use crate::protocol::transfer::SequencePolicy;
use crate::types::Version;

/// System clock frequency (STM32G474 @ 170MHz)
pub const SYSTEM_CLOCK_HZ: u32 = 170_000_000;

/// Host link UART baud rate
pub const HOST_UART_BAUD: u32 = 4_000_000;

/// Receive chunk size for the host link
pub const HOST_RX_CHUNK: usize = 64;

/// I2C bus frequency for the Si5338
pub const I2C_FREQUENCY_HZ: u32 = 400_000;

/// Si5338 I2C address
pub const SI5338_I2C_ADDR: u8 = 0x70;

/// LMS6002D SPI clock
pub const LMS_SPI_FREQUENCY_HZ: u32 = 10_000_000;

/// Version reported through the FPGA version parameter
pub const FIRMWARE_VERSION: Version = Version::new(0, 1, 0);

/// Value served when the host reads an unmapped config address
pub const UNKNOWN_PARAM_READ_VALUE: u64 = u64::MAX;

/// Sequencing policy used by the firmware's dispatcher
pub const DEFAULT_SEQUENCE_POLICY: SequencePolicy = SequencePolicy::Trust;

/// Heartbeat LED half-period in milliseconds
pub const HEARTBEAT_MS: u64 = 500;

/// LED flash length on host activity in milliseconds
pub const ACTIVITY_FLASH_MS: u64 = 30;

/// Pin assignments for GPIO
pub mod pins {
    //! GPIO pin assignments matching the schematic

    /// Status LED
    pub const LED_STATUS: &str = "PA5";

    /// Host link USART1 TX
    pub const HOST_TX: &str = "PA9";

    /// Host link USART1 RX
    pub const HOST_RX: &str = "PA10";

    /// I2C1 SCL (Si5338)
    pub const I2C1_SCL: &str = "PB8";

    /// I2C1 SDA (Si5338)
    pub const I2C1_SDA: &str = "PB9";

    /// SPI1 SCK (LMS6002D)
    pub const LMS_SCK: &str = "PB3";

    /// SPI1 MISO (LMS6002D)
    pub const LMS_MISO: &str = "PB4";

    /// SPI1 MOSI (LMS6002D)
    pub const LMS_MOSI: &str = "PB5";

    /// LMS6002D chip select (active low)
    pub const LMS_CS: &str = "PA4";
}
