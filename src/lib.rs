//! SDR Control Processor Command Firmware
//!
//! Firmware library for the control processor that sits between the host
//! link and the RF hardware of a software-defined radio. The host speaks the
//! legacy fixed-size packet protocol; each packet is routed to the RF
//! transceiver, the clock synthesizer, or a virtual config address space
//! aggregating board-level settings.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       HOST LINK                              │
//! │        UART  ──►  link::FrameAssembler  ──►  16-byte frames  │
//! ├─────────────────────────────────────────────────────────────┤
//! │                    PROTOCOL LAYER                            │
//! │  frame codec  │  router::Dispatcher  │  config transfer      │
//! ├─────────────────────────────────────────────────────────────┤
//! │                  PERIPHERAL GATEWAY                          │
//! │  RegisterDevice (LMS6002D, Si5338)  │  BoardControl          │
//! ├─────────────────────────────────────────────────────────────┤
//! │                    RTOS / SCHEDULER                          │
//! │           embassy-rs (async/await executor)                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **No heap**: fixed-size buffers and `heapless` containers only
//! - **Total dispatcher**: malformed input is logged and ignored, never fatal
//! - **Explicit cross-packet state**: multi-packet transfers live in one
//!   inspectable state object owned by the dispatcher
//! - **No unsafe in application code**
//! - **Hardware behind traits**: chip drivers are generic over `embedded-hal`

#![cfg_attr(feature = "embedded", no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Must come first so the logging macros are visible to every module
#[macro_use]
mod fmt;

// Re-export dependencies needed by applications (only in embedded mode)
#[cfg(feature = "embedded")]
pub use embassy_executor;
#[cfg(feature = "embedded")]
pub use embassy_stm32;
#[cfg(feature = "embedded")]
pub use embassy_time;

/// Legacy Command Protocol
///
/// Frame codec, config address map, transfer engine and device router.
pub mod protocol;

/// Peripheral Gateway
///
/// Traits the dispatcher drives to reach chips and board settings.
pub mod gateway;

/// Shadow board registers
pub mod board;

/// Peripheral Drivers
///
/// SPI/I2C register access for the transceiver and clock synthesizer.
pub mod drivers;

/// Host link framing
pub mod link;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

/// Prelude module for common imports
#[cfg(feature = "embedded")]
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::config::*;
    pub use crate::gateway::{BoardControl, Peripherals, RegisterDevice};
    pub use crate::protocol::{Dispatcher, Packet, SequencePolicy};

    // Embassy
    pub use embassy_time::{Duration, Instant, Timer};

    // Logging
    pub use defmt::{debug, error, info, trace, warn};
}
