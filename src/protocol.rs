//! Legacy Command Protocol
//!
//! Fixed 16-byte request/response packets carrying up to seven
//! (address, data) tuples for one of three targets: the RF transceiver, the
//! clock synthesizer, or the virtual config address space.
//!
//! ```text
//!  RequestFrame ─► frame::ControlWord ─► router::Dispatcher ─┬─► RegisterDevice (LMS / Si5338)
//!                                                            └─► transfer::ConfigTransfer
//!                                                                   └─► params + BoardControl
//! ```

pub mod frame;
pub mod params;
pub mod router;
pub mod transfer;

pub use frame::{ControlWord, Device, Direction, Packet, RequestFrame, ResponseFrame, Tuple};
pub use params::ConfigParam;
pub use router::Dispatcher;
pub use transfer::{SequencePolicy, TransferPhase};
