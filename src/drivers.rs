//! Peripheral Drivers
//!
//! Register access for the external chips the legacy protocol reaches
//! directly. Drivers are generic over `embedded-hal` buses.

pub mod lms6;
pub mod si5338;

pub use lms6::Lms6;
pub use si5338::Si5338;
