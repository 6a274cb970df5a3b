//! Shared types used across the firmware

/// RF signal path
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "embedded", derive(defmt::Format))]
pub enum Module {
    /// Receive path
    Rx,
    /// Transmit path
    Tx,
}

impl Module {
    /// Index into per-module arrays
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Rx => 0,
            Self::Tx => 1,
        }
    }
}

/// Version triple as reported through the config space
///
/// Packed little-endian as `major | minor << 8 | patch << 16`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    /// Major version
    pub major: u8,
    /// Minor version
    pub minor: u8,
    /// Patch level
    pub patch: u16,
}

impl Version {
    /// Create a version
    #[must_use]
    pub const fn new(major: u8, minor: u8, patch: u16) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Packed register value
    #[must_use]
    pub const fn packed(self) -> u32 {
        (self.major as u32) | ((self.minor as u32) << 8) | ((self.patch as u32) << 16)
    }

    /// Unpack a register value
    #[must_use]
    pub const fn from_packed(word: u32) -> Self {
        Self {
            major: (word & 0xFF) as u8,
            minor: ((word >> 8) & 0xFF) as u8,
            patch: (word >> 16) as u16,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Version {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "v{}.{}.{}", self.major, self.minor, self.patch);
    }
}
