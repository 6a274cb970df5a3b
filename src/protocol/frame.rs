//! Legacy Packet Frame Codec
//!
//! Every exchange with the host is one fixed 16-byte request answered by one
//! fixed 16-byte response:
//!
//! ```text
//!  byte:   0        1        2      3      4      5     ...   14     15
//!        ┌────────┬────────┬──────┬──────┬──────┬──────┬─────┬──────┬──────┐
//!        │control │ unused │ addr │ data │ addr │ data │ ... │ addr │ data │
//!        └────────┴────────┴──────┴──────┴──────┴──────┴─────┴──────┴──────┘
//!                            tuple 0       tuple 1             tuple 6
//! ```
//!
//! The control byte packs the tuple count, the device selector and the
//! transfer direction:
//!
//! ```text
//!   7    6    5    4    3    2    1    0
//! ┌────┬────┬─────────┬────┬──────────────┐
//! │ RD │ WR │ device  │ -- │    count     │
//! └────┴────┴─────────┴────┴──────────────┘
//! ```

/// Total length of a request or response packet
pub const PACKET_LEN: usize = 16;

/// Index of the control byte
pub const CONTROL_IDX: usize = 0;

/// Index of the first (address, data) tuple
pub const PAYLOAD_IDX: usize = 2;

/// Bytes per (address, data) tuple
pub const TUPLE_STRIDE: usize = 2;

/// Largest tuple count the 3-bit field can carry
pub const MAX_TUPLES: usize = 7;

const COUNT_MASK: u8 = 0x07;
const DEVICE_MASK: u8 = 0x30;
const DEVICE_SHIFT: u8 = 4;
const DIR_READ: u8 = 0x80;
const DIR_WRITE: u8 = 0x40;

/// Device selector carried in bits 4-5 of the control byte
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "embedded", derive(defmt::Format))]
pub enum Device {
    /// Virtual configuration address space
    Config,
    /// LMS6002D RF transceiver
    Transceiver,
    /// Selector value 2, not assigned to any device
    Reserved,
    /// Si5338 clock synthesizer
    ClockSynth,
}

impl Device {
    /// Decode a two-bit selector value
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Self::Config,
            1 => Self::Transceiver,
            2 => Self::Reserved,
            _ => Self::ClockSynth,
        }
    }

    /// Two-bit selector value
    #[must_use]
    pub const fn bits(self) -> u8 {
        match self {
            Self::Config => 0,
            Self::Transceiver => 1,
            Self::Reserved => 2,
            Self::ClockSynth => 3,
        }
    }
}

/// Transfer direction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "embedded", derive(defmt::Format))]
pub enum Direction {
    /// Host reads from the device
    Read,
    /// Host writes to the device
    Write,
}

/// Decoded control byte
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlWord(u8);

impl ControlWord {
    /// Wrap a raw control byte
    #[must_use]
    pub const fn from_byte(byte: u8) -> Self {
        Self(byte)
    }

    /// Build a control byte. Counts above [`MAX_TUPLES`] are truncated to the
    /// 3-bit field.
    #[must_use]
    pub const fn new(direction: Direction, device: Device, count: u8) -> Self {
        let dir = match direction {
            Direction::Read => DIR_READ,
            Direction::Write => DIR_WRITE,
        };
        Self(dir | (device.bits() << DEVICE_SHIFT) | (count & COUNT_MASK))
    }

    /// Raw byte
    #[must_use]
    pub const fn byte(self) -> u8 {
        self.0
    }

    /// Number of tuples present in the request
    #[must_use]
    pub const fn count(self) -> u8 {
        self.0 & COUNT_MASK
    }

    /// Selected device
    #[must_use]
    pub const fn device(self) -> Device {
        Device::from_bits((self.0 & DEVICE_MASK) >> DEVICE_SHIFT)
    }

    /// READ bit set
    #[must_use]
    pub const fn is_read(self) -> bool {
        self.0 & DIR_READ != 0
    }

    /// WRITE bit set
    #[must_use]
    pub const fn is_write(self) -> bool {
        self.0 & DIR_WRITE != 0
    }

    /// Effective direction. READ wins when both bits are set; `None` when
    /// neither is.
    #[must_use]
    pub const fn direction(self) -> Option<Direction> {
        if self.is_read() {
            Some(Direction::Read)
        } else if self.is_write() {
            Some(Direction::Write)
        } else {
            None
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for ControlWord {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Ctl(0x{:02X} rd={} wr={} dev={} n={})",
            self.0,
            self.is_read(),
            self.is_write(),
            self.device(),
            self.count()
        );
    }
}

/// One (address, data) pair
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "embedded", derive(defmt::Format))]
pub struct Tuple {
    /// Address byte
    pub addr: u8,
    /// Data byte
    pub data: u8,
}

impl Tuple {
    /// Create a tuple
    #[must_use]
    pub const fn new(addr: u8, data: u8) -> Self {
        Self { addr, data }
    }
}

const fn tuple_offset(index: usize) -> usize {
    PAYLOAD_IDX + index * TUPLE_STRIDE
}

/// Request packet received from the host
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestFrame([u8; PACKET_LEN]);

impl RequestFrame {
    /// Wrap raw request bytes
    #[must_use]
    pub const fn new(bytes: [u8; PACKET_LEN]) -> Self {
        Self(bytes)
    }

    /// Build a request from a control word and up to [`MAX_TUPLES`] tuples.
    /// Extra tuples are dropped.
    #[must_use]
    pub fn build(control: ControlWord, tuples: &[Tuple]) -> Self {
        let mut bytes = [0u8; PACKET_LEN];
        bytes[CONTROL_IDX] = control.byte();
        for (i, tuple) in tuples.iter().take(MAX_TUPLES).enumerate() {
            let off = tuple_offset(i);
            bytes[off] = tuple.addr;
            bytes[off + 1] = tuple.data;
        }
        Self(bytes)
    }

    /// Decoded control byte
    #[must_use]
    pub const fn control(&self) -> ControlWord {
        ControlWord::from_byte(self.0[CONTROL_IDX])
    }

    /// Tuple at `index`, or `None` past the payload area
    #[must_use]
    pub fn tuple(&self, index: usize) -> Option<Tuple> {
        if index >= MAX_TUPLES {
            return None;
        }
        let off = tuple_offset(index);
        Some(Tuple::new(self.0[off], self.0[off + 1]))
    }

    /// The first `count` tuples, in order
    pub fn tuples(&self, count: u8) -> impl Iterator<Item = Tuple> + '_ {
        (0..usize::from(count)).map_while(move |i| self.tuple(i))
    }

    /// Raw bytes
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; PACKET_LEN] {
        &self.0
    }
}

/// Response packet returned to the host
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResponseFrame([u8; PACKET_LEN]);

impl ResponseFrame {
    /// All-zero response
    #[must_use]
    pub const fn zeroed() -> Self {
        Self([0; PACKET_LEN])
    }

    /// Start from caller-supplied bytes
    #[must_use]
    pub const fn new(bytes: [u8; PACKET_LEN]) -> Self {
        Self(bytes)
    }

    /// Tuple at `index`, or `None` past the payload area
    #[must_use]
    pub fn tuple(&self, index: usize) -> Option<Tuple> {
        if index >= MAX_TUPLES {
            return None;
        }
        let off = tuple_offset(index);
        Some(Tuple::new(self.0[off], self.0[off + 1]))
    }

    /// Store a tuple at `index`. Indices past the payload area are ignored.
    pub fn set_tuple(&mut self, index: usize, tuple: Tuple) {
        if index >= MAX_TUPLES {
            return;
        }
        let off = tuple_offset(index);
        self.0[off] = tuple.addr;
        self.0[off + 1] = tuple.data;
    }

    /// Raw bytes
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; PACKET_LEN] {
        &self.0
    }
}

impl Default for ResponseFrame {
    fn default() -> Self {
        Self::zeroed()
    }
}

/// Request/response pair for one protocol exchange
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Packet {
    /// Request from the host
    pub req: RequestFrame,
    /// Response being built for the host
    pub resp: ResponseFrame,
}

impl Packet {
    /// Pair a request with a zeroed response
    #[must_use]
    pub const fn new(req: RequestFrame) -> Self {
        Self {
            req,
            resp: ResponseFrame::zeroed(),
        }
    }
}
