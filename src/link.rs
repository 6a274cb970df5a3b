//! Host Link Framing
//!
//! The serial link delivers bytes in whatever chunks the UART hands over.
//! Requests are fixed-length, so framing is just counting to
//! [`PACKET_LEN`].

use heapless::Vec;

use crate::protocol::frame::{RequestFrame, PACKET_LEN};

/// Collects link bytes into request frames
#[derive(Debug, Default)]
pub struct FrameAssembler {
    buffer: Vec<u8, PACKET_LEN>,
}

impl FrameAssembler {
    /// Empty assembler
    #[must_use]
    pub const fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Feed one byte. Returns a frame when this byte completes one.
    pub fn push(&mut self, byte: u8) -> Option<RequestFrame> {
        // Cannot fail: the buffer is drained as soon as it fills
        let _ = self.buffer.push(byte);

        if self.buffer.is_full() {
            let mut bytes = [0u8; PACKET_LEN];
            bytes.copy_from_slice(&self.buffer);
            self.buffer.clear();
            Some(RequestFrame::new(bytes))
        } else {
            None
        }
    }

    /// Feed a chunk, yielding every frame it completes
    pub fn extend<'a>(&'a mut self, chunk: &'a [u8]) -> impl Iterator<Item = RequestFrame> + 'a {
        chunk.iter().filter_map(move |&byte| self.push(byte))
    }

    /// Bytes held towards the next frame
    #[must_use]
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Drop a partial frame
    pub fn clear(&mut self) {
        if !self.buffer.is_empty() {
            debug!("dropping {} partial frame bytes", self.buffer.len());
        }
        self.buffer.clear();
    }
}
