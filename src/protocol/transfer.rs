//! Config Transfer Engine
//!
//! A config parameter can be wider than the tuples one packet carries (the
//! 64-bit timestamps need eight, a packet holds seven), so the host streams
//! its bytes across as many packets as it takes. The engine keeps the
//! in-flight parameter, how many bytes have moved and the value being served
//! or assembled between packets.
//!
//! Reads fetch the value once, on the first byte, and hand it out least
//! significant byte first. Writes collect bytes in the same order and apply
//! the assembled value once the last byte arrives.

use crate::gateway::{read_param, write_param, BoardControl};
use crate::protocol::frame::{Direction, RequestFrame, ResponseFrame, Tuple};
use crate::protocol::params::ConfigParam;

/// How continuation tuples are checked
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "embedded", derive(defmt::Format))]
pub enum SequencePolicy {
    /// Only the first tuple of a transfer is resolved; later addresses are
    /// assumed to advance one byte at a time.
    #[default]
    Trust,
    /// Every continuing tuple must address the next byte of the active
    /// parameter. A mismatch abandons the transfer and starts a new one at
    /// the offending tuple.
    Strict,
}

/// Progress through one parameter
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "embedded", derive(defmt::Format))]
pub struct Cursor {
    /// Parameter being transferred
    pub param: ConfigParam,
    /// Bytes already served or received
    pub consumed: u8,
    /// Value being served (read) or assembled (write)
    pub value: u64,
}

impl Cursor {
    const fn begin(param: ConfigParam, value: u64) -> Self {
        Self {
            param,
            consumed: 0,
            value,
        }
    }

    /// Virtual address the next tuple should carry
    #[must_use]
    pub fn next_addr(&self) -> u8 {
        self.param.start().wrapping_add(self.consumed)
    }

    fn is_complete(&self) -> bool {
        self.consumed >= self.param.len()
    }

    #[allow(clippy::cast_possible_truncation)]
    fn take_byte(&mut self) -> u8 {
        let byte = self
            .value
            .checked_shr(u32::from(self.consumed) * 8)
            .unwrap_or(0) as u8;
        self.consumed = self.consumed.saturating_add(1);
        byte
    }

    fn put_byte(&mut self, byte: u8) {
        if let Some(shifted) = u64::from(byte).checked_shl(u32::from(self.consumed) * 8) {
            self.value |= shifted;
        }
        self.consumed = self.consumed.saturating_add(1);
    }
}

/// Current phase of the engine
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "embedded", derive(defmt::Format))]
pub enum TransferPhase {
    /// No transfer in flight
    #[default]
    Idle,
    /// Serving a parameter's bytes to the host
    Reading(Cursor),
    /// Collecting a parameter's bytes from the host
    Writing(Cursor),
}

/// Resumable config transfer state machine
#[derive(Clone, Copy, Debug, Default)]
pub struct ConfigTransfer {
    phase: TransferPhase,
    policy: SequencePolicy,
}

impl ConfigTransfer {
    /// Idle engine with the given sequencing policy
    #[must_use]
    pub const fn new(policy: SequencePolicy) -> Self {
        Self {
            phase: TransferPhase::Idle,
            policy,
        }
    }

    /// Current phase
    #[must_use]
    pub const fn phase(&self) -> TransferPhase {
        self.phase
    }

    /// Sequencing policy in force
    #[must_use]
    pub const fn policy(&self) -> SequencePolicy {
        self.policy
    }

    /// No transfer in flight
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self.phase, TransferPhase::Idle)
    }

    /// Abort any in-flight transfer
    pub fn reset(&mut self) {
        if !self.is_idle() {
            debug!("config transfer aborted: {}", self.phase);
        }
        self.phase = TransferPhase::Idle;
    }

    /// Take over the cursor for `direction`, abandoning a transfer running
    /// the other way.
    fn resume(&mut self, direction: Direction) -> Option<Cursor> {
        match (self.phase, direction) {
            (TransferPhase::Reading(cursor), Direction::Read)
            | (TransferPhase::Writing(cursor), Direction::Write) => Some(cursor),
            (TransferPhase::Idle, _) => None,
            (stale, _) => {
                warn!("{} request abandons in-flight {}", direction, stale);
                self.phase = TransferPhase::Idle;
                None
            }
        }
    }

    /// Under [`SequencePolicy::Strict`], drop a cursor the tuple doesn't continue
    fn check_sequence(&self, cursor: Option<Cursor>, tuple: Tuple) -> Option<Cursor> {
        match cursor {
            Some(c) if self.policy == SequencePolicy::Strict && tuple.addr != c.next_addr() => {
                warn!(
                    "out-of-sequence config addr {} (expected {}), restarting",
                    tuple.addr,
                    c.next_addr()
                );
                None
            }
            other => other,
        }
    }

    /// Serve up to `count` bytes of the active (or newly addressed) parameter.
    ///
    /// Stops early once a parameter's last byte has been served; remaining
    /// tuples in the request are left unanswered.
    pub fn read<B: BoardControl + ?Sized>(
        &mut self,
        count: u8,
        req: &RequestFrame,
        resp: &mut ResponseFrame,
        board: &mut B,
    ) {
        let mut cursor = self.resume(Direction::Read);

        for (i, tuple) in req.tuples(count).enumerate() {
            let mut active = match self.check_sequence(cursor, tuple) {
                Some(c) => c,
                None => {
                    let param = ConfigParam::resolve(tuple.addr);
                    let value = read_param(board, param);
                    trace!("config read {} ({}) = {:x}", param, param.info().access, value);
                    Cursor::begin(param, value)
                }
            };

            let rel_addr = tuple.addr.wrapping_sub(active.param.start());
            let data = active.take_byte();
            resp.set_tuple(i, Tuple::new(rel_addr, data));

            if active.is_complete() {
                debug!("config read of {} complete", active.param);
                cursor = None;
                break;
            }
            cursor = Some(active);
        }

        self.phase = cursor.map_or(TransferPhase::Idle, TransferPhase::Reading);
    }

    /// Accept up to `count` bytes for the active (or newly addressed)
    /// parameter, applying the value once its last byte has arrived.
    pub fn write<B: BoardControl + ?Sized>(
        &mut self,
        count: u8,
        req: &RequestFrame,
        resp: &mut ResponseFrame,
        board: &mut B,
    ) {
        let mut cursor = self.resume(Direction::Write);

        for (i, tuple) in req.tuples(count).enumerate() {
            let mut active = match self.check_sequence(cursor, tuple) {
                Some(c) => c,
                None => Cursor::begin(ConfigParam::resolve(tuple.addr), 0),
            };

            // Zero-width (unknown) parameters take no bytes at all
            if !active.is_complete() {
                let rel_addr = tuple.addr.wrapping_sub(active.param.start());
                resp.set_tuple(i, Tuple::new(rel_addr, 0));
                active.put_byte(tuple.data);
            }

            cursor = Some(active);
            if active.is_complete() {
                break;
            }
        }

        self.phase = match cursor {
            Some(active) if active.is_complete() => {
                debug!("config write {} = {:x}", active.param, active.value);
                write_param(board, active.param, active.value);
                TransferPhase::Idle
            }
            Some(active) => TransferPhase::Writing(active),
            None => TransferPhase::Idle,
        };
    }
}
