//! Device Router
//!
//! Entry point for one legacy packet. Decodes the control byte and hands the
//! packet to the config transfer engine or to a chip's register file.

use crate::gateway::{BoardControl, Peripherals, RegisterDevice};
use crate::protocol::frame::{Device, Direction, Packet, RequestFrame, ResponseFrame, Tuple};
use crate::protocol::transfer::{ConfigTransfer, SequencePolicy, TransferPhase};

/// Legacy packet dispatcher
///
/// Owns the only cross-packet state, the config transfer engine. Packets must
/// be handed in one at a time, in arrival order.
#[derive(Clone, Copy, Debug, Default)]
pub struct Dispatcher {
    config: ConfigTransfer,
}

impl Dispatcher {
    /// Dispatcher with an idle transfer engine
    #[must_use]
    pub const fn new(policy: SequencePolicy) -> Self {
        Self {
            config: ConfigTransfer::new(policy),
        }
    }

    /// Config transfer phase, for diagnostics
    #[must_use]
    pub const fn transfer_phase(&self) -> TransferPhase {
        self.config.phase()
    }

    /// Abort any in-flight config transfer
    pub fn reset(&mut self) {
        self.config.reset();
    }

    /// Process one packet, filling `packet.resp`
    ///
    /// Response bytes that the request does not address keep whatever the
    /// caller put there.
    pub fn dispatch<T, C, B>(&mut self, packet: &mut Packet, periph: &mut Peripherals<T, C, B>)
    where
        T: RegisterDevice,
        C: RegisterDevice,
        B: BoardControl,
    {
        let Packet { req, resp } = packet;
        let control = req.control();
        trace!("legacy packet {}", control);

        let Some(direction) = control.direction() else {
            warn!("control byte 0x{:02x} has neither read nor write set", control.byte());
            return;
        };
        let count = control.count();

        match control.device() {
            Device::Config => match direction {
                Direction::Read => self.config.read(count, req, resp, &mut periph.board),
                Direction::Write => self.config.write(count, req, resp, &mut periph.board),
            },
            Device::Transceiver => {
                trace!("transceiver {}", direction);
                direct_access(direction, req, resp, &mut periph.transceiver);
            }
            Device::ClockSynth => {
                trace!("clock synth {}", direction);
                direct_access(direction, req, resp, &mut periph.clock_synth);
            }
            Device::Reserved => warn!("invalid device selector in 0x{:02x}", control.byte()),
        }
    }
}

/// Single-register access. Only the first tuple is serviced, whatever the
/// count says.
fn direct_access<D: RegisterDevice>(
    direction: Direction,
    req: &RequestFrame,
    resp: &mut ResponseFrame,
    device: &mut D,
) {
    let Some(tuple) = req.tuple(0) else {
        return;
    };

    let data = match direction {
        Direction::Read => device.read(tuple.addr),
        Direction::Write => {
            device.write(tuple.addr, tuple.data);
            0
        }
    };
    resp.set_tuple(0, Tuple::new(tuple.addr, data));
}
