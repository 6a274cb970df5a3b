//! Peripheral Gateway
//!
//! The register-access surface the dispatcher drives. Every call is
//! synchronous and total: bus failures are handled (and logged) by the
//! implementation, never reported back to the dispatcher.

use crate::config::UNKNOWN_PARAM_READ_VALUE;
use crate::protocol::params::ConfigParam;
use crate::types::Module;

/// Chip with an 8-bit address / 8-bit data register file
pub trait RegisterDevice {
    /// Read one register
    fn read(&mut self, addr: u8) -> u8;

    /// Write one register
    fn write(&mut self, addr: u8, value: u8);
}

impl<T: RegisterDevice + ?Sized> RegisterDevice for &mut T {
    fn read(&mut self, addr: u8) -> u8 {
        (**self).read(addr)
    }

    fn write(&mut self, addr: u8, value: u8) {
        (**self).write(addr, value);
    }
}

/// Board-level settings reachable through the config address space
pub trait BoardControl {
    /// FPGA control register
    fn control_reg(&mut self) -> u32;
    /// Update the FPGA control register
    fn set_control_reg(&mut self, value: u32);

    /// IQ-balance gain correction
    fn iq_gain(&mut self, module: Module) -> i16;
    /// Set IQ-balance gain correction
    fn set_iq_gain(&mut self, module: Module, gain: i16);
    /// IQ-balance phase correction
    fn iq_phase(&mut self, module: Module) -> i16;
    /// Set IQ-balance phase correction
    fn set_iq_phase(&mut self, module: Module, phase: i16);

    /// Packed FPGA version
    fn fpga_version(&mut self) -> u32;

    /// Sample timestamp counter
    fn timestamp(&mut self, module: Module) -> u64;
    /// Clear a timestamp counter
    fn reset_timestamp(&mut self, module: Module);

    /// Drive the VCTCXO trim DAC
    fn set_vctcxo_trim(&mut self, value: u16);

    /// Shift one word into the XB-200 synthesizer
    fn xb200_synth_write(&mut self, word: u32);

    /// Expansion port levels
    fn expansion_port(&mut self) -> u32;
    /// Drive expansion port outputs
    fn set_expansion_port(&mut self, value: u32);
    /// Expansion port direction mask (1 = output)
    fn expansion_direction(&mut self) -> u32;
    /// Set expansion port direction mask
    fn set_expansion_direction(&mut self, mask: u32);
}

impl<T: BoardControl + ?Sized> BoardControl for &mut T {
    fn control_reg(&mut self) -> u32 {
        (**self).control_reg()
    }
    fn set_control_reg(&mut self, value: u32) {
        (**self).set_control_reg(value);
    }
    fn iq_gain(&mut self, module: Module) -> i16 {
        (**self).iq_gain(module)
    }
    fn set_iq_gain(&mut self, module: Module, gain: i16) {
        (**self).set_iq_gain(module, gain);
    }
    fn iq_phase(&mut self, module: Module) -> i16 {
        (**self).iq_phase(module)
    }
    fn set_iq_phase(&mut self, module: Module, phase: i16) {
        (**self).set_iq_phase(module, phase);
    }
    fn fpga_version(&mut self) -> u32 {
        (**self).fpga_version()
    }
    fn timestamp(&mut self, module: Module) -> u64 {
        (**self).timestamp(module)
    }
    fn reset_timestamp(&mut self, module: Module) {
        (**self).reset_timestamp(module);
    }
    fn set_vctcxo_trim(&mut self, value: u16) {
        (**self).set_vctcxo_trim(value);
    }
    fn xb200_synth_write(&mut self, word: u32) {
        (**self).xb200_synth_write(word);
    }
    fn expansion_port(&mut self) -> u32 {
        (**self).expansion_port()
    }
    fn set_expansion_port(&mut self, value: u32) {
        (**self).set_expansion_port(value);
    }
    fn expansion_direction(&mut self) -> u32 {
        (**self).expansion_direction()
    }
    fn set_expansion_direction(&mut self, mask: u32) {
        (**self).set_expansion_direction(mask);
    }
}

/// Sign-extend a 16-bit correction the way the FPGA exposes it
#[allow(clippy::cast_sign_loss)]
const fn correction_word(value: i16) -> u64 {
    value as i64 as u64
}

#[allow(clippy::cast_possible_truncation)]
const fn correction_value(word: u64) -> i16 {
    word as u16 as i16
}

/// Fetch the current value of a config parameter
pub fn read_param<B: BoardControl + ?Sized>(board: &mut B, param: ConfigParam) -> u64 {
    match param {
        ConfigParam::ControlReg => u64::from(board.control_reg()),
        ConfigParam::IqCorrRxGain => correction_word(board.iq_gain(Module::Rx)),
        ConfigParam::IqCorrRxPhase => correction_word(board.iq_phase(Module::Rx)),
        ConfigParam::IqCorrTxGain => correction_word(board.iq_gain(Module::Tx)),
        ConfigParam::IqCorrTxPhase => correction_word(board.iq_phase(Module::Tx)),
        ConfigParam::FpgaVersion => u64::from(board.fpga_version()),
        ConfigParam::RxTimestamp => board.timestamp(Module::Rx),
        ConfigParam::TxTimestamp => board.timestamp(Module::Tx),
        ConfigParam::VctcxoTrim => {
            debug!("VCTCXO trim DAC has no read path");
            0
        }
        ConfigParam::Xb200Synth => {
            debug!("XB-200 synthesizer is write-only");
            0
        }
        ConfigParam::Expansion => u64::from(board.expansion_port()),
        ConfigParam::ExpansionDir => u64::from(board.expansion_direction()),
        ConfigParam::Unknown => {
            warn!("read of unknown config parameter");
            UNKNOWN_PARAM_READ_VALUE
        }
    }
}

/// Apply a fully assembled value to a config parameter
#[allow(clippy::cast_possible_truncation)]
pub fn write_param<B: BoardControl + ?Sized>(board: &mut B, param: ConfigParam, value: u64) {
    match param {
        ConfigParam::ControlReg => board.set_control_reg(value as u32),
        ConfigParam::IqCorrRxGain => board.set_iq_gain(Module::Rx, correction_value(value)),
        ConfigParam::IqCorrRxPhase => board.set_iq_phase(Module::Rx, correction_value(value)),
        ConfigParam::IqCorrTxGain => board.set_iq_gain(Module::Tx, correction_value(value)),
        ConfigParam::IqCorrTxPhase => board.set_iq_phase(Module::Tx, correction_value(value)),
        ConfigParam::FpgaVersion => warn!("attempted write to FPGA version"),
        ConfigParam::RxTimestamp => board.reset_timestamp(Module::Rx),
        ConfigParam::TxTimestamp => board.reset_timestamp(Module::Tx),
        ConfigParam::VctcxoTrim => board.set_vctcxo_trim(value as u16),
        ConfigParam::Xb200Synth => board.xb200_synth_write(value as u32),
        ConfigParam::Expansion => board.set_expansion_port(value as u32),
        ConfigParam::ExpansionDir => board.set_expansion_direction(value as u32),
        ConfigParam::Unknown => warn!("write to unknown config parameter dropped"),
    }
}

/// The three collaborators the router can reach
pub struct Peripherals<T, C, B> {
    /// RF transceiver register file
    pub transceiver: T,
    /// Clock synthesizer register file
    pub clock_synth: C,
    /// Board-level config parameters
    pub board: B,
}

impl<T, C, B> Peripherals<T, C, B>
where
    T: RegisterDevice,
    C: RegisterDevice,
    B: BoardControl,
{
    /// Bundle the collaborators
    pub const fn new(transceiver: T, clock_synth: C, board: B) -> Self {
        Self {
            transceiver,
            clock_synth,
            board,
        }
    }
}
