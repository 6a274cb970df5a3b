//! Shadow board registers
//!
//! RAM-backed [`BoardControl`] for a control processor that has no FPGA
//! fabric behind it. Settings are held in memory and the timestamp counters
//! run off a tick source.

use crate::config::FIRMWARE_VERSION;
use crate::gateway::BoardControl;
use crate::types::Module;

/// Free-running tick counter
pub trait TickSource {
    /// Current tick count
    fn now(&mut self) -> u64;
}

/// Ticks from the Embassy time driver
#[cfg(feature = "embedded")]
#[derive(Clone, Copy, Debug, Default)]
pub struct EmbassyTicks;

#[cfg(feature = "embedded")]
impl TickSource for EmbassyTicks {
    fn now(&mut self) -> u64 {
        embassy_time::Instant::now().as_ticks()
    }
}

/// IQ-balance correction pair for one module
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IqCorrection {
    /// Gain correction
    pub gain: i16,
    /// Phase correction
    pub phase: i16,
}

/// In-memory board settings
#[derive(Debug)]
pub struct ShadowBoard<S> {
    ticks: S,
    control: u32,
    iq: [IqCorrection; 2],
    epoch: [u64; 2],
    vctcxo_trim: Option<u16>,
    xb200_word: Option<u32>,
    expansion: u32,
    expansion_dir: u32,
}

impl<S: TickSource> ShadowBoard<S> {
    /// Power-on state; both timestamp counters start at zero now
    pub fn new(mut ticks: S) -> Self {
        let now = ticks.now();
        Self {
            ticks,
            control: 0,
            iq: [IqCorrection::default(); 2],
            epoch: [now; 2],
            vctcxo_trim: None,
            xb200_word: None,
            expansion: 0,
            expansion_dir: 0,
        }
    }

    /// IQ corrections for a module
    #[must_use]
    pub const fn iq_correction(&self, module: Module) -> IqCorrection {
        self.iq[module.index()]
    }

    /// Last value written to the trim DAC
    #[must_use]
    pub const fn vctcxo_trim(&self) -> Option<u16> {
        self.vctcxo_trim
    }

    /// Last word shifted into the XB-200 synthesizer
    #[must_use]
    pub const fn last_xb200_word(&self) -> Option<u32> {
        self.xb200_word
    }

    /// Tick source
    pub fn ticks_mut(&mut self) -> &mut S {
        &mut self.ticks
    }
}

impl<S: TickSource> BoardControl for ShadowBoard<S> {
    fn control_reg(&mut self) -> u32 {
        self.control
    }

    fn set_control_reg(&mut self, value: u32) {
        debug!("control reg <- 0x{:08x}", value);
        self.control = value;
    }

    fn iq_gain(&mut self, module: Module) -> i16 {
        self.iq[module.index()].gain
    }

    fn set_iq_gain(&mut self, module: Module, gain: i16) {
        self.iq[module.index()].gain = gain;
    }

    fn iq_phase(&mut self, module: Module) -> i16 {
        self.iq[module.index()].phase
    }

    fn set_iq_phase(&mut self, module: Module, phase: i16) {
        self.iq[module.index()].phase = phase;
    }

    fn fpga_version(&mut self) -> u32 {
        FIRMWARE_VERSION.packed()
    }

    fn timestamp(&mut self, module: Module) -> u64 {
        self.ticks.now().wrapping_sub(self.epoch[module.index()])
    }

    fn reset_timestamp(&mut self, module: Module) {
        debug!("{} timestamp cleared", module);
        self.epoch[module.index()] = self.ticks.now();
    }

    fn set_vctcxo_trim(&mut self, value: u16) {
        debug!("VCTCXO trim <- 0x{:04x}", value);
        self.vctcxo_trim = Some(value);
    }

    fn xb200_synth_write(&mut self, word: u32) {
        debug!("XB-200 synth <- 0x{:08x}", word);
        self.xb200_word = Some(word);
    }

    fn expansion_port(&mut self) -> u32 {
        self.expansion
    }

    fn set_expansion_port(&mut self, value: u32) {
        self.expansion = value;
    }

    fn expansion_direction(&mut self) -> u32 {
        self.expansion_dir
    }

    fn set_expansion_direction(&mut self, mask: u32) {
        self.expansion_dir = mask;
    }
}
