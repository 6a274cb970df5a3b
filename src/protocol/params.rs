//! Configuration Address Map
//!
//! Board-level settings that have no chip of their own are reached through a
//! single "config" device. Each setting owns a small byte range in an 8-bit
//! virtual address space; multi-byte values are exchanged least significant
//! byte first, one tuple per byte.

/// Named configuration parameter
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "embedded", derive(defmt::Format))]
pub enum ConfigParam {
    /// FPGA control register
    ControlReg,
    /// RX IQ-balance gain correction
    IqCorrRxGain,
    /// RX IQ-balance phase correction
    IqCorrRxPhase,
    /// TX IQ-balance gain correction
    IqCorrTxGain,
    /// TX IQ-balance phase correction
    IqCorrTxPhase,
    /// FPGA version word
    FpgaVersion,
    /// RX timestamp counter (write clears)
    RxTimestamp,
    /// TX timestamp counter (write clears)
    TxTimestamp,
    /// VCTCXO trim DAC
    VctcxoTrim,
    /// XB-200 expansion board synthesizer
    Xb200Synth,
    /// Expansion port I/O levels
    Expansion,
    /// Expansion port direction mask
    ExpansionDir,
    /// Address outside every range
    Unknown,
}

/// How a parameter reacts to reads and writes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "embedded", derive(defmt::Format))]
pub enum Access {
    /// Plain register
    ReadWrite,
    /// Writes are ignored
    ReadOnly,
    /// Reads return zero
    WriteOnly,
    /// Reads return the counter, writes clear it
    ReadReset,
    /// Not backed by anything
    None,
}

/// Address range and width of one parameter
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParamInfo {
    /// Parameter this range belongs to
    pub param: ConfigParam,
    /// First virtual address
    pub start: u8,
    /// Width in bytes
    pub len: u8,
    /// Access class
    pub access: Access,
}

impl ParamInfo {
    const fn new(param: ConfigParam, start: u8, len: u8, access: Access) -> Self {
        Self {
            param,
            start,
            len,
            access,
        }
    }

    /// Whether `addr` lies in `[start, start + len)`
    #[must_use]
    pub const fn contains(&self, addr: u8) -> bool {
        let addr = addr as u16;
        let start = self.start as u16;
        start <= addr && addr < start + self.len as u16
    }
}

/// Descriptor returned for addresses no parameter claims
pub const UNKNOWN_PARAM: ParamInfo = ParamInfo::new(ConfigParam::Unknown, 255, 0, Access::None);

/// Parameter table, sorted by start address. Addresses 32 and 33 are unmapped.
pub const CONFIG_PARAMS: [ParamInfo; 12] = [
    ParamInfo::new(ConfigParam::ControlReg, 0, 4, Access::ReadWrite),
    ParamInfo::new(ConfigParam::IqCorrRxGain, 4, 2, Access::ReadWrite),
    ParamInfo::new(ConfigParam::IqCorrRxPhase, 6, 2, Access::ReadWrite),
    ParamInfo::new(ConfigParam::IqCorrTxGain, 8, 2, Access::ReadWrite),
    ParamInfo::new(ConfigParam::IqCorrTxPhase, 10, 2, Access::ReadWrite),
    ParamInfo::new(ConfigParam::FpgaVersion, 12, 4, Access::ReadOnly),
    ParamInfo::new(ConfigParam::RxTimestamp, 16, 8, Access::ReadReset),
    ParamInfo::new(ConfigParam::TxTimestamp, 24, 8, Access::ReadReset),
    ParamInfo::new(ConfigParam::VctcxoTrim, 34, 2, Access::WriteOnly),
    ParamInfo::new(ConfigParam::Xb200Synth, 36, 4, Access::WriteOnly),
    ParamInfo::new(ConfigParam::Expansion, 40, 4, Access::ReadWrite),
    ParamInfo::new(ConfigParam::ExpansionDir, 44, 4, Access::ReadWrite),
];

impl ConfigParam {
    /// Resolve a virtual address. Never fails: unclaimed addresses map to
    /// [`ConfigParam::Unknown`].
    #[must_use]
    pub fn resolve(addr: u8) -> Self {
        let param = CONFIG_PARAMS
            .iter()
            .find(|info| info.contains(addr))
            .map_or(Self::Unknown, |info| info.param);
        trace!("config lookup addr={} -> {}", addr, param);
        param
    }

    /// Address range and width
    #[must_use]
    pub fn info(self) -> ParamInfo {
        CONFIG_PARAMS
            .iter()
            .copied()
            .find(|info| info.param == self)
            .unwrap_or(UNKNOWN_PARAM)
    }

    /// First virtual address
    #[must_use]
    pub fn start(self) -> u8 {
        self.info().start
    }

    /// Width in bytes
    #[must_use]
    pub fn len(self) -> u8 {
        self.info().len
    }

    /// True only for [`ConfigParam::Unknown`]
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }
}
