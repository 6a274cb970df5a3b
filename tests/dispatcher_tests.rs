//! Legacy Packet Dispatcher Tests
//!
//! Drives whole packets through the dispatcher against in-memory chips and
//! the shadow board.
//! Run with: cargo test --test dispatcher_tests

use sdr_command_firmware::board::{ShadowBoard, TickSource};
use sdr_command_firmware::gateway::{BoardControl, Peripherals, RegisterDevice};
use sdr_command_firmware::protocol::transfer::Cursor;
use sdr_command_firmware::protocol::{
    ConfigParam, ControlWord, Device, Direction, Dispatcher, Packet, RequestFrame, ResponseFrame,
    SequencePolicy, TransferPhase, Tuple,
};
use sdr_command_firmware::types::{Module, Version};

// ============================================================================
// Test Doubles
// ============================================================================

/// Register file that remembers every write
struct RegFile {
    regs: [u8; 256],
    writes: Vec<(u8, u8)>,
    reads: usize,
}

impl RegFile {
    fn new() -> Self {
        Self {
            regs: [0; 256],
            writes: Vec::new(),
            reads: 0,
        }
    }
}

impl RegisterDevice for RegFile {
    fn read(&mut self, addr: u8) -> u8 {
        self.reads += 1;
        self.regs[usize::from(addr)]
    }

    fn write(&mut self, addr: u8, value: u8) {
        self.regs[usize::from(addr)] = value;
        self.writes.push((addr, value));
    }
}

/// Tick source the test moves by hand
struct ManualTicks(u64);

impl TickSource for ManualTicks {
    fn now(&mut self) -> u64 {
        self.0
    }
}

type TestPeripherals = Peripherals<RegFile, RegFile, ShadowBoard<ManualTicks>>;

fn peripherals() -> TestPeripherals {
    Peripherals::new(RegFile::new(), RegFile::new(), ShadowBoard::new(ManualTicks(0)))
}

fn exchange_onto(
    dispatcher: &mut Dispatcher,
    periph: &mut TestPeripherals,
    control: ControlWord,
    tuples: &[Tuple],
    preset: ResponseFrame,
) -> ResponseFrame {
    let mut packet = Packet::new(RequestFrame::build(control, tuples));
    packet.resp = preset;
    dispatcher.dispatch(&mut packet, periph);
    packet.resp
}

fn exchange(
    dispatcher: &mut Dispatcher,
    periph: &mut TestPeripherals,
    control: ControlWord,
    tuples: &[Tuple],
) -> ResponseFrame {
    exchange_onto(dispatcher, periph, control, tuples, ResponseFrame::zeroed())
}

fn config_read(dispatcher: &mut Dispatcher, periph: &mut TestPeripherals, addrs: &[u8]) -> ResponseFrame {
    let tuples: Vec<Tuple> = addrs.iter().map(|&a| Tuple::new(a, 0)).collect();
    let control = ControlWord::new(Direction::Read, Device::Config, tuples.len() as u8);
    exchange(dispatcher, periph, control, &tuples)
}

fn config_write(
    dispatcher: &mut Dispatcher,
    periph: &mut TestPeripherals,
    tuples: &[(u8, u8)],
) -> ResponseFrame {
    let tuples: Vec<Tuple> = tuples.iter().map(|&(a, d)| Tuple::new(a, d)).collect();
    let control = ControlWord::new(Direction::Write, Device::Config, tuples.len() as u8);
    exchange(dispatcher, periph, control, &tuples)
}

fn resp_tuples(resp: &ResponseFrame, n: usize) -> Vec<(u8, u8)> {
    (0..n)
        .map(|i| resp.tuple(i).unwrap())
        .map(|t| (t.addr, t.data))
        .collect()
}

// ============================================================================
// Config Reads
// ============================================================================

#[test]
fn control_register_read_in_one_packet() {
    let mut dispatcher = Dispatcher::default();
    let mut periph = peripherals();
    periph.board.set_control_reg(0x1234_5678);

    let resp = config_read(&mut dispatcher, &mut periph, &[0, 1, 2, 3]);

    assert_eq!(
        resp_tuples(&resp, 4),
        vec![(0, 0x78), (1, 0x56), (2, 0x34), (3, 0x12)]
    );
    assert_eq!(dispatcher.transfer_phase(), TransferPhase::Idle);
}

#[test]
fn response_addresses_are_relative_to_parameter_base() {
    let mut dispatcher = Dispatcher::default();
    let mut periph = peripherals();
    periph.board.set_expansion_direction(0xA1B2_C3D4);

    let resp = config_read(&mut dispatcher, &mut periph, &[44, 45, 46, 47]);

    assert_eq!(
        resp_tuples(&resp, 4),
        vec![(0, 0xD4), (1, 0xC3), (2, 0xB2), (3, 0xA1)]
    );
}

#[test]
fn timestamp_read_spans_two_packets() {
    let mut dispatcher = Dispatcher::default();
    let mut periph = peripherals();
    periph.board.ticks_mut().0 = 0x0807_0605_0403_0201;

    let first = config_read(&mut dispatcher, &mut periph, &[16, 17, 18, 19, 20, 21, 22]);
    let expected: Vec<(u8, u8)> = (0..7).map(|i| (i, i + 1)).collect();
    assert_eq!(resp_tuples(&first, 7), expected);

    match dispatcher.transfer_phase() {
        TransferPhase::Reading(cursor) => {
            assert_eq!(cursor.param, ConfigParam::RxTimestamp);
            assert_eq!(cursor.consumed, 7);
        }
        other => panic!("expected a read in flight, got {other:?}"),
    }

    // The counter keeps running, but the value was latched on the first byte
    periph.board.ticks_mut().0 = 0xFFFF_FFFF_FFFF_FFFF;

    let second = config_read(&mut dispatcher, &mut periph, &[23]);
    assert_eq!(second.tuple(0), Some(Tuple::new(7, 0x08)));
    assert_eq!(dispatcher.transfer_phase(), TransferPhase::Idle);
}

#[test]
fn one_byte_per_packet_read() {
    let mut dispatcher = Dispatcher::default();
    let mut periph = peripherals();
    periph.board.set_iq_phase(Module::Tx, -2);

    let lo = config_read(&mut dispatcher, &mut periph, &[10]);
    let hi = config_read(&mut dispatcher, &mut periph, &[11]);

    assert_eq!(lo.tuple(0), Some(Tuple::new(0, 0xFE)));
    assert_eq!(hi.tuple(0), Some(Tuple::new(1, 0xFF)));
    assert_eq!(dispatcher.transfer_phase(), TransferPhase::Idle);
}

#[test]
fn repeated_reads_are_identical() {
    let mut dispatcher = Dispatcher::default();
    let mut periph = peripherals();
    periph.board.set_control_reg(0xDEAD_BEEF);

    let first = config_read(&mut dispatcher, &mut periph, &[0, 1, 2, 3]);
    let second = config_read(&mut dispatcher, &mut periph, &[0, 1, 2, 3]);
    let third = config_read(&mut dispatcher, &mut periph, &[0, 1, 2, 3]);

    assert_eq!(first, second);
    assert_eq!(second, third);
}

#[test]
fn read_stops_after_parameter_completes() {
    let mut dispatcher = Dispatcher::default();
    let mut periph = peripherals();
    periph.board.set_control_reg(0x0403_0201);

    let tuples: Vec<Tuple> = (0..6).map(|a| Tuple::new(a, 0)).collect();
    let control = ControlWord::new(Direction::Read, Device::Config, 6);
    let resp = exchange_onto(
        &mut dispatcher,
        &mut periph,
        control,
        &tuples,
        ResponseFrame::new([0xEE; 16]),
    );

    assert_eq!(
        resp_tuples(&resp, 4),
        vec![(0, 0x01), (1, 0x02), (2, 0x03), (3, 0x04)]
    );
    // Tuples 4 and 5 were not served, even though they address the next parameter
    assert_eq!(resp.tuple(4), Some(Tuple::new(0xEE, 0xEE)));
    assert_eq!(resp.tuple(5), Some(Tuple::new(0xEE, 0xEE)));
    assert_eq!(dispatcher.transfer_phase(), TransferPhase::Idle);
}

#[test]
fn fpga_version_read() {
    let mut dispatcher = Dispatcher::default();
    let mut periph = peripherals();
    let packed = periph.board.fpga_version().to_le_bytes();

    let resp = config_read(&mut dispatcher, &mut periph, &[12, 13, 14, 15]);

    let data: Vec<u8> = resp_tuples(&resp, 4).iter().map(|&(_, d)| d).collect();
    assert_eq!(data, packed);
    let version = Version::from_packed(u32::from_le_bytes(packed));
    assert_eq!(version, sdr_command_firmware::config::FIRMWARE_VERSION);
}

#[test]
fn write_only_parameters_read_zero() {
    let mut dispatcher = Dispatcher::default();
    let mut periph = peripherals();
    periph.board.xb200_synth_write(0xFFFF_FFFF);
    periph.board.set_vctcxo_trim(0xFFFF);

    let synth = config_read(&mut dispatcher, &mut periph, &[36, 37, 38, 39]);
    assert_eq!(resp_tuples(&synth, 4), vec![(0, 0), (1, 0), (2, 0), (3, 0)]);

    let trim = config_read(&mut dispatcher, &mut periph, &[34, 35]);
    assert_eq!(resp_tuples(&trim, 2), vec![(0, 0), (1, 0)]);
}

#[test]
fn unknown_address_read_serves_sentinel_once() {
    let mut dispatcher = Dispatcher::default();
    let mut periph = peripherals();

    let control = ControlWord::new(Direction::Read, Device::Config, 3);
    let tuples = [Tuple::new(32, 0), Tuple::new(33, 0), Tuple::new(34, 0)];
    let resp = exchange(&mut dispatcher, &mut periph, control, &tuples);

    // 32 - 255 wraps to 33
    assert_eq!(resp.tuple(0), Some(Tuple::new(33, 0xFF)));
    assert_eq!(resp.tuple(1), Some(Tuple::new(0, 0)));
    assert_eq!(resp.tuple(2), Some(Tuple::new(0, 0)));
    assert_eq!(dispatcher.transfer_phase(), TransferPhase::Idle);
}

// ============================================================================
// Config Writes
// ============================================================================

#[test]
fn control_register_write_in_one_packet() {
    let mut dispatcher = Dispatcher::default();
    let mut periph = peripherals();

    let resp = config_write(&mut dispatcher, &mut periph, &[(0, 0xEF), (1, 0xBE), (2, 0xAD), (3, 0xDE)]);

    assert_eq!(periph.board.control_reg(), 0xDEAD_BEEF);
    assert_eq!(resp_tuples(&resp, 4), vec![(0, 0), (1, 0), (2, 0), (3, 0)]);
    assert_eq!(dispatcher.transfer_phase(), TransferPhase::Idle);
}

#[test]
fn write_applies_only_after_last_byte() {
    let mut dispatcher = Dispatcher::default();
    let mut periph = peripherals();

    config_write(&mut dispatcher, &mut periph, &[(40, 0x11), (41, 0x22), (42, 0x33)]);
    assert_eq!(periph.board.expansion_port(), 0);
    assert_eq!(
        dispatcher.transfer_phase(),
        TransferPhase::Writing(Cursor {
            param: ConfigParam::Expansion,
            consumed: 3,
            value: 0x0033_2211,
        })
    );

    let resp = config_write(&mut dispatcher, &mut periph, &[(43, 0x44)]);
    assert_eq!(resp.tuple(0), Some(Tuple::new(3, 0)));
    assert_eq!(periph.board.expansion_port(), 0x4433_2211);
    assert_eq!(dispatcher.transfer_phase(), TransferPhase::Idle);
}

#[test]
fn iq_gain_round_trip_one_byte_per_packet() {
    let mut dispatcher = Dispatcher::default();
    let mut periph = peripherals();

    config_write(&mut dispatcher, &mut periph, &[(4, 0x34)]);
    config_write(&mut dispatcher, &mut periph, &[(5, 0x12)]);
    assert_eq!(periph.board.iq_correction(Module::Rx).gain, 0x1234);

    let lo = config_read(&mut dispatcher, &mut periph, &[4]);
    let hi = config_read(&mut dispatcher, &mut periph, &[5]);
    assert_eq!(lo.tuple(0), Some(Tuple::new(0, 0x34)));
    assert_eq!(hi.tuple(0), Some(Tuple::new(1, 0x12)));
}

#[test]
fn negative_iq_correction_round_trip() {
    let mut dispatcher = Dispatcher::default();
    let mut periph = peripherals();

    config_write(&mut dispatcher, &mut periph, &[(8, 0x00), (9, 0xF0)]);
    assert_eq!(periph.board.iq_correction(Module::Tx).gain, -4096);

    let resp = config_read(&mut dispatcher, &mut periph, &[8, 9]);
    assert_eq!(resp_tuples(&resp, 2), vec![(0, 0x00), (1, 0xF0)]);
}

#[test]
fn write_ignores_tuples_past_parameter_end() {
    let mut dispatcher = Dispatcher::default();
    let mut periph = peripherals();
    periph.board.set_iq_phase(Module::Rx, 7);

    let control = ControlWord::new(Direction::Write, Device::Config, 4);
    let tuples = [
        Tuple::new(4, 0x01),
        Tuple::new(5, 0x02),
        Tuple::new(6, 0x03),
        Tuple::new(7, 0x04),
    ];
    let resp = exchange_onto(
        &mut dispatcher,
        &mut periph,
        control,
        &tuples,
        ResponseFrame::new([0xEE; 16]),
    );

    assert_eq!(periph.board.iq_correction(Module::Rx).gain, 0x0201);
    assert_eq!(periph.board.iq_correction(Module::Rx).phase, 7);
    assert_eq!(resp.tuple(1), Some(Tuple::new(1, 0)));
    assert_eq!(resp.tuple(2), Some(Tuple::new(0xEE, 0xEE)));
    assert_eq!(dispatcher.transfer_phase(), TransferPhase::Idle);
}

#[test]
fn timestamp_write_resets_counter_and_discards_payload() {
    let mut dispatcher = Dispatcher::default();
    let mut periph = peripherals();
    periph.board.ticks_mut().0 = 1_000;
    assert_eq!(periph.board.timestamp(Module::Rx), 1_000);

    let junk: Vec<(u8, u8)> = (16..23).map(|a| (a, 0xA5)).collect();
    config_write(&mut dispatcher, &mut periph, &junk);
    // Seven of eight bytes: nothing happens yet
    assert_eq!(periph.board.timestamp(Module::Rx), 1_000);

    config_write(&mut dispatcher, &mut periph, &[(23, 0x5A)]);
    assert_eq!(periph.board.timestamp(Module::Rx), 0);
    assert_eq!(periph.board.timestamp(Module::Tx), 1_000);

    periph.board.ticks_mut().0 = 1_250;
    assert_eq!(periph.board.timestamp(Module::Rx), 250);
}

#[test]
fn fpga_version_write_is_ignored() {
    let mut dispatcher = Dispatcher::default();
    let mut periph = peripherals();
    let before = periph.board.fpga_version();

    config_write(&mut dispatcher, &mut periph, &[(12, 0), (13, 0), (14, 0), (15, 0)]);

    assert_eq!(periph.board.fpga_version(), before);
    assert_eq!(dispatcher.transfer_phase(), TransferPhase::Idle);
}

#[test]
fn xb200_and_trim_writes_reach_the_board() {
    let mut dispatcher = Dispatcher::default();
    let mut periph = peripherals();

    config_write(&mut dispatcher, &mut periph, &[(36, 0x78), (37, 0x56), (38, 0x34), (39, 0x12)]);
    config_write(&mut dispatcher, &mut periph, &[(34, 0xCD), (35, 0xAB)]);

    assert_eq!(periph.board.last_xb200_word(), Some(0x1234_5678));
    assert_eq!(periph.board.vctcxo_trim(), Some(0xABCD));
}

#[test]
fn unknown_address_write_is_dropped() {
    let mut dispatcher = Dispatcher::default();
    let mut periph = peripherals();

    let control = ControlWord::new(Direction::Write, Device::Config, 2);
    let tuples = [Tuple::new(200, 1), Tuple::new(201, 2)];
    let resp = exchange_onto(
        &mut dispatcher,
        &mut periph,
        control,
        &tuples,
        ResponseFrame::new([0xEE; 16]),
    );

    assert_eq!(resp, ResponseFrame::new([0xEE; 16]));
    assert_eq!(dispatcher.transfer_phase(), TransferPhase::Idle);
}

#[test]
fn empty_write_keeps_transfer_in_flight() {
    let mut dispatcher = Dispatcher::default();
    let mut periph = peripherals();

    config_write(&mut dispatcher, &mut periph, &[(0, 0xAA)]);
    config_write(&mut dispatcher, &mut periph, &[]);

    assert!(matches!(
        dispatcher.transfer_phase(),
        TransferPhase::Writing(Cursor { consumed: 1, .. })
    ));
}

// ============================================================================
// Transfer Lifecycle
// ============================================================================

#[test]
fn direction_change_abandons_transfer() {
    let mut dispatcher = Dispatcher::default();
    let mut periph = peripherals();
    periph.board.ticks_mut().0 = 0x0807_0605_0403_0201;

    config_read(&mut dispatcher, &mut periph, &[16, 17, 18]);
    assert!(matches!(dispatcher.transfer_phase(), TransferPhase::Reading(_)));

    config_write(&mut dispatcher, &mut periph, &[(0, 1), (1, 0), (2, 0), (3, 0)]);
    assert_eq!(periph.board.control_reg(), 1);
    assert_eq!(dispatcher.transfer_phase(), TransferPhase::Idle);

    // A fresh read starts at byte 0 again
    let resp = config_read(&mut dispatcher, &mut periph, &[16]);
    assert_eq!(resp.tuple(0), Some(Tuple::new(0, 0x01)));
}

#[test]
fn reset_aborts_transfer() {
    let mut dispatcher = Dispatcher::default();
    let mut periph = peripherals();

    config_write(&mut dispatcher, &mut periph, &[(0, 0x11), (1, 0x22)]);
    dispatcher.reset();
    assert_eq!(dispatcher.transfer_phase(), TransferPhase::Idle);

    config_write(&mut dispatcher, &mut periph, &[(0, 1), (1, 2), (2, 3), (3, 4)]);
    assert_eq!(periph.board.control_reg(), 0x0403_0201);
}

#[test]
fn trusting_policy_continues_out_of_order_addresses() {
    let mut dispatcher = Dispatcher::new(SequencePolicy::Trust);
    let mut periph = peripherals();
    periph.board.ticks_mut().0 = 0x0807_0605_0403_0201;
    periph.board.set_control_reg(0xAABB_CCDD);

    config_read(&mut dispatcher, &mut periph, &[16, 17, 18]);
    let resp = config_read(&mut dispatcher, &mut periph, &[0]);

    // Still serving the timestamp: byte 3, address relative to 16
    assert_eq!(resp.tuple(0), Some(Tuple::new(0u8.wrapping_sub(16), 0x04)));
    assert!(matches!(
        dispatcher.transfer_phase(),
        TransferPhase::Reading(Cursor {
            param: ConfigParam::RxTimestamp,
            consumed: 4,
            ..
        })
    ));
}

#[test]
fn strict_policy_restarts_on_out_of_order_address() {
    let mut dispatcher = Dispatcher::new(SequencePolicy::Strict);
    let mut periph = peripherals();
    periph.board.ticks_mut().0 = 0x0807_0605_0403_0201;
    periph.board.set_control_reg(0xAABB_CCDD);

    config_read(&mut dispatcher, &mut periph, &[16, 17, 18]);
    let resp = config_read(&mut dispatcher, &mut periph, &[0]);

    assert_eq!(resp.tuple(0), Some(Tuple::new(0, 0xDD)));
    assert!(matches!(
        dispatcher.transfer_phase(),
        TransferPhase::Reading(Cursor {
            param: ConfigParam::ControlReg,
            consumed: 1,
            ..
        })
    ));
}

#[test]
fn strict_policy_accepts_in_order_stream() {
    let mut dispatcher = Dispatcher::new(SequencePolicy::Strict);
    let mut periph = peripherals();

    config_write(&mut dispatcher, &mut periph, &[(24, 1), (25, 2), (26, 3)]);
    config_write(&mut dispatcher, &mut periph, &[(27, 4), (28, 5), (29, 6), (30, 7), (31, 8)]);

    assert_eq!(dispatcher.transfer_phase(), TransferPhase::Idle);
}

#[test]
fn strict_policy_drops_partial_write_on_mismatch() {
    let mut dispatcher = Dispatcher::new(SequencePolicy::Strict);
    let mut periph = peripherals();

    config_write(&mut dispatcher, &mut periph, &[(0, 0x11), (1, 0x22)]);
    // Jumps to the expansion port instead of finishing the control register
    config_write(&mut dispatcher, &mut periph, &[(40, 1), (41, 2), (42, 3), (43, 4)]);

    assert_eq!(periph.board.control_reg(), 0);
    assert_eq!(periph.board.expansion_port(), 0x0403_0201);
}

// ============================================================================
// Direct Chip Access
// ============================================================================

#[test]
fn transceiver_read() {
    let mut dispatcher = Dispatcher::default();
    let mut periph = peripherals();
    periph.transceiver.regs[0x05] = 0x3C;

    let control = ControlWord::new(Direction::Read, Device::Transceiver, 1);
    let resp = exchange(&mut dispatcher, &mut periph, control, &[Tuple::new(0x05, 0)]);

    assert_eq!(resp.tuple(0), Some(Tuple::new(0x05, 0x3C)));
    assert_eq!(dispatcher.transfer_phase(), TransferPhase::Idle);
    assert_eq!(periph.clock_synth.reads, 0);
}

#[test]
fn transceiver_write_services_first_tuple_only() {
    let mut dispatcher = Dispatcher::default();
    let mut periph = peripherals();

    let control = ControlWord::new(Direction::Write, Device::Transceiver, 3);
    let tuples = [Tuple::new(0x40, 0x01), Tuple::new(0x41, 0x02), Tuple::new(0x42, 0x03)];
    let resp = exchange_onto(
        &mut dispatcher,
        &mut periph,
        control,
        &tuples,
        ResponseFrame::new([0xEE; 16]),
    );

    assert_eq!(periph.transceiver.writes, vec![(0x40, 0x01)]);
    assert_eq!(resp.tuple(0), Some(Tuple::new(0x40, 0)));
    assert_eq!(resp.tuple(1), Some(Tuple::new(0xEE, 0xEE)));
}

#[test]
fn clock_synth_read_and_write() {
    let mut dispatcher = Dispatcher::default();
    let mut periph = peripherals();

    let write = ControlWord::new(Direction::Write, Device::ClockSynth, 1);
    exchange(&mut dispatcher, &mut periph, write, &[Tuple::new(230, 0x0F)]);
    assert_eq!(periph.clock_synth.writes, vec![(230, 0x0F)]);
    assert!(periph.transceiver.writes.is_empty());

    let read = ControlWord::new(Direction::Read, Device::ClockSynth, 1);
    let resp = exchange(&mut dispatcher, &mut periph, read, &[Tuple::new(230, 0)]);
    assert_eq!(resp.tuple(0), Some(Tuple::new(230, 0x0F)));
}

#[test]
fn chip_access_leaves_config_transfer_alone() {
    let mut dispatcher = Dispatcher::default();
    let mut periph = peripherals();

    config_write(&mut dispatcher, &mut periph, &[(0, 0x11)]);
    let phase = dispatcher.transfer_phase();

    let control = ControlWord::new(Direction::Read, Device::Transceiver, 1);
    exchange(&mut dispatcher, &mut periph, control, &[Tuple::new(1, 0)]);

    assert_eq!(dispatcher.transfer_phase(), phase);
}

// ============================================================================
// Degenerate Packets
// ============================================================================

#[test]
fn reserved_device_is_ignored() {
    let mut dispatcher = Dispatcher::default();
    let mut periph = peripherals();

    let control = ControlWord::new(Direction::Write, Device::Reserved, 1);
    let resp = exchange_onto(
        &mut dispatcher,
        &mut periph,
        control,
        &[Tuple::new(0x10, 0x20)],
        ResponseFrame::new([0xEE; 16]),
    );

    assert_eq!(resp, ResponseFrame::new([0xEE; 16]));
    assert!(periph.transceiver.writes.is_empty());
    assert!(periph.clock_synth.writes.is_empty());
}

#[test]
fn packet_without_direction_is_ignored() {
    let mut dispatcher = Dispatcher::default();
    let mut periph = peripherals();
    config_write(&mut dispatcher, &mut periph, &[(0, 0x11)]);
    let phase = dispatcher.transfer_phase();

    // Config device, count 4, neither READ nor WRITE
    let control = ControlWord::from_byte(0x04);
    let tuples = [Tuple::new(1, 0x22), Tuple::new(2, 0x33), Tuple::new(3, 0x44), Tuple::new(0, 0)];
    let resp = exchange(&mut dispatcher, &mut periph, control, &tuples);

    assert_eq!(resp, ResponseFrame::zeroed());
    assert_eq!(dispatcher.transfer_phase(), phase);
    assert_eq!(periph.board.control_reg(), 0);
}

#[test]
fn read_takes_precedence_when_both_bits_set() {
    let mut dispatcher = Dispatcher::default();
    let mut periph = peripherals();
    periph.transceiver.regs[0x07] = 0x99;

    let control = ControlWord::from_byte(0x80 | 0x40 | (1 << 4) | 1);
    let resp = exchange(&mut dispatcher, &mut periph, control, &[Tuple::new(0x07, 0x55)]);

    assert_eq!(resp.tuple(0), Some(Tuple::new(0x07, 0x99)));
    assert!(periph.transceiver.writes.is_empty());
}
