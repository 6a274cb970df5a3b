//! SDR Control Processor Main Application
//!
//! Brings up the host link and the chip buses, then serves legacy command
//! packets one at a time for as long as the board is powered.

#![no_std]
#![no_main]

use embassy_executor::Spawner;
use embassy_futures::select::{select, Either};
use embassy_stm32::gpio::{Level, Output, Speed};
use embassy_stm32::i2c::I2c;
use embassy_stm32::spi::{self, Spi};
use embassy_stm32::time::Hertz;
use embassy_stm32::usart::{self, Uart};
use embassy_stm32::{bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embedded_io_async::Write;
use {defmt_rtt as _, panic_probe as _};

use sdr_command_firmware::board::{EmbassyTicks, ShadowBoard};
use sdr_command_firmware::drivers::{Lms6, Si5338};
use sdr_command_firmware::link::FrameAssembler;
use sdr_command_firmware::prelude::*;

// Bind interrupt handlers
bind_interrupts!(struct Irqs {
    USART1 => usart::InterruptHandler<peripherals::USART1>;
});

/// Raised after every answered packet
static ACTIVITY: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("SDR command firmware v{}", env!("CARGO_PKG_VERSION"));

    let p = embassy_stm32::init(embassy_stm32::Config::default());

    let led = Output::new(p.PA5, Level::Low, Speed::Low);

    // Si5338 on I2C1: PB8 = SCL, PB9 = SDA
    let i2c = I2c::new_blocking(
        p.I2C1,
        p.PB8,
        p.PB9,
        Hertz(I2C_FREQUENCY_HZ),
        Default::default(),
    );
    let mut clock_synth = Si5338::new(i2c);
    match clock_synth.revision() {
        Ok(rev) => info!("Si5338 revision {}", rev),
        Err(_) => warn!("Si5338 not responding at 0x{:02X}", clock_synth.address()),
    }

    // LMS6002D on SPI1 with a GPIO chip select
    let mut spi_config = spi::Config::default();
    spi_config.frequency = Hertz(LMS_SPI_FREQUENCY_HZ);
    let spi = Spi::new_blocking(p.SPI1, p.PB3, p.PB5, p.PB4, spi_config);
    let cs = Output::new(p.PA4, Level::High, Speed::VeryHigh);
    let mut transceiver = Lms6::new(spi, cs);
    match transceiver.chip_id() {
        Ok(id) => info!("LMS6002D chip id 0x{:02X}", id),
        Err(_) => warn!("LMS6002D not responding"),
    }

    // Host link on USART1: PA9 = TX, PA10 = RX
    let mut uart_config = usart::Config::default();
    uart_config.baudrate = HOST_UART_BAUD;
    let uart = Uart::new(
        p.USART1,
        p.PA10,
        p.PA9,
        Irqs,
        p.DMA1_CH1,
        p.DMA1_CH2,
        uart_config,
    )
    .unwrap();
    let (mut tx, mut rx) = uart.split();

    info!("Host link at {} baud", HOST_UART_BAUD);

    spawner.spawn(heartbeat_task(led)).unwrap();

    let board = ShadowBoard::new(EmbassyTicks);
    let mut periph = Peripherals::new(transceiver, clock_synth, board);
    let mut dispatcher = Dispatcher::new(DEFAULT_SEQUENCE_POLICY);
    let mut assembler = FrameAssembler::new();
    let mut chunk = [0u8; HOST_RX_CHUNK];

    loop {
        let n = match rx.read_until_idle(&mut chunk).await {
            Ok(n) => n,
            Err(_) => {
                // Byte alignment is lost; start over on a fresh frame
                warn!("host link receive error, resynchronising");
                assembler.clear();
                dispatcher.reset();
                continue;
            }
        };

        for req in assembler.extend(&chunk[..n]) {
            let mut packet = Packet::new(req);
            dispatcher.dispatch(&mut packet, &mut periph);

            if tx.write_all(packet.resp.as_bytes()).await.is_err() {
                warn!("host link transmit error");
            }
            ACTIVITY.signal(());
        }
    }
}

/// Heartbeat task - blinks the LED, with a short flash per answered packet
#[embassy_executor::task]
async fn heartbeat_task(mut led: Output<'static>) {
    loop {
        led.toggle();
        let tick = Timer::after(Duration::from_millis(HEARTBEAT_MS));
        if let Either::Second(()) = select(tick, ACTIVITY.wait()).await {
            led.toggle();
            Timer::after(Duration::from_millis(ACTIVITY_FLASH_MS)).await;
        }
    }
}
