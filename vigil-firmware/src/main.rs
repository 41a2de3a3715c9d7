//! Vigil - Alarm Panel Firmware
//!
//! Three buttons select MONITOR, PANIC or OFF. The panel asserts the
//! selected mode to the alarm unit over a single-byte serial handshake and
//! shows the outcome on two LEDs.
//!
//! Board wiring (RP2040):
//! - GPIO2/3/4: MONITOR/PANIC/OFF buttons to ground (internal pull-ups)
//! - GPIO14/15: status LEDs, active-high
//! - GPIO0/1: UART0 TX/RX to the alarm unit

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use vigil_core::PanelIo;
use vigil_hal_rp2040::{uart_config, ButtonInput, EmbassyClock, LedOutput, SerialPort};

use crate::tasks::panel_task;

mod config;
mod tasks;

/// Embedded configuration (compiled into firmware)
/// Edit panel.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../panel.toml");

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 32]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 32]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Vigil panel firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load(EMBEDDED_CONFIG);

    let buttons = [
        ButtonInput::new(p.PIN_2),
        ButtonInput::new(p.PIN_3),
        ButtonInput::new(p.PIN_4),
    ];
    let leds = [LedOutput::new(p.PIN_14), LedOutput::new(p.PIN_15)];

    let tx_buf = TX_BUF.init([0u8; 32]);
    let rx_buf = RX_BUF.init([0u8; 32]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config(&config.serial));
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    info!("UART initialized at {} baud", config.serial.baudrate);

    let io = PanelIo {
        buttons,
        leds,
        serial: SerialPort::new(uart),
        clock: EmbassyClock::new(),
    };

    spawner.spawn(panel_task(io, config)).unwrap();
    info!("Panel task spawned");
}
