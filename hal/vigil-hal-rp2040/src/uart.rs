//! Non-blocking byte serial over `embedded-io`
//!
//! The panel loop must never wait on the link, so reads first check
//! [`ReadReady`] and only then pull a single byte from the receive buffer.

use embassy_rp::uart;
use embedded_io::{Error as _, ErrorKind, Read, ReadReady, Write};
use vigil_hal::uart::{DataBits, Parity, StopBits};
use vigil_hal::{UartConfig, UartRx, UartTx};

/// Translate the panel's link format into an embassy-rp UART config
pub fn uart_config(config: &UartConfig) -> uart::Config {
    let mut out = uart::Config::default();
    out.baudrate = config.baudrate;
    out.data_bits = match config.data_bits {
        DataBits::Seven => uart::DataBits::DataBits7,
        DataBits::Eight => uart::DataBits::DataBits8,
    };
    out.parity = match config.parity {
        Parity::None => uart::Parity::ParityNone,
        Parity::Even => uart::Parity::ParityEven,
        Parity::Odd => uart::Parity::ParityOdd,
    };
    out.stop_bits = match config.stop_bits {
        StopBits::One => uart::StopBits::STOP1,
        StopBits::Two => uart::StopBits::STOP2,
    };
    out
}

/// UART fault as reported by the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SerialError {
    /// Framing, parity or break condition on receive
    InvalidData,
    /// Driver accepted no bytes
    WriteZero,
    /// Any other driver error
    Other,
}

impl From<ErrorKind> for SerialError {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::InvalidData => SerialError::InvalidData,
            ErrorKind::WriteZero => SerialError::WriteZero,
            _ => SerialError::Other,
        }
    }
}

/// Serial link to the alarm unit
pub struct SerialPort<U> {
    uart: U,
}

impl<U> SerialPort<U> {
    pub fn new(uart: U) -> Self {
        Self { uart }
    }
}

impl<U: Write> UartTx for SerialPort<U> {
    type Error = SerialError;

    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        match self.uart.write(&[byte]) {
            Ok(0) => Err(SerialError::WriteZero),
            Ok(_) => Ok(()),
            Err(e) => Err(e.kind().into()),
        }
    }
}

impl<U: Read + ReadReady> UartRx for SerialPort<U> {
    type Error = SerialError;

    fn try_read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        if !self.uart.read_ready().map_err(|e| SerialError::from(e.kind()))? {
            return Ok(None);
        }
        let mut byte = [0u8; 1];
        match self.uart.read(&mut byte) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(byte[0])),
            Err(e) => Err(e.kind().into()),
        }
    }
}
