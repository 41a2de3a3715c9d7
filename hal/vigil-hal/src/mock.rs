//! In-memory hardware doubles for host-side tests
//!
//! Every double borrows its backing state from the test (`Cell`/`RefCell`),
//! so the test keeps a handle to press buttons, inject peer bytes, advance
//! time and inspect LED levels while the controller owns the doubles.
//!
//! ```
//! use core::cell::Cell;
//! use vigil_hal::mock::{MockClock, MockPin, SerialLine};
//! use vigil_hal::{InputPin, Monotonic, UartRx, UartTx};
//!
//! let level = Cell::new(true);
//! let button = MockPin::new(&level);
//! level.set(false);
//! assert!(button.is_low());
//!
//! let now = Cell::new(0);
//! let clock = MockClock::new(&now);
//! now.set(250);
//! assert_eq!(clock.now_ms(), 250);
//!
//! let line = SerialLine::new();
//! let mut port = line.port();
//! port.write_byte(b'm').unwrap();
//! line.inject(b'M');
//! assert_eq!(port.try_read_byte().unwrap(), Some(b'M'));
//! assert_eq!(line.sent().as_slice(), b"m");
//! ```

use core::cell::{Cell, RefCell};

use heapless::{Deque, Vec};

use crate::clock::Monotonic;
use crate::gpio::{InputPin, OutputPin};
use crate::uart::{UartRx, UartTx};

/// Bytes the peer can have queued before injection fails
pub const RX_CAPACITY: usize = 64;

/// Bytes the transmit log holds
pub const TX_CAPACITY: usize = 512;

/// Pin backed by a shared level
///
/// Works as an input (test sets the level) or an output (test reads it).
pub struct MockPin<'a> {
    level: &'a Cell<bool>,
}

impl<'a> MockPin<'a> {
    pub fn new(level: &'a Cell<bool>) -> Self {
        Self { level }
    }
}

impl InputPin for MockPin<'_> {
    fn is_high(&self) -> bool {
        self.level.get()
    }
}

impl OutputPin for MockPin<'_> {
    fn set_high(&mut self) {
        self.level.set(true);
    }

    fn set_low(&mut self) {
        self.level.set(false);
    }

    fn is_set_high(&self) -> bool {
        self.level.get()
    }
}

/// Clock backed by a shared millisecond counter
pub struct MockClock<'a> {
    now: &'a Cell<u64>,
}

impl<'a> MockClock<'a> {
    pub fn new(now: &'a Cell<u64>) -> Self {
        Self { now }
    }
}

impl Monotonic for MockClock<'_> {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// Failure injected into a [`MockSerial`] operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MockSerialError {
    /// Write failure requested by the test
    WriteFailed,
    /// Read failure requested by the test
    ReadFailed,
    /// Transmit log is full
    TxOverflow,
}

/// Both ends of a simulated serial link
///
/// The panel side is obtained with [`SerialLine::port`]; the test plays the
/// peer through [`SerialLine::inject`] and [`SerialLine::sent`].
#[derive(Default)]
pub struct SerialLine {
    rx: RefCell<Deque<u8, RX_CAPACITY>>,
    tx: RefCell<Vec<u8, TX_CAPACITY>>,
    fail_writes: Cell<bool>,
    fail_reads: Cell<bool>,
}

impl SerialLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Panel-side port for this line
    pub fn port(&self) -> MockSerial<'_> {
        MockSerial { line: self }
    }

    /// Queue a byte from the peer; returns false if the queue is full
    pub fn inject(&self, byte: u8) -> bool {
        self.rx.borrow_mut().push_back(byte).is_ok()
    }

    /// Bytes received from the peer that the panel has not read yet
    pub fn pending_rx(&self) -> usize {
        self.rx.borrow().len()
    }

    /// Everything the panel has written so far
    pub fn sent(&self) -> Vec<u8, TX_CAPACITY> {
        self.tx.borrow().clone()
    }

    /// How many times the panel wrote `byte`
    pub fn sent_count(&self, byte: u8) -> usize {
        self.tx.borrow().iter().filter(|&&b| b == byte).count()
    }

    /// Most recent byte the panel wrote
    pub fn last_sent(&self) -> Option<u8> {
        self.tx.borrow().last().copied()
    }

    /// Make subsequent writes fail until cleared
    pub fn set_write_failure(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Make subsequent reads fail until cleared
    pub fn set_read_failure(&self, fail: bool) {
        self.fail_reads.set(fail);
    }
}

/// Panel end of a [`SerialLine`]
pub struct MockSerial<'a> {
    line: &'a SerialLine,
}

impl UartTx for MockSerial<'_> {
    type Error = MockSerialError;

    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        if self.line.fail_writes.get() {
            return Err(MockSerialError::WriteFailed);
        }
        self.line
            .tx
            .borrow_mut()
            .push(byte)
            .map_err(|_| MockSerialError::TxOverflow)
    }
}

impl UartRx for MockSerial<'_> {
    type Error = MockSerialError;

    fn try_read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        if self.line.fail_reads.get() {
            return Err(MockSerialError::ReadFailed);
        }
        Ok(self.line.rx.borrow_mut().pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_pin_writes_shared_level() {
        let level = Cell::new(false);
        let mut led = MockPin::new(&level);
        led.set_state(true);
        assert!(level.get());
        assert!(led.is_set_high());
        led.set_low();
        assert!(!level.get());
    }

    #[test]
    fn test_serial_preserves_order() {
        let line = SerialLine::new();
        let mut port = line.port();
        line.inject(b'M');
        line.inject(b'P');
        assert_eq!(line.pending_rx(), 2);
        assert_eq!(port.try_read_byte(), Ok(Some(b'M')));
        assert_eq!(port.try_read_byte(), Ok(Some(b'P')));
        assert_eq!(port.try_read_byte(), Ok(None));
    }

    #[test]
    fn test_serial_failure_injection() {
        let line = SerialLine::new();
        let mut port = line.port();

        line.set_write_failure(true);
        assert_eq!(port.write_byte(b'o'), Err(MockSerialError::WriteFailed));
        assert!(line.sent().is_empty());

        line.set_write_failure(false);
        line.set_read_failure(true);
        assert_eq!(port.write_byte(b'o'), Ok(()));
        assert_eq!(port.try_read_byte(), Err(MockSerialError::ReadFailed));
        assert_eq!(line.sent_count(b'o'), 1);
    }
}
