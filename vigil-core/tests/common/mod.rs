//! Shared test bench: mock buttons, LEDs, serial line and clock

#![allow(dead_code)]

use core::cell::Cell;

use vigil_core::config::PanelConfig;
use vigil_core::led::LedLevels;
use vigil_core::{Controller, Iteration, PanelIo};
use vigil_hal::mock::{MockClock, MockPin, MockSerial, SerialLine};

pub type MockController<'a> =
    Controller<MockPin<'a>, MockPin<'a>, MockSerial<'a>, MockClock<'a>>;

pub const MONITOR_BUTTON: usize = 0;
pub const PANIC_BUTTON: usize = 1;
pub const OFF_BUTTON: usize = 2;

/// Board state the test controls and observes
pub struct Bench {
    buttons: [Cell<bool>; 3],
    leds: [Cell<bool>; 2],
    now: Cell<u64>,
    pub line: SerialLine,
}

impl Bench {
    pub fn new() -> Self {
        Self {
            // Pull-ups: released buttons read high
            buttons: [Cell::new(true), Cell::new(true), Cell::new(true)],
            leds: [Cell::new(false), Cell::new(false)],
            now: Cell::new(0),
            line: SerialLine::new(),
        }
    }

    pub fn controller(&self, config: PanelConfig) -> MockController<'_> {
        let io = PanelIo {
            buttons: [
                MockPin::new(&self.buttons[0]),
                MockPin::new(&self.buttons[1]),
                MockPin::new(&self.buttons[2]),
            ],
            leds: [MockPin::new(&self.leds[0]), MockPin::new(&self.leds[1])],
            serial: self.line.port(),
            clock: MockClock::new(&self.now),
        };
        Controller::new(io, config)
    }

    pub fn press(&self, button: usize) {
        self.buttons[button].set(false);
    }

    pub fn release(&self, button: usize) {
        self.buttons[button].set(true);
    }

    pub fn set_time(&self, ms: u64) {
        self.now.set(ms);
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn now(&self) -> u64 {
        self.now.get()
    }

    /// Levels currently on the LED pins
    pub fn leds(&self) -> LedLevels {
        LedLevels::new(self.leds[0].get(), self.leds[1].get())
    }

    /// Press and release a button across two iterations
    pub fn tap(&self, controller: &mut MockController<'_>, button: usize) -> Iteration {
        self.press(button);
        let iteration = controller.step().unwrap();
        self.release(button);
        iteration
    }

    /// Step every `tick` ms until `until` (inclusive), collecting iterations
    pub fn run_until(
        &self,
        controller: &mut MockController<'_>,
        until: u64,
        tick: u64,
    ) -> Vec<Iteration> {
        let mut iterations = Vec::new();
        while self.now() + tick <= until {
            self.advance(tick);
            iterations.push(controller.step().unwrap());
        }
        iterations
    }
}
