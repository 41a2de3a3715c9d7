//! Panel controller
//!
//! One call to [`step`] is one iteration of the panel loop:
//!
//! 1. sample the buttons and apply any mode request
//! 2. settle the mode, resetting the handshake session on a change
//! 3. run the active mode's handler (handshake, escalation, finalize)
//! 4. render and drive the LEDs
//!
//! All mutable state lives in [`ControllerState`]; all hardware lives in
//! [`PanelIo`]. [`Controller`] owns both for the common case.

use vigil_hal::gpio::Polarity;
use vigil_hal::{InputPin, Monotonic, OutputPin, Uart};

use crate::config::PanelConfig;
use crate::error::Error;
use crate::handshake::{self, HandshakeSession, Outcome};
use crate::input::InputSampler;
use crate::led::{LedIndicator, LedLevels};
use crate::state::{Event, Mode, ModeMachine, OnConfirmed, Transition};

/// Board resources the controller drives
pub struct PanelIo<B, L, S, C> {
    /// Mode buttons in channel order (MONITOR, PANIC, OFF), active-low
    pub buttons: [B; 3],
    /// Status LEDs, `true` = lit
    pub leds: [L; 2],
    /// Link to the alarm unit
    pub serial: S,
    pub clock: C,
}

/// Everything the loop remembers between iterations
#[derive(Debug, Clone)]
pub struct ControllerState {
    pub machine: ModeMachine,
    pub sampler: InputSampler,
    pub session: HandshakeSession,
    pub indicator: LedIndicator,
    pub config: PanelConfig,
}

impl ControllerState {
    pub fn new(config: PanelConfig) -> Self {
        Self {
            machine: ModeMachine::new(),
            sampler: InputSampler::new(),
            session: HandshakeSession::new(),
            indicator: LedIndicator::new(),
            config,
        }
    }

    /// LEDs blink on overtime, or on too many mismatches in strict mode
    pub fn is_failing(&self) -> bool {
        self.session.is_overtime() || self.config.mismatch_exceeded(self.session.mismatches())
    }
}

/// Summary of one loop iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Iteration {
    /// Mode whose handler ran
    pub mode: Mode,
    /// Mode change settled at the start of this iteration
    pub transition: Option<Transition>,
    pub outcome: Outcome,
    /// Levels driven onto the LEDs
    pub leds: LedLevels,
    /// The finalize message went out during this iteration
    pub finalized: bool,
}

/// Run one loop iteration
///
/// On a serial error the LEDs are still updated before the error is
/// returned; the session keeps its state so the next call retries.
pub fn step<B, L, S, C>(
    state: &mut ControllerState,
    io: &mut PanelIo<B, L, S, C>,
) -> Result<Iteration, Error>
where
    B: InputPin,
    L: OutputPin,
    S: Uart,
    C: Monotonic,
{
    let now = io.clock.now_ms();

    let asserted = [
        io.buttons[0].is_asserted(Polarity::ActiveLow),
        io.buttons[1].is_asserted(Polarity::ActiveLow),
        io.buttons[2].is_asserted(Polarity::ActiveLow),
    ];
    if let Some(mode) = state.sampler.sample(asserted) {
        state.machine.handle(Event::ButtonPressed(mode));
    }

    let transition = state.machine.settle();
    if transition.is_some() {
        state.session.reset();
    }

    let mode = state.machine.current();
    let profile = mode.profile();
    let timing = state.config.timing;

    let handled = run_handler(state, &mut io.serial, mode, now);

    let normal = profile.normal_leds(&state.session, now, timing.off_grace_ms);
    let failing = state.is_failing();
    let leds = state
        .indicator
        .render(normal, failing, now, timing.blink_interval_ms);
    for (pin, level) in io.leds.iter_mut().zip(leds.as_array()) {
        pin.set_state(level);
    }

    let (outcome, finalized) = handled?;
    Ok(Iteration {
        mode,
        transition,
        outcome,
        leds,
        finalized,
    })
}

/// Handler shared by all modes, parameterized by the mode's profile
fn run_handler<S: Uart>(
    state: &mut ControllerState,
    serial: &mut S,
    mode: Mode,
    now: u64,
) -> Result<(Outcome, bool), Error> {
    let profile = mode.profile();
    let outcome = handshake::attempt(
        &mut state.session,
        serial,
        &profile.exchange,
        now,
        state.config.timing.overtime_ms,
    )?;

    match outcome {
        Outcome::PeerEscalation(to) => {
            state.machine.handle(Event::PeerEscalation(to));
            Ok((outcome, false))
        }
        Outcome::Confirmed => match profile.on_confirmed {
            OnConfirmed::Finalize(message) if !state.session.is_finalized() => {
                serial
                    .write_byte(message.to_byte())
                    .map_err(|_| Error::SerialWrite)?;
                state.session.finalize(now);
                Ok((outcome, true))
            }
            _ => Ok((outcome, false)),
        },
        _ => Ok((outcome, false)),
    }
}

/// Controller owning its state and hardware
pub struct Controller<B, L, S, C> {
    state: ControllerState,
    io: PanelIo<B, L, S, C>,
}

impl<B, L, S, C> Controller<B, L, S, C>
where
    B: InputPin,
    L: OutputPin,
    S: Uart,
    C: Monotonic,
{
    /// Create a controller in OFF; the first step starts the OFF handshake
    pub fn new(io: PanelIo<B, L, S, C>, config: PanelConfig) -> Self {
        Self {
            state: ControllerState::new(config),
            io,
        }
    }

    /// Run one loop iteration, see [`step`]
    pub fn step(&mut self) -> Result<Iteration, Error> {
        step(&mut self.state, &mut self.io)
    }

    pub fn mode(&self) -> Mode {
        self.state.machine.current()
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn session(&self) -> &HandshakeSession {
        &self.state.session
    }

    /// Give the hardware back
    pub fn release(self) -> PanelIo<B, L, S, C> {
        self.io
    }
}
