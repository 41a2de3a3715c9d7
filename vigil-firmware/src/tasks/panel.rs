//! Panel control loop
//!
//! Runs [`Controller::step`] forever. The loop never awaits I/O; it only
//! yields to the executor between iterations.

use defmt::*;
use embassy_futures::yield_now;
use embassy_rp::uart::BufferedUart;

use vigil_core::config::PanelConfig;
use vigil_core::handshake::Outcome;
use vigil_core::{Controller, Error, Iteration, PanelIo};
use vigil_hal_rp2040::{ButtonInput, EmbassyClock, LedOutput, SerialPort};

/// Concrete board resources for the panel
pub type PanelHardware = PanelIo<
    ButtonInput<'static>,
    LedOutput<'static>,
    SerialPort<BufferedUart>,
    EmbassyClock,
>;

/// Panel task - owns all panel hardware and state
#[embassy_executor::task]
pub async fn panel_task(io: PanelHardware, config: PanelConfig) {
    info!("Panel task started");

    let mut controller = Controller::new(io, config);
    let mut last_outcome: Option<Outcome> = None;
    let mut last_error: Option<Error> = None;

    loop {
        match controller.step() {
            Ok(iteration) => {
                if last_error.take().is_some() {
                    info!("Serial link recovered");
                }
                log_iteration(&iteration, last_outcome);
                last_outcome = Some(iteration.outcome);
            }
            Err(e) => {
                if last_error != Some(e) {
                    warn!("Serial error: {:?}", e);
                }
                last_error = Some(e);
            }
        }

        yield_now().await;
    }
}

/// Log what changed in this iteration
fn log_iteration(iteration: &Iteration, last_outcome: Option<Outcome>) {
    if let Some(transition) = iteration.transition {
        info!("Mode {:?} -> {:?}", transition.from, transition.to);
    }

    match iteration.outcome {
        Outcome::Confirmed if last_outcome != Some(Outcome::Confirmed) => {
            info!("{:?} confirmed by alarm unit", iteration.mode);
        }
        Outcome::Overtime => {
            warn!("{:?}: no reply, resending", iteration.mode);
        }
        Outcome::Mismatch(count) => {
            debug!("{:?}: unexpected reply ({} in a row)", iteration.mode, count);
        }
        Outcome::PeerEscalation(to) => {
            warn!("Alarm unit escalated {:?} -> {:?}", iteration.mode, to);
        }
        _ => trace!("{:?}", iteration.outcome),
    }

    if iteration.finalized {
        info!("{:?} finalized, LEDs {:?}", iteration.mode, iteration.leds);
    }
}
