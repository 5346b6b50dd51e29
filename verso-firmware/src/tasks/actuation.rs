//! Actuation controller task
//!
//! The single serialization point for all device state. Owns the session,
//! the link monitor, and the flip sequencer; every command, button press,
//! link edge, and recovery timeout is applied here, one at a time. A
//! motion program entered by a transition runs to completion before the
//! next event is consumed, so the motor can never be left in a torn state
//! by a concurrent override.

use core::sync::atomic::Ordering;

use defmt::*;
use embassy_futures::select::{select3, Either3};
use embassy_rp::gpio::{Input, Output};
use embassy_rp::pwm::PwmOutput;
use embassy_time::{block_for, Duration, Instant, Timer};

use verso_core::config::MotionConfig;
use verso_core::link::LinkMonitor;
use verso_core::motion::{FlipSequencer, SequenceOutcome};
use verso_core::session::{Session, StateNotifier};
use verso_core::state::{DeviceState, Event};
use verso_core::traits::Timebase;
use verso_drivers::alert::Buzzer;
use verso_drivers::motor::HBridgeMotor;
use verso_drivers::sensor::ProximitySwitch;
use verso_drivers::servo::{PwmServo, ServoTrio};

use crate::channels::{
    BUTTON_CHANNEL, COMMAND_CHANNEL, END_OF_PROGRAM, LINK_TRAFFIC, NOTIFY_CHANNEL,
};

/// Supervision tick interval (link timeout, recovery timeout)
const TICK_MS: u64 = 100;

/// Time after which an unacknowledged Done/Error returns to idle
const RECOVERY_TIMEOUT_MS: u32 = 10_000;

/// Motor hardware as wired on this board
pub type BoardMotor = HBridgeMotor<Output<'static>, Output<'static>, PwmOutput<'static>>;

/// Servo bank hardware as wired on this board
pub type BoardServos = ServoTrio<
    PwmServo<PwmOutput<'static>>,
    PwmServo<PwmOutput<'static>>,
    PwmServo<PwmOutput<'static>>,
>;

/// Proximity sensor hardware
pub type BoardSensor = ProximitySwitch<Input<'static>>;

/// Buzzer hardware
pub type BoardAlert = Buzzer<Output<'static>>;

/// Blocking timebase over the embassy monotonic clock.
///
/// The motion programs block the executor by design; they are
/// run-to-completion and must not interleave with other events.
struct EmbassyTimebase;

impl Timebase for EmbassyTimebase {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }

    fn delay_ms(&mut self, ms: u32) {
        block_for(Duration::from_millis(u64::from(ms)));
    }
}

/// Pushes committed state changes to the notify channel and the console
struct ChannelNotifier;

impl StateNotifier for ChannelNotifier {
    fn state_changed(&mut self, state: DeviceState) {
        info!("State changed to: {}", state.token());
        if NOTIFY_CHANNEL.try_send(state).is_err() {
            warn!("Notify channel full, dropping state change");
        }
    }
}

/// Actuation task - session state machine plus motion program execution
#[embassy_executor::task]
pub async fn actuation_task(
    motor: BoardMotor,
    servos: BoardServos,
    sensor: BoardSensor,
    alert: BoardAlert,
) {
    info!("Actuation task started");

    let mut sequencer = FlipSequencer::new(
        MotionConfig::default(),
        motor,
        servos,
        sensor,
        alert,
        EmbassyTimebase,
    );
    let mut session = Session::new(ChannelNotifier);
    let mut link = LinkMonitor::new();

    let mut last_tick = Instant::now();
    let mut recovery_ms: u32 = 0;

    loop {
        let changed = match select3(
            COMMAND_CHANNEL.receive(),
            BUTTON_CHANNEL.receive(),
            Timer::after_millis(TICK_MS),
        )
        .await
        {
            Either3::First(cmd) => session.handle_command(cmd),
            Either3::Second(button) => session.handle_button(button),
            Either3::Third(()) => {
                let delta_ms = last_tick.elapsed().as_millis() as u32;
                last_tick = Instant::now();

                // Drain traffic first so a queued byte cannot count as
                // silence
                let edge = if LINK_TRAFFIC.signaled() {
                    LINK_TRAFFIC.reset();
                    link.traffic_received()
                } else {
                    link.update_time(delta_ms)
                };

                // Unacknowledged terminal states return to idle on their
                // own
                let timed_out = if session.state().awaits_acknowledge() {
                    recovery_ms = recovery_ms.saturating_add(delta_ms);
                    recovery_ms >= RECOVERY_TIMEOUT_MS
                } else {
                    recovery_ms = 0;
                    false
                };

                if let Some(event) = edge {
                    session.apply(event)
                } else if timed_out {
                    recovery_ms = 0;
                    debug!("Recovery timeout, returning to idle");
                    session.apply(Event::Acknowledge)
                } else {
                    None
                }
            }
        };

        // A transition into a motion-program state runs that program to
        // completion before any further event is consumed
        match changed {
            Some(DeviceState::Initializing) => {
                info!("Homing");
                sequencer.home();
                // The blocking program stalled the tick clock; the pause
                // is not link silence
                last_tick = Instant::now();
                session.apply(Event::HomingComplete {
                    link_up: link.is_up(),
                });
            }
            Some(DeviceState::Flipping) => {
                info!("Flipping");
                let outcome = sequencer.flip();
                last_tick = Instant::now();

                let event = match outcome {
                    SequenceOutcome::Completed => Event::FlipFinished {
                        end_of_program: END_OF_PROGRAM.load(Ordering::Relaxed),
                    },
                    SequenceOutcome::Aborted(reason) => {
                        warn!("Flip aborted: {:?}", reason);
                        Event::FlipAborted
                    }
                };
                session.apply(event);
            }
            _ => {}
        }
    }
}
