//! Homing and flip motion programs
//!
//! [`FlipSequencer`] drives the whole mechanism through its two blocking
//! motion programs. `home()` parks every linkage at its reference angle;
//! `flip()` lowers the feed wheel onto the page stack until the proximity
//! sensor confirms contact, escalating motor drive once on a stall and
//! giving up after a second stall, then runs the fixed swipe/raise/press
//! sequence.
//!
//! Both programs run to completion on the caller's context. The sequencer
//! is not reentrant: wheel position and escalation are single-instance
//! state, so concurrent invocation is forbidden (the firmware confines all
//! calls to one task). Whatever the outcome, the motor is de-energized
//! before either program returns.

use crate::config::MotionConfig;
use crate::traits::{AlertSignal, Direction, MotorDriver, ProximitySensor, ServoBank, Timebase};

/// Number of pulses in the abort alert pattern
const ABORT_PULSES: u8 = 3;

/// How far the stall escalation has progressed within one flip call.
///
/// Escalation only ever increases during a call and resets to `Normal` at
/// the start of the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StallEscalation {
    /// First attempt at normal drive strength
    Normal,
    /// Retrying at maximum drive strength after one stall
    Boosted,
    /// Second stall hit; the attempt was abandoned
    Aborted,
}

/// Why a flip program gave up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AbortReason {
    /// The wheel stalled twice without the sensor confirming contact
    StallTimeout,
}

/// Outcome of one flip program run, consumed once by the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequenceOutcome {
    /// Contact confirmed and the page was swiped, raised, and pressed
    Completed,
    /// The program aborted; no page was turned
    Aborted(AbortReason),
}

impl SequenceOutcome {
    /// Check if this outcome reports a completed flip
    pub fn is_completed(&self) -> bool {
        matches!(self, SequenceOutcome::Completed)
    }
}

/// Executes the homing and flip motion programs against the hardware seams
pub struct FlipSequencer<M, S, P, B, T> {
    config: MotionConfig,
    motor: M,
    servos: S,
    sensor: P,
    alert: B,
    time: T,
    /// Current wheel arm angle; owned here for the duration of a run
    wheel_deg: u8,
    escalation: StallEscalation,
}

impl<M, S, P, B, T> FlipSequencer<M, S, P, B, T>
where
    M: MotorDriver,
    S: ServoBank,
    P: ProximitySensor,
    B: AlertSignal,
    T: Timebase,
{
    /// Create a sequencer over the given hardware
    pub fn new(config: MotionConfig, motor: M, servos: S, sensor: P, alert: B, time: T) -> Self {
        let wheel_deg = config.wheel_home_deg;
        Self {
            config,
            motor,
            servos,
            sensor,
            alert,
            time,
            wheel_deg,
            escalation: StallEscalation::Normal,
        }
    }

    /// Get the calibration in use
    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    /// Current wheel arm angle in degrees
    pub fn wheel_deg(&self) -> u8 {
        self.wheel_deg
    }

    /// Escalation level of the most recent flip call
    pub fn escalation(&self) -> StallEscalation {
        self.escalation
    }

    /// Park every linkage at its reference angle.
    ///
    /// No sensor gating; always succeeds. Finishes with one long buzzer
    /// pulse so the operator hears the mechanism is ready to load.
    pub fn home(&mut self) {
        self.wheel_deg = self.config.wheel_home_deg;
        self.servos.set_wheel(self.wheel_deg);
        self.servos.set_swipe(0);
        self.servos.set_pressure(0);

        self.pulse(self.config.homing_pulse_ms, 1);
    }

    /// Run the flip program.
    ///
    /// Lowers the wheel until the proximity sensor confirms contact,
    /// escalating drive strength once on a stall; a second stall abandons
    /// the attempt. The motor is stopped the moment the feed loop exits,
    /// and the swipe sequence only runs on a confirmed contact.
    pub fn flip(&mut self) -> SequenceOutcome {
        self.escalation = StallEscalation::Normal;
        self.motor.set_duty(self.config.motor_normal_duty);
        self.wheel_deg = self.config.wheel_lowered_deg;
        self.servos.set_wheel(self.wheel_deg);
        self.time.delay_ms(self.config.lower_settle_ms);

        self.motor.run(Direction::Forward);
        self.feed_until_contact();
        // De-energize before any further motion, success or abort
        self.motor.stop();

        if self.escalation == StallEscalation::Aborted {
            return SequenceOutcome::Aborted(AbortReason::StallTimeout);
        }

        self.swipe_and_press();
        SequenceOutcome::Completed
    }

    /// Feed the wheel downward until the sensor confirms contact or the
    /// double-stall policy abandons the attempt.
    ///
    /// One single-degree increment per feed period, paced by deadline
    /// against the monotonic clock so a fast polling loop cannot step
    /// faster than the mechanism. The stall-threshold check and the
    /// proximity check are independent: contact at the threshold angle
    /// still exits successfully.
    fn feed_until_contact(&mut self) {
        let mut next_step_ms = self.time.now_ms() + u64::from(self.config.feed_step_ms);

        while !self.sensor.target_reached() {
            if self.wheel_deg >= self.config.wheel_stall_deg {
                match self.escalation {
                    StallEscalation::Normal => {
                        self.pulse(self.config.stall_pulse_ms, 1);
                        self.wheel_deg = self.config.wheel_lowered_deg;
                        self.servos.set_wheel(self.wheel_deg);
                        self.motor.set_duty(self.config.motor_boost_duty);
                        self.escalation = StallEscalation::Boosted;
                        // The alert blocked past the deadline; restart the
                        // period so the pulse does not bank increments
                        next_step_ms = self.time.now_ms() + u64::from(self.config.feed_step_ms);
                    }
                    StallEscalation::Boosted | StallEscalation::Aborted => {
                        self.pulse(self.config.abort_pulse_ms, ABORT_PULSES);
                        self.escalation = StallEscalation::Aborted;
                        break;
                    }
                }
            }

            if self.time.now_ms() >= next_step_ms {
                next_step_ms = self.time.now_ms() + u64::from(self.config.feed_step_ms);
                self.wheel_deg += 1;
                self.servos.set_wheel(self.wheel_deg);
            }

            self.time.delay_ms(self.config.poll_interval_ms);
        }
    }

    /// Carry the lifted page across and press it flat.
    ///
    /// Every pause is travel time the linkage physically needs; the next
    /// command must not be issued early.
    fn swipe_and_press(&mut self) {
        for i in 0..self.config.swipe_stage_degs.len() {
            self.servos.set_swipe(self.config.swipe_stage_degs[i]);
            self.time.delay_ms(self.config.swipe_stage_pause_ms[i]);
        }

        self.wheel_deg = self.config.wheel_home_deg;
        self.servos.set_wheel(self.wheel_deg);
        self.time.delay_ms(self.config.wheel_raise_pause_ms);

        self.servos.set_swipe(self.config.swipe_extended_deg);
        self.time.delay_ms(self.config.swipe_extended_pause_ms);
        self.servos.set_pressure(self.config.pressure_deg);
        self.time.delay_ms(self.config.pressure_pause_ms);

        self.servos.set_swipe(0);
        self.servos.set_pressure(0);
        self.time.delay_ms(self.config.reset_pause_ms);
    }

    /// Emit `count` buzzer pulses of `on_ms`, with equal gaps between them
    fn pulse(&mut self, on_ms: u32, count: u8) {
        for i in 0..count {
            if i > 0 {
                self.time.delay_ms(on_ms);
            }
            self.alert.set_active(true);
            self.time.delay_ms(on_ms);
            self.alert.set_active(false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::vec::Vec;

    /// Everything the sequencer did to the hardware, in order
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Action {
        MotorDuty(u8),
        MotorRun(Direction),
        MotorStop,
        Wheel(u8),
        Swipe(u8),
        Pressure(u8),
        AlertOn,
        AlertOff,
    }

    type Log = Rc<RefCell<Vec<Action>>>;

    struct MotorMock(Log);

    impl MotorDriver for MotorMock {
        fn set_duty(&mut self, duty: u8) {
            self.0.borrow_mut().push(Action::MotorDuty(duty));
        }
        fn run(&mut self, dir: Direction) {
            self.0.borrow_mut().push(Action::MotorRun(dir));
        }
        fn stop(&mut self) {
            self.0.borrow_mut().push(Action::MotorStop);
        }
    }

    struct ServoMock(Log);

    impl ServoBank for ServoMock {
        fn set_wheel(&mut self, deg: u8) {
            self.0.borrow_mut().push(Action::Wheel(deg));
        }
        fn set_swipe(&mut self, deg: u8) {
            self.0.borrow_mut().push(Action::Swipe(deg));
        }
        fn set_pressure(&mut self, deg: u8) {
            self.0.borrow_mut().push(Action::Pressure(deg));
        }
    }

    struct AlertMock(Log);

    impl AlertSignal for AlertMock {
        fn set_active(&mut self, on: bool) {
            self.0.borrow_mut().push(if on {
                Action::AlertOn
            } else {
                Action::AlertOff
            });
        }
    }

    /// Sensor that reports contact after a fixed number of polls
    struct ScriptedSensor {
        false_polls: usize,
        polls: usize,
    }

    impl ScriptedSensor {
        fn never() -> Self {
            Self {
                false_polls: usize::MAX,
                polls: 0,
            }
        }

        fn after(false_polls: usize) -> Self {
            Self {
                false_polls,
                polls: 0,
            }
        }
    }

    impl ProximitySensor for ScriptedSensor {
        fn target_reached(&mut self) -> bool {
            self.polls += 1;
            self.polls > self.false_polls
        }
    }

    /// Fake clock: delays advance the monotonic count instantly
    struct FakeTime(Rc<Cell<u64>>);

    impl Timebase for FakeTime {
        fn now_ms(&self) -> u64 {
            self.0.get()
        }
        fn delay_ms(&mut self, ms: u32) {
            self.0.set(self.0.get() + u64::from(ms));
        }
    }

    fn sequencer(
        config: MotionConfig,
        sensor: ScriptedSensor,
    ) -> (
        FlipSequencer<MotorMock, ServoMock, ScriptedSensor, AlertMock, FakeTime>,
        Log,
    ) {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let seq = FlipSequencer::new(
            config,
            MotorMock(log.clone()),
            ServoMock(log.clone()),
            sensor,
            AlertMock(log.clone()),
            FakeTime(Rc::new(Cell::new(0))),
        );
        (seq, log)
    }

    fn count(log: &Log, action: Action) -> usize {
        log.borrow().iter().filter(|a| **a == action).count()
    }

    #[test]
    fn test_home_parks_all_linkages() {
        let (mut seq, log) = sequencer(MotionConfig::default(), ScriptedSensor::never());

        seq.home();

        let actions = log.borrow();
        assert_eq!(
            *actions,
            [
                Action::Wheel(5),
                Action::Swipe(0),
                Action::Pressure(0),
                Action::AlertOn,
                Action::AlertOff,
            ]
        );
        assert_eq!(seq.wheel_deg(), 5);
    }

    #[test]
    fn test_flip_immediate_contact_runs_full_swipe() {
        let (mut seq, log) = sequencer(MotionConfig::default(), ScriptedSensor::after(0));

        let outcome = seq.flip();
        assert_eq!(outcome, SequenceOutcome::Completed);

        let actions = log.borrow();
        assert_eq!(
            *actions,
            [
                // Lowering setup
                Action::MotorDuty(180),
                Action::Wheel(135),
                Action::MotorRun(Direction::Forward),
                // Contact confirmed before any feed increment
                Action::MotorStop,
                // Swipe staging
                Action::Swipe(33),
                Action::Swipe(67),
                Action::Swipe(100),
                // Raise, extend, press, reset
                Action::Wheel(5),
                Action::Swipe(180),
                Action::Pressure(170),
                Action::Swipe(0),
                Action::Pressure(0),
            ]
        );
    }

    #[test]
    fn test_flip_double_stall_aborts() {
        let (mut seq, log) = sequencer(MotionConfig::default(), ScriptedSensor::never());

        let outcome = seq.flip();
        assert_eq!(outcome, SequenceOutcome::Aborted(AbortReason::StallTimeout));
        assert_eq!(seq.escalation(), StallEscalation::Aborted);

        let actions = log.borrow();

        // The wheel hits the stall threshold exactly twice
        assert_eq!(count(&log, Action::Wheel(143)), 2);

        // Duty strictly increases across the one-shot escalation
        let duties: Vec<u8> = actions
            .iter()
            .filter_map(|a| match a {
                Action::MotorDuty(d) => Some(*d),
                _ => None,
            })
            .collect();
        assert_eq!(duties, [180, 255]);

        // De-energized after the call, and only stopped once
        assert_eq!(actions.last(), Some(&Action::MotorStop));
        assert_eq!(count(&log, Action::MotorStop), 1);

        // No swipe motion after an abort
        assert_eq!(count(&log, Action::Swipe(33)), 0);

        // One stall warning pulse plus the three-pulse abort pattern
        assert_eq!(count(&log, Action::AlertOn), 4);
        assert_eq!(count(&log, Action::AlertOff), 4);
    }

    #[test]
    fn test_flip_feed_resets_between_attempts() {
        let (mut seq, log) = sequencer(MotionConfig::default(), ScriptedSensor::never());

        seq.flip();

        // Both passes feed the full span: 135..=143 twice
        let wheels: Vec<u8> = log
            .borrow()
            .iter()
            .filter_map(|a| match a {
                Action::Wheel(d) => Some(*d),
                _ => None,
            })
            .collect();

        let mut expected: Vec<u8> = Vec::new();
        expected.extend(135..=143);
        expected.extend(135..=143);
        assert_eq!(wheels, expected);
    }

    #[test]
    fn test_flip_contact_mid_feed_completes() {
        // Contact confirmed after ~2.5 feed periods of polling
        let config = MotionConfig::default();
        let polls = (config.feed_step_ms * 5 / 2) as usize;
        let (mut seq, log) = sequencer(config, ScriptedSensor::after(polls));

        let outcome = seq.flip();
        assert_eq!(outcome, SequenceOutcome::Completed);
        assert_eq!(seq.escalation(), StallEscalation::Normal);

        // Two increments happened before contact, none after
        assert_eq!(count(&log, Action::Wheel(136)), 1);
        assert_eq!(count(&log, Action::Wheel(137)), 1);
        assert_eq!(count(&log, Action::Wheel(138)), 0);

        // The full swipe sequence still ran
        assert_eq!(count(&log, Action::Swipe(33)), 1);
        assert_eq!(count(&log, Action::Swipe(180)), 1);
        assert_eq!(count(&log, Action::Pressure(170)), 1);
    }

    #[test]
    fn test_feed_steps_once_per_period() {
        // Slow geometry: 5 ms period, contact after 12 polls (1 ms each)
        let config = MotionConfig {
            feed_step_ms: 5,
            lower_settle_ms: 0,
            ..Default::default()
        };
        let (mut seq, log) = sequencer(config, ScriptedSensor::after(11));

        let outcome = seq.flip();
        assert_eq!(outcome, SequenceOutcome::Completed);

        // 11 ms of polling at a 5 ms period: exactly two increments
        assert_eq!(count(&log, Action::Wheel(136)), 1);
        assert_eq!(count(&log, Action::Wheel(137)), 1);
        assert_eq!(count(&log, Action::Wheel(138)), 0);
    }

    #[test]
    fn test_contact_at_threshold_still_completes() {
        // Sensor trips just as the wheel sits at the stall threshold:
        // the proximity check wins over the stall check
        let config = MotionConfig {
            wheel_lowered_deg: 141,
            wheel_stall_deg: 143,
            feed_step_ms: 2,
            lower_settle_ms: 0,
            stall_pulse_ms: 1,
            ..Default::default()
        };
        // Increments land during polls 3 and 5; poll 6 sees the wheel at
        // the threshold and reports contact before the stall check runs
        let (mut seq, log) = sequencer(config, ScriptedSensor::after(5));

        let outcome = seq.flip();
        assert_eq!(outcome, SequenceOutcome::Completed);
        assert_eq!(count(&log, Action::Wheel(143)), 1);
        // No stall warning fired
        assert_eq!(count(&log, Action::AlertOn), 0);
    }

    #[test]
    fn test_escalation_resets_each_call() {
        let (mut seq, _log) = sequencer(MotionConfig::default(), ScriptedSensor::never());

        seq.flip();
        assert_eq!(seq.escalation(), StallEscalation::Aborted);

        // The next call starts over at normal escalation; with contact
        // confirmed immediately it completes
        seq.sensor = ScriptedSensor::after(0);
        let outcome = seq.flip();
        assert_eq!(outcome, SequenceOutcome::Completed);
        assert_eq!(seq.escalation(), StallEscalation::Normal);
    }
}
