//! Hobby servo PWM driver
//!
//! Standard 50 Hz servo signalling: a 500 µs pulse is 0°, 2500 µs is
//! 180°, over a 20 ms frame. The PWM channel must be configured for a
//! 20 ms period before it is handed to the driver.

use embedded_hal::pwm::SetDutyCycle;

use verso_core::traits::{ServoBank, ServoDriver};

/// Pulse width at 0° (µs)
const MIN_PULSE_US: u32 = 500;
/// Pulse width at 180° (µs)
const MAX_PULSE_US: u32 = 2500;
/// PWM frame length at 50 Hz (µs)
const PERIOD_US: u32 = 20_000;
/// Servo travel ceiling (degrees)
const MAX_ANGLE: u8 = 180;

/// One servo channel over a PWM output
pub struct PwmServo<P> {
    pwm: P,
    angle: u8,
}

impl<P: SetDutyCycle> PwmServo<P> {
    /// Create a servo driver on the given 50 Hz PWM channel
    pub fn new(pwm: P) -> Self {
        Self { pwm, angle: 0 }
    }

    /// Last commanded angle (degrees)
    pub fn angle(&self) -> u8 {
        self.angle
    }

    /// Convert an angle (0-180) to the raw duty value for this channel
    fn angle_to_duty(&self, deg: u8) -> u16 {
        let deg = u32::from(deg.min(MAX_ANGLE));
        let pulse_us = MIN_PULSE_US + deg * (MAX_PULSE_US - MIN_PULSE_US) / u32::from(MAX_ANGLE);
        let max_duty = u32::from(self.pwm.max_duty_cycle());
        (pulse_us * max_duty / PERIOD_US) as u16
    }
}

impl<P: SetDutyCycle> ServoDriver for PwmServo<P> {
    fn set_angle(&mut self, deg: u8) {
        let deg = deg.min(MAX_ANGLE);
        self.angle = deg;
        let duty = self.angle_to_duty(deg);
        let _ = self.pwm.set_duty_cycle(duty);
    }
}

/// The three linkage servos bundled into one output sink
pub struct ServoTrio<W, S, P> {
    wheel: W,
    swipe: S,
    pressure: P,
}

impl<W, S, P> ServoTrio<W, S, P>
where
    W: ServoDriver,
    S: ServoDriver,
    P: ServoDriver,
{
    /// Bundle the wheel, swipe, and pressure servos
    pub fn new(wheel: W, swipe: S, pressure: P) -> Self {
        Self {
            wheel,
            swipe,
            pressure,
        }
    }
}

impl<W, S, P> ServoBank for ServoTrio<W, S, P>
where
    W: ServoDriver,
    S: ServoDriver,
    P: ServoDriver,
{
    fn set_wheel(&mut self, deg: u8) {
        self.wheel.set_angle(deg);
    }

    fn set_swipe(&mut self, deg: u8) {
        self.swipe.set_angle(deg);
    }

    fn set_pressure(&mut self, deg: u8) {
        self.pressure.set_angle(deg);
    }
}
