//! H-bridge DC motor driver
//!
//! Drives a brushed DC motor through an L298-style H-bridge: two
//! direction inputs plus a PWM enable line carrying the duty. Only the
//! line states matter here; stall policy and duty escalation live in the
//! motion sequencer.

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

use verso_core::traits::{Direction, MotorDriver};

/// Full-scale value of the 8-bit duty range the sequencer commands
const DUTY_SCALE: u16 = 255;

/// H-bridge motor over two direction pins and a PWM enable channel
pub struct HBridgeMotor<IN1, IN2, EN> {
    in1: IN1,
    in2: IN2,
    enable: EN,
    duty: u8,
    running: Option<Direction>,
}

impl<IN1, IN2, EN> HBridgeMotor<IN1, IN2, EN>
where
    IN1: OutputPin,
    IN2: OutputPin,
    EN: SetDutyCycle,
{
    /// Create the driver with both direction lines low and zero duty
    pub fn new(in1: IN1, in2: IN2, enable: EN) -> Self {
        let mut motor = Self {
            in1,
            in2,
            enable,
            duty: 0,
            running: None,
        };
        motor.stop();
        let _ = motor.enable.set_duty_cycle_fully_off();
        motor
    }

    /// Get the commanded duty (0-255)
    pub fn duty(&self) -> u8 {
        self.duty
    }

    /// Get the direction the motor is currently energized in
    pub fn running(&self) -> Option<Direction> {
        self.running
    }
}

impl<IN1, IN2, EN> MotorDriver for HBridgeMotor<IN1, IN2, EN>
where
    IN1: OutputPin,
    IN2: OutputPin,
    EN: SetDutyCycle,
{
    fn set_duty(&mut self, duty: u8) {
        self.duty = duty;
        let _ = self
            .enable
            .set_duty_cycle_fraction(u16::from(duty), DUTY_SCALE);
    }

    fn run(&mut self, dir: Direction) {
        match dir {
            Direction::Forward => {
                let _ = self.in1.set_high();
                let _ = self.in2.set_low();
            }
            Direction::Reverse => {
                let _ = self.in1.set_low();
                let _ = self.in2.set_high();
            }
        }
        self.running = Some(dir);
    }

    fn stop(&mut self) {
        // Both direction lines low: coast, de-energized regardless of duty
        let _ = self.in1.set_low();
        let _ = self.in2.set_low();
        self.running = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use core::cell::Cell;
    use core::convert::Infallible;

    /// Output pin writing into a shared level cell
    struct FakePin<'a>(&'a Cell<bool>);

    impl embedded_hal::digital::ErrorType for FakePin<'_> {
        type Error = Infallible;
    }

    impl OutputPin for FakePin<'_> {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.0.set(false);
            Ok(())
        }
        fn set_high(&mut self) -> Result<(), Infallible> {
            self.0.set(true);
            Ok(())
        }
    }

    /// PWM channel recording the last raw duty value
    struct FakePwm<'a> {
        duty: &'a Cell<u16>,
        max: u16,
    }

    impl embedded_hal::pwm::ErrorType for FakePwm<'_> {
        type Error = Infallible;
    }

    impl SetDutyCycle for FakePwm<'_> {
        fn max_duty_cycle(&self) -> u16 {
            self.max
        }
        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
            self.duty.set(duty);
            Ok(())
        }
    }

    #[test]
    fn test_starts_deenergized() {
        let (in1, in2, duty) = (Cell::new(true), Cell::new(true), Cell::new(100));
        let motor = HBridgeMotor::new(
            FakePin(&in1),
            FakePin(&in2),
            FakePwm {
                duty: &duty,
                max: 1000,
            },
        );

        assert!(!in1.get());
        assert!(!in2.get());
        assert_eq!(duty.get(), 0);
        assert_eq!(motor.running(), None);
    }

    #[test]
    fn test_run_sets_direction_lines() {
        let (in1, in2, duty) = (Cell::new(false), Cell::new(false), Cell::new(0));
        let mut motor = HBridgeMotor::new(
            FakePin(&in1),
            FakePin(&in2),
            FakePwm {
                duty: &duty,
                max: 1000,
            },
        );

        motor.run(Direction::Forward);
        assert!(in1.get());
        assert!(!in2.get());
        assert_eq!(motor.running(), Some(Direction::Forward));

        motor.run(Direction::Reverse);
        assert!(!in1.get());
        assert!(in2.get());
    }

    #[test]
    fn test_stop_drops_both_lines() {
        let (in1, in2, duty) = (Cell::new(false), Cell::new(false), Cell::new(0));
        let mut motor = HBridgeMotor::new(
            FakePin(&in1),
            FakePin(&in2),
            FakePwm {
                duty: &duty,
                max: 1000,
            },
        );

        motor.set_duty(180);
        motor.run(Direction::Forward);
        motor.stop();

        assert!(!in1.get());
        assert!(!in2.get());
        assert_eq!(motor.running(), None);
        // Duty is left in place; the low direction lines de-energize
        assert_eq!(motor.duty(), 180);
    }

    #[test]
    fn test_duty_scaling() {
        let (in1, in2, duty) = (Cell::new(false), Cell::new(false), Cell::new(0));
        let mut motor = HBridgeMotor::new(
            FakePin(&in1),
            FakePin(&in2),
            FakePwm {
                duty: &duty,
                max: 1020,
            },
        );

        // 255/255 maps to the full PWM range
        motor.set_duty(255);
        assert_eq!(duty.get(), 1020);

        // 180/255 of 1020
        motor.set_duty(180);
        assert_eq!(duty.get(), 720);

        motor.set_duty(0);
        assert_eq!(duty.get(), 0);
    }
}
