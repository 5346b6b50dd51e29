//! Servo drivers for the three linkage arms

pub mod pwm;

pub use pwm::{PwmServo, ServoTrio};
