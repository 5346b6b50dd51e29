//! Wheel motor driver trait
//!
//! The feed motor is a brushed DC motor behind an H-bridge: two direction
//! lines plus a PWM enable line. The driver is a pure output sink; stall
//! handling and duty escalation live in the sequencer.

/// Motor rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Feed direction (wheel pulls the page toward the swipe arm)
    Forward,
    /// Reverse direction
    Reverse,
}

impl Direction {
    /// Get the opposite direction
    pub fn opposite(self) -> Self {
        match self {
            Direction::Forward => Direction::Reverse,
            Direction::Reverse => Direction::Forward,
        }
    }
}

/// Trait for the wheel feed motor
///
/// Implementations map duty and direction onto the H-bridge pins. All
/// methods are infallible: pin-level I/O failures are swallowed at the
/// hardware layer.
pub trait MotorDriver {
    /// Set the drive strength (0-255, applied via the PWM enable line)
    ///
    /// Takes effect immediately, including while the motor is running.
    fn set_duty(&mut self, duty: u8);

    /// Energize the motor in the given direction
    fn run(&mut self, dir: Direction);

    /// De-energize the motor (both direction lines low)
    fn stop(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_opposite() {
        assert_eq!(Direction::Forward.opposite(), Direction::Reverse);
        assert_eq!(Direction::Reverse.opposite(), Direction::Forward);
    }
}
