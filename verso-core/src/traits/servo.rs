//! Servo output traits
//!
//! The mechanism carries three servo-driven linkages: the wheel arm that
//! lowers the feed wheel onto the page stack, the swipe arm that carries
//! the lifted page across, and the pressure arm that flattens it.

/// A single hobby-servo channel accepting an angle target
pub trait ServoDriver {
    /// Command the servo to an angle in degrees (0-180, clamped)
    fn set_angle(&mut self, deg: u8);
}

/// The three servo linkages of the flip mechanism, as one output sink
pub trait ServoBank {
    /// Wheel arm angle (home 5°, lowered toward the stall threshold)
    fn set_wheel(&mut self, deg: u8);

    /// Swipe arm angle
    fn set_swipe(&mut self, deg: u8);

    /// Pressure arm angle
    fn set_pressure(&mut self, deg: u8);
}
