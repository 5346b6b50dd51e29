//! Configuration type definitions
//!
//! Calibration constants for the one fixed flip geometry this mechanism
//! has. The defaults are the fitted hardware's measured values; boards
//! with a different linkage geometry override individual fields.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Calibration for the homing and flip motion programs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MotionConfig {
    /// Wheel arm parked/raised angle (degrees)
    pub wheel_home_deg: u8,
    /// Wheel arm angle at the start of the lowering feed (degrees)
    pub wheel_lowered_deg: u8,
    /// Wheel arm angle at which the mechanism counts as jammed if the
    /// proximity sensor has not confirmed contact (degrees)
    pub wheel_stall_deg: u8,
    /// Time between single-degree feed increments (ms)
    pub feed_step_ms: u32,
    /// Sensor polling interval inside the feed loop (ms)
    pub poll_interval_ms: u32,
    /// Wait after commanding the lowered start angle, before feeding (ms)
    pub lower_settle_ms: u32,

    /// Motor duty for the first lowering attempt (0-255)
    pub motor_normal_duty: u8,
    /// Motor duty after the first stall (0-255)
    pub motor_boost_duty: u8,

    /// Swipe arm staging angles, in feed order (degrees)
    pub swipe_stage_degs: [u8; 3],
    /// Travel pause after each staging angle (ms)
    pub swipe_stage_pause_ms: [u32; 3],
    /// Travel pause after raising the wheel arm back home (ms)
    pub wheel_raise_pause_ms: u32,
    /// Swipe arm fully extended angle (degrees)
    pub swipe_extended_deg: u8,
    /// Travel pause after extending the swipe arm (ms)
    pub swipe_extended_pause_ms: u32,
    /// Pressure arm press angle (degrees)
    pub pressure_deg: u8,
    /// Hold time for the pressure arm (ms)
    pub pressure_pause_ms: u32,
    /// Travel pause after returning swipe and pressure arms to zero (ms)
    pub reset_pause_ms: u32,

    /// Homing completion pulse length (ms)
    pub homing_pulse_ms: u32,
    /// Single-pulse stall warning length (ms)
    pub stall_pulse_ms: u32,
    /// Pulse length within the abort pattern (ms)
    pub abort_pulse_ms: u32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            wheel_home_deg: 5,
            wheel_lowered_deg: 135,
            wheel_stall_deg: 143,
            feed_step_ms: 2000,
            poll_interval_ms: 1,
            lower_settle_ms: 1000,

            motor_normal_duty: 180,
            motor_boost_duty: 255,

            swipe_stage_degs: [33, 67, 100],
            swipe_stage_pause_ms: [100, 100, 500],
            wheel_raise_pause_ms: 1000,
            // The linkage hits its mechanical end of travel at the servo
            // ceiling
            swipe_extended_deg: 180,
            swipe_extended_pause_ms: 750,
            pressure_deg: 170,
            pressure_pause_ms: 2000,
            reset_pause_ms: 1000,

            homing_pulse_ms: 5000,
            stall_pulse_ms: 1000,
            abort_pulse_ms: 1000,
        }
    }
}

impl MotionConfig {
    /// Degrees of feed travel between the lowered start and the stall
    /// threshold
    pub fn feed_span_deg(&self) -> u8 {
        self.wheel_stall_deg.saturating_sub(self.wheel_lowered_deg)
    }

    /// Check the angle ordering invariants a usable geometry must satisfy
    pub fn is_coherent(&self) -> bool {
        self.wheel_home_deg < self.wheel_lowered_deg
            && self.wheel_lowered_deg < self.wheel_stall_deg
            && self.wheel_stall_deg <= 180
            && self.motor_normal_duty < self.motor_boost_duty
            && self.feed_step_ms > 0
    }
}
