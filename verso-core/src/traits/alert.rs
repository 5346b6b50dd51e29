//! Audible alert output trait

/// On/off buzzer output.
///
/// The sequencer composes the timed pulse patterns (homing chirp, stall
/// warning, abort pattern); the driver only switches the level. Pulses are
/// blocking, so overlapping pulses cannot occur.
pub trait AlertSignal {
    /// Drive the buzzer on or off
    fn set_active(&mut self, on: bool);
}
