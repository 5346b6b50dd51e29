//! Time source trait for the blocking motion programs

/// Monotonic clock plus blocking delay.
///
/// The feed loop paces wheel increments by deadline comparison against
/// `now_ms` rather than by counting loop iterations, so step timing is
/// independent of how fast the polling loop happens to run.
pub trait Timebase {
    /// Milliseconds since an arbitrary epoch; never goes backwards
    fn now_ms(&self) -> u64;

    /// Block for the given number of milliseconds
    fn delay_ms(&mut self, ms: u32);
}
