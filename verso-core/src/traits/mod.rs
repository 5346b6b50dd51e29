//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations. The motor and servo traits are
//! pure output sinks; all sequencing logic lives in [`crate::motion`].

pub mod alert;
pub mod clock;
pub mod motor;
pub mod sensor;
pub mod servo;

pub use alert::AlertSignal;
pub use clock::Timebase;
pub use motor::{Direction, MotorDriver};
pub use sensor::ProximitySensor;
pub use servo::{ServoBank, ServoDriver};
