//! Contact sensing inputs

pub mod proximity;

pub use proximity::{ActiveLevel, ProximitySwitch};
