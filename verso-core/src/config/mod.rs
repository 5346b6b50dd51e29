//! Mechanism calibration types

pub mod types;

pub use types::MotionConfig;
