//! Audible alert outputs

pub mod buzzer;

pub use buzzer::Buzzer;
