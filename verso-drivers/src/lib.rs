//! Hardware driver implementations for the Verso page flipper
//!
//! Implements the `verso-core` hardware traits over `embedded-hal` 1.0
//! pin and PWM abstractions:
//!
//! - H-bridge DC motor (two direction lines + PWM enable)
//! - Hobby servo on a 50 Hz PWM channel, plus the three-channel bank
//! - Proximity switch with configurable active level
//! - GPIO buzzer
//!
//! Pin-level I/O errors are swallowed: there is no in-software recovery
//! for a failed register write on this hardware, and the motion programs
//! treat the outputs as infallible sinks.

#![no_std]
#![deny(unsafe_code)]

pub mod alert;
pub mod motor;
pub mod sensor;
pub mod servo;
