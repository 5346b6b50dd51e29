//! Remote Command/Notify Vocabulary
//!
//! This crate defines the wire vocabulary of the single command/notify
//! endpoint exposed by the Verso page flipper. The transport itself
//! (wireless characteristic or serial console) is out of scope; both
//! surfaces speak the same vocabulary:
//!
//! - **Write**: one ASCII digit per command (`'0'`..`'6'`, `'9'`).
//!   Unrecognized bytes are ignored by the caller, never fatal.
//! - **Read/Notify**: the current device state as a short ASCII token
//!   (`"IDLE"`, `"READY"`, ...), sent only when the value changes.
//!
//! The token strings themselves are owned by the state machine in
//! `verso-core`; this crate covers the inbound byte vocabulary.

#![no_std]
#![deny(unsafe_code)]

pub mod command;

pub use command::Command;
