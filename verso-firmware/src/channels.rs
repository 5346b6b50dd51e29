//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy
//! tasks. Uses embassy-sync primitives for safe async communication. All
//! device state lives in the actuation task; these channels only carry
//! inputs toward it and committed state changes away from it.

use core::sync::atomic::AtomicBool;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use verso_core::session::Button;
use verso_core::state::DeviceState;
use verso_protocol::Command;

/// Channel capacity for inbound commands
const COMMAND_CHANNEL_SIZE: usize = 8;

/// Channel capacity for debounced button presses
const BUTTON_CHANNEL_SIZE: usize = 4;

/// Channel capacity for outbound state-change notifications
const NOTIFY_CHANNEL_SIZE: usize = 8;

/// Commands parsed from the remote endpoint / serial console
pub static COMMAND_CHANNEL: Channel<CriticalSectionRawMutex, Command, COMMAND_CHANNEL_SIZE> =
    Channel::new();

/// Debounced presses of the two chassis buttons
pub static BUTTON_CHANNEL: Channel<CriticalSectionRawMutex, Button, BUTTON_CHANNEL_SIZE> =
    Channel::new();

/// Committed state changes, one per transition, for the notify endpoint
pub static NOTIFY_CHANNEL: Channel<CriticalSectionRawMutex, DeviceState, NOTIFY_CHANNEL_SIZE> =
    Channel::new();

/// Signal that bytes arrived on the command endpoint (link supervision)
pub static LINK_TRAFFIC: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// External end-of-stack input; true routes the next flip completion to
/// Done instead of looping back to Capturing. No sensor drives this yet.
pub static END_OF_PROGRAM: AtomicBool = AtomicBool::new(false);
