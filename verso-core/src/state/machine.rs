//! State machine definition
//!
//! All actuator and notification behavior is a function of the current
//! state and an event. The state value is only ever changed through
//! [`crate::session::Session`], which wraps [`DeviceState::transition`]
//! with change notification.

use super::events::Event;

use verso_protocol::Command;

/// Device lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceState {
    /// Powered and waiting; actuator parked
    Idle,
    /// Homing routine running
    Initializing,
    /// Homed and connected, waiting for a start trigger
    Ready,
    /// Remote client is capturing the exposed page
    Capturing,
    /// Flip motion program running
    Flipping,
    /// Session paused by the operator
    Paused,
    /// End of the page stack reached
    Done,
    /// Flip program aborted; waiting for acknowledge
    Error,
}

impl DeviceState {
    /// Wire token sent on the notify side of the remote endpoint
    pub fn token(&self) -> &'static str {
        match self {
            DeviceState::Idle => "IDLE",
            DeviceState::Initializing => "INITIALIZE",
            DeviceState::Ready => "READY",
            DeviceState::Capturing => "CAPTURING",
            DeviceState::Flipping => "FLIPPING",
            DeviceState::Paused => "PAUSE",
            DeviceState::Done => "DONE",
            DeviceState::Error => "ERROR",
        }
    }

    /// Numeric state code matching the command vocabulary
    pub fn code(&self) -> u8 {
        match self {
            DeviceState::Idle => 0,
            DeviceState::Initializing => 1,
            DeviceState::Ready => 2,
            DeviceState::Capturing => 3,
            DeviceState::Flipping => 4,
            DeviceState::Done => 5,
            DeviceState::Paused => 6,
            DeviceState::Error => 9,
        }
    }

    /// Check if this state runs a motion program (homing or flipping)
    pub fn actuation_allowed(&self) -> bool {
        matches!(self, DeviceState::Initializing | DeviceState::Flipping)
    }

    /// Check if this is a terminal state waiting for acknowledge
    pub fn awaits_acknowledge(&self) -> bool {
        matches!(self, DeviceState::Done | DeviceState::Error)
    }

    /// Process an event and return the next state
    ///
    /// This is the core state transition logic. Unmatched pairs stay in
    /// the current state, so repeated events are harmless.
    pub fn transition(self, event: Event) -> Self {
        use DeviceState::*;
        use Event::*;

        match (self, event) {
            // Operator overrides and link edges apply from any state
            (_, Override(target)) => target,
            (_, LinkUp) => Ready,
            (_, LinkDown) => Idle,

            // Initialization flow
            (Idle, Initialize) => Initializing,
            (Initializing, HomingComplete { link_up: true }) => Ready,
            (Initializing, HomingComplete { link_up: false }) => Idle,

            // Capture/flip cycle
            (Ready, StartTrigger) => Capturing,
            (Capturing, StopTrigger) => Flipping,
            (Flipping, FlipFinished { end_of_program: false }) => Capturing,
            (Flipping, FlipFinished { end_of_program: true }) => Done,
            (Flipping, FlipAborted) => Error,

            // Terminal states recover to idle
            (Done, Acknowledge) => Idle,
            (Error, Acknowledge) => Idle,

            // Default: stay in current state
            _ => self,
        }
    }
}

impl From<Command> for DeviceState {
    /// The state a remote command names (the override target)
    fn from(cmd: Command) -> Self {
        match cmd {
            Command::Idle => DeviceState::Idle,
            Command::Initialize => DeviceState::Initializing,
            Command::Ready => DeviceState::Ready,
            Command::Capturing => DeviceState::Capturing,
            Command::Flipping => DeviceState::Flipping,
            Command::Done => DeviceState::Done,
            Command::Pause => DeviceState::Paused,
            Command::Error => DeviceState::Error,
        }
    }
}
