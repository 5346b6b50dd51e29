//! Session state ownership and change notification
//!
//! [`Session`] is the only mutation path for [`DeviceState`]. Every input
//! source (remote command, physical button, sequencer completion, link
//! edge) is funneled through [`Session::apply`], which commits the new
//! state and then notifies — in that order, and only when the value
//! actually changed. Repeating a command therefore produces at most one
//! notification, and the notified token always matches the stored state
//! once the mutator returns.

use crate::state::{DeviceState, Event};

use verso_protocol::Command;

/// Observer for committed state changes.
///
/// Called strictly after the new value is stored; implementations push the
/// state token to the remote notify endpoint and the console.
pub trait StateNotifier {
    /// The state value changed to `state`
    fn state_changed(&mut self, state: DeviceState);
}

/// Physical momentary buttons on the chassis (active-low inputs)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Start button: initialize from idle, start capturing from ready
    Start,
    /// Stop button: finish the capture and flip
    Stop,
}

/// Owns the device state and enforces the notify-on-change invariant
pub struct Session<N: StateNotifier> {
    state: DeviceState,
    notifier: N,
}

impl<N: StateNotifier> Session<N> {
    /// Create a new session in the idle state
    pub fn new(notifier: N) -> Self {
        Self {
            state: DeviceState::Idle,
            notifier,
        }
    }

    /// Get the current state
    pub fn state(&self) -> DeviceState {
        self.state
    }

    /// Apply an event through the transition function.
    ///
    /// Returns the new state if the value changed, `None` for a no-op
    /// transition. Notification fires on every and only every change.
    pub fn apply(&mut self, event: Event) -> Option<DeviceState> {
        let next = self.state.transition(event);
        if next == self.state {
            return None;
        }
        self.state = next;
        self.notifier.state_changed(next);
        Some(next)
    }

    /// Handle a remote (or console) command.
    ///
    /// `Initialize` while idle enters the homing flow; every other
    /// combination is a direct operator override to the named state.
    pub fn handle_command(&mut self, cmd: Command) -> Option<DeviceState> {
        let event = match cmd {
            Command::Initialize if self.state == DeviceState::Idle => Event::Initialize,
            _ => Event::Override(DeviceState::from(cmd)),
        };
        self.apply(event)
    }

    /// Handle a physical button press
    pub fn handle_button(&mut self, button: Button) -> Option<DeviceState> {
        let event = match (button, self.state) {
            (Button::Start, DeviceState::Idle) => Event::Initialize,
            (Button::Start, DeviceState::Ready) => Event::StartTrigger,
            (Button::Stop, DeviceState::Capturing) => Event::StopTrigger,
            _ => return None,
        };
        self.apply(event)
    }
}
