//! Events that trigger device state transitions

use super::machine::DeviceState;

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // Operator events
    /// Initialize requested (remote command or start button while idle)
    Initialize,
    /// Start trigger (button or command while ready)
    StartTrigger,
    /// Stop trigger (button or command while capturing)
    StopTrigger,
    /// Operator or timeout acknowledged a terminal state
    Acknowledge,
    /// Remote command forcing a specific state (operator override)
    Override(DeviceState),

    // Sequencer events
    /// Homing finished; carries whether the remote link is up so the
    /// follow-up state can be chosen
    HomingComplete {
        /// Remote link status at completion time
        link_up: bool,
    },
    /// Flip program finished normally
    FlipFinished {
        /// External end-of-stack input; true routes to Done instead of
        /// looping back to Capturing
        end_of_program: bool,
    },
    /// Flip program gave up after the double-stall escalation
    FlipAborted,

    // Link events
    /// Remote controller connected
    LinkUp,
    /// Remote controller disconnected
    LinkDown,
}

impl Event {
    /// Check if this event originates from the operator (remote or button)
    pub fn is_operator_event(&self) -> bool {
        matches!(
            self,
            Event::Initialize
                | Event::StartTrigger
                | Event::StopTrigger
                | Event::Acknowledge
                | Event::Override(_)
        )
    }

    /// Check if this event is a sequencer completion report
    pub fn is_sequencer_event(&self) -> bool {
        matches!(
            self,
            Event::HomingComplete { .. } | Event::FlipFinished { .. } | Event::FlipAborted
        )
    }

    /// Check if this event comes from link supervision
    pub fn is_link_event(&self) -> bool {
        matches!(self, Event::LinkUp | Event::LinkDown)
    }
}
