//! Motion programs for the flip mechanism

pub mod sequencer;

pub use sequencer::{AbortReason, FlipSequencer, SequenceOutcome, StallEscalation};
