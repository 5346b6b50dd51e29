//! Proximity switch input
//!
//! Maps the physical sensor's logic level onto the polarity-neutral
//! `ProximitySensor` trait. The fitted inductive sensor pulls its output
//! low on contact, so the default active level is low; boards with an
//! active-high sensor override it.

use embedded_hal::digital::InputPin;

use verso_core::traits::ProximitySensor;

/// Which logic level means "target reached"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveLevel {
    /// Logic low on contact (open-collector sensor with pull-up)
    #[default]
    Low,
    /// Logic high on contact
    High,
}

/// Proximity switch over a digital input pin
pub struct ProximitySwitch<P> {
    pin: P,
    active: ActiveLevel,
}

impl<P: InputPin> ProximitySwitch<P> {
    /// Create a switch with the default active-low polarity
    pub fn new(pin: P) -> Self {
        Self::with_active_level(pin, ActiveLevel::Low)
    }

    /// Create a switch with an explicit active level
    pub fn with_active_level(pin: P, active: ActiveLevel) -> Self {
        Self { pin, active }
    }

    /// Get the configured active level
    pub fn active_level(&self) -> ActiveLevel {
        self.active
    }
}

impl<P: InputPin> ProximitySensor for ProximitySwitch<P> {
    fn target_reached(&mut self) -> bool {
        // A failed read counts as "not reached"; the feed loop keeps
        // polling and the stall policy bounds the attempt
        match self.active {
            ActiveLevel::Low => matches!(self.pin.is_low(), Ok(true)),
            ActiveLevel::High => matches!(self.pin.is_high(), Ok(true)),
        }
    }
}
