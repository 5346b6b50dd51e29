//! Page-contact proximity sensor trait

/// Binary proximity input confirming the wheel has reached the page stack.
///
/// The trait is polarity-neutral; mapping the physical active level (the
/// fitted sensor reads logic-low on contact) is the driver's concern.
pub trait ProximitySensor {
    /// True once the wheel has reached its target
    fn target_reached(&mut self) -> bool;
}
