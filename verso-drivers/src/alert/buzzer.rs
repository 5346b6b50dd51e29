//! GPIO buzzer driver

use embedded_hal::digital::OutputPin;

use verso_core::traits::AlertSignal;

/// Active-high buzzer on a GPIO output
pub struct Buzzer<P> {
    pin: P,
}

impl<P: OutputPin> Buzzer<P> {
    /// Create the driver, leaving the buzzer off
    pub fn new(pin: P) -> Self {
        let mut buzzer = Self { pin };
        buzzer.set_active(false);
        buzzer
    }
}

impl<P: OutputPin> AlertSignal for Buzzer<P> {
    fn set_active(&mut self, on: bool) {
        if on {
            let _ = self.pin.set_high();
        } else {
            let _ = self.pin.set_low();
        }
    }
}
