//! Chassis button scanning task
//!
//! Scans the two active-low momentary buttons on a fixed ticker and
//! emits one event per debounced press edge.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Ticker};

use verso_core::session::Button;

use crate::channels::BUTTON_CHANNEL;

/// Scan interval in milliseconds
const SCAN_INTERVAL_MS: u64 = 10;

/// Consecutive pressed samples required to accept a press
const DEBOUNCE_SAMPLES: u8 = 3;

/// Per-button debounce state
#[derive(Default)]
struct Debounce {
    pressed: bool,
    counter: u8,
}

impl Debounce {
    /// Feed one raw sample; returns true on an accepted press edge
    fn update(&mut self, raw_pressed: bool) -> bool {
        if raw_pressed {
            if self.counter < DEBOUNCE_SAMPLES {
                self.counter += 1;
                if self.counter == DEBOUNCE_SAMPLES && !self.pressed {
                    self.pressed = true;
                    return true;
                }
            }
        } else {
            self.counter = 0;
            self.pressed = false;
        }
        false
    }
}

/// Button scan task for the start/stop buttons (active-low)
#[embassy_executor::task]
pub async fn button_task(start: Input<'static>, stop: Input<'static>) {
    info!("Button task started");

    let mut ticker = Ticker::every(Duration::from_millis(SCAN_INTERVAL_MS));
    let mut start_db = Debounce::default();
    let mut stop_db = Debounce::default();

    loop {
        if start_db.update(start.is_low()) {
            debug!("Start button pressed");
            if BUTTON_CHANNEL.try_send(Button::Start).is_err() {
                warn!("Button channel full, dropping press");
            }
        }
        if stop_db.update(stop.is_low()) {
            debug!("Stop button pressed");
            if BUTTON_CHANNEL.try_send(Button::Stop).is_err() {
                warn!("Button channel full, dropping press");
            }
        }

        ticker.next().await;
    }
}
