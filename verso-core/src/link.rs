//! Remote link supervision
//!
//! Tracks whether the remote controller is connected by watching for
//! traffic on the command endpoint, and emits edge events for the session.
//! Losing the link is a normal lifecycle event (it parks the device in
//! idle), not an error.

use crate::state::Event;

/// Silence on the command endpoint after which the link counts as lost
pub const LINK_TIMEOUT_MS: u32 = 3000;

/// Connection supervisor for the remote channel.
///
/// The transport layer reports activity via [`traffic_received`]; the
/// control loop feeds elapsed time via [`update_time`]. Both return the
/// link edge to apply, if the status changed.
///
/// [`traffic_received`]: LinkMonitor::traffic_received
/// [`update_time`]: LinkMonitor::update_time
#[derive(Debug, Clone)]
pub struct LinkMonitor {
    up: bool,
    time_since_traffic_ms: u32,
    timeout_ms: u32,
}

impl Default for LinkMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkMonitor {
    /// Create a monitor with the default timeout, link initially down
    pub fn new() -> Self {
        Self::with_timeout(LINK_TIMEOUT_MS)
    }

    /// Create a monitor with a specific silence timeout
    pub fn with_timeout(timeout_ms: u32) -> Self {
        Self {
            up: false,
            time_since_traffic_ms: 0,
            timeout_ms,
        }
    }

    /// Check if the link currently counts as connected
    pub fn is_up(&self) -> bool {
        self.up
    }

    /// Record activity on the command endpoint.
    ///
    /// Returns [`Event::LinkUp`] on the down-to-up edge.
    pub fn traffic_received(&mut self) -> Option<Event> {
        self.time_since_traffic_ms = 0;
        if self.up {
            None
        } else {
            self.up = true;
            Some(Event::LinkUp)
        }
    }

    /// Advance the silence clock.
    ///
    /// Returns [`Event::LinkDown`] on the up-to-down edge.
    pub fn update_time(&mut self, delta_ms: u32) -> Option<Event> {
        if !self.up {
            return None;
        }

        self.time_since_traffic_ms = self.time_since_traffic_ms.saturating_add(delta_ms);
        if self.time_since_traffic_ms >= self.timeout_ms {
            self.up = false;
            Some(Event::LinkDown)
        } else {
            None
        }
    }
}
