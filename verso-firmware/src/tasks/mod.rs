//! Embassy task implementations

pub mod actuation;
pub mod buttons;
pub mod remote;

pub use actuation::actuation_task;
pub use buttons::button_task;
pub use remote::{remote_rx_task, remote_tx_task};
