//! Remote command/notify link tasks
//!
//! One UART carries both surfaces of the command endpoint: the wireless
//! bridge writes raw command digits, and a human on the serial console
//! types the same vocabulary. The RX task parses one byte at a time; the
//! TX task emits one state-token line per committed transition, which
//! doubles as the human-readable console output.

use defmt::*;
use embassy_rp::uart::{BufferedUartRx, BufferedUartTx};
use embedded_io_async::{Read, Write};

use verso_protocol::Command;

use crate::channels::{COMMAND_CHANNEL, LINK_TRAFFIC, NOTIFY_CHANNEL};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 16;

/// Remote RX task - parses command bytes from the link
#[embassy_executor::task]
pub async fn remote_rx_task(mut rx: BufferedUartRx) {
    info!("Remote RX task started");

    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                // Any traffic counts for link supervision
                LINK_TRAFFIC.signal(());

                for &byte in &buf[..n] {
                    match Command::from_byte(byte) {
                        Some(cmd) => {
                            debug!("Command: {:?}", cmd);
                            if COMMAND_CHANNEL.try_send(cmd).is_err() {
                                warn!("Command channel full, dropping command");
                            }
                        }
                        None => {
                            // Console line endings land here too; only
                            // complain about printable junk
                            if !byte.is_ascii_whitespace() {
                                warn!("Invalid command byte: {=u8:x}", byte);
                            }
                        }
                    }
                }
            }
            Ok(_) => {
                // No bytes read, continue
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}

/// Remote TX task - one token line per state change
#[embassy_executor::task]
pub async fn remote_tx_task(mut tx: BufferedUartTx) {
    info!("Remote TX task started");

    loop {
        let state = NOTIFY_CHANNEL.receive().await;
        let token = state.token();

        if tx.write_all(token.as_bytes()).await.is_err() {
            warn!("UART write error");
            continue;
        }
        let _ = tx.write_all(b"\r\n").await;
    }
}
