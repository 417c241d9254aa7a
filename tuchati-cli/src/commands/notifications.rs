//! Notifications Command
//!
//! Prints frames from the notification channel until it closes.

use std::sync::Arc;

use anyhow::Result;
use tuchati_core::network::ConnectionState;
use tuchati_core::ChatClient;

use crate::config::CliConfig;
use crate::display;

pub async fn run(config: &CliConfig, token: &str) -> Result<()> {
    let client = ChatClient::new(config.chat_config()?);
    let mut socket = client.notifications(token, Arc::new(|frame| display::raw(&frame)))?;
    let mut states = socket.watch_state();

    loop {
        tokio::select! {
            changed = states.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = states.borrow_and_update().clone();
                display::state(&state);
                if matches!(state, ConnectionState::Disconnected | ConnectionState::Closed) {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    socket.close();
    socket.closed().await;
    Ok(())
}
