// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Notification Socket
//!
//! Single connection to the notification (invite) channel. Same lifecycle
//! as a room socket minus reconnection: once the connection ends it stays
//! down.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::frame::InboundFrame;
use super::handler::{FrameHandler, HandlerSlot};
use super::transport::{ConnectionState, Connector, Transport};
use crate::config::{ChatConfig, ConfigError};

/// Receive-only connection to the notification channel.
pub struct NotificationSocket {
    shutdown: Mutex<Option<oneshot::Sender<()>>>,
    handler: HandlerSlot,
    state: watch::Receiver<ConnectionState>,
    task: Option<JoinHandle<()>>,
}

impl NotificationSocket {
    /// Opens the channel. An empty token leaves the socket inert.
    pub fn open(
        connector: Arc<dyn Connector>,
        config: &ChatConfig,
        token: &str,
        handler: FrameHandler,
    ) -> Result<Self, ConfigError> {
        let handler = HandlerSlot::new(handler);

        if token.is_empty() {
            debug!("token missing, not connecting to notifications");
            let (_, state) = watch::channel(ConnectionState::Disconnected);
            return Ok(NotificationSocket {
                shutdown: Mutex::new(None),
                handler,
                state,
                task: None,
            });
        }

        let url = config.notifications_url(token)?.to_string();
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let (state_tx, state_rx) = watch::channel(ConnectionState::Disconnected);

        let task = tokio::spawn(run(
            connector,
            url,
            handler.clone(),
            shutdown_rx,
            state_tx,
        ));

        Ok(NotificationSocket {
            shutdown: Mutex::new(Some(shutdown_tx)),
            handler,
            state: state_rx,
            task: Some(task),
        })
    }

    pub fn state(&self) -> ConnectionState {
        self.state.borrow().clone()
    }

    pub fn is_connected(&self) -> bool {
        *self.state.borrow() == ConnectionState::Connected
    }

    pub fn watch_state(&self) -> watch::Receiver<ConnectionState> {
        self.state.clone()
    }

    /// Registers a new handler without touching the connection.
    pub fn set_handler(&self, handler: FrameHandler) {
        self.handler.replace(handler);
    }

    /// Closes the channel. Idempotent.
    pub fn close(&self) {
        if let Some(shutdown) = self.shutdown.lock().take() {
            let _ = shutdown.send(());
        }
    }

    /// Waits until the connection task has finished.
    pub async fn closed(&mut self) {
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for NotificationSocket {
    fn drop(&mut self) {
        self.close();
    }
}

/// Publishes the socket state, and `Disconnected` if the task ends while
/// still live.
struct StateGuard(watch::Sender<ConnectionState>);

impl StateGuard {
    fn set(&self, state: ConnectionState) {
        self.0.send_replace(state);
    }
}

impl Drop for StateGuard {
    fn drop(&mut self) {
        self.0.send_if_modified(|state| match state {
            ConnectionState::Connecting | ConnectionState::Connected => {
                warn!("notification task ended unexpectedly");
                *state = ConnectionState::Disconnected;
                true
            }
            _ => false,
        });
    }
}

async fn run(
    connector: Arc<dyn Connector>,
    url: String,
    handler: HandlerSlot,
    mut shutdown: oneshot::Receiver<()>,
    state: watch::Sender<ConnectionState>,
) {
    let state = StateGuard(state);
    state.set(ConnectionState::Connecting);

    let mut socket: Box<dyn Transport> = tokio::select! {
        result = connector.connect(&url) => match result {
            Ok(socket) => socket,
            Err(e) => {
                warn!(error = %e, "notification connection failed");
                state.set(ConnectionState::Disconnected);
                return;
            }
        },
        _ = &mut shutdown => {
            state.set(ConnectionState::Closed);
            return;
        }
    };

    info!("notification connection open");
    state.set(ConnectionState::Connected);

    loop {
        tokio::select! {
            inbound = socket.receive() => match inbound {
                Ok(Some(message)) => handler.dispatch(InboundFrame::decode(message)),
                Ok(None) => {
                    info!("notification connection closed");
                    state.set(ConnectionState::Disconnected);
                    return;
                }
                Err(e) => {
                    warn!(error = %e, "notification transport error, closing");
                    let _ = socket.close().await;
                    state.set(ConnectionState::Disconnected);
                    return;
                }
            },
            _ = &mut shutdown => {
                let _ = socket.close().await;
                state.set(ConnectionState::Closed);
                debug!("notification connection torn down");
                return;
            }
        }
    }
}
