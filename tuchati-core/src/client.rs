// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Chat client facade.

use std::sync::Arc;

use crate::config::{ChatConfig, ConfigError};
use crate::network::{Connector, FrameHandler, NotificationSocket, RoomSocket, WebSocketConnector};

/// Entry point for opening realtime channels.
///
/// Holds the startup configuration and the connector shared by every
/// socket it opens.
///
/// # Example
///
/// ```ignore
/// use tuchati_core::{ChatClient, ChatConfig};
///
/// let client = ChatClient::new(ChatConfig::from_env()?);
/// let room = client.join_room(&room_id, &token, Arc::new(|frame| println!("{:?}", frame)))?;
/// ```
#[derive(Clone)]
pub struct ChatClient {
    config: ChatConfig,
    connector: Arc<dyn Connector>,
}

impl ChatClient {
    /// Creates a client backed by real WebSockets.
    pub fn new(config: ChatConfig) -> Self {
        let connector = Arc::new(WebSocketConnector::new(config.connect_timeout));
        Self::with_connector(config, connector)
    }

    /// Creates a client using a custom connector.
    pub fn with_connector(config: ChatConfig, connector: Arc<dyn Connector>) -> Self {
        ChatClient { config, connector }
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Opens the realtime channel of a room.
    pub fn join_room(
        &self,
        room_id: &str,
        token: &str,
        handler: FrameHandler,
    ) -> Result<RoomSocket, ConfigError> {
        RoomSocket::open(
            Arc::clone(&self.connector),
            &self.config,
            room_id,
            token,
            handler,
        )
    }

    /// Opens the notification channel.
    pub fn notifications(
        &self,
        token: &str,
        handler: FrameHandler,
    ) -> Result<NotificationSocket, ConfigError> {
        NotificationSocket::open(Arc::clone(&self.connector), &self.config, token, handler)
    }
}
