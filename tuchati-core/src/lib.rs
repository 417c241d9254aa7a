// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! TuChati Core Library
//!
//! Realtime transport for the TuChati chat client: endpoint configuration,
//! frame model, and the room and notification sockets.

pub mod client;
pub mod config;
pub mod network;

pub use client::ChatClient;
pub use config::{ws_scheme_for, ChatConfig, ConfigError};
pub use network::{
    ConnectionState, Connector, FrameHandler, InboundFrame, MockConnector, NetworkError,
    NotificationSocket, OutboundFrame, RoomSocket, ServerEvent, Transport, WebSocketConnector,
};
