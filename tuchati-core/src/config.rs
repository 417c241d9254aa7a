// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Endpoint configuration
//!
//! Everything here is resolved once at startup. The realtime endpoints
//! hang off a single WebSocket base URL; the REST base is only used for
//! the user search endpoint.

use std::env;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Base URL used when no override is configured.
pub const DEFAULT_WS_BASE_URL: &str = "ws://localhost:8011";

/// Environment variable overriding the WebSocket base URL.
pub const WS_BASE_URL_ENV: &str = "TUCHATI_WS_BASE_URL";

/// Environment variable setting the REST API base URL.
pub const API_BASE_URL_ENV: &str = "TUCHATI_API_BASE_URL";

/// Fixed delay between an unexpected closure and the reconnect attempt.
pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_millis(1_500);

/// Default WebSocket handshake timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Path of the user search endpoint on the REST API.
pub const DEFAULT_USER_SEARCH_PATH: &str = "/api/accounts/search/";

/// Configuration errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("unsupported scheme '{0}'")]
    UnsupportedScheme(String),

    #[error("room id is empty")]
    MissingRoomId,

    #[error("invalid room id '{0}'")]
    InvalidRoomId(String),

    #[error("token is empty")]
    MissingToken,
}

/// Maps the hosting page's scheme to the matching WebSocket scheme.
///
/// `http` pages talk `ws`, `https` pages talk `wss`. WebSocket schemes
/// map to themselves.
pub fn ws_scheme_for(page_scheme: &str) -> Option<&'static str> {
    match page_scheme.to_ascii_lowercase().as_str() {
        "http" | "ws" => Some("ws"),
        "https" | "wss" => Some("wss"),
        _ => None,
    }
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// WebSocket base (scheme, host, optional path prefix).
    pub ws_base_url: Url,
    /// REST API base, if any.
    pub api_base_url: Option<Url>,
    /// Delay before reconnecting after an unexpected closure.
    pub reconnect_delay: Duration,
    /// WebSocket handshake timeout.
    pub connect_timeout: Duration,
    /// Path of the user search endpoint, relative to the API base.
    pub user_search_path: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        ChatConfig {
            ws_base_url: Url::parse(DEFAULT_WS_BASE_URL).expect("default base URL is valid"),
            api_base_url: None,
            reconnect_delay: DEFAULT_RECONNECT_DELAY,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            user_search_path: DEFAULT_USER_SEARCH_PATH.to_string(),
        }
    }
}

impl ChatConfig {
    /// Creates a config for the given WebSocket base URL.
    pub fn new(ws_base_url: &str) -> Result<Self, ConfigError> {
        Ok(ChatConfig {
            ws_base_url: parse_ws_base(ws_base_url)?,
            ..Default::default()
        })
    }

    /// Reads the base URLs from the environment.
    ///
    /// Unset or blank variables fall back to the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match non_blank_env(WS_BASE_URL_ENV) {
            Some(base) => Self::new(&base)?,
            None => Self::default(),
        };
        if let Some(api) = non_blank_env(API_BASE_URL_ENV) {
            config = config.with_api_base_url(&api)?;
        }
        Ok(config)
    }

    /// Derives the WebSocket base from the origin of the hosting page.
    ///
    /// `https://chat.example.com` becomes `wss://chat.example.com`. The
    /// origin itself becomes the API base.
    pub fn from_page_origin(origin: &str) -> Result<Self, ConfigError> {
        let page = parse_url(origin)?;
        let scheme = ws_scheme_for(page.scheme())
            .ok_or_else(|| ConfigError::UnsupportedScheme(page.scheme().to_string()))?;

        let mut ws_base = page.clone();
        ws_base
            .set_scheme(scheme)
            .map_err(|()| ConfigError::UnsupportedScheme(scheme.to_string()))?;

        Ok(ChatConfig {
            ws_base_url: normalize(ws_base),
            api_base_url: Some(normalize(page)),
            ..Default::default()
        })
    }

    pub fn with_reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay = delay;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_api_base_url(mut self, api_base_url: &str) -> Result<Self, ConfigError> {
        let url = parse_url(api_base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(url.scheme().to_string()));
        }
        self.api_base_url = Some(normalize(url));
        Ok(self)
    }

    /// Realtime endpoint of a room: `{base}/ws/chat/{room_id}/?token={token}`.
    ///
    /// Blank ids and the dot segments `.` and `..` are rejected, as they
    /// would resolve to a different path.
    pub fn room_url(&self, room_id: &str, token: &str) -> Result<Url, ConfigError> {
        if room_id.is_empty() {
            return Err(ConfigError::MissingRoomId);
        }
        if matches!(room_id.trim(), "" | "." | "..") {
            return Err(ConfigError::InvalidRoomId(room_id.to_string()));
        }
        self.ws_endpoint(&["ws", "chat", room_id, ""], token)
    }

    /// Notification (invite) endpoint: `{base}/ws/notifications/?token={token}`.
    pub fn notifications_url(&self, token: &str) -> Result<Url, ConfigError> {
        self.ws_endpoint(&["ws", "notifications", ""], token)
    }

    /// User search endpoint, or `None` when no API base is configured.
    pub fn user_search_url(&self, query: &str) -> Option<Url> {
        let base = self.api_base_url.as_ref()?;
        let mut url = base.clone();
        {
            let mut segments = url.path_segments_mut().ok()?;
            segments.pop_if_empty();
            segments.extend(self.user_search_path.split('/').skip_while(|s| s.is_empty()));
        }
        url.query_pairs_mut().append_pair("q", query);
        Some(url)
    }

    fn ws_endpoint(&self, segments: &[&str], token: &str) -> Result<Url, ConfigError> {
        if token.is_empty() {
            return Err(ConfigError::MissingToken);
        }

        let mut url = self.ws_base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ConfigError::InvalidUrl {
                url: self.ws_base_url.to_string(),
                reason: "cannot be a base".into(),
            })?
            .pop_if_empty()
            .extend(segments);
        url.query_pairs_mut().append_pair("token", token);
        Ok(url)
    }
}

fn non_blank_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_url(raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}

fn parse_ws_base(raw: &str) -> Result<Url, ConfigError> {
    let url = parse_url(raw)?;
    if !matches!(url.scheme(), "ws" | "wss") {
        return Err(ConfigError::UnsupportedScheme(url.scheme().to_string()));
    }
    Ok(normalize(url))
}

/// Drops trailing slashes, query and fragment.
fn normalize(mut url: Url) -> Url {
    url.set_query(None);
    url.set_fragment(None);
    let trimmed = url.path().trim_end_matches('/').to_string();
    url.set_path(&trimmed);
    url
}
