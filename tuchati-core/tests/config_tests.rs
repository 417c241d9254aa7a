// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tests for config

use std::time::Duration;

use tuchati_core::config::*;

#[test]
fn test_config_defaults() {
    let config = ChatConfig::default();

    assert_eq!(config.ws_base_url.as_str(), "ws://localhost:8011/");
    assert!(config.api_base_url.is_none());
    assert_eq!(config.reconnect_delay, Duration::from_millis(1_500));
    assert_eq!(config.connect_timeout, Duration::from_secs(10));
    assert_eq!(config.user_search_path, "/api/accounts/search/");
}

#[test]
fn test_room_url() {
    let config = ChatConfig::new("wss://chat.example.com/").unwrap();
    let url = config.room_url("9b2e", "abc.def.ghi").unwrap();
    assert_eq!(
        url.as_str(),
        "wss://chat.example.com/ws/chat/9b2e/?token=abc.def.ghi"
    );
}

#[test]
fn test_room_url_keeps_base_path_prefix() {
    let config = ChatConfig::new("ws://localhost:8011/realtime//").unwrap();
    let url = config.room_url("7", "t").unwrap();
    assert_eq!(url.as_str(), "ws://localhost:8011/realtime/ws/chat/7/?token=t");
}

#[test]
fn test_room_url_escapes_room_and_token() {
    let config = ChatConfig::default();
    let url = config.room_url("a/b", "x&y=z").unwrap();

    assert_eq!(url.path(), "/ws/chat/a%2Fb/");
    let token = url
        .query_pairs()
        .find(|(key, _)| key == "token")
        .map(|(_, value)| value.into_owned());
    assert_eq!(token.as_deref(), Some("x&y=z"));
}

#[test]
fn test_room_url_rejects_dot_segments_and_blank_ids() {
    let config = ChatConfig::default();
    for room_id in [".", "..", "   "] {
        assert_eq!(
            config.room_url(room_id, "t"),
            Err(ConfigError::InvalidRoomId(room_id.to_string()))
        );
    }
}

#[test]
fn test_room_url_requires_room_and_token() {
    let config = ChatConfig::default();
    assert_eq!(config.room_url("", "t"), Err(ConfigError::MissingRoomId));
    assert_eq!(config.room_url("1", ""), Err(ConfigError::MissingToken));
}

#[test]
fn test_notifications_url() {
    let config = ChatConfig::default();
    let url = config.notifications_url("tok").unwrap();
    assert_eq!(url.as_str(), "ws://localhost:8011/ws/notifications/?token=tok");
    assert_eq!(config.notifications_url(""), Err(ConfigError::MissingToken));
}

#[test]
fn test_new_rejects_non_websocket_base() {
    assert_eq!(
        ChatConfig::new("http://localhost:8011").unwrap_err(),
        ConfigError::UnsupportedScheme("http".into())
    );
    assert!(matches!(
        ChatConfig::new("not a url"),
        Err(ConfigError::InvalidUrl { .. })
    ));
}

#[test]
fn test_ws_scheme_for_page() {
    assert_eq!(ws_scheme_for("http"), Some("ws"));
    assert_eq!(ws_scheme_for("HTTPS"), Some("wss"));
    assert_eq!(ws_scheme_for("wss"), Some("wss"));
    assert_eq!(ws_scheme_for("file"), None);
}

#[test]
fn test_from_page_origin_matches_protocol() {
    let secure = ChatConfig::from_page_origin("https://chat.example.com").unwrap();
    assert_eq!(secure.ws_base_url.scheme(), "wss");
    assert_eq!(secure.ws_base_url.host_str(), Some("chat.example.com"));

    let plain = ChatConfig::from_page_origin("http://localhost:5173/").unwrap();
    assert_eq!(plain.ws_base_url.as_str(), "ws://localhost:5173/");
    assert_eq!(
        plain.api_base_url.as_ref().map(|u| u.as_str()),
        Some("http://localhost:5173/")
    );

    assert!(matches!(
        ChatConfig::from_page_origin("ftp://example.com"),
        Err(ConfigError::UnsupportedScheme(_))
    ));
}

#[test]
fn test_user_search_url_is_single_endpoint() {
    let config = ChatConfig::default();
    assert!(config.user_search_url("amani").is_none());

    let config = config.with_api_base_url("https://api.example.com/").unwrap();
    let url = config.user_search_url("amani k").unwrap();
    assert_eq!(
        url.as_str(),
        "https://api.example.com/api/accounts/search/?q=amani+k"
    );
}

#[test]
fn test_with_api_base_url_rejects_websocket_scheme() {
    let result = ChatConfig::default().with_api_base_url("ws://localhost:8011");
    assert!(matches!(result, Err(ConfigError::UnsupportedScheme(_))));
}

#[test]
fn test_builder_overrides() {
    let config = ChatConfig::default()
        .with_reconnect_delay(Duration::from_millis(250))
        .with_connect_timeout(Duration::from_secs(3));

    assert_eq!(config.reconnect_delay, Duration::from_millis(250));
    assert_eq!(config.connect_timeout, Duration::from_secs(3));
}
