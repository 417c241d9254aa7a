//! CLI Configuration
//!
//! Command-line flags win; anything left unset falls back to the
//! environment (`TUCHATI_WS_BASE_URL`, `TUCHATI_API_BASE_URL`) through
//! [`ChatConfig::from_env`].

use std::time::Duration;

use anyhow::{Context, Result};
use tuchati_core::ChatConfig;

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// WebSocket base URL override.
    pub ws_base_url: Option<String>,
    /// REST API base URL override.
    pub api_base_url: Option<String>,
    /// Reconnect delay in milliseconds.
    pub reconnect_delay_ms: u64,
}

impl CliConfig {
    /// Builds the library configuration.
    pub fn chat_config(&self) -> Result<ChatConfig> {
        let base = ChatConfig::from_env().context("invalid endpoint in environment")?;
        self.apply(base)
    }

    fn apply(&self, mut config: ChatConfig) -> Result<ChatConfig> {
        if let Some(ws_base_url) = &self.ws_base_url {
            let overridden = ChatConfig::new(ws_base_url)
                .with_context(|| format!("invalid WebSocket base URL {}", ws_base_url))?;
            config.ws_base_url = overridden.ws_base_url;
        }
        if let Some(api_base_url) = &self.api_base_url {
            config = config
                .with_api_base_url(api_base_url)
                .with_context(|| format!("invalid API base URL {}", api_base_url))?;
        }
        Ok(config.with_reconnect_delay(Duration::from_millis(self.reconnect_delay_ms)))
    }
}
