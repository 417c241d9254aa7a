// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! TuChati CLI
//!
//! Terminal client for TuChati rooms and the notification channel.
//!
//! Only the WebSocket endpoints are used. The REST base is resolved with
//! the rest of the configuration but no command talks to it.

mod commands;
mod config;
mod display;

use anyhow::Result;
use clap::{Parser, Subcommand};

use config::CliConfig;

#[derive(Parser)]
#[command(name = "tuchati")]
#[command(version, about = "Terminal client for TuChati chat rooms")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// WebSocket base URL [default: $TUCHATI_WS_BASE_URL or ws://localhost:8011]
    #[arg(long, global = true)]
    ws_base: Option<String>,

    /// REST API base URL [default: $TUCHATI_API_BASE_URL]
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Delay before reconnecting after a dropped connection (milliseconds)
    #[arg(long, global = true, default_value_t = 1_500)]
    reconnect_delay_ms: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Join a room and chat from the terminal
    Chat {
        /// Room identifier
        room: String,

        /// Access token
        #[arg(long, env = "TUCHATI_TOKEN", hide_env_values = true)]
        token: String,
    },

    /// Listen for invitations and other notifications
    Notifications {
        /// Access token
        #[arg(long, env = "TUCHATI_TOKEN", hide_env_values = true)]
        token: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tuchati=info".parse()?)
                .add_directive("tuchati_core=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = CliConfig {
        ws_base_url: cli.ws_base,
        api_base_url: cli.api_base,
        reconnect_delay_ms: cli.reconnect_delay_ms,
    };

    match cli.command {
        Commands::Chat { room, token } => commands::chat::run(&config, &room, &token).await?,
        Commands::Notifications { token } => {
            commands::notifications::run(&config, &token).await?
        }
    }

    Ok(())
}
