//! Blind box binary - composition root.
//!
//! Ties the crates together behind a local console adapter:
//! 1. Load configuration from TOML
//! 2. Initialize the interaction engine (seed catalog, load state, fill pools)
//! 3. Read commands line by line from stdin and print the reply units
//! 4. Flush pool and session documents on EOF or ctrl-c
//!
//! A chat-platform deployment replaces step 3 with the host's event
//! dispatch; the engine and its lifecycle hooks stay the same.

use std::path::PathBuf;

use tokio::io::{AsyncBufReadExt, BufReader};

use blindbox_chat::{InboundMessage, InteractionEngine, ReplyUnit};
use blindbox_core::BlindBoxConfig;

/// Resolve the config file path (BLINDBOX_CONFIG env, or ./blindbox.toml).
fn config_path() -> PathBuf {
    if let Ok(p) = std::env::var("BLINDBOX_CONFIG") {
        return PathBuf::from(p);
    }
    PathBuf::from("blindbox.toml")
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Config first so its log level can seed the tracing filter.
    let config_file = config_path();
    let config = BlindBoxConfig::load_or_default(&config_file);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.general.log_level)),
        )
        .init();

    tracing::info!("Starting blindbox v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration loaded");

    let data_dir = PathBuf::from(&config.general.data_dir);
    if let Err(e) = std::fs::create_dir_all(&data_dir) {
        tracing::error!(path = %data_dir.display(), error = %e, "Failed to create data directory");
        return Err(e.into());
    }

    let mut engine = InteractionEngine::initialize(&data_dir, &config.command.name)?;

    // Console adapter: each stdin line is one command, delivered as a
    // private message from the local operator.
    let user = std::env::var("USER").ok();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted, shutting down");
                break;
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().is_empty() {
                    continue;
                }
                let event = InboundMessage {
                    text: line,
                    room: None,
                    user: user.clone(),
                };
                match engine.handle(&event) {
                    Ok(reply) => {
                        for unit in reply.into_units(config.command.image_replies) {
                            match unit {
                                ReplyUnit::Image(reference) => println!("[图片] {}", reference),
                                ReplyUnit::Text(text) => println!("{}", text),
                            }
                        }
                    }
                    Err(e) => tracing::error!(error = %e, "Command failed"),
                }
            }
        }
    }

    engine.terminate()?;
    Ok(())
}
