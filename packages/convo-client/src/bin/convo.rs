//! convo CLI - inspect conversation threads and send messages.
//!
//! Output is JSON for easy piping; configuration comes from
//! `~/.convo/config.toml` unless overridden with `--config`.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use convo_client::{ApiClient, ClientConfig, ClientError, ThreadController};
use convo_core::Message;
use serde::Serialize;
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "convo")]
#[command(about = "Conversation thread CLI - fetch threads and send messages")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.convo/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check backend reachability
    Health,
    /// Fetch a conversation and its messages
    Fetch {
        /// Conversation id
        #[arg(short, long)]
        conversation: String,
    },
    /// Send a message into a conversation
    Send {
        /// Conversation id
        #[arg(short, long)]
        conversation: String,
        /// Message body
        #[arg(short, long)]
        body: String,
    },
}

/// JSON envelope for CLI output.
#[derive(Debug, Serialize)]
struct CliResponse<T> {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> CliResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    fn err(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ClientConfig::load_from(path)?,
        None => ClientConfig::load()?,
    };
    let client = config.api_client();

    let output = match cli.command {
        Commands::Health => {
            let healthy = client.health().await;
            serde_json::to_string_pretty(&CliResponse::ok(json!({
                "baseUrl": client.base_url(),
                "healthy": healthy,
            })))
            .unwrap()
        }
        Commands::Fetch { conversation } => match client.fetch_conversation(&conversation).await {
            Ok(envelope) => serde_json::to_string_pretty(&CliResponse::ok(json!({
                "conversation": envelope.conversation,
                "messages": envelope.messages,
            })))
            .unwrap(),
            Err(e) => serde_json::to_string_pretty(&CliResponse::<()>::err(e.to_string())).unwrap(),
        },
        Commands::Send { conversation, body } => {
            let mut controller =
                ThreadController::new(conversation, config.local_participant(), client);
            match run_send(&mut controller, &body).await {
                Ok(message) => serde_json::to_string_pretty(&CliResponse::ok(json!({
                    "message": message,
                })))
                .unwrap(),
                Err(e) => {
                    serde_json::to_string_pretty(&CliResponse::<()>::err(e.to_string())).unwrap()
                }
            }
        }
    };

    println!("{}", output);
    Ok(())
}

/// One full send cycle: load the thread, then send the body through the
/// optimistic lifecycle.
async fn run_send(
    controller: &mut ThreadController<ApiClient>,
    body: &str,
) -> std::result::Result<Message, ClientError> {
    controller.reload().await?;
    controller.set_composer(body);
    controller.send().await
}
