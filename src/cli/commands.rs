//! CLI command definitions and handlers

use clap::Subcommand;
use std::path::PathBuf;
use tracing::info;

use crate::core::config::GatewayConfig;
use crate::core::gateway::TranslationGateway;
use crate::core::models::TranslationRequest;

/// Commands for the translation gateway
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP API server
    Server {
        /// Bind address (default: 0.0.0.0)
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Listen port (default: 8787)
        #[arg(short, long, default_value_t = 8787)]
        port: u16,

        /// JSON config file (defaults to environment variables)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Enable debug mode
        #[arg(long)]
        debug: bool,
    },

    /// Translate a single text and print the result as JSON
    Translate {
        /// Text to translate
        #[arg(long)]
        text: String,

        /// Target language, e.g. "French"
        #[arg(short, long)]
        target_lang: String,

        /// Only use the primary provider, no fallback
        #[arg(long)]
        primary_only: bool,

        /// JSON config file (defaults to environment variables)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Load the gateway configuration once for the process
pub fn load_config(path: Option<PathBuf>) -> anyhow::Result<GatewayConfig> {
    let config = match path {
        Some(path) => {
            info!("Loading config from {}", path.display());
            GatewayConfig::from_file(path)?
        }
        None => GatewayConfig::from_env(),
    };

    config.validate()?;
    Ok(config)
}

/// Handle server command
pub async fn handle_server(
    host: String,
    port: u16,
    config: Option<PathBuf>,
    debug: bool,
) -> anyhow::Result<()> {
    use crate::server::api::run_server;

    if debug {
        info!("Debug mode enabled");
    }

    let config = load_config(config)?;
    let gateway = TranslationGateway::from_config(&config)?;

    info!("Starting HTTP server on {}:{}", host, port);
    println!("🚀 Server starting on http://{}:{}", host, port);

    run_server(gateway, host, port).await?;

    Ok(())
}

/// Handle one-shot translate command
pub async fn handle_translate(
    text: String,
    target_lang: String,
    primary_only: bool,
    config: Option<PathBuf>,
) -> anyhow::Result<()> {
    let config = load_config(config)?;
    let gateway = TranslationGateway::from_config(&config)?;
    let request = TranslationRequest::new(text, target_lang);

    let output = if primary_only {
        serde_json::to_string_pretty(&gateway.translate_with_primary(&request).await?)?
    } else {
        serde_json::to_string_pretty(&gateway.translate(&request).await?)?
    };

    println!("{}", output);

    Ok(())
}
