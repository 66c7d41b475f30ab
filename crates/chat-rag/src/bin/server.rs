//! Chat server binary
//!
//! Run with: cargo run -p chat-rag --bin chat-rag-server

use chat_rag::{config::RagConfig, server::RagServer, MAX_DOCUMENTS};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "chat-rag-server",
    version,
    about = "Chat with uploaded documents, with @mention targeting"
)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, env = "CHAT_RAG_CONFIG")]
    config: Option<PathBuf>,

    /// Bind address (overrides config and HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port (overrides config and PORT)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chat_rag=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    // Load configuration: defaults < file < environment < flags
    let mut config = match &cli.config {
        Some(path) => RagConfig::from_file(path)?,
        None => RagConfig::default(),
    };
    config.apply_env()?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    config.validate()?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - LLM model: {}", config.llm.model);
    tracing::info!(
        "  - Chunk size: {} (overlap {})",
        config.chunking.chunk_size,
        config.chunking.chunk_overlap
    );
    tracing::info!("  - Max documents: {}", MAX_DOCUMENTS);

    // Create and start server
    let server = RagServer::new(config)?;

    println!("\nServer starting...");
    println!("  API: http://{}", server.address());
    println!("  Health: http://{}/api/health", server.address());
    println!("  API Info: http://{}/api/info", server.address());
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
