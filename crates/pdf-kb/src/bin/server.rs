//! Knowledge base server binary
//!
//! Run with: cargo run -p pdf-kb --bin pdf-kb-server -- --config pdf-kb.toml

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use console::style;
use pdf_kb::{
    config::RagConfig,
    providers::{EmbeddingProvider, OllamaProvider},
    server::RagServer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "pdf-kb-server", version, about = "PDF knowledge base server")]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host address (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Port (overrides config)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pdf_kb=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    println!(
        "\n{}\n{}\n",
        style("PDF Knowledge Base").bold().cyan(),
        style("Upload PDFs, search passages, ask questions").dim()
    );

    let mut config = RagConfig::load(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    tracing::info!("Configuration loaded");
    tracing::info!("  - Embedding model: {}", config.llm.embed_model);
    tracing::info!("  - LLM model: {}", config.llm.generate_model);
    tracing::info!(
        "  - Chunk size: {} (overlap {})",
        config.chunking.chunk_size,
        config.chunking.chunk_overlap
    );
    tracing::info!("  - Upload dir: {}", config.storage.upload_dir.display());
    tracing::info!("  - Vector store: {}", config.storage.persist_dir.display());

    let (embedder, llm) = OllamaProvider::new(&config.llm)?.split();

    tracing::info!("Checking Ollama at {}...", config.llm.base_url);
    match embedder.health_check().await {
        Ok(true) => tracing::info!("Ollama is running"),
        _ => {
            tracing::warn!("Ollama not available at {}", config.llm.base_url);
            tracing::warn!("Please start Ollama:");
            tracing::warn!("  1. Start: ollama serve");
            tracing::warn!(
                "  2. Pull models: ollama pull {} && ollama pull {}",
                config.llm.embed_model,
                config.llm.generate_model
            );
        }
    }

    let server = RagServer::new(config, Arc::new(embedder), Arc::new(llm))?;

    println!("Server starting...");
    println!("  UI:     http://{}", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("\nEndpoints:");
    println!("  POST /upload       - Upload and import a PDF");
    println!("  POST /search       - Vector search or LLM answer");
    println!("  POST /batch_import - Import every PDF in the upload directory");
    println!("\n{}\n", style("Press Ctrl+C to stop").dim());

    server.start().await?;

    Ok(())
}
