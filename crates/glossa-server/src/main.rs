//! Glossa Server binary
//!
//! Serves the vocabulary HTTP API.

use glossa_server::{config::ServerConfig, start_server, ServerError};
use std::env;
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    let args: Vec<String> = env::args().collect();

    let mut config = if args.len() > 2 && args[1] == "--config" {
        ServerConfig::from_file(&args[2])?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        ServerConfig::default()
    };

    config.apply_env()?;
    start_server(config).await
}

fn print_help() {
    println!("Glossa Server - Vocabulary extraction HTTP API");
    println!();
    println!("USAGE:");
    println!("    glossa-server [--config <path-to-config.toml>]");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("ENVIRONMENT (overrides the config file):");
    println!("    ANTHROPIC_API_KEY  API key for the AI backend (required)");
    println!("    DATABASE_PATH      SQLite database path (default: glossa.db)");
    println!("    LANGUAGE           Default session language (default: auto-detect)");
    println!("    PORT               Listen port (default: 8080)");
    println!("    RUST_LOG           Log filter (default: info)");
    println!();
}
