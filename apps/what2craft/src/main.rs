//! # what2craft
//!
//! Serves the crafting-relevant slice of a game item catalog.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────┐
//! │              apps/what2craft (THE BINARY)         │
//! │                                                   │
//! │   ┌─────────────┐          ┌─────────────┐        │
//! │   │    CLI      │          │  HTTP API   │        │
//! │   │   (clap)    │          │   (axum)    │        │
//! │   └──────┬──────┘          └──────┬──────┘        │
//! │          └──────────┬─────────────┘               │
//! │                     ▼                             │
//! │            ┌─────────────────┐                    │
//! │            │ what2craft-core │                    │
//! │            │  (THE ENGINE)   │                    │
//! │            └─────────────────┘                    │
//! └───────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server
//! what2craft --items-dir data/items serve --port 8080 --static-dir web
//!
//! # One-off queries
//! what2craft --items-dir data/items status
//! what2craft --items-dir data/items items --pretty
//! ```

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use what2craft::cli;

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // WHAT2CRAFT_LOG_FORMAT=json enables machine-parseable output.
    let log_format =
        std::env::var("WHAT2CRAFT_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "what2craft=info,what2craft_core=info,tower_http=debug".into());

    // Logs go to stderr; `items` writes its JSON to stdout.
    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    let cli = cli::Cli::parse();

    if !cli.quiet && matches!(cli.command, Some(cli::Commands::Serve { .. })) {
        print_banner();
    }

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the startup banner.
fn print_banner() {
    println!(
        r#"
  what2craft v{}
  crafting catalog server
"#,
        env!("CARGO_PKG_VERSION")
    );
}
