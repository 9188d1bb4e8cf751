//! # what2craft CLI Module
//!
//! ## Available Commands
//!
//! - `serve` - Start the HTTP server
//! - `items` - Print the crafting closure as JSON
//! - `status` - Show catalog and closure counts (default)

mod commands;

use crate::config::Config;
use crate::error::AppError;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// what2craft - which items matter for crafting, and what they need.
#[derive(Parser, Debug)]
#[command(name = "what2craft")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory of item records (overrides config and environment)
    #[arg(short = 'd', long, global = true)]
    pub items_dir: Option<PathBuf>,

    /// Edition key to serve, e.g. "nh" (overrides config and environment)
    #[arg(short, long, global = true)]
    pub edition: Option<String>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,

        /// Directory with index.html and other front-end assets
        #[arg(short, long)]
        static_dir: Option<PathBuf>,

        /// Build the closure on the first request instead of at startup
        #[arg(long)]
        lazy: bool,
    },

    /// Print the crafting closure as JSON
    Items {
        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Show catalog and closure counts
    Status,
}

impl Cli {
    /// Resolve configuration: flags over environment over file over defaults.
    pub fn resolve_config(&self) -> Result<Config, AppError> {
        self.resolve_config_with(|k| std::env::var(k).ok())
    }

    /// Same as [`Cli::resolve_config`], reading variables through `lookup`.
    pub fn resolve_config_with<F>(&self, lookup: F) -> Result<Config, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::load(self.config.as_deref())?.with_env(lookup);

        if let Some(dir) = &self.items_dir {
            config.items_dir = dir.clone();
        }
        if let Some(edition) = &self.edition {
            config.edition = edition.clone();
        }
        if let Some(Commands::Serve {
            host,
            port,
            static_dir,
            lazy,
        }) = &self.command
        {
            if let Some(host) = host {
                config.host = host.clone();
            }
            if let Some(port) = port {
                config.port = *port;
            }
            if static_dir.is_some() {
                config.static_dir = static_dir.clone();
            }
            if *lazy {
                config.warm_on_start = false;
            }
        }
        Ok(config)
    }
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), AppError> {
    let config = cli.resolve_config()?;

    match cli.command {
        Some(Commands::Serve { .. }) => cmd_serve(&config).await,
        Some(Commands::Items { pretty }) => cmd_items(&config, pretty),
        Some(Commands::Status) | None => cmd_status(&config, cli.json_mode),
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ENV_EDITION, ENV_ITEMS_DIR};

    #[test]
    fn serve_flags_override_config() {
        let cli = Cli::parse_from([
            "what2craft",
            "--items-dir",
            "/data/items",
            "serve",
            "--port",
            "9090",
            "--lazy",
        ]);
        let config = cli.resolve_config_with(|_| None).expect("config");

        assert_eq!(config.items_dir, PathBuf::from("/data/items"));
        assert_eq!(config.port, 9090);
        assert!(!config.warm_on_start);
    }

    #[test]
    fn flags_override_environment() {
        let cli = Cli::parse_from(["what2craft", "--edition", "pc"]);
        let config = cli
            .resolve_config_with(|key| match key {
                ENV_ITEMS_DIR => Some("/env/items".to_string()),
                ENV_EDITION => Some("nh".to_string()),
                _ => None,
            })
            .expect("config");

        assert_eq!(config.items_dir, PathBuf::from("/env/items"));
        assert_eq!(config.edition, "pc");
    }

    #[test]
    fn no_subcommand_parses() {
        let cli = Cli::parse_from(["what2craft", "-e", "pc"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.edition.as_deref(), Some("pc"));
    }
}
