//! CLI argument definitions using clap
//!
//! Commands:
//! - hotel-api init --config <path> [--data-dir <dir>]
//! - hotel-api serve --config <path> [--host <host>] [--port <port>] [--data-dir <dir>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Hotel listings REST API
#[derive(Parser, Debug)]
#[command(name = "hotel-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a default configuration file and create the data directory
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./hotel-api.json")]
        config: PathBuf,

        /// Directory for the hotel journal
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// Start the HTTP server
    Serve {
        /// Path to configuration file (defaults are used if it does not exist)
        #[arg(long, default_value = "./hotel-api.json")]
        config: PathBuf,

        /// Override the bind host
        #[arg(long)]
        host: Option<String>,

        /// Override the bind port
        #[arg(long)]
        port: Option<u16>,

        /// Override the journal directory
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_serve_overrides() {
        let cli = Cli::parse_from(["hotel-api", "serve", "--port", "8080", "--data-dir", "/tmp/hotels"]);

        match cli.command {
            Command::Serve {
                config,
                host,
                port,
                data_dir,
            } => {
                assert_eq!(config, PathBuf::from("./hotel-api.json"));
                assert_eq!(host, None);
                assert_eq!(port, Some(8080));
                assert_eq!(data_dir, Some(PathBuf::from("/tmp/hotels")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
