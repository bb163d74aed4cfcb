//! CLI command implementations

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::http_server::HttpServer;
use crate::logging;
use crate::store::{HotelStore, MemoryHotelStore};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config, data_dir } => init(&config, data_dir),
        Command::Serve {
            config,
            host,
            port,
            data_dir,
        } => {
            let mut app_config = AppConfig::load_or_default(&config)?;
            apply_overrides(&mut app_config, host, port, data_dir);
            serve(app_config)
        }
    }
}

/// Command-line flags win over file values
pub fn apply_overrides(
    config: &mut AppConfig,
    host: Option<String>,
    port: Option<u16>,
    data_dir: Option<PathBuf>,
) {
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(data_dir) = data_dir {
        config.data_dir = Some(data_dir);
    }
}

/// Writes a default config file and creates the data directory.
///
/// Refuses to overwrite an existing config file.
pub fn init(config_path: &Path, data_dir: Option<PathBuf>) -> CliResult<()> {
    if config_path.exists() {
        return Err(CliError::already_initialized(config_path));
    }

    let config = AppConfig {
        data_dir: Some(data_dir.unwrap_or_else(|| PathBuf::from("./data"))),
        ..AppConfig::default()
    };

    if let Some(dir) = &config.data_dir {
        fs::create_dir_all(dir).map_err(|e| {
            CliError::io_error(format!("Failed to create data directory {}: {}", dir.display(), e))
        })?;
    }

    let json = serde_json::to_string_pretty(&config)
        .map_err(|e| CliError::config_error(format!("Failed to encode config: {}", e)))?;
    fs::write(config_path, json + "\n")?;

    println!("Wrote {}", config_path.display());
    Ok(())
}

/// Opens the store described by the config
pub fn open_store(config: &AppConfig) -> CliResult<Arc<dyn HotelStore>> {
    let store = match &config.data_dir {
        Some(dir) => MemoryHotelStore::open(dir)?,
        None => {
            tracing::warn!("no data_dir configured; hotels are kept in memory only");
            MemoryHotelStore::new()
        }
    };
    Ok(Arc::new(store))
}

/// Boots logging, the store and the HTTP server, and blocks until shutdown
pub fn serve(config: AppConfig) -> CliResult<()> {
    logging::init(config.log_format).map_err(CliError::boot_failed)?;

    let store = open_store(&config)?;
    let server = HttpServer::new(config, store);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::boot_failed(format!("Failed to start runtime: {}", e)))?;

    runtime
        .block_on(server.start())
        .map_err(|e| CliError::boot_failed(e.to_string()))
}
