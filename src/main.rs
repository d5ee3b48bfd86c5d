mod config;
mod state;
mod routes;
mod handlers;
mod error;
mod agent;
mod ui;

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use state::AppState;

/// Find and load the configuration. An explicit `CONFIG_PATH` must exist;
/// otherwise the first existing default location is used, falling back to
/// built-in defaults when there is none.
fn load_config() -> Result<Config> {
    if let Ok(path) = std::env::var("CONFIG_PATH") {
        let config = Config::load(&path)?;
        info!("Loaded configuration from: {}", path);
        return Ok(config);
    }

    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));

    let config_paths = [
        PathBuf::from("conf.yaml"),
        PathBuf::from("conf.json"),
        exe_dir.join("conf.yaml"),
        exe_dir.join("conf.json"),
    ];

    if let Some(path) = config_paths.iter().find(|p| p.exists()) {
        let path = path.to_string_lossy();
        let config = Config::load(&path)?;
        info!("Loaded configuration from: {}", path);
        return Ok(config);
    }

    info!("No configuration file found, using defaults");
    Ok(Config::default())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("ngui_backend=info,tower_http=info")),
        )
        .init();

    let config = load_config()?;
    let host = config.system_config.host.clone();
    let port = config.system_config.port;

    // Model client and agents are built once and shared by all requests
    let app_state = AppState::new(config)?;
    let app = routes::create_app(app_state);

    let listener = tokio::net::TcpListener::bind((host.as_str(), port)).await?;
    info!("Starting server on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
