//! inventario server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the CSV
//! tables in the configured data directory, and serves the HTML views and the
//! JSON API over HTTP.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use inventario_store_csv::CsvStore;
use inventario_web::{AppState, ServerConfig};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Inventario web server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Override the data directory from the configuration.
  #[arg(long)]
  data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let defaults = ServerConfig::default();
  let settings = config::Config::builder()
    .set_default("host", defaults.host)?
    .set_default("port", i64::from(defaults.port))?
    .set_default("data_dir", defaults.data_dir.to_string_lossy().into_owned())?
    .set_default("static_dir", defaults.static_dir.to_string_lossy().into_owned())?
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("INVENTARIO"))
    .build()
    .context("failed to read config file")?;

  let mut server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  if let Some(dir) = cli.data_dir {
    server_cfg.data_dir = dir;
  }
  // Expand `~` in configured paths.
  server_cfg.data_dir = expand_tilde(&server_cfg.data_dir);
  server_cfg.static_dir = expand_tilde(&server_cfg.static_dir);

  let store = CsvStore::open(&server_cfg.data_dir)
    .await
    .with_context(|| format!("failed to open data directory {:?}", server_cfg.data_dir))?;

  let address = format!("{}:{}", server_cfg.host, server_cfg.port);
  let state = AppState {
    store:  Arc::new(store),
    config: Arc::new(server_cfg),
  };
  let app = inventario_web::router(state);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
