//! `marquee` — console front-end for the Marquee cinema manager.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the
//! JSON documents under the configured data directory, and drops into
//! the interactive menu.

mod console;
mod menu;

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser;
use marquee_core::{codec, schedule::WeeklySchedule};
use marquee_managers::{FounderBootstrap, MovieManager, UserManager};
use menu::App;
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Marquee cinema manager")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

// ─── Configuration ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
struct AppConfig {
  /// Directory holding `movie.json` and `user.json`.
  #[serde(default = "default_data_dir")]
  data_dir:         PathBuf,
  /// Daily operating window, `HH:MM`.
  #[serde(default = "default_opening_time")]
  opening_time:     String,
  #[serde(default = "default_closing_time")]
  closing_time:     String,
  /// Credentials used only when the user document is empty.
  #[serde(default = "default_founder_nickname")]
  founder_nickname: String,
  #[serde(default = "default_founder_password")]
  founder_password: String,
}

fn default_data_dir() -> PathBuf { PathBuf::from("data") }
fn default_opening_time() -> String { "09:00".to_string() }
fn default_closing_time() -> String { "23:00".to_string() }
fn default_founder_nickname() -> String { "founder".to_string() }
fn default_founder_password() -> String { "change.me".to_string() }

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
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
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("MARQUEE"))
    .build()
    .context("failed to read config file")?;

  let app_cfg: AppConfig = settings
    .try_deserialize()
    .context("failed to deserialise AppConfig")?;

  let opening = codec::parse_time(&app_cfg.opening_time)
    .with_context(|| format!("invalid opening_time {:?}", app_cfg.opening_time))?;
  let closing = codec::parse_time(&app_cfg.closing_time)
    .with_context(|| format!("invalid closing_time {:?}", app_cfg.closing_time))?;

  let data_dir = expand_tilde(&app_cfg.data_dir);
  std::fs::create_dir_all(&data_dir)
    .with_context(|| format!("failed to create data directory {data_dir:?}"))?;

  let movies = MovieManager::open(data_dir.join("movie.json"))
    .context("failed to open the movie document")?;
  let users = UserManager::open(
    data_dir.join("user.json"),
    &FounderBootstrap {
      nickname: app_cfg.founder_nickname,
      password: app_cfg.founder_password,
    },
  )
  .context("failed to open the user document")?;
  let schedule = WeeklySchedule::new(opening, closing).context("invalid operating window")?;

  tracing::info!(
    ?data_dir,
    opening = %app_cfg.opening_time,
    closing = %app_cfg.closing_time,
    "documents open"
  );

  App { movies, users, schedule }.run();
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
