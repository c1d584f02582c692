//! Server configuration
//!
//! Sources, lowest priority first: built-in defaults, an optional TOML file
//! (`reel.toml`, or the path in `REEL_CONFIG`), then `REEL_*` environment
//! variables.

use anyhow::{Context, Result};
use serde::Deserialize;

const DEFAULT_CONFIG_FILE: &str = "reel.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub bind_address: String,
    /// User that viewer-relative flags (`isLiked`, `isFollowing`) refer to
    pub current_user_id: String,
    pub seed_demo_data: bool,
    /// Built client bundle to serve; API only when unset
    #[serde(default)]
    pub static_dir: Option<String>,
    /// Tracing filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path =
            std::env::var("REEL_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from(&path)
    }

    pub fn load_from(path: &str) -> Result<Self> {
        ::config::Config::builder()
            .set_default("bind_address", "0.0.0.0:5000")?
            .set_default("current_user_id", "1")?
            .set_default("seed_demo_data", true)?
            .set_default("log_filter", "info")?
            .add_source(::config::File::with_name(path).required(false))
            .add_source(::config::Environment::with_prefix("REEL"))
            .build()
            .with_context(|| format!("Failed to read configuration ({})", path))?
            .try_deserialize()
            .context("Invalid configuration")
    }
}
