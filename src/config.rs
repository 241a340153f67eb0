use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Where the catalog comes from: an http(s) URL or a filesystem path
    #[serde(default = "default_data_source")]
    pub data_source: String,

    /// Directory relative filesystem paths are resolved against.
    /// Defaults to the directory holding the running executable.
    #[serde(default)]
    pub data_base_dir: Option<PathBuf>,

    /// Upper bound on a single source read, in seconds
    #[serde(default = "default_source_timeout_secs")]
    pub source_timeout_secs: u64,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_data_source() -> String {
    "https://raw.githubusercontent.com/sloanhom/bunnys/main/data.json".to_string()
}

fn default_source_timeout_secs() -> u64 {
    30
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    7000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Base directory for relative local sources
    pub fn base_dir(&self) -> PathBuf {
        self.data_base_dir
            .clone()
            .unwrap_or_else(default_base_dir)
    }
}

fn default_base_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}
