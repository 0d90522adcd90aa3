pub mod models;

pub use models::{Secrets, Settings};

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, warn};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

pub const DEFAULT_BASE_URL: &str = "https://porkbun.com/api/json/v3";
pub const DEFAULT_SECRETS_FILE: &str = "secrets.json";
const CACHE_FILE_NAME: &str = ".pddc";

/// First argument value that switches to IP-only mode.
pub const PING_TARGET: &str = "ping";

/// Keep Porkbun A records pointed at this host's public IP.
#[derive(Debug, Parser)]
#[command(name = "pddc", version)]
pub struct Cli {
    /// Domain whose A records to update, or `ping` to print the current public IP
    pub target: String,

    /// Path of the JSON file holding `apikey` and `secretapikey`
    #[arg(long, env = "PDDC_SECRETS", default_value = DEFAULT_SECRETS_FILE)]
    pub secrets: PathBuf,

    /// Where the last applied IP is cached [default: $HOME/.pddc]
    #[arg(long, env = "PDDC_CACHE")]
    pub cache: Option<PathBuf>,

    /// Registrar API base URL
    #[arg(long, env = "PDDC_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,
}

impl Cli {
    pub fn is_ping(&self) -> bool {
        self.target == PING_TARGET
    }

    pub fn settings(&self) -> Settings {
        Settings {
            base_url: self.base_url.trim_end_matches('/').to_string(),
            secrets_path: self.secrets.clone(),
            cache_path: self.cache.clone().unwrap_or_else(default_cache_path),
        }
    }
}

pub fn default_cache_path() -> PathBuf {
    match env::var_os("HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home).join(CACHE_FILE_NAME),
        _ => {
            warn!("HOME is not set, caching the last IP in the working directory");
            PathBuf::from(CACHE_FILE_NAME)
        }
    }
}

pub fn load_secrets(path: &Path) -> Result<Secrets> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read secrets file: {}", path.display()))?;

    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse secrets file: {}", path.display()))
}

/// Loads the credentials, falling back to empty ones so the registrar reports
/// the authentication failure itself.
pub fn load_secrets_or_default(path: &Path) -> Secrets {
    match load_secrets(path) {
        Ok(secrets) => {
            if secrets.is_empty() {
                warn!("Secrets file {} has an empty key", path.display());
            }
            secrets
        }
        Err(e) => {
            error!("{:#}", e);
            Secrets::default()
        }
    }
}
