use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Registrar API credentials, as stored in `secrets.json`.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secrets {
    #[serde(rename = "apikey")]
    pub key: String,
    #[serde(rename = "secretapikey")]
    pub secret: String,
}

impl Secrets {
    #[cfg(test)]
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.key.is_empty() || self.secret.is_empty()
    }
}

// Keys end up in logs through `{:?}` otherwise.
impl fmt::Debug for Secrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secrets")
            .field("key", &redact(&self.key))
            .field("secret", &redact(&self.secret))
            .finish()
    }
}

fn redact(value: &str) -> &'static str {
    if value.is_empty() {
        "<empty>"
    } else {
        "<redacted>"
    }
}

/// Resolved runtime settings for one invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub base_url: String,
    pub secrets_path: PathBuf,
    pub cache_path: PathBuf,
}
