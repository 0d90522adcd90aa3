use anyhow::{Context, Result};
use log::{debug, info};
use std::{
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

/// The last IP pushed to the registrar, kept in a single-value file.
///
/// The file holds one JSON-encoded string, e.g. `"5.6.7.8"`.
#[derive(Debug, Clone)]
pub struct PrevIpStore {
    path: PathBuf,
}

impl PrevIpStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `Ok(None)` when nothing has been cached yet.
    pub fn load(&self) -> Result<Option<String>> {
        let contents = match fs::read(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No previous IP cached at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read IP cache: {}", self.path.display())
                })
            }
        };

        let ip: String = serde_json::from_slice(&contents)
            .with_context(|| format!("Failed to decode IP cache: {}", self.path.display()))?;
        Ok(Some(ip))
    }

    /// Writes a sibling `.tmp` file, then renames it over the cache.
    pub fn store(&self, ip: &str) -> Result<()> {
        let temp_path = self.temp_path();
        {
            let mut file = File::create(&temp_path).with_context(|| {
                format!("Error opening/creating IP cache: {}", temp_path.display())
            })?;
            serde_json::to_writer(&mut file, ip)
                .with_context(|| format!("Error encoding IP cache: {}", temp_path.display()))?;
            file.flush()
                .with_context(|| format!("Error writing IP cache: {}", temp_path.display()))?;
        }

        fs::rename(&temp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                self.path.display()
            )
        })
    }

    fn temp_path(&self) -> PathBuf {
        let mut temp = self.path.clone().into_os_string();
        temp.push(".tmp");
        PathBuf::from(temp)
    }

    /// Writes `ip` unless it is already the cached value. Returns whether it wrote.
    pub fn update(&self, ip: &str) -> Result<bool> {
        // An unreadable cache gets overwritten.
        let prev = self.load().unwrap_or(None);
        if prev.as_deref() == Some(ip) {
            return Ok(false);
        }

        self.store(ip)?;
        info!("Cached IP {} at {}", ip, self.path.display());
        Ok(true)
    }
}
