use anyhow::Result;
use std::path::{Path, PathBuf};

/// Overrides the platform config directory when set
pub const BASE_PATH_ENV: &str = "SNAPNSEE_BASE_PATH";

/// Used when neither the override nor a platform config directory exists
const FALLBACK_DIR: &str = ".snapnsee";

pub struct PathManager {
    config_dir: PathBuf,
    data_dir: PathBuf,
    log_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("snapnsee");

        Ok(Self::from_base(base_dir))
    }

    /// Lay out config, data and logs under a single directory
    pub fn from_base(base: PathBuf) -> Self {
        Self {
            config_dir: base.clone(),
            data_dir: base.join("data"),
            log_dir: base.join("logs"),
        }
    }

    /// Base directory from `SNAPNSEE_BASE_PATH`, if set and non-empty
    pub fn from_env() -> Option<Self> {
        std::env::var_os(BASE_PATH_ENV)
            .filter(|base| !base.is_empty())
            .map(|base| Self::from_base(PathBuf::from(base)))
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn watchlist_file(&self) -> PathBuf {
        self.data_dir.join("watchlist.json")
    }

    pub fn preferences_file(&self) -> PathBuf {
        self.data_dir.join("preferences.json")
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join("snapnsee.log")
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.data_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}

impl Default for PathManager {
    fn default() -> Self {
        // An explicit base path wins over platform directories; without
        // either, data lives under the current directory
        Self::from_env()
            .or_else(|| Self::new().ok())
            .unwrap_or_else(|| Self::from_base(PathBuf::from(FALLBACK_DIR)))
    }
}
