use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Production recognition backend
pub const DEFAULT_API_BASE_URL: &str = "https://snapnsee-production.up.railway.app";

const RECOGNIZE_PATH: &str = "/api/v1/recognize";
const PROVIDERS_PATH: &str = "/api/v1/providers";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersConfig {
    /// Country passed to provider lookups when the caller does not pick one
    #[serde(default = "default_country")]
    pub country: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_json_logging")]
    pub json: bool,
    pub file: Option<PathBuf>,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_country() -> String {
    "US".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_json_logging() -> bool {
    use std::io::IsTerminal;
    !std::io::stdout().is_terminal()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: default_base_url() }
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self { country: default_country() }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: default_json_logging(),
            file: None,
        }
    }
}

impl ApiConfig {
    fn trimmed_base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Full URL of the recognition endpoint
    pub fn recognize_endpoint(&self) -> String {
        format!("{}{}", self.trimmed_base(), RECOGNIZE_PATH)
    }

    /// Prefix of the provider lookup endpoint; media type and id are appended
    pub fn providers_endpoint(&self) -> String {
        format!("{}{}", self.trimmed_base(), PROVIDERS_PATH)
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to built-in defaults
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let url = reqwest::Url::parse(&self.api.base_url)
            .map_err(|e| anyhow::anyhow!("Invalid api.base_url '{}': {}", self.api.base_url, e))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(anyhow::anyhow!("api.base_url must use http or https, got '{}'", url.scheme()));
        }

        let country = self.providers.country.trim();
        if country.len() != 2 || !country.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(anyhow::anyhow!(
                "providers.country must be a two-letter country code, got '{}'",
                self.providers.country
            ));
        }

        Ok(())
    }
}
