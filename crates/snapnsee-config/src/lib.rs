pub mod config;
pub mod paths;

pub use config::{ApiConfig, Config, LoggingConfig, ProvidersConfig, DEFAULT_API_BASE_URL};
pub use paths::{PathManager, BASE_PATH_ENV};
