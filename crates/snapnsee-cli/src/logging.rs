use anyhow::{anyhow, Result};
use snapnsee_config::LoggingConfig;
use std::io;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::{self, time::ChronoUtc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Install the global subscriber.
///
/// `-q` wins over everything, then `-v`/`-vv`, then `RUST_LOG`, then the
/// configured level. `RUST_LOG_JSON=true|false` overrides the configured
/// format.
pub fn init_logging(verbose_level: u8, quiet: bool, config: &LoggingConfig) -> Result<()> {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose_level {
            0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level)),
            // -v: debug, minus hyper's connection chatter
            1 => EnvFilter::new("debug,hyper::proto::h1=warn,hyper::client::pool=warn"),
            _ => EnvFilter::new("trace"),
        }
    };

    let json = std::env::var("RUST_LOG_JSON")
        .map(|v| v == "true")
        .unwrap_or(config.json);

    let registry = Registry::default().with(filter);

    match &config.file {
        Some(log_path) => {
            let file_appender = rolling_appender(log_path)?;
            if json {
                let layer = fmt::layer()
                    .json()
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(file_appender);
                registry.with(layer).init();
            } else {
                let layer = fmt::layer()
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(false)
                    .with_writer(file_appender);
                registry.with(layer).init();
            }
        }
        None => {
            if json {
                let layer = fmt::layer()
                    .json()
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(io::stderr);
                registry.with(layer).init();
            } else {
                let layer = fmt::layer()
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(io::stderr);
                registry.with(layer).init();
            }
        }
    }

    Ok(())
}

/// Daily-rotated appender: `logs/snapnsee.log` rolls to `snapnsee.<date>`
fn rolling_appender(log_path: &Path) -> Result<RollingFileAppender> {
    let log_dir = log_path
        .parent()
        .ok_or_else(|| anyhow!("Log file path has no parent directory"))?;
    std::fs::create_dir_all(log_dir)?;

    let log_prefix = log_path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| anyhow!("Invalid log filename: {}", log_path.display()))?;

    Ok(RollingFileAppender::new(Rotation::DAILY, log_dir, log_prefix))
}
