use crate::output::Output;
use crate::ConfigCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use serde_json::json;
use snapnsee_config::{Config, PathManager};

pub fn run_config(cmd: ConfigCommands, config: &Config, paths: &PathManager, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show_config(config, paths, output),
        ConfigCommands::Init { force } => init_config(force, paths, output),
    }
}

fn show_config(config: &Config, paths: &PathManager, output: &Output) -> Result<()> {
    let config_file = paths.config_file();

    if !output.is_human() {
        output.json(&json!({
            "config_file": config_file,
            "config_file_exists": config_file.exists(),
            "data_dir": paths.data_dir(),
            "recognize_endpoint": config.api.recognize_endpoint(),
            "providers_endpoint": config.api.providers_endpoint(),
            "config": config,
        }));
        return Ok(());
    }

    if !config_file.exists() {
        output.info(format!(
            "No config file at {}; using defaults. Run `snapnsee config init` to create one.",
            config_file.display()
        ));
    }

    let log_file = config
        .logging
        .file
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "stderr".to_string());

    let rows = vec![
        ("Config file", config_file.display().to_string()),
        ("Data directory", paths.data_dir().display().to_string()),
        ("API base URL", config.api.base_url.clone()),
        ("Recognize endpoint", config.api.recognize_endpoint()),
        ("Providers endpoint", config.api.providers_endpoint()),
        ("Initial preferences country", config.providers.country.clone()),
        ("Log level", config.logging.level.clone()),
        ("JSON logs", config.logging.json.to_string()),
        ("Log file", log_file),
    ];
    output.human(super::detail_table("Configuration", rows));

    if let Err(e) = config.validate() {
        output.warn(format!("Configuration is invalid: {}", e));
    }
    Ok(())
}

fn init_config(force: bool, paths: &PathManager, output: &Output) -> Result<()> {
    let config_file = paths.config_file();
    if config_file.exists() && !force {
        output.warn(format!(
            "{} already exists. Use --force to overwrite it.",
            config_file.display()
        ));
        return Ok(());
    }

    paths
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create directories under {}: {}", paths.config_dir().display(), e))?;

    let mut config = Config::default();
    config.logging.file = Some(paths.log_file());
    config
        .save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to write {}: {}", config_file.display(), e))?;

    output.success(format!("Wrote default configuration to {}", config_file.display()));
    Ok(())
}
