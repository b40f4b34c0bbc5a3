use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{modifiers, presets, Attribute, Cell, Color, Table};
use snapnsee_client::ReqwestTransport;
use snapnsee_config::{Config, PathManager};
use snapnsee_core::Services;
use std::sync::Arc;

pub mod clear;
pub mod config;
pub mod prefs;
pub mod providers;
pub mod recognize;
pub mod watchlist;

pub fn open_services(config: &Config, paths: &PathManager) -> Result<Services> {
    config.validate().map_err(|e| eyre!("Invalid configuration: {}", e))?;

    let transport = ReqwestTransport::new().map_err(|e| eyre!("Failed to create HTTP client: {}", e))?;
    Services::open(config, paths, Arc::new(transport))
        .map_err(|e| eyre!("Failed to open local data in {}: {}", paths.data_dir().display(), e))
}

pub(crate) fn table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table
}

pub(crate) fn header(title: &str) -> Cell {
    Cell::new(title).fg(Color::Cyan).add_attribute(Attribute::Bold)
}

/// Two-column key/value table
pub(crate) fn detail_table(title: &str, rows: Vec<(&str, String)>) -> Table {
    let mut table = table();
    table.set_header(vec![header(title), Cell::new("")]);
    for (key, value) in rows {
        table.add_row(vec![Cell::new(key).add_attribute(Attribute::Bold), Cell::new(value)]);
    }
    table
}
