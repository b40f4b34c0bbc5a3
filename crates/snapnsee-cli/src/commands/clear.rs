use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use snapnsee_config::PathManager;
use std::fs;
use std::path::Path;

pub fn run_clear(all: bool, watchlist: bool, preferences: bool, paths: &PathManager, output: &Output) -> Result<()> {
    if !(all || watchlist || preferences) {
        output.warn("No clear option specified. Use --watchlist, --preferences, or --all");
        output.info("\nExample: snapnsee clear --watchlist");
        return Ok(());
    }

    if all || watchlist {
        remove_store("watchlist", &paths.watchlist_file(), output)?;
    }
    if all || preferences {
        remove_store("preferences", &paths.preferences_file(), output)?;
    }

    Ok(())
}

/// Delete a store file along with any backup left by a failed load
fn remove_store(name: &str, file: &Path, output: &Output) -> Result<()> {
    let backup = file.with_extension("json.bak");
    let mut removed = false;

    for path in [file, backup.as_path()] {
        if path.exists() {
            fs::remove_file(path).map_err(|e| eyre!("Failed to remove {} at {}: {}", name, path.display(), e))?;
            removed = true;
        }
    }

    if removed {
        output.success(format!("Cleared {}: {}", name, file.display()));
    } else {
        output.info(format!("No {} found to clear", name));
    }
    Ok(())
}
