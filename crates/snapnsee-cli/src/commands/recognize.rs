use crate::display;
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use snapnsee_core::Services;
use snapnsee_models::{NewWatchlistEntry, RecognitionResult, WatchingStatus};
use std::io::IsTerminal;
use std::path::Path;
use std::time::Duration;
use tracing::info;

const POSTER_SIZE: &str = "w500";

pub async fn run_recognize(image: &Path, add: bool, services: &Services, output: &Output) -> Result<()> {
    let bytes = tokio::fs::read(image)
        .await
        .map_err(|e| eyre!("Failed to read {}: {}", image.display(), e))?;

    let spinner = spinner(output);
    spinner.set_message(format!("Identifying {}...", image.display()));
    let result = services.recognition.recognize(&bytes).await;
    spinner.finish_and_clear();

    let result = result.map_err(|e| eyre!("{}", e.user_message()))?;
    info!(
        media_id = %result.media_id,
        confidence = result.match_confidence,
        "Recognized media"
    );

    if output.is_human() {
        output.human(result_table(&result));
    } else {
        output.json(&serde_json::to_value(&result)?);
    }

    if add {
        let title = result.media_details.display_title().to_string();
        let added = services
            .watchlist
            .add(NewWatchlistEntry::from_recognition(&result), WatchingStatus::ToWatch)
            .map_err(|e| eyre!("Failed to save watchlist: {}", e))?;
        if added {
            output.success(format!("Added \"{}\" to your watchlist", title));
        } else {
            output.info(format!("\"{}\" is already in your watchlist", title));
        }
    }

    Ok(())
}

fn result_table(result: &RecognitionResult) -> comfy_table::Table {
    let details = &result.media_details;
    let mut rows = vec![
        ("Title", details.display_title().to_string()),
        ("Id", result.media_id.clone()),
        ("Type", result.media_type_or_unknown().to_string()),
        ("Confidence", display::confidence_percent(result.match_confidence)),
    ];
    if let Some(method) = result.method {
        rows.push(("Matched by", method.as_str().to_string()));
    }
    if let Some(extracted) = &result.extracted_title {
        rows.push(("Text found", extracted.clone()));
    }
    if let Some(date) = details.display_date() {
        rows.push(("Released", date.to_string()));
    }
    if let Some(runtime) = details.display_runtime() {
        rows.push(("Runtime", runtime));
    }
    let genres = details.genre_names();
    if !genres.is_empty() {
        rows.push(("Genres", genres.join(", ")));
    }
    if let Some(rating) = details.vote_average {
        rows.push(("Rating", format!("{:.1}/10", rating)));
    }
    if let Some(tagline) = details.tagline.as_deref().filter(|t| !t.is_empty()) {
        rows.push(("Tagline", tagline.to_string()));
    }
    if let Some(overview) = details.overview.as_deref().filter(|o| !o.is_empty()) {
        rows.push(("Overview", overview.to_string()));
    }
    if let Some(poster) = details.poster_url(POSTER_SIZE) {
        rows.push(("Poster", poster));
    }
    super::detail_table("Match", rows)
}

/// Hidden unless both stdout and stderr are terminals and output is human
fn spinner(output: &Output) -> ProgressBar {
    let interactive = std::io::stdout().is_terminal() && std::io::stderr().is_terminal();
    if !interactive || !output.is_human() {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
        .map(|style| style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"))
    {
        spinner.set_style(style);
    }
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
