use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::Cell;
use owo_colors::OwoColorize;
use serde_json::json;
use snapnsee_core::Services;
use snapnsee_models::{Availability, MediaType};

pub async fn run_providers(
    media_id: &str,
    media_type: MediaType,
    country: Option<&str>,
    services: &Services,
    output: &Output,
) -> Result<()> {
    let country = country.map(str::to_ascii_uppercase);
    let summary = services
        .provider_summary(media_id, media_type, country.as_deref())
        .await
        .map_err(|e| eyre!("Failed to load preferences: {}", e))?;

    if !output.is_human() {
        output.json(&json!({
            "media_id": media_id,
            "media_type": media_type,
            "country": summary.country,
            "availability": summary.availability,
            "providers": summary.providers,
        }));
        return Ok(());
    }

    match &summary.availability {
        Availability::Available(ids) if summary.providers.is_empty() => {
            output.info(format!(
                "Streaming in {} on {} service(s) not in the catalog: {}",
                summary.country,
                ids.len(),
                ids.join(", ")
            ));
        }
        Availability::Available(_) => {
            let mut table = super::table();
            table.set_header(vec![super::header("Service"), super::header("Subscribed")]);
            for provider in &summary.providers {
                let subscribed = if provider.subscribed {
                    "✓".green().to_string()
                } else {
                    String::new()
                };
                table.add_row(vec![Cell::new(provider.service.name), Cell::new(subscribed)]);
            }
            output.info(format!("Streaming in {}:", summary.country));
            output.human(table);
        }
        Availability::Unavailable => {
            output.info(format!("Not available for streaming in {}", summary.country));
        }
        Availability::Unknown => {
            output.warn("Could not determine streaming availability. Try again later.");
        }
        Availability::Error(message) => {
            output.error(format!("Provider lookup failed: {}", message));
        }
    }

    Ok(())
}
