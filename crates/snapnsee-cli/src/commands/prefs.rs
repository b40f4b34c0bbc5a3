use crate::output::Output;
use crate::PrefsCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::Cell;
use owo_colors::OwoColorize;
use serde_json::json;
use snapnsee_core::Services;
use snapnsee_models::{StreamingService, UserPreferences, STREAMING_SERVICES};

pub fn run_prefs(cmd: PrefsCommands, services: &Services, output: &Output) -> Result<()> {
    let preferences = &services.preferences;
    let updated = match cmd {
        PrefsCommands::Show => {
            let current = preferences.get().map_err(|e| eyre!("Failed to load preferences: {}", e))?;
            show(&current, output);
            return Ok(());
        }
        PrefsCommands::ToggleService { id } => {
            let service = StreamingService::find(&id).ok_or_else(|| {
                let known: Vec<_> = STREAMING_SERVICES.iter().map(|s| s.id).collect();
                eyre!("Unknown service '{}'. Known services: {}", id, known.join(", "))
            })?;
            let updated = preferences.toggle_service(service.id)?;
            if updated.has_service(service.id) {
                output.success(format!("Selected {}", service.name));
            } else {
                output.success(format!("Deselected {}", service.name));
            }
            updated
        }
        PrefsCommands::Digest { enabled } => {
            let updated = preferences.set_weekly_digest(enabled)?;
            output.success(format!(
                "Weekly digest {}",
                if enabled { "enabled" } else { "disabled" }
            ));
            updated
        }
        PrefsCommands::Hour { hour } => {
            let updated = preferences.set_notification_hour(hour)?;
            output.success(format!("Notifications at {:02}:00", hour));
            updated
        }
        PrefsCommands::Country { code } => {
            let updated = preferences.set_country(&code)?;
            output.success(format!("Country set to {}", updated.country));
            updated
        }
    };

    output.json(&json!(updated));
    Ok(())
}

fn show(preferences: &UserPreferences, output: &Output) {
    if !output.is_human() {
        output.json(&json!(preferences));
        return;
    }

    let rows = vec![
        ("Country", preferences.country.clone()),
        ("Notification hour", format!("{:02}:00", preferences.notification_hour)),
        (
            "Weekly digest",
            if preferences.weekly_digest_enabled { "on" } else { "off" }.to_string(),
        ),
        ("Last updated", preferences.last_updated.format("%Y-%m-%d %H:%M UTC").to_string()),
    ];
    output.human(super::detail_table("Preferences", rows));

    let mut services = super::table();
    services.set_header(vec![super::header("Service"), super::header("Id"), super::header("Selected")]);
    for service in STREAMING_SERVICES {
        let selected = if preferences.has_service(service.id) {
            "✓".green().to_string()
        } else {
            String::new()
        };
        services.add_row(vec![Cell::new(service.name), Cell::new(service.id), Cell::new(selected)]);
    }
    output.human(services);
}
