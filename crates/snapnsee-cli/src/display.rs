use chrono::{DateTime, Local, NaiveDate, Utc};
use owo_colors::OwoColorize;
use snapnsee_models::{Availability, WatchingStatus};

/// "today", "yesterday", "3 days ago", "2 weeks ago", else a short date
pub fn relative_day(date: NaiveDate, today: NaiveDate) -> String {
    let days = (today - date).num_days();
    match days {
        i64::MIN..=0 => "today".to_string(),
        1 => "yesterday".to_string(),
        2..=6 => format!("{} days ago", days),
        7..=29 => {
            let weeks = days / 7;
            format!("{} week{} ago", weeks, if weeks > 1 { "s" } else { "" })
        }
        _ => date.format("%m/%d/%y").to_string(),
    }
}

/// When an entry was added, in the local calendar
pub fn added_label(added_at: DateTime<Utc>) -> String {
    let local = added_at.with_timezone(&Local).date_naive();
    relative_day(local, Local::now().date_naive())
}

pub fn status_label(status: WatchingStatus) -> String {
    match status {
        WatchingStatus::WatchingNow => "Watching".cyan().to_string(),
        WatchingStatus::ToWatch => "To Watch".yellow().to_string(),
        WatchingStatus::Watched => "Watched".green().to_string(),
    }
}

pub fn availability_label(availability: &Availability) -> String {
    match availability {
        Availability::Available(ids) => format!("{} provider(s)", ids.len()),
        Availability::Unavailable => "Not streaming".to_string(),
        Availability::Unknown => "Unknown".dimmed().to_string(),
        Availability::Error(message) => format!("Error: {}", message).red().to_string(),
    }
}

pub fn confidence_percent(confidence: f64) -> String {
    format!("{:.0}%", confidence * 100.0)
}
