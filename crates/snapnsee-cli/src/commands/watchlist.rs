use crate::display;
use crate::output::Output;
use crate::WatchlistCommands;
use clap::ValueEnum;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::Cell;
use futures::future::join_all;
use serde_json::json;
use snapnsee_core::{PersistenceError, ProviderSummary, Services};
use snapnsee_models::{MediaType, NewWatchlistEntry, WatchingStatus, WatchlistEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MediaTypeArg {
    Movie,
    Tv,
}

impl From<MediaTypeArg> for MediaType {
    fn from(arg: MediaTypeArg) -> Self {
        match arg {
            MediaTypeArg::Movie => MediaType::Movie,
            MediaTypeArg::Tv => MediaType::Tv,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    ToWatch,
    Watching,
    Watched,
}

impl From<StatusArg> for WatchingStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::ToWatch => WatchingStatus::ToWatch,
            StatusArg::Watching => WatchingStatus::WatchingNow,
            StatusArg::Watched => WatchingStatus::Watched,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WatchlistFilter {
    All,
    Watching,
    ToWatch,
    Watched,
    /// Everything not yet watched
    Unwatched,
}

pub async fn run_watchlist(cmd: WatchlistCommands, services: &Services, output: &Output) -> Result<()> {
    match cmd {
        WatchlistCommands::List { filter, providers } => list(filter, providers, services, output).await,
        WatchlistCommands::Add { id, title, media_type, status } => {
            let entry = NewWatchlistEntry::new(id.clone(), media_type.into(), title);
            let added = services.watchlist.add(entry, status.into()).map_err(save_error)?;
            if added {
                output.success(format!("Added {} to your watchlist", id));
            } else {
                output.info(format!("{} is already in your watchlist", id));
            }
            Ok(())
        }
        WatchlistCommands::Remove { id } => {
            if services.watchlist.remove(&id).map_err(save_error)? {
                output.success(format!("Removed {}", id));
            } else {
                output.info(format!("{} was not in your watchlist", id));
            }
            Ok(())
        }
        WatchlistCommands::Watched { id } => {
            transition(&id, services.watchlist.mark_as_watched(&id), "watched", output)
        }
        WatchlistCommands::ToWatch { id } => {
            transition(&id, services.watchlist.mark_as_to_watch(&id), "to watch", output)
        }
        WatchlistCommands::Watching { id } => {
            transition(&id, services.watchlist.mark_as_watching_now(&id), "watching", output)
        }
    }
}

fn save_error(e: PersistenceError) -> color_eyre::Report {
    eyre!("Failed to save watchlist: {}", e)
}

fn transition(id: &str, result: Result<bool, PersistenceError>, label: &str, output: &Output) -> Result<()> {
    if result.map_err(save_error)? {
        output.success(format!("Marked {} as {}", id, label));
        Ok(())
    } else {
        Err(eyre!("{} is not in your watchlist", id))
    }
}

fn select(filter: WatchlistFilter, services: &Services) -> Vec<WatchlistEntry> {
    let watchlist = &services.watchlist;
    match filter {
        WatchlistFilter::All => watchlist.items(),
        WatchlistFilter::Watching => watchlist.watching_now(),
        WatchlistFilter::ToWatch => watchlist.to_watch(),
        WatchlistFilter::Watched => watchlist.watched(),
        WatchlistFilter::Unwatched => watchlist.unwatched(),
    }
}

async fn list(filter: WatchlistFilter, with_providers: bool, services: &Services, output: &Output) -> Result<()> {
    let entries = select(filter, services);

    // Lookups run concurrently; the cache tolerates duplicate fetches
    let summaries: Vec<Option<ProviderSummary>> = if with_providers {
        let lookups = entries
            .iter()
            .map(|entry| services.provider_summary(&entry.id, entry.media_type, None));
        join_all(lookups)
            .await
            .into_iter()
            .map(|summary| summary.map(Some))
            .collect::<Result<_, _>>()
            .map_err(|e| eyre!("Failed to load preferences: {}", e))?
    } else {
        vec![None; entries.len()]
    };

    if !output.is_human() {
        let items: Vec<_> = entries
            .iter()
            .zip(&summaries)
            .map(|(entry, summary)| {
                let mut item = json!(entry);
                if let Some(summary) = summary {
                    item["availability"] = json!(summary.availability);
                    item["providers"] = json!(summary.providers);
                }
                item
            })
            .collect();
        output.json(&json!({ "count": items.len(), "items": items }));
        return Ok(());
    }

    if entries.is_empty() {
        output.info("Your watchlist is empty. Try `snapnsee recognize <IMAGE> --add`.");
        return Ok(());
    }

    let mut table = super::table();
    let mut headers = vec![
        super::header("Title"),
        super::header("Id"),
        super::header("Type"),
        super::header("Status"),
        super::header("Added"),
    ];
    if with_providers {
        headers.push(super::header("Streaming"));
    }
    table.set_header(headers);

    for (entry, summary) in entries.iter().zip(&summaries) {
        let mut row = vec![
            Cell::new(&entry.title),
            Cell::new(&entry.id),
            Cell::new(entry.media_type),
            Cell::new(display::status_label(entry.status)),
            Cell::new(display::added_label(entry.added_at)),
        ];
        if let Some(summary) = summary {
            row.push(Cell::new(streaming_label(summary)));
        }
        table.add_row(row);
    }

    output.human(table);
    output.info(format!("{} item(s)", entries.len()));
    Ok(())
}

/// Provider names with the user's own services starred
pub(crate) fn streaming_label(summary: &ProviderSummary) -> String {
    if summary.providers.is_empty() {
        return display::availability_label(&summary.availability);
    }
    summary
        .providers
        .iter()
        .map(|provider| {
            if provider.subscribed {
                format!("{}*", provider.service.name)
            } else {
                provider.service.name.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}
