use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::eyre;
use commands::watchlist::{MediaTypeArg, StatusArg, WatchlistFilter};
use commands::{clear, config, prefs, providers, recognize, watchlist};
use snapnsee_config::{Config, PathManager};
use std::path::PathBuf;

mod commands;
mod display;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "snapnsee")]
#[command(about = "SnapnSee - Snap a screen, see what's on and where to stream it")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Identify the movie or show in a photo
    #[command(long_about = "Upload a photo of a screen or poster to the recognition service and show the matched title. The image is re-encoded as JPEG before upload.")]
    Recognize {
        /// Path to the image file
        image: PathBuf,

        /// Add the match to the watchlist as "to watch"
        #[arg(long, action = ArgAction::SetTrue)]
        add: bool,
    },
    /// Manage the watchlist
    Watchlist {
        #[command(subcommand)]
        cmd: WatchlistCommands,
    },
    /// Show where a title is streaming
    #[command(long_about = "Look up streaming providers for a title. Positive results are cached in memory for the life of the process. Without --country the country from your preferences is used.")]
    Providers {
        /// Media id as returned by `recognize`
        media_id: String,

        #[arg(long, value_enum, default_value = "movie")]
        media_type: MediaTypeArg,

        /// Two-letter country code
        #[arg(long)]
        country: Option<String>,
    },
    /// View or change preferences
    Prefs {
        #[command(subcommand)]
        cmd: Option<PrefsCommands>,
    },
    /// View or create the configuration file
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
    /// Delete stored data
    #[command(long_about = "Delete the stored watchlist and/or preferences. Use --watchlist, --preferences, or --all.")]
    Clear {
        /// Clear the watchlist and preferences
        #[arg(long, action = ArgAction::SetTrue, conflicts_with_all = ["watchlist", "preferences"])]
        all: bool,

        /// Clear the watchlist
        #[arg(long, action = ArgAction::SetTrue)]
        watchlist: bool,

        /// Clear preferences
        #[arg(long, action = ArgAction::SetTrue)]
        preferences: bool,
    },
}

#[derive(Subcommand)]
pub enum WatchlistCommands {
    /// List saved titles, newest first
    List {
        #[arg(long, value_enum, default_value = "all")]
        filter: WatchlistFilter,

        /// Also look up streaming providers for each title
        #[arg(long, action = ArgAction::SetTrue)]
        providers: bool,
    },
    /// Add a title by id
    Add {
        id: String,

        #[arg(long)]
        title: String,

        #[arg(long, value_enum, default_value = "movie")]
        media_type: MediaTypeArg,

        #[arg(long, value_enum, default_value = "to-watch")]
        status: StatusArg,
    },
    /// Remove a title
    Remove { id: String },
    /// Mark a title as watched
    Watched { id: String },
    /// Move a title back to "to watch"
    ToWatch { id: String },
    /// Mark a title as currently being watched
    Watching { id: String },
}

#[derive(Subcommand)]
pub enum PrefsCommands {
    /// Show current preferences and the streaming service catalog
    Show,
    /// Select or deselect a streaming service, e.g. `netflix`
    ToggleService { id: String },
    /// Enable or disable the weekly digest
    Digest {
        #[arg(action = ArgAction::Set)]
        enabled: bool,
    },
    /// Hour of day (0-23) for notifications
    Hour { hour: u8 },
    /// Two-letter country code used for provider lookups
    Country { code: String },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let paths = PathManager::default();
    let config_file = paths.config_file();
    let config = Config::load_or_default(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;

    logging::init_logging(cli.verbose, cli.quiet, &config.logging).map_err(|e| eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Recognize { image, add } => {
            let services = commands::open_services(&config, &paths)?;
            recognize::run_recognize(&image, add, &services, &output).await
        }
        Commands::Watchlist { cmd } => {
            let services = commands::open_services(&config, &paths)?;
            watchlist::run_watchlist(cmd, &services, &output).await
        }
        Commands::Providers { media_id, media_type, country } => {
            let services = commands::open_services(&config, &paths)?;
            providers::run_providers(&media_id, media_type.into(), country.as_deref(), &services, &output).await
        }
        Commands::Prefs { cmd } => {
            let services = commands::open_services(&config, &paths)?;
            prefs::run_prefs(cmd.unwrap_or(PrefsCommands::Show), &services, &output)
        }
        Commands::Config { cmd } => config::run_config(cmd.unwrap_or(ConfigCommands::Show), &config, &paths, &output),
        Commands::Clear { all, watchlist, preferences } => clear::run_clear(all, watchlist, preferences, &paths, &output),
    }
}
