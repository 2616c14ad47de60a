use std::time::Duration;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trips_core::config::data_file_from_env_value;
use trips_core::{CoreConfig, TripCatalog, TripRecord, TripService};
use trips_sync::{
    CancellationToken, CatalogTripSource, HttpTripSource, QuerySync, SyncConfig, SyncPhase,
    SyncResult, TripSource, ViewState,
};

/// Descriptions longer than this are cut short in listings.
const DESCRIPTION_PREVIEW_CHARS: usize = 100;

#[derive(Parser)]
#[command(name = "trips")]
#[command(about = "Travel listing search CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List every trip in the catalogue
    List,
    /// Search trips by keywords (any keyword may match)
    Search {
        /// Space-separated keywords; omit to list everything
        keywords: Option<String>,
        /// REST API base URL (default: `TRIPS_API_URL`, then http://localhost:4001)
        #[arg(long)]
        api: Option<String>,
        /// Search the local catalogue instead of the REST API
        #[arg(long, conflicts_with = "api")]
        local: bool,
    },
    /// Read search terms from stdin, one edit per line, and print results as they settle
    ///
    /// A line is the whole search box content. Prefix with `=` to select a tag, `+` to
    /// toggle keywords, or send `!` alone to cancel the pending search.
    Watch {
        /// REST API base URL (default: `TRIPS_API_URL`, then http://localhost:4001)
        #[arg(long)]
        api: Option<String>,
        /// Search the local catalogue instead of the REST API
        #[arg(long, conflicts_with = "api")]
        local: bool,
        /// Typing pause in milliseconds before a search is sent (default: `TRIPS_DEBOUNCE_MS`)
        #[arg(long)]
        delay_ms: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so results on stdout stay clean.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("trips_sync=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::List) => {
            let catalog = local_catalog()?;
            if catalog.is_empty() {
                println!("No trips found.");
            } else {
                let records: Vec<TripRecord> =
                    catalog.trips().iter().map(TripRecord::from).collect();
                print_trips(&records);
            }
        }
        Some(Commands::Search {
            keywords,
            api,
            local,
        }) => {
            let term = keywords.unwrap_or_default();
            let trips = if local {
                let service = TripService::new(local_catalog()?);
                service
                    .search(Some(&term))?
                    .into_iter()
                    .map(TripRecord::from)
                    .collect()
            } else {
                let cfg = sync_config_from_env(api, None)?;
                let source = HttpTripSource::new(cfg.api_url())?;
                source.fetch_trips(&term, &CancellationToken::new()).await?
            };
            if trips.is_empty() {
                println!("No trips match {:?}.", term);
            } else {
                print_trips(&trips);
            }
        }
        Some(Commands::Watch {
            api,
            local,
            delay_ms,
        }) => {
            let cfg = sync_config_from_env(api, delay_ms)?;
            if local {
                let service = TripService::new(local_catalog()?);
                watch(CatalogTripSource::new(service), cfg.debounce()).await?
            } else {
                watch(HttpTripSource::new(cfg.api_url())?, cfg.debounce()).await?
            }
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}

fn local_catalog() -> Result<TripCatalog, Box<dyn std::error::Error>> {
    let cfg = CoreConfig::new(data_file_from_env_value(
        std::env::var("TRIPS_DATA_FILE").ok(),
    ))?;
    Ok(TripCatalog::load(&cfg)?)
}

fn sync_config_from_env(api: Option<String>, delay_ms: Option<u64>) -> SyncResult<SyncConfig> {
    resolve_sync_config(
        api,
        delay_ms,
        std::env::var("TRIPS_API_URL").ok(),
        std::env::var("TRIPS_DEBOUNCE_MS").ok(),
    )
}

/// Command-line flags win over the environment, which wins over the built-in defaults.
fn resolve_sync_config(
    api: Option<String>,
    delay_ms: Option<u64>,
    env_api_url: Option<String>,
    env_debounce_ms: Option<String>,
) -> SyncResult<SyncConfig> {
    let cfg = SyncConfig::from_env_values(api.or(env_api_url), env_debounce_ms)?;
    Ok(match delay_ms {
        Some(ms) => SyncConfig::new(cfg.api_url().clone(), Duration::from_millis(ms)),
        None => cfg,
    })
}

async fn watch<S: TripSource>(
    source: S,
    debounce: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let sync = QuerySync::new(source, debounce);
    let mut views = sync.subscribe();

    let printer = tokio::spawn(async move {
        let mut printed = 0;
        while views.changed().await.is_ok() {
            let view = views.borrow_and_update().clone();
            if view.phase == SyncPhase::Resolved && view.revision != printed {
                printed = view.revision;
                print_view(&view);
            }
        }
    });

    sync.set_term("");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if let Some(tag) = line.strip_prefix('=') {
            sync.select_tag(tag.trim());
        } else if let Some(tag) = line.strip_prefix('+') {
            sync.toggle_keyword(tag);
        } else if line.trim() == "!" {
            sync.cancel();
        } else {
            sync.set_term(line);
        }
    }

    // Let the last edit settle before exiting.
    let mut last = sync.subscribe();
    last.wait_for(|v| !v.is_loading).await?;

    drop(sync);
    printer.await?;
    Ok(())
}

fn print_view(view: &ViewState) {
    println!("== {:?}: {} trip(s)", view.term, view.results.len());
    print_trips(&view.results);
}

fn print_trips(trips: &[TripRecord]) {
    for trip in trips {
        println!("[{}] {}", trip.id, trip.title);
        if !trip.description.is_empty() {
            println!("    {}", preview(&trip.description));
        }
        if !trip.tags.is_empty() {
            println!("    tags: {}", trip.tags.join(", "));
        }
        if !trip.url.is_empty() {
            println!("    {}", trip.url);
        }
    }
}

fn preview(text: &str) -> String {
    match text.char_indices().nth(DESCRIPTION_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{} ...", &text[..cut]),
        None => text.to_string(),
    }
}
