//! CLI entry point for the quake_feed client.
//!
//! Provides subcommands for listing and filtering earthquakes from the
//! backend API, fetching per-event details, looking up catalog entries, and
//! reading the public USGS summary feeds.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use quake_feed::{
    config::ClientConfig,
    filter::{FilterCriteria, MagnitudeFloor, RecencyWindow},
    infra::{earthquakes::EarthquakesApiClient, usgs::UsgsFeedClient},
    model::NormalizedRecord,
    normalize::{EarthquakeList, normalize_feature},
    output::{append_records, print_catalog, print_json, print_pretty, print_records},
    services::earthquake_api::EarthquakeApi,
    stats::FeedSummary,
};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    filter::Directive,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "quake_feed")]
#[command(about = "A client for earthquake GeoJSON feeds", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct FilterArgs {
    /// Recency window: H, D, W or M
    #[arg(short, long, default_value = "D")]
    window: RecencyWindow,

    /// Magnitude floor: 4.5+, 2.5+, 1.0+ or all
    #[arg(short, long, default_value = "all")]
    magnitude: MagnitudeFloor,
}

impl FilterArgs {
    fn criteria(&self) -> FilterCriteria {
        FilterCriteria::new(self.window, self.magnitude)
    }
}

#[derive(Args)]
struct RenderArgs {
    /// Print records as JSON on stdout
    #[arg(long, default_value_t = false)]
    json: bool,

    /// CSV file to append records to
    #[arg(long)]
    csv: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List earthquakes from the backend API, filtered client-side
    List {
        #[command(flatten)]
        filter: FilterArgs,

        #[command(flatten)]
        render: RenderArgs,
    },
    /// Fetch a single event from its detail URL
    Detail {
        #[arg(value_name = "DETAIL_URL")]
        url: String,
    },
    /// Look up a catalog entry by numeric id
    Show {
        #[arg(value_name = "ID")]
        id: i64,
    },
    /// List earthquakes from the public USGS summary feed
    Usgs {
        #[command(flatten)]
        filter: FilterArgs,

        #[command(flatten)]
        render: RenderArgs,
    },
    /// Report field coverage of the filtered list
    Summary {
        #[command(flatten)]
        filter: FilterArgs,

        /// Read the public USGS feed instead of the backend API
        #[arg(long, default_value_t = false)]
        usgs: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/quake_feed.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("quake_feed.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse::<Directive>()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(
            EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse::<Directive>()?),
        );

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List { filter, render } => {
            let client = backend_client()?;
            let list = client
                .list_earthquakes()
                .await
                .context("failed to list earthquakes")?;

            match list {
                EarthquakeList::Features(records) => {
                    let kept = apply_filter(&filter, &records);
                    render_records(&kept, &render)?;
                }
                EarthquakeList::Catalog(entries) => {
                    info!(
                        count = entries.len(),
                        "Catalog list received; recency and magnitude filters do not apply"
                    );
                    if render.json {
                        print_json(&entries)?;
                    } else {
                        print_catalog(&entries);
                    }
                    if render.csv.is_some() {
                        warn!("CSV export is only available for GeoJSON lists");
                    }
                }
            }
        }
        Commands::Detail { url } => {
            let client = backend_client()?;
            match client.fetch_detail(&url).await {
                Some(feature) => {
                    print_records(&[normalize_feature(&feature)]);
                    print_pretty(&feature);
                    print_json(&feature)?;
                }
                None => warn!(url = %url, "No data available"),
            }
        }
        Commands::Show { id } => {
            let client = backend_client()?;
            match client.get_by_id(id).await.context("failed to list earthquakes")? {
                Some(entry) => print_json(&entry)?,
                None => warn!(id, "No catalog entry with this id"),
            }
        }
        Commands::Usgs { filter, render } => {
            let records = usgs_records(&filter).await?;
            let kept = apply_filter(&filter, &records);
            render_records(&kept, &render)?;
        }
        Commands::Summary { filter, usgs } => {
            let records = if usgs {
                usgs_records(&filter).await?
            } else {
                match backend_client()?
                    .list_earthquakes()
                    .await
                    .context("failed to list earthquakes")?
                {
                    EarthquakeList::Features(records) => records,
                    EarthquakeList::Catalog(entries) => {
                        warn!(
                            count = entries.len(),
                            "Catalog list carries no GeoJSON fields to summarize"
                        );
                        Vec::new()
                    }
                }
            };
            let kept = apply_filter(&filter, &records);
            print_json(&FeedSummary::from_records(&kept))?;
        }
    }

    Ok(())
}

/// Builds the backend client from `API_BASE` / `API_KEY` and friends.
fn backend_client() -> Result<EarthquakesApiClient> {
    let config = ClientConfig::from_env()?;
    info!(
        api_base = %config.api_base,
        shape = %config.response_shape,
        timeout_secs = config.timeout_secs,
        "Client configured"
    );
    Ok(EarthquakesApiClient::new(&config)?)
}

async fn usgs_records(filter: &FilterArgs) -> Result<Vec<NormalizedRecord>> {
    let client = UsgsFeedClient::new()?;
    let records = client
        .fetch(filter.window, filter.magnitude)
        .await
        .context("failed to fetch USGS summary feed")?;
    Ok(records)
}

fn apply_filter(filter: &FilterArgs, records: &[NormalizedRecord]) -> Vec<NormalizedRecord> {
    let kept = filter.criteria().apply(records);
    info!(
        total = records.len(),
        kept = kept.len(),
        window = %filter.window,
        magnitude = %filter.magnitude,
        "Filter applied"
    );
    kept
}

fn render_records(records: &[NormalizedRecord], render: &RenderArgs) -> Result<()> {
    if render.json {
        print_json(&records)?;
    } else {
        print_records(records);
    }

    if let Some(path) = &render.csv {
        append_records(path, records)?;
        info!(path = %path, rows = records.len(), "Records appended to CSV");
    }

    Ok(())
}
