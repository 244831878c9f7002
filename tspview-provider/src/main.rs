//! tspview - time graph model inspector
//!
//! Connects to an already running trace server, fetches the entry tree of
//! a time graph output, builds the model for the selected rows and prints
//! it as JSON.

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tspview_common::config::{load_config, resolve_config_path, CONFIG_ENV_VAR};
use tspview_common::time::TimeRange;
use tspview_common::tsp::{EntryId, EntryModel};
use tspview_provider::{HttpTspClient, ModelRequest, TspDataProvider, ViewRequest};
use uuid::Uuid;

/// Command-line arguments for tspview
#[derive(Parser, Debug)]
#[command(name = "tspview")]
#[command(about = "Build time graph models from a trace server")]
#[command(version)]
struct Args {
    /// Configuration file (TOML)
    #[arg(short, long, env = CONFIG_ENV_VAR)]
    config: Option<PathBuf>,

    /// Trace server API base URL (overrides the config file)
    #[arg(long)]
    server_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build and print the time graph model of an output
    Model {
        /// Experiment UUID on the trace server
        trace_uuid: Uuid,

        /// Time graph output id
        output_id: String,

        /// Rows to include, in display order (default: every entry with data)
        #[arg(long, value_delimiter = ',')]
        ids: Vec<EntryId>,

        /// Start of the zoomed view, relative to the chart start
        #[arg(long, requires = "view_end")]
        view_start: Option<i64>,

        /// End of the zoomed view, relative to the chart start
        #[arg(long, requires = "view_start")]
        view_end: Option<i64>,

        /// Number of sample times
        #[arg(short, long)]
        resolution: Option<i64>,

        /// Marker categories to include
        #[arg(long = "marker")]
        markers: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config is loaded first so its log level can seed the filter
    let mut config = load_config(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(url) = args.server_url {
        config.server.url = url;
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match resolve_config_path(args.config.as_deref()) {
        Some(path) => info!("Configuration: {}", path.display()),
        None => info!("Configuration: compiled defaults"),
    }
    info!("Trace server: {}", config.server.url);

    let client = HttpTspClient::from_config(&config.server)
        .context("Failed to create trace server client")?;

    match args.command {
        Command::Model {
            trace_uuid,
            output_id,
            ids,
            view_start,
            view_end,
            resolution,
            markers,
        } => {
            let configured = NonZeroUsize::new(config.query.default_resolution)
                .context("query.default_resolution must be positive")?;

            let view = match (view_start, view_end) {
                (Some(start), Some(end)) => {
                    let samples = resolution.unwrap_or(configured.get() as i64);
                    Some(ViewRequest::new(TimeRange::new(start, end), samples)?)
                }
                _ => None,
            };
            // without a view, --resolution applies to the whole chart
            let default_resolution = match (&view, resolution) {
                (None, Some(samples)) => usize::try_from(samples)
                    .ok()
                    .and_then(NonZeroUsize::new)
                    .context("--resolution must be positive")?,
                _ => configured,
            };

            let provider = TspDataProvider::new(Arc::new(client), trace_uuid, output_id)
                .with_default_resolution(default_resolution);

            let tree = provider
                .fetch_entries(TimeRange::new(0, i64::MAX))
                .await
                .context("Failed to fetch entry tree")?;
            let Some(total_range) = tree.total_range() else {
                bail!("Output {} has no entries", provider.output_id());
            };
            info!(
                "Fetched {} entries spanning [{}, {}]",
                tree.entries.len(),
                total_range.start,
                total_range.end
            );

            let requested_ids = if ids.is_empty() { rows_with_data(&tree) } else { ids };

            let mut request = ModelRequest::new(requested_ids, tree.entries, total_range);
            if let Some(view) = view {
                request = request.with_view(view);
            }
            if !markers.is_empty() {
                request = request.with_marker_categories(markers);
            }

            let model = provider.build_model(&request).await;
            if model.is_empty() {
                warn!("No rows requested, the model is empty");
            }
            info!(
                "Built model: {} rows, {} range events, {} arrows",
                model.rows.len(),
                model.range_events.len(),
                model.arrows.len()
            );

            let json = serde_json::to_string_pretty(&model).context("Failed to serialize model")?;
            println!("{}", json);
        }
    }

    Ok(())
}

/// Entry ids with data, in tree order
fn rows_with_data(tree: &EntryModel) -> Vec<EntryId> {
    tree.entries
        .iter()
        .filter(|entry| entry.has_data)
        .map(|entry| entry.id)
        .collect()
}
