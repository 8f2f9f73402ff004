use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use dataview::config::{Config, ConfigOverrides};
use dataview::logging::init_tracing;
use dataview::query::{HttpSource, RemoteOptions};
use dataview::service::{ServiceOptions, ViewLayer};
use dataview::ui;
use dataview::view::{Record, ViewSchema};

/// Browse a remote collection as a paginated, sortable, filterable table.
#[derive(Debug, Parser)]
#[command(name = "dataview", version, about)]
struct Cli {
    /// Config file (default: <config dir>/dataview/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Collection endpoint, e.g. https://dummyjson.com/users
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,

    /// Rows per page; must be one of the configured page sizes
    #[arg(long, value_name = "N")]
    page_size: Option<usize>,

    /// Delay before a filter edit is sent, in milliseconds
    #[arg(long, value_name = "N")]
    debounce_ms: Option<u64>,

    /// Print the first page as JSON and exit instead of opening the table
    #[arg(long)]
    print: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PrintedPage {
    total: u64,
    offset: usize,
    page_size: usize,
    rows: Vec<Record>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let overrides = ConfigOverrides {
        endpoint: cli.endpoint.clone(),
        page_size: cli.page_size,
        filter_debounce_ms: cli.debounce_ms,
    };
    let config = config.with_overrides(&overrides)?;
    tracing::info!(endpoint = %config.remote.endpoint, "Starting dataview");

    if cli.print {
        print_first_page(&config)
    } else {
        ui::runtime::run(&config).context("Terminal UI failed")
    }
}

/// Loads the first page headlessly and writes it to stdout.
fn print_first_page(config: &Config) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime.block_on(async {
        let source = HttpSource::new(RemoteOptions::from(&config.remote))?;
        let schema = Arc::new(ViewSchema::from_config(config));
        let (handle, server) =
            ViewLayer::new(schema, source, ServiceOptions::from(&config.view));
        tokio::spawn(server.run());

        let snapshot = handle.wait_settled().await?;
        let page = PrintedPage {
            total: snapshot.result.total_count,
            offset: snapshot.params.params.offset,
            page_size: snapshot.params.params.page_size,
            rows: snapshot.result.rows,
        };
        println!("{}", serde_json::to_string_pretty(&page)?);
        Ok::<(), anyhow::Error>(())
    })
}
