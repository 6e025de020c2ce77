mod config;
mod database;
mod parser;
mod restaurants;
mod server;
mod timing;

use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use hyper::server::conn::http1;
use hyper_util::rt::TokioIo;
use r2d2_sqlite::SqliteConnectionManager;
use structopt::StructOpt;
use tokio::{
    net::TcpListener,
    time::{sleep_until, Instant},
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use config::{Config, SourceKind};
use database::csv_import::import_csv;
use restaurants::{
    source::{load_restaurants, CsvSource, HoursSource, SqliteSource},
    store::ScheduleStore,
};
use server::server::Server;

pub const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
pub const ISO_FORMAT_DATE: &str = "%Y-%m-%d";

#[derive(Debug, StructOpt)]
#[structopt(name = "open-hours", about = "Which restaurants are open right now")]
struct Options {
    /// JSON configuration file, defaults are used when omitted
    #[structopt(short, long, parse(from_os_str))]
    config: Option<PathBuf>,

    #[structopt(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, StructOpt)]
enum Command {
    /// Load the schedules and answer queries over HTTP
    Serve,
    /// Copy a CSV export of restaurants into the SQLite database
    Import {
        /// Defaults to `csv_path` from the configuration
        #[structopt(parse(from_os_str))]
        csv: Option<PathBuf>,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

fn connection_pool(config: &Config) -> Result<Arc<r2d2::Pool<SqliteConnectionManager>>> {
    let manager = SqliteConnectionManager::file(&config.database_path);
    let pool = r2d2::Pool::builder()
        .build(manager)
        .with_context(|| format!("Could not open database {}", config.database_path.display()))?;
    Ok(Arc::new(pool))
}

fn hours_source(config: &Config) -> Result<Arc<dyn HoursSource>> {
    Ok(match config.source {
        SourceKind::Sqlite => Arc::new(SqliteSource::new(connection_pool(config)?)),
        SourceKind::Csv => Arc::new(CsvSource::new(config.csv_path.clone())),
    })
}

/// Rebuilds the whole collection every `interval` and swaps it in. A failed
/// reload keeps serving the previous collection.
async fn run_refresh(source: Arc<dyn HoursSource>, store: ScheduleStore, interval: Duration) {
    loop {
        sleep_until(Instant::now() + interval).await;
        let source = source.clone();
        match tokio::task::spawn_blocking(move || load_restaurants(source.as_ref())).await {
            Ok(Ok(restaurants)) => store.replace(restaurants),
            Ok(Err(err)) => warn!("Reload failed, keeping previous schedules: {}", err),
            Err(err) => error!("Reload task panicked: {}", err),
        }
    }
}

async fn serve(config: Config) -> Result<()> {
    let source = hours_source(&config)?;
    let restaurants = load_restaurants(source.as_ref()).context("Initial load failed")?;
    let store = ScheduleStore::new(restaurants);
    let server = Server::setup(store.clone(), &config.allow_origin).map_err(anyhow::Error::msg)?;

    if let Some(interval) = config.refresh_interval() {
        info!("Reloading schedules every {}s", interval.as_secs());
        tokio::spawn(run_refresh(source, store, interval));
    }

    let listener = TcpListener::bind(&config.bind_address)
        .await
        .with_context(|| format!("Could not bind {}", config.bind_address))?;
    info!("Listening on http://{}", config.bind_address);

    loop {
        let (stream, _) = match listener.accept().await {
            Ok(connection) => connection,
            Err(err) => {
                warn!("Could not accept connection: {}", err);
                continue;
            }
        };
        let io = TokioIo::new(stream);
        let server_clone = server.clone();
        tokio::spawn(async move {
            if let Err(err) = http1::Builder::new()
                .serve_connection(io, server_clone)
                .await
            {
                warn!("{}", err);
            }
        });
    }
}

fn import(config: &Config, csv: Option<PathBuf>) -> Result<()> {
    let csv = csv.unwrap_or_else(|| config.csv_path.clone());
    let pool = connection_pool(config)?;
    let connection = pool.get()?;
    let report = import_csv(&connection, &csv)?;
    println!(
        "Imported {} restaurants ({} duplicates, {} incomplete rows skipped)",
        report.inserted, report.duplicates, report.skipped
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let options = Options::from_args();
    let config = match &options.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    match options.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Import { csv } => import(&config, csv),
    }
}
