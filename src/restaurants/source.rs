use std::{path::PathBuf, sync::Arc};

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use tracing::{info, warn};

use crate::database::{csv_import::read_csv_file, error::LoadError, sqlite::SqliteDatabase};

use super::collection::{build_all, Restaurants};

/// Anything able to hand over raw `(name, hours)` records.
pub trait HoursSource: Send + Sync {
    fn load(&self) -> Result<Vec<(String, String)>, LoadError>;

    fn describe(&self) -> String;
}

pub struct SqliteSource {
    connection_pool: Arc<Pool<SqliteConnectionManager>>,
}

impl SqliteSource {
    pub fn new(connection_pool: Arc<Pool<SqliteConnectionManager>>) -> Self {
        Self { connection_pool }
    }
}

impl HoursSource for SqliteSource {
    fn load(&self) -> Result<Vec<(String, String)>, LoadError> {
        let connection = self.connection_pool.get()?;
        SqliteDatabase::create_table(&connection)?;
        Ok(SqliteDatabase::query_all_hours(&connection)?)
    }

    fn describe(&self) -> String {
        "sqlite".to_string()
    }
}

pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl HoursSource for CsvSource {
    fn load(&self) -> Result<Vec<(String, String)>, LoadError> {
        let (rows, _) = read_csv_file(&self.path)?;
        Ok(rows)
    }

    fn describe(&self) -> String {
        format!("csv file {}", self.path.display())
    }
}

pub fn load_restaurants(source: &dyn HoursSource) -> Result<Restaurants, LoadError> {
    let pairs = source.load()?;
    let restaurants = build_all(pairs);
    if restaurants.is_empty() {
        warn!("No restaurants found in {}", source.describe());
    }
    info!("Loaded {} restaurants from {}", restaurants.len(), source.describe());
    Ok(restaurants)
}
