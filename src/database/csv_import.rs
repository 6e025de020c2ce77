use std::{fs::File, io::Read, path::Path};

use r2d2::PooledConnection;
use r2d2_sqlite::SqliteConnectionManager;
use serde::Deserialize;
use tracing::{info, warn};

use super::{
    error::LoadError,
    sqlite::{Inserted, SqliteDatabase},
};

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Restaurant Name", default)]
    name: String,
    #[serde(rename = "Hours", default)]
    hours: String,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportReport {
    pub inserted: usize,
    pub duplicates: usize,
    pub skipped: usize,
}

/// Reads `(name, hours)` pairs from a CSV with `Restaurant Name` and `Hours`
/// columns. Rows missing either value are left out and counted.
pub fn read_rows<R: Read>(reader: R) -> Result<(Vec<(String, String)>, usize), LoadError> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();
    let mut skipped = 0;
    for row in reader.deserialize() {
        let row: CsvRow = row?;
        let name = row.name.trim().trim_matches('"').trim();
        let hours = row.hours.trim();
        if name.is_empty() || hours.is_empty() {
            warn!("Skipping incomplete row: {:?}", row);
            skipped += 1;
            continue;
        }
        rows.push((name.to_string(), hours.to_string()));
    }
    Ok((rows, skipped))
}

pub fn read_csv_file(path: &Path) -> Result<(Vec<(String, String)>, usize), LoadError> {
    let file = File::open(path)?;
    read_rows(file)
}

/// Copies a CSV export into the restaurants table. Names already present are
/// left untouched.
pub fn import_csv(
    connection: &PooledConnection<SqliteConnectionManager>,
    path: &Path,
) -> Result<ImportReport, LoadError> {
    let (rows, skipped) = read_csv_file(path)?;
    SqliteDatabase::create_table(connection)?;

    let mut report = ImportReport {
        skipped,
        ..ImportReport::default()
    };
    for (name, hours) in rows {
        match SqliteDatabase::insert_restaurant(connection, &name, &hours)? {
            Inserted::New => report.inserted += 1,
            Inserted::Duplicate => {
                warn!("Duplicate entry skipped for restaurant: {}", name);
                report.duplicates += 1;
            }
        }
    }
    info!(
        "Imported {} restaurants from {} ({} duplicates, {} incomplete rows)",
        report.inserted,
        path.display(),
        report.duplicates,
        report.skipped
    );
    Ok(report)
}
