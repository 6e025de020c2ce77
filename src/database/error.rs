use thiserror::Error;

/// Failures of the data source as a whole. Unlike parse errors these abort
/// the load and are handed back to the caller.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Could not get connection: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Could not read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Could not read file: {0}")]
    Io(#[from] std::io::Error),
}
