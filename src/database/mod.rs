pub mod csv_import;
pub mod error;
pub mod sqlite;
