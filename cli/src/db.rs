use anyhow::{Context, Result};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

pub fn connect(database_path: &str) -> Result<SqliteConnection> {
    SqliteConnection::establish(database_path)
        .with_context(|| format!("Failed to open database at {database_path}"))
}
