use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn open_connection(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)
        .with_context(|| format!("failed to open db: {}", db_path.display()))?;
    Ok(conn)
}

pub fn init_db(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create parent dir: {}", parent.display()))?;
    }

    let conn = open_connection(db_path)?;

    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS csv_uploads (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            upload_token TEXT NOT NULL UNIQUE,
            file_name    TEXT NOT NULL,
            headers      TEXT NOT NULL,
            data         TEXT NOT NULL,
            row_count    INTEGER NOT NULL,
            uploaded_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_csv_uploads_file_name
            ON csv_uploads(file_name);
        ",
    )
    .context("failed to initialize schema")?;

    Ok(())
}
