use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::entities::upload::{StagedUpload, UploadToken};
use crate::infra::sqlite::schema::open_connection;
use crate::usecase::ports::repo::{StoredUpload, SubmitReceipt};

pub fn find_upload_id_by_token(conn: &Connection, token: &UploadToken) -> Result<Option<i64>> {
    conn.query_row(
        "SELECT id FROM csv_uploads WHERE upload_token = ?1",
        [token.to_string()],
        |row| row.get(0),
    )
    .optional()
    .context("failed to look up upload token")
}

/// Inserts the staged snapshot as one row. A token that is already stored is
/// reported back instead of being written twice.
pub fn insert_upload(db_path: &Path, upload: &StagedUpload) -> Result<SubmitReceipt> {
    let headers =
        serde_json::to_string(&upload.columns).context("failed to serialize upload headers")?;
    let data = serde_json::to_string(&upload.rows).context("failed to serialize upload rows")?;

    let mut conn = open_connection(db_path)?;
    let tx = conn
        .transaction()
        .context("failed to start upload transaction")?;

    if let Some(upload_id) = find_upload_id_by_token(&tx, &upload.token)? {
        return Ok(SubmitReceipt::AlreadySubmitted { upload_id });
    }

    tx.execute(
        "INSERT INTO csv_uploads(upload_token, file_name, headers, data, row_count, uploaded_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            upload.token.to_string(),
            upload.file_name,
            headers,
            data,
            upload.row_count() as i64,
            upload.staged_at.to_rfc3339(),
        ],
    )
    .context("failed to insert upload")?;
    let upload_id = tx.last_insert_rowid();

    tx.commit().context("failed to commit upload transaction")?;

    Ok(SubmitReceipt::Inserted { upload_id })
}

pub fn latest_upload(db_path: &Path) -> Result<Option<StoredUpload>> {
    let conn = open_connection(db_path)?;
    let raw = conn
        .query_row(
            "SELECT id, upload_token, file_name, headers, data, uploaded_at
             FROM csv_uploads
             ORDER BY id DESC
             LIMIT 1",
            [],
            |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, String>(5)?,
                ))
            },
        )
        .optional()
        .context("failed to query latest upload")?;

    let Some((upload_id, token, file_name, headers, data, uploaded_at)) = raw else {
        return Ok(None);
    };

    let columns = serde_json::from_str(&headers)
        .with_context(|| format!("failed to decode headers of upload {upload_id}"))?;
    let rows = serde_json::from_str(&data)
        .with_context(|| format!("failed to decode rows of upload {upload_id}"))?;

    Ok(Some(StoredUpload {
        upload_id,
        token,
        file_name,
        columns,
        rows,
        uploaded_at,
    }))
}

#[allow(dead_code)]
pub fn count_uploads(db_path: &Path) -> Result<i64> {
    let conn = open_connection(db_path)?;
    conn.query_row("SELECT COUNT(*) FROM csv_uploads", [], |row| row.get(0))
        .context("failed to count uploads")
}
