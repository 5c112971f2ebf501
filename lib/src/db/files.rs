use super::StashDb;
use crate::error::{Result, StashError};
use crate::models::{NewFile, StoredFile};
use chrono::Utc;
use rusqlite::{OptionalExtension, Row};

const FILE_COLUMNS: &str = "id, owner_id, file_name, relative_path, mime_type, size, created";

fn file_from_row(row: &Row<'_>) -> rusqlite::Result<StoredFile> {
    Ok(StoredFile {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        file_name: row.get(2)?,
        relative_path: row.get(3)?,
        mime_type: row.get(4)?,
        size: row.get(5)?,
        created: row.get(6)?,
    })
}

impl StashDb {
    /// Record an uploaded file; the caller has already written it to disk
    pub fn create_file(&self, owner_id: i64, file: NewFile) -> Result<StoredFile> {
        self.conn.execute(
            "INSERT INTO files (owner_id, file_name, relative_path, mime_type, size, created)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            (
                owner_id,
                &file.file_name,
                &file.relative_path,
                &file.mime_type,
                file.size,
                Utc::now(),
            ),
        )?;

        self.find_file_for_owner(owner_id, &file.relative_path)?
            .ok_or_else(|| StashError::Other(format!("File {} vanished after insert", file.relative_path)))
    }

    /// Look a file up by owner and exact relative path
    pub fn find_file_for_owner(
        &self,
        owner_id: i64,
        relative_path: &str,
    ) -> Result<Option<StoredFile>> {
        let sql = format!(
            "SELECT {} FROM files WHERE owner_id = ?1 AND relative_path = ?2",
            FILE_COLUMNS
        );
        let file = self
            .conn
            .query_row(&sql, (owner_id, relative_path), file_from_row)
            .optional()?;
        Ok(file)
    }

    pub fn get_files_for_owner(&self, owner_id: i64) -> Result<Vec<StoredFile>> {
        let sql = format!(
            "SELECT {} FROM files WHERE owner_id = ?1 ORDER BY id",
            FILE_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([owner_id], file_from_row)?;

        let mut files = Vec::new();
        for row in rows {
            files.push(row?);
        }
        Ok(files)
    }
}
