mod schema;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use chrono::Utc;
use rusqlite::Connection;
use thiserror::Error;

use crate::models::*;

/// A persistence failure in the calculation log.
///
/// Surfaced to HTTP clients as a generic server error; the underlying cause
/// is only ever logged server-side.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Database path has no parent directory"))?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_default() -> Result<Self> {
        let dirs = directories::ProjectDirs::from("", "", "tallypad")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        let db_path = dirs.data_dir().join("tallypad.db");
        Self::open(db_path)
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        schema::run_migrations(&conn)
    }

    // ============================================================
    // Calculation log operations
    // ============================================================

    /// Append a calculation to the log.
    ///
    /// The store assigns the identifier; ids increase in insertion order.
    pub fn save_calculation(
        &self,
        input: CreateCalculationInput,
    ) -> Result<Calculation, StorageError> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let now = Utc::now();

        conn.execute(
            "INSERT INTO calculations (expression, result, created_at) VALUES (?, ?, ?)",
            (&input.expression, &input.result, now.to_rfc3339()),
        )?;

        Ok(Calculation {
            id: conn.last_insert_rowid(),
            expression: input.expression,
            result: input.result,
            created_at: now,
        })
    }

    /// All calculations in insertion order (ascending id).
    pub fn get_calculations(&self) -> Result<Vec<Calculation>, StorageError> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, expression, result, created_at FROM calculations ORDER BY id",
        )?;

        let calculations = stmt
            .query_map([], row_to_calculation)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(calculations)
    }

    /// The most recent calculations, newest first, at most `limit`.
    pub fn get_recent_calculations(&self, limit: u32) -> Result<Vec<Calculation>, StorageError> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, expression, result, created_at
             FROM calculations ORDER BY id DESC LIMIT ?",
        )?;

        let calculations = stmt
            .query_map([limit], row_to_calculation)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(calculations)
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn.clone(),
        }
    }
}

fn row_to_calculation(row: &rusqlite::Row) -> rusqlite::Result<Calculation> {
    Ok(Calculation {
        id: row.get(0)?,
        expression: row.get(1)?,
        result: row.get(2)?,
        created_at: parse_datetime(row.get::<_, String>(3)?),
    })
}

fn parse_datetime(s: String) -> chrono::DateTime<Utc> {
    chrono::DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}
