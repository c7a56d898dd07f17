//! SQLite-based persistence for epics and the check-in log.
//!
//! Provides persistent storage for:
//! - Epics (with their directives), stored whole as JSON
//! - The append-only log, one row per check-in
//! - Key-value store for the data version and user profile
//!
//! Statistics are never stored; they are recomputed from a loaded
//! [`MomentumData`] snapshot on every query.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use super::{data_dir, migrations};
use crate::error::{DatabaseError, Result};
use crate::model::{Epic, Log, LogSource, MomentumData, User};
use crate::seed::generate_seed_data_for;

const KV_VERSION: &str = "version";
const KV_USER: &str = "user";

/// SQLite database holding one user's Momentum data.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `~/.config/momentum/momentum.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        Self::open_at(&data_dir()?.join("momentum.db"))
    }

    /// Open (or create) the database at `path`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "opened database");
        Self::with_connection(conn)
    }

    /// Open an in-memory database.
    ///
    /// # Errors
    /// Returns an error if the schema cannot be created.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        migrations::migrate(&conn)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Whether data has ever been written (seeded or imported).
    pub fn is_initialized(&self) -> Result<bool> {
        Ok(self.kv_get(KV_VERSION)?.is_some())
    }

    /// Load the full snapshot, or `None` for a database never initialized.
    ///
    /// # Errors
    /// Returns an error if a query fails or a stored row cannot be decoded.
    pub fn load(&self) -> Result<Option<MomentumData>> {
        let Some(version) = self.kv_get(KV_VERSION)? else {
            return Ok(None);
        };
        let version: u32 = version
            .parse()
            .map_err(|_| corrupt("kv", format!("version '{version}' is not a number")))?;

        let user: User = match self.kv_get(KV_USER)? {
            Some(json) => serde_json::from_str(&json).map_err(|e| corrupt("kv", e.to_string()))?,
            None => return Err(corrupt("kv", "missing user".to_string()).into()),
        };

        Ok(Some(MomentumData {
            version,
            user,
            epics: self.load_epics()?,
            logs: self.load_logs()?,
        }))
    }

    /// Load the snapshot, seeding and persisting default data on first use.
    ///
    /// # Errors
    /// Returns an error if loading or seeding fails.
    pub fn load_or_seed(&self, now: DateTime<Utc>, user_name: &str) -> Result<MomentumData> {
        if self.is_initialized()? {
            return self
                .load()?
                .ok_or_else(|| corrupt("kv", "missing version".to_string()).into());
        }
        tracing::info!(user = user_name, "initializing database with seed data");
        let data = generate_seed_data_for(now, user_name);
        self.replace_all(&data)?;
        Ok(data)
    }

    fn load_epics(&self) -> Result<Vec<Epic>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, body FROM epics ORDER BY position ASC")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut epics = Vec::new();
        for row in rows {
            let (id, body) = row?;
            let epic: Epic = serde_json::from_str(&body)
                .map_err(|e| corrupt("epics", format!("epic '{id}': {e}")))?;
            epics.push(epic);
        }
        Ok(epics)
    }

    fn load_logs(&self) -> Result<Vec<Log>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, epic_id, directive_id, timestamp, duration_minutes, note, source
             FROM logs
             ORDER BY seq ASC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(LogRow {
                id: row.get(0)?,
                epic_id: row.get(1)?,
                directive_id: row.get(2)?,
                timestamp: row.get(3)?,
                duration_minutes: row.get(4)?,
                note: row.get(5)?,
                source: row.get(6)?,
            })
        })?;

        let mut logs = Vec::new();
        for row in rows {
            logs.push(row?.decode()?);
        }
        Ok(logs)
    }

    /// Append one log row. Existing rows are never touched.
    ///
    /// # Errors
    /// Returns an error if the insert fails (including a duplicate log id).
    pub fn append_log(&self, log: &Log) -> Result<()> {
        insert_log(&self.conn, log)?;
        tracing::debug!(
            log_id = %log.id,
            epic_id = %log.epic_id,
            directive_id = %log.directive_id,
            "appended log"
        );
        Ok(())
    }

    /// Insert or update one epic, keeping its position if it exists.
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails.
    pub fn save_epic(&self, epic: &Epic) -> Result<()> {
        let body = serde_json::to_string(epic)?;
        let updated = self.conn.execute(
            "UPDATE epics SET body = ?1 WHERE id = ?2",
            params![body, epic.id],
        )?;
        if updated == 0 {
            self.conn.execute(
                "INSERT INTO epics (id, position, body)
                 VALUES (?1, (SELECT COALESCE(MAX(position), -1) + 1 FROM epics), ?2)",
                params![epic.id, body],
            )?;
        }
        tracing::debug!(epic_id = %epic.id, "saved epic");
        Ok(())
    }

    /// Replace everything with `data` in a single transaction.
    ///
    /// # Errors
    /// Returns an error if any write fails; nothing is changed in that case.
    pub fn replace_all(&self, data: &MomentumData) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        delete_all(&tx)?;

        for (position, epic) in data.epics.iter().enumerate() {
            tx.execute(
                "INSERT INTO epics (id, position, body) VALUES (?1, ?2, ?3)",
                params![epic.id, position as i64, serde_json::to_string(epic)?],
            )?;
        }
        for log in &data.logs {
            insert_log(&tx, log)?;
        }
        kv_set(&tx, KV_VERSION, &data.version.to_string())?;
        kv_set(&tx, KV_USER, &serde_json::to_string(&data.user)?)?;

        tx.commit()?;
        tracing::debug!(
            epics = data.epics.len(),
            logs = data.logs.len(),
            "replaced all data"
        );
        Ok(())
    }

    /// Delete all epics, logs and user data.
    ///
    /// # Errors
    /// Returns an error if the delete fails.
    pub fn clear(&self) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        delete_all(&tx)?;
        tx.commit()?;
        tracing::debug!("cleared all data");
        Ok(())
    }

    /// Number of stored logs.
    pub fn log_count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM logs", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn kv_get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }
}

struct LogRow {
    id: String,
    epic_id: String,
    directive_id: String,
    timestamp: String,
    duration_minutes: Option<u32>,
    note: String,
    source: String,
}

impl LogRow {
    fn decode(self) -> Result<Log> {
        let timestamp = DateTime::parse_from_rfc3339(&self.timestamp)
            .map_err(|e| corrupt("logs", format!("log '{}' timestamp: {e}", self.id)))?
            .with_timezone(&Utc);
        let source: LogSource =
            serde_json::from_value(serde_json::Value::String(self.source.clone()))
                .map_err(|e| corrupt("logs", format!("log '{}' source: {e}", self.id)))?;

        Ok(Log {
            id: self.id,
            epic_id: self.epic_id,
            directive_id: self.directive_id,
            timestamp,
            duration_minutes: self.duration_minutes,
            note: self.note,
            source,
        })
    }
}

fn encode_source(source: LogSource) -> Result<String> {
    match serde_json::to_value(source)? {
        serde_json::Value::String(s) => Ok(s),
        other => Ok(other.to_string()),
    }
}

fn insert_log(conn: &Connection, log: &Log) -> Result<()> {
    conn.execute(
        "INSERT INTO logs (id, epic_id, directive_id, timestamp, duration_minutes, note, source)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            log.id,
            log.epic_id,
            log.directive_id,
            log.timestamp.to_rfc3339(),
            log.duration_minutes,
            log.note,
            encode_source(log.source)?,
        ],
    )?;
    Ok(())
}

fn kv_set(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO kv (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![key, value],
    )?;
    Ok(())
}

fn delete_all(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "DELETE FROM logs;
         DELETE FROM epics;
         DELETE FROM kv;",
    )?;
    Ok(())
}

fn corrupt(table: &str, message: String) -> DatabaseError {
    DatabaseError::CorruptRow {
        table: table.to_string(),
        message,
    }
}
