use anyhow::{anyhow, Context, Result};
use chrono::{SecondsFormat, Utc};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use super::{AuditSink, LogCipher};
use crate::nutrition::NutrientAmounts;

/// Shown in place of meal text that cannot be decrypted
pub const DECRYPTION_FAILED: &str = "<decryption failed>";

/// One logged analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub id: String,
    /// RFC 3339, UTC
    pub timestamp: String,
    /// Decrypted meal text, or [`DECRYPTION_FAILED`]
    pub input_text: String,
    pub totals: NutrientAmounts,
}

/// SQLite-backed audit log of analyzed meals.
///
/// Meal text is stored encrypted; totals stay readable for reporting.
pub struct SqliteAuditLog {
    conn: Mutex<Connection>,
    cipher: LogCipher,
}

impl SqliteAuditLog {
    /// Create a new in-memory log with a throwaway key
    pub fn new_in_memory() -> Result<Self> {
        let conn =
            Connection::open_in_memory().context("Failed to create in-memory audit database")?;
        Self::from_connection(conn, LogCipher::generate())
    }

    /// Open (or create) a log file.
    ///
    /// The key comes from `NUTRIPARSE_LOG_KEY`, or from `<path>.key`, which is
    /// created on first use.
    pub fn open(path: &str) -> Result<Self> {
        let cipher = LogCipher::from_env_or_file(format!("{}.key", path))?;
        Self::open_with_cipher(path, cipher)
    }

    pub fn open_with_cipher(path: &str, cipher: LogCipher) -> Result<Self> {
        let conn = Connection::open(path)
            .context(format!("Failed to open audit database at {}", path))?;
        Self::from_connection(conn, cipher)
    }

    fn from_connection(conn: Connection, cipher: LogCipher) -> Result<Self> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS meal_logs (
                id TEXT PRIMARY KEY,
                timestamp TEXT NOT NULL,
                key_id TEXT NOT NULL,
                encrypted_input BLOB NOT NULL,
                totals_json TEXT NOT NULL
            );
            "#,
        )
        .context("Failed to initialize audit schema")?;

        Ok(Self {
            conn: Mutex::new(conn),
            cipher,
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("Audit database lock poisoned"))
    }

    /// Insert one record and return it
    pub fn insert(&self, raw_text: &str, totals: &NutrientAmounts) -> Result<AuditRecord> {
        let record = AuditRecord {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
            input_text: raw_text.to_string(),
            totals: *totals,
        };
        let encrypted = self
            .cipher
            .encrypt(raw_text.as_bytes())
            .context("Failed to encrypt meal text")?;
        let totals_json =
            serde_json::to_string(&record.totals).context("Failed to encode totals")?;

        self.conn()?
            .execute(
                "INSERT INTO meal_logs (id, timestamp, key_id, encrypted_input, totals_json) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    record.id,
                    record.timestamp,
                    self.cipher.key_id(),
                    encrypted,
                    totals_json
                ],
            )
            .context(format!("Failed to insert audit record: {}", record.id))?;

        Ok(record)
    }

    /// Most recent records first, at most `limit`.
    ///
    /// Text written under another key, or tampered with, reads back as
    /// [`DECRYPTION_FAILED`].
    pub fn recent(&self, limit: usize) -> Result<Vec<AuditRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, timestamp, key_id, encrypted_input, totals_json FROM meal_logs ORDER BY rowid DESC LIMIT ?1",
            )
            .context("Failed to prepare statement")?;

        let rows = stmt
            .query_map(params![limit as i64], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, Vec<u8>>(3)?,
                    row.get::<_, String>(4)?,
                ))
            })
            .context("Failed to query audit records")?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to collect audit records")?;

        rows.into_iter()
            .map(|(id, timestamp, key_id, encrypted, totals_json)| {
                let totals = serde_json::from_str(&totals_json)
                    .context(format!("Corrupt totals in audit record {}", id))?;
                let input_text = self.decrypt_text(&id, &key_id, &encrypted);
                Ok(AuditRecord {
                    id,
                    timestamp,
                    input_text,
                    totals,
                })
            })
            .collect()
    }

    /// Number of stored records
    pub fn count(&self) -> Result<u32> {
        self.conn()?
            .query_row("SELECT COUNT(*) FROM meal_logs", [], |row| row.get(0))
            .context("Failed to count audit records")
    }

    fn decrypt_text(&self, id: &str, key_id: &str, encrypted: &[u8]) -> String {
        if key_id != self.cipher.key_id() {
            tracing::debug!(record = id, key_id, "Audit record written under another key");
            return DECRYPTION_FAILED.to_string();
        }

        self.cipher
            .decrypt(encrypted)
            .and_then(|bytes| String::from_utf8(bytes).map_err(Into::into))
            .unwrap_or_else(|err| {
                tracing::warn!(record = id, error = %err, "Failed to decrypt audit record");
                DECRYPTION_FAILED.to_string()
            })
    }
}

impl AuditSink for SqliteAuditLog {
    fn record(&self, raw_text: &str, totals: &NutrientAmounts) -> Result<()> {
        self.insert(raw_text, totals).map(|_| ())
    }
}
