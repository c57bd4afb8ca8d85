mod cipher;
mod sqlite;


pub use cipher::{LogCipher, KEY_ENV_VAR};
pub use sqlite::{AuditRecord, SqliteAuditLog, DECRYPTION_FAILED};

use crate::nutrition::NutrientAmounts;

/// Receives every successful analysis.
///
/// Failures are reported back to the analyzer, which logs them and carries on.
pub trait AuditSink: Send + Sync {
    fn record(&self, raw_text: &str, totals: &NutrientAmounts) -> anyhow::Result<()>;
}

/// Sink that drops every record
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record(&self, _raw_text: &str, _totals: &NutrientAmounts) -> anyhow::Result<()> {
        Ok(())
    }
}
