use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection};

use crate::oracle::RecordAnalysis;

const TABLE: &str = "scraped_content";

/// Metadata columns written back per analyzed row.
const METADATA_COLUMNS: &[(&str, &str)] = &[
    ("category", "TEXT"),
    ("technical_depth", "INTEGER"),
    ("keywords", "TEXT"),
    ("summary", "TEXT"),
    ("model_version", "TEXT"),
    ("last_analyzed_utc", "TEXT"),
];

/// One database row awaiting analysis.
#[derive(Debug, Clone)]
pub struct StoredRecord {
    pub rowid: i64,
    pub filename: String,
    pub text: String,
}

/// Wrapper over the scraped-content database. The base table is created by
/// the scraper; this side only adds metadata columns and updates rows.
pub struct AnalysisStore {
    conn: Connection,
}

impl AnalysisStore {
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database at {path}"))?;
        Ok(Self { conn })
    }

    /// Add any missing metadata columns. Idempotent: a column that already
    /// exists is left alone.
    pub fn ensure_metadata_columns(&self) -> Result<()> {
        eprintln!("[store] verifying database schema");
        for (column, col_type) in METADATA_COLUMNS {
            let sql = format!("ALTER TABLE {TABLE} ADD COLUMN {column} {col_type}");
            match self.conn.execute_batch(&sql) {
                Ok(()) => eprintln!("[store] added '{column}' column"),
                Err(e) if e.to_string().contains("duplicate column name") => {}
                Err(e) => {
                    return Err(e).with_context(|| format!("Failed to add column {column}"));
                }
            }
        }
        Ok(())
    }

    /// Rows not yet analyzed, oldest first, capped at `limit`.
    pub fn fetch_unanalyzed(&self, limit: usize) -> Result<Vec<StoredRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "SELECT rowid, filename, pagetext FROM {TABLE} WHERE technical_depth IS NULL LIMIT ?1"
            ))
            .context("Failed to prepare fetch statement")?;

        let records = stmt
            .query_map(params![limit as i64], |row| {
                Ok(StoredRecord {
                    rowid: row.get(0)?,
                    filename: row.get(1)?,
                    text: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                })
            })
            .context("Failed to query unanalyzed rows")?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to collect unanalyzed rows")?;

        Ok(records)
    }

    /// Write one record's analysis back, stamping the model version and the
    /// current UTC time.
    pub fn apply_analysis(&self, rowid: i64, analysis: &RecordAnalysis, model: &str) -> Result<()> {
        let keywords = if analysis.keywords.is_null() {
            "[]".to_string()
        } else {
            serde_json::to_string(&analysis.keywords).context("Failed to serialize keywords")?
        };

        self.conn
            .execute(
                &format!(
                    "UPDATE {TABLE} SET category = ?1, technical_depth = ?2, keywords = ?3, \
                     summary = ?4, model_version = ?5, last_analyzed_utc = ?6 WHERE rowid = ?7"
                ),
                params![
                    analysis.category,
                    analysis.technical_depth,
                    keywords,
                    analysis.summary,
                    model,
                    Utc::now().to_rfc3339(),
                    rowid
                ],
            )
            .with_context(|| format!("Failed to update row {rowid}"))?;
        Ok(())
    }
}
