//! Record parsing: raw tabular text into typed, schema-validated rows
//!
//! Each source file gets a fixed record type validated once at parse time.
//! The header row defines column names (case-sensitive); a missing required
//! column is a schema error up front rather than an undefined value later.
//! Parsing is a pure transform over provided text; reading files is a thin
//! `*_from_path` wrapper per source.

use bigdecimal::BigDecimal;
use csv::StringRecord;
use std::path::Path;
use std::str::FromStr;

use crate::types::{ReconcileError, ReconcileResult};

mod bank;
mod donation;
mod snapshot;

pub use bank::{bank_transactions, bank_transactions_from_path};
pub use donation::{donation_transactions, donation_transactions_from_path};
pub use snapshot::{special_account_snapshot, special_account_snapshot_from_path};

/// A decoded source table: header names plus raw data rows.
///
/// Cell access trims surrounding whitespace; value coercion happens in the
/// per-source parsers.
pub(crate) struct SourceTable {
    source_name: &'static str,
    headers: StringRecord,
    rows: Vec<StringRecord>,
}

impl SourceTable {
    pub(crate) fn from_text(source_name: &'static str, text: &str) -> ReconcileResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| ReconcileError::Malformed {
                source_name: source_name.to_string(),
                source: e,
            })?
            .clone();

        let rows = reader
            .into_records()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ReconcileError::Malformed {
                source_name: source_name.to_string(),
                source: e,
            })?;

        Ok(Self {
            source_name,
            headers,
            rows,
        })
    }

    pub(crate) fn headers(&self) -> &StringRecord {
        &self.headers
    }

    pub(crate) fn rows(&self) -> &[StringRecord] {
        &self.rows
    }

    /// Index of a required column; schema error when absent
    pub(crate) fn required(&self, column: &str) -> ReconcileResult<usize> {
        self.optional(column).ok_or_else(|| ReconcileError::Schema {
            source_name: self.source_name.to_string(),
            column: column.to_string(),
        })
    }

    /// Index of an optional column, `None` when absent
    pub(crate) fn optional(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == column)
    }

    /// Trimmed cell value; a short row reads as empty
    pub(crate) fn value<'a>(&self, row: &'a StringRecord, index: usize) -> &'a str {
        row.get(index).unwrap_or("").trim()
    }

    /// 1-based file line of a data row, counting the header as line 1
    pub(crate) fn line(&self, row_index: usize) -> usize {
        row_index + 2
    }
}

/// Coerce a money cell into an exact decimal.
///
/// Tolerates a leading `$`, thousands separators, and accounting-style
/// parentheses for negatives, matching what bank exports actually contain.
pub(crate) fn parse_amount(
    raw: &str,
    source_name: &str,
    line: usize,
    column: &str,
) -> ReconcileResult<BigDecimal> {
    let trimmed = raw.trim();
    let (parenthesized, inner) = match trimmed.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
        Some(inner) => (true, inner),
        None => (false, trimmed),
    };
    let cleaned: String = inner.chars().filter(|c| *c != '$' && *c != ',').collect();

    BigDecimal::from_str(cleaned.trim())
        .map(|amount| if parenthesized { -amount } else { amount })
        .map_err(|_| ReconcileError::Parse {
            source_name: source_name.to_string(),
            row: line,
            column: column.to_string(),
            value: raw.trim().to_string(),
        })
}

/// Read a source file, mapping I/O failure to `SourceUnavailable`
pub(crate) fn read_source(path: &Path) -> ReconcileResult<String> {
    std::fs::read_to_string(path).map_err(|source| ReconcileError::SourceUnavailable {
        path: path.display().to_string(),
        source,
    })
}
