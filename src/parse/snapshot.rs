//! Special-account snapshot parsing

use std::path::Path;

use crate::parse::{parse_amount, read_source, SourceTable};
use crate::types::{ReconcileError, ReconcileResult, SpecialAccountSnapshot};

const SOURCE: &str = "special-account snapshot";

/// Parse a special-account snapshot: a header row of sub-account names and
/// one data row of numeric balances aligned by column.
///
/// The snapshot is one logical record; rows past the first are ignored. A
/// header with no data row at all is an empty-dataset error.
pub fn special_account_snapshot(text: &str) -> ReconcileResult<SpecialAccountSnapshot> {
    let table = SourceTable::from_text(SOURCE, text)?;

    let row = table
        .rows()
        .first()
        .ok_or_else(|| ReconcileError::EmptyDataset {
            source_name: SOURCE.to_string(),
        })?;
    let line = table.line(0);

    table
        .headers()
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let balance = parse_amount(table.value(row, i), SOURCE, line, name.trim())?;
            Ok((name.trim().to_string(), balance))
        })
        .collect()
}

/// Parse a special-account snapshot from disk
pub fn special_account_snapshot_from_path<P: AsRef<Path>>(
    path: P,
) -> ReconcileResult<SpecialAccountSnapshot> {
    special_account_snapshot(&read_source(path.as_ref())?)
}
