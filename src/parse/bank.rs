//! Bank statement export parsing

use std::path::Path;

use crate::dates::{parse_date, DateFormat};
use crate::parse::{parse_amount, read_source, SourceTable};
use crate::types::{BankTransaction, ReconcileResult};

const SOURCE: &str = "bank statement";

/// Parse bank statement CSV text into typed transactions.
///
/// Required columns: `Amount`, `Description`, `Date`, `Posted Balance After
/// Transaction`. Optional: `Type`, `Address`, `Occupation`. Column names are
/// case-sensitive.
pub fn bank_transactions(text: &str) -> ReconcileResult<Vec<BankTransaction>> {
    let table = SourceTable::from_text(SOURCE, text)?;

    let amount_col = table.required("Amount")?;
    let description_col = table.required("Description")?;
    let date_col = table.required("Date")?;
    let balance_col = table.required("Posted Balance After Transaction")?;
    let category_col = table.optional("Type");
    let address_col = table.optional("Address");
    let occupation_col = table.optional("Occupation");

    let optional_value = |row, col: Option<usize>| {
        col.map(|c| table.value(row, c))
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    table
        .rows()
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let line = table.line(i);
            Ok(BankTransaction {
                date: parse_date(table.value(row, date_col), DateFormat::MonthDayYear)?,
                description: table.value(row, description_col).to_string(),
                amount: parse_amount(table.value(row, amount_col), SOURCE, line, "Amount")?,
                posted_balance_after: parse_amount(
                    table.value(row, balance_col),
                    SOURCE,
                    line,
                    "Posted Balance After Transaction",
                )?,
                category: optional_value(row, category_col),
                address: optional_value(row, address_col),
                occupation: optional_value(row, occupation_col),
            })
        })
        .collect()
}

/// Parse a bank statement export from disk
pub fn bank_transactions_from_path<P: AsRef<Path>>(path: P) -> ReconcileResult<Vec<BankTransaction>> {
    bank_transactions(&read_source(path.as_ref())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ReconcileError;
    use bigdecimal::BigDecimal;
    use chrono::NaiveDate;
    use std::str::FromStr;

    const FULL_EXPORT: &str = "\
Date,Description,Amount,Posted Balance After Transaction,Type,Address,Occupation
1/2/24,Check 1041 - Venue rental,-150.00,850.00,Check,,
1/5/24,Latino Initiative Fundraiser,300.00,1150.00,Deposit,12 Main St,Teacher
";

    #[test]
    fn test_parses_typed_rows() {
        let rows = bank_transactions(FULL_EXPORT).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(rows[0].amount, BigDecimal::from_str("-150.00").unwrap());
        assert_eq!(
            rows[0].posted_balance_after,
            BigDecimal::from_str("850.00").unwrap()
        );
        assert_eq!(rows[0].category.as_deref(), Some("Check"));
        assert_eq!(rows[0].address, None);

        assert_eq!(rows[1].description, "Latino Initiative Fundraiser");
        assert_eq!(rows[1].occupation.as_deref(), Some("Teacher"));
    }

    #[test]
    fn test_optional_columns_may_be_absent() {
        let minimal = "\
Date,Description,Amount,Posted Balance After Transaction
1/2/24,Opening deposit,100.00,100.00
";
        let rows = bank_transactions(minimal).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].category, None);
        assert_eq!(rows[0].occupation, None);
    }

    #[test]
    fn test_missing_required_column_is_schema_error() {
        let missing = "Date,Description,Amount\n1/2/24,Deposit,100.00\n";
        let err = bank_transactions(missing).unwrap_err();

        match err {
            ReconcileError::Schema { column, .. } => {
                assert_eq!(column, "Posted Balance After Transaction");
            }
            other => panic!("expected Schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_amount_reports_row_context() {
        let bad = "\
Date,Description,Amount,Posted Balance After Transaction
1/2/24,Deposit,100.00,100.00
1/3/24,Deposit,abc,200.00
";
        let err = bank_transactions(bad).unwrap_err();
        match err {
            ReconcileError::Parse { row, column, .. } => {
                assert_eq!(row, 3);
                assert_eq!(column, "Amount");
            }
            other => panic!("expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_no_rows_is_not_an_error_at_parse_time() {
        let header_only = "Date,Description,Amount,Posted Balance After Transaction\n";
        assert!(bank_transactions(header_only).unwrap().is_empty());
    }
}
