//! Validation utilities

use bigdecimal::{BigDecimal, Zero};

use crate::types::{Ledger, ReconcileError, ReconcileResult};

/// Check the structural invariants of a merged ledger: every deposit is
/// non-negative, every expense non-positive, and both streams are
/// non-decreasing by date.
pub fn check_ledger_invariants(ledger: &Ledger) -> ReconcileResult<()> {
    for entry in &ledger.deposits {
        if entry.amount < BigDecimal::zero() {
            return Err(ReconcileError::Config(format!(
                "deposit '{}' on {} has negative amount {}",
                entry.description, entry.date, entry.amount
            )));
        }
    }
    for entry in &ledger.expenses {
        if entry.amount > BigDecimal::zero() {
            return Err(ReconcileError::Config(format!(
                "expense '{}' on {} has positive amount {}",
                entry.description, entry.date, entry.amount
            )));
        }
    }

    for (name, stream) in [("deposits", &ledger.deposits), ("expenses", &ledger.expenses)] {
        if stream.windows(2).any(|pair| pair[0].date > pair[1].date) {
            return Err(ReconcileError::Config(format!(
                "{name} stream is not sorted by date"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LedgerEntry;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn entry(day: u32, amount: &str) -> LedgerEntry {
        LedgerEntry::new(
            NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            "entry".to_string(),
            BigDecimal::from_str(amount).unwrap(),
        )
    }

    #[test]
    fn test_well_formed_ledger_passes() {
        let ledger = Ledger {
            deposits: vec![entry(2, "100.00"), entry(3, "0.00")],
            expenses: vec![entry(2, "-40.00"), entry(5, "0.00")],
        };
        assert!(check_ledger_invariants(&ledger).is_ok());
    }

    #[test]
    fn test_negative_deposit_fails() {
        let ledger = Ledger {
            deposits: vec![entry(2, "-1.00")],
            expenses: vec![],
        };
        assert!(check_ledger_invariants(&ledger).is_err());
    }

    #[test]
    fn test_positive_expense_fails() {
        let ledger = Ledger {
            deposits: vec![],
            expenses: vec![entry(2, "1.00")],
        };
        assert!(check_ledger_invariants(&ledger).is_err());
    }

    #[test]
    fn test_unsorted_stream_fails() {
        let ledger = Ledger {
            deposits: vec![entry(5, "1.00"), entry(2, "1.00")],
            expenses: vec![],
        };
        assert!(check_ledger_invariants(&ledger).is_err());
    }
}
