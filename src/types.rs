//! Core types and data structures for the reconciliation pipeline

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One row of a bank statement export.
///
/// The sign of `amount` decides how the row enters the ledger: `>= 0` becomes
/// a deposit, `< 0` becomes an expense. A zero-amount row is a deposit only,
/// never an expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankTransaction {
    /// Date the transaction posted
    pub date: NaiveDate,
    /// Free-text description from the statement
    pub description: String,
    /// Signed transaction amount
    pub amount: BigDecimal,
    /// Account balance reported by the bank after this transaction posted
    pub posted_balance_after: BigDecimal,
    /// Transaction category, from the optional `Type` column
    pub category: Option<String>,
    /// Payer address, when the statement carries one
    pub address: Option<String>,
    /// Payer occupation, when the statement carries one
    pub occupation: Option<String>,
}

/// One row of a donation-platform export.
///
/// `amount` is the gross contribution; `fee` is the platform's deduction and
/// is always non-negative. Fees are aggregated per date into synthetic
/// expense entries rather than carried on the deposit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonationTransaction {
    /// Date of the contribution (time-of-day from the export is discarded)
    pub date: NaiveDate,
    pub donor_first_name: String,
    pub donor_last_name: String,
    pub donor_addr1: String,
    pub donor_city: String,
    pub donor_state: String,
    pub donor_zip: String,
    pub occupation: String,
    /// Gross contribution amount
    pub amount: BigDecimal,
    /// Platform fee deducted from the contribution, non-negative
    pub fee: BigDecimal,
    /// Fundraising page identifier the contribution came through
    pub fundraising_page: String,
}

impl DonationTransaction {
    /// Donor's display name, "First Last"
    pub fn donor_name(&self) -> String {
        format!("{} {}", self.donor_first_name, self.donor_last_name)
    }

    /// Donor's display address, "Addr1 City, ST ZIP"
    pub fn donor_address(&self) -> String {
        format!(
            "{} {}, {} {}",
            self.donor_addr1, self.donor_city, self.donor_state, self.donor_zip
        )
    }
}

/// Single-row snapshot of earmarked sub-account balances.
///
/// One logical record: each named sub-account maps to its externally tracked
/// running balance at the time the snapshot was taken.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SpecialAccountSnapshot {
    balances: BTreeMap<String, BigDecimal>,
}

impl SpecialAccountSnapshot {
    /// Create an empty snapshot (no sub-accounts tracked)
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the snapshot balance for a sub-account
    pub fn balance(&self, name: &str) -> Option<&BigDecimal> {
        self.balances.get(name)
    }

    /// Whether the snapshot tracks the given sub-account
    pub fn contains(&self, name: &str) -> bool {
        self.balances.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }

    /// Names of all tracked sub-accounts, in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.balances.keys().map(String::as_str)
    }
}

impl FromIterator<(String, BigDecimal)> for SpecialAccountSnapshot {
    fn from_iter<I: IntoIterator<Item = (String, BigDecimal)>>(iter: I) -> Self {
        Self {
            balances: iter.into_iter().collect(),
        }
    }
}

/// Canonical unit of ledger output.
///
/// Deposits carry `amount >= 0`, expenses carry `amount <= 0`. `tags` names
/// the sub-accounts this entry contributes to; empty when unclassified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub date: NaiveDate,
    pub description: String,
    pub amount: BigDecimal,
    pub tags: BTreeSet<String>,
}

impl LedgerEntry {
    /// Create an untagged entry
    pub fn new(date: NaiveDate, description: String, amount: BigDecimal) -> Self {
        Self {
            date,
            description,
            amount,
            tags: BTreeSet::new(),
        }
    }

    /// Attach sub-account tags
    pub fn with_tags(mut self, tags: BTreeSet<String>) -> Self {
        self.tags = tags;
        self
    }
}

/// The merged period ledger: deposits and expenses, each ascending by date
/// with ties kept in input order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Ledger {
    pub deposits: Vec<LedgerEntry>,
    pub expenses: Vec<LedgerEntry>,
}

impl Ledger {
    /// Sum of all deposit amounts (non-negative for a well-formed ledger)
    pub fn total_deposits(&self) -> BigDecimal {
        self.deposits.iter().map(|e| &e.amount).sum()
    }

    /// Sum of all expense amounts (non-positive for a well-formed ledger)
    pub fn total_expenses(&self) -> BigDecimal {
        self.expenses.iter().map(|e| &e.amount).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.deposits.is_empty() && self.expenses.is_empty()
    }

    pub fn entry_count(&self) -> usize {
        self.deposits.len() + self.expenses.len()
    }

    /// Earliest and latest entry dates across both streams, or `None` for an
    /// empty ledger
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let dates = || self.deposits.iter().chain(&self.expenses).map(|e| e.date);
        let start = dates().min()?;
        let end = dates().max()?;
        Some((start, end))
    }
}

/// Derived balances for one reporting period. Immutable once computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub total_deposits: BigDecimal,
    /// Sum of expense amounts; itself `<= 0`
    pub total_expenses: BigDecimal,
    pub starting_balance: BigDecimal,
    pub ending_balance: BigDecimal,
    /// Per-sub-account balances: tagged deposits plus the snapshot offset,
    /// and snapshot-only deduction lines at their snapshot value
    pub sub_account_balances: BTreeMap<String, BigDecimal>,
    /// Ending balance less all sub-account balances; funds freely available
    pub operating_balance: BigDecimal,
}

/// Errors that can occur in the reconciliation pipeline
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error("source unavailable: {path}: {source}")]
    SourceUnavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{source_name}: malformed input: {source}")]
    Malformed {
        source_name: String,
        #[source]
        source: csv::Error,
    },
    #[error("{source_name}: missing required column '{column}'")]
    Schema {
        source_name: String,
        column: String,
    },
    #[error("{source_name} line {row}, column '{column}': cannot parse '{value}' as a number")]
    Parse {
        source_name: String,
        row: usize,
        column: String,
        value: String,
    },
    #[error("unrecognized date '{value}' for format {format}")]
    DateParse { value: String, format: String },
    #[error("{source_name}: no rows to reduce over")]
    EmptyDataset { source_name: String },
    #[error("snapshot has no entry for configured sub-account '{name}'")]
    MissingSnapshotAccount { name: String },
    #[error("cannot reconcile an empty ledger")]
    EmptyLedger,
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result type for reconciliation operations
pub type ReconcileResult<T> = Result<T, ReconcileError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn test_ledger_totals() {
        let ledger = Ledger {
            deposits: vec![
                LedgerEntry::new(date(2024, 1, 2), "A".into(), dec("100.00")),
                LedgerEntry::new(date(2024, 1, 3), "B".into(), dec("25.50")),
            ],
            expenses: vec![LedgerEntry::new(date(2024, 1, 5), "C".into(), dec("-40.00"))],
        };

        assert_eq!(ledger.total_deposits(), dec("125.50"));
        assert_eq!(ledger.total_expenses(), dec("-40.00"));
        assert_eq!(ledger.entry_count(), 3);
        assert!(!ledger.is_empty());
    }

    #[test]
    fn test_ledger_date_span_covers_both_streams() {
        let ledger = Ledger {
            deposits: vec![LedgerEntry::new(date(2024, 1, 10), "A".into(), dec("1"))],
            expenses: vec![LedgerEntry::new(date(2024, 1, 2), "B".into(), dec("-1"))],
        };

        assert_eq!(
            ledger.date_span(),
            Some((date(2024, 1, 2), date(2024, 1, 10)))
        );
        assert_eq!(Ledger::default().date_span(), None);
    }

    #[test]
    fn test_donation_display_helpers() {
        let donation = DonationTransaction {
            date: date(2024, 1, 3),
            donor_first_name: "Ada".into(),
            donor_last_name: "Lovelace".into(),
            donor_addr1: "12 Main St".into(),
            donor_city: "Westminster".into(),
            donor_state: "CO".into(),
            donor_zip: "80031".into(),
            occupation: "Engineer".into(),
            amount: dec("50.00"),
            fee: dec("2.50"),
            fundraising_page: "general".into(),
        };

        assert_eq!(donation.donor_name(), "Ada Lovelace");
        assert_eq!(donation.donor_address(), "12 Main St Westminster, CO 80031");
    }

    #[test]
    fn test_snapshot_lookup() {
        let snapshot: SpecialAccountSnapshot = vec![
            ("Latino Initiative".to_string(), dec("150.00")),
            ("Young Dems".to_string(), dec("75.25")),
        ]
        .into_iter()
        .collect();

        assert_eq!(snapshot.balance("Young Dems"), Some(&dec("75.25")));
        assert!(snapshot.contains("Latino Initiative"));
        assert!(!snapshot.contains("Raffle"));
        assert_eq!(
            snapshot.names().collect::<Vec<_>>(),
            vec!["Latino Initiative", "Young Dems"]
        );
    }
}
