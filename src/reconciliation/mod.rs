//! Balance reconciliation for a reporting period
//!
//! Reconstructs the period's starting and ending balances from the merged
//! ledger and the bank's posted running balance, then derives per-sub-account
//! balances and the operating balance. The conservation equation
//! `ending = starting + total_deposits + total_expenses` holds exactly under
//! the derived strategy, and `operating = ending - sum(sub-account balances)`
//! always.

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::classify::TagRules;
use crate::types::{
    BankTransaction, Ledger, PeriodSummary, ReconcileError, ReconcileResult,
    SpecialAccountSnapshot,
};

/// How the ending balance is obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BalanceStrategy {
    /// Read the ending balance straight off the latest bank record's posted
    /// balance. Only sound when every ledger entry is bank-derived.
    ReadThrough,
    /// Compute `starting + total_deposits + total_expenses` over the merged
    /// ledger. Required whenever donation or fee entries exist, since the
    /// bank's posted balance never saw that activity.
    #[default]
    Derived,
}

/// Which dates define the reporting window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PeriodScope {
    /// Bank statement dates only
    BankOnly,
    /// The union of all merged ledger entries; donation dates may fall
    /// outside the bank statement window
    #[default]
    FullLedger,
}

/// Balance reconciler for one reporting period
#[derive(Debug, Clone, Copy, Default)]
pub struct Reconciler {
    strategy: BalanceStrategy,
    scope: PeriodScope,
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strategy(mut self, strategy: BalanceStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_scope(mut self, scope: PeriodScope) -> Self {
        self.scope = scope;
        self
    }

    /// Derive the period summary from the merged ledger.
    ///
    /// `snapshot` is `None` when no snapshot file was supplied; configured
    /// tags then carry no external offset. When a snapshot is present, every
    /// configured tag and every snapshot-only deduction must have a column in
    /// it. `has_off_bank_activity` marks the presence of donation or fee
    /// entries; it forces the derived strategy regardless of configuration.
    pub fn reconcile(
        &self,
        ledger: &Ledger,
        bank_records: &[BankTransaction],
        snapshot: Option<&SpecialAccountSnapshot>,
        rules: &TagRules,
        snapshot_only_deductions: &[String],
        has_off_bank_activity: bool,
    ) -> ReconcileResult<PeriodSummary> {
        if ledger.is_empty() {
            return Err(ReconcileError::EmptyLedger);
        }

        let (period_start, period_end) = self.period_bounds(ledger, bank_records)?;
        let total_deposits = ledger.total_deposits();
        let total_expenses = ledger.total_expenses();

        let starting_balance = starting_balance(bank_records)?;
        let strategy = if has_off_bank_activity {
            BalanceStrategy::Derived
        } else {
            self.strategy
        };
        let ending_balance = match strategy {
            BalanceStrategy::ReadThrough => read_through_ending_balance(bank_records)?,
            BalanceStrategy::Derived => &starting_balance + &total_deposits + &total_expenses,
        };

        let sub_account_balances = sub_account_balances(
            ledger,
            snapshot,
            rules,
            snapshot_only_deductions,
        )?;
        let earmarked: BigDecimal = sub_account_balances.values().sum();
        let operating_balance = &ending_balance - &earmarked;

        Ok(PeriodSummary {
            period_start,
            period_end,
            total_deposits,
            total_expenses,
            starting_balance,
            ending_balance,
            sub_account_balances,
            operating_balance,
        })
    }

    fn period_bounds(
        &self,
        ledger: &Ledger,
        bank_records: &[BankTransaction],
    ) -> ReconcileResult<(NaiveDate, NaiveDate)> {
        match self.scope {
            PeriodScope::FullLedger => ledger.date_span().ok_or(ReconcileError::EmptyLedger),
            PeriodScope::BankOnly => {
                let dates = || bank_records.iter().map(|r| r.date);
                let start = dates().min().ok_or_else(|| ReconcileError::EmptyDataset {
                    source_name: "bank statement".to_string(),
                })?;
                let end = dates().max().expect("non-empty after min");
                Ok((start, end))
            }
        }
    }
}

/// Pre-transaction balance of the earliest bank record: its posted balance
/// with that one transaction reversed. Subtracting the signed amount reverses
/// deposits and expenses alike; for an expense this equals posted + |amount|.
fn starting_balance(bank_records: &[BankTransaction]) -> ReconcileResult<BigDecimal> {
    let earliest = earliest_bank_record(bank_records)?;
    Ok(&earliest.posted_balance_after - &earliest.amount)
}

/// Posted balance of the latest bank record, read directly. Among same-dated
/// records the first in input order wins.
fn read_through_ending_balance(bank_records: &[BankTransaction]) -> ReconcileResult<BigDecimal> {
    let latest_date = bank_records
        .iter()
        .map(|r| r.date)
        .max()
        .ok_or_else(|| ReconcileError::EmptyDataset {
            source_name: "bank statement".to_string(),
        })?;
    let record = bank_records
        .iter()
        .find(|r| r.date == latest_date)
        .expect("max date came from these records");
    Ok(record.posted_balance_after.clone())
}

fn earliest_bank_record(bank_records: &[BankTransaction]) -> ReconcileResult<&BankTransaction> {
    let earliest_date = bank_records
        .iter()
        .map(|r| r.date)
        .min()
        .ok_or_else(|| ReconcileError::EmptyDataset {
            source_name: "bank statement".to_string(),
        })?;
    Ok(bank_records
        .iter()
        .find(|r| r.date == earliest_date)
        .expect("min date came from these records"))
}

/// Per-sub-account balances: tagged deposits plus the snapshot offset for
/// each configured tag, and snapshot-only deduction lines at snapshot value.
fn sub_account_balances(
    ledger: &Ledger,
    snapshot: Option<&SpecialAccountSnapshot>,
    rules: &TagRules,
    snapshot_only_deductions: &[String],
) -> ReconcileResult<BTreeMap<String, BigDecimal>> {
    let mut balances = BTreeMap::new();

    for tag in rules.tag_names() {
        let deposited: BigDecimal = ledger
            .deposits
            .iter()
            .filter(|e| e.tags.contains(tag))
            .map(|e| &e.amount)
            .sum();
        let offset = match snapshot {
            Some(snapshot) => snapshot
                .balance(tag)
                .cloned()
                .ok_or_else(|| ReconcileError::MissingSnapshotAccount {
                    name: tag.to_string(),
                })?,
            None => BigDecimal::from(0),
        };
        balances.insert(tag.to_string(), deposited + offset);
    }

    for name in snapshot_only_deductions {
        let value = snapshot
            .and_then(|s| s.balance(name))
            .cloned()
            .ok_or_else(|| ReconcileError::MissingSnapshotAccount { name: name.clone() })?;
        balances.insert(name.clone(), value);
    }

    Ok(balances)
}
