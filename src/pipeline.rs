//! The end-to-end reporting pipeline
//!
//! One synchronous batch invocation per reporting period: parse each source,
//! classify, aggregate fees, merge, reconcile. Every stage completes over the
//! full in-memory batch before the next begins, and any failure aborts the
//! run with no partial output.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::classify::TagRules;
use crate::ledger::{
    aggregate_fees, bank_deposit_entries, bank_expense_entries, donation_deposit_entries,
    merge_ledger,
};
use crate::parse::{bank_transactions, donation_transactions, special_account_snapshot};
use crate::reconciliation::{BalanceStrategy, PeriodScope, Reconciler};
use crate::types::{
    DonationTransaction, Ledger, PeriodSummary, ReconcileResult, SpecialAccountSnapshot,
};
use crate::utils::check_ledger_invariants;

/// Configuration for one reporting run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Sub-account tagging rules; tag names double as snapshot column names
    pub tags: TagRules,
    /// Snapshot columns deducted from the operating balance without any
    /// transaction activity of their own (lump-sum internal transfers)
    pub snapshot_only_deductions: Vec<String>,
    /// Ending-balance derivation; overridden to `Derived` whenever donation
    /// rows are present
    pub balance_strategy: BalanceStrategy,
    /// Which dates define the reporting window
    pub period_scope: PeriodScope,
    /// Description used for date-aggregated fee expense entries
    pub fee_description: String,
    /// Label appended to donation deposit descriptions
    pub platform_label: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            tags: TagRules::new(),
            snapshot_only_deductions: Vec::new(),
            balance_strategy: BalanceStrategy::default(),
            period_scope: PeriodScope::default(),
            fee_description: "Platform Fee".to_string(),
            platform_label: "Online".to_string(),
        }
    }
}

/// Everything the external report renderer needs, in memory: the reconciled
/// summary, both ledger streams, the raw donation sequence for the
/// contributions listing, and the snapshot for display-only lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportBundle {
    pub summary: PeriodSummary,
    pub ledger: Ledger,
    pub donations: Vec<DonationTransaction>,
    pub snapshot: SpecialAccountSnapshot,
}

/// Run the full reconciliation pipeline over raw CSV text.
///
/// `snapshot_csv` is optional; without it, configured tags carry no external
/// offset and snapshot-only deductions cannot be resolved.
pub fn run_report(
    bank_csv: &str,
    donation_csv: &str,
    snapshot_csv: Option<&str>,
    config: &ReportConfig,
) -> ReconcileResult<ReportBundle> {
    config.tags.validate()?;

    let bank_records = bank_transactions(bank_csv)?;
    let donations = donation_transactions(donation_csv)?;
    let snapshot = snapshot_csv.map(special_account_snapshot).transpose()?;
    debug!(
        bank_rows = bank_records.len(),
        donation_rows = donations.len(),
        has_snapshot = snapshot.is_some(),
        "parsed source files"
    );

    let fee_expenses = aggregate_fees(&donations, &config.fee_description);
    debug!(fee_entries = fee_expenses.len(), "aggregated platform fees");

    let ledger = merge_ledger(
        bank_deposit_entries(&bank_records, &config.tags),
        donation_deposit_entries(&donations, &config.tags, &config.platform_label),
        bank_expense_entries(&bank_records, &config.tags),
        fee_expenses,
    );
    check_ledger_invariants(&ledger)?;
    debug!(
        deposits = ledger.deposits.len(),
        expenses = ledger.expenses.len(),
        "merged ledger"
    );

    let has_off_bank_activity = !donations.is_empty();
    let summary = Reconciler::new()
        .with_strategy(config.balance_strategy)
        .with_scope(config.period_scope)
        .reconcile(
            &ledger,
            &bank_records,
            snapshot.as_ref(),
            &config.tags,
            &config.snapshot_only_deductions,
            has_off_bank_activity,
        )?;
    info!(
        period_start = %summary.period_start,
        period_end = %summary.period_end,
        ending_balance = %summary.ending_balance,
        "reconciled reporting period"
    );

    Ok(ReportBundle {
        summary,
        ledger,
        donations,
        snapshot: snapshot.unwrap_or_default(),
    })
}
