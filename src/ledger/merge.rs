//! Merging source-derived entries into the period ledger

use bigdecimal::{BigDecimal, Zero};

use crate::classify::TagRules;
use crate::types::{BankTransaction, DonationTransaction, Ledger, LedgerEntry};

/// Bank rows with `amount >= 0`, classified by description.
///
/// Zero-amount rows land here and only here; the expense filter is strict,
/// so no row can be counted on both sides.
pub fn bank_deposit_entries(rows: &[BankTransaction], rules: &TagRules) -> Vec<LedgerEntry> {
    rows.iter()
        .filter(|r| r.amount >= BigDecimal::zero())
        .map(|r| {
            let description = match &r.category {
                Some(category) => format!("{} - {}", r.description, category),
                None => r.description.clone(),
            };
            LedgerEntry::new(r.date, description, r.amount.clone())
                .with_tags(rules.classify(&r.description))
        })
        .collect()
}

/// Bank rows with `amount < 0`, classified by description
pub fn bank_expense_entries(rows: &[BankTransaction], rules: &TagRules) -> Vec<LedgerEntry> {
    rows.iter()
        .filter(|r| r.amount < BigDecimal::zero())
        .map(|r| {
            LedgerEntry::new(r.date, r.description.clone(), r.amount.clone())
                .with_tags(rules.classify(&r.description))
        })
        .collect()
}

/// One deposit per donation at its gross amount, classified by fundraising
/// page. The fee reaches the ledger separately, through fee aggregation.
pub fn donation_deposit_entries(
    donations: &[DonationTransaction],
    rules: &TagRules,
    platform_label: &str,
) -> Vec<LedgerEntry> {
    donations
        .iter()
        .map(|d| {
            let description = format!("{} - {}", d.donor_name(), platform_label);
            LedgerEntry::new(d.date, description, d.amount.clone())
                .with_tags(rules.classify(&d.fundraising_page))
        })
        .collect()
}

/// Concatenate the four entry streams into a ledger, each side sorted
/// ascending by date with input order preserved among ties.
pub fn merge_ledger(
    bank_deposits: Vec<LedgerEntry>,
    donation_deposits: Vec<LedgerEntry>,
    bank_expenses: Vec<LedgerEntry>,
    fee_expenses: Vec<LedgerEntry>,
) -> Ledger {
    let mut deposits = bank_deposits;
    deposits.extend(donation_deposits);
    deposits.sort_by_key(|e| e.date);

    let mut expenses = bank_expenses;
    expenses.extend(fee_expenses);
    expenses.sort_by_key(|e| e.date);

    Ledger { deposits, expenses }
}
