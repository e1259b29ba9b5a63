//! Ledger construction: fee aggregation and stream merging

mod fees;
mod merge;

pub use fees::aggregate_fees;
pub use merge::{
    bank_deposit_entries, bank_expense_entries, donation_deposit_entries, merge_ledger,
};
