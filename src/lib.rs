//! # Treasury Core
//!
//! A reconciliation library that merges independently-sourced transaction
//! exports — a bank statement, a donation-platform export, and an optional
//! snapshot of earmarked sub-account balances — into one internally
//! consistent financial ledger for a reporting period.
//!
//! ## Features
//!
//! - **Record parsing**: schema-validated typed records from raw CSV text,
//!   with exact-decimal money coercion
//! - **Date normalization**: heterogeneous source date formats collapse to
//!   one canonical calendar date
//! - **Sub-account classification**: declarative, case-insensitive keyword
//!   triggers tag transactions into earmarked funds
//! - **Fee aggregation**: per-donation platform fees collapse into one
//!   expense entry per date
//! - **Balance reconciliation**: starting, ending, per-sub-account, and
//!   operating balances satisfying the conservation equation
//!
//! ## Quick Start
//!
//! ```rust
//! use treasury_core::{run_report, ReportConfig, TagRules};
//!
//! let bank = "Date,Description,Amount,Posted Balance After Transaction\n\
//!             1/2/24,Opening deposit,100.00,100.00\n\
//!             1/5/24,Check 1041,-40.00,60.00\n";
//! let donations = "Date,Amount,Fee,Donor First Name,Donor Last Name,\
//!                  Donor Addr1,Donor City,Donor State,Donor ZIP,\
//!                  Donor Occupation,Fundraising Page\n";
//!
//! let config = ReportConfig {
//!     tags: TagRules::new().with_tag("Latino Initiative", ["latino"]),
//!     ..ReportConfig::default()
//! };
//! let bundle = run_report(bank, donations, None, &config)?;
//! assert_eq!(bundle.summary.ending_balance.to_string(), "60.00");
//! # Ok::<(), treasury_core::ReconcileError>(())
//! ```

pub mod classify;
pub mod dates;
pub mod ledger;
pub mod parse;
pub mod pipeline;
pub mod reconciliation;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use classify::TagRules;
pub use dates::{month_day, parse_date, DateFormat};
pub use ledger::{aggregate_fees, merge_ledger};
pub use parse::{
    bank_transactions, bank_transactions_from_path, donation_transactions,
    donation_transactions_from_path, special_account_snapshot,
    special_account_snapshot_from_path,
};
pub use pipeline::{run_report, ReportBundle, ReportConfig};
pub use reconciliation::{BalanceStrategy, PeriodScope, Reconciler};
pub use types::*;
