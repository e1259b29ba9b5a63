//! Per-date aggregation of donation-platform fees
//!
//! Platforms deduct a fee from every contribution, but the ledger carries one
//! expense line per day, not one per donation. Collapsing fees by date keeps
//! the expense stream readable and matches how the totals are re-entered in
//! downstream filing systems.

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use std::collections::HashMap;

use crate::types::{DonationTransaction, LedgerEntry};

/// Collapse per-donation fees into one synthetic expense entry per distinct
/// donation date: `amount = -(sum of that date's fees)`, no tags.
///
/// Output preserves first-occurrence order of dates; the merger re-sorts by
/// date regardless. No date appears more than once.
pub fn aggregate_fees(donations: &[DonationTransaction], description: &str) -> Vec<LedgerEntry> {
    let mut totals: Vec<(NaiveDate, BigDecimal)> = Vec::new();
    let mut index_by_date: HashMap<NaiveDate, usize> = HashMap::new();

    for donation in donations {
        match index_by_date.get(&donation.date) {
            Some(&i) => totals[i].1 += &donation.fee,
            None => {
                index_by_date.insert(donation.date, totals.len());
                totals.push((donation.date, donation.fee.clone()));
            }
        }
    }

    totals
        .into_iter()
        .map(|(date, total)| LedgerEntry::new(date, description.to_string(), -total))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn donation(day: u32, fee: &str) -> DonationTransaction {
        DonationTransaction {
            date: date(day),
            donor_first_name: "A".into(),
            donor_last_name: "B".into(),
            donor_addr1: String::new(),
            donor_city: String::new(),
            donor_state: String::new(),
            donor_zip: String::new(),
            occupation: String::new(),
            amount: dec("10.00"),
            fee: dec(fee),
            fundraising_page: String::new(),
        }
    }

    #[test]
    fn test_same_day_fees_collapse_to_one_entry() {
        let entries = aggregate_fees(
            &[donation(3, "2.50"), donation(3, "1.75")],
            "Platform Fee",
        );

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].date, date(3));
        assert_eq!(entries[0].amount, dec("-4.25"));
        assert_eq!(entries[0].description, "Platform Fee");
        assert!(entries[0].tags.is_empty());
    }

    #[test]
    fn test_distinct_dates_stay_separate() {
        let entries = aggregate_fees(
            &[donation(5, "1.00"), donation(3, "2.00"), donation(5, "0.50")],
            "Platform Fee",
        );

        // First-occurrence order, one entry per date
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].date, date(5));
        assert_eq!(entries[0].amount, dec("-1.50"));
        assert_eq!(entries[1].date, date(3));
        assert_eq!(entries[1].amount, dec("-2.00"));
    }

    #[test]
    fn test_no_donations_no_entries() {
        assert!(aggregate_fees(&[], "Platform Fee").is_empty());
    }
}
