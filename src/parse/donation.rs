//! Donation-platform export parsing

use bigdecimal::{BigDecimal, Zero};
use std::path::Path;

use crate::dates::{parse_date, DateFormat};
use crate::parse::{parse_amount, read_source, SourceTable};
use crate::types::{DonationTransaction, ReconcileError, ReconcileResult};

const SOURCE: &str = "donation export";

/// Parse donation-platform CSV text into typed transactions.
///
/// All of the §6 columns are required, case-sensitively: `Amount`, `Fee`,
/// `Date`, `Donor First Name`, `Donor Last Name`, `Donor Addr1`,
/// `Donor City`, `Donor State`, `Donor ZIP`, `Donor Occupation`,
/// `Fundraising Page`. Fees must be non-negative.
pub fn donation_transactions(text: &str) -> ReconcileResult<Vec<DonationTransaction>> {
    let table = SourceTable::from_text(SOURCE, text)?;

    let amount_col = table.required("Amount")?;
    let fee_col = table.required("Fee")?;
    let date_col = table.required("Date")?;
    let first_name_col = table.required("Donor First Name")?;
    let last_name_col = table.required("Donor Last Name")?;
    let addr1_col = table.required("Donor Addr1")?;
    let city_col = table.required("Donor City")?;
    let state_col = table.required("Donor State")?;
    let zip_col = table.required("Donor ZIP")?;
    let occupation_col = table.required("Donor Occupation")?;
    let page_col = table.required("Fundraising Page")?;

    table
        .rows()
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let line = table.line(i);
            let fee = parse_amount(table.value(row, fee_col), SOURCE, line, "Fee")?;
            if fee < BigDecimal::zero() {
                return Err(ReconcileError::Parse {
                    source_name: SOURCE.to_string(),
                    row: line,
                    column: "Fee".to_string(),
                    value: table.value(row, fee_col).to_string(),
                });
            }

            Ok(DonationTransaction {
                date: parse_date(table.value(row, date_col), DateFormat::PlatformTimestamp)?,
                donor_first_name: table.value(row, first_name_col).to_string(),
                donor_last_name: table.value(row, last_name_col).to_string(),
                donor_addr1: table.value(row, addr1_col).to_string(),
                donor_city: table.value(row, city_col).to_string(),
                donor_state: table.value(row, state_col).to_string(),
                donor_zip: table.value(row, zip_col).to_string(),
                occupation: table.value(row, occupation_col).to_string(),
                amount: parse_amount(table.value(row, amount_col), SOURCE, line, "Amount")?,
                fee,
                fundraising_page: table.value(row, page_col).to_string(),
            })
        })
        .collect()
}

/// Parse a donation-platform export from disk
pub fn donation_transactions_from_path<P: AsRef<Path>>(
    path: P,
) -> ReconcileResult<Vec<DonationTransaction>> {
    donation_transactions(&read_source(path.as_ref())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    const HEADER: &str = "Date,Amount,Fee,Donor First Name,Donor Last Name,\
Donor Addr1,Donor City,Donor State,Donor ZIP,Donor Occupation,Fundraising Page";

    #[test]
    fn test_parses_typed_rows_and_discards_time_of_day() {
        let text = format!(
            "{HEADER}\n\
             1/3/24 9:41,50.00,2.50,Ada,Lovelace,12 Main St,Westminster,CO,80031,Engineer,latinoinitiative\n\
             1/3/24 18:02,25.00,1.75,Grace,Hopper,4 Elm Ave,Thornton,CO,80229,Retired,general\n"
        );
        let rows = donation_transactions(&text).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
        assert_eq!(rows[0].date, rows[1].date);
        assert_eq!(rows[0].amount, BigDecimal::from_str("50.00").unwrap());
        assert_eq!(rows[0].fee, BigDecimal::from_str("2.50").unwrap());
        assert_eq!(rows[0].fundraising_page, "latinoinitiative");
        assert_eq!(rows[1].donor_name(), "Grace Hopper");
    }

    #[test]
    fn test_every_donor_column_is_required() {
        let text = "Date,Amount,Fee\n1/3/24 9:41,50.00,2.50\n";
        let err = donation_transactions(text).unwrap_err();

        match err {
            ReconcileError::Schema { column, .. } => assert_eq!(column, "Donor First Name"),
            other => panic!("expected Schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_fee_is_rejected() {
        let text = format!(
            "{HEADER}\n1/3/24 9:41,50.00,-2.50,Ada,Lovelace,12 Main St,Westminster,CO,80031,Engineer,general\n"
        );
        let err = donation_transactions(&text).unwrap_err();

        match err {
            ReconcileError::Parse { column, row, .. } => {
                assert_eq!(column, "Fee");
                assert_eq!(row, 2);
            }
            other => panic!("expected Parse error, got {other:?}"),
        }
    }
}
