//! Date normalization across source-native formats
//!
//! Every source carries dates in its own shape: bank statements use short
//! `M/D/YY` dates, donation-platform exports carry a timestamp whose
//! time-of-day is irrelevant to the ledger, and some feeds are already ISO.
//! All of them normalize to one canonical `NaiveDate` here so that no
//! downstream stage ever branches on source format.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::types::{ReconcileError, ReconcileResult};

/// Named source date format, selected per input source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateFormat {
    /// Bank statement dates: `M/D/YY`, also tolerating a four-digit year
    /// and an already-ISO value
    MonthDayYear,
    /// Donation-platform timestamps: `M/D/YY H:MM` with the time-of-day
    /// discarded; tolerates `YYYY-MM-DD HH:MM:SS` and a plain ISO date
    PlatformTimestamp,
    /// `YYYY-MM-DD` only
    Iso,
}

impl DateFormat {
    fn name(&self) -> &'static str {
        match self {
            DateFormat::MonthDayYear => "month/day/year",
            DateFormat::PlatformTimestamp => "platform timestamp",
            DateFormat::Iso => "ISO date",
        }
    }
}

/// Parse a source-native date string into a canonical calendar date.
///
/// Chrono's numeric fields accept one- or two-digit month and day, so
/// `1/2/24` and `01/02/24` both parse under the same pattern.
pub fn parse_date(value: &str, format: DateFormat) -> ReconcileResult<NaiveDate> {
    let value = value.trim();

    let parsed = match format {
        DateFormat::MonthDayYear => NaiveDate::parse_from_str(value, "%m/%d/%y")
            .or_else(|_| NaiveDate::parse_from_str(value, "%m/%d/%Y"))
            .or_else(|_| NaiveDate::parse_from_str(value, "%Y-%m-%d")),
        DateFormat::PlatformTimestamp => {
            NaiveDateTime::parse_from_str(value, "%m/%d/%y %H:%M")
                .or_else(|_| NaiveDateTime::parse_from_str(value, "%m/%d/%Y %H:%M"))
                .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S"))
                .map(|dt| dt.date())
                .or_else(|_| NaiveDate::parse_from_str(value, "%Y-%m-%d"))
        }
        DateFormat::Iso => NaiveDate::parse_from_str(value, "%Y-%m-%d"),
    };

    parsed.map_err(|_| ReconcileError::DateParse {
        value: value.to_string(),
        format: format.name().to_string(),
    })
}

/// Fixed two-field `MM/DD` display form used by the report renderer
pub fn month_day(date: NaiveDate) -> String {
    date.format("%m/%d").to_string()
}
