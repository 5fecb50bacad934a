//! Day sequence generation for the diary grid.
//!
//! Days are plain linear offsets from the start date; chrono takes care of
//! month and year rollover.

use crate::{DayDescriptor, Error, Result};
use chrono::{Datelike, Days, NaiveDate};

/// Parse an ISO `YYYY-MM-DD` start date
pub fn parse_start_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|e| {
        Error::InvalidConfiguration(format!(
            "start date '{}' is not a valid YYYY-MM-DD date: {}",
            input, e
        ))
    })
}

/// Convert a raw (possibly user-typed) day count into a positive count
pub fn checked_day_count(raw: i64) -> Result<u32> {
    if raw <= 0 {
        return Err(Error::InvalidConfiguration(format!(
            "day count must be positive, got {}",
            raw
        )));
    }
    u32::try_from(raw).map_err(|_| {
        Error::InvalidConfiguration(format!("day count {} is too large", raw))
    })
}

/// "month/day" without zero padding
pub fn short_label(date: NaiveDate) -> String {
    format!("{}/{}", date.month(), date.day())
}

/// Generate `day_count` consecutive day descriptors starting at `start_date`
///
/// Either every day is produced or the call fails; there is no partial output.
pub fn generate(start_date: NaiveDate, day_count: u32) -> Result<Vec<DayDescriptor>> {
    if day_count == 0 {
        return Err(Error::InvalidConfiguration(
            "day count must be positive, got 0".into(),
        ));
    }

    // Validate the whole range before allocating anything
    let last_date = start_date
        .checked_add_days(Days::new(u64::from(day_count) - 1))
        .ok_or_else(|| {
            Error::InvalidConfiguration(format!(
                "{} days from {} runs past the last supported date",
                day_count, start_date
            ))
        })?;

    // Every offset is at most the one checked above
    let days: Vec<_> = (0..day_count)
        .map(|offset| {
            let date = start_date + Days::new(u64::from(offset));
            DayDescriptor {
                day_index: offset + 1,
                date,
                short_label: short_label(date),
            }
        })
        .collect();

    tracing::debug!(
        "Generated {} days from {} to {}",
        days.len(),
        start_date,
        last_date
    );

    Ok(days)
}
