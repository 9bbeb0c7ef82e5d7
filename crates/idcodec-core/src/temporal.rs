//! # Calendar Arithmetic
//!
//! Birth dates are proleptic-Gregorian calendar days between `0000-01-01`
//! and `9999-12-31`. Year 0 exists and is a leap year, matching ISO 8601.
//!
//! The bit-field layout stores a birth date as its day offset from the
//! epoch `0000-01-01`. Offsets are computed through
//! [`chrono::Datelike::num_days_from_ce`], which counts `0001-01-01` as
//! day 1, so the epoch sits at [`EPOCH_DAYS_FROM_CE`].

use chrono::{Datelike, Month, NaiveDate};

use crate::error::IdentityError;

/// `num_days_from_ce()` of `0000-01-01`: one leap year before day 1.
pub const EPOCH_DAYS_FROM_CE: i32 = -365;

/// Largest year expressible in four digits.
pub const MAX_YEAR: u32 = 9999;

/// Gregorian leap-year rule, valid for every year including year 0.
pub fn is_leap_year(year: u32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` of `year`, or `None` for a month outside `1..=12`.
pub fn days_in_month(year: u32, month: u32) -> Option<u32> {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
        4 | 6 | 9 | 11 => Some(30),
        2 if is_leap_year(year) => Some(29),
        2 => Some(28),
        _ => None,
    }
}

/// Builds a calendar date, reporting precisely why an impossible one fails.
///
/// February 29 of a non-leap year gets a dedicated reason, distinct from a
/// generic day-of-month overflow.
///
/// # Errors
///
/// Returns [`IdentityError::InvalidDate`] if the year exceeds 9999, the month
/// is outside `1..=12`, or the day does not exist in that month.
pub fn calendar_date(year: u32, month: u32, day: u32) -> Result<NaiveDate, IdentityError> {
    let invalid = |reason: String| IdentityError::InvalidDate {
        year,
        month,
        day,
        reason,
    };

    if year > MAX_YEAR {
        return Err(invalid(format!("year {year} exceeds {MAX_YEAR}")));
    }
    let Some(month_length) = days_in_month(year, month) else {
        return Err(invalid(format!("month {month} does not exist")));
    };
    if day == 0 {
        return Err(invalid("day 0 does not exist".to_string()));
    }
    if day > month_length {
        if month == 2 && day == 29 {
            return Err(invalid(format!(
                "February 29 does not exist because {year} is not a leap year"
            )));
        }
        return Err(invalid(format!(
            "{} {day} does not exist: the month has {month_length} days",
            month_name(month)
        )));
    }

    // Year, month and day are all in range at this point.
    let year = i32::try_from(year).map_err(|e| invalid(e.to_string()))?;
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| invalid("not representable as a calendar date".to_string()))
}

/// Days elapsed from `0000-01-01` to `date`. Negative for earlier dates.
pub fn day_offset(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce()) - i64::from(EPOCH_DAYS_FROM_CE)
}

/// The date `offset` days after `0000-01-01`, or `None` if chrono cannot
/// represent it.
pub fn date_from_offset(offset: u64) -> Option<NaiveDate> {
    let offset = i32::try_from(offset).ok()?;
    NaiveDate::from_num_days_from_ce_opt(offset.checked_add(EPOCH_DAYS_FROM_CE)?)
}

fn month_name(month: u32) -> &'static str {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map_or("month", |m| m.name())
}
