//! Age arithmetic on calendar dates

use chrono::{Datelike, NaiveDate};

/// The date a birthday falls on in the given year
///
/// A 29 February birthday rolls over to 1 March in non-leap years. Returns
/// `None` only when `year` is outside chrono's supported range.
pub fn birthday_in_year(birth_date: NaiveDate, year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, birth_date.month(), birth_date.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
}

/// Whole years between `birth_date` and `today`
///
/// The year difference is reduced by one while this year's birthday is
/// still ahead. A birthday falling on `today` counts as reached. Birth
/// dates in the future give negative ages.
pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> i64 {
    let mut years = i64::from(today.year()) - i64::from(birth_date.year());

    let not_yet = birthday_in_year(birth_date, today.year())
        .map(|birthday| birthday > today)
        .unwrap_or(false);
    if not_yet {
        years -= 1;
    }

    years
}
