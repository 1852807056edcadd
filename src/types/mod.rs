//! The calendar date and local timestamp column value types.
//!
//! # Formats
//!
//! | Rust type         | storage format        | display format         |
//! |-------------------|-----------------------|------------------------|
//! | [`LocalDate`]     | `YYYY-MM-DD`          | `D.M.YYYY`             |
//! | [`LocalDateTime`] | `YYYY-MM-DD HH:MM:SS` | `DD.MM.YYYY HH:MM:SS`  |
//!
//! The storage format is what crosses the JSON and database boundaries; the
//! display format is what [`std::fmt::Display`] yields. Both types are fixed
//! to UTC and carry no sub-second precision.
//!
//! # Nullable
//!
//! `Option<T>` is supported at the database boundary where `T` implements
//! [`Encode`] or [`Decode`]. An `Option<T>` represents a potentially `NULL`
//! column value.
//!
//! [`Encode`]: crate::Encode
//! [`Decode`]: crate::Decode

use time::{Date, Duration, Month};

mod date;
mod datetime;

pub use date::LocalDate;
pub use datetime::LocalDateTime;

/// Builds a `time::Date` from unconstrained calendar fields, rolling
/// out-of-range months and days over into the adjacent periods (day 32 of
/// January becomes February 1, month 13 becomes January of the next year,
/// zero and negative fields roll backwards).
///
/// Panics if the normalized date falls outside the range `time::Date`
/// can represent.
pub(crate) fn civil(year: i32, month: i32, day: i32) -> Date {
    let months = i64::from(year) * 12 + i64::from(month) - 1;
    let year = i32::try_from(months.div_euclid(12)).expect("year outside the representable range");
    let month = Month::try_from(months.rem_euclid(12) as u8 + 1).expect("month normalized into 1..=12");
    let first = Date::from_calendar_date(year, month, 1)
        .expect("year outside the representable range");
    first + Duration::days(i64::from(day) - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_civil_in_range() {
        assert_eq!(civil(2023, 5, 17), date!(2023 - 05 - 17));
    }

    #[test]
    fn test_civil_day_rollover() {
        assert_eq!(civil(2023, 1, 32), date!(2023 - 02 - 01));
        assert_eq!(civil(2023, 2, 31), date!(2023 - 03 - 03));
        assert_eq!(civil(2024, 2, 31), date!(2024 - 03 - 02));
        assert_eq!(civil(2023, 3, 0), date!(2023 - 02 - 28));
    }

    #[test]
    fn test_civil_month_rollover() {
        assert_eq!(civil(2023, 13, 1), date!(2024 - 01 - 01));
        assert_eq!(civil(2023, 0, 1), date!(2022 - 12 - 01));
        assert_eq!(civil(2023, -11, 1), date!(2022 - 01 - 01));
    }
}
