use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::de::{self, Visitor};
use time::macros::{date, format_description as fd};
use time::{Date, OffsetDateTime, UtcOffset};

use crate::{
    decode::Decode,
    encode::Encode,
    error::{DecodeError, EncodeError},
    types::civil,
    Dialect, Value,
};

/// A calendar date with no time-of-day component, fixed to UTC.
///
/// Stored and exchanged as `YYYY-MM-DD`; displayed as `D.M.YYYY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocalDate(Date);

impl LocalDate {
    /// The zero date, year 1 January 1. This is what [`Default`] yields and
    /// what a JSON `null` decodes to when there is no prior value.
    pub const ZERO: LocalDate = LocalDate(date!(0001 - 01 - 01));

    /// Returns a new date from calendar fields.
    ///
    /// No validation is performed: out-of-range months and days roll over
    /// per standard calendar arithmetic, so day 32 of January becomes
    /// February 1 and month 13 becomes January of the following year.
    ///
    /// Panics if the normalized date cannot be represented by `time::Date`.
    pub fn new(year: i32, month: i32, day: i32) -> LocalDate {
        LocalDate(civil(year, month, day))
    }

    /// Returns the current date in UTC.
    pub fn today() -> LocalDate {
        LocalDate(OffsetDateTime::now_utc().date())
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// The month of the year, 1 through 12.
    pub fn month(&self) -> u8 {
        u8::from(self.0.month())
    }

    /// The day of the month, 1 through 31.
    pub fn day(&self) -> u8 {
        self.0.day()
    }

    /// Returns true if `self` is strictly before `other`.
    pub fn before(&self, other: &LocalDate) -> bool {
        self.0 < other.0
    }

    /// Returns true if `self` is strictly after `other`.
    pub fn after(&self, other: &LocalDate) -> bool {
        self.0 > other.0
    }

    /// Returns true if `self` and `other` fall in the same month of the
    /// same year.
    pub fn equal_month(&self, other: &LocalDate) -> bool {
        self.year() == other.year() && self.month() == other.month()
    }

    /// Returns true if `self` and `other` fall in the same quarter of the
    /// same year. Quarters group months {1,2,3}, {4,5,6}, {7,8,9} and
    /// {10,11,12}.
    pub fn equal_quarter(&self, other: &LocalDate) -> bool {
        self.year() == other.year() && (self.month() - 1) / 3 == (other.month() - 1) / 3
    }

    /// Returns true if `self` and `other` fall in the same year.
    pub fn equal_year(&self, other: &LocalDate) -> bool {
        self.year() == other.year()
    }

    /// Returns the first day of the quarter containing `self`.
    pub fn quarter_start(&self) -> LocalDate {
        let month = i32::from(self.month());
        LocalDate::new(self.year(), month - (month - 1) % 3, 1)
    }

    /// Returns a new date the given number of days later.
    pub fn add_days(self, days: i32) -> LocalDate {
        LocalDate::new(self.year(), self.month().into(), i32::from(self.day()) + days)
    }

    /// Returns a new date the given number of months later. Month overflow
    /// rolls over, so adding one month to January 31 lands in early March.
    pub fn add_months(self, months: i32) -> LocalDate {
        LocalDate::new(self.year(), i32::from(self.month()) + months, self.day().into())
    }

    /// Returns a new date the given number of years later.
    pub fn add_years(self, years: i32) -> LocalDate {
        LocalDate::new(self.year() + years, self.month().into(), self.day().into())
    }

    /// Returns a new date the given number of days earlier.
    pub fn minus_days(self, days: i32) -> LocalDate {
        self.add_days(-days)
    }

    /// Returns a new date the given number of months earlier.
    pub fn minus_months(self, months: i32) -> LocalDate {
        self.add_months(-months)
    }

    /// Returns a new date the given number of years earlier.
    pub fn minus_years(self, years: i32) -> LocalDate {
        self.add_years(-years)
    }

    /// The underlying `time::Date`.
    pub fn date(self) -> Date {
        self.0
    }

    /// The generic column declaration used when no dialect is known.
    pub const fn data_type() -> &'static str {
        "time"
    }

    /// The concrete column type declared under `dialect`.
    pub const fn column_type(dialect: Dialect) -> &'static str {
        dialect.time_column_type()
    }

    fn format_storage(&self) -> Result<String, EncodeError> {
        self.0
            .format(&fd!("[year]-[month]-[day]"))
            .map_err(|e| EncodeError::Conversion(format!("failed to format LocalDate: {e}")))
    }
}

impl Default for LocalDate {
    fn default() -> Self {
        LocalDate::ZERO
    }
}

impl From<Date> for LocalDate {
    fn from(date: Date) -> Self {
        LocalDate(date)
    }
}

impl FromStr for LocalDate {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Date::parse(s, &fd!("[year]-[month]-[day]"))
            .map(LocalDate)
            .map_err(|e| DecodeError::Conversion(e.to_string()))
    }
}

impl Display for LocalDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = self
            .0
            .format(&fd!("[day padding:none].[month padding:none].[year]"))
            .map_err(|_| fmt::Error)?;
        f.pad(&s)
    }
}

impl serde::Serialize for LocalDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let s = self.format_storage().map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&s)
    }
}

struct LocalDateVisitor;

impl<'de> Visitor<'de> for LocalDateVisitor {
    type Value = Option<LocalDate>;

    fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("a `YYYY-MM-DD` string or null")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        v.parse().map(Some).map_err(de::Error::custom)
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(None)
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(None)
    }
}

impl<'de> serde::Deserialize<'de> for LocalDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(deserializer
            .deserialize_any(LocalDateVisitor)?
            .unwrap_or_default())
    }

    // a `null` token leaves the current value in place rather than zeroing it
    fn deserialize_in_place<D>(deserializer: D, place: &mut Self) -> Result<(), D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        if let Some(parsed) = deserializer.deserialize_any(LocalDateVisitor)? {
            *place = parsed;
        }
        Ok(())
    }
}

impl Encode for LocalDate {
    fn encode(self) -> Result<Value, EncodeError> {
        Ok(Value::Text {
            value: self.format_storage()?,
            type_info: None,
        })
    }
}

impl<'r> Decode<'r> for LocalDate {
    fn decode(value: &'r Value) -> Result<Self, DecodeError> {
        match value {
            Value::Text { .. } | Value::Blob { .. } => value.text()?.parse(),
            Value::Datetime { value, .. } => {
                Ok(LocalDate(value.to_offset(UtcOffset::UTC).date()))
            }
            _ => Err(DecodeError::DataType(value.type_info())),
        }
    }
}
