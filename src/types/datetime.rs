use std::fmt::{self, Display, Formatter};
use std::ops::{Add, Sub};
use std::str::FromStr;

use serde::de::{self, Visitor};
use time::macros::{datetime, format_description as fd};
use time::{Duration, OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::{
    decode::Decode,
    encode::Encode,
    error::{DecodeError, EncodeError},
    types::{civil, LocalDate},
    Dialect, Value,
};

// length of `YYYY-MM-DD HH:MM:SS`; anything past this is upstream excess
// (sub-second digits or a zone suffix) and is dropped before parsing
const STORAGE_LEN: usize = 19;

/// A date and time-of-day at one-second resolution, fixed to UTC.
///
/// Stored and exchanged as `YYYY-MM-DD HH:MM:SS`; displayed as
/// `DD.MM.YYYY HH:MM:SS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocalDateTime(PrimitiveDateTime);

impl LocalDateTime {
    /// The zero instant, year 1 January 1 midnight. This is what [`Default`]
    /// yields and what a JSON `null` decodes to when there is no prior
    /// value.
    pub const ZERO: LocalDateTime = LocalDateTime(datetime!(0001 - 01 - 01 0:00));

    /// Returns a new timestamp from calendar and clock fields.
    ///
    /// No validation is performed: out-of-range fields roll over per
    /// standard calendar arithmetic, through the clock fields as well
    /// (second 60 rolls into the next minute, hour -1 into the previous
    /// day).
    ///
    /// Panics if the normalized instant cannot be represented by
    /// `time::PrimitiveDateTime`.
    pub fn new(year: i32, month: i32, day: i32, hour: i32, min: i32, sec: i32) -> LocalDateTime {
        let clock = Duration::hours(i64::from(hour))
            + Duration::minutes(i64::from(min))
            + Duration::seconds(i64::from(sec));
        LocalDateTime(civil(year, month, day).midnight() + clock)
    }

    /// Returns the current instant in UTC, truncated to whole seconds.
    pub fn now() -> LocalDateTime {
        let now = OffsetDateTime::now_utc();
        LocalDateTime::new(
            now.year(),
            i32::from(u8::from(now.month())),
            now.day().into(),
            now.hour().into(),
            now.minute().into(),
            now.second().into(),
        )
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

    pub fn hour(&self) -> u8 {
        self.0.hour()
    }

    pub fn minute(&self) -> u8 {
        self.0.minute()
    }

    pub fn second(&self) -> u8 {
        self.0.second()
    }

    /// The calendar date of this instant.
    pub fn date(&self) -> LocalDate {
        LocalDate::from(self.0.date())
    }

    /// Returns true if `self` is strictly before `other`.
    pub fn before(&self, other: &LocalDateTime) -> bool {
        self.0 < other.0
    }

    /// Returns true if `self` is strictly after `other`.
    pub fn after(&self, other: &LocalDateTime) -> bool {
        self.0 > other.0
    }

    /// Returns a new timestamp the given number of whole days later,
    /// preserving the time-of-day.
    pub fn add_days(self, days: i32) -> LocalDateTime {
        LocalDateTime(self.0 + Duration::days(i64::from(days)))
    }

    /// Returns true if this is the zero instant. Only the [`Default`] value
    /// and a fresh JSON `null` decode produce it.
    pub fn is_zero(&self) -> bool {
        *self == LocalDateTime::ZERO
    }

    /// The underlying `time::PrimitiveDateTime`.
    pub fn datetime(self) -> PrimitiveDateTime {
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
            .format(&fd!("[year]-[month]-[day] [hour]:[minute]:[second]"))
            .map_err(|e| EncodeError::Conversion(format!("failed to format LocalDateTime: {e}")))
    }
}

impl Default for LocalDateTime {
    fn default() -> Self {
        LocalDateTime::ZERO
    }
}

impl From<PrimitiveDateTime> for LocalDateTime {
    fn from(datetime: PrimitiveDateTime) -> Self {
        LocalDateTime(datetime)
    }
}

/// Advances by an arbitrary signed duration.
impl Add<Duration> for LocalDateTime {
    type Output = LocalDateTime;

    fn add(self, rhs: Duration) -> LocalDateTime {
        LocalDateTime(self.0 + rhs)
    }
}

impl Sub<Duration> for LocalDateTime {
    type Output = LocalDateTime;

    fn sub(self, rhs: Duration) -> LocalDateTime {
        LocalDateTime(self.0 - rhs)
    }
}

/// The signed duration between two instants.
impl Sub for LocalDateTime {
    type Output = Duration;

    fn sub(self, rhs: LocalDateTime) -> Duration {
        self.0 - rhs.0
    }
}

impl FromStr for LocalDateTime {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.get(..STORAGE_LEN).unwrap_or(s);
        PrimitiveDateTime::parse(s, &fd!("[year]-[month]-[day] [hour]:[minute]:[second]"))
            .map(LocalDateTime)
            .map_err(|e| DecodeError::Conversion(e.to_string()))
    }
}

impl Display for LocalDateTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = self
            .0
            .format(&fd!("[day].[month].[year] [hour]:[minute]:[second]"))
            .map_err(|_| fmt::Error)?;
        f.pad(&s)
    }
}

impl serde::Serialize for LocalDateTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let s = self.format_storage().map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&s)
    }
}

struct LocalDateTimeVisitor;

impl<'de> Visitor<'de> for LocalDateTimeVisitor {
    type Value = Option<LocalDateTime>;

    fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("a `YYYY-MM-DD HH:MM:SS` string or null")
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

impl<'de> serde::Deserialize<'de> for LocalDateTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(deserializer
            .deserialize_any(LocalDateTimeVisitor)?
            .unwrap_or_default())
    }

    // a `null` token leaves the current value in place rather than zeroing it
    fn deserialize_in_place<D>(deserializer: D, place: &mut Self) -> Result<(), D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        if let Some(parsed) = deserializer.deserialize_any(LocalDateTimeVisitor)? {
            *place = parsed;
        }
        Ok(())
    }
}

impl Encode for LocalDateTime {
    // the database always receives the storage format, never the
    // display format
    fn encode(self) -> Result<Value, EncodeError> {
        Ok(Value::Text {
            value: self.format_storage()?,
            type_info: None,
        })
    }
}

impl<'r> Decode<'r> for LocalDateTime {
    fn decode(value: &'r Value) -> Result<Self, DecodeError> {
        match value {
            Value::Text { .. } | Value::Blob { .. } => value.text()?.parse(),
            Value::Datetime { value, .. } => {
                let utc = value.to_offset(UtcOffset::UTC);
                Ok(LocalDateTime::new(
                    utc.year(),
                    i32::from(u8::from(utc.month())),
                    utc.day().into(),
                    utc.hour().into(),
                    utc.minute().into(),
                    utc.second().into(),
                ))
            }
            _ => Err(DecodeError::DataType(value.type_info())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SqlDataType;
    use time::macros::datetime;

    #[test]
    fn test_storage_round_trip() {
        let t = LocalDateTime::new(2023, 4, 1, 7, 5, 9);
        let encoded = t.encode().unwrap();
        let decoded: LocalDateTime = Decode::decode(&encoded).unwrap();
        assert_eq!(t, decoded);
    }

    #[test]
    fn test_storage_format() {
        let t = LocalDateTime::new(2023, 4, 1, 7, 5, 9);
        match t.encode().unwrap() {
            Value::Text { value, .. } => assert_eq!(value, "2023-04-01 07:05:09"),
            other => panic!("expected text value, got {other:?}"),
        }
    }

    #[test]
    fn test_clock_rollover() {
        assert_eq!(
            LocalDateTime::new(2023, 4, 1, 0, 0, 60),
            LocalDateTime::new(2023, 4, 1, 0, 1, 0)
        );
        assert_eq!(
            LocalDateTime::new(2023, 4, 1, -1, 0, 0),
            LocalDateTime::new(2023, 3, 31, 23, 0, 0)
        );
        assert_eq!(
            LocalDateTime::new(2023, 1, 32, 24, 0, 0),
            LocalDateTime::new(2023, 2, 2, 0, 0, 0)
        );
    }

    #[test]
    fn test_comparisons() {
        let a = LocalDateTime::new(2023, 4, 1, 7, 5, 9);
        let b = LocalDateTime::new(2023, 4, 1, 7, 5, 10);
        assert!(a.before(&b));
        assert!(b.after(&a));
        assert!(!a.after(&b));
    }

    #[test]
    fn test_add_days_preserves_clock() {
        let t = LocalDateTime::new(2023, 2, 27, 7, 5, 9);
        assert_eq!(t.add_days(2), LocalDateTime::new(2023, 3, 1, 7, 5, 9));
        assert_eq!(t.add_days(-27), LocalDateTime::new(2023, 1, 31, 7, 5, 9));
    }

    #[test]
    fn test_difference_and_add_duration() {
        let a = LocalDateTime::new(2023, 4, 2, 1, 0, 0);
        let b = LocalDateTime::new(2023, 4, 1, 23, 30, 0);
        let delta = a - b;
        assert_eq!(delta, Duration::minutes(90));
        assert_eq!(b + delta, a);
        assert_eq!(a - delta, b);
    }

    #[test]
    fn test_parse_truncates_excess() {
        // 23-char value with sub-second excess equals its first 19 chars
        let t: LocalDateTime = "2023-04-01 07:05:09.123".parse().unwrap();
        assert_eq!(t, LocalDateTime::new(2023, 4, 1, 7, 5, 9));

        let t: LocalDateTime = "2023-04-01 07:05:09+02:00".parse().unwrap();
        assert_eq!(t, LocalDateTime::new(2023, 4, 1, 7, 5, 9));
    }

    #[test]
    fn test_parse_rejects_short_or_malformed() {
        assert!("2023-04-01".parse::<LocalDateTime>().is_err());
        assert!("01.04.2023 07:05:09".parse::<LocalDateTime>().is_err());
        assert!("".parse::<LocalDateTime>().is_err());
    }

    #[test]
    fn test_display() {
        let t = LocalDateTime::new(2023, 4, 1, 7, 5, 9);
        assert_eq!(t.to_string(), "01.04.2023 07:05:09");
    }

    #[test]
    fn test_decode_from_blob_with_excess() {
        let value = Value::Blob {
            value: b"2023-04-01 07:05:09.123".to_vec(),
            type_info: None,
        };
        let decoded: LocalDateTime = Decode::decode(&value).unwrap();
        assert_eq!(decoded, LocalDateTime::new(2023, 4, 1, 7, 5, 9));
    }

    #[test]
    fn test_decode_from_native_datetime() {
        let value = Value::Datetime {
            value: datetime!(2023-04-01 09:05:09.5 +02:00),
            type_info: Some(SqlDataType::Datetime),
        };
        let decoded: LocalDateTime = Decode::decode(&value).unwrap();
        // normalized to UTC, sub-second precision dropped
        assert_eq!(decoded, LocalDateTime::new(2023, 4, 1, 7, 5, 9));
    }

    #[test]
    fn test_decode_unsupported_type() {
        let value = Value::Double {
            value: 1680332709.0,
            type_info: None,
        };
        let err = LocalDateTime::decode(&value).unwrap_err();
        assert!(matches!(err, DecodeError::DataType(SqlDataType::Float)));
    }

    #[test]
    fn test_is_zero() {
        assert!(LocalDateTime::default().is_zero());
        assert!(LocalDateTime::ZERO.is_zero());
        assert!(!LocalDateTime::now().is_zero());
        assert_eq!(LocalDateTime::ZERO, LocalDateTime::new(1, 1, 1, 0, 0, 0));
    }

    #[test]
    fn test_date_part() {
        let t = LocalDateTime::new(2023, 4, 1, 7, 5, 9);
        assert_eq!(t.date(), LocalDate::new(2023, 4, 1));
    }

    #[test]
    fn test_column_types() {
        assert_eq!(LocalDateTime::data_type(), "time");
        assert_eq!(LocalDateTime::column_type(Dialect::Mysql), "TIME");
        assert_eq!(LocalDateTime::column_type(Dialect::Other), "");
    }
}
