use localtime::{LocalDate, LocalDateTime};
use serde::Deserialize;

#[test]
fn date_serializes_to_storage_format() {
    let d = LocalDate::new(2023, 4, 1);
    assert_eq!(serde_json::to_string(&d).unwrap(), r#""2023-04-01""#);
}

#[test]
fn date_deserializes_from_storage_format() {
    let d: LocalDate = serde_json::from_str(r#""2023-04-01""#).unwrap();
    assert_eq!(d, LocalDate::new(2023, 4, 1));
}

#[test]
fn date_rejects_display_format() {
    assert!(serde_json::from_str::<LocalDate>(r#""1.4.2023""#).is_err());
}

#[test]
fn date_null_leaves_value_in_place() {
    let mut d = LocalDate::new(2023, 4, 1);
    let mut de = serde_json::Deserializer::from_str("null");
    LocalDate::deserialize_in_place(&mut de, &mut d).unwrap();
    assert_eq!(d, LocalDate::new(2023, 4, 1));
}

#[test]
fn date_null_decodes_to_zero_without_prior_value() {
    let d: LocalDate = serde_json::from_str("null").unwrap();
    assert_eq!(d, LocalDate::ZERO);
}

#[test]
fn datetime_round_trips_through_json() {
    let t = LocalDateTime::new(2023, 4, 1, 7, 5, 9);
    let json = serde_json::to_string(&t).unwrap();
    assert_eq!(json, r#""2023-04-01 07:05:09""#);
    let back: LocalDateTime = serde_json::from_str(&json).unwrap();
    assert_eq!(back, t);
}

#[test]
fn datetime_tolerates_trailing_precision() {
    let t: LocalDateTime = serde_json::from_str(r#""2023-04-01 07:05:09.123""#).unwrap();
    assert_eq!(t, LocalDateTime::new(2023, 4, 1, 7, 5, 9));
}

#[test]
fn datetime_null_leaves_value_in_place() {
    let mut t = LocalDateTime::new(2023, 4, 1, 7, 5, 9);
    let mut de = serde_json::Deserializer::from_str("null");
    LocalDateTime::deserialize_in_place(&mut de, &mut t).unwrap();
    assert_eq!(t, LocalDateTime::new(2023, 4, 1, 7, 5, 9));
    assert!(!t.is_zero());
}

#[test]
fn types_embed_in_structs() {
    #[derive(Deserialize, Debug, PartialEq)]
    struct Booking {
        day: LocalDate,
        created_at: LocalDateTime,
    }

    let booking: Booking = serde_json::from_str(
        r#"{"day": "2023-04-01", "created_at": "2023-04-01 07:05:09"}"#,
    )
    .unwrap();
    assert_eq!(booking.day, LocalDate::new(2023, 4, 1));
    assert_eq!(booking.created_at, LocalDateTime::new(2023, 4, 1, 7, 5, 9));
}
