//! Calendar date and local timestamp value types for database columns.
//!
//! [`LocalDate`] is a calendar date with no time-of-day component;
//! [`LocalDateTime`] adds a time-of-day at one-second resolution. Both are
//! normalized to UTC, serialize to a fixed storage format for JSON and SQL
//! exchange, and render a distinct human-readable format via [`Display`].
//!
//! [`Display`]: std::fmt::Display

pub mod decode;
pub mod encode;
pub mod types;

mod dialect;
mod error;
mod value;

pub use crate::{
    decode::Decode,
    dialect::Dialect,
    encode::Encode,
    error::{DecodeError, EncodeError},
    types::{LocalDate, LocalDateTime},
    value::{SqlDataType, Value},
};
