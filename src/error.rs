//! Error types produced at the value-conversion boundaries.

use crate::SqlDataType;

#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    /// The driver handed back a value of a type we cannot convert from.
    #[error("incompatible source data type: {0}")]
    DataType(SqlDataType),
    #[error("decoding conversion error: {0}")]
    Conversion(String),
}

impl From<String> for DecodeError {
    fn from(err: String) -> Self {
        DecodeError::Conversion(err)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum EncodeError {
    #[error("encoding conversion error: {0}")]
    Conversion(String),
}
