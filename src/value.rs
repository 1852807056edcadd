use std::fmt::{self, Display, Formatter};

use time::OffsetDateTime;

use crate::error::DecodeError;

/// Data types a driver layer can hand to or receive from a column binding.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
pub enum SqlDataType {
    Null,
    Int,
    Float,
    Text,
    Blob,
    Datetime,
}

impl Display for SqlDataType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl SqlDataType {
    pub fn name(&self) -> &str {
        match self {
            SqlDataType::Null => "NULL",
            SqlDataType::Int => "INTEGER",
            SqlDataType::Float => "REAL",
            SqlDataType::Text => "TEXT",
            SqlDataType::Blob => "BLOB",
            SqlDataType::Datetime => "DATETIME",
        }
    }
}

/// A database value plus optional declared type information.
#[derive(Clone, Debug)]
pub enum Value {
    Null {
        type_info: Option<SqlDataType>,
    },
    Integer {
        value: i64,
        type_info: Option<SqlDataType>,
    },
    Double {
        value: f64,
        type_info: Option<SqlDataType>,
    },
    Text {
        value: String,
        type_info: Option<SqlDataType>,
    },
    Blob {
        value: Vec<u8>,
        type_info: Option<SqlDataType>,
    },
    /// A native time value produced by a driver that decodes timestamps
    /// itself before handing them to the binding layer.
    Datetime {
        value: OffsetDateTime,
        type_info: Option<SqlDataType>,
    },
}

impl Value {
    pub fn text(&self) -> Result<&str, DecodeError> {
        match self {
            Value::Text { value, .. } => Ok(value),
            Value::Blob { value, .. } => {
                std::str::from_utf8(value).map_err(|e| DecodeError::Conversion(e.to_string()))
            }
            _ => Err(DecodeError::Conversion("not text".into())),
        }
    }

    pub fn type_info(&self) -> SqlDataType {
        match self {
            Value::Null { type_info } => type_info.unwrap_or(SqlDataType::Null),
            Value::Integer { type_info, .. } => type_info.unwrap_or(SqlDataType::Int),
            Value::Double { type_info, .. } => type_info.unwrap_or(SqlDataType::Float),
            Value::Text { type_info, .. } => type_info.unwrap_or(SqlDataType::Text),
            Value::Blob { type_info, .. } => type_info.unwrap_or(SqlDataType::Blob),
            Value::Datetime { type_info, .. } => type_info.unwrap_or(SqlDataType::Datetime),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null { .. })
    }
}
