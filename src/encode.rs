//! Provides [`Encode`] for encoding values for the database.
use crate::{error::EncodeError, Value};

/// Encode a single value to be sent to the database.
pub trait Encode {
    /// Converts `self` into the driver value expected by the database,
    /// consuming the value.
    fn encode(self) -> Result<Value, EncodeError>
    where
        Self: Sized;
}

impl<T> Encode for Option<T>
where
    T: Encode,
{
    fn encode(self) -> Result<Value, EncodeError> {
        if let Some(v) = self {
            v.encode()
        } else {
            Ok(Value::Null { type_info: None })
        }
    }
}
