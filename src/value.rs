//! Value types and conversions for sqlcrud

/// A database-bound value.
///
/// This is the parameter type handed to the executing collaborator and the
/// type compared against field defaults in the auto-increment check.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Null value (SQL NULL)
    Null,
    /// 64-bit signed integer
    Integer(i64),
    /// 64-bit floating point number
    Real(f64),
    /// UTF-8 text string
    Text(String),
    /// Binary data
    Blob(Vec<u8>),
}

/// Declared kind of a mapped field.
///
/// The kind is used for exactly one thing: obtaining the field's default
/// value when validating and checking auto-increment fields. `Integer` and
/// `Float` are value kinds with well-defined defaults; `Text` and `Blob`
/// are reference kinds and cannot be auto-increment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldType {
    /// 64-bit signed integer (also used for booleans)
    Integer,
    /// 64-bit floating point number
    Float,
    /// UTF-8 text string
    Text,
    /// Binary data
    Blob,
}

impl FieldType {
    /// The default value for this kind, or `None` for reference kinds.
    pub fn default_value(&self) -> Option<Value> {
        match self {
            FieldType::Integer => Some(Value::Integer(0)),
            FieldType::Float => Some(Value::Real(0.0)),
            FieldType::Text | FieldType::Blob => None,
        }
    }
}

/// Trait for converting Rust types into database values
///
/// Implemented for the common primitive types so record fields can be bound
/// as parameters. Custom field types can implement this trait to be used
/// with the derive macro.
///
/// # Example
///
/// ```ignore
/// use sqlcrud::IntoValue;
///
/// let value: Value = 42i64.into_value();
/// let text: Value = "hello".into_value();
/// ```
pub trait IntoValue {
    /// Convert this value into a database [`Value`]
    fn into_value(self) -> Value;
}

// Implement IntoValue for common types

impl IntoValue for i64 {
    fn into_value(self) -> Value {
        Value::Integer(self)
    }
}

impl IntoValue for i32 {
    fn into_value(self) -> Value {
        Value::Integer(self as i64)
    }
}

impl IntoValue for i16 {
    fn into_value(self) -> Value {
        Value::Integer(self as i64)
    }
}

impl IntoValue for i8 {
    fn into_value(self) -> Value {
        Value::Integer(self as i64)
    }
}

impl IntoValue for u32 {
    fn into_value(self) -> Value {
        Value::Integer(self as i64)
    }
}

impl IntoValue for u16 {
    fn into_value(self) -> Value {
        Value::Integer(self as i64)
    }
}

impl IntoValue for u8 {
    fn into_value(self) -> Value {
        Value::Integer(self as i64)
    }
}

impl IntoValue for f64 {
    fn into_value(self) -> Value {
        Value::Real(self)
    }
}

impl IntoValue for f32 {
    fn into_value(self) -> Value {
        Value::Real(self as f64)
    }
}

impl IntoValue for String {
    fn into_value(self) -> Value {
        Value::Text(self)
    }
}

impl IntoValue for &str {
    fn into_value(self) -> Value {
        Value::Text(self.to_string())
    }
}

impl IntoValue for Vec<u8> {
    fn into_value(self) -> Value {
        Value::Blob(self)
    }
}

impl IntoValue for &[u8] {
    fn into_value(self) -> Value {
        Value::Blob(self.to_vec())
    }
}

impl IntoValue for bool {
    fn into_value(self) -> Value {
        Value::Integer(if self { 1 } else { 0 })
    }
}

impl<T: IntoValue> IntoValue for Option<T> {
    fn into_value(self) -> Value {
        match self {
            Some(v) => v.into_value(),
            None => Value::Null,
        }
    }
}

impl IntoValue for Value {
    fn into_value(self) -> Value {
        self
    }
}

// Optional chrono support
#[cfg(feature = "with-chrono")]
mod chrono_impl {
    use chrono::DateTime;
    use chrono::NaiveDate;
    use chrono::NaiveDateTime;
    use chrono::NaiveTime;
    use chrono::Utc;

    use super::*;

    impl IntoValue for NaiveDateTime {
        fn into_value(self) -> Value {
            Value::Text(self.format("%Y-%m-%d %H:%M:%S").to_string())
        }
    }

    impl IntoValue for NaiveDate {
        fn into_value(self) -> Value {
            Value::Text(self.format("%Y-%m-%d").to_string())
        }
    }

    impl IntoValue for NaiveTime {
        fn into_value(self) -> Value {
            Value::Text(self.format("%H:%M:%S").to_string())
        }
    }

    impl IntoValue for DateTime<Utc> {
        fn into_value(self) -> Value {
            Value::Text(self.to_rfc3339())
        }
    }
}

// Optional uuid support
#[cfg(feature = "with-uuid")]
mod uuid_impl {
    use uuid::Uuid;

    use super::*;

    impl IntoValue for Uuid {
        fn into_value(self) -> Value {
            Value::Text(self.to_string())
        }
    }
}
