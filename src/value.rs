//! Decoded field values.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};

/// A single decoded field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Text(String),
    Timestamp(DateTime<Utc>),
    Bytes(Vec<u8>),
    Array(Vec<Value>),
}

/// Coarse type of a value, used to keep table columns uniform.
///
/// Signed and unsigned integers share a kind; integers and floats do not,
/// so a column cannot silently mix exact and scaled values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Integer,
    Float,
    Text,
    Timestamp,
    Bytes,
    Array,
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Unsigned(_) | Value::Signed(_) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Float,
            Value::Text(_) => ValueKind::Text,
            Value::Timestamp(_) => ValueKind::Timestamp,
            Value::Bytes(_) => ValueKind::Bytes,
            Value::Array(_) => ValueKind::Array,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unsigned(v) => write!(f, "{v}"),
            Value::Signed(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Text(v) => f.write_str(v),
            Value::Timestamp(v) => f.write_str(&v.to_rfc3339_opts(SecondsFormat::Secs, true)),
            Value::Bytes(v) => {
                for b in v {
                    write!(f, "{b:02x}")?;
                }
                Ok(())
            }
            Value::Array(vs) => {
                for (i, v) in vs.iter().enumerate() {
                    if i != 0 {
                        f.write_str(";")?;
                    }
                    write!(f, "{v}")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats() {
        assert_eq!(Value::Unsigned(42).to_string(), "42");
        assert_eq!(Value::Signed(-7).to_string(), "-7");
        assert_eq!(Value::Float(123.45).to_string(), "123.45");
        assert_eq!(Value::Text("run".into()).to_string(), "run");
        assert_eq!(Value::Bytes(vec![0x0A, 0xFF]).to_string(), "0aff");
        assert_eq!(
            Value::Array(vec![Value::Unsigned(1), Value::Unsigned(2)]).to_string(),
            "1;2"
        );

        let timestamp = DateTime::from_timestamp(1_631_065_600, 0).unwrap();
        assert_eq!(
            Value::Timestamp(timestamp).to_string(),
            "2021-09-08T01:46:40Z"
        );
    }

    #[test]
    fn kinds_partition_values() {
        assert_eq!(Value::Unsigned(1).kind(), Value::Signed(-1).kind());
        assert_ne!(Value::Unsigned(1).kind(), Value::Float(1.0).kind());
        assert_ne!(Value::Text("a".into()).kind(), Value::Bytes(vec![0]).kind());
    }
}
