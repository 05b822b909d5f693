//! # Serialization
//!
//! Entities convert to and from a flat keyed [`Record`] of primitive values. Every
//! record carries a `"_type"` discriminator naming its kind, so a record can be
//! recognized without knowing where it came from.
//!
//! Decoding is strict per entity: a required key which is absent or of the wrong
//! primitive type fails the whole entity with [`Error::MissingField`]. Containers
//! decode their child lists leniently through [`decode_list`], keeping whatever
//! decodes and reporting the rest as [`DecodeDiagnostic`]s.

use serde_json::Value;

use crate::geometry::Point;

/// A flat keyed record. Values are numbers, strings, bools, nested records, or lists.
pub type Record = serde_json::Map<String, Value>;

/// Key of the kind discriminator present in every record.
pub const TYPE_KEY: &str = "_type";

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("field `{0}` is missing or has the wrong type")]
    MissingField(String),
    #[error("expected a `{expected}` record, found `{found}`")]
    InvalidProjectObject {
        expected: &'static str,
        found: String,
    },
    #[error("field `{0}` is not a finite number")]
    NonFiniteNumber(String),
}

pub trait Serializable: Sized {
    /// Value written to, and expected in, the `"_type"` key.
    const TYPE: &'static str;
    /// Flatten into a record. Fails only if some value has no representation.
    fn serialize(&self) -> Result<Record, Error>;
    /// Rebuild from a record produced by [`Serializable::serialize`].
    fn construct(record: &Record) -> Result<Self, Error>;
}

/// A fresh record holding only the discriminator for `S`.
#[must_use]
pub fn record_for<S: Serializable>() -> Record {
    let mut record = Record::new();
    record.insert(TYPE_KEY.to_owned(), Value::String(S::TYPE.to_owned()));
    record
}

/// Check the discriminator, if any, names `S`. Records without one are accepted.
pub fn check_type<S: Serializable>(record: &Record) -> Result<(), Error> {
    match record.get(TYPE_KEY) {
        None => Ok(()),
        Some(Value::String(found)) if found == S::TYPE => Ok(()),
        Some(Value::String(found)) => Err(Error::InvalidProjectObject {
            expected: S::TYPE,
            found: found.clone(),
        }),
        Some(_) => Err(Error::MissingField(TYPE_KEY.to_owned())),
    }
}

/// Encode a float, refusing NaN and infinities which the format cannot carry.
pub fn number(key: &str, value: f32) -> Result<Value, Error> {
    serde_json::Number::from_f64(f64::from(value))
        .map(Value::Number)
        .ok_or_else(|| Error::NonFiniteNumber(key.to_owned()))
}

pub fn point_value(key: &str, point: Point) -> Result<Value, Error> {
    let mut record = Record::new();
    record.insert("x".to_owned(), number(key, point.x)?);
    record.insert("y".to_owned(), number(key, point.y)?);
    Ok(Value::Object(record))
}

/// Decode a point stored under `key`. A value which isn't a record is reported against `key`.
pub fn point_from_value(key: &str, value: &Value) -> Result<Point, Error> {
    let record = value
        .as_object()
        .ok_or_else(|| Error::MissingField(key.to_owned()))?;
    Ok(Point::new(record.require_f32("x")?, record.require_f32("y")?))
}

/// Typed access to the fields of a [`Record`].
pub trait RecordExt {
    fn require_i64(&self, key: &str) -> Result<i64, Error>;
    /// A number, narrowed to `f32`. Values that overflow `f32` are rejected.
    fn require_f32(&self, key: &str) -> Result<f32, Error>;
    fn require_str(&self, key: &str) -> Result<&str, Error>;
    fn require_record(&self, key: &str) -> Result<&Record, Error>;
    fn require_list(&self, key: &str) -> Result<&[Value], Error>;
    fn require_uuid(&self, key: &str) -> Result<uuid::Uuid, Error>;
    /// A list, or empty if the key is absent or not a list.
    fn list_or_empty(&self, key: &str) -> &[Value];
}
impl RecordExt for Record {
    fn require_i64(&self, key: &str) -> Result<i64, Error> {
        self.get(key)
            .and_then(Value::as_i64)
            .ok_or_else(|| Error::MissingField(key.to_owned()))
    }
    fn require_f32(&self, key: &str) -> Result<f32, Error> {
        let wide = self
            .get(key)
            .and_then(Value::as_f64)
            .ok_or_else(|| Error::MissingField(key.to_owned()))?;
        #[allow(clippy::cast_possible_truncation)]
        let narrow = wide as f32;
        if narrow.is_finite() {
            Ok(narrow)
        } else {
            Err(Error::NonFiniteNumber(key.to_owned()))
        }
    }
    fn require_str(&self, key: &str) -> Result<&str, Error> {
        self.get(key)
            .and_then(Value::as_str)
            .ok_or_else(|| Error::MissingField(key.to_owned()))
    }
    fn require_record(&self, key: &str) -> Result<&Record, Error> {
        self.get(key)
            .and_then(Value::as_object)
            .ok_or_else(|| Error::MissingField(key.to_owned()))
    }
    fn require_list(&self, key: &str) -> Result<&[Value], Error> {
        self.get(key)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::MissingField(key.to_owned()))
    }
    fn require_uuid(&self, key: &str) -> Result<uuid::Uuid, Error> {
        self.require_str(key)?
            .parse()
            .map_err(|_| Error::MissingField(key.to_owned()))
    }
    fn list_or_empty(&self, key: &str) -> &[Value] {
        self.get(key)
            .and_then(Value::as_array)
            .map_or(&[], Vec::as_slice)
    }
}

/// A child record that was dropped during a lenient decode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeDiagnostic {
    /// Name of the list the record was in.
    pub list: &'static str,
    /// Position of the record within that list.
    pub position: usize,
    pub error: Error,
}
impl std::fmt::Display for DecodeDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]: {}", self.list, self.position, self.error)
    }
}

/// The survivors of a lenient decode, in their original order.
#[derive(Debug)]
pub struct Decoded<T> {
    pub items: Vec<T>,
    pub diagnostics: Vec<DecodeDiagnostic>,
}

/// Decode each element of `values` on its own. Elements which fail are logged and
/// reported in [`Decoded::diagnostics`] instead of failing the list.
pub fn decode_list<T: Serializable>(list: &'static str, values: &[Value]) -> Decoded<T> {
    let mut items = Vec::with_capacity(values.len());
    let mut diagnostics = Vec::new();
    for (position, value) in values.iter().enumerate() {
        let result = match value.as_object() {
            Some(record) => T::construct(record),
            None => Err(Error::InvalidProjectObject {
                expected: T::TYPE,
                found: "non-record value".to_owned(),
            }),
        };
        match result {
            Ok(item) => items.push(item),
            Err(error) => {
                log::warn!("dropping {list}[{position}]: {error}");
                diagnostics.push(DecodeDiagnostic {
                    list,
                    position,
                    error,
                });
            }
        }
    }
    Decoded { items, diagnostics }
}
