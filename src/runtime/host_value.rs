//! Host-side values, classified once at the conversion boundary.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::runtime::error::BridgeError;

/// A host value on its way into the table universe.
///
/// The variant is decided when the value is built; the lifter then matches it
/// exhaustively instead of probing the value's kind at each step.
#[derive(Debug, Clone, PartialEq)]
pub enum HostValue {
    Null,
    Integer(i64),
    Float(f64),
    Boolean(bool),
    String(String),
    /// Ordered collection; lifted under keys `1..=n`.
    Sequence(Vec<HostValue>),
    /// Associative collection; each key keeps its own kind.
    Map(Vec<(HostValue, HostValue)>),
    /// Arbitrary structured object already reduced to JSON by its
    /// `Serialize` impl.
    Structured(serde_json::Value),
}

impl HostValue {
    /// Decomposes any `Serialize` host object into structured form.
    pub fn from_serialize<T: Serialize + ?Sized>(object: &T) -> Result<Self, BridgeError> {
        serde_json::to_value(object)
            .map(HostValue::Structured)
            .map_err(|source| BridgeError::Decompose { source })
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            HostValue::Null => "Null",
            HostValue::Integer(_) => "Int",
            HostValue::Float(_) => "Float",
            HostValue::Boolean(_) => "Bool",
            HostValue::String(_) => "String",
            HostValue::Sequence(_) => "Sequence",
            HostValue::Map(_) => "Map",
            HostValue::Structured(_) => "Structured",
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(
            self,
            HostValue::Sequence(_) | HostValue::Map(_) | HostValue::Structured(_)
        )
    }
}

/// Reads a JSON tree into host form. Objects become text-keyed maps, arrays
/// become sequences.
impl From<serde_json::Value> for HostValue {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => HostValue::Null,
            serde_json::Value::Bool(v) => HostValue::Boolean(v),
            serde_json::Value::Number(n) => {
                if let Some(v) = n.as_i64() {
                    HostValue::Integer(v)
                } else {
                    // Unsigned values past i64::MAX have no integer slot.
                    HostValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(v) => HostValue::String(v),
            serde_json::Value::Array(items) => {
                HostValue::Sequence(items.into_iter().map(HostValue::from).collect())
            }
            serde_json::Value::Object(fields) => HostValue::Map(
                fields
                    .into_iter()
                    .map(|(name, value)| (HostValue::String(name), HostValue::from(value)))
                    .collect(),
            ),
        }
    }
}

macro_rules! host_integer {
    ($($ty:ty),*) => {
        $(impl From<$ty> for HostValue {
            fn from(value: $ty) -> Self {
                HostValue::Integer(i64::from(value))
            }
        })*
    };
}

host_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for HostValue {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(v) => HostValue::Integer(v),
            Err(_) => HostValue::Float(value as f64),
        }
    }
}

impl From<usize> for HostValue {
    fn from(value: usize) -> Self {
        HostValue::from(value as u64)
    }
}

impl From<isize> for HostValue {
    fn from(value: isize) -> Self {
        HostValue::Integer(value as i64)
    }
}

impl From<f32> for HostValue {
    fn from(value: f32) -> Self {
        HostValue::Float(f64::from(value))
    }
}

impl From<f64> for HostValue {
    fn from(value: f64) -> Self {
        HostValue::Float(value)
    }
}

impl From<bool> for HostValue {
    fn from(value: bool) -> Self {
        HostValue::Boolean(value)
    }
}

impl From<&str> for HostValue {
    fn from(value: &str) -> Self {
        HostValue::String(value.to_string())
    }
}

impl From<String> for HostValue {
    fn from(value: String) -> Self {
        HostValue::String(value)
    }
}

impl<T: Into<HostValue>> From<Option<T>> for HostValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(HostValue::Null, Into::into)
    }
}

impl<T: Into<HostValue>> From<Vec<T>> for HostValue {
    fn from(items: Vec<T>) -> Self {
        HostValue::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<HostValue>, V: Into<HostValue>> From<BTreeMap<K, V>> for HostValue {
    fn from(map: BTreeMap<K, V>) -> Self {
        HostValue::Map(map.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K: Into<HostValue>, V: Into<HostValue>, S> From<HashMap<K, V, S>> for HostValue {
    fn from(map: HashMap<K, V, S>) -> Self {
        HostValue::Map(map.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;
    use serde_json::json;

    use super::*;

    #[derive(Serialize)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[test]
    fn test_integer_widths_are_canonical() {
        assert_eq!(HostValue::from(7u8), HostValue::Integer(7));
        assert_eq!(HostValue::from(-7i32), HostValue::Integer(-7));
        assert_eq!(HostValue::from(7usize), HostValue::Integer(7));
        assert_eq!(
            HostValue::from(u64::MAX),
            HostValue::Float(u64::MAX as f64)
        );
    }

    #[test]
    fn test_json_numbers() {
        assert_eq!(HostValue::from(json!(3)), HostValue::Integer(3));
        assert_eq!(HostValue::from(json!(3.25)), HostValue::Float(3.25));
        assert_eq!(
            HostValue::from(json!(u64::MAX)),
            HostValue::Float(u64::MAX as f64)
        );
    }

    #[test]
    fn test_json_object_becomes_text_keyed_map() {
        let host = HostValue::from(json!({"a": [1, 2]}));
        assert_eq!(
            host,
            HostValue::Map(vec![(
                HostValue::from("a"),
                HostValue::Sequence(vec![HostValue::Integer(1), HostValue::Integer(2)])
            )])
        );
    }

    #[test]
    fn test_from_serialize() {
        let host = HostValue::from_serialize(&Point { x: 1, y: 2 }).unwrap();
        assert_eq!(host, HostValue::Structured(json!({"x": 1, "y": 2})));
        assert!(host.is_composite());
    }

    #[test]
    fn test_from_serialize_rejects_non_string_map_keys() {
        let mut map = HashMap::new();
        map.insert((1, 2), "pair");
        let err = HostValue::from_serialize(&map).unwrap_err();
        assert!(matches!(err, BridgeError::Decompose { .. }));
    }

    #[test]
    fn test_option_maps_to_null() {
        assert_eq!(HostValue::from(None::<i64>), HostValue::Null);
        assert_eq!(HostValue::from(Some("x")), HostValue::from("x"));
    }
}
