use std::any::type_name;

use serde::de::DeserializeOwned;

use crate::runtime::{error::BridgeError, table::Table, value::Value};

/// Projects the text-keyed partition of `table` into a host value of shape `T`.
///
/// Entries are encoded as a JSON object keyed by field name and decoded with
/// `T`'s own field names. Nested tables go through the same encoding, so
/// their text keys must match the nested shape as well. Integer, float and
/// boolean keys are ignored; use [`Table::as_list`] for positional data.
pub fn project<T: DeserializeOwned>(table: &Table) -> Result<T, BridgeError> {
    serde_json::from_value(text_fields_to_json(table)).map_err(|source| {
        BridgeError::Projection {
            shape: type_name::<T>(),
            source,
        }
    })
}

/// JSON object holding the text-keyed entries of `table`, recursively.
pub fn text_fields_to_json(table: &Table) -> serde_json::Value {
    let fields = table
        .string_entries()
        .map(|(name, value)| (name.to_string(), value_to_json(value)))
        .collect();
    serde_json::Value::Object(fields)
}

fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Integer(v) => serde_json::Value::from(*v),
        Value::Float(v) => match serde_json::Number::from_f64(*v) {
            Some(number) => serde_json::Value::Number(number),
            None => {
                tracing::warn!(value = *v, "non-finite float projected as null");
                serde_json::Value::Null
            }
        },
        Value::Boolean(v) => serde_json::Value::Bool(*v),
        Value::String(v) => serde_json::Value::String(v.to_string()),
        Value::None => serde_json::Value::Null,
        Value::Table(table) => text_fields_to_json(table),
    }
}

impl Table {
    /// See [`project`].
    pub fn project<T: DeserializeOwned>(&self) -> Result<T, BridgeError> {
        project(self)
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;
    use crate::runtime::{config::BridgeConfig, convert::lift_table, host_value::HostValue};

    #[derive(Debug, Deserialize, PartialEq)]
    struct Point {
        x: i64,
        y: f64,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Segment {
        label: String,
        start: Point,
    }

    #[derive(Debug, Deserialize)]
    struct WithList {
        #[allow(dead_code)]
        items: Vec<i64>,
    }

    fn lift(json: serde_json::Value) -> Table {
        lift_table(HostValue::from(json), &BridgeConfig::default()).unwrap()
    }

    #[test]
    fn test_flat_projection() {
        let table = lift(json!({"x": 3, "y": 1.5}));
        assert_eq!(table.project::<Point>().unwrap(), Point { x: 3, y: 1.5 });
    }

    #[test]
    fn test_nested_table_projects_by_text_keys() {
        let table = lift(json!({"label": "a", "start": {"x": 0, "y": 2.0}}));
        assert_eq!(
            table.project::<Segment>().unwrap(),
            Segment {
                label: "a".into(),
                start: Point { x: 0, y: 2.0 },
            }
        );
    }

    #[test]
    fn test_non_text_partitions_are_ignored() {
        let mut table = lift(json!({"x": 1, "y": 0.0}));
        table.set(Value::Integer(1), Value::from("ignored"));
        table.set(Value::Boolean(true), Value::from("ignored"));
        assert_eq!(
            text_fields_to_json(&table),
            json!({"x": 1, "y": 0.0})
        );
    }

    #[test]
    fn test_missing_field_is_projection_error() {
        let table = lift(json!({"x": 1}));
        let err = table.project::<Point>().unwrap_err();
        match err {
            BridgeError::Projection { shape, .. } => assert!(shape.ends_with("Point")),
            other => panic!("expected projection error, got {other:?}"),
        }
    }

    #[test]
    fn test_incompatible_kind_is_projection_error() {
        let table = lift(json!({"x": "three", "y": 1.0}));
        assert!(matches!(
            table.project::<Point>(),
            Err(BridgeError::Projection { .. })
        ));
    }

    #[test]
    fn test_nested_sequence_is_not_unwrapped() {
        let table = lift(json!({"items": [1, 2, 3]}));
        assert!(matches!(
            table.project::<WithList>(),
            Err(BridgeError::Projection { .. })
        ));
    }

    #[test]
    fn test_non_finite_float_becomes_null() {
        let mut table = Table::new();
        table.set(Value::from("x"), Value::Float(f64::INFINITY));
        assert_eq!(text_fields_to_json(&table), json!({"x": null}));
    }
}
