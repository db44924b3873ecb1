use crate::runtime::{
    config::BridgeConfig, error::BridgeError, host_value::HostValue, table::Table,
    table_key::TableKey, value::Value,
};

/// Lifts a composite host value into a table, converting nested composites
/// depth-first.
///
/// Primitive input fails with [`BridgeError::NotComposite`]; use
/// [`lift_value`] when primitives should pass through.
pub fn lift_table(host: HostValue, config: &BridgeConfig) -> Result<Table, BridgeError> {
    lift_table_at(host, config, 1)
}

/// Lifts any host value: composites become tables, primitives pass through
/// unchanged.
pub fn lift_value(host: HostValue, config: &BridgeConfig) -> Result<Value, BridgeError> {
    lift_value_at(host, config, 1)
}

fn lift_value_at(
    host: HostValue,
    config: &BridgeConfig,
    depth: usize,
) -> Result<Value, BridgeError> {
    match host {
        HostValue::Null => Ok(Value::None),
        HostValue::Integer(v) => Ok(Value::Integer(v)),
        HostValue::Float(v) => Ok(Value::Float(v)),
        HostValue::Boolean(v) => Ok(Value::Boolean(v)),
        HostValue::String(v) => Ok(Value::String(v.into())),
        HostValue::Structured(json) => {
            let host = HostValue::from(json);
            if host.is_composite() {
                lift_table_at(host, config, depth).map(Value::from)
            } else {
                tracing::debug!(
                    kind = host.type_name(),
                    "structured value has no fields; passing through"
                );
                lift_value_at(host, config, depth)
            }
        }
        composite => lift_table_at(composite, config, depth).map(Value::from),
    }
}

fn lift_table_at(
    host: HostValue,
    config: &BridgeConfig,
    depth: usize,
) -> Result<Table, BridgeError> {
    if depth > config.max_depth {
        return Err(BridgeError::DepthExceeded {
            limit: config.max_depth,
        });
    }

    match host {
        HostValue::Sequence(items) => {
            let mut table = Table::new();
            for (index, item) in (1i64..).zip(items) {
                let value = lift_value_at(item, config, depth + 1)?;
                table.set_key(TableKey::Integer(index), value);
            }
            Ok(table)
        }
        HostValue::Map(entries) => {
            let mut table = Table::new();
            for (key, value) in entries {
                let key = lift_value_at(key, config, depth + 1)?;
                if let Value::Table(_) = key {
                    tracing::debug!("skipping map entry with a composite key");
                    continue;
                }
                let value = lift_value_at(value, config, depth + 1)?;
                table.set(key, value);
            }
            Ok(table)
        }
        HostValue::Structured(json) => {
            let host = HostValue::from(json);
            if host.is_composite() {
                lift_table_at(host, config, depth)
            } else {
                Err(BridgeError::NotComposite {
                    type_name: host.type_name(),
                })
            }
        }
        primitive => Err(BridgeError::NotComposite {
            type_name: primitive.type_name(),
        }),
    }
}

impl Table {
    /// Builds a table from a composite host value.
    pub fn from_host(host: HostValue, config: &BridgeConfig) -> Result<Table, BridgeError> {
        lift_table(host, config)
    }

    /// Inserts a host key/value pair, lifting both sides first.
    pub fn set_host(
        &mut self,
        key: HostValue,
        value: HostValue,
        config: &BridgeConfig,
    ) -> Result<(), BridgeError> {
        let key = lift_value(key, config)?;
        let value = lift_value(value, config)?;
        self.set(key, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde::Serialize;
    use serde_json::json;

    use super::*;
    use crate::runtime::table_key::KeyKind;

    #[derive(Serialize)]
    struct Account {
        id: u32,
        owner: String,
        tags: Vec<String>,
    }

    #[derive(Serialize)]
    struct Unit;

    #[derive(Serialize)]
    enum Color {
        Red,
    }

    fn config() -> BridgeConfig {
        BridgeConfig::default()
    }

    #[test]
    fn test_sequence_is_one_based() {
        let table = lift_table(HostValue::from(vec!["x", "y", "z"]), &config()).unwrap();
        assert_eq!(
            table.as_list(),
            vec![Value::from("x"), Value::from("y"), Value::from("z")]
        );
        assert_eq!(table.get(&Value::Integer(1)), Some(&Value::from("x")));
    }

    #[test]
    fn test_map_keys_keep_their_kind() {
        let mut map = BTreeMap::new();
        map.insert(2i64, "two");
        map.insert(1i64, "one");
        let table = lift_table(HostValue::from(map), &config()).unwrap();
        assert_eq!(table.partition_len(KeyKind::Integer), 2);
        assert_eq!(table.partition_len(KeyKind::String), 0);
        assert_eq!(table.as_list(), vec![Value::from("one"), Value::from("two")]);
    }

    #[test]
    fn test_nested_composites_become_tables() {
        let host = HostValue::from(json!({"a": 1, "b": [1, 2, 3]}));
        let table = lift_table(host, &config()).unwrap();
        assert_eq!(table.get_str("a"), Some(&Value::Integer(1)));
        let nested = table.get_str("b").and_then(Value::as_table).unwrap();
        assert_eq!(
            nested.as_list(),
            vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)]
        );
    }

    #[test]
    fn test_structured_object_decomposes_to_text_keys() {
        let account = Account {
            id: 7,
            owner: "ada".into(),
            tags: vec!["admin".into()],
        };
        let host = HostValue::from_serialize(&account).unwrap();
        let table = lift_table(host, &config()).unwrap();
        assert_eq!(table.get_str("id"), Some(&Value::Integer(7)));
        assert_eq!(table.get_str("owner"), Some(&Value::from("ada")));
        let tags = table.get_str("tags").and_then(Value::as_table).unwrap();
        assert_eq!(tags.as_list(), vec![Value::from("admin")]);
    }

    #[test]
    fn test_empty_decomposition_is_empty_table() {
        let host = HostValue::from_serialize(&json!({})).unwrap();
        let table = lift_table(host, &config()).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_primitives_are_not_composite() {
        let err = lift_table(HostValue::Integer(1), &config()).unwrap_err();
        assert!(matches!(err, BridgeError::NotComposite { type_name: "Int" }));
        assert!(err.is_recoverable());

        let unit = HostValue::from_serialize(&Unit).unwrap();
        assert!(lift_table(unit, &config()).unwrap_err().is_recoverable());
    }

    #[test]
    fn test_lift_value_passes_primitives_through() {
        assert_eq!(
            lift_value(HostValue::from("s"), &config()).unwrap(),
            Value::from("s")
        );
        assert_eq!(
            lift_value(HostValue::Null, &config()).unwrap(),
            Value::None
        );
        let color = HostValue::from_serialize(&Color::Red).unwrap();
        assert_eq!(lift_value(color, &config()).unwrap(), Value::from("Red"));
    }

    #[test]
    fn test_null_map_keys_are_dropped() {
        let host = HostValue::Map(vec![
            (HostValue::Null, HostValue::Integer(1)),
            (HostValue::from("kept"), HostValue::Integer(2)),
        ]);
        let table = lift_table(host, &config()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.fallback_len(), 0);
    }

    #[test]
    fn test_composite_map_keys_are_skipped() {
        let host = HostValue::Map(vec![
            (HostValue::from(vec![1, 2]), HostValue::from("pair")),
            (HostValue::from(json!({"k": 1})), HostValue::from("object")),
            (HostValue::from("plain"), HostValue::Integer(3)),
        ]);
        let table = lift_table(host, &config()).unwrap();
        assert_eq!(table.fallback_len(), 0);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get_str("plain"), Some(&Value::Integer(3)));
    }

    #[test]
    fn test_structured_fields_keep_declaration_order() {
        #[derive(Serialize)]
        struct Person {
            name: String,
            age: u32,
            city: String,
        }

        let person = Person {
            name: "Ada".into(),
            age: 36,
            city: "London".into(),
        };
        let table = lift_table(HostValue::from_serialize(&person).unwrap(), &config()).unwrap();
        let names: Vec<&str> = table.string_entries().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["name", "age", "city"]);

        let walked: Vec<TableKey> = table.pairs().map(|(key, _)| key).collect();
        assert_eq!(
            walked,
            vec![
                TableKey::from("name"),
                TableKey::from("age"),
                TableKey::from("city"),
            ]
        );
    }

    #[test]
    fn test_depth_limit() {
        let host = HostValue::from(json!([[[1]]]));
        let shallow = BridgeConfig::default().with_max_depth(2);
        let err = lift_table(host.clone(), &shallow).unwrap_err();
        assert!(matches!(err, BridgeError::DepthExceeded { limit: 2 }));
        assert!(!err.is_recoverable());

        let enough = BridgeConfig::default().with_max_depth(3);
        assert!(lift_table(host, &enough).is_ok());
    }

    #[test]
    fn test_set_host_lifts_value() {
        let mut table = Table::new();
        table
            .set_host(HostValue::from(5), HostValue::from(vec![1, 2]), &config())
            .unwrap();
        let nested = table.get(&Value::Integer(5)).and_then(Value::as_table).unwrap();
        assert_eq!(nested.as_list(), vec![Value::Integer(1), Value::Integer(2)]);
    }
}
