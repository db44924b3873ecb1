use std::{fmt, rc::Rc};

use crate::runtime::{table::Table, table_key::TableKey};

/// Value on the scripting side of the bridge.
///
/// Primitives stay unboxed; text and tables use `Rc` so cloning a value that
/// crosses the boundary repeatedly is O(1).
///
/// Composite host values never appear here directly: they are lifted into
/// [`Table`] first, so a `Value` is always either a primitive or a table.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// 64-bit signed integer.
    Integer(i64),
    /// 64-bit floating point number.
    Float(f64),
    /// Boolean value.
    Boolean(bool),
    /// UTF-8 string value.
    String(Rc<str>),
    /// Absence of value.
    None,
    /// Nested table.
    Table(Rc<Table>),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{:?}", v),
            Value::Boolean(v) => write!(f, "{}", v),
            Value::String(v) => write!(f, "\"{}\"", v),
            Value::None => write!(f, "nil"),
            Value::Table(table) => write!(f, "{}", table),
        }
    }
}

impl Value {
    /// Returns the runtime type label used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "Int",
            Value::Float(_) => "Float",
            Value::Boolean(_) => "Bool",
            Value::String(_) => "String",
            Value::None => "None",
            Value::Table(_) => "Table",
        }
    }

    /// Classifies this value as a key of one of the ordered partitions.
    ///
    /// Returns `None` for `None` and for tables; the table store rejects the
    /// former and routes the latter to its fallback partition.
    pub fn to_table_key(&self) -> Option<TableKey> {
        match self {
            Value::Integer(v) => Some(TableKey::Integer(*v)),
            Value::Float(v) => Some(TableKey::float(*v)),
            Value::String(v) => Some(TableKey::String(v.clone())),
            Value::Boolean(v) => Some(TableKey::Boolean(*v)),
            Value::None | Value::Table(_) => None,
        }
    }

    pub fn as_table(&self) -> Option<&Rc<Table>> {
        match self {
            Value::Table(table) => Some(table),
            _ => None,
        }
    }

    /// Identity comparison used by the fallback partition: tables match only
    /// if they are the same allocation.
    pub fn same_identity(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Table(left), Value::Table(right)) => Rc::ptr_eq(left, right),
            _ => self == other,
        }
    }
}

impl From<TableKey> for Value {
    fn from(key: TableKey) -> Self {
        match key {
            TableKey::Integer(v) => Value::Integer(v),
            TableKey::Float(v) => Value::Float(v.get()),
            TableKey::String(v) => Value::String(v),
            TableKey::Boolean(v) => Value::Boolean(v),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.into())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value.into())
    }
}

impl From<Table> for Value {
    fn from(table: Table) -> Self {
        Value::Table(Rc::new(table))
    }
}
