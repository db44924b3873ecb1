use std::{
    fmt,
    hash::{Hash, Hasher},
    rc::Rc,
};

/// Partition selector for a table key.
///
/// The declaration order is the traversal precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KeyKind {
    Integer,
    Float,
    String,
    Boolean,
}

impl KeyKind {
    /// Partitions in traversal precedence order.
    pub const ORDER: [KeyKind; 4] = [
        KeyKind::Integer,
        KeyKind::Float,
        KeyKind::String,
        KeyKind::Boolean,
    ];

    /// The partitions that follow this one in precedence order.
    pub fn following(self) -> &'static [KeyKind] {
        match self {
            KeyKind::Integer => &Self::ORDER[1..],
            KeyKind::Float => &Self::ORDER[2..],
            KeyKind::String => &Self::ORDER[3..],
            KeyKind::Boolean => &[],
        }
    }
}

/// Double-precision key compared by canonical bit pattern.
///
/// `-0.0` is folded into `0.0` and every NaN into a single NaN, so the key is
/// usable in hashed lookups.
#[derive(Debug, Clone, Copy)]
pub struct FloatKey(f64);

impl FloatKey {
    pub fn new(value: f64) -> Self {
        if value == 0.0 {
            FloatKey(0.0)
        } else if value.is_nan() {
            FloatKey(f64::NAN)
        } else {
            FloatKey(value)
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl PartialEq for FloatKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for FloatKey {}

impl Hash for FloatKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

/// A key accepted by one of the four ordered partitions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TableKey {
    Integer(i64),
    Float(FloatKey),
    String(Rc<str>),
    Boolean(bool),
}

impl TableKey {
    pub fn kind(&self) -> KeyKind {
        match self {
            TableKey::Integer(_) => KeyKind::Integer,
            TableKey::Float(_) => KeyKind::Float,
            TableKey::String(_) => KeyKind::String,
            TableKey::Boolean(_) => KeyKind::Boolean,
        }
    }

    pub fn float(value: f64) -> Self {
        TableKey::Float(FloatKey::new(value))
    }
}

impl From<i64> for TableKey {
    fn from(value: i64) -> Self {
        TableKey::Integer(value)
    }
}

impl From<f64> for TableKey {
    fn from(value: f64) -> Self {
        TableKey::float(value)
    }
}

impl From<bool> for TableKey {
    fn from(value: bool) -> Self {
        TableKey::Boolean(value)
    }
}

impl From<&str> for TableKey {
    fn from(value: &str) -> Self {
        TableKey::String(value.into())
    }
}

impl fmt::Display for TableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKey::Integer(v) => write!(f, "{}", v),
            TableKey::Float(v) => write!(f, "{:?}", v.get()),
            TableKey::String(v) => write!(f, "\"{}\"", v),
            TableKey::Boolean(v) => write!(f, "{}", v),
        }
    }
}
