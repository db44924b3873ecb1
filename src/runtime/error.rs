//! Error taxonomy for the value bridge.

use std::{error::Error, fmt};

/// Failure raised while moving values between the host and the table universe.
///
/// Each kind carries a stable code so callers (the scripting adapter, the host
/// projection caller) can react to them separately.
#[derive(Debug)]
pub enum BridgeError {
    /// The value is already primitive and has no table form. Recoverable:
    /// converters treat it as "leave the value as-is".
    NotComposite { type_name: &'static str },
    /// `next_key` was handed a key that is not present in the table.
    UnknownKey { key: String },
    /// The text-keyed partition could not be decoded into the requested shape.
    Projection {
        shape: &'static str,
        source: serde_json::Error,
    },
    /// A `Serialize` host object could not be decomposed into key/value form.
    Decompose { source: serde_json::Error },
    /// Lifting recursed deeper than the configured limit.
    DepthExceeded { limit: usize },
    /// A result handed to `to_host`/`to_list` is not a table.
    NotATable { type_name: &'static str },
}

impl BridgeError {
    pub fn code(&self) -> &'static str {
        match self {
            BridgeError::NotComposite { .. } => "E2001",
            BridgeError::UnknownKey { .. } => "E2002",
            BridgeError::Projection { .. } => "E2003",
            BridgeError::Decompose { .. } => "E2004",
            BridgeError::DepthExceeded { .. } => "E2005",
            BridgeError::NotATable { .. } => "E2006",
        }
    }

    /// Returns whether converters may swallow this error and pass the value through.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, BridgeError::NotComposite { .. })
    }
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] ", self.code())?;
        match self {
            BridgeError::NotComposite { type_name } => {
                write!(f, "cannot build a table from a {} value", type_name)
            }
            BridgeError::UnknownKey { key } => {
                write!(f, "unknown key passed to next_key: {}", key)
            }
            BridgeError::Projection { shape, source } => {
                write!(f, "projection into `{}` failed: {}", shape, source)
            }
            BridgeError::Decompose { source } => {
                write!(f, "cannot decompose host object: {}", source)
            }
            BridgeError::DepthExceeded { limit } => {
                write!(f, "host value nested deeper than {} levels", limit)
            }
            BridgeError::NotATable { type_name } => {
                write!(f, "expected a table result, got {}", type_name)
            }
        }
    }
}

impl Error for BridgeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            BridgeError::Projection { source, .. } | BridgeError::Decompose { source } => {
                Some(source)
            }
            _ => None,
        }
    }
}
