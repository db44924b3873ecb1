//! Value bridge between host values and the scripting runtime's tables.
//!
//! # No-Cycle Invariant
//! Tables are shared through `Rc` and built from owned [`HostValue`] trees,
//! so lifted graphs are acyclic. The lifter still bounds its recursion by
//! [`BridgeConfig::max_depth`] and fails with
//! [`BridgeError::DepthExceeded`] past it.
//!
//! Nothing in this module is `Send`: one invocation, one set of tables.

pub mod bridge;
pub mod config;
pub mod convert;
pub mod error;
pub mod host_value;
pub mod table;
pub mod table_key;
pub mod value;

pub use bridge::Bridge;
pub use config::BridgeConfig;
pub use error::BridgeError;
pub use host_value::HostValue;
pub use table::{RawTable, Table};
pub use table_key::{KeyKind, TableKey};
pub use value::Value;
