//! Bidirectional value bridge between host values and the partitioned tables
//! of an embedded scripting runtime.
pub mod runtime;
