//! Structural conversion between host values and tables.

mod lift;
mod project;

pub use lift::{lift_table, lift_value};
pub use project::{project, text_fields_to_json};
