//! Approval data model and the pure transformations applied to it.

pub mod coercion;
pub mod markdown;
pub mod types;

pub use coercion::{capture_input_values, coerce_inputs, to_transport_string, UNSUPPORTED_TYPE};
pub use markdown::render_markdown;
pub use types::*;
