//! Input-value coercion.
//!
//! The approval API only accepts string parameter values, but downstream
//! steps consume the approver's inputs with their original types. A callback
//! therefore produces two views of the same inputs: a string-coerced copy for
//! transport and a typed `name → value` map for the output artifact.

use crate::approval::types::{InputValue, ParamValue};
use serde_json::{Map, Value};

/// Placeholder forwarded for values that have no string form.
pub const UNSUPPORTED_TYPE: &str = "unsupported type";

/// Decimal exponents in `[MIN_PLAIN_EXPONENT, MAX_PLAIN_EXPONENT)` print
/// without an exponent; anything outside switches to `1.5e+07` form.
const MIN_PLAIN_EXPONENT: i32 = -4;
const MAX_PLAIN_EXPONENT: i32 = 6;

/// Convert a parameter value to the string the approval API expects.
///
/// Numbers use the shortest decimal text that round-trips; integers keep
/// their integer spelling.
pub fn to_transport_string(value: &ParamValue) -> String {
    match value {
        ParamValue::String(s) => s.clone(),
        ParamValue::Bool(b) => b.to_string(),
        ParamValue::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => format_float(f),
            _ => n.to_string(),
        },
        ParamValue::Unsupported(_) => UNSUPPORTED_TYPE.to_string(),
    }
}

/// Shortest round-trip text for `f`, in `%g` layout: plain for moderate
/// magnitudes, otherwise mantissa plus a signed exponent of at least two digits.
fn format_float(f: f64) -> String {
    // `{:e}` yields the shortest round-trip digits, e.g. "1.5e300" or "1e-7".
    let scientific = format!("{f:e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return f.to_string();
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return f.to_string();
    };
    if (MIN_PLAIN_EXPONENT..MAX_PLAIN_EXPONENT).contains(&exponent) {
        return f.to_string();
    }
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs())
}

/// Capture the original-typed value of every input, keyed by name.
/// A repeated name keeps the last value.
pub fn capture_input_values(inputs: &[InputValue]) -> Map<String, Value> {
    inputs
        .iter()
        .map(|input| (input.name.clone(), input.value.to_json()))
        .collect()
}

/// Produce the transport copy of `inputs`, with every value string-coerced.
pub fn coerce_inputs(inputs: &[InputValue]) -> Vec<InputValue> {
    inputs
        .iter()
        .map(|input| InputValue {
            value: ParamValue::String(to_transport_string(&input.value)),
            ..input.clone()
        })
        .collect()
}
