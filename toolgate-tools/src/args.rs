//! Typed accessors over raw call arguments.

use serde_json::{Map, Value};

use crate::error::{ToolError, ToolResult};

/// Raw call arguments as received from the protocol layer.
pub type Arguments = Map<String, Value>;

/// Reads a required, non-empty string parameter.
///
/// # Errors
///
/// Returns [`ToolError::InvalidArguments`] when the parameter is absent,
/// empty, or not a string.
pub fn required_str(args: &Arguments, key: &str) -> ToolResult<String> {
    match args.get(key) {
        None | Some(Value::Null) => Err(ToolError::invalid_arguments(format!(
            "missing required parameter: {key}"
        ))),
        Some(Value::String(value)) if value.is_empty() => Err(ToolError::invalid_arguments(
            format!("missing required parameter: {key}"),
        )),
        Some(Value::String(value)) => Ok(value.clone()),
        Some(_) => Err(ToolError::invalid_arguments(format!(
            "parameter {key} is not of type string"
        ))),
    }
}

/// Reads an optional string parameter.
///
/// # Errors
///
/// Returns [`ToolError::InvalidArguments`] when the parameter is present but
/// not a string.
pub fn optional_str(args: &Arguments, key: &str) -> ToolResult<Option<String>> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(_) => Err(ToolError::invalid_arguments(format!(
            "parameter {key} is not of type string"
        ))),
    }
}

/// Reads an optional non-negative integer parameter.
///
/// Whole floating point values are accepted since JSON clients frequently
/// send `30.0` for `30`.
///
/// # Errors
///
/// Returns [`ToolError::InvalidArguments`] when the parameter is present but
/// not a non-negative whole number.
pub fn optional_u64(args: &Arguments, key: &str) -> ToolResult<Option<u64>> {
    let Some(value) = args.get(key) else {
        return Ok(None);
    };
    if value.is_null() {
        return Ok(None);
    }

    if let Some(number) = value.as_u64() {
        return Ok(Some(number));
    }

    match value.as_f64() {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Some(number) if number >= 0.0 && number.fract() == 0.0 && number <= u64::MAX as f64 => {
            Ok(Some(number as u64))
        }
        _ => Err(ToolError::invalid_arguments(format!(
            "parameter {key} is not a non-negative integer"
        ))),
    }
}

/// Reads a required non-negative integer parameter.
///
/// # Errors
///
/// Returns [`ToolError::InvalidArguments`] when the parameter is absent or
/// not a non-negative whole number.
pub fn required_u64(args: &Arguments, key: &str) -> ToolResult<u64> {
    optional_u64(args, key)?.ok_or_else(|| {
        ToolError::invalid_arguments(format!("missing required parameter: {key}"))
    })
}

/// Reads an optional boolean parameter.
///
/// # Errors
///
/// Returns [`ToolError::InvalidArguments`] when the parameter is present but
/// not a boolean.
pub fn optional_bool(args: &Arguments, key: &str) -> ToolResult<Option<bool>> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(value)) => Ok(Some(*value)),
        Some(_) => Err(ToolError::invalid_arguments(format!(
            "parameter {key} is not of type boolean"
        ))),
    }
}
