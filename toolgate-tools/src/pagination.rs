//! Cursor pagination parameters shared by list-style tools.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::args::{Arguments, optional_str, optional_u64};
use crate::error::{ToolError, ToolResult};

/// Page size used when the caller does not supply `perPage`.
pub const DEFAULT_PER_PAGE: u32 = 30;
/// Largest page size accepted by the upstream APIs.
pub const MAX_PER_PAGE: u32 = 100;

/// Cursor pagination options passed unmodified to the outbound call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorPagination {
    per_page: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    after: Option<String>,
}

impl Default for CursorPagination {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            after: None,
        }
    }
}

impl CursorPagination {
    /// Reads `perPage` and `after` from call arguments.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::InvalidArguments`] when `perPage` is outside
    /// `1..=100` or either field has the wrong type.
    pub fn from_args(args: &Arguments) -> ToolResult<Self> {
        let per_page = match optional_u64(args, "perPage")? {
            None => DEFAULT_PER_PAGE,
            Some(value) => u32::try_from(value)
                .ok()
                .filter(|value| (1..=MAX_PER_PAGE).contains(value))
                .ok_or_else(|| {
                    ToolError::invalid_arguments(format!(
                        "perPage must be between 1 and {MAX_PER_PAGE}"
                    ))
                })?,
        };

        // The cursor is opaque; it is forwarded exactly as received.
        let after = optional_str(args, "after")?.filter(|after| !after.is_empty());

        Ok(Self { per_page, after })
    }

    /// Returns the requested page size.
    #[must_use]
    pub const fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Returns the opaque cursor, if any.
    #[must_use]
    pub fn after(&self) -> Option<&str> {
        self.after.as_deref()
    }
}

/// Adds the `perPage` and `after` properties to an object input schema.
#[must_use]
pub fn with_cursor_pagination(mut schema: Value) -> Value {
    if let Some(properties) = schema
        .as_object_mut()
        .map(|object| object.entry("properties").or_insert_with(|| json!({})))
        .and_then(Value::as_object_mut)
    {
        properties.insert(
            "perPage".into(),
            json!({
                "type": "number",
                "description": "Results per page for pagination (min 1, max 100)",
                "minimum": 1,
                "maximum": MAX_PER_PAGE,
            }),
        );
        properties.insert(
            "after".into(),
            json!({
                "type": "string",
                "description": "Cursor for pagination. Use the cursor from the previous response's pageInfo.",
            }),
        );
    }
    schema
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(value: Value) -> Arguments {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn defaults_when_absent() {
        let pagination = CursorPagination::from_args(&Arguments::new()).unwrap();
        assert_eq!(pagination, CursorPagination::default());
        assert_eq!(pagination.per_page(), 30);
        assert_eq!(pagination.after(), None);
    }

    #[test]
    fn cursor_is_passed_through() {
        let pagination =
            CursorPagination::from_args(&args(json!({ "perPage": 50, "after": "Y3Vyc29yOjE=" })))
                .unwrap();
        assert_eq!(pagination.per_page(), 50);
        assert_eq!(pagination.after(), Some("Y3Vyc29yOjE="));
    }

    #[test]
    fn rejects_out_of_range_page_size() {
        for bad in [json!({ "perPage": 0 }), json!({ "perPage": 101 }), json!({ "perPage": "ten" })] {
            let err = CursorPagination::from_args(&args(bad)).unwrap_err();
            assert!(matches!(err, ToolError::InvalidArguments { .. }));
        }
    }

    #[test]
    fn schema_gains_pagination_properties() {
        let schema = with_cursor_pagination(json!({
            "type": "object",
            "properties": { "org": { "type": "string" } },
            "required": ["org"],
        }));
        let properties = schema["properties"].as_object().unwrap();
        assert!(properties.contains_key("org"));
        assert!(properties.contains_key("perPage"));
        assert!(properties.contains_key("after"));
        assert_eq!(schema["required"], json!(["org"]));
    }
}
