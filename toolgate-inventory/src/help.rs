//! Deterministic help text derived from inventory queries.

use std::fmt::Write as _;

use crate::inventory::Inventory;

const MAX_LINE_LENGTH: usize = 70;
const CONTINUATION: &str = ",\n\t     ";

/// Renders the `--toolsets` flag help.
///
/// `hidden` names toolsets that are always on or synthetic and therefore
/// omitted from the `Available:` listing.
#[must_use]
pub fn toolsets_help(inventory: &Inventory, hidden: &[&str]) -> String {
    let defaults = inventory
        .default_toolset_ids()
        .into_iter()
        .map(|id| id.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let available = wrap_ids(
        inventory
            .available_toolsets(hidden)
            .into_iter()
            .map(|toolset| toolset.id().as_str()),
        MAX_LINE_LENGTH,
    );

    let mut buf = String::new();
    buf.push_str("Comma-separated list of tool groups to enable (no spaces).\n");
    let _ = writeln!(buf, "Available: {available}");
    buf.push_str("Special toolset keywords:\n");
    buf.push_str("  - all: Enables all available toolsets\n");
    buf.push_str("  - default: Enables the default toolset configuration of:\n\t     ");
    buf.push_str(&defaults);
    buf.push('\n');
    buf.push_str("Examples:\n");
    buf.push_str("  - --toolsets=actions,gists,notifications\n");
    buf.push_str("  - Default + additional: --toolsets=default,actions,gists\n");
    buf.push_str("  - All tools: --toolsets=all");
    buf
}

/// Joins ids with `", "`, starting a continuation line whenever the current
/// line would exceed `max_line` characters.
fn wrap_ids<'a, I>(ids: I, max_line: usize) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out = String::new();
    let mut line = String::new();

    for id in ids {
        if line.is_empty() {
            line.push_str(id);
        } else if line.len() + id.len() + 2 <= max_line {
            line.push_str(", ");
            line.push_str(id);
        } else {
            if !out.is_empty() {
                out.push_str(CONTINUATION);
            }
            out.push_str(&line);
            line.clear();
            line.push_str(id);
        }
    }

    if !line.is_empty() {
        if !out.is_empty() {
            out.push_str(CONTINUATION);
        }
        out.push_str(&line);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    use toolgate_primitives::ToolsetId;
    use toolgate_tools::ToolsetMetadata;

    fn toolset(id: &'static str, is_default: bool) -> ToolsetMetadata {
        ToolsetMetadata::new(ToolsetId::from_static(id), String::new(), String::new())
            .with_default(is_default)
    }

    #[test]
    fn wraps_at_line_limit() {
        let wrapped = wrap_ids(["aaaa", "bbbb", "cccc"], 10);
        assert_eq!(wrapped, "aaaa, bbbb,\n\t     cccc");

        assert_eq!(wrap_ids(["one"], 10), "one");
        assert_eq!(wrap_ids(Vec::<&str>::new(), 10), "");
    }

    #[test]
    fn help_lists_available_and_defaults() {
        let inventory = Inventory::builder()
            .with_toolsets([
                toolset("context", true),
                toolset("repos", true),
                toolset("actions", false),
                toolset("dynamic", false),
            ])
            .build()
            .unwrap();

        let help = toolsets_help(&inventory, &["context", "dynamic"]);
        assert!(help.contains("Available: repos, actions\n"));
        assert!(help.contains("default toolset configuration of:\n\t     context, repos\n"));
        assert!(help.ends_with("All tools: --toolsets=all"));

        assert_eq!(help, toolsets_help(&inventory, &["context", "dynamic"]));
    }
}
