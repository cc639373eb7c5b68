//! Turns a free-form toolset request into the list of toolsets to enable.
//!
//! Resolution never fails: blank entries are dropped and unknown ids are
//! kept so that [`crate::EnablementState::from_resolved`] can reject them
//! with the full list.

use std::collections::HashSet;

use toolgate_primitives::ToolsetKeyword;
use tracing::debug;

use crate::inventory::Inventory;

/// Outcome of resolving a toolset request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedToolsets {
    ids: Vec<String>,
    dynamic: bool,
}

impl ResolvedToolsets {
    /// Toolset ids to enable, in request order.
    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Returns `true` when dynamic discovery was requested.
    #[must_use]
    pub const fn is_dynamic(&self) -> bool {
        self.dynamic
    }

    /// Returns `true` when `id` is in the resolved set.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        contains_toolset(&self.ids, id)
    }

    /// Ids that do not name any toolset in `inventory`.
    #[must_use]
    pub fn unknown<'a>(&'a self, inventory: &Inventory) -> Vec<&'a str> {
        self.ids
            .iter()
            .map(String::as_str)
            .filter(|id| !inventory.has_toolset(id))
            .collect()
    }
}

/// Trims every entry, drops blanks, and removes duplicates keeping the first
/// occurrence.
pub fn clean_tools<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut result = Vec::new();
    for name in names {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            continue;
        }
        if seen.insert(trimmed.to_owned()) {
            result.push(trimmed.to_owned());
        }
    }
    result
}

/// Removes every occurrence of `id`.
#[must_use]
pub fn remove_toolset(toolsets: Vec<String>, id: &str) -> Vec<String> {
    toolsets.into_iter().filter(|toolset| toolset != id).collect()
}

/// Returns `true` when `id` is present.
#[must_use]
pub fn contains_toolset(toolsets: &[String], id: &str) -> bool {
    toolsets.iter().any(|toolset| toolset == id)
}

/// Replaces the `default` keyword with the default toolsets not already
/// present. Lists without the keyword are returned unchanged.
#[must_use]
pub fn add_default_toolset(toolsets: Vec<String>, inventory: &Inventory) -> Vec<String> {
    let keyword = ToolsetKeyword::Default.as_str();
    if !contains_toolset(&toolsets, keyword) {
        return toolsets;
    }

    let mut result = remove_toolset(toolsets, keyword);
    for id in inventory.default_toolset_ids() {
        if !contains_toolset(&result, id.as_str()) {
            result.push(id.to_string());
        }
    }
    result
}

/// Replaces the `all` keyword with every selectable toolset. A `default`
/// keyword alongside it is redundant and dropped. Lists without the keyword
/// are returned unchanged.
#[must_use]
pub fn expand_all_toolsets(toolsets: Vec<String>, inventory: &Inventory) -> Vec<String> {
    if !contains_toolset(&toolsets, ToolsetKeyword::All.as_str()) {
        return toolsets;
    }

    let mut result: Vec<String> = inventory
        .selectable_toolset_ids()
        .into_iter()
        .map(ToString::to_string)
        .collect();
    for id in toolsets {
        let directive = ToolsetKeyword::parse(&id).is_some_and(ToolsetKeyword::is_directive_only);
        if !directive && !contains_toolset(&result, &id) {
            result.push(id);
        }
    }
    result
}

/// Resolves a raw toolset request against the inventory.
pub fn resolve_toolsets<I, S>(requested: I, inventory: &Inventory) -> ResolvedToolsets
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let cleaned = clean_tools(requested);
    let expanded = expand_all_toolsets(cleaned, inventory);
    let ids = add_default_toolset(expanded, inventory);
    let dynamic = contains_toolset(&ids, ToolsetKeyword::Dynamic.as_str());

    debug!(toolsets = ?ids, dynamic, "resolved toolset request");
    ResolvedToolsets { ids, dynamic }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::BTreeSet;

    use toolgate_primitives::ToolsetId;
    use toolgate_tools::ToolsetMetadata;

    fn toolset(id: &'static str, is_default: bool) -> ToolsetMetadata {
        ToolsetMetadata::new(ToolsetId::from_static(id), String::new(), String::new())
            .with_default(is_default)
    }

    fn inventory() -> Inventory {
        Inventory::builder()
            .with_toolsets([
                toolset("context", true),
                toolset("repos", true),
                toolset("actions", false),
                toolset("issues", true),
                toolset("gists", false),
                toolset("dynamic", false),
            ])
            .build()
            .unwrap()
    }

    fn as_set(ids: &[String]) -> BTreeSet<&str> {
        ids.iter().map(String::as_str).collect()
    }

    #[test]
    fn clean_tools_trims_and_dedups_in_order() {
        assert_eq!(clean_tools(["a", " a ", "", "b"]), ["a", "b"]);
        assert_eq!(clean_tools(["  ", "\t"]), Vec::<String>::new());
    }

    #[test]
    fn default_expands_to_defaults() {
        let inventory = inventory();
        let resolved = resolve_toolsets(["default"], &inventory);
        assert_eq!(resolved.ids(), ["context", "repos", "issues"]);
        assert!(!resolved.is_dynamic());

        let reordered = Inventory::builder()
            .with_toolsets([
                toolset("dynamic", false),
                toolset("issues", true),
                toolset("gists", false),
                toolset("repos", true),
                toolset("actions", false),
                toolset("context", true),
            ])
            .build()
            .unwrap();
        let resolved = resolve_toolsets(["default"], &reordered);
        let defaults: BTreeSet<&str> = reordered
            .default_toolset_ids()
            .into_iter()
            .map(ToolsetId::as_str)
            .collect();
        assert_eq!(as_set(resolved.ids()), defaults);
        assert_eq!(as_set(resolved.ids()), BTreeSet::from(["context", "repos", "issues"]));
    }

    #[test]
    fn default_is_additive() {
        let inventory = inventory();
        let resolved = resolve_toolsets(["default", "actions"], &inventory);
        assert_eq!(
            as_set(resolved.ids()),
            BTreeSet::from(["context", "repos", "issues", "actions"])
        );
        // Explicit picks keep their position ahead of the appended defaults.
        assert_eq!(resolved.ids()[0], "actions");

        let resolved = resolve_toolsets(["repos", "default"], &inventory);
        assert_eq!(resolved.ids(), ["repos", "context", "issues"]);
    }

    #[test]
    fn all_expands_once_without_dynamic() {
        let inventory = inventory();
        let resolved = resolve_toolsets(["all", "repos", "default"], &inventory);
        assert_eq!(
            resolved.ids(),
            ["context", "repos", "actions", "issues", "gists"]
        );
        assert!(!resolved.is_dynamic());

        let resolved = resolve_toolsets(["all", "dynamic"], &inventory);
        assert!(resolved.contains("dynamic"));
        assert!(resolved.is_dynamic());
        assert_eq!(resolved.ids().len(), 6);
    }

    #[test]
    fn duplicates_and_whitespace_collapse() {
        let inventory = inventory();
        let resolved = resolve_toolsets(["repos", "repos", " repos "], &inventory);
        assert_eq!(resolved.ids(), ["repos"]);
    }

    #[test]
    fn dynamic_keyword_activates_mode() {
        let inventory = inventory();
        let resolved = resolve_toolsets(["dynamic"], &inventory);
        assert_eq!(resolved.ids(), ["dynamic"]);
        assert!(resolved.is_dynamic());
    }

    #[test]
    fn unknown_ids_are_preserved_for_later_rejection() {
        let inventory = inventory();
        let resolved = resolve_toolsets(["repos", "repoz", "default"], &inventory);
        assert!(resolved.contains("repoz"));
        assert_eq!(resolved.unknown(&inventory), ["repoz"]);
    }

    #[test]
    fn keyword_helpers() {
        let inventory = inventory();
        let list = vec!["gists".to_owned(), "default".to_owned()];
        assert!(contains_toolset(&list, "gists"));
        assert_eq!(remove_toolset(list.clone(), "gists"), ["default"]);
        assert_eq!(
            add_default_toolset(list, &inventory),
            ["gists", "context", "repos", "issues"]
        );

        let untouched = vec!["gists".to_owned()];
        assert_eq!(add_default_toolset(untouched.clone(), &inventory), untouched);
    }
}
