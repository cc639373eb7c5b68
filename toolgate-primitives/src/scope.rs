//! Authorization scopes required by tools and granted to callers.

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const MAX_SCOPE_LEN: usize = 64;

/// Atomic authorization capability a caller must hold, e.g. `admin:org`.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scope(Cow<'static, str>);

impl Scope {
    /// Creates a scope after validating its format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidScope`] if the scope is empty, too long, or
    /// contains unsupported characters.
    pub fn new(scope: impl Into<String>) -> Result<Self> {
        let scope = scope.into();
        validate_scope(&scope)?;
        Ok(Self(Cow::Owned(scope)))
    }

    /// Wraps a compile-time scope constant without validation.
    ///
    /// Intended for the scope tables declared alongside tools; those tables
    /// are covered by tests that run them through [`Scope::new`].
    #[must_use]
    pub const fn from_static(scope: &'static str) -> Self {
        Self(Cow::Borrowed(scope))
    }

    /// Returns the scope as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Scope {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Scope> for String {
    fn from(value: Scope) -> Self {
        value.0.into_owned()
    }
}

fn validate_scope(scope: &str) -> Result<()> {
    if scope.is_empty() {
        return Err(Error::InvalidScope {
            scope: String::new(),
            reason: "scope cannot be empty".into(),
        });
    }

    if scope.len() > MAX_SCOPE_LEN {
        return Err(Error::InvalidScope {
            scope: scope.into(),
            reason: format!("scope length must be <= {MAX_SCOPE_LEN}"),
        });
    }

    if !scope
        .chars()
        .all(|c| matches!(c, 'a'..='z' | '0'..='9' | ':' | '-' | '_' | '.'))
    {
        return Err(Error::InvalidScope {
            scope: scope.into(),
            reason: "scope must contain lowercase alphanumeric, colon, dash, underscore, or dot"
                .into(),
        });
    }

    Ok(())
}

/// Ordered, duplicate-free set of scopes.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScopeSet(BTreeSet<Scope>);

impl ScopeSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a scope, returning `true` if it was not already present.
    pub fn insert(&mut self, scope: Scope) -> bool {
        self.0.insert(scope)
    }

    /// Returns `true` when the set holds the scope.
    #[must_use]
    pub fn contains(&self, scope: &Scope) -> bool {
        self.0.contains(scope)
    }

    /// Returns `true` when the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of scopes in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates scopes in lexical order.
    pub fn iter(&self) -> impl Iterator<Item = &Scope> {
        self.0.iter()
    }

    /// Returns the scopes of `self` that `granted` does not hold.
    #[must_use]
    pub fn missing_from(&self, granted: &ScopeSet) -> ScopeSet {
        Self(self.0.difference(&granted.0).cloned().collect())
    }

    /// Returns `true` when every scope in `self` is held by `granted`.
    #[must_use]
    pub fn is_satisfied_by(&self, granted: &ScopeSet) -> bool {
        self.0.is_subset(&granted.0)
    }
}

impl FromIterator<Scope> for ScopeSet {
    fn from_iter<I: IntoIterator<Item = Scope>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ScopeSet {
    type Item = &'a Scope;
    type IntoIter = std::collections::btree_set::Iter<'a, Scope>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Display for ScopeSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (idx, scope) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            Display::fmt(scope, f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(scopes: &[&str]) -> ScopeSet {
        scopes.iter().map(|s| Scope::new(*s).expect("scope")).collect()
    }

    #[test]
    fn validates_scope_format() {
        assert!(Scope::new("admin:org").is_ok());
        assert!(Scope::new("security_events").is_ok());

        let err = Scope::new("").expect_err("empty scope should fail");
        assert!(matches!(err, Error::InvalidScope { .. }));

        let err = Scope::new("Admin:Org").expect_err("uppercase should fail");
        assert!(matches!(err, Error::InvalidScope { scope, .. } if scope == "Admin:Org"));
    }

    #[test]
    fn static_and_owned_scopes_compare_equal() {
        const ADMIN_ORG: Scope = Scope::from_static("admin:org");
        assert_eq!(ADMIN_ORG, Scope::new("admin:org").unwrap());
    }

    #[test]
    fn missing_scopes_are_set_difference() {
        let required = set(&["admin:org", "repo"]);
        let granted = set(&["repo", "gist"]);

        let missing = required.missing_from(&granted);
        assert_eq!(missing, set(&["admin:org"]));
        assert!(!required.is_satisfied_by(&granted));
        assert_eq!(missing.to_string(), "admin:org");
    }

    #[test]
    fn empty_requirement_is_always_satisfied() {
        let required = ScopeSet::new();
        assert!(required.is_satisfied_by(&ScopeSet::new()));
        assert!(required.missing_from(&set(&["repo"])).is_empty());
    }

    #[test]
    fn serializes_as_plain_list() {
        let json = serde_json::to_string(&set(&["repo", "gist"])).unwrap();
        assert_eq!(json, r#"["gist","repo"]"#);
    }
}
