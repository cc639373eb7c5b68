//! Identifier types for toolsets and in-flight calls.

use std::borrow::{Borrow, Cow};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Error;

const MAX_TOOLSET_ID_LEN: usize = 64;

/// Identifier of a named toolset such as `repos` or `pull_requests`.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolsetId(Cow<'static, str>);

impl ToolsetId {
    /// Creates a toolset identifier after validating it is a lowercase token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidToolsetId`] if the identifier is empty, too
    /// long, or contains characters other than `a-z`, `0-9` and `_`.
    pub fn new(id: impl Into<String>) -> crate::Result<Self> {
        let id = id.into();
        validate_toolset_id(&id)?;
        Ok(Self(Cow::Owned(id)))
    }

    /// Wraps a compile-time toolset identifier without validation.
    #[must_use]
    pub const fn from_static(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the reserved keyword this identifier spells, if any.
    #[must_use]
    pub fn keyword(&self) -> Option<ToolsetKeyword> {
        ToolsetKeyword::parse(&self.0)
    }
}

impl Display for ToolsetId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ToolsetId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ToolsetId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for ToolsetId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

fn validate_toolset_id(id: &str) -> crate::Result<()> {
    if id.is_empty() {
        return Err(Error::InvalidToolsetId {
            id: String::new(),
            reason: "identifier cannot be empty".into(),
        });
    }

    if id.len() > MAX_TOOLSET_ID_LEN {
        return Err(Error::InvalidToolsetId {
            id: id.into(),
            reason: format!("identifier length must be <= {MAX_TOOLSET_ID_LEN}"),
        });
    }

    if !id.chars().all(|c| matches!(c, 'a'..='z' | '0'..='9' | '_')) {
        return Err(Error::InvalidToolsetId {
            id: id.into(),
            reason: "identifier must contain lowercase alphanumeric or underscore".into(),
        });
    }

    Ok(())
}

/// Request-time directives that share the toolset identifier namespace.
///
/// `All` and `Default` never name a catalog entry. `Dynamic` is both a
/// directive and a real toolset holding the discovery tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolsetKeyword {
    /// Enable every declared toolset.
    All,
    /// Enable the toolsets flagged as default.
    Default,
    /// Activate runtime toolset discovery.
    Dynamic,
}

impl ToolsetKeyword {
    /// Every reserved keyword, in documentation order.
    pub const ALL: [Self; 3] = [Self::All, Self::Default, Self::Dynamic];

    /// Parses an exact keyword spelling.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "all" => Some(Self::All),
            "default" => Some(Self::Default),
            "dynamic" => Some(Self::Dynamic),
            _ => None,
        }
    }

    /// Returns the keyword spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Default => "default",
            Self::Dynamic => "dynamic",
        }
    }

    /// Returns `true` for keywords that can never be declared as a toolset.
    #[must_use]
    pub const fn is_directive_only(self) -> bool {
        matches!(self, Self::All | Self::Default)
    }
}

impl Display for ToolsetKeyword {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unique identifier attached to every dispatched call for log correlation.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallId(Uuid);

impl CallId {
    /// Generates a random call identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl Default for CallId {
    fn default() -> Self {
        Self::random()
    }
}

impl Display for CallId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for CallId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl FromStr for CallId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid = Uuid::parse_str(s).map_err(Error::from)?;
        Ok(Self(uuid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toolset_ids_are_lowercase_tokens() {
        assert!(ToolsetId::new("pull_requests").is_ok());
        assert!(ToolsetId::new("code-security").is_err());
        assert!(ToolsetId::new("Repos").is_err());
        assert!(ToolsetId::new("").is_err());
    }

    #[test]
    fn keywords_are_a_closed_set() {
        for keyword in ToolsetKeyword::ALL {
            assert_eq!(ToolsetKeyword::parse(keyword.as_str()), Some(keyword));
        }
        assert_eq!(ToolsetKeyword::parse("repos"), None);
        assert_eq!(ToolsetKeyword::parse(" all"), None);

        assert!(ToolsetKeyword::All.is_directive_only());
        assert!(!ToolsetKeyword::Dynamic.is_directive_only());
        assert_eq!(
            ToolsetId::from_static("dynamic").keyword(),
            Some(ToolsetKeyword::Dynamic)
        );
    }

    #[test]
    fn round_trip_call_id() {
        let id = CallId::random();
        let parsed = id.to_string().parse::<CallId>().expect("parse");
        assert_eq!(id, parsed);
    }
}
