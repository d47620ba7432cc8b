//! Values of the nested-configuration tag.

use std::fmt;
use std::str::FromStr;

/// Whether a nested type inherits tag configuration from its enclosing type.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnclosingConfiguration {
    /// Enclosing types are searched after the type hierarchy.
    Inherit,
    /// Only the type hierarchy is searched.
    #[default]
    Override,
}

impl EnclosingConfiguration {
    /// Variant name as written in a tag attribute.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inherit => "Inherit",
            Self::Override => "Override",
        }
    }

    /// Parse an enum constant written in a tag attribute (exact match).
    pub fn from_variant(name: &str) -> Option<Self> {
        match name {
            "Inherit" => Some(Self::Inherit),
            "Override" => Some(Self::Override),
            _ => None,
        }
    }
}

impl fmt::Display for EnclosingConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for [`EnclosingConfiguration::from_str`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseEnclosingError(String);

impl fmt::Display for ParseEnclosingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid enclosing configuration {:?}, expected `inherit` or `override`",
            self.0
        )
    }
}

impl std::error::Error for ParseEnclosingError {}

/// Case-insensitive parse, for configuration coming from the environment.
impl FromStr for EnclosingConfiguration {
    type Err = ParseEnclosingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("inherit") {
            Ok(Self::Inherit)
        } else if trimmed.eq_ignore_ascii_case("override") {
            Ok(Self::Override)
        } else {
            Err(ParseEnclosingError(s.to_owned()))
        }
    }
}
