//! Tag instances and attribute values.

use std::collections::BTreeMap;
use std::fmt;

use crate::TypeId;

/// Attribute values keyed by attribute name (sorted for deterministic output).
pub type Attributes = BTreeMap<String, AttrValue>;

/// A single attribute value.
///
/// No floating point variant: values must be `Eq + Hash` because tag
/// instances are compared by value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    Str(String),
    /// An enum constant, by variant name.
    Enum(String),
    /// A reference to a type declaration.
    Type(TypeId),
    /// A nested tag (e.g. the elements of a repeatable container).
    Tag(Box<Tag>),
    Array(Vec<AttrValue>),
}

impl AttrValue {
    /// Shorthand for string values.
    pub fn str(value: impl Into<String>) -> Self {
        Self::Str(value.into())
    }

    /// Shorthand for enum constants.
    pub fn variant(name: impl Into<String>) -> Self {
        Self::Enum(name.into())
    }

    /// The enum variant name, if this is an enum constant.
    pub fn as_enum(&self) -> Option<&str> {
        match self {
            Self::Enum(name) => Some(name),
            _ => None,
        }
    }

    /// The referenced type, if this is a type reference.
    pub fn as_type(&self) -> Option<TypeId> {
        match self {
            Self::Type(ty) => Some(*ty),
            _ => None,
        }
    }

    /// Iterate the nested tags of a tag or tag-array value.
    ///
    /// Non-tag elements are skipped.
    pub fn nested_tags(&self) -> impl Iterator<Item = &Tag> {
        let items: &[AttrValue] = match self {
            Self::Array(items) => items,
            other => std::slice::from_ref(other),
        };
        items.iter().filter_map(|item| match item {
            Self::Tag(tag) => Some(&**tag),
            _ => None,
        })
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Str(s) => write!(f, "{s:?}"),
            Self::Enum(name) => f.write_str(name),
            Self::Type(ty) => write!(f, "{ty}"),
            Self::Tag(tag) => write!(f, "{tag}"),
            Self::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

/// A tag instance: the tag type plus the attribute values written at the
/// declaration site.
///
/// Equality and hashing are by value: two `@Slow(level = 2)` on different
/// declarations are the same instance as far as cycle detection goes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tag {
    /// The tag type.
    pub ty: TypeId,
    /// Explicitly written attributes (defaults are not filled in).
    pub attributes: Attributes,
}

impl Tag {
    /// A tag instance without explicit attributes.
    pub fn new(ty: TypeId) -> Self {
        Self {
            ty,
            attributes: Attributes::new(),
        }
    }

    /// Builder-style attribute setter.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: AttrValue) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    /// Look up an explicitly written attribute.
    #[inline]
    pub fn attribute(&self, name: &str) -> Option<&AttrValue> {
        self.attributes.get(name)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.ty)?;
        if self.attributes.is_empty() {
            return Ok(());
        }
        f.write_str("(")?;
        for (i, (name, value)) in self.attributes.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name} = {value}")?;
        }
        f.write_str(")")
    }
}
