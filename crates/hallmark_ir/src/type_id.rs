//! Type declaration handle.
//!
//! A `TypeId` indexes into the type universe that produced it. Built-in
//! types occupy fixed ids so the resolver and the universe agree on them
//! without a lookup.

use std::fmt;

/// A 32-bit handle to a type declaration (class, interface or tag type).
///
/// Handles are only meaningful for the universe that issued them.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct TypeId(u32);

impl TypeId {
    // === Built-in types (0-5) ===

    /// The universal root type. Every class without an explicit parent
    /// extends it, and no search ever looks at it.
    pub const OBJECT: Self = Self(0);
    /// `lang::tag::Retention` (reserved).
    pub const RETENTION: Self = Self(1);
    /// `lang::tag::Documented` (reserved).
    pub const DOCUMENTED: Self = Self(2);
    /// `lang::tag::Inherited` (reserved).
    pub const INHERITED: Self = Self(3);
    /// `lang::tag::Repeatable` (reserved). Its `value` names the container tag type.
    pub const REPEATABLE: Self = Self(4);
    /// `hallmark::NestedConfiguration`. Its `value` is `Inherit` or `Override`.
    pub const NESTED_CONFIGURATION: Self = Self(5);

    /// Number of built-in types.
    pub const BUILTIN_COUNT: u32 = 6;

    // Reserved: 6-15 for future built-ins

    /// First id handed out to user declarations.
    pub const FIRST_DYNAMIC: u32 = 16;

    /// Create a handle from a raw id.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw id.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The id as a table index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Check if this is one of the built-in types.
    #[inline]
    pub const fn is_builtin(self) -> bool {
        self.0 < Self::BUILTIN_COUNT
    }

    /// Name of a built-in type, `None` for user declarations.
    #[inline]
    pub const fn builtin_name(self) -> Option<&'static str> {
        match self.0 {
            0 => Some("lang::Object"),
            1 => Some("lang::tag::Retention"),
            2 => Some("lang::tag::Documented"),
            3 => Some("lang::tag::Inherited"),
            4 => Some("lang::tag::Repeatable"),
            5 => Some("hallmark::NestedConfiguration"),
            _ => None,
        }
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::OBJECT => write!(f, "TypeId::OBJECT"),
            Self::RETENTION => write!(f, "TypeId::RETENTION"),
            Self::DOCUMENTED => write!(f, "TypeId::DOCUMENTED"),
            Self::INHERITED => write!(f, "TypeId::INHERITED"),
            Self::REPEATABLE => write!(f, "TypeId::REPEATABLE"),
            Self::NESTED_CONFIGURATION => write!(f, "TypeId::NESTED_CONFIGURATION"),
            _ => write!(f, "TypeId({})", self.0),
        }
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.builtin_name() {
            Some(name) => f.write_str(name),
            None => write!(f, "type#{}", self.0),
        }
    }
}

const _: () = assert!(std::mem::size_of::<TypeId>() == 4);
