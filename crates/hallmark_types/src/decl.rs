//! Type declarations as stored in the graph.

use bitflags::bitflags;
use hallmark_ir::{AttrValue, Tag, TypeId};
use smallvec::SmallVec;

bitflags! {
    /// Per-declaration flags, computed once at registration.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct TypeFlags: u8 {
        /// Declared as an interface (can be implemented, has no parent).
        const INTERFACE = 1 << 0;
        /// Declared as a tag type (can be attached to declarations).
        const TAG = 1 << 1;
        /// Lives in the reserved built-in tag namespace.
        const RESERVED = 1 << 2;
        /// Lexically nested inside another type.
        const NESTED = 1 << 3;
    }
}

/// The kind of a declaration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Interface,
    TagType,
}

impl TypeKind {
    pub(crate) fn flags(self) -> TypeFlags {
        match self {
            Self::Class => TypeFlags::empty(),
            Self::Interface => TypeFlags::INTERFACE,
            Self::TagType => TypeFlags::TAG,
        }
    }
}

/// An attribute a tag type declares.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AttrDecl {
    pub name: String,
    /// Value used when an instance does not write the attribute.
    pub default: Option<AttrValue>,
}

/// An attribute of a composed tag type that overrides an attribute of one
/// of its meta-tags.
///
/// Declared on the composed tag type: when `@Composed(attribute = v)` is
/// found above a `@Target` in a meta-tag path, the merged `@Target` gets
/// `target_attribute = v`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AttrAlias {
    pub attribute: String,
    pub target: TypeId,
    pub target_attribute: String,
}

/// A registered type declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDecl {
    /// Qualified name (`app::tests::UserRepositoryTests`).
    pub name: String,

    pub kind: TypeKind,

    pub flags: TypeFlags,

    /// Parent class. `None` for the universal root, interfaces and tag types.
    pub parent: Option<TypeId>,

    /// Implemented (or, for interfaces, extended) interfaces in declaration order.
    pub interfaces: SmallVec<[TypeId; 2]>,

    /// Lexically enclosing type, if nested.
    pub enclosing: Option<TypeId>,

    /// Tags written directly on this declaration, in declaration order.
    pub tags: Vec<Tag>,

    /// Attribute schema (tag types only).
    pub attributes: Vec<AttrDecl>,

    /// Attribute overrides this tag type applies to its meta-tags.
    pub aliases: Vec<AttrAlias>,
}

impl TypeDecl {
    pub(crate) fn new(name: String, kind: TypeKind) -> Self {
        let mut flags = kind.flags();
        if kind == TypeKind::TagType && name.starts_with(crate::RESERVED_TAG_NAMESPACE) {
            flags |= TypeFlags::RESERVED;
        }
        Self {
            name,
            kind,
            flags,
            parent: None,
            interfaces: SmallVec::new(),
            enclosing: None,
            tags: Vec::new(),
            attributes: Vec::new(),
            aliases: Vec::new(),
        }
    }

    #[inline]
    pub fn is_tag_type(&self) -> bool {
        self.flags.contains(TypeFlags::TAG)
    }

    #[inline]
    pub fn is_interface(&self) -> bool {
        self.flags.contains(TypeFlags::INTERFACE)
    }

    #[inline]
    pub fn is_reserved(&self) -> bool {
        self.flags.contains(TypeFlags::RESERVED)
    }

    /// Look up an attribute declaration by name.
    pub fn attribute(&self, name: &str) -> Option<&AttrDecl> {
        self.attributes.iter().find(|attr| attr.name == name)
    }
}
