//! Collaborator seams consumed by the resolver.
//!
//! Unknown handles are answered gracefully (empty slices, `None`, `false`)
//! so a resolver never fails on a type another universe forgot about.

use hallmark_ir::{Attributes, EnclosingConfiguration, Tag, TypeId};
use rustc_hash::FxHashSet;

use crate::SynthesisError;

/// Structural queries on type declarations.
pub trait TypeIntrospector {
    /// Tags written directly on `ty`, in declaration order.
    fn declared_tags(&self, ty: TypeId) -> &[Tag];

    /// Parent class of `ty`.
    fn parent(&self, ty: TypeId) -> Option<TypeId>;

    /// Interfaces implemented by `ty`, in declaration order.
    fn interfaces(&self, ty: TypeId) -> &[TypeId];

    /// Lexically enclosing type of `ty`, if nested.
    fn enclosing(&self, ty: TypeId) -> Option<TypeId>;

    /// Whether `ty` is a tag type.
    fn is_tag_type(&self, ty: TypeId) -> bool;

    /// Whether `tag_type` belongs to the reserved built-in tag namespace.
    fn is_reserved(&self, tag_type: TypeId) -> bool;

    /// Qualified name of `ty`, for diagnostics.
    fn type_name(&self, ty: TypeId) -> Option<&str>;

    /// Whether `ty` is lexically nested in another type.
    #[inline]
    fn is_nested(&self, ty: TypeId) -> bool {
        self.enclosing(ty).is_some()
    }

    /// Whether `ty` is the top of every class hierarchy.
    #[inline]
    fn is_universal_root(&self, ty: TypeId) -> bool {
        ty == TypeId::OBJECT
    }

    /// The first tag of `tag_type` written directly on `ty`.
    fn declared_tag(&self, ty: TypeId, tag_type: TypeId) -> Option<&Tag> {
        self.declared_tags(ty).iter().find(|tag| tag.ty == tag_type)
    }

    /// Types in scan order: `ty`, each interface hierarchy, the parent
    /// hierarchy and, when asked, the enclosing hierarchy. The universal
    /// root is never included and each type appears once.
    fn hierarchy(&self, ty: TypeId, include_enclosing: bool) -> Vec<TypeId> {
        let mut seen = FxHashSet::default();
        let mut order = Vec::new();
        collect_hierarchy(self, ty, include_enclosing, &mut seen, &mut order);
        order
    }

    /// Render a type for diagnostics, falling back to its handle.
    fn display_type(&self, ty: TypeId) -> String {
        match self.type_name(ty) {
            Some(name) => name.to_owned(),
            None => ty.to_string(),
        }
    }

    /// Render a tag with the type name instead of its handle.
    fn display_tag(&self, tag: &Tag) -> String {
        let rendered = tag.to_string();
        let handle = format!("@{}", tag.ty);
        match rendered.strip_prefix(&handle) {
            Some(rest) => format!("@{}{rest}", self.display_type(tag.ty)),
            None => rendered,
        }
    }
}

fn collect_hierarchy<I: TypeIntrospector + ?Sized>(
    introspector: &I,
    ty: TypeId,
    include_enclosing: bool,
    seen: &mut FxHashSet<TypeId>,
    order: &mut Vec<TypeId>,
) {
    hallmark_stack::ensure_sufficient_stack(|| {
        if introspector.is_universal_root(ty)
            || introspector.type_name(ty).is_none()
            || !seen.insert(ty)
        {
            return;
        }
        order.push(ty);
        for &interface in introspector.interfaces(ty) {
            collect_hierarchy(introspector, interface, include_enclosing, seen, order);
        }
        if let Some(parent) = introspector.parent(ty) {
            collect_hierarchy(introspector, parent, include_enclosing, seen, order);
        }
        if include_enclosing {
            if let Some(enclosing) = introspector.enclosing(ty) {
                collect_hierarchy(introspector, enclosing, include_enclosing, seen, order);
            }
        }
    });
}

/// Aggregation of repeatable tags on a single type.
pub trait RepeatableAggregator {
    /// All instances of `tag_type` present or meta-present directly on `ty`,
    /// with repeatable containers unwrapped, de-duplicated and in scan order.
    fn repeatable_tags(&self, ty: TypeId, tag_type: TypeId) -> Vec<Tag>;
}

/// Attribute merging and tag synthesis.
pub trait AttributeMerger {
    /// Merged attributes of the first `tag_type` found in the type hierarchy
    /// of `root`, or `None` if there is none.
    fn merged_attributes(&self, root: TypeId, tag_type: TypeId) -> Option<Attributes>;

    /// Turn merged attributes into a clean instance of `tag_type`.
    ///
    /// `origin` is the type the attributes were merged for.
    fn synthesize(
        &self,
        attributes: &Attributes,
        tag_type: TypeId,
        origin: TypeId,
    ) -> Result<Tag, SynthesisError>;

    /// Every instance of `tag_type` present or meta-present directly on `ty`,
    /// merged and synthesized. Repeatable containers are not unwrapped.
    fn local_merged_tags(&self, ty: TypeId, tag_type: TypeId) -> Result<Vec<Tag>, SynthesisError>;
}

/// Reader for the nested-configuration tag.
pub trait EnclosingConfigReader {
    /// The configuration declared anywhere in the hierarchy of `ty`,
    /// enclosing types included. `None` when no type declares one.
    fn enclosing_configuration(&self, ty: TypeId) -> Option<EnclosingConfiguration>;
}

/// Everything the resolver needs from a type universe.
pub trait TagProvider:
    TypeIntrospector + RepeatableAggregator + AttributeMerger + EnclosingConfigReader
{
}

impl<T> TagProvider for T where
    T: TypeIntrospector + RepeatableAggregator + AttributeMerger + EnclosingConfigReader
{
}
