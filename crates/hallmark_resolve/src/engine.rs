//! The recursive search shared by every resolution procedure.
//!
//! # Axis order
//!
//! Strict, first success wins:
//!
//! 1. terminal: no type, or the universal root
//! 2. local: the query matches the type itself
//! 3. meta-tag: each non-reserved tag declared on the type, through the
//!    visited set
//! 4. interfaces: each implemented interface (single and candidate queries)
//! 5. parent
//! 6. enclosing: nested types whose strategy searches enclosing types
//!
//! Local, meta-tag and interface hits are anchored at the searched type.
//! Parent and enclosing hits are passed up unchanged.

use hallmark_ir::{Tag, TypeId};
use hallmark_stack::ensure_sufficient_stack;
use hallmark_types::TagProvider;

use crate::strategy::StrategySource;
use crate::visited::VisitedTags;

/// A successful search.
#[derive(Debug)]
pub(crate) struct Hit<'p, T> {
    pub root: TypeId,
    pub declaring: TypeId,
    pub composed: Option<&'p Tag>,
    pub found: T,
}

impl<'p, T> Hit<'p, T> {
    /// Re-anchor an inner hit at `root`.
    fn anchored(self, root: TypeId, composed: Option<&'p Tag>) -> Self {
        Hit {
            root,
            declaring: self.declaring,
            composed,
            found: self.found,
        }
    }
}

/// What a search is looking for at each type.
pub(crate) trait Query {
    type Found;

    /// Whether the interface axis is followed.
    const SEARCHES_INTERFACES: bool;

    /// Match against `ty` itself.
    fn local<P: TagProvider + ?Sized>(&self, provider: &P, ty: TypeId) -> Option<Self::Found>;
}

/// One caller-known tag type.
pub(crate) struct SingleTag {
    pub tag_type: TypeId,
}

impl Query for SingleTag {
    type Found = Tag;
    const SEARCHES_INTERFACES: bool = true;

    fn local<P: TagProvider + ?Sized>(&self, provider: &P, ty: TypeId) -> Option<Tag> {
        provider.declared_tag(ty, self.tag_type).cloned()
    }
}

/// The first of several tag types, in candidate order.
pub(crate) struct AnyTag<'a> {
    pub candidates: &'a [TypeId],
}

impl Query for AnyTag<'_> {
    type Found = Tag;
    const SEARCHES_INTERFACES: bool = true;

    fn local<P: TagProvider + ?Sized>(&self, provider: &P, ty: TypeId) -> Option<Tag> {
        self.candidates
            .iter()
            .find_map(|&candidate| provider.declared_tag(ty, candidate))
            .cloned()
    }
}

/// Every instance of a repeatable tag type present on one type.
pub(crate) struct AllRepeated {
    pub tag_type: TypeId,
}

impl Query for AllRepeated {
    type Found = Vec<Tag>;
    const SEARCHES_INTERFACES: bool = false;

    fn local<P: TagProvider + ?Sized>(&self, provider: &P, ty: TypeId) -> Option<Vec<Tag>> {
        let tags = provider.repeatable_tags(ty, self.tag_type);
        (!tags.is_empty()).then_some(tags)
    }
}

/// Whether a search at `ty` continues into its enclosing type.
pub(crate) fn searches_enclosing<P, S>(provider: &P, strategies: &S, ty: TypeId) -> bool
where
    P: TagProvider + ?Sized,
    S: StrategySource + ?Sized,
{
    provider.is_nested(ty) && strategies.strategy(ty).searches_enclosing()
}

/// State of one top-level search.
pub(crate) struct Search<'p, 's, P: ?Sized, S: ?Sized> {
    provider: &'p P,
    strategies: &'s S,
    visited: VisitedTags<'p>,
}

impl<'p, 's, P, S> Search<'p, 's, P, S>
where
    P: TagProvider + ?Sized,
    S: StrategySource + ?Sized,
{
    pub(crate) fn new(provider: &'p P, strategies: &'s S) -> Self {
        Search {
            provider,
            strategies,
            visited: VisitedTags::default(),
        }
    }

    pub(crate) fn run<Q: Query>(
        &mut self,
        query: &Q,
        ty: Option<TypeId>,
    ) -> Option<Hit<'p, Q::Found>> {
        ensure_sufficient_stack(|| {
            let provider = self.provider;
            let ty = ty.filter(|&ty| !provider.is_universal_root(ty))?;

            if let Some(found) = query.local(provider, ty) {
                tracing::trace!(?ty, axis = "local", "match");
                return Some(Hit {
                    root: ty,
                    declaring: ty,
                    composed: None,
                    found,
                });
            }

            for composed in provider.declared_tags(ty) {
                if provider.is_reserved(composed.ty) || !self.visited.insert(composed) {
                    continue;
                }
                if let Some(hit) = self.run(query, Some(composed.ty)) {
                    tracing::trace!(?ty, axis = "meta", composed = ?composed.ty, "match");
                    return Some(hit.anchored(ty, Some(composed)));
                }
            }

            if Q::SEARCHES_INTERFACES {
                for &interface in provider.interfaces(ty) {
                    if let Some(hit) = self.run(query, Some(interface)) {
                        tracing::trace!(?ty, axis = "interface", ?interface, "match");
                        let composed = hit.composed;
                        return Some(hit.anchored(ty, composed));
                    }
                }
            }

            if let Some(hit) = self.run(query, provider.parent(ty)) {
                tracing::trace!(?ty, axis = "parent", root = ?hit.root, "match");
                return Some(hit);
            }

            if searches_enclosing(provider, self.strategies, ty) {
                if let Some(hit) = self.run(query, provider.enclosing(ty)) {
                    tracing::trace!(?ty, axis = "enclosing", root = ?hit.root, "match");
                    return Some(hit);
                }
            }

            None
        })
    }
}
