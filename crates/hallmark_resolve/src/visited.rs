//! Cycle guard for meta-tag descent.

use hallmark_ir::Tag;
use rustc_hash::FxHashSet;

/// Tag instances already descended into during one top-level search.
///
/// Membership is by value: two tags of the same type with equal attributes
/// are the same entry. Scoped to a single call and never shared.
#[derive(Debug, Default)]
pub(crate) struct VisitedTags<'p> {
    seen: FxHashSet<&'p Tag>,
}

impl<'p> VisitedTags<'p> {
    /// Record `tag`. Returns `false` if an equal tag was already recorded.
    #[inline]
    pub(crate) fn insert(&mut self, tag: &'p Tag) -> bool {
        self.seen.insert(tag)
    }
}
