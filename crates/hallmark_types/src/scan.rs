//! Present and meta-present tag scanning.
//!
//! A tag is *present* on a type when it is written on the declaration and
//! *meta-present* when it is reachable through the declarations of the tag
//! types written there. Scanning is breadth first, so tags come out ordered
//! by distance from the type and, within a distance, in declaration order.
//! Reserved tags are neither reported nor followed.

use std::collections::VecDeque;

use hallmark_ir::{Tag, TypeId};
use smallvec::SmallVec;

use crate::{TypeGraph, TypeIntrospector};

/// A tag reached while scanning a type.
#[derive(Clone, Debug)]
pub(crate) struct ScannedTag<'g> {
    pub tag: &'g Tag,
    /// Composed tags leading to `tag`: `path[0]` is written on the scanned
    /// type, the last entry is the tag whose type declares `tag`. Empty when
    /// `tag` is present.
    pub path: SmallVec<[&'g Tag; 4]>,
}

impl ScannedTag<'_> {
    #[inline]
    pub fn distance(&self) -> usize {
        self.path.len()
    }

    /// Whether following a meta-tag of type `ty` would loop back into this path.
    fn loops_through(&self, ty: TypeId) -> bool {
        self.tag.ty == ty || self.path.iter().any(|composed| composed.ty == ty)
    }
}

impl TypeGraph {
    /// All tags present or meta-present on `ty`, nearest first.
    pub(crate) fn scan(&self, ty: TypeId) -> Vec<ScannedTag<'_>> {
        let mut queue: VecDeque<ScannedTag<'_>> = self
            .declared_tags(ty)
            .iter()
            .filter(|tag| !self.is_reserved(tag.ty))
            .map(|tag| ScannedTag {
                tag,
                path: SmallVec::new(),
            })
            .collect();

        let mut scanned = Vec::with_capacity(queue.len());
        while let Some(entry) = queue.pop_front() {
            for meta in self.declared_tags(entry.tag.ty) {
                if self.is_reserved(meta.ty) || entry.loops_through(meta.ty) {
                    continue;
                }
                let mut path = entry.path.clone();
                path.push(entry.tag);
                queue.push_back(ScannedTag { tag: meta, path });
            }
            scanned.push(entry);
        }
        scanned
    }
}
