//! Repeatable tag aggregation.

use hallmark_ir::{Tag, TypeId};
use rustc_hash::FxHashSet;

use crate::{RepeatableAggregator, TypeGraph};

impl RepeatableAggregator for TypeGraph {
    /// Collects, in scan order, every `tag_type` instance that is present or
    /// meta-present on `ty`, plus the elements of every present or
    /// meta-present container of `tag_type`. Instances come back with
    /// defaults filled in; equal instances are reported once.
    fn repeatable_tags(&self, ty: TypeId, tag_type: TypeId) -> Vec<Tag> {
        let container = self.repeatable_container(tag_type);
        let mut seen = FxHashSet::default();
        let mut tags = Vec::new();
        let mut collect = |tag: Tag| {
            if seen.insert(tag.clone()) {
                tags.push(tag);
            }
        };

        for scanned in self.scan(ty) {
            if scanned.tag.ty == tag_type {
                collect(Tag {
                    ty: tag_type,
                    attributes: self.merge_scanned(&scanned),
                });
            } else if Some(scanned.tag.ty) == container {
                let merged = self.merge_scanned(&scanned);
                let elements = merged
                    .get("value")
                    .into_iter()
                    .flat_map(|value| value.nested_tags());
                for element in elements.filter(|element| element.ty == tag_type) {
                    collect(self.with_defaults(element));
                }
            }
        }
        tags
    }
}
