//! Attribute merging and tag synthesis.
//!
//! Merged attributes of a found tag are, in increasing priority:
//!
//! 1. the defaults declared by its tag type,
//! 2. the values written on the tag itself,
//! 3. alias overrides from the composed tags above it in its meta-tag path,
//!    the composed tag nearest the scanned type winning.

use hallmark_ir::{Attributes, Tag, TypeId};
use rustc_hash::FxHashSet;

use crate::scan::ScannedTag;
use crate::{AttributeMerger, SynthesisError, TypeGraph, TypeIntrospector};

impl TypeGraph {
    /// Merged attributes of a scanned tag.
    pub(crate) fn merge_scanned(&self, scanned: &ScannedTag<'_>) -> Attributes {
        let tag_type = scanned.tag.ty;
        let mut merged = self.defaults(tag_type);
        merged.extend(
            scanned
                .tag
                .attributes
                .iter()
                .map(|(name, value)| (name.clone(), value.clone())),
        );

        for composed in scanned.path.iter().rev() {
            let Some(decl) = self.get(composed.ty) else {
                continue;
            };
            for alias in decl.aliases.iter().filter(|alias| alias.target == tag_type) {
                if let Some(value) = composed.attribute(&alias.attribute) {
                    merged.insert(alias.target_attribute.clone(), value.clone());
                }
            }
        }
        merged
    }

    /// Declared defaults of `tag_type`.
    fn defaults(&self, tag_type: TypeId) -> Attributes {
        self.get(tag_type)
            .map(|decl| {
                decl.attributes
                    .iter()
                    .filter_map(|attr| {
                        attr.default
                            .as_ref()
                            .map(|default| (attr.name.clone(), default.clone()))
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// `tag` with the defaults of its type filled in.
    pub(crate) fn with_defaults(&self, tag: &Tag) -> Tag {
        let mut attributes = self.defaults(tag.ty);
        attributes.extend(
            tag.attributes
                .iter()
                .map(|(name, value)| (name.clone(), value.clone())),
        );
        Tag {
            ty: tag.ty,
            attributes,
        }
    }
}

impl AttributeMerger for TypeGraph {
    /// Searches `root`, its interfaces and its parents (never enclosing
    /// types). A present tag wins immediately; otherwise the nearest
    /// meta-present one, earlier types winning ties.
    fn merged_attributes(&self, root: TypeId, tag_type: TypeId) -> Option<Attributes> {
        let mut nearest: Option<(usize, Attributes)> = None;
        for ty in self.hierarchy(root, false) {
            let scanned = self.scan(ty);
            let Some(found) = scanned.iter().find(|s| s.tag.ty == tag_type) else {
                continue;
            };
            if found.distance() == 0 {
                return Some(self.merge_scanned(found));
            }
            if nearest
                .as_ref()
                .map_or(true, |(distance, _)| found.distance() < *distance)
            {
                nearest = Some((found.distance(), self.merge_scanned(found)));
            }
        }
        nearest.map(|(_, attributes)| attributes)
    }

    fn synthesize(
        &self,
        attributes: &Attributes,
        tag_type: TypeId,
        origin: TypeId,
    ) -> Result<Tag, SynthesisError> {
        let decl = self
            .get(tag_type)
            .filter(|decl| decl.is_tag_type())
            .ok_or(SynthesisError::NotATagType(tag_type))?;

        if let Some(unknown) = attributes.keys().find(|name| decl.attribute(name).is_none()) {
            return Err(SynthesisError::UnknownAttribute {
                tag: decl.name.clone(),
                attribute: unknown.clone(),
                origin: self.display_type(origin),
            });
        }

        let mut complete = Attributes::new();
        for attr in &decl.attributes {
            let value = attributes
                .get(&attr.name)
                .or(attr.default.as_ref())
                .ok_or_else(|| SynthesisError::MissingAttribute {
                    tag: decl.name.clone(),
                    attribute: attr.name.clone(),
                    origin: self.display_type(origin),
                })?;
            complete.insert(attr.name.clone(), value.clone());
        }

        Ok(Tag {
            ty: tag_type,
            attributes: complete,
        })
    }

    fn local_merged_tags(&self, ty: TypeId, tag_type: TypeId) -> Result<Vec<Tag>, SynthesisError> {
        let mut seen = FxHashSet::default();
        let mut tags = Vec::new();
        for scanned in self.scan(ty).iter().filter(|s| s.tag.ty == tag_type) {
            let tag = self.synthesize(&self.merge_scanned(scanned), tag_type, ty)?;
            if seen.insert(tag.clone()) {
                tags.push(tag);
            }
        }
        Ok(tags)
    }
}
