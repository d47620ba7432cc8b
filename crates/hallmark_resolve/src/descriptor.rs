//! Resolution results.
//!
//! Every descriptor records where a match was anchored
//! (`root_declaring_type`), where the matching tag is written
//! (`declaring_type`) and, for matches reached through a meta-tag, the tag
//! on the root through which it was reached (`composed_tag`).

use std::fmt;

use hallmark_ir::{AttrValue, Attributes, Tag, TypeId};
use hallmark_types::{AttributeMerger, TagProvider, TypeIntrospector};

use crate::{ResolveError, Resolver, StrategySource};

/// A match for one caller-known tag type, with its merged attributes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagDescriptor {
    root_declaring_type: TypeId,
    declaring_type: TypeId,
    composed_tag: Option<Tag>,
    tag: Tag,
    merged_attributes: Attributes,
}

impl TagDescriptor {
    pub(crate) fn new<P: AttributeMerger + ?Sized>(
        provider: &P,
        root_declaring_type: TypeId,
        declaring_type: TypeId,
        composed_tag: Option<Tag>,
        tag: Tag,
    ) -> Result<Self, ResolveError> {
        let merged_attributes = provider
            .merged_attributes(root_declaring_type, tag.ty)
            .ok_or(ResolveError::MissingAttributes {
                root: root_declaring_type,
                tag_type: tag.ty,
            })?;
        Ok(TagDescriptor {
            root_declaring_type,
            declaring_type,
            composed_tag,
            tag,
            merged_attributes,
        })
    }

    pub fn root_declaring_type(&self) -> TypeId {
        self.root_declaring_type
    }

    pub fn declaring_type(&self) -> TypeId {
        self.declaring_type
    }

    pub fn composed_tag(&self) -> Option<&Tag> {
        self.composed_tag.as_ref()
    }

    pub fn composed_tag_type(&self) -> Option<TypeId> {
        self.composed_tag.as_ref().map(|tag| tag.ty)
    }

    /// The matching tag instance as written on the declaring type.
    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    pub fn tag_type(&self) -> TypeId {
        self.tag.ty
    }

    /// Attributes merged for the tag type at the root declaring type.
    pub fn merged_attributes(&self) -> &Attributes {
        &self.merged_attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&AttrValue> {
        self.merged_attributes.get(name)
    }

    /// The merged attributes as a tag instance.
    pub fn synthesize<P, S>(&self, resolver: &Resolver<'_, P, S>) -> Result<Tag, ResolveError>
    where
        P: TagProvider + ?Sized,
        S: StrategySource,
    {
        let tag = resolver.provider().synthesize(
            &self.merged_attributes,
            self.tag.ty,
            self.root_declaring_type,
        )?;
        Ok(tag)
    }

    /// Every instance of the tag type present or meta-present on the first
    /// type in the root's search order that carries any, merged and
    /// synthesized. Repeatable containers are not unwrapped.
    pub fn find_all_local_merged_tags<P, S>(
        &self,
        resolver: &Resolver<'_, P, S>,
    ) -> Result<Vec<Tag>, ResolveError>
    where
        P: TagProvider + ?Sized,
        S: StrategySource,
    {
        let provider = resolver.provider();
        let root = self.root_declaring_type;
        let include_enclosing = resolver.traversal_strategy(root).searches_enclosing();
        for ty in provider.hierarchy(root, include_enclosing) {
            let tags = provider.local_merged_tags(ty, self.tag.ty)?;
            if !tags.is_empty() {
                return Ok(tags);
            }
        }
        Ok(Vec::new())
    }

    /// The next match of the same tag type above the root declaring type.
    pub fn next<P, S>(&self, resolver: &Resolver<'_, P, S>) -> Result<Option<Self>, ResolveError>
    where
        P: TagProvider + ?Sized,
        S: StrategySource,
    {
        resolver.resolve_above(self.root_declaring_type, |start| {
            resolver.tag_descriptor_from(start, self.tag.ty)
        })
    }

    /// Render with type names from `names`.
    pub fn display<'a>(&'a self, names: &'a dyn TypeIntrospector) -> impl fmt::Display + 'a {
        self.fields(Some(names))
    }

    fn fields<'a>(&'a self, names: Option<&'a dyn TypeIntrospector>) -> Fields<'a> {
        Fields {
            kind: "TagDescriptor",
            root_declaring_type: self.root_declaring_type,
            declaring_type: self.declaring_type,
            composed_tag: self.composed_tag.as_ref(),
            tags: Tags::One(&self.tag),
            names,
        }
    }
}

impl fmt::Display for TagDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.fields(None), f)
    }
}

/// A match for the first of several candidate tag types.
///
/// A plain record: callers match on `tag.ty` and convert with
/// [`into_typed`](Self::into_typed) once they know which candidate matched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateDescriptor {
    pub root_declaring_type: TypeId,
    pub declaring_type: TypeId,
    pub composed_tag: Option<Tag>,
    pub tag: Tag,
    /// Candidate tag types the match was resolved with, needed by
    /// [`next`](Self::next).
    pub candidates: Option<Box<[TypeId]>>,
}

impl CandidateDescriptor {
    pub fn tag_type(&self) -> TypeId {
        self.tag.ty
    }

    pub fn composed_tag_type(&self) -> Option<TypeId> {
        self.composed_tag.as_ref().map(|tag| tag.ty)
    }

    /// The next match of any candidate above the root declaring type.
    ///
    /// Fails with [`ResolveError::Unsupported`] when no candidate set was
    /// retained.
    pub fn next<P, S>(&self, resolver: &Resolver<'_, P, S>) -> Result<Option<Self>, ResolveError>
    where
        P: TagProvider + ?Sized,
        S: StrategySource,
    {
        let candidates = self.candidates.as_deref().ok_or(ResolveError::Unsupported {
            operation: "CandidateDescriptor::next",
            reason: "the descriptor retains no candidate tag types",
        })?;
        resolver.check_candidates(candidates)?;
        resolver.resolve_above(self.root_declaring_type, |start| {
            Ok(resolver.candidate_descriptor_from(start, candidates))
        })
    }

    /// Convert into a typed descriptor for the matched tag type, computing
    /// its merged attributes.
    pub fn into_typed<P, S>(
        self,
        resolver: &Resolver<'_, P, S>,
    ) -> Result<TagDescriptor, ResolveError>
    where
        P: TagProvider + ?Sized,
        S: StrategySource,
    {
        resolver.check_tag_type(self.tag.ty)?;
        TagDescriptor::new(
            resolver.provider(),
            self.root_declaring_type,
            self.declaring_type,
            self.composed_tag,
            self.tag,
        )
    }

    /// Render with type names from `names`.
    pub fn display<'a>(&'a self, names: &'a dyn TypeIntrospector) -> impl fmt::Display + 'a {
        self.fields(Some(names))
    }

    fn fields<'a>(&'a self, names: Option<&'a dyn TypeIntrospector>) -> Fields<'a> {
        Fields {
            kind: "CandidateDescriptor",
            root_declaring_type: self.root_declaring_type,
            declaring_type: self.declaring_type,
            composed_tag: self.composed_tag.as_ref(),
            tags: Tags::One(&self.tag),
            names,
        }
    }
}

impl fmt::Display for CandidateDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.fields(None), f)
    }
}

/// All instances of a repeatable tag type found at one declaring type.
///
/// Never empty. `composed_tag` is set only for a hit on the meta-tag axis:
/// the provider's local aggregation at the root found nothing, and the
/// instances were found at a tag type written on the root, which becomes
/// the declaring type. An aggregator that already includes meta-present
/// instances (as [`TypeGraph`](hallmark_types::TypeGraph) does) answers
/// locally, leaving `composed_tag` as `None`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepeatableDescriptor {
    tag_type: TypeId,
    root_declaring_type: TypeId,
    declaring_type: TypeId,
    composed_tag: Option<Tag>,
    tags: Vec<Tag>,
}

impl RepeatableDescriptor {
    pub(crate) fn new(
        tag_type: TypeId,
        root_declaring_type: TypeId,
        declaring_type: TypeId,
        composed_tag: Option<Tag>,
        tags: Vec<Tag>,
    ) -> Result<Self, ResolveError> {
        if tags.is_empty() {
            return Err(ResolveError::EmptyRepeatable);
        }
        Ok(RepeatableDescriptor {
            tag_type,
            root_declaring_type,
            declaring_type,
            composed_tag,
            tags,
        })
    }

    pub fn tag_type(&self) -> TypeId {
        self.tag_type
    }

    pub fn root_declaring_type(&self) -> TypeId {
        self.root_declaring_type
    }

    pub fn declaring_type(&self) -> TypeId {
        self.declaring_type
    }

    /// The tag on the root through which the instances were reached.
    pub fn composed_tag(&self) -> Option<&Tag> {
        self.composed_tag.as_ref()
    }

    /// The instances, de-duplicated, in declaration order.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// The next type above the root declaring type carrying instances.
    pub fn next<P, S>(&self, resolver: &Resolver<'_, P, S>) -> Result<Option<Self>, ResolveError>
    where
        P: TagProvider + ?Sized,
        S: StrategySource,
    {
        resolver.resolve_above(self.root_declaring_type, |start| {
            resolver.repeatable_descriptor_from(start, self.tag_type)
        })
    }

    /// Render with type names from `names`.
    pub fn display<'a>(&'a self, names: &'a dyn TypeIntrospector) -> impl fmt::Display + 'a {
        self.fields(Some(names))
    }

    fn fields<'a>(&'a self, names: Option<&'a dyn TypeIntrospector>) -> Fields<'a> {
        Fields {
            kind: "RepeatableDescriptor",
            root_declaring_type: self.root_declaring_type,
            declaring_type: self.declaring_type,
            composed_tag: self.composed_tag.as_ref(),
            tags: Tags::Many(&self.tags),
            names,
        }
    }
}

impl fmt::Display for RepeatableDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.fields(None), f)
    }
}

enum Tags<'a> {
    One(&'a Tag),
    Many(&'a [Tag]),
}

/// Shared rendering, with handles or with type names.
struct Fields<'a> {
    kind: &'static str,
    root_declaring_type: TypeId,
    declaring_type: TypeId,
    composed_tag: Option<&'a Tag>,
    tags: Tags<'a>,
    names: Option<&'a dyn TypeIntrospector>,
}

impl Fields<'_> {
    fn ty(&self, ty: TypeId) -> String {
        match self.names {
            Some(names) => names.display_type(ty),
            None => ty.to_string(),
        }
    }

    fn tag(&self, tag: &Tag) -> String {
        match self.names {
            Some(names) => names.display_tag(tag),
            None => tag.to_string(),
        }
    }
}

impl fmt::Display for Fields<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {{ root_declaring_type: {}, declaring_type: {}, composed_tag: ",
            self.kind,
            self.ty(self.root_declaring_type),
            self.ty(self.declaring_type),
        )?;
        match self.composed_tag {
            Some(tag) => write!(f, "{}", self.tag(tag))?,
            None => f.write_str("None")?,
        }
        match self.tags {
            Tags::One(tag) => write!(f, ", tag: {} }}", self.tag(tag)),
            Tags::Many(tags) => {
                f.write_str(", tags: [")?;
                for (i, tag) in tags.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_str(&self.tag(tag))?;
                }
                f.write_str("] }")
            }
        }
    }
}
