//! Public resolution entry points.

use hallmark_ir::{Tag, TypeId};
use hallmark_types::TagProvider;

use crate::engine::{self, AllRepeated, AnyTag, Search, SingleTag};
use crate::strategy::{CachedStrategies, StrategySource, TraversalStrategy};
use crate::{CandidateDescriptor, RepeatableDescriptor, ResolveError, ResolverConfig, TagDescriptor};

/// Resolves tag descriptors over the type hierarchies of one universe.
///
/// A resolver owns its strategy source, so one instance should be shared
/// by everything resolving against the same universe. It is `Sync`
/// whenever the provider and strategy source are.
///
/// ```text
/// let graph = builder.build()?;
/// let resolver = Resolver::new(&graph);
/// let descriptor = resolver.find_tag_descriptor(ty, tag_type)?;
/// ```
pub struct Resolver<'p, P: ?Sized, S = CachedStrategies<'p, P>> {
    provider: &'p P,
    strategies: S,
}

impl<'p, P> Resolver<'p, P>
where
    P: TagProvider + ?Sized,
{
    /// A resolver with default configuration and a cached strategy source.
    pub fn new(provider: &'p P) -> Self {
        Self::with_config(provider, &ResolverConfig::default())
    }

    pub fn with_config(provider: &'p P, config: &ResolverConfig) -> Self {
        Resolver {
            provider,
            strategies: CachedStrategies::new(provider, config),
        }
    }
}

impl<'p, P, S> Resolver<'p, P, S>
where
    P: TagProvider + ?Sized,
    S: StrategySource,
{
    /// A resolver deciding traversal strategies through `strategies`.
    pub fn with_strategies(provider: &'p P, strategies: S) -> Self {
        Resolver {
            provider,
            strategies,
        }
    }

    pub fn provider(&self) -> &'p P {
        self.provider
    }

    pub fn strategies(&self) -> &S {
        &self.strategies
    }

    /// The traversal strategy of `ty`.
    pub fn traversal_strategy(&self, ty: TypeId) -> TraversalStrategy {
        self.strategies.strategy(ty)
    }

    /// Whether searches at `ty` continue into its enclosing type: `ty` is
    /// nested and its strategy is [`TraversalStrategy::HierarchyAndEnclosing`].
    pub fn search_enclosing(&self, ty: TypeId) -> bool {
        engine::searches_enclosing(self.provider, &self.strategies, ty)
    }

    /// Find the first `tag_type` tag present or meta-present on `ty`, its
    /// interfaces, its parents or (when the strategy allows) its enclosing
    /// types.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn find_tag_descriptor(
        &self,
        ty: TypeId,
        tag_type: TypeId,
    ) -> Result<Option<TagDescriptor>, ResolveError> {
        self.check_tag_type(tag_type)?;
        self.tag_descriptor_from(Some(ty), tag_type)
    }

    /// Like [`find_tag_descriptor`](Self::find_tag_descriptor), matching
    /// the first of `candidates` at each type.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn find_candidate_descriptor(
        &self,
        ty: TypeId,
        candidates: &[TypeId],
    ) -> Result<Option<CandidateDescriptor>, ResolveError> {
        self.check_candidates(candidates)?;
        Ok(self.candidate_descriptor_from(Some(ty), candidates))
    }

    /// Find the first type carrying any `tag_type` instances, directly, in
    /// a repeatable container or through meta-tags, and collect all of them.
    ///
    /// Interfaces are not searched.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn find_repeatable_descriptor(
        &self,
        ty: TypeId,
        tag_type: TypeId,
    ) -> Result<Option<RepeatableDescriptor>, ResolveError> {
        self.check_tag_type(tag_type)?;
        self.repeatable_descriptor_from(Some(ty), tag_type)
    }

    /// Resolve `tag_type` on `ty` and synthesize its merged attributes
    /// into a tag instance.
    pub fn find_merged_tag(
        &self,
        ty: TypeId,
        tag_type: TypeId,
    ) -> Result<Option<Tag>, ResolveError> {
        self.find_tag_descriptor(ty, tag_type)?
            .map(|descriptor| descriptor.synthesize(self))
            .transpose()
    }

    pub(crate) fn check_tag_type(&self, tag_type: TypeId) -> Result<(), ResolveError> {
        if !self.provider.is_tag_type(tag_type) {
            return Err(ResolveError::NotATagType(tag_type));
        }
        if self.provider.is_reserved(tag_type) {
            return Err(ResolveError::ReservedTagType(tag_type));
        }
        Ok(())
    }

    pub(crate) fn check_candidates(&self, candidates: &[TypeId]) -> Result<(), ResolveError> {
        if candidates.is_empty() {
            return Err(ResolveError::EmptyCandidates);
        }
        candidates
            .iter()
            .try_for_each(|&candidate| self.check_tag_type(candidate))
    }

    pub(crate) fn tag_descriptor_from(
        &self,
        start: Option<TypeId>,
        tag_type: TypeId,
    ) -> Result<Option<TagDescriptor>, ResolveError> {
        let hit = Search::new(self.provider, &self.strategies).run(&SingleTag { tag_type }, start);
        hit.map(|hit| {
            TagDescriptor::new(
                self.provider,
                hit.root,
                hit.declaring,
                hit.composed.cloned(),
                hit.found,
            )
        })
        .transpose()
    }

    pub(crate) fn candidate_descriptor_from(
        &self,
        start: Option<TypeId>,
        candidates: &[TypeId],
    ) -> Option<CandidateDescriptor> {
        let hit =
            Search::new(self.provider, &self.strategies).run(&AnyTag { candidates }, start)?;
        Some(CandidateDescriptor {
            root_declaring_type: hit.root,
            declaring_type: hit.declaring,
            composed_tag: hit.composed.cloned(),
            tag: hit.found,
            candidates: Some(candidates.into()),
        })
    }

    pub(crate) fn repeatable_descriptor_from(
        &self,
        start: Option<TypeId>,
        tag_type: TypeId,
    ) -> Result<Option<RepeatableDescriptor>, ResolveError> {
        let hit =
            Search::new(self.provider, &self.strategies).run(&AllRepeated { tag_type }, start);
        hit.map(|hit| {
            RepeatableDescriptor::new(
                tag_type,
                hit.root,
                hit.declaring,
                hit.composed.cloned(),
                hit.found,
            )
        })
        .transpose()
    }

    /// Resolve again above `root`: from its parent, then from its enclosing
    /// type when searches at `root` continue there.
    pub(crate) fn resolve_above<T>(
        &self,
        root: TypeId,
        mut resolve: impl FnMut(Option<TypeId>) -> Result<Option<T>, ResolveError>,
    ) -> Result<Option<T>, ResolveError> {
        if let Some(found) = resolve(self.provider.parent(root))? {
            return Ok(Some(found));
        }
        if self.search_enclosing(root) {
            return resolve(self.provider.enclosing(root));
        }
        Ok(None)
    }
}
