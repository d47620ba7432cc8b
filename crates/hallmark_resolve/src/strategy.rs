//! Traversal strategy resolution and its LRU cache.
//!
//! # Design
//!
//! Whether a nested type's search continues into its enclosing types is
//! decided by the nested-configuration tag found anywhere in that type's
//! hierarchy. The lookup walks the full hierarchy, so results are cached per
//! type in a small LRU table.
//!
//! The cache follows the interner's fast path / slow path shape: a lookup
//! under the lock, the computation outside it, then a second check before
//! publishing. Two threads missing on the same type may both compute; the
//! first to publish wins and both return the published value.

use std::collections::BTreeMap;

use hallmark_ir::{EnclosingConfiguration, TypeId};
use hallmark_types::EnclosingConfigReader;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::ResolverConfig;

/// How far a search reaches beyond the type hierarchy.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TraversalStrategy {
    /// Self, interfaces and parents only.
    DirectHierarchyOnly,
    /// Additionally continue into the enclosing type of a nested type.
    HierarchyAndEnclosing,
}

impl TraversalStrategy {
    #[inline]
    pub fn searches_enclosing(self) -> bool {
        self == TraversalStrategy::HierarchyAndEnclosing
    }
}

impl From<EnclosingConfiguration> for TraversalStrategy {
    fn from(configuration: EnclosingConfiguration) -> Self {
        match configuration {
            EnclosingConfiguration::Inherit => TraversalStrategy::HierarchyAndEnclosing,
            EnclosingConfiguration::Override => TraversalStrategy::DirectHierarchyOnly,
        }
    }
}

/// Answers the traversal strategy of a type.
pub trait StrategySource {
    fn strategy(&self, ty: TypeId) -> TraversalStrategy;
}

impl<F> StrategySource for F
where
    F: Fn(TypeId) -> TraversalStrategy,
{
    #[inline]
    fn strategy(&self, ty: TypeId) -> TraversalStrategy {
        self(ty)
    }
}

/// Compute the strategy of `ty` from the nested-configuration tag in its
/// full hierarchy, falling back to `default`.
fn lookup_strategy<P>(
    provider: &P,
    ty: TypeId,
    default: EnclosingConfiguration,
) -> TraversalStrategy
where
    P: EnclosingConfigReader + ?Sized,
{
    let configuration = provider.enclosing_configuration(ty);
    tracing::trace!(?ty, ?configuration, "enclosing configuration");
    TraversalStrategy::from(configuration.unwrap_or(default))
}

/// The default strategy source: lookups through a bounded LRU cache.
pub struct CachedStrategies<'p, P: ?Sized> {
    provider: &'p P,
    default: EnclosingConfiguration,
    cache: StrategyCache,
}

impl<'p, P> CachedStrategies<'p, P>
where
    P: EnclosingConfigReader + ?Sized,
{
    pub fn new(provider: &'p P, config: &ResolverConfig) -> Self {
        CachedStrategies {
            provider,
            default: config.default_enclosing_configuration,
            cache: StrategyCache::new(config.strategy_cache_capacity),
        }
    }

    /// The underlying cache.
    pub fn cache(&self) -> &StrategyCache {
        &self.cache
    }
}

impl<P> StrategySource for CachedStrategies<'_, P>
where
    P: EnclosingConfigReader + ?Sized,
{
    fn strategy(&self, ty: TypeId) -> TraversalStrategy {
        self.cache
            .get_or_insert_with(ty, || lookup_strategy(self.provider, ty, self.default))
    }
}

/// A strategy source that recomputes on every call.
pub struct UncachedStrategies<'p, P: ?Sized> {
    provider: &'p P,
    default: EnclosingConfiguration,
}

impl<'p, P> UncachedStrategies<'p, P>
where
    P: EnclosingConfigReader + ?Sized,
{
    pub fn new(provider: &'p P, default: EnclosingConfiguration) -> Self {
        UncachedStrategies { provider, default }
    }
}

impl<P> StrategySource for UncachedStrategies<'_, P>
where
    P: EnclosingConfigReader + ?Sized,
{
    fn strategy(&self, ty: TypeId) -> TraversalStrategy {
        lookup_strategy(self.provider, ty, self.default)
    }
}

/// A bounded, thread-safe, least-recently-used map from type to strategy.
pub struct StrategyCache {
    capacity: usize,
    table: Mutex<LruTable>,
}

impl StrategyCache {
    /// Create a cache holding at most `capacity` entries (at least one).
    pub fn new(capacity: usize) -> Self {
        StrategyCache {
            capacity: capacity.max(1),
            table: Mutex::new(LruTable::default()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.table.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `ty` is cached. Does not count as a use.
    pub fn contains(&self, ty: TypeId) -> bool {
        self.table.lock().entries.contains_key(&ty)
    }

    /// The cached strategy of `ty`, marking it most recently used.
    pub fn get(&self, ty: TypeId) -> Option<TraversalStrategy> {
        self.table.lock().touch(ty)
    }

    /// The cached strategy of `ty`, computing and publishing it on a miss.
    ///
    /// `compute` runs without the lock held.
    pub fn get_or_insert_with(
        &self,
        ty: TypeId,
        compute: impl FnOnce() -> TraversalStrategy,
    ) -> TraversalStrategy {
        // Fast path
        let cached = self.table.lock().touch(ty);
        if let Some(strategy) = cached {
            return strategy;
        }

        // Slow path
        let computed = compute();
        tracing::debug!(?ty, strategy = ?computed, "strategy cache miss");

        let mut table = self.table.lock();
        if let Some(published) = table.touch(ty) {
            return published;
        }
        if let Some(evicted) = table.insert(ty, computed, self.capacity) {
            tracing::debug!(?evicted, "strategy cache eviction");
        }
        computed
    }
}

impl std::fmt::Debug for StrategyCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategyCache")
            .field("capacity", &self.capacity)
            .field("len", &self.len())
            .finish()
    }
}

#[derive(Copy, Clone, Debug)]
struct LruEntry {
    strategy: TraversalStrategy,
    stamp: u64,
}

/// Entries plus a recency index ordered by last-use stamp.
#[derive(Debug, Default)]
struct LruTable {
    entries: FxHashMap<TypeId, LruEntry>,
    recency: BTreeMap<u64, TypeId>,
    clock: u64,
}

impl LruTable {
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn touch(&mut self, ty: TypeId) -> Option<TraversalStrategy> {
        let stamp = self.tick();
        let entry = self.entries.get_mut(&ty)?;
        self.recency.remove(&entry.stamp);
        entry.stamp = stamp;
        self.recency.insert(stamp, ty);
        Some(entry.strategy)
    }

    /// Insert a new entry, returning the evicted type if over capacity.
    fn insert(
        &mut self,
        ty: TypeId,
        strategy: TraversalStrategy,
        capacity: usize,
    ) -> Option<TypeId> {
        let stamp = self.tick();
        self.entries.insert(ty, LruEntry { strategy, stamp });
        self.recency.insert(stamp, ty);

        if self.entries.len() <= capacity {
            return None;
        }
        let (_, oldest) = self.recency.pop_first()?;
        self.entries.remove(&oldest);
        Some(oldest)
    }
}
