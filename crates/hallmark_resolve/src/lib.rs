//! Tag descriptor resolution for hallmark.
//!
//! Given a type and the tag type(s) a caller is interested in, find the
//! first place in the type's hierarchy where a matching tag is declared,
//! directly or through a chain of meta-tags, and describe where it was
//! found.
//!
//! # Search Order
//!
//! For each type visited: the type itself, the tags declared on it
//! (meta-tags), its interfaces, its parent and, for nested types whose
//! strategy allows it, the enclosing type. See the `engine` module.
//!
//! # Procedures
//!
//! - [`Resolver::find_tag_descriptor`]: one tag type, typed result with
//!   merged attributes
//! - [`Resolver::find_candidate_descriptor`]: the first of several tag types
//! - [`Resolver::find_repeatable_descriptor`]: every instance of a
//!   repeatable tag type at the first type carrying any
//!
//! Each descriptor can continue the search above its root with `next`.
//!
//! # Traversal Strategy
//!
//! Searches continue into enclosing types only when a
//! `hallmark::NestedConfiguration(Inherit)` tag is found in the nested
//! type's full hierarchy. The answer is cached per type in a bounded LRU
//! table ([`StrategyCache`]).

mod config;
mod descriptor;
mod engine;
mod error;
mod resolver;
mod strategy;
mod visited;

use std::sync::Once;

pub use config::{ResolverConfig, ENCLOSING_CONFIGURATION_ENV, STRATEGY_CACHE_CAPACITY_ENV};
pub use descriptor::{CandidateDescriptor, RepeatableDescriptor, TagDescriptor};
pub use error::{ErrorKind, ResolveError};
pub use resolver::Resolver;
pub use strategy::{
    CachedStrategies, StrategyCache, StrategySource, TraversalStrategy, UncachedStrategies,
};

/// Environment variable switching [`init_tracing`] to indented tree output.
pub const LOG_TREE_ENV: &str = "HALLMARK_LOG_TREE";

static TRACING_INIT: Once = Once::new();

/// Initialize the tracing subscriber.
///
/// Does nothing unless `RUST_LOG` is set. Events are printed flat, or as an
/// indented span tree when `HALLMARK_LOG_TREE` is set. Safe to call more
/// than once; only the first call has any effect, and an already installed
/// global subscriber is left in place.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};
        use tracing_tree::HierarchicalLayer;

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_err() {
            return;
        }

        let tree = std::env::var_os(LOG_TREE_ENV).is_some();
        let flat_layer = (!tree).then(|| fmt::layer().with_target(true).with_level(true));
        let tree_layer = tree.then(|| {
            HierarchicalLayer::new(2)
                .with_targets(true)
                .with_indent_lines(true)
                .with_bracketed_fields(true)
                .with_writer(std::io::stderr)
        });

        let installed = tracing_subscriber::registry()
            .with(flat_layer)
            .with(tree_layer)
            .with(EnvFilter::from_default_env())
            .try_init();
        if installed.is_err() {
            tracing::debug!("a global tracing subscriber was already installed");
        }
    });
}
