//! Traversal strategies and the enclosing axis.

use hallmark_ir::{EnclosingConfiguration, TypeId};
use hallmark_resolve::{Resolver, ResolverConfig, TraversalStrategy};
use hallmark_types::TypeGraph;
use pretty_assertions::assert_eq;

use crate::common::{build, mark, marker, nested_configuration, ty};

/// `Outer` declares `@Config` and the given nested configuration (if any);
/// `Outer::Inner` and `Outer::Inner::Innermost` declare nothing.
fn nested_universe(configuration: Option<&str>) -> TypeGraph {
    build(|b| {
        let config = marker(b, "app::Config");
        let outer = b.class("app::Outer");
        let inner = b.class("app::Outer::Inner");
        let innermost = b.class("app::Outer::Inner::Innermost");
        b.tag(outer, mark(config, "outer"))
            .nested_in(inner, outer)
            .nested_in(innermost, inner);
        if let Some(value) = configuration {
            b.tag(outer, nested_configuration(value));
        }
    })
}

#[test]
fn inherit_enables_enclosing_search_for_nested_types() {
    let graph = nested_universe(Some("Inherit"));
    let resolver = Resolver::new(&graph);
    let outer = ty(&graph, "app::Outer");
    let inner = ty(&graph, "app::Outer::Inner");

    assert!(resolver.search_enclosing(inner));
    assert_eq!(
        resolver.traversal_strategy(inner),
        TraversalStrategy::HierarchyAndEnclosing
    );
    // Not nested, so never searched outward whatever the strategy.
    assert!(!resolver.search_enclosing(outer));
}

#[test]
fn override_or_nothing_disables_enclosing_search() {
    for configuration in [None, Some("Override")] {
        let graph = nested_universe(configuration);
        let resolver = Resolver::new(&graph);
        let inner = ty(&graph, "app::Outer::Inner");

        assert!(!resolver.search_enclosing(inner), "{configuration:?}");
        assert_eq!(
            resolver.traversal_strategy(inner),
            TraversalStrategy::DirectHierarchyOnly
        );
    }
}

#[test]
fn enclosing_declaration_matches_with_inherit() {
    let graph = nested_universe(Some("Inherit"));
    let resolver = Resolver::new(&graph);
    let outer = ty(&graph, "app::Outer");
    let config = ty(&graph, "app::Config");

    for nested in ["app::Outer::Inner", "app::Outer::Inner::Innermost"] {
        let descriptor = resolver
            .find_tag_descriptor(ty(&graph, nested), config)
            .unwrap()
            .expect("declared on enclosing type");
        assert_eq!(descriptor.declaring_type(), outer);
        assert_eq!(descriptor.root_declaring_type(), outer);
        assert_eq!(descriptor.tag(), &mark(config, "outer"));
    }
}

#[test]
fn enclosing_declaration_is_invisible_with_override() {
    for configuration in [None, Some("Override")] {
        let graph = nested_universe(configuration);
        let resolver = Resolver::new(&graph);

        let found = resolver
            .find_tag_descriptor(ty(&graph, "app::Outer::Inner"), ty(&graph, "app::Config"))
            .unwrap();
        assert_eq!(found, None, "{configuration:?}");
    }
}

#[test]
fn nested_type_can_override_its_enclosing_configuration() {
    let graph = build(|b| {
        let config = marker(b, "app::Config");
        let outer = b.class("app::Outer");
        let inner = b.class("app::Outer::Inner");
        b.tag(outer, mark(config, "outer"))
            .tag(outer, nested_configuration("Inherit"))
            .nested_in(inner, outer)
            .tag(inner, nested_configuration("Override"));
    });
    let resolver = Resolver::new(&graph);
    let inner = ty(&graph, "app::Outer::Inner");

    assert!(!resolver.search_enclosing(inner));
    assert_eq!(
        resolver
            .find_tag_descriptor(inner, ty(&graph, "app::Config"))
            .unwrap(),
        None
    );
}

#[test]
fn configured_default_applies_without_a_tag() {
    let graph = nested_universe(None);
    let config = ResolverConfig::default()
        .with_default_enclosing_configuration(EnclosingConfiguration::Inherit);
    let resolver = Resolver::with_config(&graph, &config);

    let descriptor = resolver
        .find_tag_descriptor(ty(&graph, "app::Outer::Inner"), ty(&graph, "app::Config"))
        .unwrap()
        .expect("enclosing searched by default");
    assert_eq!(descriptor.declaring_type(), ty(&graph, "app::Outer"));
}

#[test]
fn strategy_source_is_injectable() {
    let graph = nested_universe(None);
    let always = |_: TypeId| TraversalStrategy::HierarchyAndEnclosing;
    let resolver = Resolver::with_strategies(&graph, always);

    assert!(resolver.search_enclosing(ty(&graph, "app::Outer::Inner")));
    let innermost = ty(&graph, "app::Outer::Inner::Innermost");
    let found = resolver
        .find_tag_descriptor(innermost, ty(&graph, "app::Config"))
        .unwrap();
    assert!(found.is_some());
}

#[test]
fn strategies_are_cached_per_type() {
    let graph = nested_universe(Some("Inherit"));
    let config = ResolverConfig::default().with_strategy_cache_capacity(2);
    let resolver = Resolver::with_config(&graph, &config);
    let outer = ty(&graph, "app::Outer");
    let inner = ty(&graph, "app::Outer::Inner");
    let innermost = ty(&graph, "app::Outer::Inner::Innermost");
    let cache = resolver.strategies().cache();

    assert!(cache.is_empty());
    resolver.traversal_strategy(outer);
    resolver.traversal_strategy(inner);
    resolver.traversal_strategy(outer);
    resolver.traversal_strategy(innermost);

    assert_eq!(cache.len(), 2);
    assert!(cache.contains(outer));
    assert!(!cache.contains(inner));
    assert!(cache.contains(innermost));
}
