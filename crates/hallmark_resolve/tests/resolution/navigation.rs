//! `next` on every descriptor kind.

use hallmark_ir::Tag;
use hallmark_resolve::Resolver;
use hallmark_types::TypeGraph;
use pretty_assertions::assert_eq;

use crate::common::{build, mark, marker, nested_configuration, ty};

/// `Leaf -> Middle -> Top`, each declaring its own `@Profile`.
fn chain() -> TypeGraph {
    build(|b| {
        let profile = marker(b, "app::Profile");
        let top = b.class("app::Top");
        let middle = b.class("app::Middle");
        let leaf = b.class("app::Leaf");
        b.tag(top, mark(profile, "top"))
            .tag(middle, mark(profile, "middle"))
            .tag(leaf, mark(profile, "leaf"))
            .extends(middle, top)
            .extends(leaf, middle);
    })
}

#[test]
fn next_walks_the_parent_chain() {
    let graph = chain();
    let resolver = Resolver::new(&graph);
    let profile = ty(&graph, "app::Profile");

    let leaf = resolver
        .find_tag_descriptor(ty(&graph, "app::Leaf"), profile)
        .unwrap()
        .expect("present");
    assert_eq!(leaf.declaring_type(), ty(&graph, "app::Leaf"));

    let middle = leaf.next(&resolver).unwrap().expect("middle");
    assert_eq!(middle.declaring_type(), ty(&graph, "app::Middle"));
    assert_eq!(middle.tag(), &mark(profile, "middle"));

    let top = middle.next(&resolver).unwrap().expect("top");
    assert_eq!(top.declaring_type(), ty(&graph, "app::Top"));

    assert_eq!(top.next(&resolver).unwrap(), None);
}

#[test]
fn next_after_meta_match_starts_at_the_parent() {
    let graph = build(|b| {
        let profile = marker(b, "app::Profile");
        let dev = b.tag_type("app::DevProfile");
        let base = b.class("app::Base");
        let derived = b.class("app::Derived");
        b.tag(dev, mark(profile, "dev"))
            .tag(base, mark(profile, "base"))
            .tag(derived, Tag::new(dev))
            .extends(derived, base);
    });
    let resolver = Resolver::new(&graph);

    let first = resolver
        .find_tag_descriptor(ty(&graph, "app::Derived"), ty(&graph, "app::Profile"))
        .unwrap()
        .expect("meta-present");
    assert_eq!(first.declaring_type(), ty(&graph, "app::DevProfile"));

    let second = first.next(&resolver).unwrap().expect("parent");
    assert_eq!(second.root_declaring_type(), ty(&graph, "app::Base"));
    assert_eq!(second.composed_tag(), None);
}

#[test]
fn next_continues_into_enclosing_types() {
    let graph = build(|b| {
        let profile = marker(b, "app::Profile");
        let outer = b.class("app::Outer");
        let inner = b.class("app::Outer::Inner");
        b.tag(outer, mark(profile, "outer"))
            .tag(outer, nested_configuration("Inherit"))
            .tag(inner, mark(profile, "inner"))
            .nested_in(inner, outer);
    });
    let resolver = Resolver::new(&graph);

    let inner = resolver
        .find_tag_descriptor(ty(&graph, "app::Outer::Inner"), ty(&graph, "app::Profile"))
        .unwrap()
        .expect("present");
    let outer = inner.next(&resolver).unwrap().expect("enclosing");

    assert_eq!(outer.declaring_type(), ty(&graph, "app::Outer"));
    assert_eq!(outer.next(&resolver).unwrap(), None);
}

#[test]
fn candidate_next_uses_retained_candidates() {
    let graph = build(|b| {
        let profile = marker(b, "app::Profile");
        let active = marker(b, "app::Active");
        let base = b.class("app::Base");
        let derived = b.class("app::Derived");
        b.tag(base, mark(active, "base"))
            .tag(derived, mark(profile, "derived"))
            .extends(derived, base);
    });
    let resolver = Resolver::new(&graph);
    let candidates = [ty(&graph, "app::Profile"), ty(&graph, "app::Active")];

    let first = resolver
        .find_candidate_descriptor(ty(&graph, "app::Derived"), &candidates)
        .unwrap()
        .expect("present");
    assert_eq!(first.tag_type(), ty(&graph, "app::Profile"));

    let second = first.next(&resolver).unwrap().expect("parent");
    assert_eq!(second.tag_type(), ty(&graph, "app::Active"));
    assert_eq!(second.declaring_type, ty(&graph, "app::Base"));

    assert_eq!(second.next(&resolver).unwrap(), None);
}

#[test]
fn repeatable_next() {
    let graph = build(|b| {
        let sql = marker(b, "app::Sql");
        let group = b.tag_type("app::SqlGroup");
        let base = b.class("app::BaseTest");
        let derived = b.class("app::DerivedTest");
        b.repeatable(sql, group)
            .tag(base, mark(sql, "base.sql"))
            .tag(derived, mark(sql, "derived.sql"))
            .extends(derived, base);
    });
    let resolver = Resolver::new(&graph);
    let sql = ty(&graph, "app::Sql");

    let first = resolver
        .find_repeatable_descriptor(ty(&graph, "app::DerivedTest"), sql)
        .unwrap()
        .expect("present");
    let second = first.next(&resolver).unwrap().expect("parent");

    assert_eq!(second.tags(), &[mark(sql, "base.sql")]);
    assert_eq!(second.next(&resolver).unwrap(), None);
}
