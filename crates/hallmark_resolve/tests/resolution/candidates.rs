//! First of several candidate tag types.

use hallmark_ir::Tag;
use hallmark_resolve::{ErrorKind, ResolveError, Resolver};
use pretty_assertions::assert_eq;

use crate::common::{build, mark, marker, ty};

fn universe() -> hallmark_types::TypeGraph {
    build(|b| {
        let transactional = marker(b, "app::Transactional");
        let cached = marker(b, "app::Cached");
        let service = b.tag_type("app::Service");
        let base = b.class("app::Base");
        let derived = b.class("app::Derived");
        let composed = b.class("app::Composed");
        b.tag(base, mark(transactional, "base"))
            .tag(derived, mark(cached, "derived"))
            .tag(derived, mark(transactional, "derived"))
            .extends(derived, base)
            .tag(service, mark(cached, "meta"))
            .tag(composed, Tag::new(service));
    })
}

#[test]
fn empty_candidates_are_rejected() {
    let graph = universe();
    let resolver = Resolver::new(&graph);

    let error = resolver
        .find_candidate_descriptor(ty(&graph, "app::Base"), &[])
        .unwrap_err();
    assert_eq!(error, ResolveError::EmptyCandidates);
    assert_eq!(error.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn non_tag_candidates_are_rejected() {
    let graph = universe();
    let resolver = Resolver::new(&graph);
    let base = ty(&graph, "app::Base");

    let error = resolver
        .find_candidate_descriptor(base, &[ty(&graph, "app::Transactional"), base])
        .unwrap_err();
    assert_eq!(error, ResolveError::NotATagType(base));
    assert_eq!(error.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn candidate_order_decides_within_a_type() {
    let graph = universe();
    let resolver = Resolver::new(&graph);
    let transactional = ty(&graph, "app::Transactional");
    let cached = ty(&graph, "app::Cached");
    let derived = ty(&graph, "app::Derived");

    let descriptor = resolver
        .find_candidate_descriptor(derived, &[transactional, cached])
        .unwrap()
        .expect("present");
    assert_eq!(descriptor.tag, mark(transactional, "derived"));

    let descriptor = resolver
        .find_candidate_descriptor(derived, &[cached, transactional])
        .unwrap()
        .expect("present");
    assert_eq!(descriptor.tag, mark(cached, "derived"));
}

#[test]
fn nearer_type_wins_over_candidate_order() {
    let graph = build(|b| {
        let transactional = marker(b, "app::Transactional");
        let cached = marker(b, "app::Cached");
        let base = b.class("app::Base");
        let derived = b.class("app::Derived");
        b.tag(base, mark(transactional, "base"))
            .tag(derived, mark(cached, "derived"))
            .extends(derived, base);
    });
    let resolver = Resolver::new(&graph);
    let derived = ty(&graph, "app::Derived");

    let descriptor = resolver
        .find_candidate_descriptor(
            derived,
            &[ty(&graph, "app::Transactional"), ty(&graph, "app::Cached")],
        )
        .unwrap()
        .expect("present");

    assert_eq!(descriptor.declaring_type, derived);
    assert_eq!(descriptor.tag_type(), ty(&graph, "app::Cached"));
}

#[test]
fn meta_present_candidate_is_a_match_record() {
    let graph = universe();
    let resolver = Resolver::new(&graph);
    let transactional = ty(&graph, "app::Transactional");
    let cached = ty(&graph, "app::Cached");
    let service = ty(&graph, "app::Service");
    let composed = ty(&graph, "app::Composed");

    let descriptor = resolver
        .find_candidate_descriptor(composed, &[transactional, cached])
        .unwrap()
        .expect("meta-present");

    let matched = match descriptor.tag.ty {
        t if t == transactional => "transactional",
        t if t == cached => "cached",
        _ => "other",
    };
    assert_eq!(matched, "cached");
    assert_eq!(descriptor.root_declaring_type, composed);
    assert_eq!(descriptor.declaring_type, service);
    assert_eq!(descriptor.composed_tag, Some(Tag::new(service)));
    assert_eq!(
        descriptor.candidates.as_deref(),
        Some(&[transactional, cached][..])
    );
}
