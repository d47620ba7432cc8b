//! Single tag type resolution.

use hallmark_ir::{AttrValue, Tag, TypeId};
use hallmark_resolve::{ErrorKind, ResolveError, Resolver};
use pretty_assertions::assert_eq;

use crate::common::{build, mark, marker, ty};

#[test]
fn local_declaration() {
    let graph = build(|b| {
        let transactional = marker(b, "app::Transactional");
        let service = b.class("app::Service");
        b.tag(service, mark(transactional, "local"));
    });
    let transactional = ty(&graph, "app::Transactional");
    let service = ty(&graph, "app::Service");
    let resolver = Resolver::new(&graph);

    let descriptor = resolver
        .find_tag_descriptor(service, transactional)
        .unwrap()
        .expect("declared locally");

    assert_eq!(descriptor.root_declaring_type(), service);
    assert_eq!(descriptor.declaring_type(), service);
    assert_eq!(descriptor.composed_tag(), None);
    assert_eq!(descriptor.tag(), &mark(transactional, "local"));
}

#[test]
fn meta_tag_is_one_hop_of_provenance() {
    // @Component on @Service on @RestService on Controller
    let graph = build(|b| {
        let component = marker(b, "app::Component");
        let service = b.tag_type("app::Service");
        let rest_service = b.tag_type("app::RestService");
        let controller = b.class("app::Controller");
        b.tag(service, mark(component, "deep"))
            .tag(rest_service, Tag::new(service))
            .tag(controller, Tag::new(rest_service));
    });
    let component = ty(&graph, "app::Component");
    let service = ty(&graph, "app::Service");
    let rest_service = ty(&graph, "app::RestService");
    let controller = ty(&graph, "app::Controller");
    let resolver = Resolver::new(&graph);

    let descriptor = resolver
        .find_tag_descriptor(controller, component)
        .unwrap()
        .expect("meta-present");

    assert_eq!(descriptor.root_declaring_type(), controller);
    assert_eq!(descriptor.declaring_type(), service);
    assert_eq!(descriptor.composed_tag(), Some(&Tag::new(rest_service)));
    assert_eq!(descriptor.composed_tag_type(), Some(rest_service));
    assert_eq!(descriptor.tag(), &mark(component, "deep"));
}

#[test]
fn local_declaration_wins_over_meta_tag() {
    let graph = build(|b| {
        let component = marker(b, "app::Component");
        let service = b.tag_type("app::Service");
        let both = b.class("app::Both");
        b.tag(service, mark(component, "meta"))
            .tag(both, Tag::new(service))
            .tag(both, mark(component, "local"));
    });
    let component = ty(&graph, "app::Component");
    let resolver = Resolver::new(&graph);

    let descriptor = resolver
        .find_tag_descriptor(ty(&graph, "app::Both"), component)
        .unwrap()
        .expect("present");

    assert_eq!(descriptor.composed_tag(), None);
    assert_eq!(descriptor.tag(), &mark(component, "local"));
    assert_eq!(descriptor.attribute("value"), Some(&AttrValue::str("local")));
}

#[test]
fn parent_match_matches_resolving_the_parent() {
    let graph = build(|b| {
        let transactional = marker(b, "app::Transactional");
        let base = b.class("app::Base");
        let derived = b.class("app::Derived");
        b.tag(base, mark(transactional, "base")).extends(derived, base);
    });
    let transactional = ty(&graph, "app::Transactional");
    let base = ty(&graph, "app::Base");
    let derived = ty(&graph, "app::Derived");
    let resolver = Resolver::new(&graph);

    let from_derived = resolver
        .find_tag_descriptor(derived, transactional)
        .unwrap()
        .expect("inherited");
    let from_base = resolver
        .find_tag_descriptor(base, transactional)
        .unwrap()
        .expect("present");

    assert_eq!(from_derived.declaring_type(), from_base.declaring_type());
    assert_eq!(from_derived.tag(), from_base.tag());
    // The parent axis passes the ancestor's anchor through unchanged.
    assert_eq!(from_derived.root_declaring_type(), base);
}

#[test]
fn interface_axis() {
    let graph = build(|b| {
        let transactional = marker(b, "app::Transactional");
        let repository = b.interface("app::Repository");
        let crud = b.interface("app::CrudRepository");
        let users = b.class("app::Users");
        b.tag(repository, mark(transactional, "interface"))
            .implements(crud, repository)
            .implements(users, crud);
    });
    let transactional = ty(&graph, "app::Transactional");
    let repository = ty(&graph, "app::Repository");
    let users = ty(&graph, "app::Users");
    let resolver = Resolver::new(&graph);

    let descriptor = resolver
        .find_tag_descriptor(users, transactional)
        .unwrap()
        .expect("through interfaces");

    assert_eq!(descriptor.root_declaring_type(), users);
    assert_eq!(descriptor.declaring_type(), repository);
    assert_eq!(descriptor.composed_tag(), None);
}

#[test]
fn interface_axis_keeps_inner_composed_tag() {
    let graph = build(|b| {
        let transactional = marker(b, "app::Transactional");
        let service = b.tag_type("app::Service");
        let api = b.interface("app::Api");
        let endpoint = b.class("app::Endpoint");
        b.tag(service, mark(transactional, "meta"))
            .tag(api, Tag::new(service))
            .implements(endpoint, api);
    });
    let service = ty(&graph, "app::Service");
    let endpoint = ty(&graph, "app::Endpoint");
    let resolver = Resolver::new(&graph);

    let descriptor = resolver
        .find_tag_descriptor(endpoint, ty(&graph, "app::Transactional"))
        .unwrap()
        .expect("meta-present on interface");

    assert_eq!(descriptor.root_declaring_type(), endpoint);
    assert_eq!(descriptor.declaring_type(), service);
    assert_eq!(descriptor.composed_tag(), Some(&Tag::new(service)));
}

#[test]
fn interfaces_are_searched_before_the_parent() {
    let graph = build(|b| {
        let transactional = marker(b, "app::Transactional");
        let api = b.interface("app::Api");
        let base = b.class("app::Base");
        let derived = b.class("app::Derived");
        b.tag(api, mark(transactional, "interface"))
            .tag(base, mark(transactional, "parent"))
            .extends(derived, base)
            .implements(derived, api);
    });
    let resolver = Resolver::new(&graph);

    let descriptor = resolver
        .find_tag_descriptor(ty(&graph, "app::Derived"), ty(&graph, "app::Transactional"))
        .unwrap()
        .expect("present");

    assert_eq!(descriptor.declaring_type(), ty(&graph, "app::Api"));
}

#[test]
fn mutually_meta_tagged_types_terminate() {
    let graph = build(|b| {
        let x = b.tag_type("app::X");
        let y = b.tag_type("app::Y");
        b.tag_type("app::Z");
        let subject = b.class("app::Subject");
        b.tag(x, Tag::new(y)).tag(y, Tag::new(x)).tag(subject, Tag::new(x));
    });
    let resolver = Resolver::new(&graph);
    let subject = ty(&graph, "app::Subject");
    let z = ty(&graph, "app::Z");

    assert_eq!(resolver.find_tag_descriptor(subject, z).unwrap(), None);
    assert_eq!(resolver.find_candidate_descriptor(subject, &[z]).unwrap(), None);
    assert_eq!(resolver.find_repeatable_descriptor(subject, z).unwrap(), None);
}

#[test]
fn resolution_is_idempotent() {
    let graph = build(|b| {
        let component = marker(b, "app::Component");
        let service = b.tag_type("app::Service");
        let base = b.class("app::Base");
        let derived = b.class("app::Derived");
        b.tag(service, mark(component, "meta"))
            .tag(base, Tag::new(service))
            .extends(derived, base);
    });
    let resolver = Resolver::new(&graph);
    let derived = ty(&graph, "app::Derived");
    let component = ty(&graph, "app::Component");

    let first = resolver.find_tag_descriptor(derived, component).unwrap();
    let second = resolver.find_tag_descriptor(derived, component).unwrap();
    assert!(first.is_some());
    assert_eq!(first, second);
}

#[test]
fn universal_root_and_unknown_types_resolve_to_none() {
    let graph = build(|b| {
        marker(b, "app::Transactional");
    });
    let resolver = Resolver::new(&graph);
    let transactional = ty(&graph, "app::Transactional");

    assert_eq!(
        resolver
            .find_tag_descriptor(TypeId::OBJECT, transactional)
            .unwrap(),
        None
    );
    assert_eq!(
        resolver
            .find_tag_descriptor(TypeId::from_raw(9_999), transactional)
            .unwrap(),
        None
    );
}

#[test]
fn invalid_tag_types_are_rejected() {
    let graph = build(|b| {
        b.class("app::Plain");
    });
    let resolver = Resolver::new(&graph);
    let plain = ty(&graph, "app::Plain");

    let error = resolver.find_tag_descriptor(plain, plain).unwrap_err();
    assert_eq!(error, ResolveError::NotATagType(plain));
    assert_eq!(error.kind(), ErrorKind::InvalidArgument);

    let error = resolver
        .find_tag_descriptor(plain, TypeId::DOCUMENTED)
        .unwrap_err();
    assert_eq!(error, ResolveError::ReservedTagType(TypeId::DOCUMENTED));
    assert_eq!(error.kind(), ErrorKind::InvalidArgument);

    let error = resolver
        .find_repeatable_descriptor(plain, plain)
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::InvalidArgument);
}
