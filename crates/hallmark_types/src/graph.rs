//! The type universe and its builder.
//!
//! # Design
//!
//! - Declarations live in a `Vec` indexed by raw `TypeId`; the reserved
//!   built-in range leaves holes, so slots are `Option`
//! - Names are indexed by `BTreeMap` for deterministic iteration
//! - Structural errors are collected while building and reported by `build()`

use std::collections::BTreeMap;

use hallmark_ir::{AttrValue, Tag, TypeId};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::decl::{AttrAlias, AttrDecl, TypeDecl, TypeFlags, TypeKind};
use crate::{BuildError, TypeIntrospector};

/// An immutable universe of type declarations.
#[derive(Clone, Debug)]
pub struct TypeGraph {
    /// Declarations indexed by raw `TypeId`.
    decls: Vec<Option<TypeDecl>>,

    /// Qualified name -> handle.
    by_name: BTreeMap<String, TypeId>,
}

impl TypeGraph {
    /// Start building a universe. The built-in types are pre-registered.
    pub fn builder() -> TypeGraphBuilder {
        TypeGraphBuilder::new()
    }

    /// Look up a declaration.
    #[inline]
    pub fn get(&self, ty: TypeId) -> Option<&TypeDecl> {
        self.decls.get(ty.index()).and_then(Option::as_ref)
    }

    /// Look up a type by qualified name.
    pub fn lookup(&self, name: &str) -> Option<TypeId> {
        self.by_name.get(name).copied()
    }

    /// Number of declared types, built-ins included.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Whether no types are declared. The built-ins make this false for any
    /// graph returned by [`TypeGraphBuilder::build`].
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// All declarations in name order.
    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &TypeDecl)> {
        self.by_name
            .values()
            .filter_map(|&ty| self.get(ty).map(|decl| (ty, decl)))
    }

    /// The container tag type of a repeatable tag type.
    ///
    /// Read from the `lang::tag::Repeatable` tag on the tag type's declaration.
    pub fn repeatable_container(&self, tag_type: TypeId) -> Option<TypeId> {
        self.declared_tag(tag_type, TypeId::REPEATABLE)
            .and_then(|tag| tag.attribute("value"))
            .and_then(AttrValue::as_type)
    }
}

impl TypeIntrospector for TypeGraph {
    fn declared_tags(&self, ty: TypeId) -> &[Tag] {
        self.get(ty).map_or(&[][..], |decl| decl.tags.as_slice())
    }

    fn parent(&self, ty: TypeId) -> Option<TypeId> {
        self.get(ty).and_then(|decl| decl.parent)
    }

    fn interfaces(&self, ty: TypeId) -> &[TypeId] {
        self.get(ty).map_or(&[][..], |decl| decl.interfaces.as_slice())
    }

    fn enclosing(&self, ty: TypeId) -> Option<TypeId> {
        self.get(ty).and_then(|decl| decl.enclosing)
    }

    fn is_tag_type(&self, ty: TypeId) -> bool {
        self.get(ty).is_some_and(TypeDecl::is_tag_type)
    }

    fn is_reserved(&self, tag_type: TypeId) -> bool {
        self.get(tag_type).is_some_and(TypeDecl::is_reserved)
    }

    fn type_name(&self, ty: TypeId) -> Option<&str> {
        self.get(ty).map(|decl| decl.name.as_str())
    }
}

/// Incremental construction of a [`TypeGraph`].
///
/// Declaration methods hand out handles immediately so declarations can
/// reference each other in any order; validation happens in [`build`](Self::build).
#[derive(Clone, Debug)]
pub struct TypeGraphBuilder {
    decls: Vec<Option<TypeDecl>>,
    by_name: BTreeMap<String, TypeId>,
    errors: Vec<BuildError>,
}

impl TypeGraphBuilder {
    fn new() -> Self {
        let mut builder = Self {
            decls: Vec::new(),
            by_name: BTreeMap::new(),
            errors: Vec::new(),
        };
        builder.register_builtins();
        builder
    }

    fn register_builtins(&mut self) {
        let builtins = [
            (TypeId::OBJECT, TypeKind::Class),
            (TypeId::RETENTION, TypeKind::TagType),
            (TypeId::DOCUMENTED, TypeKind::TagType),
            (TypeId::INHERITED, TypeKind::TagType),
            (TypeId::REPEATABLE, TypeKind::TagType),
            (TypeId::NESTED_CONFIGURATION, TypeKind::TagType),
        ];
        for (ty, kind) in builtins {
            if let Some(name) = ty.builtin_name() {
                self.insert(ty, TypeDecl::new(name.to_owned(), kind));
            }
        }
        self.decls.resize_with(TypeId::FIRST_DYNAMIC as usize, || None);

        self.attribute(TypeId::RETENTION, "value", Some(AttrValue::variant("Runtime")));
        self.attribute(TypeId::REPEATABLE, "value", None);
        self.attribute(TypeId::NESTED_CONFIGURATION, "value", None);
        self.tag(TypeId::NESTED_CONFIGURATION, Tag::new(TypeId::DOCUMENTED));
        self.tag(TypeId::NESTED_CONFIGURATION, Tag::new(TypeId::INHERITED));
    }

    fn insert(&mut self, ty: TypeId, decl: TypeDecl) {
        self.by_name.insert(decl.name.clone(), ty);
        let index = ty.index();
        if self.decls.len() <= index {
            self.decls.resize_with(index + 1, || None);
        }
        self.decls[index] = Some(decl);
    }

    fn declare(&mut self, name: &str, kind: TypeKind) -> TypeId {
        if name.starts_with("lang::") {
            self.errors.push(BuildError::ReservedName(name.to_owned()));
        }
        if let Some(&existing) = self.by_name.get(name) {
            self.errors.push(BuildError::DuplicateName(name.to_owned()));
            return existing;
        }
        let raw = u32::try_from(self.decls.len()).unwrap_or(u32::MAX);
        let ty = TypeId::from_raw(raw);
        let mut decl = TypeDecl::new(name.to_owned(), kind);
        if kind == TypeKind::Class {
            decl.parent = Some(TypeId::OBJECT);
        }
        self.insert(ty, decl);
        ty
    }

    fn decl_mut(&mut self, ty: TypeId) -> Option<&mut TypeDecl> {
        let found = self.decls.get_mut(ty.index()).and_then(Option::as_mut);
        if found.is_none() {
            self.errors.push(BuildError::UnknownType(ty));
        }
        found
    }

    /// Declare a class. Its parent defaults to the universal root.
    pub fn class(&mut self, name: &str) -> TypeId {
        self.declare(name, TypeKind::Class)
    }

    /// Declare an interface.
    pub fn interface(&mut self, name: &str) -> TypeId {
        self.declare(name, TypeKind::Interface)
    }

    /// Declare a tag type.
    pub fn tag_type(&mut self, name: &str) -> TypeId {
        self.declare(name, TypeKind::TagType)
    }

    /// Set the parent class of `ty`.
    pub fn extends(&mut self, ty: TypeId, parent: TypeId) -> &mut Self {
        if let Some(decl) = self.decl_mut(ty) {
            decl.parent = Some(parent);
        }
        self
    }

    /// Add an implemented interface (or, for interfaces, an extended one).
    pub fn implements(&mut self, ty: TypeId, interface: TypeId) -> &mut Self {
        if let Some(decl) = self.decl_mut(ty) {
            decl.interfaces.push(interface);
        }
        self
    }

    /// Nest `ty` lexically inside `enclosing`.
    pub fn nested_in(&mut self, ty: TypeId, enclosing: TypeId) -> &mut Self {
        if let Some(decl) = self.decl_mut(ty) {
            decl.enclosing = Some(enclosing);
            decl.flags |= TypeFlags::NESTED;
        }
        self
    }

    /// Write a tag on the declaration of `ty`.
    pub fn tag(&mut self, ty: TypeId, tag: Tag) -> &mut Self {
        if let Some(decl) = self.decl_mut(ty) {
            decl.tags.push(tag);
        }
        self
    }

    /// Declare an attribute on a tag type.
    pub fn attribute(
        &mut self,
        tag_type: TypeId,
        name: &str,
        default: Option<AttrValue>,
    ) -> &mut Self {
        if let Some(decl) = self.decl_mut(tag_type) {
            decl.attributes.push(AttrDecl {
                name: name.to_owned(),
                default,
            });
        }
        self
    }

    /// Declare that `attribute` of `composed` overrides `target_attribute` of
    /// `target` wherever `target` is reached through `composed`.
    pub fn alias(
        &mut self,
        composed: TypeId,
        attribute: &str,
        target: TypeId,
        target_attribute: &str,
    ) -> &mut Self {
        if let Some(decl) = self.decl_mut(composed) {
            decl.aliases.push(AttrAlias {
                attribute: attribute.to_owned(),
                target,
                target_attribute: target_attribute.to_owned(),
            });
        }
        self
    }

    /// Make `tag_type` repeatable, collected by the `container` tag type.
    ///
    /// Writes `@lang::tag::Repeatable(value = container)` on `tag_type` and
    /// declares the container's `value` attribute.
    pub fn repeatable(&mut self, tag_type: TypeId, container: TypeId) -> &mut Self {
        self.tag(
            tag_type,
            Tag::new(TypeId::REPEATABLE).with("value", AttrValue::Type(container)),
        );
        self.attribute(container, "value", Some(AttrValue::Array(Vec::new())))
    }

    /// Validate and freeze the universe.
    pub fn build(self) -> Result<TypeGraph, BuildError> {
        if let Some(error) = self.errors.into_iter().next() {
            return Err(error);
        }
        let graph = TypeGraph {
            decls: self.decls,
            by_name: self.by_name,
        };
        validate(&graph)?;
        tracing::debug!(types = graph.len(), "type graph built");
        Ok(graph)
    }
}

fn validate(graph: &TypeGraph) -> Result<(), BuildError> {
    let name = |ty: TypeId| graph.display_type(ty);
    for (_, decl) in graph.iter() {
        if let Some(parent) = decl.parent {
            let parent_decl = graph.get(parent).ok_or(BuildError::UnknownType(parent))?;
            if decl.kind != TypeKind::Class {
                return Err(BuildError::ParentOnNonClass(decl.name.clone()));
            }
            if parent_decl.kind != TypeKind::Class {
                return Err(BuildError::InvalidParent {
                    ty: decl.name.clone(),
                    parent: parent_decl.name.clone(),
                });
            }
        }
        for &interface in &decl.interfaces {
            let interface_decl = graph.get(interface).ok_or(BuildError::UnknownType(interface))?;
            if !interface_decl.is_interface() {
                return Err(BuildError::NotAnInterface {
                    ty: decl.name.clone(),
                    interface: interface_decl.name.clone(),
                });
            }
        }
        if let Some(enclosing) = decl.enclosing {
            graph.get(enclosing).ok_or(BuildError::UnknownType(enclosing))?;
        }
        for tag in &decl.tags {
            if !graph.is_tag_type(tag.ty) {
                return Err(BuildError::NotATagType {
                    ty: decl.name.clone(),
                    tag: name(tag.ty),
                });
            }
        }
        for alias in &decl.aliases {
            if !graph.is_tag_type(alias.target) {
                return Err(BuildError::NotATagType {
                    ty: decl.name.clone(),
                    tag: name(alias.target),
                });
            }
        }
    }
    if let Some(ty) = find_cycle(graph, |t| graph.parent(t)) {
        return Err(BuildError::ParentCycle(name(ty)));
    }
    if let Some(ty) = find_cycle(graph, |t| graph.enclosing(t)) {
        return Err(BuildError::EnclosingCycle(name(ty)));
    }
    if let Some(ty) = find_inheritance_cycle(graph) {
        return Err(BuildError::InheritanceCycle(name(ty)));
    }
    Ok(())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    /// On the current DFS path.
    Grey,
    /// Fully explored; no cycle reachable.
    Black,
}

/// Successors a resolution may step to from `ty`: parent, interfaces,
/// enclosing type.
fn successors(graph: &TypeGraph, ty: TypeId) -> impl Iterator<Item = TypeId> + '_ {
    graph
        .parent(ty)
        .into_iter()
        .chain(graph.interfaces(ty).iter().copied())
        .chain(graph.enclosing(ty))
}

/// Find a type on a cycle of the combined parent/interface/enclosing
/// relation.
///
/// Iterative DFS with grey/black marking.
fn find_inheritance_cycle(graph: &TypeGraph) -> Option<TypeId> {
    let mut marks: FxHashMap<TypeId, Mark> = FxHashMap::default();
    let mut stack: Vec<(TypeId, Vec<TypeId>)> = Vec::new();
    for (start, _) in graph.iter() {
        if marks.contains_key(&start) {
            continue;
        }
        marks.insert(start, Mark::Grey);
        stack.push((start, successors(graph, start).collect()));
        while let Some((ty, pending)) = stack.last_mut() {
            let ty = *ty;
            let Some(next) = pending.pop() else {
                marks.insert(ty, Mark::Black);
                stack.pop();
                continue;
            };
            match marks.get(&next) {
                Some(Mark::Grey) => return Some(next),
                Some(Mark::Black) => {}
                None => {
                    marks.insert(next, Mark::Grey);
                    stack.push((next, successors(graph, next).collect()));
                }
            }
        }
    }
    None
}

/// Find a type whose single-successor chain (parent or enclosing) loops.
///
/// Chains already proven to terminate are not walked again, so a deep
/// hierarchy is checked in linear time.
fn find_cycle(graph: &TypeGraph, next: impl Fn(TypeId) -> Option<TypeId>) -> Option<TypeId> {
    let mut terminates = FxHashSet::default();
    for (start, _) in graph.iter() {
        let mut walk = FxHashSet::default();
        let mut current = Some(start);
        while let Some(ty) = current {
            if terminates.contains(&ty) {
                break;
            }
            if !walk.insert(ty) {
                return Some(start);
            }
            current = next(ty);
        }
        terminates.extend(walk);
    }
    None
}
