//! Hallmark IR - the vocabulary shared by every hallmark crate.
//!
//! - [`TypeId`]: 32-bit handle to a type declaration, with fixed ids for the
//!   built-in types every universe carries
//! - [`Tag`]: a tag instance (tag type + explicitly written attributes)
//! - [`AttrValue`] / [`Attributes`]: attribute values, nested tags included
//! - [`EnclosingConfiguration`]: the value of the nested-configuration tag
//!
//! Every type here is `Clone + Eq + Hash + Debug`. Tag instances are compared
//! by value, which is what cycle detection during meta-tag traversal relies on.

mod enclosing;
mod tag;
mod type_id;

pub use enclosing::{EnclosingConfiguration, ParseEnclosingError};
pub use tag::{AttrValue, Attributes, Tag};
pub use type_id::TypeId;
