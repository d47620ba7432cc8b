//! Nested-configuration lookup.

use hallmark_ir::{AttrValue, EnclosingConfiguration, TypeId};

use crate::{EnclosingConfigReader, TypeGraph, TypeIntrospector};

impl EnclosingConfigReader for TypeGraph {
    /// First `hallmark::NestedConfiguration` in the full hierarchy of `ty`
    /// (interfaces, parents and enclosing types, unconditionally).
    fn enclosing_configuration(&self, ty: TypeId) -> Option<EnclosingConfiguration> {
        let (declaring, attributes) = self.hierarchy(ty, true).into_iter().find_map(|candidate| {
            self.scan(candidate)
                .into_iter()
                .find(|scanned| scanned.tag.ty == TypeId::NESTED_CONFIGURATION)
                .map(|scanned| (candidate, self.merge_scanned(&scanned)))
        })?;

        let value = attributes.get("value").and_then(AttrValue::as_enum);
        let configuration = value.and_then(EnclosingConfiguration::from_variant);
        if configuration.is_none() {
            tracing::warn!(
                ty = %self.display_type(declaring),
                value = ?value,
                "nested configuration without a valid `value`; treating as absent"
            );
        }
        configuration
    }
}
