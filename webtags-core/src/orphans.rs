//! Orphan detection
//!
//! An orphan is a definition that did not end up in any bucket of the built tree. Typical
//! causes are attributes scoped to an element the elements extract does not list, and values
//! scoped to an attribute nobody defines. Orphans are findings, never errors.

use crate::definitions::{AttributeDefinition, AttributeValueDefinition, Definitions};
use crate::tree::{Attribute, Element};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Orphans {
    pub attributes: Vec<AttributeDefinition>,
    pub values: Vec<AttributeValueDefinition>,
}

impl Orphans {
    /// Cross-check the built buckets against the flat definitions. Keeps input order.
    pub fn detect(
        global_attributes: &[Attribute],
        elements: &[Element],
        definitions: &Definitions,
    ) -> Self {
        let used: Vec<&Attribute> = global_attributes
            .iter()
            .chain(elements.iter().flat_map(|element| element.attributes.iter()))
            .collect();

        let used_names: HashSet<&str> = used.iter().map(|a| a.name.as_str()).collect();
        let used_values: HashSet<&str> = used
            .iter()
            .flat_map(|a| a.values.iter())
            .map(|v| v.value.as_str())
            .collect();

        Orphans {
            attributes: definitions
                .attributes
                .iter()
                .filter(|a| !used_names.contains(a.name.as_str()))
                .cloned()
                .collect(),
            values: definitions
                .values
                .iter()
                .filter(|v| !used_values.contains(v.value.as_str()))
                .cloned()
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty() && self.values.is_empty()
    }
}
