//! Scope resolution
//!
//! The three "applies to" predicates. Nothing else in the crate looks at `for_set` or
//! `for_map` directly.
//!
//! Global attributes are spelled differently per spec family: HTML scopes them to `global`,
//! `html-global` or `htmlsvg-global`, SVG 2 to `core-attributes`. Which identifiers count as
//! global is configuration, carried by [`GlobalScope`].

use crate::definitions::{AttributeDefinition, AttributeValueDefinition};
use once_cell::sync::Lazy;
use std::collections::BTreeSet;

/// Identifiers webref uses for global attributes in the HTML and SVG 2 specs.
pub static DEFAULT_GLOBAL_IDS: Lazy<BTreeSet<String>> = Lazy::new(|| {
    ["global", "html-global", "htmlsvg-global", "core-attributes"]
        .into_iter()
        .map(String::from)
        .collect()
});

/// The set of element identifiers that mean "every element" for one spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalScope {
    ids: BTreeSet<String>,
}

impl GlobalScope {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        GlobalScope {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Unscoped attributes and attributes scoped to a global identifier.
    pub fn attribute_applies_globally(&self, attribute: &AttributeDefinition) -> bool {
        attribute.for_set.is_empty() || !attribute.for_set.is_disjoint(&self.ids)
    }

    /// Whether `value` is defined for `attribute` on any of the global identifiers.
    pub fn value_applies_globally(&self, value: &AttributeValueDefinition, attribute: &str) -> bool {
        value_applies_to(value, attribute, self.ids())
    }
}

impl Default for GlobalScope {
    fn default() -> Self {
        GlobalScope {
            ids: DEFAULT_GLOBAL_IDS.clone(),
        }
    }
}

pub fn attribute_applies_to_element(attribute: &AttributeDefinition, element: &str) -> bool {
    attribute.for_set.contains(element)
}

/// True if some element in `elements` lists `attribute` for this value.
pub fn value_applies_to<'a>(
    value: &AttributeValueDefinition,
    attribute: &str,
    elements: impl IntoIterator<Item = &'a str>,
) -> bool {
    elements.into_iter().any(|element| {
        value
            .for_map
            .get(element)
            .is_some_and(|attributes| attributes.contains(attribute))
    })
}
