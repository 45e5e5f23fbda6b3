//! Tree building
//!
//! Materializes the "for" relations into the nested output:
//!
//!     SpecResult
//!     ├── globalAttributes: [Attribute { values: [AttributeValue] }]
//!     └── elements: [Element { attributes: [Attribute { values: [AttributeValue] }] }]
//!
//! An attribute that applies to several elements is built once per element, each copy with
//! the values that are valid on that element. Copies never share value lists.
//!
//! Ordering follows the input lists. Nothing is sorted here; the serializer may sort keys,
//! never sequences.

use crate::crawl::{self, CrawlResult, Dfn};
use crate::definitions::{AttributeDefinition, AttributeValueDefinition, Definitions};
use crate::error::InvalidDefinitionError;
use crate::orphans::Orphans;
use crate::scope::{attribute_applies_to_element, value_applies_to, GlobalScope};
use serde::Serialize;
use std::iter;
use url::Url;

/// The resolved tree for one specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecResult {
    pub organization: String,
    pub title: String,
    pub shortname: String,
    pub url: Url,
    pub date: String,
    pub global_attributes: Vec<Attribute>,
    pub elements: Vec<Element>,
    /// Diagnostics only, not part of the output schema.
    #[serde(skip)]
    pub orphaned_attributes: Vec<AttributeDefinition>,
    #[serde(skip)]
    pub orphaned_attribute_values: Vec<AttributeValueDefinition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    pub name: String,
    pub obsolete: bool,
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub name: String,
    pub obsolete: bool,
    pub url: Url,
    pub values: Vec<AttributeValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeValue {
    pub value: String,
    pub obsolete: bool,
    pub url: Url,
}

impl SpecResult {
    /// Parse `dfns` and build the tree. Fails on the first invalid definition.
    pub fn from_crawl(
        result: &CrawlResult,
        elements: &[crawl::Element],
        dfns: &[Dfn],
        scope: &GlobalScope,
    ) -> Result<Self, InvalidDefinitionError> {
        let definitions = Definitions::parse(dfns)?;
        Ok(Self::build(result, elements, &definitions, scope))
    }

    /// Build the tree from already parsed definitions.
    pub fn build(
        result: &CrawlResult,
        elements: &[crawl::Element],
        definitions: &Definitions,
        scope: &GlobalScope,
    ) -> Self {
        let global_attributes = global_attributes(definitions, scope);
        let elements: Vec<Element> = elements
            .iter()
            .map(|element| Element::resolve(element, definitions))
            .collect();
        let orphans = Orphans::detect(&global_attributes, &elements, definitions);

        SpecResult {
            organization: result.organization.clone(),
            title: result.title.clone(),
            shortname: result.shortname.clone(),
            url: result.url.clone(),
            date: result.date.clone(),
            global_attributes,
            elements,
            orphaned_attributes: orphans.attributes,
            orphaned_attribute_values: orphans.values,
        }
    }
}

/// Attributes that apply everywhere, each with the values defined on a global identifier.
pub fn global_attributes(definitions: &Definitions, scope: &GlobalScope) -> Vec<Attribute> {
    definitions
        .attributes
        .iter()
        .filter(|attribute| scope.attribute_applies_globally(attribute))
        .map(|attribute| {
            Attribute::resolve(attribute, &definitions.values, |value| {
                scope.value_applies_globally(value, &attribute.name)
            })
        })
        .collect()
}

impl Element {
    pub fn resolve(element: &crawl::Element, definitions: &Definitions) -> Self {
        let name = element.name.as_str();
        let attributes = definitions
            .attributes
            .iter()
            .filter(|attribute| attribute_applies_to_element(attribute, name))
            .map(|attribute| {
                Attribute::resolve(attribute, &definitions.values, |value| {
                    value_applies_to(value, &attribute.name, iter::once(name))
                })
            })
            .collect();

        Element {
            name: element.name.clone(),
            obsolete: element.obsolete.unwrap_or(false),
            attributes,
        }
    }
}

impl Attribute {
    /// A fresh attribute carrying the values accepted by `applies`.
    pub fn resolve(
        definition: &AttributeDefinition,
        values: &[AttributeValueDefinition],
        applies: impl Fn(&AttributeValueDefinition) -> bool,
    ) -> Self {
        Attribute {
            name: definition.name.clone(),
            obsolete: definition.obsolete,
            url: definition.url.clone(),
            values: values
                .iter()
                .filter(|value| applies(value))
                .map(AttributeValue::from)
                .collect(),
        }
    }
}

impl From<&AttributeValueDefinition> for AttributeValue {
    fn from(definition: &AttributeValueDefinition) -> Self {
        AttributeValue {
            value: definition.value.clone(),
            obsolete: definition.obsolete,
            url: definition.url.clone(),
        }
    }
}
