//! Definition parsing
//!
//! Turns raw [`Dfn`] records into typed definitions. Only two record kinds matter:
//!
//! - `element-attr`: an attribute, scoped by the element names in its `for` list. An empty
//!   list means the attribute is unscoped and a candidate for the global bucket.
//! - `attr-value`: a predefined attribute value, scoped by `element/attribute` pairs.
//!
//! Every other kind is skipped. Records of the two kinds above that do not have the expected
//! shape fail the whole parse, there is no best effort mode.

use crate::crawl::Dfn;
use crate::error::InvalidDefinitionError;
use std::collections::{BTreeMap, BTreeSet};
use url::Url;

pub const ELEMENT_ATTR: &str = "element-attr";
pub const ATTR_VALUE: &str = "attr-value";

/// Definitions living on this page are obsolete.
pub const OBSOLETE_MARKER: &str = "obsolete.html";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDefinition {
    pub name: String,
    pub obsolete: bool,
    pub url: Url,
    /// Element identifiers this attribute is defined for. Empty means unscoped.
    pub for_set: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeValueDefinition {
    pub value: String,
    pub obsolete: bool,
    pub url: Url,
    /// Element identifier to the attribute names this value is valid for.
    pub for_map: BTreeMap<String, BTreeSet<String>>,
}

/// Outcome of parsing one relevant record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedDefinition {
    Attribute(AttributeDefinition),
    Value(AttributeValueDefinition),
}

/// Parse a single record. `Ok(None)` for kinds we do not care about.
pub fn parse_definition(dfn: &Dfn) -> Result<Option<ParsedDefinition>, InvalidDefinitionError> {
    if let Some(attribute) = AttributeDefinition::from_dfn(dfn)? {
        return Ok(Some(ParsedDefinition::Attribute(attribute)));
    }
    Ok(AttributeValueDefinition::from_dfn(dfn)?.map(ParsedDefinition::Value))
}

/// All attribute and value definitions of one spec, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Definitions {
    pub attributes: Vec<AttributeDefinition>,
    pub values: Vec<AttributeValueDefinition>,
}

impl Definitions {
    /// Parse every record, failing on the first invalid one.
    pub fn parse(dfns: &[Dfn]) -> Result<Self, InvalidDefinitionError> {
        let mut definitions = Definitions::default();
        for dfn in dfns {
            match parse_definition(dfn)? {
                Some(ParsedDefinition::Attribute(attribute)) => {
                    definitions.attributes.push(attribute)
                }
                Some(ParsedDefinition::Value(value)) => definitions.values.push(value),
                None => {}
            }
        }
        Ok(definitions)
    }
}

impl AttributeDefinition {
    pub fn from_dfn(dfn: &Dfn) -> Result<Option<Self>, InvalidDefinitionError> {
        if dfn.kind != ELEMENT_ATTR {
            return Ok(None);
        }
        let name = single_linking_text(dfn)?;

        let for_set: BTreeSet<String> = dfn.for_targets.iter().cloned().collect();
        if for_set.len() != dfn.for_targets.len() {
            return Err(InvalidDefinitionError::new(
                "Duplicate `for` values on dfn.",
                dfn,
            ));
        }

        Ok(Some(AttributeDefinition {
            name,
            obsolete: is_obsolete(&dfn.href),
            url: dfn.href.clone(),
            for_set,
        }))
    }
}

impl AttributeValueDefinition {
    pub fn from_dfn(dfn: &Dfn) -> Result<Option<Self>, InvalidDefinitionError> {
        if dfn.kind != ATTR_VALUE {
            return Ok(None);
        }
        let value = single_linking_text(dfn)?;

        let mut for_map: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for target in &dfn.for_targets {
            let (element, attribute) = split_target(target).ok_or_else(|| {
                InvalidDefinitionError::new(format!("Invalid 'for' value '{}'.", target), dfn)
            })?;
            for_map
                .entry(element.to_string())
                .or_default()
                .insert(attribute.to_string());
        }

        Ok(Some(AttributeValueDefinition {
            value,
            obsolete: is_obsolete(&dfn.href),
            url: dfn.href.clone(),
            for_map,
        }))
    }
}

fn single_linking_text(dfn: &Dfn) -> Result<String, InvalidDefinitionError> {
    match dfn.linking_text.as_slice() {
        [text] => Ok(text.clone()),
        _ => Err(InvalidDefinitionError::new(
            "Not exactly one linking text in dfn.",
            dfn,
        )),
    }
}

/// `element/attribute`, both sides non-empty, exactly one separator.
fn split_target(target: &str) -> Option<(&str, &str)> {
    let (element, attribute) = target.split_once('/')?;
    if element.is_empty() || attribute.is_empty() || attribute.contains('/') {
        return None;
    }
    Some((element, attribute))
}

fn is_obsolete(href: &Url) -> bool {
    href.as_str().contains(OBSOLETE_MARKER)
}
