//! Webref crawl documents
//!
//! Serde model of the three JSON documents webref publishes: the crawl index, and per spec
//! the elements and dfns extracts. Fields we do not use are ignored on decode.

use serde::Deserialize;
use url::Url;

/// The webref crawl index (`index.json`).
#[derive(Debug, Clone, Deserialize)]
pub struct Index {
    pub results: Vec<CrawlResult>,
    pub stats: Stats,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Stats {
    pub crawled: u64,
    pub errors: u64,
}

/// One crawled specification in the index.
///
/// `dfns` and `elements` are paths relative to the index URL. Specs without
/// those extracts leave them out.
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlResult {
    pub shortname: String,
    pub title: String,
    pub organization: String,
    pub url: Url,
    pub standing: String,
    pub date: String,
    #[serde(default)]
    pub dfns: Option<String>,
    #[serde(default)]
    pub elements: Option<String>,
}

/// The per spec elements extract.
#[derive(Debug, Clone, Deserialize)]
pub struct Elements {
    pub elements: Vec<Element>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Element {
    pub name: String,
    #[serde(default)]
    pub obsolete: Option<bool>,
}

/// The per spec dfns extract.
#[derive(Debug, Clone, Deserialize)]
pub struct Dfns {
    pub dfns: Vec<Dfn>,
}

/// A single definition record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dfn {
    #[serde(rename = "type")]
    pub kind: String,
    pub href: Url,
    pub linking_text: Vec<String>,
    #[serde(rename = "for")]
    pub for_targets: Vec<String>,
    pub heading: Heading,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Heading {
    pub title: String,
    #[serde(default)]
    pub number: Option<String>,
}

impl Dfn {
    /// One line description used in diagnostics.
    pub fn describe(&self) -> String {
        format!(
            "type '{}', linkingText {:?}, for {:?}, href {}",
            self.kind,
            self.linking_text,
            self.for_targets,
            self.href.as_str()
        )
    }
}

impl Index {
    pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }
}

impl Elements {
    pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }
}

impl Dfns {
    pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }
}
