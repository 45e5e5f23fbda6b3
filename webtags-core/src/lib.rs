//! Element and attribute trees from crawled web specifications
//!
//!     This crate turns the flat data that webref publishes for a specification (a list of
//!     element names and a list of definitions) into a nested tree: every element with the
//!     attributes that apply to it, every attribute with the values that apply to it, plus the
//!     spec-wide global attributes.
//!
//!     This is a pure lib, it powers webtags-cli but is shell agnostic: no code here fetches,
//!     prints or reads env vars. Callers hand in decoded documents and get a [`tree::SpecResult`]
//!     back.
//!
//! Architecture
//!
//!     The pipeline for one spec is:
//!
//!         dfns ──> definitions ──> scope + tree ──> orphans ──> SpecResult
//!
//!     - crawl.rs          serde model of the webref index, elements and dfns documents
//!     - definitions.rs    raw dfn records to typed attribute / attribute value definitions
//!     - scope.rs          the "applies to" predicates, global scope promotion
//!     - tree.rs           builds global attributes and per element attributes
//!     - orphans.rs        definitions that ended up in no bucket
//!     - transform.rs      validates a crawl result and runs the pipeline for it
//!     - error.rs
//!
//!     Scope logic lives in scope.rs only. The tree builder and the orphan detector go through
//!     its predicates instead of looking at the `for` data themselves.
//!
//! Ownership
//!
//!     Parsed definitions are read only. Every bucket an attribute lands in gets a freshly built
//!     [`tree::Attribute`] with its own value list, so nothing is shared between the global copy
//!     and the per element copies of the same definition.

pub mod crawl;
pub mod definitions;
pub mod error;
pub mod orphans;
pub mod scope;
pub mod transform;
pub mod tree;

pub use error::{InvalidCrawlResultError, InvalidDefinitionError};
pub use scope::GlobalScope;
pub use transform::CrawlResultTransformer;
pub use tree::SpecResult;
