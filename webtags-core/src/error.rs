//! Error types

use crate::crawl::{CrawlResult, Dfn};
use thiserror::Error;

/// A dfn record that breaks the shape we rely on.
///
/// Carries the offending record so callers can log it.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message} ({})", .dfn.describe())]
pub struct InvalidDefinitionError {
    pub message: String,
    pub dfn: Box<Dfn>,
}

impl InvalidDefinitionError {
    pub fn new(message: impl Into<String>, dfn: &Dfn) -> Self {
        InvalidDefinitionError {
            message: message.into(),
            dfn: Box::new(dfn.clone()),
        }
    }
}

/// A crawl result that was selected but cannot be transformed.
#[derive(Debug, Clone, Error)]
#[error("{message} (spec '{}', standing '{}')", .result.shortname, .result.standing)]
pub struct InvalidCrawlResultError {
    pub message: String,
    pub result: Box<CrawlResult>,
}

impl InvalidCrawlResultError {
    pub fn new(message: impl Into<String>, result: &CrawlResult) -> Self {
        InvalidCrawlResultError {
            message: message.into(),
            result: Box::new(result.clone()),
        }
    }
}
