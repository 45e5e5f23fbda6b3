//! Crawl result transformation
//!
//! Glue between the webref index and the tree builder. A [`CrawlResultTransformer`] is only
//! constructed for crawl results we can actually use: in good standing, with both an elements
//! and a dfns extract. It resolves the extract URLs so the caller can fetch them, then turns
//! the decoded documents into a [`SpecResult`].
//!
//! Fetching is the caller's business; this module never touches the network.

use crate::crawl::{CrawlResult, Dfns, Elements, Index};
use crate::error::{InvalidCrawlResultError, InvalidDefinitionError};
use crate::scope::GlobalScope;
use crate::tree::SpecResult;
use tracing::{debug, info, info_span, warn};
use url::Url;

pub const GOOD_STANDING: &str = "good";

#[derive(Debug, Clone)]
pub struct CrawlResultTransformer {
    result: CrawlResult,
    elements_url: Url,
    dfns_url: Url,
    scope: GlobalScope,
}

impl CrawlResultTransformer {
    /// Validate `result` and resolve its extract paths against `base_url`, the index URL.
    pub fn new(
        result: CrawlResult,
        base_url: &Url,
        scope: GlobalScope,
    ) -> Result<Self, InvalidCrawlResultError> {
        if result.standing != GOOD_STANDING {
            return Err(InvalidCrawlResultError::new(
                format!(
                    "Crawl result is not in good standing, standing is '{}'.",
                    result.standing
                ),
                &result,
            ));
        }
        let elements_url = resolve(base_url, result.elements.as_deref()).ok_or_else(|| {
            InvalidCrawlResultError::new("Missing or invalid elements path.", &result)
        })?;
        let dfns_url = resolve(base_url, result.dfns.as_deref()).ok_or_else(|| {
            InvalidCrawlResultError::new("Missing or invalid dfns path.", &result)
        })?;

        Ok(CrawlResultTransformer {
            result,
            elements_url,
            dfns_url,
            scope,
        })
    }

    pub fn shortname(&self) -> &str {
        &self.result.shortname
    }

    pub fn elements_url(&self) -> &Url {
        &self.elements_url
    }

    pub fn dfns_url(&self) -> &Url {
        &self.dfns_url
    }

    /// Build the spec tree from the decoded extracts and warn about orphans.
    pub fn transform(
        &self,
        elements: &Elements,
        dfns: &Dfns,
    ) -> Result<SpecResult, InvalidDefinitionError> {
        let span = info_span!("transform", spec = %self.result.shortname);
        let _guard = span.enter();

        debug!(
            elements = elements.elements.len(),
            dfns = dfns.dfns.len(),
            "Building spec..."
        );
        let spec = SpecResult::from_crawl(
            &self.result,
            &elements.elements,
            &dfns.dfns,
            &self.scope,
        )?;
        info!(
            global_attributes = spec.global_attributes.len(),
            elements = spec.elements.len(),
            "Spec built."
        );

        self.report_orphans(&spec);
        Ok(spec)
    }

    /// Log every orphan at warn level.
    pub fn report_orphans(&self, spec: &SpecResult) {
        debug!("Warning about orphans...");
        for orphan in &spec.orphaned_attributes {
            warn!(attr_name = %orphan.name, href = %orphan.url, "Orphaned attribute.");
        }
        for orphan in &spec.orphaned_attribute_values {
            warn!(attr_value = %orphan.value, href = %orphan.url, "Orphaned attribute value.");
        }
        info!(
            attributes = spec.orphaned_attributes.len(),
            values = spec.orphaned_attribute_values.len(),
            "Warned about orphans."
        );
    }
}

/// Index entries whose shortname was requested, in index order.
pub fn select_results<'a>(index: &'a Index, wanted: &[String]) -> Vec<&'a CrawlResult> {
    for name in wanted {
        if !index.results.iter().any(|result| &result.shortname == name) {
            warn!(spec = %name, "Requested spec not found in webref index.");
        }
    }
    index
        .results
        .iter()
        .filter(|result| wanted.contains(&result.shortname))
        .collect()
}

fn resolve(base_url: &Url, path: Option<&str>) -> Option<Url> {
    base_url.join(path?).ok()
}
