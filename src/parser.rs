//! Dispatch facade: bytes in, parsed collection out.
//!
//! [`SosParser`] ties the pipeline together: parse the document, resolve the
//! dialect, infer the schema on the first observation, extract every
//! observation and hand back the collection. Any failure discards all
//! partial work.

use crate::classifier;
use crate::collection::CollectionBuilder;
use crate::config::ParserConfig;
use crate::document::ObservationDocument;
use crate::error::{Result, UnsupportedVersion};
use crate::extractor::{ExtractionContext, extractor_for};
use crate::models::{Dialect, DialectSelector, ParsedCollection};
use tracing::{debug, trace, warn};

/// SOS response parser
///
/// Holds only immutable settings, so one parser can be shared across threads
/// and reused for any number of documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SosParser {
    config: ParserConfig,
    selector: DialectSelector,
}

impl SosParser {
    /// Parser classifying every document by content
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            config,
            selector: DialectSelector::Auto,
        }
    }

    /// Parser bound to an explicit version string (`1.0.0`, `2.0.0`, `UCD_SOCIAL`)
    pub fn for_version(version: &str) -> std::result::Result<Self, UnsupportedVersion> {
        let selector = version.parse()?;
        Ok(Self::default().with_selector(selector))
    }

    /// Parser bound to the dialect the given document classifies as
    pub fn for_document(bytes: &[u8]) -> Result<Self> {
        let selector = match detect_dialect(bytes)? {
            Dialect::Om1 => DialectSelector::Version1,
            Dialect::Om2Bare | Dialect::Om2Enveloped => DialectSelector::Version2,
            Dialect::Social => DialectSelector::Social,
        };
        Ok(Self::default().with_selector(selector))
    }

    pub fn with_selector(mut self, selector: DialectSelector) -> Self {
        self.selector = selector;
        self
    }

    pub fn with_strict_optional_fields(mut self, strict: bool) -> Self {
        self.config = self.config.with_strict_optional_fields(strict);
        self
    }

    pub fn selector(&self) -> DialectSelector {
        self.selector
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse one document with the parser's own dialect selector
    pub fn parse(&self, bytes: &[u8]) -> Result<ParsedCollection> {
        self.parse_with_dialect(bytes, self.selector)
    }

    /// Parse one document, overriding the dialect selector
    pub fn parse_with_dialect(
        &self,
        bytes: &[u8],
        selector: DialectSelector,
    ) -> Result<ParsedCollection> {
        self.parse_document(bytes, selector)
            .inspect_err(|e| debug!("Failed to parse SOS document: {}", e))
    }

    /// Parse a document handed over by a hosting service
    ///
    /// The MIME type and schema hints are accepted for interface
    /// compatibility and otherwise ignored.
    pub fn parse_input(
        &self,
        bytes: &[u8],
        mime_type: &str,
        schema: &str,
    ) -> Result<ParsedCollection> {
        trace!("Ignoring input hints: mime type '{}', schema '{}'", mime_type, schema);
        self.parse(bytes)
    }

    fn parse_document(&self, bytes: &[u8], selector: DialectSelector) -> Result<ParsedCollection> {
        let document = ObservationDocument::parse(bytes)?;
        let resolved = classifier::resolve(document.root_element(), selector)?;
        let extractor = extractor_for(resolved.dialect);

        let observations = extractor.observations(resolved.container)?;
        debug!("Parsing {} observations", observations.len());

        let schema = match observations.first() {
            Some(first) => extractor.infer_schema(*first)?,
            None => {
                warn!("Document contains no observations");
                extractor.plan().required_schema()
            }
        };

        let context = ExtractionContext::new(&schema)
            .with_strict_optional_fields(self.config.strict_optional_fields);
        let records = observations
            .iter()
            .enumerate()
            .map(|(index, observation)| extractor.extract(*observation, index, &context))
            .collect::<Result<Vec<_>>>()?;

        let mut builder =
            CollectionBuilder::with_capacity(resolved.dialect, schema, records.len());
        for record in records {
            builder.push(record)?;
        }
        Ok(builder.finish())
    }
}

/// Classify a document without extracting anything
pub fn detect_dialect(bytes: &[u8]) -> Result<Dialect> {
    let document = ObservationDocument::parse(bytes)?;
    classifier::classify(document.root_element())
}
