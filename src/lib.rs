//! SOS Processor Library
//!
//! A Rust library for parsing Sensor Observation Service (SOS)
//! GetObservation responses into typed, tabular record collections.
//!
//! This library provides tools for:
//! - Classifying responses as O&M 1.0, bare O&M 2.0 or SOAP-enveloped O&M 2.0
//! - Parsing the social sensing dialect on explicit request
//! - Inferring one record schema per document from its first observation
//! - Extracting every observation into a record conforming to that schema
//! - Converting collections to polars DataFrames and writing Parquet or CSV
//! - Batch conversion of many response files with bounded concurrency
//!
//! ```rust
//! let xml = r#"<om:ObservationCollection xmlns:om="http://www.opengis.net/om/1.0"
//!     xmlns:gml="http://www.opengis.net/gml" xmlns:xlink="http://www.w3.org/1999/xlink">
//!   <om:member><om:Observation>
//!     <om:samplingTime><gml:TimeInstant><gml:timePosition>2015-06-01T12:00:00Z</gml:timePosition></gml:TimeInstant></om:samplingTime>
//!     <om:procedure xlink:href="urn:sensor:1"/>
//!     <om:observedProperty xlink:href="urn:phenomenon:temperature"/>
//!     <om:featureOfInterest xlink:href="urn:station:1"/>
//!     <om:result>12.5</om:result>
//!   </om:Observation></om:member>
//! </om:ObservationCollection>"#;
//!
//! let collection = sos_processor::parse(xml.as_bytes()).unwrap();
//! assert_eq!(collection.dialect, sos_processor::Dialect::Om1);
//! assert_eq!(collection.len(), 1);
//! ```

pub mod classifier;
pub mod collection;
pub mod config;
pub mod constants;
pub mod document;
pub mod envelope;
pub mod error;
pub mod extractor;
pub mod models;
pub mod parser;
pub mod processor;
pub mod schema;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use config::{CompressionAlgorithm, OutputFormat, ParserConfig, ProcessorConfig};
pub use error::{ProcessingError, ProcessingResult, Result, SosError, UnsupportedVersion};
pub use models::{
    Dialect, DialectSelector, FieldValue, ObservationRecord, ParsedCollection, ProcessingStats,
    RecordSchema, SchemaField, ValueKind, XmlFragment,
};
pub use parser::{SosParser, detect_dialect};
pub use processor::BatchProcessor;

/// Parse one response, detecting its dialect from the content
pub fn parse(bytes: &[u8]) -> Result<ParsedCollection> {
    SosParser::new().parse(bytes)
}

/// Parse one response with an explicit dialect selector
pub fn parse_with_dialect(bytes: &[u8], selector: DialectSelector) -> Result<ParsedCollection> {
    SosParser::new().parse_with_dialect(bytes, selector)
}
