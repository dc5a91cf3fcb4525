//! Core data structures and types for SOS processing.
//!
//! Defines observation dialects, dialect selectors, record schemas, field
//! values, parsed collections and batch processing statistics used
//! throughout the library.

use crate::constants::{
    AUTO_DETECT, OM1_TYPE_NAME, OM2_TYPE_NAME, SOCIAL_SENSOR, SOCIAL_TYPE_NAME, SOS_V1, SOS_V2,
};
use crate::error::UnsupportedVersion;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Observation document dialects understood by the parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dialect {
    /// O&M 1.0 `ObservationCollection`
    Om1,
    /// SOS 2.0 `GetObservationResponse` at the document root
    Om2Bare,
    /// SOS 2.0 `GetObservationResponse` inside a SOAP envelope
    Om2Enveloped,
    /// UCD social sensor feed on the SOS 2.0 shape
    Social,
}

impl Dialect {
    /// Type name given to the collections of this dialect
    pub fn type_name(&self) -> &'static str {
        match self {
            Dialect::Om1 => OM1_TYPE_NAME,
            Dialect::Om2Bare | Dialect::Om2Enveloped => OM2_TYPE_NAME,
            Dialect::Social => SOCIAL_TYPE_NAME,
        }
    }

    /// Whether documents of this dialect use the SOS 2.0 response shape
    pub fn is_v2_family(&self) -> bool {
        !matches!(self, Dialect::Om1)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dialect::Om1 => "O&M 1.0",
            Dialect::Om2Bare => "O&M 2.0",
            Dialect::Om2Enveloped => "O&M 2.0 (SOAP)",
            Dialect::Social => "social sensor",
        };
        f.write_str(name)
    }
}

/// Caller-side dialect request
///
/// `Auto` leaves the decision to content classification; the other variants
/// short-circuit it. The social dialect is only reachable through
/// [`DialectSelector::Social`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DialectSelector {
    #[default]
    #[serde(rename = "auto")]
    Auto,
    #[serde(rename = "1.0.0")]
    Version1,
    #[serde(rename = "2.0.0")]
    Version2,
    #[serde(rename = "UCD_SOCIAL")]
    Social,
}

impl DialectSelector {
    pub fn as_str(&self) -> &'static str {
        match self {
            DialectSelector::Auto => AUTO_DETECT,
            DialectSelector::Version1 => SOS_V1,
            DialectSelector::Version2 => SOS_V2,
            DialectSelector::Social => SOCIAL_SENSOR,
        }
    }
}

impl FromStr for DialectSelector {
    type Err = UnsupportedVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            AUTO_DETECT => Ok(DialectSelector::Auto),
            SOS_V1 => Ok(DialectSelector::Version1),
            SOS_V2 => Ok(DialectSelector::Version2),
            SOCIAL_SENSOR => Ok(DialectSelector::Social),
            other => Err(UnsupportedVersion {
                requested: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for DialectSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared kind of a schema column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// Temporal property element (samplingTime, phenomenonTime, ...)
    Temporal,
    /// Property usually given by reference (procedure, featureOfInterest, ...)
    Reference,
    /// Arbitrary structured content (result, metadata, ...)
    Subtree,
    /// Ordered list of structured elements
    SubtreeList,
    /// Plain text (identifiers, links, titles, literal results)
    Text,
    /// Parsed time instant
    Timestamp,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Temporal => "temporal",
            ValueKind::Reference => "reference",
            ValueKind::Subtree => "subtree",
            ValueKind::SubtreeList => "subtree-list",
            ValueKind::Text => "text",
            ValueKind::Timestamp => "timestamp",
        };
        f.write_str(name)
    }
}

/// Verbatim copy of one element from the source document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlFragment {
    /// Qualified element name as written in the source (e.g. `om:result`)
    pub name: String,
    /// Exact source text of the element, start tag to end tag
    pub xml: String,
}

impl XmlFragment {
    pub fn new(name: impl Into<String>, xml: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            xml: xml.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.xml
    }
}

/// One extracted value, tagged with its kind
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Temporal(XmlFragment),
    Reference(XmlFragment),
    Subtree(XmlFragment),
    SubtreeList(Vec<XmlFragment>),
    Text(String),
    Timestamp(DateTime<FixedOffset>),
    /// Optional column absent on this observation
    Null(ValueKind),
}

impl FieldValue {
    /// Wrap an element fragment according to the declared kind
    pub fn from_fragment(kind: ValueKind, fragment: XmlFragment) -> Self {
        match kind {
            ValueKind::Temporal => FieldValue::Temporal(fragment),
            ValueKind::Reference => FieldValue::Reference(fragment),
            ValueKind::SubtreeList => FieldValue::SubtreeList(vec![fragment]),
            ValueKind::Text => FieldValue::Text(fragment.xml),
            ValueKind::Subtree | ValueKind::Timestamp => FieldValue::Subtree(fragment),
        }
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            FieldValue::Temporal(_) => ValueKind::Temporal,
            FieldValue::Reference(_) => ValueKind::Reference,
            FieldValue::Subtree(_) => ValueKind::Subtree,
            FieldValue::SubtreeList(_) => ValueKind::SubtreeList,
            FieldValue::Text(_) => ValueKind::Text,
            FieldValue::Timestamp(_) => ValueKind::Timestamp,
            FieldValue::Null(kind) => *kind,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null(_))
    }

    pub fn as_fragment(&self) -> Option<&XmlFragment> {
        match self {
            FieldValue::Temporal(f) | FieldValue::Reference(f) | FieldValue::Subtree(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<DateTime<FixedOffset>> {
        match self {
            FieldValue::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    /// Render the value as a single string cell (None for nulls)
    pub fn to_cell(&self) -> Option<String> {
        match self {
            FieldValue::Temporal(f) | FieldValue::Reference(f) | FieldValue::Subtree(f) => {
                Some(f.xml.clone())
            }
            FieldValue::SubtreeList(fragments) => Some(
                fragments
                    .iter()
                    .map(XmlFragment::as_str)
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
            FieldValue::Text(text) => Some(text.clone()),
            FieldValue::Timestamp(ts) => Some(ts.to_rfc3339()),
            FieldValue::Null(_) => None,
        }
    }
}

/// One column of a record schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaField {
    pub name: String,
    pub kind: ValueKind,
}

impl SchemaField {
    pub fn new(name: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Realized per-document schema: required fields then the optional fields
/// present on the first observation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSchema {
    pub type_name: String,
    pub fields: Vec<SchemaField>,
}

impl RecordSchema {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    pub fn push(&mut self, field: SchemaField) {
        self.fields.push(field);
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn kinds(&self) -> Vec<ValueKind> {
        self.fields.iter().map(|f| f.kind).collect()
    }
}

/// One extracted row, aligned 1:1 with its document's schema
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationRecord {
    values: Vec<FieldValue>,
}

impl ObservationRecord {
    pub fn new(values: Vec<FieldValue>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<&FieldValue> {
        self.values.get(index)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Check length and per-position kind against a schema
    pub fn conforms_to(&self, schema: &RecordSchema) -> bool {
        self.values.len() == schema.fields.len()
            && self
                .values
                .iter()
                .zip(&schema.fields)
                .all(|(value, field)| value.kind() == field.kind)
    }
}

/// Parser output: the inferred schema plus every extracted record
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedCollection {
    pub dialect: Dialect,
    pub schema: RecordSchema,
    pub records: Vec<ObservationRecord>,
}

impl ParsedCollection {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ObservationRecord> {
        self.records.iter()
    }

    /// Values of one column in record order
    pub fn column(&self, name: &str) -> Option<Vec<&FieldValue>> {
        let index = self.schema.index_of(name)?;
        Some(
            self.records
                .iter()
                .filter_map(|record| record.get(index))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a ParsedCollection {
    type Item = &'a ObservationRecord;
    type IntoIter = std::slice::Iter<'a, ObservationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Batch processing statistics
#[derive(Debug, Default, Clone, Serialize)]
pub struct ProcessingStats {
    pub files_processed: usize,
    pub files_failed: usize,
    pub total_records: usize,
    pub outputs: Vec<PathBuf>,
    pub failures: Vec<(PathBuf, String)>,
    pub processing_time_ms: u128,
}
