//! Field plans and per-document schema inference.
//!
//! A [`FieldPlan`] is the static description of one dialect's observation
//! layout: where the observations live, which fields are required, which are
//! optional candidates, and how each one is located. Schema inference and
//! record extraction both walk the same plan, so a column can only appear in
//! the schema if the extractor knows how to fill it.

use crate::constants::{OM1_TYPE_NAME, OM2_TYPE_NAME, SOCIAL_TYPE_NAME, om1, om2};
use crate::document::{XmlName, attribute, child_element, child_elements};
use crate::error::{Result, SosError};
use crate::models::{RecordSchema, SchemaField, ValueKind};
use roxmltree::Node;
use tracing::{debug, warn};

/// How a field's value is found on an observation element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locator {
    /// First child element, copied verbatim
    Element(XmlName),
    /// Every child element with this name, in order
    Elements(XmlName),
    /// Attribute of the observation element itself
    Attribute(XmlName),
    /// `gml:TimeInstant/gml:timePosition` inside the named child
    TimeInstant(XmlName),
    /// `xlink:href` of the named child
    Href(XmlName),
    /// `xlink:title` of the named child
    Title(XmlName),
    /// Literal text content of the named child
    Text(XmlName),
}

impl Locator {
    /// Name of the element (or attribute) this locator reads
    pub fn target(&self) -> &XmlName {
        match self {
            Locator::Element(name)
            | Locator::Elements(name)
            | Locator::Attribute(name)
            | Locator::TimeInstant(name)
            | Locator::Href(name)
            | Locator::Title(name)
            | Locator::Text(name) => name,
        }
    }

    /// Whether the locator finds anything on `observation`
    ///
    /// List locators only count when at least one element matches.
    pub fn is_present(&self, observation: Node<'_, '_>) -> bool {
        match self {
            Locator::Elements(name) => child_elements(observation, name).next().is_some(),
            Locator::Attribute(name) => attribute(observation, name).is_some(),
            Locator::Element(name)
            | Locator::TimeInstant(name)
            | Locator::Href(name)
            | Locator::Title(name)
            | Locator::Text(name) => child_element(observation, name).is_some(),
        }
    }
}

/// What decides whether an optional field joins the schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// The field's own locator
    Own,
    /// Another element; the field is carried whenever that element is present
    Follows(XmlName),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub kind: ValueKind,
    pub required: bool,
    pub locator: Locator,
    pub presence: Presence,
}

impl FieldDescriptor {
    const fn required(name: &'static str, kind: ValueKind, locator: Locator) -> Self {
        Self {
            name,
            kind,
            required: true,
            locator,
            presence: Presence::Own,
        }
    }

    const fn optional(name: &'static str, kind: ValueKind, locator: Locator) -> Self {
        Self {
            name,
            kind,
            required: false,
            locator,
            presence: Presence::Own,
        }
    }

    const fn following(self, gate: XmlName) -> Self {
        Self {
            presence: Presence::Follows(gate),
            ..self
        }
    }

    /// Whether this field is present on `observation`, honoring its gate
    pub fn is_present(&self, observation: Node<'_, '_>) -> bool {
        match self.presence {
            Presence::Own => self.locator.is_present(observation),
            Presence::Follows(gate) => child_element(observation, &gate).is_some(),
        }
    }

    /// Field name reported in errors: the element the locator reads
    pub fn error_name(&self) -> &'static str {
        self.locator.target().local
    }

    pub fn schema_field(&self) -> SchemaField {
        SchemaField::new(self.name, self.kind)
    }
}

/// Static observation layout of one dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPlan {
    pub type_name: &'static str,
    /// Member element wrapping each observation
    pub member: XmlName,
    /// Observation element inside each member
    pub observation: XmlName,
    /// Required fields in schema order, then optional candidates
    pub fields: &'static [FieldDescriptor],
}

const OM1_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::required("samplingTime", ValueKind::Temporal, Locator::Element(om1::SAMPLING_TIME)),
    FieldDescriptor::required("procedure", ValueKind::Reference, Locator::Element(om1::PROCEDURE)),
    FieldDescriptor::required("observedProperty", ValueKind::Reference, Locator::Element(om1::OBSERVED_PROPERTY)),
    FieldDescriptor::required("featureOfInterest", ValueKind::Reference, Locator::Element(om1::FEATURE_OF_INTEREST)),
    FieldDescriptor::required("result", ValueKind::Subtree, Locator::Element(om1::RESULT)),
    FieldDescriptor::optional("resultTime", ValueKind::Temporal, Locator::Element(om1::RESULT_TIME)),
    FieldDescriptor::optional("resultQuality", ValueKind::Subtree, Locator::Element(om1::RESULT_QUALITY)),
    FieldDescriptor::optional("boundedBy", ValueKind::Subtree, Locator::Element(om1::BOUNDED_BY)),
    FieldDescriptor::optional("location", ValueKind::Subtree, Locator::Element(om1::LOCATION)),
    FieldDescriptor::optional("description", ValueKind::Subtree, Locator::Element(om1::DESCRIPTION)),
    FieldDescriptor::optional("id", ValueKind::Text, Locator::Attribute(om1::ID)),
    FieldDescriptor::optional("metadata", ValueKind::Subtree, Locator::Element(om1::METADATA)),
    FieldDescriptor::optional("metadataPropertyArray", ValueKind::SubtreeList, Locator::Elements(om1::METADATA_PROPERTY))
        .following(om1::METADATA),
];

const OM2_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::required("observedProperty", ValueKind::Reference, Locator::Element(om2::OBSERVED_PROPERTY)),
    FieldDescriptor::required("procedure", ValueKind::Reference, Locator::Element(om2::PROCEDURE)),
    FieldDescriptor::required("featureOfInterest", ValueKind::Reference, Locator::Element(om2::FEATURE_OF_INTEREST)),
    FieldDescriptor::required("phenomenonTime", ValueKind::Temporal, Locator::Element(om2::PHENOMENON_TIME)),
    FieldDescriptor::required("resultTime", ValueKind::Temporal, Locator::Element(om2::RESULT_TIME)),
    FieldDescriptor::required("result", ValueKind::Subtree, Locator::Element(om2::RESULT)),
    FieldDescriptor::optional("type", ValueKind::Reference, Locator::Element(om2::TYPE)),
    FieldDescriptor::optional("metadata", ValueKind::Subtree, Locator::Element(om2::METADATA)),
    FieldDescriptor::optional("validTime", ValueKind::Temporal, Locator::Element(om2::VALID_TIME)),
    FieldDescriptor::optional("relatedObservations", ValueKind::SubtreeList, Locator::Elements(om2::RELATED_OBSERVATION)),
    FieldDescriptor::optional("resultQuality", ValueKind::SubtreeList, Locator::Elements(om2::RESULT_QUALITY)),
];

const SOCIAL_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::required("phenomenonTime", ValueKind::Timestamp, Locator::TimeInstant(om2::PHENOMENON_TIME)),
    FieldDescriptor::required("observedProperty", ValueKind::Text, Locator::Href(om2::OBSERVED_PROPERTY)),
    FieldDescriptor::required("resultTime", ValueKind::Text, Locator::Href(om2::RESULT_TIME)),
    FieldDescriptor::required("procedure", ValueKind::Text, Locator::Href(om2::PROCEDURE)),
    FieldDescriptor::required("foiHref", ValueKind::Text, Locator::Href(om2::FEATURE_OF_INTEREST)),
    FieldDescriptor::required("foiTitle", ValueKind::Text, Locator::Title(om2::FEATURE_OF_INTEREST)),
    FieldDescriptor::required("result", ValueKind::Text, Locator::Text(om2::RESULT)),
];

impl FieldPlan {
    pub const OM1: FieldPlan = FieldPlan {
        type_name: OM1_TYPE_NAME,
        member: om1::MEMBER,
        observation: om1::OBSERVATION,
        fields: OM1_FIELDS,
    };

    pub const OM2: FieldPlan = FieldPlan {
        type_name: OM2_TYPE_NAME,
        member: om2::OBSERVATION_DATA,
        observation: om2::OBSERVATION,
        fields: OM2_FIELDS,
    };

    pub const SOCIAL: FieldPlan = FieldPlan {
        type_name: SOCIAL_TYPE_NAME,
        member: om2::OBSERVATION_DATA,
        observation: om2::OBSERVATION,
        fields: SOCIAL_FIELDS,
    };

    pub fn required(&self) -> impl Iterator<Item = &'static FieldDescriptor> {
        self.fields.iter().filter(|f| f.required)
    }

    pub fn optional(&self) -> impl Iterator<Item = &'static FieldDescriptor> {
        self.fields.iter().filter(|f| !f.required)
    }

    pub fn descriptor(&self, name: &str) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Schema made of the required fields only
    pub fn required_schema(&self) -> RecordSchema {
        let mut schema = RecordSchema::new(self.type_name);
        for descriptor in self.required() {
            schema.push(descriptor.schema_field());
        }
        schema
    }
}

/// Infer the record schema from the first observation of a document
///
/// Every required field must be present; optional candidates join the schema
/// in plan order when present. Nothing is returned on failure.
pub fn infer_schema(plan: &FieldPlan, first_observation: Node<'_, '_>) -> Result<RecordSchema> {
    let mut schema = RecordSchema::new(plan.type_name);

    for descriptor in plan.required() {
        if !descriptor.locator.is_present(first_observation) {
            return Err(SosError::missing_required(descriptor.error_name(), 0));
        }
        schema.push(descriptor.schema_field());
    }

    for descriptor in plan.optional() {
        if descriptor.is_present(first_observation) {
            schema.push(descriptor.schema_field());
        }
    }

    if plan.observation == om1::OBSERVATION
        && child_elements(first_observation, &om1::PARAMETER).next().is_some()
    {
        warn!("Ignoring parameters in observation: not converted to columns");
    }

    debug!(
        "Inferred {} schema with {} fields: {}",
        plan.type_name,
        schema.len(),
        schema.names().join(", ")
    );
    Ok(schema)
}

/// Print an inferred schema in human-readable form
pub fn report_schema(schema: &RecordSchema) {
    println!("\n=== Schema: {} ===", schema.type_name);
    println!("Total fields: {}", schema.len());
    println!("\nFields:");
    for field in &schema.fields {
        println!("  {} -> {}", field.name, field.kind);
    }
}
