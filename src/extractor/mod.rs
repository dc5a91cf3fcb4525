//! Record extraction for every supported dialect
//!
//! All dialects share one plan-driven walk: the extractor looks up each
//! schema field in its dialect's [`FieldPlan`] and reads the value with the
//! field's locator. Dialects differ only in the plan they carry, and the
//! social dialect additionally skips inference in favor of a fixed schema.
//!
//! ## Architecture
//!
//! - [`field_readers`] - Locator-specific readers producing [`FieldValue`]s
//! - [`social`] - Social sensor extractor and time position parsing
//!
//! ## Usage
//!
//! ```rust
//! use sos_processor::document::ObservationDocument;
//! use sos_processor::extractor::{ExtractionContext, extractor_for};
//! use sos_processor::models::Dialect;
//!
//! # fn example(bytes: &[u8]) -> sos_processor::Result<()> {
//! let doc = ObservationDocument::parse(bytes)?;
//! let extractor = extractor_for(Dialect::Om1);
//! let observations = extractor.observations(doc.root_element())?;
//! if let Some(first) = observations.first() {
//!     let schema = extractor.infer_schema(*first)?;
//!     let context = ExtractionContext::new(&schema);
//!     for (index, observation) in observations.iter().enumerate() {
//!         let record = extractor.extract(*observation, index, &context)?;
//!         println!("{} values", record.len());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod field_readers;
pub mod social;

#[cfg(test)]
pub mod tests;

use crate::document::{child_element, child_elements};
use crate::error::{Result, SosError};
use crate::models::{Dialect, FieldValue, ObservationRecord, RecordSchema};
use crate::schema::{self, FieldPlan};
use roxmltree::Node;

pub use social::SocialExtractor;

/// Per-call state handed to [`RecordExtractor::extract`]
#[derive(Debug, Clone, Copy)]
pub struct ExtractionContext<'s> {
    pub schema: &'s RecordSchema,
    pub strict_optional_fields: bool,
}

impl<'s> ExtractionContext<'s> {
    pub fn new(schema: &'s RecordSchema) -> Self {
        Self {
            schema,
            strict_optional_fields: false,
        }
    }

    pub fn with_strict_optional_fields(mut self, strict: bool) -> Self {
        self.strict_optional_fields = strict;
        self
    }
}

/// Dialect-specific observation enumeration, schema inference and extraction
pub trait RecordExtractor: Send + Sync {
    /// Static field layout of the dialect
    fn plan(&self) -> &'static FieldPlan;

    /// Observation elements of the container, in document order
    ///
    /// Every member must wrap an observation element; a member given only by
    /// reference is reported as malformed.
    fn observations<'a, 'input>(&self, container: Node<'a, 'input>) -> Result<Vec<Node<'a, 'input>>> {
        let plan = self.plan();
        child_elements(container, &plan.member)
            .enumerate()
            .map(|(index, member)| {
                child_element(member, &plan.observation).ok_or_else(|| {
                    SosError::malformed_field(
                        plan.member.local,
                        format!("no {} element", plan.observation),
                        index,
                    )
                })
            })
            .collect()
    }

    /// Schema derived from the first observation
    fn infer_schema(&self, first_observation: Node<'_, '_>) -> Result<RecordSchema> {
        schema::infer_schema(self.plan(), first_observation)
    }

    /// Convert one observation into a record aligned with `context.schema`
    fn extract(
        &self,
        observation: Node<'_, '_>,
        index: usize,
        context: &ExtractionContext<'_>,
    ) -> Result<ObservationRecord> {
        extract_record(self.plan(), observation, index, context)
    }
}

/// O&M 1.0 observations
#[derive(Debug, Clone, Copy, Default)]
pub struct Om1Extractor;

impl RecordExtractor for Om1Extractor {
    fn plan(&self) -> &'static FieldPlan {
        &FieldPlan::OM1
    }
}

/// O&M 2.0 observations, bare or enveloped
#[derive(Debug, Clone, Copy, Default)]
pub struct Om2Extractor;

impl RecordExtractor for Om2Extractor {
    fn plan(&self) -> &'static FieldPlan {
        &FieldPlan::OM2
    }
}

static OM1_EXTRACTOR: Om1Extractor = Om1Extractor;
static OM2_EXTRACTOR: Om2Extractor = Om2Extractor;
static SOCIAL_EXTRACTOR: SocialExtractor = SocialExtractor;

/// Extractor handling `dialect`
pub fn extractor_for(dialect: Dialect) -> &'static dyn RecordExtractor {
    match dialect {
        Dialect::Om1 => &OM1_EXTRACTOR,
        Dialect::Om2Bare | Dialect::Om2Enveloped => &OM2_EXTRACTOR,
        Dialect::Social => &SOCIAL_EXTRACTOR,
    }
}

/// Walk the schema in order and read every field from `observation`
pub fn extract_record(
    plan: &FieldPlan,
    observation: Node<'_, '_>,
    index: usize,
    context: &ExtractionContext<'_>,
) -> Result<ObservationRecord> {
    let mut values = Vec::with_capacity(context.schema.len());

    for field in &context.schema.fields {
        let descriptor = plan
            .descriptor(&field.name)
            .filter(|descriptor| descriptor.kind == field.kind)
            .ok_or_else(|| SosError::schema_mismatch(&field.name, plan.type_name))?;

        if descriptor.is_present(observation) {
            values.push(field_readers::read_field(descriptor, observation, index)?);
        } else if descriptor.required {
            return Err(SosError::missing_required(descriptor.error_name(), index));
        } else if context.strict_optional_fields {
            return Err(SosError::inconsistent_optional(descriptor.name, index));
        } else {
            values.push(FieldValue::Null(descriptor.kind));
        }
    }

    Ok(ObservationRecord::new(values))
}
