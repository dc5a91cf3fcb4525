//! Social sensor observations
//!
//! The social feed reuses the SOS 2.0 response shape but flattens each
//! observation into plain values: a parsed phenomenon time, the hrefs of the
//! referenced properties, the feature's href and title, and the literal
//! result text. The schema is fixed and every field is required.

use super::RecordExtractor;
use crate::constants::NAIVE_TIME_POSITION_FORMATS;
use crate::error::Result;
use crate::models::RecordSchema;
use crate::schema::FieldPlan;
use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use roxmltree::Node;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct SocialExtractor;

impl RecordExtractor for SocialExtractor {
    fn plan(&self) -> &'static FieldPlan {
        &FieldPlan::SOCIAL
    }

    /// The social schema does not depend on content
    fn infer_schema(&self, _first_observation: Node<'_, '_>) -> Result<RecordSchema> {
        debug!("Using static social sensor schema");
        Ok(self.plan().required_schema())
    }
}

/// Parse an ISO-8601 time position
///
/// Values with an offset are kept as written; values without one are read
/// as UTC.
pub fn parse_time_position(value: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt);
    }

    NAIVE_TIME_POSITION_FORMATS.iter().find_map(|format| {
        NaiveDateTime::parse_from_str(value, format)
            .ok()
            .map(|naive| DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc).into())
    })
}
