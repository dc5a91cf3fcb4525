//! Application constants for the SOS processor
//!
//! This module contains the XML namespaces, qualified element names, version
//! selectors and output defaults used throughout the SOS processor.

use crate::document::XmlName;

// =============================================================================
// Dialect Selectors
// =============================================================================

/// Explicit selector for SOS 1.0.0 / O&M 1.0 responses
pub const SOS_V1: &str = "1.0.0";

/// Explicit selector for SOS 2.0.0 / O&M 2.0 responses
pub const SOS_V2: &str = "2.0.0";

/// Explicit selector for the UCD social sensor feed (SOS 2.0.0 shape)
pub const SOCIAL_SENSOR: &str = "UCD_SOCIAL";

/// Selector asking for content-based classification
pub const AUTO_DETECT: &str = "auto";

// =============================================================================
// Feature Type Names
// =============================================================================

/// Collection type name for O&M 1.0 observations
pub const OM1_TYPE_NAME: &str = "om-1.0-observation";

/// Collection type name for O&M 2.0 observations
pub const OM2_TYPE_NAME: &str = "http://schemas.opengis.net/om/2.0/";

/// Collection type name for social sensor observations
pub const SOCIAL_TYPE_NAME: &str = "UCD Social Sensor Observation";

// =============================================================================
// XML Namespaces
// =============================================================================

pub mod namespaces {
    /// Observations & Measurements 1.0
    pub const OM_1_0: &str = "http://www.opengis.net/om/1.0";

    /// Observations & Measurements 2.0
    pub const OM_2_0: &str = "http://www.opengis.net/om/2.0";

    /// Sensor Observation Service 2.0
    pub const SOS_2_0: &str = "http://www.opengis.net/sos/2.0";

    /// GML 3.1.1 (used by O&M 1.0)
    pub const GML: &str = "http://www.opengis.net/gml";

    /// GML 3.2 (used by O&M 2.0)
    pub const GML_3_2: &str = "http://www.opengis.net/gml/3.2";

    pub const XLINK: &str = "http://www.w3.org/1999/xlink";

    /// SOAP 1.1 envelope
    pub const SOAP_1_1: &str = "http://schemas.xmlsoap.org/soap/envelope/";

    /// SOAP 1.2 envelope
    pub const SOAP_1_2: &str = "http://www.w3.org/2003/05/soap-envelope";
}

// =============================================================================
// Document Structure
// =============================================================================

/// O&M 1.0 document and observation structure
pub mod om1 {
    use super::namespaces::{GML, OM_1_0};
    use crate::document::XmlName;

    pub const OBSERVATION_COLLECTION: XmlName = XmlName::new(OM_1_0, "om", "ObservationCollection");
    pub const MEMBER: XmlName = XmlName::new(OM_1_0, "om", "member");
    pub const OBSERVATION: XmlName = XmlName::new(OM_1_0, "om", "Observation");

    pub const SAMPLING_TIME: XmlName = XmlName::new(OM_1_0, "om", "samplingTime");
    pub const RESULT_TIME: XmlName = XmlName::new(OM_1_0, "om", "resultTime");
    pub const PROCEDURE: XmlName = XmlName::new(OM_1_0, "om", "procedure");
    pub const OBSERVED_PROPERTY: XmlName = XmlName::new(OM_1_0, "om", "observedProperty");
    pub const FEATURE_OF_INTEREST: XmlName = XmlName::new(OM_1_0, "om", "featureOfInterest");
    pub const RESULT: XmlName = XmlName::new(OM_1_0, "om", "result");
    pub const RESULT_QUALITY: XmlName = XmlName::new(OM_1_0, "om", "resultQuality");
    pub const METADATA: XmlName = XmlName::new(OM_1_0, "om", "metadata");
    pub const PARAMETER: XmlName = XmlName::new(OM_1_0, "om", "parameter");

    pub const BOUNDED_BY: XmlName = XmlName::new(GML, "gml", "boundedBy");
    pub const LOCATION: XmlName = XmlName::new(GML, "gml", "location");
    pub const DESCRIPTION: XmlName = XmlName::new(GML, "gml", "description");
    pub const ID: XmlName = XmlName::new(GML, "gml", "id");
    pub const METADATA_PROPERTY: XmlName = XmlName::new(GML, "gml", "metaDataProperty");
}

/// SOS 2.0 response and O&M 2.0 observation structure
pub mod om2 {
    use super::namespaces::{GML_3_2, OM_2_0, SOS_2_0};
    use crate::document::XmlName;

    pub const GET_OBSERVATION_RESPONSE: XmlName =
        XmlName::new(SOS_2_0, "sos", "GetObservationResponse");
    pub const OBSERVATION_DATA: XmlName = XmlName::new(SOS_2_0, "sos", "observationData");
    pub const OBSERVATION: XmlName = XmlName::new(OM_2_0, "om", "OM_Observation");

    pub const TYPE: XmlName = XmlName::new(OM_2_0, "om", "type");
    pub const METADATA: XmlName = XmlName::new(OM_2_0, "om", "metadata");
    pub const RELATED_OBSERVATION: XmlName = XmlName::new(OM_2_0, "om", "relatedObservation");
    pub const PHENOMENON_TIME: XmlName = XmlName::new(OM_2_0, "om", "phenomenonTime");
    pub const RESULT_TIME: XmlName = XmlName::new(OM_2_0, "om", "resultTime");
    pub const VALID_TIME: XmlName = XmlName::new(OM_2_0, "om", "validTime");
    pub const PROCEDURE: XmlName = XmlName::new(OM_2_0, "om", "procedure");
    pub const OBSERVED_PROPERTY: XmlName = XmlName::new(OM_2_0, "om", "observedProperty");
    pub const FEATURE_OF_INTEREST: XmlName = XmlName::new(OM_2_0, "om", "featureOfInterest");
    pub const RESULT_QUALITY: XmlName = XmlName::new(OM_2_0, "om", "resultQuality");
    pub const RESULT: XmlName = XmlName::new(OM_2_0, "om", "result");

    pub const TIME_INSTANT: XmlName = XmlName::new(GML_3_2, "gml", "TimeInstant");
    pub const TIME_POSITION: XmlName = XmlName::new(GML_3_2, "gml", "timePosition");
}

/// SOAP envelope structure
pub mod soap {
    pub const ENVELOPE: &str = "Envelope";
    pub const BODY: &str = "Body";
}

/// XLink attributes
pub const XLINK_HREF: XmlName = XmlName::new(namespaces::XLINK, "xlink", "href");
pub const XLINK_TITLE: XmlName = XmlName::new(namespaces::XLINK, "xlink", "title");

// =============================================================================
// Batch Processing Defaults
// =============================================================================

/// File extension picked up when walking input directories
pub const XML_EXTENSION: &str = "xml";

/// Default output directory name when none is given
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Timestamp layouts accepted for time positions without an explicit offset
pub const NAIVE_TIME_POSITION_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"];
