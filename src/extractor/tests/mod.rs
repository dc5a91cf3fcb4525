//! Test utilities and XML builders for extractor testing
//!
//! Builders produce minimal but namespace-correct observation documents; the
//! `extract_all` helper runs inference and extraction the way the parser does.

use crate::document::ObservationDocument;
use crate::error::Result;
use crate::extractor::{ExtractionContext, extractor_for};
use crate::models::{Dialect, ObservationRecord, RecordSchema};


pub const OM1_NAMESPACES: &str = r#"xmlns:om="http://www.opengis.net/om/1.0" xmlns:gml="http://www.opengis.net/gml" xmlns:xlink="http://www.w3.org/1999/xlink" xmlns:swe="http://www.opengis.net/swe/1.0.1""#;

pub const OM2_NAMESPACES: &str = r#"xmlns:sos="http://www.opengis.net/sos/2.0" xmlns:om="http://www.opengis.net/om/2.0" xmlns:gml="http://www.opengis.net/gml/3.2" xmlns:xlink="http://www.w3.org/1999/xlink""#;

/// O&M 1.0 observation with every required element plus `extra`
pub fn om1_observation(id: &str, extra: &str) -> String {
    format!(
        r#"<om:Observation gml:id="{id}">
      <om:samplingTime><gml:TimeInstant><gml:timePosition>2015-06-01T12:00:00Z</gml:timePosition></gml:TimeInstant></om:samplingTime>
      <om:procedure xlink:href="urn:ogc:object:feature:Sensor:{id}"/>
      <om:observedProperty xlink:href="urn:ogc:def:phenomenon:OGC:1.0.30:temperature"/>
      <om:featureOfInterest xlink:href="urn:ogc:object:feature:station:{id}"/>
      {extra}
      <om:result>12.5</om:result>
    </om:Observation>"#
    )
}

pub fn om1_collection(observations: &[String]) -> String {
    let members: String = observations
        .iter()
        .map(|observation| format!("<om:member>{observation}</om:member>"))
        .collect();
    format!(r#"<om:ObservationCollection {OM1_NAMESPACES}>{members}</om:ObservationCollection>"#)
}

/// O&M 2.0 observation with every required element plus `extra`
pub fn om2_observation(id: &str, extra: &str) -> String {
    format!(
        r##"<om:OM_Observation gml:id="{id}">
      {extra}
      <om:phenomenonTime><gml:TimeInstant gml:id="t_{id}"><gml:timePosition>2016-03-04T10:15:00Z</gml:timePosition></gml:TimeInstant></om:phenomenonTime>
      <om:resultTime xlink:href="#t_{id}"/>
      <om:procedure xlink:href="http://example.org/procedure/{id}"/>
      <om:observedProperty xlink:href="http://example.org/property/air_temperature"/>
      <om:featureOfInterest xlink:href="http://example.org/foi/{id}" xlink:title="Station {id}"/>
      <om:result>21.5</om:result>
    </om:OM_Observation>"##
    )
}

pub fn om2_response(observations: &[String]) -> String {
    let members: String = observations
        .iter()
        .map(|observation| format!("<sos:observationData>{observation}</sos:observationData>"))
        .collect();
    format!(r#"<sos:GetObservationResponse {OM2_NAMESPACES}>{members}</sos:GetObservationResponse>"#)
}

/// Social sensor observation built from its individual parts
pub fn social_observation(phenomenon_time: &str, foi: &str, result: &str) -> String {
    format!(
        r#"<om:OM_Observation gml:id="s">
      <om:phenomenonTime>{phenomenon_time}</om:phenomenonTime>
      <om:resultTime xlink:href="http://example.org/time/1"/>
      <om:procedure xlink:href="http://example.org/twitter"/>
      <om:observedProperty xlink:href="http://example.org/property/flooding"/>
      {foi}
      {result}
    </om:OM_Observation>"#
    )
}

pub fn time_instant(position: &str) -> String {
    format!(r#"<gml:TimeInstant gml:id="ti"><gml:timePosition>{position}</gml:timePosition></gml:TimeInstant>"#)
}

pub const SOCIAL_FOI: &str = r#"<om:featureOfInterest xlink:href="http://example.org/user/42" xlink:title="@flood_watcher"/>"#;

pub const SOCIAL_RESULT: &str = "<om:result>River over the bank at the bridge</om:result>";

/// Infer on observation 0 and extract every observation of a container root
pub fn extract_all(
    dialect: Dialect,
    xml: &str,
    strict: bool,
) -> Result<(RecordSchema, Vec<ObservationRecord>)> {
    let doc = ObservationDocument::parse(xml.as_bytes())?;
    let extractor = extractor_for(dialect);
    let observations = extractor.observations(doc.root_element())?;
    let first = observations
        .first()
        .copied()
        .expect("fixture has at least one observation");

    let schema = extractor.infer_schema(first)?;
    let context = ExtractionContext::new(&schema).with_strict_optional_fields(strict);
    let records = observations
        .iter()
        .enumerate()
        .map(|(index, observation)| extractor.extract(*observation, index, &context))
        .collect::<Result<Vec<_>>>()?;

    Ok((schema, records))
}
