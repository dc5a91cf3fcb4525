//! Integration tests for the processor module
//!
//! Tests the batch pipeline against small response files written to
//! temporary directories.

pub mod error_handling;

use std::fs;
use std::path::{Path, PathBuf};

pub const OM1_RESPONSE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<om:ObservationCollection xmlns:om="http://www.opengis.net/om/1.0"
    xmlns:gml="http://www.opengis.net/gml" xmlns:xlink="http://www.w3.org/1999/xlink">
  <om:member>
    <om:Observation gml:id="o_1">
      <om:samplingTime><gml:TimeInstant><gml:timePosition>2015-06-01T12:00:00Z</gml:timePosition></gml:TimeInstant></om:samplingTime>
      <om:procedure xlink:href="urn:ogc:object:feature:Sensor:1"/>
      <om:observedProperty xlink:href="urn:ogc:def:phenomenon:OGC:1.0.30:temperature"/>
      <om:featureOfInterest xlink:href="urn:ogc:object:feature:station:1"/>
      <om:result>12.5</om:result>
    </om:Observation>
  </om:member>
</om:ObservationCollection>"#;

pub const OM2_RESPONSE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<sos:GetObservationResponse xmlns:sos="http://www.opengis.net/sos/2.0"
    xmlns:om="http://www.opengis.net/om/2.0" xmlns:gml="http://www.opengis.net/gml/3.2"
    xmlns:xlink="http://www.w3.org/1999/xlink">
  <sos:observationData>
    <om:OM_Observation gml:id="o1">
      <om:phenomenonTime><gml:TimeInstant gml:id="t1"><gml:timePosition>2016-03-04T10:15:00Z</gml:timePosition></gml:TimeInstant></om:phenomenonTime>
      <om:resultTime><gml:TimeInstant gml:id="t2"><gml:timePosition>2016-03-04T10:16:00Z</gml:timePosition></gml:TimeInstant></om:resultTime>
      <om:procedure xlink:href="http://example.org/procedure/1"/>
      <om:observedProperty xlink:href="http://example.org/property/air_temperature"/>
      <om:featureOfInterest xlink:href="http://example.org/foi/1"/>
      <om:result>21.5</om:result>
    </om:OM_Observation>
  </sos:observationData>
  <sos:observationData>
    <om:OM_Observation gml:id="o2">
      <om:phenomenonTime><gml:TimeInstant gml:id="t3"><gml:timePosition>2016-03-04T10:30:00Z</gml:timePosition></gml:TimeInstant></om:phenomenonTime>
      <om:resultTime><gml:TimeInstant gml:id="t4"><gml:timePosition>2016-03-04T10:31:00Z</gml:timePosition></gml:TimeInstant></om:resultTime>
      <om:procedure xlink:href="http://example.org/procedure/1"/>
      <om:observedProperty xlink:href="http://example.org/property/air_temperature"/>
      <om:featureOfInterest xlink:href="http://example.org/foi/1"/>
      <om:result>21.9</om:result>
    </om:OM_Observation>
  </sos:observationData>
</sos:GetObservationResponse>"#;

pub const SOCIAL_RESPONSE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<sos:GetObservationResponse xmlns:sos="http://www.opengis.net/sos/2.0"
    xmlns:om="http://www.opengis.net/om/2.0" xmlns:gml="http://www.opengis.net/gml/3.2"
    xmlns:xlink="http://www.w3.org/1999/xlink">
  <sos:observationData>
    <om:OM_Observation gml:id="s1">
      <om:phenomenonTime><gml:TimeInstant gml:id="t1"><gml:timePosition>2014-02-14T08:30:00Z</gml:timePosition></gml:TimeInstant></om:phenomenonTime>
      <om:resultTime xlink:href="http://example.org/time/1"/>
      <om:procedure xlink:href="http://example.org/twitter"/>
      <om:observedProperty xlink:href="http://example.org/property/flooding"/>
      <om:featureOfInterest xlink:href="http://example.org/user/42" xlink:title="@flood_watcher"/>
      <om:result>River over the bank at the bridge</om:result>
    </om:OM_Observation>
  </sos:observationData>
</sos:GetObservationResponse>"#;

/// Write a response file into `dir`
pub fn write_response(dir: &Path, name: &str, content: &str) -> PathBuf {
    fs::create_dir_all(dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}
