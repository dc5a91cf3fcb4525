//! SOAP envelope detection and payload unwrapping.

use crate::constants::{namespaces, om2, soap};
use crate::document::{describe, first_element_child};
use crate::error::{Result, SosError};
use roxmltree::Node;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoapVersion {
    V1_1,
    V1_2,
}

impl SoapVersion {
    pub fn namespace(&self) -> &'static str {
        match self {
            SoapVersion::V1_1 => namespaces::SOAP_1_1,
            SoapVersion::V1_2 => namespaces::SOAP_1_2,
        }
    }
}

/// SOAP version of `node` when it is an `Envelope` element
pub fn envelope_version(node: Node<'_, '_>) -> Option<SoapVersion> {
    if !node.is_element() || node.tag_name().name() != soap::ENVELOPE {
        return None;
    }
    match node.tag_name().namespace() {
        Some(namespaces::SOAP_1_1) => Some(SoapVersion::V1_1),
        Some(namespaces::SOAP_1_2) => Some(SoapVersion::V1_2),
        _ => None,
    }
}

pub fn is_envelope(node: Node<'_, '_>) -> bool {
    envelope_version(node).is_some()
}

/// First element child of the envelope's `Body`, whatever its type
pub fn payload<'a, 'input>(envelope: Node<'a, 'input>) -> Result<Node<'a, 'input>> {
    let version = envelope_version(envelope).ok_or_else(|| {
        SosError::missing_payload(format!("{} is not a SOAP envelope", describe(envelope)))
    })?;

    let body = envelope
        .children()
        .find(|child| {
            child.is_element() && child.has_tag_name((version.namespace(), soap::BODY))
        })
        .ok_or_else(|| SosError::missing_payload("envelope has no Body element"))?;

    let payload = first_element_child(body)
        .ok_or_else(|| SosError::missing_payload("envelope Body has no payload element"))?;

    debug!("Unwrapped {:?} envelope payload {}", version, describe(payload));
    Ok(payload)
}

/// Payload of the envelope, which must be a `sos:GetObservationResponse`
pub fn observation_response<'a, 'input>(envelope: Node<'a, 'input>) -> Result<Node<'a, 'input>> {
    let payload = payload(envelope)?;
    if om2::GET_OBSERVATION_RESPONSE.matches(payload) {
        Ok(payload)
    } else {
        Err(SosError::envelope_type_mismatch(
            om2::GET_OBSERVATION_RESPONSE.to_string(),
            describe(payload),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ObservationDocument;

    fn wrap(namespace: &str, body: &str) -> String {
        format!(
            r#"<env:Envelope xmlns:env="{namespace}" xmlns:sos="http://www.opengis.net/sos/2.0"
                xmlns:ows="http://www.opengis.net/ows/1.1">{body}</env:Envelope>"#
        )
    }

    #[test]
    fn test_detects_both_soap_versions() {
        for (namespace, version) in [
            (namespaces::SOAP_1_1, SoapVersion::V1_1),
            (namespaces::SOAP_1_2, SoapVersion::V1_2),
        ] {
            let xml = wrap(namespace, "<env:Body/>");
            let doc = ObservationDocument::parse(xml.as_bytes()).unwrap();
            assert_eq!(envelope_version(doc.root_element()), Some(version));
        }
    }

    #[test]
    fn test_foreign_envelope_namespace_is_not_soap() {
        let xml = wrap("urn:not-soap", "<env:Body/>");
        let doc = ObservationDocument::parse(xml.as_bytes()).unwrap();
        assert!(!is_envelope(doc.root_element()));
    }

    #[test]
    fn test_unwraps_observation_response() {
        let xml = wrap(
            namespaces::SOAP_1_2,
            "<env:Header/><env:Body>\n  <sos:GetObservationResponse/>\n</env:Body>",
        );
        let doc = ObservationDocument::parse(xml.as_bytes()).unwrap();
        let payload = observation_response(doc.root_element()).unwrap();
        assert_eq!(payload.tag_name().name(), "GetObservationResponse");
    }

    #[test]
    fn test_wrong_payload_type_is_a_type_mismatch() {
        let xml = wrap(
            namespaces::SOAP_1_1,
            "<env:Body><ows:ExceptionReport/></env:Body>",
        );
        let doc = ObservationDocument::parse(xml.as_bytes()).unwrap();
        let err = observation_response(doc.root_element()).unwrap_err();
        match err {
            SosError::EnvelopeTypeMismatch { expected, actual } => {
                assert_eq!(expected, "sos:GetObservationResponse");
                assert!(actual.starts_with("ows:ExceptionReport"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_body_or_empty_body_is_missing_payload() {
        for body in ["<env:Header/>", "<env:Body>  </env:Body>"] {
            let xml = wrap(namespaces::SOAP_1_1, body);
            let doc = ObservationDocument::parse(xml.as_bytes()).unwrap();
            let err = observation_response(doc.root_element()).unwrap_err();
            assert!(matches!(err, SosError::MissingOrInvalidPayload { .. }));
        }
    }
}
