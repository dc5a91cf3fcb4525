//! Dialect classification and resolution of explicit dialect requests.
//!
//! [`classify`] decides the dialect from the root element alone. [`resolve`]
//! combines that with a caller's [`DialectSelector`] and hands back the
//! element whose children are the observation members.

use crate::constants::{om1, om2};
use crate::document::describe;
use crate::envelope;
use crate::error::{Result, SosError};
use crate::models::{Dialect, DialectSelector};
use roxmltree::Node;
use tracing::{debug, warn};

/// Document root resolved to a dialect and its observation container
#[derive(Debug, Clone, Copy)]
pub struct ResolvedDocument<'a, 'input> {
    pub dialect: Dialect,
    /// `om:ObservationCollection` or `sos:GetObservationResponse`
    pub container: Node<'a, 'input>,
}

/// Decide the dialect of a document from its root element
///
/// The social dialect is never returned; it shares the SOS 2.0 shape and is
/// only reachable by explicit request.
pub fn classify(root: Node<'_, '_>) -> Result<Dialect> {
    if om1::OBSERVATION_COLLECTION.matches(root) {
        return Ok(Dialect::Om1);
    }

    if envelope::is_envelope(root) {
        envelope::observation_response(root)?;
        return Ok(Dialect::Om2Enveloped);
    }

    if om2::GET_OBSERVATION_RESPONSE.matches(root) {
        return Ok(Dialect::Om2Bare);
    }

    Err(SosError::unrecognized_dialect(describe(root)))
}

/// Resolve the dialect (classifying when `selector` is `Auto`) and locate the
/// observation container
pub fn resolve<'a, 'input>(
    root: Node<'a, 'input>,
    selector: DialectSelector,
) -> Result<ResolvedDocument<'a, 'input>> {
    let resolved = match selector {
        DialectSelector::Auto => {
            let dialect = classify(root)?;
            let container = match dialect {
                Dialect::Om2Enveloped => envelope::observation_response(root)?,
                _ => root,
            };
            ResolvedDocument { dialect, container }
        }
        DialectSelector::Version1 => {
            if !om1::OBSERVATION_COLLECTION.matches(root) {
                return Err(SosError::unexpected_root(
                    om1::OBSERVATION_COLLECTION.to_string(),
                    describe(root),
                ));
            }
            ResolvedDocument {
                dialect: Dialect::Om1,
                container: root,
            }
        }
        DialectSelector::Version2 => {
            let (container, enveloped) = observation_response(root)?;
            let dialect = if enveloped {
                Dialect::Om2Enveloped
            } else {
                Dialect::Om2Bare
            };
            ResolvedDocument { dialect, container }
        }
        DialectSelector::Social => {
            let (container, _) = observation_response(root)?;
            ResolvedDocument {
                dialect: Dialect::Social,
                container,
            }
        }
    };

    if resolved.dialect == Dialect::Om2Bare {
        warn!("SOS 2.0 response is not wrapped in a SOAP envelope");
    }
    debug!("Resolved document as {} ({})", resolved.dialect, selector);
    Ok(resolved)
}

/// `sos:GetObservationResponse` either enveloped or at the root
fn observation_response<'a, 'input>(root: Node<'a, 'input>) -> Result<(Node<'a, 'input>, bool)> {
    if envelope::is_envelope(root) {
        return Ok((envelope::observation_response(root)?, true));
    }
    if om2::GET_OBSERVATION_RESPONSE.matches(root) {
        return Ok((root, false));
    }
    Err(SosError::unexpected_root(
        om2::GET_OBSERVATION_RESPONSE.to_string(),
        describe(root),
    ))
}
