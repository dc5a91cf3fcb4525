//! Field reading utilities for observation elements
//!
//! Each reader resolves one [`Locator`] against an observation that is known
//! to carry the located element, and turns it into a [`FieldValue`] or a
//! structural error naming the field.

use super::social::parse_time_position;
use crate::constants::om2;
use crate::document::{
    attribute, child_element, child_elements, first_element_child, fragment, text_content,
    xlink_href, xlink_title,
    XmlName,
};
use crate::error::{Result, SosError};
use crate::models::FieldValue;
use crate::schema::{FieldDescriptor, Locator};
use roxmltree::Node;

/// Read the value of `descriptor` from `observation`
pub fn read_field(
    descriptor: &FieldDescriptor,
    observation: Node<'_, '_>,
    index: usize,
) -> Result<FieldValue> {
    let field = descriptor.error_name();
    match descriptor.locator {
        Locator::Element(name) => {
            let node = get_required_element(observation, &name, index)?;
            Ok(FieldValue::from_fragment(descriptor.kind, fragment(node)))
        }
        Locator::Elements(name) => Ok(FieldValue::SubtreeList(
            child_elements(observation, &name).map(fragment).collect(),
        )),
        Locator::Attribute(name) => attribute(observation, &name)
            .map(|value| FieldValue::Text(value.to_string()))
            .ok_or_else(|| SosError::missing_required(field, index)),
        Locator::TimeInstant(name) => {
            let node = get_required_element(observation, &name, index)?;
            parse_required_time_instant(node, field, index).map(FieldValue::Timestamp)
        }
        Locator::Href(name) => {
            let node = get_required_element(observation, &name, index)?;
            let href = xlink_href(node)
                .ok_or_else(|| SosError::malformed_field(field, "missing href", index))?;
            Ok(FieldValue::Text(href.to_string()))
        }
        Locator::Title(name) => {
            let node = get_required_element(observation, &name, index)?;
            let title = xlink_title(node)
                .ok_or_else(|| SosError::malformed_field(field, "missing title", index))?;
            Ok(FieldValue::Text(title.to_string()))
        }
        Locator::Text(name) => {
            let node = get_required_element(observation, &name, index)?;
            parse_required_text(node, field, index).map(FieldValue::Text)
        }
    }
}

/// Get a required child element of an observation
pub fn get_required_element<'a, 'input>(
    observation: Node<'a, 'input>,
    name: &XmlName,
    index: usize,
) -> Result<Node<'a, 'input>> {
    child_element(observation, name).ok_or_else(|| SosError::missing_required(name.local, index))
}

/// Parse `gml:TimeInstant/gml:timePosition` inside a temporal property
pub fn parse_required_time_instant(
    property: Node<'_, '_>,
    field: &str,
    index: usize,
) -> Result<chrono::DateTime<chrono::FixedOffset>> {
    let instant = child_element(property, &om2::TIME_INSTANT)
        .ok_or_else(|| SosError::malformed_field(field, "not a time instant", index))?;
    let position = child_element(instant, &om2::TIME_POSITION)
        .ok_or_else(|| SosError::malformed_field(field, "missing time position", index))?;

    let text = text_content(position);
    let value = text.trim();
    parse_time_position(value).ok_or_else(|| {
        SosError::malformed_field(field, format!("invalid time position '{}'", value), index)
    })
}

/// Literal, trimmed, non-empty text of an element
///
/// Only text directly inside the element counts; nested markup is rejected.
pub fn parse_required_text(node: Node<'_, '_>, field: &str, index: usize) -> Result<String> {
    if first_element_child(node).is_some() {
        return Err(SosError::malformed_field(field, "missing text content", index));
    }
    let text = text_content(node);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(SosError::malformed_field(field, "missing text content", index));
    }
    Ok(trimmed.to_string())
}
