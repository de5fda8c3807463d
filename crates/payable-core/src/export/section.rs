//! Section lookup by schema identifier.

use std::collections::HashMap;

use tracing::debug;

use super::normalize::normalize;
use crate::error::ExtractionError;
use crate::models::annotation::{MultivalueNode, Node, SectionNode};

/// One entry of a [`SectionMapping`].
#[derive(Debug, Clone, PartialEq)]
pub enum Field<'a> {
    /// Normalized datapoint value.
    Value(String),
    /// Raw multivalue child, left for the caller to walk.
    Multivalue(&'a MultivalueNode),
}

/// Child fields of one extracted section, keyed by `schema_id`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionMapping<'a> {
    fields: HashMap<&'a str, Field<'a>>,
}

impl<'a> SectionMapping<'a> {
    /// Normalized value of a datapoint child.
    pub fn text(&self, schema_id: &str) -> Option<&str> {
        match self.fields.get(schema_id)? {
            Field::Value(value) => Some(value.as_str()),
            Field::Multivalue(_) => None,
        }
    }

    /// Raw multivalue child.
    pub fn multivalue(&self, schema_id: &str) -> Option<&'a MultivalueNode> {
        match self.fields.get(schema_id)? {
            Field::Multivalue(node) => Some(*node),
            Field::Value(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Result of [`extract`].
///
/// A matched section or tuple yields a mapping; a matched multivalue yields
/// its children unchanged. Callers pick the shape they expect.
#[derive(Debug, Clone, PartialEq)]
pub enum Extracted<'a> {
    Mapping(SectionMapping<'a>),
    Items(&'a [Node]),
}

impl<'a> Extracted<'a> {
    /// Datapoint value by id. Always `None` for [`Extracted::Items`].
    pub fn text(&self, schema_id: &str) -> Option<&str> {
        match self {
            Extracted::Mapping(mapping) => mapping.text(schema_id),
            Extracted::Items(_) => None,
        }
    }

    /// Multivalue child by id. Always `None` for [`Extracted::Items`].
    pub fn multivalue(&self, schema_id: &str) -> Option<&'a MultivalueNode> {
        match self {
            Extracted::Mapping(mapping) => mapping.multivalue(schema_id),
            Extracted::Items(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Extracted::Mapping(mapping) => mapping.is_empty(),
            Extracted::Items(items) => items.is_empty(),
        }
    }
}

/// Find the first container in `siblings` with `schema_id == target_id`.
///
/// Datapoints sharing the id are skipped. No match yields an empty mapping.
pub fn extract<'a>(
    siblings: &'a [Node],
    target_id: &str,
) -> Result<Extracted<'a>, ExtractionError> {
    for node in siblings {
        match node {
            Node::Section(section) | Node::Tuple(section) if section.schema_id == target_id => {
                debug!("Found section: {}", target_id);
                return map_children(section).map(Extracted::Mapping);
            }
            Node::Multivalue(multivalue) if multivalue.schema_id == target_id => {
                debug!("Found multivalue: {}", target_id);
                return Ok(Extracted::Items(multivalue.children.as_deref().unwrap_or_default()));
            }
            _ => {}
        }
    }

    Ok(Extracted::Mapping(SectionMapping::default()))
}

fn map_children(section: &SectionNode) -> Result<SectionMapping<'_>, ExtractionError> {
    let mut fields = HashMap::new();

    for child in &section.children {
        if let Node::Datapoint(datapoint) = child {
            if datapoint.value.is_some() {
                fields.insert(datapoint.schema_id.as_str(), Field::Value(normalize(datapoint)?));
            }
        }
    }

    // Merged second: a multivalue replaces a datapoint with the same id.
    for child in &section.children {
        if let Node::Multivalue(multivalue) = child {
            if multivalue.children.is_some() {
                fields.insert(multivalue.schema_id.as_str(), Field::Multivalue(multivalue));
            }
        }
    }

    Ok(SectionMapping { fields })
}
