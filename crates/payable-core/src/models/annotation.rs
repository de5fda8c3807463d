//! Annotation export tree as returned by the Rossum export endpoint.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::Result;

/// Top-level payload of `POST /api/v1/annotations/export?format=json`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AnnotationExport {
    /// One entry per exported annotation.
    #[serde(default)]
    pub results: Vec<ExportResult>,
}

impl AnnotationExport {
    /// Parse an export payload from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Content tree of the first exported annotation.
    pub fn content(&self) -> Option<&[Node]> {
        self.results.first().map(|result| result.content.as_slice())
    }
}

/// A single exported annotation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExportResult {
    /// Root nodes of the annotation content tree.
    #[serde(default)]
    pub content: Vec<Node>,
}

/// A node in the annotation content tree, selected by its `category`.
///
/// Nodes with a missing or unrecognized category read as [`Node::Other`]
/// instead of failing the whole export.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Named group of fields.
    Section(SectionNode),
    /// One row of a multivalue; same shape as a section.
    Tuple(SectionNode),
    /// Repeating group of structurally identical children.
    Multivalue(MultivalueNode),
    /// Scalar field.
    Datapoint(DatapointNode),
    /// Any category this crate does not read.
    Other,
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let category = value
            .get("category")
            .and_then(Value::as_str)
            .map(str::to_string);

        let node = match category.as_deref() {
            Some("section") => serde_json::from_value(value).map(Node::Section),
            Some("tuple") => serde_json::from_value(value).map(Node::Tuple),
            Some("multivalue") => serde_json::from_value(value).map(Node::Multivalue),
            Some("datapoint") => serde_json::from_value(value).map(Node::Datapoint),
            _ => Ok(Node::Other),
        };
        node.map_err(D::Error::custom)
    }
}

impl Node {
    /// Schema identifier of the node, if it has one.
    pub fn schema_id(&self) -> Option<&str> {
        match self {
            Node::Section(node) | Node::Tuple(node) => Some(node.schema_id.as_str()),
            Node::Multivalue(node) => Some(node.schema_id.as_str()),
            Node::Datapoint(node) => Some(node.schema_id.as_str()),
            Node::Other => None,
        }
    }
}

/// Section or tuple: a container of child nodes.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SectionNode {
    #[serde(default)]
    pub schema_id: String,

    #[serde(default)]
    pub children: Vec<Node>,
}

/// Multivalue container.
///
/// `children` is `None` when the export omitted the key entirely, which
/// extraction treats differently from an empty list.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MultivalueNode {
    #[serde(default)]
    pub schema_id: String,

    #[serde(default)]
    pub children: Option<Vec<Node>>,
}

/// Scalar field with a declared semantic type.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DatapointNode {
    #[serde(default)]
    pub schema_id: String,

    /// Declared type of `value`.
    #[serde(rename = "type", default, deserialize_with = "type_or_string")]
    pub field_type: FieldType,

    /// Raw value. `None` means the key was absent; `Some(Value::Null)` means
    /// it was present but null.
    #[serde(default, deserialize_with = "present")]
    pub value: Option<Value>,
}

/// Semantic type of a datapoint value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Date,
    Enum,
    #[default]
    String,
    Number,
    #[serde(other)]
    Other,
}

/// A null `type` reads as the default string type.
fn type_or_string<'de, D>(deserializer: D) -> std::result::Result<FieldType, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<FieldType>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn present<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}
