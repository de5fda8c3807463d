//! Core library for exporting Rossum annotations as payable-invoice XML.
//!
//! This crate provides:
//! - A typed model of the annotation export tree
//! - Section lookup and datapoint normalization
//! - Mapping onto a fixed payable invoice record
//! - Ordered XML serialization of record trees

pub mod error;
pub mod export;
pub mod models;
pub mod xml;

pub use error::{ConfigError, ExtractionError, PayableError, Result, XmlError};
pub use export::{DocumentMapper, InvoiceParser, extract, normalize, parse_document};
pub use models::annotation::{AnnotationExport, Node};
pub use models::config::PayableConfig;
pub use models::invoice::{DetailRecord, InvoiceRecord};
pub use xml::{XmlMap, XmlSerializer, XmlValue};

/// Parse an export and render it as XML declared with `encoding`.
pub fn convert(export: &AnnotationExport, encoding: &str) -> Result<String> {
    let record = parse_document(export)?;
    tracing::debug!("Parsed document: {:?}", record);
    Ok(XmlSerializer::new(encoding).render(&record.to_xml_tree())?)
}
