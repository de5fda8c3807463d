//! Mapping of a Rossum annotation onto the payable invoice record.

use tracing::{debug, info};

use super::section::{Extracted, extract};
use super::Result;
use crate::error::ExtractionError;
use crate::models::annotation::{AnnotationExport, Node};
use crate::models::invoice::{DetailRecord, InvoiceRecord};

pub const BASIC_INFO_SECTION: &str = "basic_info_section";
pub const PAYMENT_INFO_SECTION: &str = "payment_info_section";
pub const AMOUNTS_SECTION: &str = "amounts_section";
pub const VENDOR_SECTION: &str = "vendor_section";
pub const OTHER_SECTION: &str = "other_section";
pub const LINE_ITEMS_SECTION: &str = "line_items_section";

/// Multivalue inside [`LINE_ITEMS_SECTION`] holding the line item tuples.
pub const LINE_ITEMS: &str = "line_items";

/// Schema id of a single line item tuple.
pub const LINE_ITEM: &str = "line_item";

/// Trait for turning an export payload into an invoice record.
pub trait InvoiceParser {
    /// Parse the first annotation of an export.
    fn parse(&self, export: &AnnotationExport) -> Result<InvoiceRecord>;
}

/// Maps the fixed Rossum invoice schema onto [`InvoiceRecord`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentMapper;

impl DocumentMapper {
    pub fn new() -> Self {
        Self
    }

    fn parse_content(&self, content: &[Node]) -> Result<InvoiceRecord> {
        let basic_info = extract(content, BASIC_INFO_SECTION)?;
        let payment_info = extract(content, PAYMENT_INFO_SECTION)?;
        let amounts = extract(content, AMOUNTS_SECTION)?;
        let vendor = extract(content, VENDOR_SECTION)?;
        let other = extract(content, OTHER_SECTION)?;
        let line_items_section = extract(content, LINE_ITEMS_SECTION)?;

        for (id, section) in [
            (BASIC_INFO_SECTION, &basic_info),
            (PAYMENT_INFO_SECTION, &payment_info),
            (AMOUNTS_SECTION, &amounts),
            (VENDOR_SECTION, &vendor),
            (OTHER_SECTION, &other),
            (LINE_ITEMS_SECTION, &line_items_section),
        ] {
            if section.is_empty() {
                debug!("Section {} is missing or empty", id);
            }
        }

        let line_items: &[Node] = line_items_section
            .multivalue(LINE_ITEMS)
            .and_then(|mv| mv.children.as_deref())
            .unwrap_or_default();
        debug!("Found {} line items", line_items.len());

        let details = line_items
            .iter()
            .map(make_detail)
            .collect::<Result<Vec<_>>>()?;

        Ok(InvoiceRecord {
            invoice_number: owned(&basic_info, "document_id"),
            invoice_date: owned(&basic_info, "date_issue"),
            due_date: owned(&basic_info, "date_due"),
            total_amount: owned(&amounts, "amount_total"),
            // Empty notes collapse to absent so they render as <Notes/>.
            notes: owned(&other, "notes").filter(|notes| !notes.is_empty()),
            iban: owned(&payment_info, "iban"),
            amount: owned(&line_items_section, "item_amount_total"),
            currency: owned(&amounts, "currency"),
            vendor: owned(&vendor, "recipient_name"),
            vendor_address: owned(&vendor, "recipient_address"),
            details,
        })
    }
}

impl InvoiceParser for DocumentMapper {
    fn parse(&self, export: &AnnotationExport) -> Result<InvoiceRecord> {
        let content = export.content().ok_or(ExtractionError::EmptyExport)?;
        let record = self.parse_content(content)?;

        info!(
            "Parsed invoice {} with {} line items",
            record.invoice_number.as_deref().unwrap_or("<unknown>"),
            record.details.len()
        );
        Ok(record)
    }
}

/// Parse an export with the default [`DocumentMapper`].
pub fn parse_document(export: &AnnotationExport) -> Result<InvoiceRecord> {
    DocumentMapper::new().parse(export)
}

fn make_detail(line_item: &Node) -> Result<DetailRecord> {
    let item = extract(std::slice::from_ref(line_item), LINE_ITEM)?;

    Ok(DetailRecord {
        amount: owned(&item, "item_amount"),
        account_id: owned(&item, "account_id"),
        quantity: owned(&item, "item_quantity"),
        notes: owned(&item, "item_description"),
    })
}

fn owned(section: &Extracted<'_>, schema_id: &str) -> Option<String> {
    section.text(schema_id).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn export(content: serde_json::Value) -> AnnotationExport {
        serde_json::from_value(json!({"results": [{"content": content}]})).unwrap()
    }

    fn line_item(amount: &str, description: &str) -> serde_json::Value {
        json!({
            "category": "tuple",
            "schema_id": "line_item",
            "children": [
                {"category": "datapoint", "schema_id": "item_amount", "type": "number", "value": amount},
                {"category": "datapoint", "schema_id": "item_quantity", "type": "number", "value": "1"},
                {"category": "datapoint", "schema_id": "item_description", "type": "string", "value": description}
            ]
        })
    }

    #[test]
    fn test_parse_full_document() {
        let payload = export(json!([
            {"category": "section", "schema_id": "basic_info_section", "children": [
                {"category": "datapoint", "schema_id": "document_id", "type": "string", "value": "143453775"},
                {"category": "datapoint", "schema_id": "date_issue", "type": "date", "value": "2019-03-01"},
                {"category": "datapoint", "schema_id": "date_due", "type": "date", "value": "2019-03-31"}
            ]},
            {"category": "section", "schema_id": "amounts_section", "children": [
                {"category": "datapoint", "schema_id": "amount_total", "type": "number", "value": "2706.00"},
                {"category": "datapoint", "schema_id": "currency", "type": "enum", "value": "nok"}
            ]},
            {"category": "section", "schema_id": "other_section", "children": [
                {"category": "datapoint", "schema_id": "notes", "type": "string", "value": ""}
            ]},
            {"category": "section", "schema_id": "line_items_section", "children": [
                {"category": "datapoint", "schema_id": "item_amount_total", "type": "number", "value": "300.00"},
                {"category": "multivalue", "schema_id": "line_items", "children": [
                    line_item("100.00", "First"),
                    line_item("200.00", "")
                ]}
            ]}
        ]));

        let record = parse_document(&payload).unwrap();

        assert_eq!(record.invoice_number.as_deref(), Some("143453775"));
        assert_eq!(record.invoice_date.as_deref(), Some("2019-03-01T00:00:00"));
        assert_eq!(record.due_date.as_deref(), Some("2019-03-31T00:00:00"));
        assert_eq!(record.total_amount.as_deref(), Some("2706.00"));
        assert_eq!(record.currency.as_deref(), Some("NOK"));
        assert_eq!(record.amount.as_deref(), Some("300.00"));
        assert_eq!(record.notes, None);
        assert_eq!(record.iban, None);
        assert_eq!(record.vendor, None);

        assert_eq!(
            record.details,
            vec![
                DetailRecord {
                    amount: Some("100.00".into()),
                    account_id: None,
                    quantity: Some("1".into()),
                    notes: Some("First".into()),
                },
                DetailRecord {
                    amount: Some("200.00".into()),
                    account_id: None,
                    quantity: Some("1".into()),
                    notes: Some(String::new()),
                },
            ]
        );
    }

    #[test]
    fn test_missing_sections_yield_absent_fields() {
        let record = parse_document(&export(json!([]))).unwrap();
        assert_eq!(record, InvoiceRecord::default());
    }

    #[test]
    fn test_line_items_section_without_multivalue() {
        let payload = export(json!([
            {"category": "section", "schema_id": "line_items_section", "children": [
                {"category": "datapoint", "schema_id": "item_amount_total", "value": "0.00"}
            ]}
        ]));

        let record = parse_document(&payload).unwrap();
        assert!(record.details.is_empty());
        assert_eq!(record.amount.as_deref(), Some("0.00"));
    }

    #[test]
    fn test_non_empty_notes_are_kept() {
        let payload = export(json!([
            {"category": "section", "schema_id": "other_section", "children": [
                {"category": "datapoint", "schema_id": "notes", "value": "Paid by card"}
            ]}
        ]));

        let record = parse_document(&payload).unwrap();
        assert_eq!(record.notes.as_deref(), Some("Paid by card"));
    }

    #[test]
    fn test_lenient_nodes_do_not_abort_parse() {
        let payload = export(json!([
            {"schema_id": "foo"},
            {"category": "section", "schema_id": "vendor_section", "children": [
                {"category": "datapoint", "schema_id": "recipient_name", "type": null, "value": "Acme"}
            ]}
        ]));

        let record = parse_document(&payload).unwrap();
        assert_eq!(record.vendor.as_deref(), Some("Acme"));
    }

    #[test]
    fn test_empty_export_is_an_error() {
        let err = parse_document(&AnnotationExport::default()).unwrap_err();
        assert!(matches!(err, ExtractionError::EmptyExport));
    }

    #[test]
    fn test_bad_date_fails_parse() {
        let payload = export(json!([
            {"category": "section", "schema_id": "basic_info_section", "children": [
                {"category": "datapoint", "schema_id": "date_issue", "type": "date", "value": "March 1st"}
            ]}
        ]));

        assert!(parse_document(&payload).is_err());
    }
}
