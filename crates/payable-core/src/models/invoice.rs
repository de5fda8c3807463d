//! Payable invoice record produced from an annotation.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::xml::{XmlMap, XmlValue};

/// Flat invoice record. Every field is optional; absent fields render as
/// self-closing elements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InvoiceRecord {
    pub invoice_number: Option<String>,

    /// Issue date as `YYYY-MM-DDTHH:MM:SS`.
    pub invoice_date: Option<String>,

    /// Due date as `YYYY-MM-DDTHH:MM:SS`.
    pub due_date: Option<String>,

    pub total_amount: Option<String>,

    pub notes: Option<String>,

    pub iban: Option<String>,

    /// Sum of line item amounts as stated on the document.
    pub amount: Option<String>,

    pub currency: Option<String>,

    pub vendor: Option<String>,

    pub vendor_address: Option<String>,

    /// One entry per line item, in document order.
    pub details: Vec<DetailRecord>,
}

/// One line item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DetailRecord {
    pub amount: Option<String>,
    pub account_id: Option<String>,
    pub quantity: Option<String>,
    pub notes: Option<String>,
}

impl DetailRecord {
    fn to_xml(&self) -> XmlValue {
        let detail = XmlMap::new()
            .with("Amount", self.amount.clone())
            .with("AccountId", self.account_id.clone())
            .with("Quantity", self.quantity.clone())
            .with("Notes", self.notes.clone());

        XmlValue::Map(XmlMap::new().with("Detail", detail))
    }
}

impl InvoiceRecord {
    /// Build the `InvoiceRegisters/Invoices/Payable` tree for serialization.
    pub fn to_xml_tree(&self) -> XmlMap {
        let details: Vec<XmlValue> = self.details.iter().map(DetailRecord::to_xml).collect();

        let payable = XmlMap::new()
            .with("InvoiceNumber", self.invoice_number.clone())
            .with("InvoiceDate", self.invoice_date.clone())
            .with("DueDate", self.due_date.clone())
            .with("TotalAmount", self.total_amount.clone())
            .with("Notes", self.notes.clone())
            .with("Iban", self.iban.clone())
            .with("Amount", self.amount.clone())
            .with("Currency", self.currency.clone())
            .with("Vendor", self.vendor.clone())
            .with("VendorAddress", self.vendor_address.clone())
            .with("Details", details);

        XmlMap::new().with(
            "InvoiceRegisters",
            XmlMap::new().with("Invoices", XmlMap::new().with("Payable", payable)),
        )
    }

    /// Report soft issues with the record. Never fails.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if is_blank(&self.invoice_number) {
            issues.push("Missing invoice number".to_string());
        }

        if is_blank(&self.due_date) {
            issues.push("Missing due date".to_string());
        }

        if self.details.is_empty() {
            issues.push("No line items".to_string());
        }

        let mut calculated = Decimal::ZERO;
        for (i, detail) in self.details.iter().enumerate() {
            match parse_amount(&detail.amount) {
                Some(Ok(amount)) => calculated += amount,
                Some(Err(raw)) => {
                    issues.push(format!("Line item {} amount is not a number: {raw}", i + 1))
                }
                None => {}
            }
        }

        match parse_amount(&self.amount) {
            Some(Ok(stated)) if !self.details.is_empty() => {
                if (calculated - stated).abs() > Decimal::new(1, 2) {
                    issues.push(format!(
                        "Line item total ({}) differs from stated amount ({})",
                        calculated, stated
                    ));
                }
            }
            Some(Err(raw)) => issues.push(format!("Amount is not a number: {raw}")),
            _ => {}
        }

        issues
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(str::is_empty)
}

/// `None` for blank values, `Err` with the raw text when unparsable.
fn parse_amount(value: &Option<String>) -> Option<Result<Decimal, &str>> {
    let raw = value.as_deref().filter(|v| !v.is_empty())?;
    Some(Decimal::from_str(raw).map_err(|_| raw))
}
