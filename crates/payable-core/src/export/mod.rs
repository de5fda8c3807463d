//! Field extraction from annotation export trees.

mod mapper;
mod normalize;
mod section;

pub use mapper::{
    AMOUNTS_SECTION, BASIC_INFO_SECTION, DocumentMapper, InvoiceParser, LINE_ITEM, LINE_ITEMS,
    LINE_ITEMS_SECTION, OTHER_SECTION, PAYMENT_INFO_SECTION, VENDOR_SECTION, parse_document,
};
pub use normalize::{SOURCE_DATE_FORMAT, TARGET_DATE_FORMAT, normalize};
pub use section::{Extracted, Field, SectionMapping, extract};

use crate::error::ExtractionError;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;
