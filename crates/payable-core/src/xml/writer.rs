//! XML rendering of an [`XmlMap`] tree.

use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use super::value::{XmlMap, XmlValue};
use crate::error::XmlError;

/// Encoding name written into the declaration when none is configured.
pub const DEFAULT_ENCODING: &str = "utf-8";

/// Renders trees as indented XML with a declaration line.
#[derive(Debug, Clone)]
pub struct XmlSerializer {
    encoding: String,
}

impl XmlSerializer {
    /// Create a serializer that declares the given encoding name.
    pub fn new(encoding: impl Into<String>) -> Self {
        Self {
            encoding: encoding.into(),
        }
    }

    /// Render `tree` in insertion order.
    ///
    /// The declaration is always followed by a newline, so an empty tree
    /// renders as the declaration line alone.
    pub fn render(&self, tree: &XmlMap) -> Result<String, XmlError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new(
            "1.0",
            Some(self.encoding.as_str()),
            None,
        )))?;
        writer.write_event(Event::Text(BytesText::new("\n")))?;

        for (key, value) in tree.iter() {
            write_entry(&mut writer, key, value)?;
        }

        Ok(String::from_utf8(writer.into_inner())?)
    }
}

impl Default for XmlSerializer {
    fn default() -> Self {
        Self::new(DEFAULT_ENCODING)
    }
}

/// Render `tree` with the default serializer settings for `encoding`.
pub fn render(tree: &XmlMap, encoding: &str) -> Result<String, XmlError> {
    XmlSerializer::new(encoding).render(tree)
}

fn write_entry<W: Write>(
    writer: &mut Writer<W>,
    key: &str,
    value: &XmlValue,
) -> std::io::Result<()> {
    match value {
        XmlValue::Null => writer.write_event(Event::Empty(BytesStart::new(key))),
        XmlValue::Map(map) if map.is_empty() => {
            writer.write_event(Event::Empty(BytesStart::new(key)))
        }
        XmlValue::Text(text) => {
            writer.write_event(Event::Start(BytesStart::new(key)))?;
            writer.write_event(Event::Text(BytesText::new(text)))?;
            writer.write_event(Event::End(BytesEnd::new(key)))
        }
        XmlValue::Map(map) => {
            writer.write_event(Event::Start(BytesStart::new(key)))?;
            for (child_key, child) in map.iter() {
                write_entry(writer, child_key, child)?;
            }
            writer.write_event(Event::End(BytesEnd::new(key)))
        }
        // Each item repeats the key; there is no grouping parent.
        XmlValue::List(items) => {
            for item in items {
                write_entry(writer, key, item)?;
            }
            Ok(())
        }
    }
}
