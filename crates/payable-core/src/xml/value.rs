//! Generic ordered tree consumed by the XML serializer.

use serde_json::Value;

/// A value under an XML key.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlValue {
    /// Renders as a self-closing element.
    Null,
    /// Text content.
    Text(String),
    /// Nested elements, in insertion order.
    Map(XmlMap),
    /// One element per item, each named after the enclosing key.
    List(Vec<XmlValue>),
}

/// Ordered mapping from element name to value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XmlMap {
    entries: Vec<(String, XmlValue)>,
}

impl XmlMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing an existing key in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<XmlValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder-style [`XmlMap::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<XmlValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&XmlValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &XmlValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<XmlValue>> FromIterator<(K, V)> for XmlMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = XmlMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl From<String> for XmlValue {
    fn from(text: String) -> Self {
        XmlValue::Text(text)
    }
}

impl From<&str> for XmlValue {
    fn from(text: &str) -> Self {
        XmlValue::Text(text.to_string())
    }
}

impl<T: Into<XmlValue>> From<Option<T>> for XmlValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(XmlValue::Null, Into::into)
    }
}

impl From<XmlMap> for XmlValue {
    fn from(map: XmlMap) -> Self {
        XmlValue::Map(map)
    }
}

impl From<Vec<XmlValue>> for XmlValue {
    fn from(items: Vec<XmlValue>) -> Self {
        XmlValue::List(items)
    }
}

impl From<&Value> for XmlValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => XmlValue::Null,
            Value::String(s) => XmlValue::Text(s.clone()),
            Value::Bool(_) | Value::Number(_) => XmlValue::Text(value.to_string()),
            Value::Array(items) => XmlValue::List(items.iter().map(XmlValue::from).collect()),
            Value::Object(map) => {
                XmlValue::Map(map.iter().map(|(k, v)| (k.as_str(), XmlValue::from(v))).collect())
            }
        }
    }
}
