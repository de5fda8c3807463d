//! XML serialization of ordered record trees.

mod value;
mod writer;

pub use value::{XmlMap, XmlValue};
pub use writer::{DEFAULT_ENCODING, XmlSerializer, render};
