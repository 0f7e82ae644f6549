//! Common utilities shared by the packaging and composition layers.

pub mod xml;

pub use xml::{XmlElement, XmlNode, XmlTreeError};
