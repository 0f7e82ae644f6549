//! XML helpers: escaping and the owned element tree used for editable parts.

pub mod element;
pub mod escape;

pub use element::{XML_DECLARATION, XmlElement, XmlNode, XmlTreeError, local_name_of};
pub use escape::{escape_xml, resolve_entity, unescape_xml};
