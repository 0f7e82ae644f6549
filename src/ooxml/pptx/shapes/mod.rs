/// Shapes module for PowerPoint presentations.
///
/// Shapes are read and edited in place on the slide's [`XmlElement`] tree:
/// - classification and common properties ([`base`])
/// - text frames with paragraphs, levels and alignment ([`textframe`])
/// - pictures ([`picture`])
/// - tables ([`table`])
///
/// [`XmlElement`]: crate::common::xml::XmlElement
pub mod base;
pub mod picture;
pub mod table;
pub mod textframe;

pub use base::{Geometry, Placeholder, ShapeKind};
pub use textframe::TextParagraph;
