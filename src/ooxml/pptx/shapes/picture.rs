/// Picture (image) shape helpers.
///
/// A picture references its image through `p:blipFill/a:blip@r:embed`; the
/// rId resolves against the slide part's relationships.
use crate::common::xml::XmlElement;

/// The `a:blip` element of a picture, if it has one.
pub fn blip(pic: &XmlElement) -> Option<&XmlElement> {
    pic.child("blipFill")?.child("blip")
}

/// Relationship id of the embedded image.
pub fn blip_rel_id(pic: &XmlElement) -> Option<&str> {
    blip(pic)?.attr("r:embed")
}

/// Relationship id of a linked (not embedded) image.
pub fn blip_link_id(pic: &XmlElement) -> Option<&str> {
    blip(pic)?.attr("r:link")
}

/// Whether the picture's image is described by a `descr` alternative text.
pub fn description(pic: &XmlElement) -> Option<&str> {
    pic.child("nvPicPr")?.child("cNvPr")?.attr("descr")
}
