/// Slides under construction in a [`MutablePresentation`].
///
/// [`MutablePresentation`]: super::MutablePresentation
use crate::common::xml::{XmlElement, XmlNode};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::packuri::PackURI;
use crate::ooxml::pptx::parts::SlideLayoutPart;
use crate::ooxml::pptx::parts::slide::collect_text;
use crate::ooxml::pptx::shapes::base::{self, Placeholder};
use std::fmt::Write as FmtWrite;

use super::shape::MutableShape;

/// Namespaces every new slide root declares.
const SLIDE_NAMESPACES: [(&str, &str); 3] = [
    ("xmlns:a", "http://schemas.openxmlformats.org/drawingml/2006/main"),
    ("xmlns:r", "http://schemas.openxmlformats.org/officeDocument/2006/relationships"),
    ("xmlns:p", "http://schemas.openxmlformats.org/presentationml/2006/main"),
];

/// A slide being built: its identity in the presentation and its XML tree.
#[derive(Debug, Clone)]
pub struct MutableSlide {
    /// Slide ID (`p:sldId@id`), unique in the presentation
    pub(crate) slide_id: u32,
    /// Relationship id from the presentation part to this slide
    pub(crate) r_id: String,
    pub(crate) partname: PackURI,
    pub(crate) layout_partname: PackURI,
    /// The `p:sld` element
    pub(crate) tree: XmlElement,
    next_shape_id: u32,
}

impl MutableSlide {
    /// Create a slide from a layout, cloning the layout's placeholders.
    ///
    /// Date, footer and slide-number placeholders stay on the layout.
    /// `namespaces` are extra declarations (e.g. from a source slide) to carry
    /// on the new root.
    pub(crate) fn from_layout(
        slide_id: u32,
        r_id: String,
        partname: PackURI,
        layout: &SlideLayoutPart<'_>,
        namespaces: &[(String, String)],
    ) -> Result<Self> {
        let mut xml = String::with_capacity(1024);
        xml.push_str("<p:sld");
        for (key, uri) in SLIDE_NAMESPACES {
            write!(xml, r#" {}="{}""#, key, uri).map_err(|e| OoxmlError::Xml(e.to_string()))?;
        }
        xml.push('>');
        xml.push_str("<p:cSld><p:spTree>");
        xml.push_str(r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#);
        xml.push_str("<p:grpSpPr/>");
        xml.push_str("</p:spTree></p:cSld>");
        xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
        xml.push_str("</p:sld>");

        let mut tree = XmlElement::parse(xml.as_bytes())?;
        for (key, uri) in namespaces {
            if tree.attr(key).is_none() {
                tree.set_attr(key.as_str(), uri.as_str());
            }
        }

        let mut slide = Self {
            slide_id,
            r_id,
            partname,
            layout_partname: layout.partname().clone(),
            tree,
            next_shape_id: 2,
        };

        for (placeholder, layout_shape) in layout.placeholders() {
            if placeholder.is_latent() {
                continue;
            }
            let Some(ph) = base::placeholder_element(layout_shape) else {
                continue;
            };
            let shape_id = slide.next_shape_id();
            let shape = MutableShape::new_placeholder(shape_id, base::shape_name(layout_shape), ph);
            slide.add_shape(&shape)?;
        }

        Ok(slide)
    }

    /// Get the slide ID.
    pub fn slide_id(&self) -> u32 {
        self.slide_id
    }

    pub fn partname(&self) -> &PackURI {
        &self.partname
    }

    pub fn layout_partname(&self) -> &PackURI {
        &self.layout_partname
    }

    pub fn tree(&self) -> &XmlElement {
        &self.tree
    }

    pub fn sp_tree(&self) -> Option<&XmlElement> {
        self.tree.child_path(&["cSld", "spTree"])
    }

    pub fn sp_tree_mut(&mut self) -> Result<&mut XmlElement> {
        let partname = &self.partname;
        self.tree
            .child_path_mut(&["cSld", "spTree"])
            .ok_or_else(|| OoxmlError::InvalidFormat(format!("{} has no shape tree", partname)))
    }

    /// Reserve the next free shape id.
    pub fn next_shape_id(&mut self) -> u32 {
        let id = self.next_shape_id;
        self.next_shape_id += 1;
        id
    }

    /// Placeholders on the slide, in document order.
    pub fn placeholders(&self) -> impl Iterator<Item = (Placeholder, &XmlElement)> {
        self.sp_tree()
            .into_iter()
            .flat_map(XmlElement::elements)
            .filter_map(|shape| base::placeholder(shape).map(|ph| (ph, shape)))
    }

    pub fn placeholder(&self, idx: u32) -> Option<&XmlElement> {
        self.placeholders().find(|(ph, _)| ph.idx == idx).map(|(_, shape)| shape)
    }

    pub fn placeholder_mut(&mut self, idx: u32) -> Option<&mut XmlElement> {
        self.tree
            .child_path_mut(&["cSld", "spTree"])?
            .elements_mut()
            .find(|shape| base::placeholder(shape).is_some_and(|ph| ph.idx == idx))
    }

    /// Replace the placeholder with `idx` by `shape`, keeping its z-order.
    /// Returns false when there is no such placeholder.
    pub fn replace_placeholder(&mut self, idx: u32, shape: XmlElement) -> Result<bool> {
        let sp_tree = self.sp_tree_mut()?;
        let Some(slot) = sp_tree.children_mut().iter_mut().find(|node| {
            matches!(node, XmlNode::Element(e) if base::placeholder(e).is_some_and(|ph| ph.idx == idx))
        }) else {
            return Ok(false);
        };
        *slot = XmlNode::Element(shape);
        Ok(true)
    }

    /// Append an already-built shape element to the shape tree, keeping the
    /// id counter ahead of every id in it.
    pub fn append_shape(&mut self, shape: XmlElement) -> Result<()> {
        let max_id = base::max_shape_id(&shape);
        if max_id >= self.next_shape_id {
            self.next_shape_id = max_id + 1;
        }
        let sp_tree = self.sp_tree_mut()?;
        // extLst must stay last
        match sp_tree.position_of("extLst") {
            Some(at) => sp_tree.insert_child(at, shape),
            None => sp_tree.push_child(shape),
        }
        Ok(())
    }

    pub fn add_shape(&mut self, shape: &MutableShape) -> Result<()> {
        self.append_shape(shape.to_element()?)
    }

    /// All text on the slide, one entry per text frame or table cell.
    pub fn texts(&self) -> Vec<String> {
        let mut out = Vec::new();
        if let Some(sp_tree) = self.sp_tree() {
            collect_text(sp_tree, &mut out);
        }
        out
    }

    /// Whether an `r:*` attribute anywhere in the slide names `r_id`.
    pub fn references(&self, r_id: &str) -> bool {
        fn walk(element: &XmlElement, r_id: &str) -> bool {
            element
                .attributes()
                .iter()
                .any(|(name, value)| name.starts_with("r:") && value == r_id)
                || element.elements().any(|child| walk(child, r_id))
        }
        walk(&self.tree, r_id)
    }

    /// Serialize the slide part.
    pub(crate) fn to_xml_bytes(&self) -> Vec<u8> {
        self.tree.to_document_bytes()
    }
}
