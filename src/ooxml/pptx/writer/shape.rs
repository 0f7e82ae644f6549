/// Shape types and XML generation for slides under construction.
use crate::common::xml::{XmlElement, escape_xml};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::pptx::shapes::base::{Geometry, Placeholder};
use crate::ooxml::pptx::shapes::textframe::{self, TextParagraph};
use std::fmt::Write as FmtWrite;

/// A shape to be added to a slide.
#[derive(Debug, Clone)]
pub struct MutableShape {
    /// Shape ID
    pub(crate) shape_id: u32,
    /// `cNvPr@name`
    pub(crate) name: String,
    /// Shape type
    pub(crate) shape_type: ShapeType,
}

#[derive(Debug, Clone)]
pub(crate) enum ShapeType {
    TextBox {
        geometry: Geometry,
        paragraphs: Vec<TextParagraph>,
    },
    AutoShape {
        geometry: Geometry,
        preset: String,
        fill_color: Option<String>,
        paragraphs: Vec<TextParagraph>,
    },
    Picture {
        geometry: Geometry,
        rel_id: String,
        description: String,
    },
    /// A picture filling a placeholder; geometry is inherited from the layout
    PlaceholderPicture {
        placeholder: Placeholder,
        orient: Option<String>,
        sz: Option<String>,
        rel_id: String,
    },
    /// An empty placeholder cloned from a layout placeholder
    Placeholder {
        placeholder: Placeholder,
        orient: Option<String>,
        sz: Option<String>,
    },
}

impl MutableShape {
    /// Create a new text box shape.
    pub fn new_text_box(shape_id: u32, name: impl Into<String>, geometry: Geometry, paragraphs: Vec<TextParagraph>) -> Self {
        Self {
            shape_id,
            name: name.into(),
            shape_type: ShapeType::TextBox { geometry, paragraphs },
        }
    }

    /// Create a preset-geometry shape, optionally with a solid RGB fill.
    pub fn new_auto_shape(
        shape_id: u32,
        name: impl Into<String>,
        preset: impl Into<String>,
        geometry: Geometry,
        fill_color: Option<String>,
        paragraphs: Vec<TextParagraph>,
    ) -> Self {
        Self {
            shape_id,
            name: name.into(),
            shape_type: ShapeType::AutoShape {
                geometry,
                preset: preset.into(),
                fill_color,
                paragraphs,
            },
        }
    }

    /// Create a picture referencing an image relationship of the slide.
    pub fn new_picture(shape_id: u32, name: impl Into<String>, rel_id: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            shape_id,
            name: name.into(),
            shape_type: ShapeType::Picture {
                geometry,
                rel_id: rel_id.into(),
                description: String::new(),
            },
        }
    }

    /// Create a picture that takes the place of the placeholder `ph`.
    ///
    /// The `p:ph` identity (type, idx, orient, sz) is kept so the picture
    /// inherits position and size from the layout.
    pub fn new_placeholder_picture(shape_id: u32, name: impl Into<String>, ph: &XmlElement, rel_id: impl Into<String>) -> Self {
        Self {
            shape_id,
            name: name.into(),
            shape_type: ShapeType::PlaceholderPicture {
                placeholder: Placeholder::from_ph(ph),
                orient: ph.attr("orient").map(str::to_string),
                sz: ph.attr("sz").map(str::to_string),
                rel_id: rel_id.into(),
            },
        }
    }

    /// Create an empty slide placeholder mirroring the layout placeholder `ph`.
    pub fn new_placeholder(shape_id: u32, name: impl Into<String>, ph: &XmlElement) -> Self {
        Self {
            shape_id,
            name: name.into(),
            shape_type: ShapeType::Placeholder {
                placeholder: Placeholder::from_ph(ph),
                orient: ph.attr("orient").map(str::to_string),
                sz: ph.attr("sz").map(str::to_string),
            },
        }
    }

    /// Set the alternative text of a picture.
    pub fn with_description(mut self, text: &str) -> Self {
        if let ShapeType::Picture { description, .. } = &mut self.shape_type {
            *description = text.to_string();
        }
        self
    }

    pub fn shape_id(&self) -> u32 {
        self.shape_id
    }

    fn paragraphs(&self) -> Option<&[TextParagraph]> {
        match &self.shape_type {
            ShapeType::TextBox { paragraphs, .. } | ShapeType::AutoShape { paragraphs, .. } => Some(paragraphs),
            _ => None,
        }
    }

    /// Build the shape as an element ready to be appended to a `p:spTree`.
    pub fn to_element(&self) -> Result<XmlElement> {
        let mut xml = String::with_capacity(1024);
        self.to_xml(&mut xml)?;
        let mut element = XmlElement::parse(xml.as_bytes())?;

        if let Some(paragraphs) = self.paragraphs() {
            if let Some(tx_body) = element.child_mut("txBody") {
                textframe::set_paragraphs(tx_body, paragraphs);
            }
        }
        Ok(element)
    }

    /// Generate XML for this shape. Text bodies are written with one empty
    /// paragraph; [`MutableShape::to_element`] fills them.
    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        match &self.shape_type {
            ShapeType::TextBox { geometry, .. } => {
                xml.push_str("<p:sp>");
                xml.push_str("<p:nvSpPr>");
                self.write_c_nv_pr(xml, None)?;
                xml.push_str(r#"<p:cNvSpPr txBox="1"/>"#);
                xml.push_str("<p:nvPr/>");
                xml.push_str("</p:nvSpPr>");

                xml.push_str("<p:spPr>");
                write_xfrm(xml, geometry)?;
                xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
                xml.push_str("<a:noFill/>");
                xml.push_str("</p:spPr>");

                xml.push_str("<p:txBody>");
                xml.push_str(r#"<a:bodyPr wrap="none"><a:spAutoFit/></a:bodyPr>"#);
                xml.push_str("<a:lstStyle/>");
                xml.push_str("<a:p/>");
                xml.push_str("</p:txBody>");
                xml.push_str("</p:sp>");
            },
            ShapeType::AutoShape {
                geometry,
                preset,
                fill_color,
                ..
            } => {
                xml.push_str("<p:sp>");
                xml.push_str("<p:nvSpPr>");
                self.write_c_nv_pr(xml, None)?;
                xml.push_str("<p:cNvSpPr/>");
                xml.push_str("<p:nvPr/>");
                xml.push_str("</p:nvSpPr>");

                xml.push_str("<p:spPr>");
                write_xfrm(xml, geometry)?;
                write!(xml, r#"<a:prstGeom prst="{}"><a:avLst/></a:prstGeom>"#, escape_xml(preset))
                    .map_err(|e| OoxmlError::Xml(e.to_string()))?;

                if let Some(color) = fill_color {
                    xml.push_str("<a:solidFill>");
                    write!(xml, r#"<a:srgbClr val="{}"/>"#, escape_xml(color))
                        .map_err(|e| OoxmlError::Xml(e.to_string()))?;
                    xml.push_str("</a:solidFill>");
                }
                xml.push_str("</p:spPr>");

                // Theme-based line, fill, effect and font references
                xml.push_str("<p:style>");
                xml.push_str(r#"<a:lnRef idx="1"><a:schemeClr val="accent1"/></a:lnRef>"#);
                xml.push_str(r#"<a:fillRef idx="3"><a:schemeClr val="accent1"/></a:fillRef>"#);
                xml.push_str(r#"<a:effectRef idx="2"><a:schemeClr val="accent1"/></a:effectRef>"#);
                xml.push_str(r#"<a:fontRef idx="minor"><a:schemeClr val="lt1"/></a:fontRef>"#);
                xml.push_str("</p:style>");

                xml.push_str("<p:txBody>");
                xml.push_str(r#"<a:bodyPr rtlCol="0" anchor="ctr"/>"#);
                xml.push_str("<a:lstStyle/>");
                xml.push_str(r#"<a:p><a:pPr algn="ctr"/></a:p>"#);
                xml.push_str("</p:txBody>");
                xml.push_str("</p:sp>");
            },
            ShapeType::Picture {
                geometry,
                rel_id,
                description,
            } => {
                xml.push_str("<p:pic>");
                xml.push_str("<p:nvPicPr>");
                self.write_c_nv_pr(xml, Some(description))?;
                xml.push_str("<p:cNvPicPr/>");
                xml.push_str("<p:nvPr/>");
                xml.push_str("</p:nvPicPr>");

                write_blip_fill(xml, rel_id)?;

                xml.push_str("<p:spPr>");
                write_xfrm(xml, geometry)?;
                xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
                xml.push_str("</p:spPr>");
                xml.push_str("</p:pic>");
            },
            ShapeType::PlaceholderPicture {
                placeholder,
                orient,
                sz,
                rel_id,
            } => {
                xml.push_str("<p:pic>");
                xml.push_str("<p:nvPicPr>");
                self.write_c_nv_pr(xml, Some(""))?;
                xml.push_str(r#"<p:cNvPicPr><a:picLocks noGrp="1" noChangeAspect="1"/></p:cNvPicPr>"#);
                xml.push_str("<p:nvPr>");
                write_ph(xml, placeholder, orient.as_deref(), sz.as_deref())?;
                xml.push_str("</p:nvPr>");
                xml.push_str("</p:nvPicPr>");

                write_blip_fill(xml, rel_id)?;

                xml.push_str("<p:spPr/>");
                xml.push_str("</p:pic>");
            },
            ShapeType::Placeholder {
                placeholder,
                orient,
                sz,
            } => {
                xml.push_str("<p:sp>");
                xml.push_str("<p:nvSpPr>");
                self.write_c_nv_pr(xml, None)?;
                xml.push_str(r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>"#);
                xml.push_str("<p:nvPr>");
                write_ph(xml, placeholder, orient.as_deref(), sz.as_deref())?;
                xml.push_str("</p:nvPr>");
                xml.push_str("</p:nvSpPr>");
                xml.push_str("<p:spPr/>");

                if placeholder.is_text_bearing() {
                    xml.push_str("<p:txBody><a:bodyPr/><a:lstStyle/><a:p/></p:txBody>");
                }
                xml.push_str("</p:sp>");
            },
        }

        Ok(())
    }

    fn write_c_nv_pr(&self, xml: &mut String, description: Option<&str>) -> Result<()> {
        write!(
            xml,
            r#"<p:cNvPr id="{}" name="{}""#,
            self.shape_id,
            escape_xml(&self.name)
        )
        .map_err(|e| OoxmlError::Xml(e.to_string()))?;
        if let Some(description) = description {
            write!(xml, r#" descr="{}""#, escape_xml(description)).map_err(|e| OoxmlError::Xml(e.to_string()))?;
        }
        xml.push_str("/>");
        Ok(())
    }
}

fn write_xfrm(xml: &mut String, geometry: &Geometry) -> Result<()> {
    xml.push_str("<a:xfrm>");
    write!(xml, r#"<a:off x="{}" y="{}"/>"#, geometry.x, geometry.y).map_err(|e| OoxmlError::Xml(e.to_string()))?;
    write!(xml, r#"<a:ext cx="{}" cy="{}"/>"#, geometry.cx, geometry.cy)
        .map_err(|e| OoxmlError::Xml(e.to_string()))?;
    xml.push_str("</a:xfrm>");
    Ok(())
}

fn write_blip_fill(xml: &mut String, rel_id: &str) -> Result<()> {
    xml.push_str("<p:blipFill>");
    write!(xml, r#"<a:blip r:embed="{}"/>"#, escape_xml(rel_id)).map_err(|e| OoxmlError::Xml(e.to_string()))?;
    xml.push_str("<a:stretch><a:fillRect/></a:stretch>");
    xml.push_str("</p:blipFill>");
    Ok(())
}

/// `p:ph` with default attributes omitted (`obj` type, `horz` orient, `full`
/// size, idx 0).
fn write_ph(xml: &mut String, placeholder: &Placeholder, orient: Option<&str>, sz: Option<&str>) -> Result<()> {
    xml.push_str("<p:ph");
    if let Some(ph_type) = placeholder.ph_type.as_deref().filter(|t| *t != "obj") {
        write!(xml, r#" type="{}""#, escape_xml(ph_type)).map_err(|e| OoxmlError::Xml(e.to_string()))?;
    }
    if let Some(orient) = orient.filter(|o| *o != "horz") {
        write!(xml, r#" orient="{}""#, escape_xml(orient)).map_err(|e| OoxmlError::Xml(e.to_string()))?;
    }
    if let Some(sz) = sz.filter(|s| *s != "full") {
        write!(xml, r#" sz="{}""#, escape_xml(sz)).map_err(|e| OoxmlError::Xml(e.to_string()))?;
    }
    if placeholder.idx != 0 {
        write!(xml, r#" idx="{}""#, placeholder.idx).map_err(|e| OoxmlError::Xml(e.to_string()))?;
    }
    xml.push_str("/>");
    Ok(())
}
