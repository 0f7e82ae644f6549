/// Base shape types for PowerPoint presentations.
use crate::common::xml::XmlElement;
use phf::phf_set;
use serde::Serialize;

/// Preset geometries that draw lines rather than filled shapes.
static LINE_PRESETS: phf::Set<&'static str> = phf_set! {
    "line",
    "lineInv",
    "straightConnector1",
    "bentConnector2",
    "bentConnector3",
    "bentConnector4",
    "bentConnector5",
    "curvedConnector2",
    "curvedConnector3",
    "curvedConnector4",
    "curvedConnector5",
};

/// Placeholder types that hold text and receive an empty text body when a
/// slide is created from a layout.
static TEXT_PLACEHOLDER_TYPES: phf::Set<&'static str> = phf_set! {
    "title",
    "ctrTitle",
    "subTitle",
    "body",
    "obj",
};

/// Placeholder types a new slide does not inherit from its layout.
static LATENT_PLACEHOLDER_TYPES: phf::Set<&'static str> = phf_set! {
    "dt",
    "ftr",
    "sldNum",
};

/// Shape kind enumeration.
///
/// Indicates what kind of shape a `p:spTree` child is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    /// A placeholder `p:sp` inheriting from the layout
    TextPlaceholder,
    /// A `p:pic` bound to a placeholder, or an empty picture placeholder
    PicturePlaceholder,
    /// A free-standing picture (`p:pic`)
    Picture,
    /// A text box (`p:sp` with `txBox="1"`)
    TextBox,
    /// A preset or custom geometry shape (`p:sp`)
    AutoShape,
    /// A group shape (`p:grpSp`)
    Group,
    /// A graphic frame holding a table
    Table,
    /// A connector (`p:cxnSp`) or a line preset
    Connector,
    /// Charts, diagrams, OLE objects and anything unrecognized
    Other,
}

impl ShapeKind {
    /// Classify a `p:spTree` (or `p:grpSp`) child.
    ///
    /// Returns `None` for children that are not shapes (`nvGrpSpPr`,
    /// `grpSpPr`, `extLst`).
    pub fn of(element: &XmlElement) -> Option<ShapeKind> {
        let kind = match element.local_name() {
            "sp" => {
                if let Some(ph) = placeholder_element(element) {
                    if ph.attr("type") == Some("pic") {
                        ShapeKind::PicturePlaceholder
                    } else {
                        ShapeKind::TextPlaceholder
                    }
                } else if element
                    .child_path(&["nvSpPr", "cNvSpPr"])
                    .and_then(|e| e.attr("txBox"))
                    .is_some_and(|v| v == "1" || v == "true")
                {
                    ShapeKind::TextBox
                } else if preset_geometry(element).is_some_and(|prst| LINE_PRESETS.contains(prst)) {
                    ShapeKind::Connector
                } else {
                    ShapeKind::AutoShape
                }
            },
            "pic" => {
                if placeholder_element(element).is_some() {
                    ShapeKind::PicturePlaceholder
                } else {
                    ShapeKind::Picture
                }
            },
            "graphicFrame" => {
                if element.find("tbl").is_some() {
                    ShapeKind::Table
                } else {
                    ShapeKind::Other
                }
            },
            "grpSp" => ShapeKind::Group,
            "cxnSp" => ShapeKind::Connector,
            "AlternateContent" | "contentPart" => ShapeKind::Other,
            _ => return None,
        };
        Some(kind)
    }
}

/// Position and size of a shape, in EMUs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Geometry {
    pub x: i64,
    pub y: i64,
    pub cx: i64,
    pub cy: i64,
}

impl Geometry {
    /// Read an `a:xfrm`/`p:xfrm` element. Both `a:off` and `a:ext` must be present.
    pub fn from_xfrm(xfrm: &XmlElement) -> Option<Self> {
        let off = xfrm.child("off")?;
        let ext = xfrm.child("ext")?;
        Some(Self {
            x: parse_emu(off.attr("x")?)?,
            y: parse_emu(off.attr("y")?)?,
            cx: parse_emu(ext.attr("cx")?)?,
            cy: parse_emu(ext.attr("cy")?)?,
        })
    }

    /// Build an `xfrm` element with the given qualified name (`a:xfrm` or `p:xfrm`).
    pub fn to_xfrm(self, name: &str) -> XmlElement {
        let mut buf = itoa::Buffer::new();
        let off = XmlElement::new("a:off")
            .with_attr("x", buf.format(self.x))
            .with_attr("y", buf.format(self.y));
        let ext = XmlElement::new("a:ext")
            .with_attr("cx", buf.format(self.cx))
            .with_attr("cy", buf.format(self.cy));
        XmlElement::new(name).with_child(off).with_child(ext)
    }
}

fn parse_emu(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok()
}

/// Placeholder identity of a shape (`p:nvPr/p:ph`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// `type` attribute; `None` means `obj`
    pub ph_type: Option<String>,
    /// `idx` attribute; defaults to 0
    pub idx: u32,
}

impl Placeholder {
    pub fn from_ph(ph: &XmlElement) -> Self {
        Self {
            ph_type: ph.attr("type").map(str::to_string),
            idx: ph
                .attr("idx")
                .and_then(|v| atoi_simd::parse::<u32, false, false>(v.as_bytes()).ok())
                .unwrap_or(0),
        }
    }

    /// Effective type name, `obj` when unspecified.
    pub fn type_name(&self) -> &str {
        self.ph_type.as_deref().unwrap_or("obj")
    }

    pub fn is_text_bearing(&self) -> bool {
        TEXT_PLACEHOLDER_TYPES.contains(self.type_name())
    }

    /// Date, footer and slide number placeholders stay on the layout.
    pub fn is_latent(&self) -> bool {
        LATENT_PLACEHOLDER_TYPES.contains(self.type_name())
    }
}

/// The non-visual properties container of a shape (`nvSpPr`, `nvPicPr`, ...).
fn non_visual_props(shape: &XmlElement) -> Option<&XmlElement> {
    shape.elements().find(|e| e.local_name().starts_with("nv"))
}

/// The `p:ph` element of a placeholder shape.
pub fn placeholder_element(shape: &XmlElement) -> Option<&XmlElement> {
    non_visual_props(shape)?.child("nvPr")?.child("ph")
}

pub fn placeholder(shape: &XmlElement) -> Option<Placeholder> {
    placeholder_element(shape).map(Placeholder::from_ph)
}

/// The `cNvPr` element carrying the shape id and name.
pub fn c_nv_pr(shape: &XmlElement) -> Option<&XmlElement> {
    non_visual_props(shape)?.child("cNvPr")
}

pub fn shape_id(shape: &XmlElement) -> Option<u32> {
    c_nv_pr(shape)?
        .attr("id")
        .and_then(|v| atoi_simd::parse::<u32, false, false>(v.as_bytes()).ok())
}

pub fn shape_name(shape: &XmlElement) -> &str {
    c_nv_pr(shape).and_then(|e| e.attr("name")).unwrap_or("")
}

/// Shape properties (`spPr`, or `grpSpPr` for groups).
pub fn shape_properties(shape: &XmlElement) -> Option<&XmlElement> {
    shape.child("spPr").or_else(|| shape.child("grpSpPr"))
}

/// Own geometry of a shape, without inheritance.
pub fn geometry(shape: &XmlElement) -> Option<Geometry> {
    let xfrm = match shape.local_name() {
        "graphicFrame" => shape.child("xfrm"),
        _ => shape_properties(shape)?.child("xfrm"),
    }?;
    Geometry::from_xfrm(xfrm)
}

/// `prst` of the shape's `a:prstGeom`, if it has one.
pub fn preset_geometry(shape: &XmlElement) -> Option<&str> {
    shape_properties(shape)?.child("prstGeom")?.attr("prst")
}

/// sRGB value of a direct solid fill (`spPr/a:solidFill/a:srgbClr@val`).
pub fn solid_fill_rgb(shape: &XmlElement) -> Option<&str> {
    shape_properties(shape)?
        .child("solidFill")?
        .child("srgbClr")?
        .attr("val")
}

/// The text body of a shape (`p:txBody`), if any.
pub fn text_body(shape: &XmlElement) -> Option<&XmlElement> {
    shape.child("txBody")
}

pub fn text_body_mut(shape: &mut XmlElement) -> Option<&mut XmlElement> {
    shape.child_mut("txBody")
}

/// Shape children of a shape tree or group, classified.
pub fn shapes(tree: &XmlElement) -> impl Iterator<Item = (ShapeKind, &XmlElement)> {
    tree.elements()
        .filter_map(|e| ShapeKind::of(e).map(|kind| (kind, e)))
}

/// Largest `cNvPr` id anywhere below `tree`.
pub fn max_shape_id(tree: &XmlElement) -> u32 {
    tree.find_all("cNvPr")
        .into_iter()
        .filter_map(|e| e.attr("id"))
        .filter_map(|v| atoi_simd::parse::<u32, false, false>(v.as_bytes()).ok())
        .max()
        .unwrap_or(0)
}
