/// Slide parts and related types.
///
/// This module contains read-only views of slides, slide layouts, slide
/// masters and notes slides. Each view borrows its OPC part and holds the
/// part's parsed XML tree.
use crate::common::xml::XmlElement;
use crate::ooxml::error::Result;
use crate::ooxml::opc::constants::relationship_type as rt;
use crate::ooxml::opc::packuri::PackURI;
use crate::ooxml::opc::part::{Part, parse_tree};
use crate::ooxml::pptx::shapes::base::{self, Placeholder, ShapeKind};
use crate::ooxml::pptx::shapes::{table, textframe};

/// `p:cSld/p:spTree` of a slide-like part.
fn sp_tree_of(tree: &XmlElement) -> Option<&XmlElement> {
    tree.child_path(&["cSld", "spTree"])
}

/// `p:cSld@name`, empty when unnamed.
fn c_sld_name(tree: &XmlElement) -> &str {
    tree.child("cSld").and_then(|c| c.attr("name")).unwrap_or("")
}

/// Text of every text-bearing shape below `container`, tables and groups
/// included, in document order.
pub fn collect_text(container: &XmlElement, out: &mut Vec<String>) {
    for (kind, shape) in base::shapes(container) {
        match kind {
            ShapeKind::Group => collect_text(shape, out),
            ShapeKind::Table => {
                if let Some(tbl) = table::table(shape) {
                    out.extend(table::rows(tbl).flat_map(table::cells).map(table::cell_text));
                }
            },
            _ => {
                if let Some(tx_body) = base::text_body(shape) {
                    out.push(textframe::frame_text(tx_body));
                }
            },
        }
    }
}

/// A slide part.
///
/// Corresponds to `/ppt/slides/slideN.xml` in the package.
pub struct SlidePart<'a> {
    /// The underlying OPC part
    part: &'a dyn Part,
    tree: XmlElement,
}

impl<'a> SlidePart<'a> {
    /// Create a SlidePart from an OPC Part.
    pub fn from_part(part: &'a dyn Part) -> Result<Self> {
        Ok(Self {
            part,
            tree: parse_tree(part)?,
        })
    }

    #[inline]
    pub fn partname(&self) -> &'a PackURI {
        self.part.partname()
    }

    #[inline]
    pub fn part(&self) -> &'a dyn Part {
        self.part
    }

    /// The parsed `p:sld` element.
    #[inline]
    pub fn tree(&self) -> &XmlElement {
        &self.tree
    }

    /// The slide name (`p:cSld@name`).
    pub fn name(&self) -> &str {
        c_sld_name(&self.tree)
    }

    pub fn sp_tree(&self) -> Option<&XmlElement> {
        sp_tree_of(&self.tree)
    }

    /// Top-level shapes of the slide, classified.
    pub fn shapes(&self) -> impl Iterator<Item = (ShapeKind, &XmlElement)> {
        self.sp_tree().into_iter().flat_map(base::shapes)
    }

    /// Namespace declarations on the slide root, in document order.
    pub fn namespace_declarations(&self) -> Vec<(String, String)> {
        self.tree
            .namespace_declarations()
            .map(|(prefix, uri)| (prefix.to_string(), uri.to_string()))
            .collect()
    }

    /// Resolve a relationship id of this slide to a partname.
    pub fn related_partname(&self, r_id: &str) -> Result<PackURI> {
        Ok(self.part.related_partname(r_id)?)
    }

    /// Partname of the slide layout this slide is built on.
    pub fn layout_partname(&self) -> Result<PackURI> {
        Ok(self.part.rels().part_with_reltype(rt::SLIDE_LAYOUT)?.target_partname()?)
    }

    /// Partname of the notes slide, if the slide has one.
    pub fn notes_partname(&self) -> Option<PackURI> {
        self.part
            .rels()
            .part_with_reltype(rt::NOTES_SLIDE)
            .ok()
            .and_then(|rel| rel.target_partname().ok())
    }

    /// All text on the slide, one entry per text frame or table cell.
    pub fn texts(&self) -> Vec<String> {
        let mut out = Vec::new();
        if let Some(sp_tree) = self.sp_tree() {
            collect_text(sp_tree, &mut out);
        }
        out
    }
}

/// A slide layout part.
///
/// Corresponds to `/ppt/slideLayouts/slideLayoutN.xml` in the package.
pub struct SlideLayoutPart<'a> {
    part: &'a dyn Part,
    tree: XmlElement,
}

impl<'a> SlideLayoutPart<'a> {
    pub fn from_part(part: &'a dyn Part) -> Result<Self> {
        Ok(Self {
            part,
            tree: parse_tree(part)?,
        })
    }

    #[inline]
    pub fn partname(&self) -> &'a PackURI {
        self.part.partname()
    }

    /// The layout name (`p:cSld@name`), e.g. "Title and Content".
    pub fn name(&self) -> &str {
        c_sld_name(&self.tree)
    }

    pub fn sp_tree(&self) -> Option<&XmlElement> {
        sp_tree_of(&self.tree)
    }

    /// Placeholder shapes of the layout, in document order.
    pub fn placeholders(&self) -> impl Iterator<Item = (Placeholder, &XmlElement)> {
        self.sp_tree()
            .into_iter()
            .flat_map(XmlElement::elements)
            .filter_map(|shape| base::placeholder(shape).map(|ph| (ph, shape)))
    }

    /// The placeholder shape with the given `idx`.
    pub fn placeholder_by_idx(&self, idx: u32) -> Option<&XmlElement> {
        self.placeholders()
            .find(|(ph, _)| ph.idx == idx)
            .map(|(_, shape)| shape)
    }

    pub fn master_partname(&self) -> Result<PackURI> {
        Ok(self.part.rels().part_with_reltype(rt::SLIDE_MASTER)?.target_partname()?)
    }
}

/// A slide master part.
///
/// Corresponds to `/ppt/slideMasters/slideMasterN.xml` in the package.
pub struct SlideMasterPart<'a> {
    part: &'a dyn Part,
    tree: XmlElement,
}

impl<'a> SlideMasterPart<'a> {
    pub fn from_part(part: &'a dyn Part) -> Result<Self> {
        Ok(Self {
            part,
            tree: parse_tree(part)?,
        })
    }

    #[inline]
    pub fn partname(&self) -> &'a PackURI {
        self.part.partname()
    }

    /// Layouts of this master in `p:sldLayoutIdLst` order.
    ///
    /// Entries whose relationship cannot be resolved are skipped.
    pub fn layout_partnames(&self) -> Vec<PackURI> {
        let Some(list) = self.tree.child("sldLayoutIdLst") else {
            return Vec::new();
        };
        list.elements()
            .filter(|e| e.is("sldLayoutId"))
            .filter_map(|e| e.attr("r:id"))
            .filter_map(|r_id| self.part.related_partname(r_id).ok())
            .collect()
    }
}

/// A notes slide part.
///
/// Corresponds to `/ppt/notesSlides/notesSlideN.xml` in the package.
pub struct NotesSlidePart<'a> {
    part: &'a dyn Part,
    tree: XmlElement,
}

impl<'a> NotesSlidePart<'a> {
    pub fn from_part(part: &'a dyn Part) -> Result<Self> {
        Ok(Self {
            part,
            tree: parse_tree(part)?,
        })
    }

    #[inline]
    pub fn partname(&self) -> &'a PackURI {
        self.part.partname()
    }

    /// The notes body placeholder (`p:ph type="body"`).
    pub fn notes_placeholder(&self) -> Option<&XmlElement> {
        sp_tree_of(&self.tree)?.elements().find(|shape| {
            base::placeholder(shape).is_some_and(|ph| ph.ph_type.as_deref() == Some("body"))
        })
    }

    /// Text of the notes body placeholder, paragraphs joined with `\n`.
    pub fn notes_text(&self) -> Option<String> {
        let tx_body = base::text_body(self.notes_placeholder()?)?;
        Some(textframe::frame_text(tx_body))
    }
}
