/// Presentation part - the main part in a .pptx package.
///
/// Corresponds to `/ppt/presentation.xml` in the package.
use crate::common::xml::XmlElement;
use crate::ooxml::error::Result;
use crate::ooxml::opc::packuri::PackURI;
use crate::ooxml::opc::part::{Part, parse_tree};

/// The main presentation part.
///
/// This part contains the presentation-level properties and references to
/// slides and slide masters, in the order PowerPoint shows them.
pub struct PresentationPart<'a> {
    /// The underlying OPC part
    part: &'a dyn Part,
    tree: XmlElement,
}

impl<'a> PresentationPart<'a> {
    /// Create a PresentationPart from an OPC Part.
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

    pub fn tree(&self) -> &XmlElement {
        &self.tree
    }

    /// `r:id` values of `list/item` entries, in document order.
    fn list_r_ids(&self, list: &str, item: &str) -> Vec<&str> {
        self.tree
            .child(list)
            .into_iter()
            .flat_map(XmlElement::elements)
            .filter(|e| e.is(item))
            .filter_map(|e| e.attr("r:id"))
            .collect()
    }

    /// Relationship ids of the slides (`p:sldIdLst`), in presentation order.
    pub fn slide_r_ids(&self) -> Vec<&str> {
        self.list_r_ids("sldIdLst", "sldId")
    }

    /// Get the number of slides in the presentation.
    pub fn slide_count(&self) -> usize {
        self.slide_r_ids().len()
    }

    /// Slide partnames in presentation order.
    pub fn slide_partnames(&self) -> Result<Vec<PackURI>> {
        self.slide_r_ids()
            .into_iter()
            .map(|r_id| Ok(self.part.related_partname(r_id)?))
            .collect()
    }

    /// Slide master partnames in `p:sldMasterIdLst` order.
    pub fn master_partnames(&self) -> Result<Vec<PackURI>> {
        self.list_r_ids("sldMasterIdLst", "sldMasterId")
            .into_iter()
            .map(|r_id| Ok(self.part.related_partname(r_id)?))
            .collect()
    }

    /// Slide size in EMUs (`p:sldSz`), if declared.
    pub fn slide_size(&self) -> Option<(i64, i64)> {
        let sz = self.tree.child("sldSz")?;
        Some((sz.attr("cx")?.parse().ok()?, sz.attr("cy")?.parse().ok()?))
    }
}
