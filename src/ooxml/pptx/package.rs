/// Package implementation for PowerPoint presentations.
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::OpcPackage;
use crate::ooxml::opc::constants::content_type as ct;
use crate::ooxml::opc::packuri::PackURI;
use crate::ooxml::pptx::parts::{
    NotesSlidePart, PresentationPart, SlideLayoutPart, SlideMasterPart, SlidePart,
};
use std::path::Path;

/// Content types accepted for the main presentation part.
const PRESENTATION_CONTENT_TYPES: [&str; 4] = [
    ct::PML_PRESENTATION_MAIN,
    ct::PML_PRES_MACRO_MAIN,
    ct::PML_TEMPLATE_MAIN,
    ct::PML_SLIDESHOW_MAIN,
];

/// A slide layout as seen from the presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutInfo {
    pub partname: PackURI,
    /// `p:cSld@name` of the layout
    pub name: String,
    /// Position of the layout inside its slide master's layout list
    pub index: usize,
}

/// A PowerPoint (.pptx) package.
///
/// This is the main entry point for reading presentations. It wraps an OPC
/// package whose main part has been checked to be a presentation.
///
/// # Examples
///
/// ```rust,no_run
/// use longan::ooxml::pptx::Package;
///
/// let pkg = Package::open("presentation.pptx")?;
/// println!("Presentation has {} slides", pkg.slide_partnames()?.len());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Package {
    /// The underlying OPC package
    opc: OpcPackage,
}

impl Package {
    /// Open a .pptx package from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_opc(OpcPackage::open(path)?)
    }

    /// Create a .pptx package from bytes held in memory.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_opc(OpcPackage::from_bytes(data)?)
    }

    /// Wrap an OPC package after verifying its main part is a presentation.
    pub fn from_opc(opc: OpcPackage) -> Result<Self> {
        let main_part = opc
            .main_document_part()
            .map_err(|e| OoxmlError::PartNotFound(format!("main presentation part: {}", e)))?;

        let content_type = main_part.content_type();
        if !PRESENTATION_CONTENT_TYPES.iter().any(|expected| *expected == content_type) {
            return Err(OoxmlError::InvalidContentType {
                expected: PRESENTATION_CONTENT_TYPES.join(" or "),
                got: content_type.to_string(),
            });
        }

        Ok(Self { opc })
    }

    /// The main presentation part (`/ppt/presentation.xml`).
    pub fn presentation_part(&self) -> Result<PresentationPart<'_>> {
        PresentationPart::from_part(self.opc.main_document_part()?)
    }

    /// Slide partnames in presentation order.
    pub fn slide_partnames(&self) -> Result<Vec<PackURI>> {
        self.presentation_part()?.slide_partnames()
    }

    pub fn slide(&self, partname: &PackURI) -> Result<SlidePart<'_>> {
        SlidePart::from_part(self.opc.get_part(partname)?)
    }

    pub fn layout(&self, partname: &PackURI) -> Result<SlideLayoutPart<'_>> {
        SlideLayoutPart::from_part(self.opc.get_part(partname)?)
    }

    /// Every slide layout, grouped by slide master in master order, each
    /// master's layouts in `p:sldLayoutIdLst` order.
    pub fn slide_layouts(&self) -> Result<Vec<LayoutInfo>> {
        let mut layouts = Vec::new();
        for master_partname in self.presentation_part()?.master_partnames()? {
            let master = SlideMasterPart::from_part(self.opc.get_part(&master_partname)?)?;
            for (index, partname) in master.layout_partnames().into_iter().enumerate() {
                let Ok(part) = self.opc.get_part(&partname) else {
                    continue;
                };
                let name = SlideLayoutPart::from_part(part)?.name().to_string();
                layouts.push(LayoutInfo {
                    partname,
                    name,
                    index,
                });
            }
        }
        Ok(layouts)
    }

    /// Text of the slide's notes body, `None` when the slide has no notes
    /// slide or the notes slide has no body placeholder.
    pub fn notes_text(&self, slide: &PackURI) -> Result<Option<String>> {
        let slide = self.slide(slide)?;
        let Some(notes_partname) = slide.notes_partname() else {
            return Ok(None);
        };
        let Ok(part) = self.opc.get_part(&notes_partname) else {
            return Ok(None);
        };
        Ok(NotesSlidePart::from_part(part)?.notes_text())
    }

    /// Bytes and content type of the part a slide relationship points to.
    pub fn related_blob(&self, slide: &SlidePart<'_>, r_id: &str) -> Result<(&[u8], &str)> {
        let partname = slide.related_partname(r_id)?;
        let part = self.opc.get_part(&partname)?;
        Ok((part.blob(), part.content_type()))
    }

    #[inline]
    pub fn opc(&self) -> &OpcPackage {
        &self.opc
    }

    #[inline]
    pub fn opc_mut(&mut self) -> &mut OpcPackage {
        &mut self.opc
    }

    pub fn into_opc(self) -> OpcPackage {
        self.opc
    }

    /// Serialize the package.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.opc.to_bytes()?)
    }
}
