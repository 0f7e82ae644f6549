/// Presentation writer for PPTX.
///
/// A [`MutablePresentation`] starts from an existing package (a template),
/// drops every slide it has and lets callers append new slides built on the
/// package's layouts. Masters, layouts, themes and the rest of the package
/// are kept as they are.
use crate::common::xml::{XmlElement, XmlNode};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::OpcPackage;
use crate::ooxml::opc::constants::{content_type as ct, extension_uri, relationship_type as rt};
use crate::ooxml::opc::packuri::PackURI;
use crate::ooxml::opc::part::{BlobPart, Part, XmlPart, parse_tree};
use crate::ooxml::pptx::format::ImageFormat;
use crate::ooxml::pptx::package::{LayoutInfo, Package};
use crate::ooxml::pptx::parts::SlideLayoutPart;
use sha2::{Digest, Sha256};
use std::collections::HashMap;

use super::slide::MutableSlide;

/// Slide ids start here; lower values are reserved.
const FIRST_SLIDE_ID: u32 = 256;

/// Elements `p:sldIdLst` must follow in `p:presentation`.
const SLD_ID_LST_PREDECESSORS: [&str; 3] = ["sldMasterIdLst", "notesMasterIdLst", "handoutMasterIdLst"];

/// The output package with an image index for deduplication.
pub struct PartStore {
    package: OpcPackage,
    /// SHA-256 of image bytes -> image partname
    images: HashMap<Vec<u8>, PackURI>,
}

impl PartStore {
    fn new(package: OpcPackage) -> Self {
        let images = package
            .iter_parts()
            .filter(|part| part.content_type().starts_with("image/"))
            .map(|part| (Sha256::digest(part.blob()).to_vec(), part.partname().clone()))
            .collect();
        Self { package, images }
    }

    pub fn package(&self) -> &OpcPackage {
        &self.package
    }

    /// Add an image for the slide at `slide_partname`, returning the rId the
    /// slide uses to reference it.
    ///
    /// Identical bytes share one image part. `ext_hint` names the extension
    /// to use when the format is not recognized.
    pub fn add_image(&mut self, slide_partname: &PackURI, blob: &[u8], content_type: &str, ext_hint: &str) -> Result<String> {
        let digest = Sha256::digest(blob).to_vec();
        let image_partname = match self.images.get(&digest) {
            Some(partname) => partname.clone(),
            None => {
                let format = ImageFormat::from_content_type(content_type).or_else(|| ImageFormat::detect_from_bytes(blob));
                let (ext, content_type) = match format {
                    Some(format) => (format.extension(), format.mime_type()),
                    None if !ext_hint.is_empty() && content_type.starts_with("image/") => (ext_hint, content_type),
                    None => {
                        return Err(OoxmlError::InvalidFormat(format!(
                            "unrecognized image format ({})",
                            content_type
                        )));
                    },
                };
                let partname = self.package.next_partname(&format!("/ppt/media/image%d.{}", ext))?;
                self.package.add_part(Box::new(BlobPart::new(
                    partname.clone(),
                    content_type.to_string(),
                    blob.to_vec(),
                )));
                self.images.insert(digest, partname.clone());
                partname
            },
        };

        let slide_part = self.package.get_part_mut(slide_partname)?;
        Ok(slide_part.relate_to(&image_partname, rt::IMAGE))
    }

    /// Drop relationships of `slide` that were created for a shape which was
    /// then left out.
    ///
    /// Ids still referenced from the slide tree are kept. Media parts nothing
    /// reaches any more are removed from the package.
    pub fn release(&mut self, slide: &MutableSlide, r_ids: &[String]) -> Result<()> {
        let rels = self.package.get_part_mut(slide.partname())?.rels_mut();
        let released = r_ids
            .iter()
            .filter(|r_id| !slide.references(r_id))
            .filter(|r_id| rels.remove(r_id).is_some())
            .count();
        if released > 0 {
            let pruned = self.package.prune_unreachable();
            self.images.retain(|_, partname| !pruned.contains(partname));
            tracing::debug!(slide = %slide.partname(), released, parts = pruned.len(), "released unused relationships");
        }
        Ok(())
    }

    /// Add (or reuse) an external relationship of the slide, e.g. a hyperlink.
    pub fn relate_external(&mut self, slide_partname: &PackURI, reltype: &str, url: &str) -> Result<String> {
        let slide_part = self.package.get_part_mut(slide_partname)?;
        Ok(slide_part.relate_to_ext(url, reltype))
    }
}

/// A presentation being assembled from a template's layouts.
pub struct MutablePresentation {
    store: PartStore,
    /// Slides in the presentation, in order
    pub(crate) slides: Vec<MutableSlide>,
    pres_partname: PackURI,
    /// The `p:presentation` element, without `p:sldIdLst`
    pres_tree: XmlElement,
    layouts: Vec<LayoutInfo>,
    next_slide_id: u32,
}

impl MutablePresentation {
    /// Start from a copy of the template bytes with every slide removed.
    pub fn from_template_bytes(data: &[u8]) -> Result<Self> {
        Self::from_package(Package::from_bytes(data)?)
    }

    pub fn from_package(package: Package) -> Result<Self> {
        let layouts = package.slide_layouts()?;
        let mut opc = package.into_opc();
        let pres_partname = opc.main_document_partname()?;
        let mut pres_tree = parse_tree(opc.get_part(&pres_partname)?)?;
        clear_slides(&mut opc, &pres_partname, &mut pres_tree)?;

        Ok(Self {
            store: PartStore::new(opc),
            slides: Vec::new(),
            pres_partname,
            pres_tree,
            layouts,
            next_slide_id: FIRST_SLIDE_ID,
        })
    }

    /// Layouts available to new slides, in master order.
    pub fn layouts(&self) -> &[LayoutInfo] {
        &self.layouts
    }

    /// Add a new slide built on `layout_partname`.
    ///
    /// `namespaces` are extra namespace declarations for the slide root.
    /// Returns the index of the new slide.
    pub fn add_slide(&mut self, layout_partname: &PackURI, namespaces: &[(String, String)]) -> Result<usize> {
        let package = &mut self.store.package;
        let partname = package.next_partname("/ppt/slides/slide%d.xml")?;

        let r_id = {
            let pres_part = package.get_part_mut(&self.pres_partname)?;
            pres_part.relate_to(&partname, rt::SLIDE)
        };

        let slide = {
            let layout = SlideLayoutPart::from_part(package.get_part(layout_partname)?)?;
            MutableSlide::from_layout(self.next_slide_id, r_id, partname.clone(), &layout, namespaces)?
        };
        self.next_slide_id += 1;

        let mut part = XmlPart::new(partname, ct::PML_SLIDE.to_string(), slide.to_xml_bytes());
        part.relate_to(layout_partname, rt::SLIDE_LAYOUT);
        package.add_part(Box::new(part));

        self.slides.push(slide);
        Ok(self.slides.len() - 1)
    }

    /// Get the number of slides.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn slide(&self, index: usize) -> Option<&MutableSlide> {
        self.slides.get(index)
    }

    /// A slide together with the part store, for edits that add images or
    /// relationships while changing the slide tree.
    pub fn slide_with_store(&mut self, index: usize) -> Option<(&mut MutableSlide, &mut PartStore)> {
        let slide = self.slides.get_mut(index)?;
        Some((slide, &mut self.store))
    }

    pub fn store(&self) -> &PartStore {
        &self.store
    }

    /// Generate presentation.xml content with the current slide list.
    pub(crate) fn generate_presentation_xml(&self) -> Vec<u8> {
        let mut tree = self.pres_tree.clone();
        if !self.slides.is_empty() {
            let mut list = XmlElement::new("p:sldIdLst");
            let mut buf = itoa::Buffer::new();
            for slide in &self.slides {
                list.push_child(
                    XmlElement::new("p:sldId")
                        .with_attr("id", buf.format(slide.slide_id))
                        .with_attr("r:id", slide.r_id.as_str()),
                );
            }
            let at = SLD_ID_LST_PREDECESSORS
                .iter()
                .filter_map(|name| tree.position_of(name))
                .max()
                .map(|pos| pos + 1)
                .unwrap_or(0);
            tree.insert_child(at, list);
        }
        tree.to_document_bytes()
    }

    /// Write every slide and the presentation part back to the package and
    /// serialize it.
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        for slide in &self.slides {
            self.store
                .package
                .get_part_mut(&slide.partname)?
                .set_blob(slide.to_xml_bytes());
        }
        let pres_xml = self.generate_presentation_xml();
        self.store.package.get_part_mut(&self.pres_partname)?.set_blob(pres_xml);

        Ok(self.store.package.to_bytes()?)
    }
}

/// Drop every slide of the package.
///
/// Slide relationships of the presentation part go away, along with the
/// slide id list, custom shows and section lists that refer to them. Parts
/// only reachable through removed slides (notes slides, media) are pruned.
fn clear_slides(opc: &mut OpcPackage, pres_partname: &PackURI, pres_tree: &mut XmlElement) -> Result<()> {
    let removed = opc.get_part_mut(pres_partname)?.rels_mut().remove_of_type(rt::SLIDE);

    pres_tree.remove_children(&["sldIdLst", "custShowLst"]);
    if let Some(ext_lst) = pres_tree.child_mut("extLst") {
        ext_lst.children_mut().retain(|node| {
            !matches!(node, XmlNode::Element(e) if e.is("ext") && e.attr("uri") == Some(extension_uri::SECTION_LIST))
        });
        if ext_lst.elements().next().is_none() {
            pres_tree.remove_children(&["extLst"]);
        }
    }

    let pruned = opc.prune_unreachable();
    tracing::debug!(slides = removed.len(), parts = pruned.len(), "cleared template slides");
    Ok(())
}
