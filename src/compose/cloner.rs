//! Copying the visual content of a template slide onto a new slide.
//!
//! The new slide already carries empty placeholders cloned from its layout.
//! Content arrives in three passes:
//!
//! 1. text of the template slide's placeholders, matched by `idx`
//! 2. images of filled picture placeholders
//! 3. free-standing shapes: pictures, text boxes, auto shapes with text,
//!    tables and groups
//!
//! Each shape is copied on its own. A shape that cannot be copied is
//! reported as a [`SkippedShape`] and the slide carries on without it.
use crate::common::xml::XmlElement;
use crate::ooxml::error::Result;
use crate::ooxml::opc::constants::relationship_type as rt;
use crate::ooxml::opc::packuri::PackURI;
use crate::ooxml::pptx::shapes::base::{self, Geometry, ShapeKind};
use crate::ooxml::pptx::shapes::{picture, textframe};
use crate::ooxml::pptx::writer::{MutableShape, MutableSlide, PartStore};
use crate::ooxml::pptx::{Package, SlideLayoutPart, SlidePart};
use std::collections::HashMap;

use super::report::{SkipReason, SkippedShape};

type CopyResult<T> = std::result::Result<T, SkipReason>;

/// Copy the content of the template slide `source` onto `target`.
///
/// Returns the shapes that were left out. Only a source slide that cannot be
/// read at all is an error.
pub fn clone_content(template: &Package, source: &PackURI, target: &mut MutableSlide, store: &mut PartStore) -> Result<Vec<SkippedShape>> {
    let source = template.slide(source)?;
    let source_layout = match source.layout_partname() {
        Ok(partname) => template.layout(&partname).ok(),
        Err(_) => None,
    };

    let cloner = Cloner {
        template,
        source,
        source_layout,
    };
    let mut skipped = Vec::new();
    cloner.copy_placeholder_text(target);
    cloner.fill_picture_placeholders(target, store, &mut skipped)?;
    cloner.copy_free_shapes(target, store, &mut skipped)?;
    Ok(skipped)
}

fn skip(skipped: &mut Vec<SkippedShape>, shape: &XmlElement, kind: ShapeKind, reason: SkipReason) {
    let shape_name = base::shape_name(shape).to_string();
    if reason.is_intentional() {
        tracing::debug!(shape = %shape_name, ?kind, %reason, "shape not copied");
    } else {
        tracing::warn!(shape = %shape_name, ?kind, %reason, "shape copy failed");
    }
    skipped.push(SkippedShape {
        shape_name,
        kind,
        reason,
    });
}

struct Cloner<'t> {
    template: &'t Package,
    source: SlidePart<'t>,
    source_layout: Option<SlideLayoutPart<'t>>,
}

impl<'t> Cloner<'t> {
    /// Pass 1: placeholder paragraphs onto the same-`idx` placeholders.
    fn copy_placeholder_text(&self, target: &mut MutableSlide) {
        for (kind, shape) in self.source.shapes() {
            if kind != ShapeKind::TextPlaceholder {
                continue;
            }
            let (Some(placeholder), Some(tx_body)) = (base::placeholder(shape), base::text_body(shape)) else {
                continue;
            };
            let Some(target_shape) = target.placeholder_mut(placeholder.idx).filter(|e| e.is("sp")) else {
                tracing::debug!(idx = placeholder.idx, ph_type = placeholder.type_name(), "no matching placeholder on the new slide");
                continue;
            };

            if base::text_body(target_shape).is_none() {
                target_shape.push_child(textframe::empty_text_body("p:txBody"));
            }
            if let Some(target_body) = base::text_body_mut(target_shape) {
                textframe::set_paragraphs(target_body, &textframe::paragraphs(tx_body));
            }
        }
    }

    /// Pass 2: images of filled picture placeholders.
    fn fill_picture_placeholders(&self, target: &mut MutableSlide, store: &mut PartStore, skipped: &mut Vec<SkippedShape>) -> Result<()> {
        for (kind, shape) in self.source.shapes() {
            if kind != ShapeKind::PicturePlaceholder || !shape.is("pic") {
                continue;
            }
            if let Err(reason) = self.fill_picture_placeholder(shape, target, store)? {
                skip(skipped, shape, kind, reason);
            }
        }
        Ok(())
    }

    fn fill_picture_placeholder(&self, shape: &XmlElement, target: &mut MutableSlide, store: &mut PartStore) -> Result<CopyResult<()>> {
        let Some(r_id) = picture::blip_rel_id(shape) else {
            return Ok(Err(SkipReason::Image("picture has no embedded image".to_string())));
        };
        let Some(placeholder) = base::placeholder(shape) else {
            return Ok(Err(SkipReason::Failed("placeholder identity lost".to_string())));
        };

        let slot = target.placeholder(placeholder.idx).and_then(|slot| {
            let accepts_picture = slot.is("sp") && base::placeholder(slot).is_some_and(|ph| ph.type_name() == "pic");
            if !accepts_picture {
                return None;
            }
            Some((
                base::shape_id(slot),
                base::shape_name(slot).to_string(),
                base::placeholder_element(slot)?.clone(),
            ))
        });
        let geometry = self.inherited_geometry(shape);
        if slot.is_none() && geometry.is_none() {
            return Ok(Err(SkipReason::MissingGeometry));
        }

        let rel_id = match self.copy_image(r_id, target.partname(), store) {
            Ok(rel_id) => rel_id,
            Err(reason) => return Ok(Err(reason)),
        };

        if let Some((slot_id, slot_name, ph)) = slot {
            let shape_id = match slot_id {
                Some(id) => id,
                None => target.next_shape_id(),
            };
            let pic = MutableShape::new_placeholder_picture(shape_id, slot_name, &ph, rel_id.clone()).to_element()?;
            if target.replace_placeholder(placeholder.idx, pic)? {
                return Ok(Ok(()));
            }
        }

        // No placeholder able to take the picture: place it on its own.
        let Some(geometry) = geometry else {
            store.release(target, &[rel_id])?;
            return Ok(Err(SkipReason::MissingGeometry));
        };
        tracing::debug!(idx = placeholder.idx, "picture placeholder filled as a free picture");
        let shape_id = target.next_shape_id();
        let mut pic = MutableShape::new_picture(shape_id, base::shape_name(shape), rel_id, geometry);
        if let Some(descr) = picture::description(shape) {
            pic = pic.with_description(descr);
        }
        target.add_shape(&pic)?;
        Ok(Ok(()))
    }

    /// Own geometry of a placeholder, else that of the matching placeholder
    /// on the source slide's layout.
    fn inherited_geometry(&self, shape: &XmlElement) -> Option<Geometry> {
        base::geometry(shape).or_else(|| {
            let idx = base::placeholder(shape)?.idx;
            let layout_shape = self.source_layout.as_ref()?.placeholder_by_idx(idx)?;
            base::geometry(layout_shape)
        })
    }

    /// Pass 3: everything that is not a placeholder.
    fn copy_free_shapes(&self, target: &mut MutableSlide, store: &mut PartStore, skipped: &mut Vec<SkippedShape>) -> Result<()> {
        for (kind, shape) in self.source.shapes() {
            let copied = match kind {
                ShapeKind::TextPlaceholder | ShapeKind::PicturePlaceholder => continue,
                ShapeKind::Picture => self.copy_picture(shape, target, store)?,
                ShapeKind::TextBox => copy_text_box(shape, target)?,
                ShapeKind::AutoShape => copy_auto_shape(shape, target)?,
                ShapeKind::Table | ShapeKind::Group => self.copy_deep(shape, target, store)?,
                ShapeKind::Connector => Err(SkipReason::Connector),
                ShapeKind::Other => Err(SkipReason::Unsupported),
            };
            if let Err(reason) = copied {
                skip(skipped, shape, kind, reason);
            }
        }
        Ok(())
    }

    fn copy_picture(&self, shape: &XmlElement, target: &mut MutableSlide, store: &mut PartStore) -> Result<CopyResult<()>> {
        let Some(geometry) = base::geometry(shape) else {
            return Ok(Err(SkipReason::MissingGeometry));
        };
        let Some(r_id) = picture::blip_rel_id(shape) else {
            return Ok(Err(SkipReason::Image("picture has no embedded image".to_string())));
        };
        let rel_id = match self.copy_image(r_id, target.partname(), store) {
            Ok(rel_id) => rel_id,
            Err(reason) => return Ok(Err(reason)),
        };

        let shape_id = target.next_shape_id();
        let mut pic = MutableShape::new_picture(shape_id, base::shape_name(shape), rel_id, geometry);
        if let Some(descr) = picture::description(shape) {
            pic = pic.with_description(descr);
        }
        target.add_shape(&pic)?;
        Ok(Ok(()))
    }

    /// Copy the image a slide relationship points to, returning the new
    /// slide's relationship id for it.
    fn copy_image(&self, r_id: &str, target: &PackURI, store: &mut PartStore) -> CopyResult<String> {
        let (blob, content_type) = self
            .template
            .related_blob(&self.source, r_id)
            .map_err(|e| SkipReason::Image(e.to_string()))?;
        let ext_hint = self
            .source
            .related_partname(r_id)
            .map(|p| p.ext().to_string())
            .unwrap_or_default();
        store
            .add_image(target, blob, content_type, &ext_hint)
            .map_err(|e| SkipReason::Image(e.to_string()))
    }

    /// Copy a table frame or a group as is, with fresh shape ids and
    /// relationships re-created on the new slide.
    ///
    /// A frame sitting in a placeholder (a table inserted into a content
    /// placeholder) takes the place of the same-`idx` placeholder.
    fn copy_deep(&self, shape: &XmlElement, target: &mut MutableSlide, store: &mut PartStore) -> Result<CopyResult<()>> {
        let mut copy = shape.clone();
        if let Err(reason) = self.retarget_relationships(&mut copy, target, store)? {
            return Ok(Err(reason));
        }

        copy.for_each_descendant_mut(&mut |e| {
            if e.is("cNvPr") {
                e.set_attr("id", itoa::Buffer::new().format(target.next_shape_id()));
            }
        });

        let slot = base::placeholder(&copy)
            .map(|ph| ph.idx)
            .filter(|idx| target.placeholder(*idx).is_some());
        match slot {
            Some(idx) => {
                target.replace_placeholder(idx, copy)?;
            },
            None => target.append_shape(copy)?,
        }
        Ok(Ok(()))
    }

    /// Point every `r:*` attribute below `element` at a relationship of the
    /// target slide.
    ///
    /// Images are copied, external targets (hyperlinks, linked media) are
    /// re-related. Any other internal part cannot follow the shape. Every
    /// reference is checked before anything is added to the target, and
    /// relationships already added are released when a later one fails.
    fn retarget_relationships(&self, element: &mut XmlElement, target: &MutableSlide, store: &mut PartStore) -> Result<CopyResult<()>> {
        let mut refs = Vec::new();
        collect_rel_refs(element, &mut refs);
        refs.sort();
        refs.dedup();
        if refs.is_empty() {
            return Ok(Ok(()));
        }

        let source_rels = self.source.part().rels();
        for r_id in &refs {
            let Some(rel) = source_rels.get(r_id) else {
                return Ok(Err(SkipReason::Relationship(format!("{} not found", r_id))));
            };
            if !rel.is_external() && rel.reltype() != rt::IMAGE {
                return Ok(Err(SkipReason::Relationship(format!("{} targets {}", r_id, rel.target_ref()))));
            }
        }

        let mut mapping: HashMap<String, String> = HashMap::with_capacity(refs.len());
        for r_id in refs {
            let Some(rel) = source_rels.get(&r_id) else {
                continue;
            };
            let created = if rel.is_external() {
                store
                    .relate_external(target.partname(), rel.reltype(), rel.target_ref())
                    .map_err(|e| SkipReason::Relationship(e.to_string()))
            } else {
                self.copy_image(&r_id, target.partname(), store)
            };
            match created {
                Ok(new_id) => {
                    mapping.insert(r_id, new_id);
                },
                Err(reason) => {
                    let added: Vec<String> = mapping.into_values().collect();
                    store.release(target, &added)?;
                    return Ok(Err(reason));
                },
            }
        }

        let mut remap = |e: &mut XmlElement| {
            let updates: Vec<(String, String)> = e
                .attributes()
                .iter()
                .filter(|(name, _)| name.starts_with("r:"))
                .filter_map(|(name, value)| mapping.get(value).map(|new| (name.clone(), new.clone())))
                .collect();
            for (name, value) in updates {
                e.set_attr(name, value);
            }
        };
        remap(element);
        element.for_each_descendant_mut(&mut remap);
        Ok(Ok(()))
    }
}

fn collect_rel_refs(element: &XmlElement, out: &mut Vec<String>) {
    out.extend(
        element
            .attributes()
            .iter()
            .filter(|(name, _)| name.starts_with("r:"))
            .map(|(_, value)| value.clone()),
    );
    for child in element.elements() {
        collect_rel_refs(child, out);
    }
}

fn copy_text_box(shape: &XmlElement, target: &mut MutableSlide) -> Result<CopyResult<()>> {
    let Some(geometry) = base::geometry(shape) else {
        return Ok(Err(SkipReason::MissingGeometry));
    };
    let paragraphs = base::text_body(shape).map(textframe::paragraphs).unwrap_or_default();

    let shape_id = target.next_shape_id();
    target.add_shape(&MutableShape::new_text_box(shape_id, base::shape_name(shape), geometry, paragraphs))?;
    Ok(Ok(()))
}

/// Auto shapes come across only when they carry text; bare rectangles and
/// ellipses are decoration whose theme colors rarely survive the move.
fn copy_auto_shape(shape: &XmlElement, target: &mut MutableSlide) -> Result<CopyResult<()>> {
    let Some(tx_body) = base::text_body(shape).filter(|body| textframe::has_text(body)) else {
        return Ok(Err(SkipReason::Decorative));
    };
    let Some(preset) = base::preset_geometry(shape) else {
        return Ok(Err(SkipReason::Failed("custom geometry".to_string())));
    };
    let Some(geometry) = base::geometry(shape) else {
        return Ok(Err(SkipReason::MissingGeometry));
    };

    let shape_id = target.next_shape_id();
    let auto_shape = MutableShape::new_auto_shape(
        shape_id,
        base::shape_name(shape),
        preset,
        geometry,
        base::solid_fill_rgb(shape).map(str::to_string),
        textframe::paragraphs(tx_body),
    );
    target.add_shape(&auto_shape)?;
    Ok(Ok(()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::content_type as ct;
    use crate::ooxml::pptx::MutablePresentation;
    use crate::ooxml::pptx::fixture::{self as fx, FixtureSlide, TINY_PNG, TemplateFixture};
    use crate::ooxml::pptx::shapes::table;

    /// Build a one-slide output from template slide `source_index` on layout
    /// `layout_index`, returning the skipped shapes and the saved output.
    fn clone_one(fixture: &TemplateFixture, source_index: usize, layout_index: usize) -> (Vec<SkippedShape>, Package) {
        let bytes = fixture.to_bytes();
        let template = Package::from_bytes(&bytes).unwrap();
        let source = template.slide_partnames().unwrap()[source_index].clone();
        let namespaces = template.slide(&source).unwrap().namespace_declarations();

        let mut pres = MutablePresentation::from_template_bytes(&bytes).unwrap();
        let layout = pres.layouts()[layout_index].partname.clone();
        let index = pres.add_slide(&layout, &namespaces).unwrap();
        let (slide, store) = pres.slide_with_store(index).unwrap();
        let skipped = clone_content(&template, &source, slide, store).unwrap();

        let out = Package::from_bytes(&pres.to_bytes().unwrap()).unwrap();
        (skipped, out)
    }

    fn first_slide(pkg: &Package) -> SlidePart<'_> {
        let partname = pkg.slide_partnames().unwrap()[0].clone();
        pkg.slide(&partname).unwrap()
    }

    fn find<'a>(slide: &'a SlidePart<'_>, name: &str) -> Option<(ShapeKind, &'a XmlElement)> {
        slide.shapes().find(|(_, shape)| base::shape_name(shape) == name)
    }

    #[test]
    fn test_bulleted_slide() {
        let (skipped, out) = clone_one(&TemplateFixture::sample(), 1, 1);
        let slide = first_slide(&out);

        let title = find(&slide, "Title 1").unwrap().1;
        assert_eq!(textframe::frame_text(base::text_body(title).unwrap()), "{{heading}}");

        let body = find(&slide, "Content Placeholder 2").unwrap().1;
        let paragraphs = textframe::paragraphs(base::text_body(body).unwrap());
        let texts: Vec<(&str, u32)> = paragraphs.iter().map(|p| (p.text.as_str(), p.level)).collect();
        assert_eq!(texts, vec![("{{bullets}}", 0), ("example", 1)]);

        let (kind, pic) = find(&slide, "Picture Placeholder 3").unwrap();
        assert_eq!(kind, ShapeKind::PicturePlaceholder);
        assert!(pic.is("pic"));
        let (blob, content_type) = out.related_blob(&slide, picture::blip_rel_id(pic).unwrap()).unwrap();
        assert_eq!(blob, TINY_PNG);
        assert_eq!(content_type, ct::PNG);

        let (kind, logo) = find(&slide, "Logo").unwrap();
        assert_eq!(kind, ShapeKind::Picture);
        assert_eq!(base::geometry(logo), Some(Geometry { x: 8000000, y: 6000000, cx: 600000, cy: 600000 }));

        let (kind, text_box) = find(&slide, "TextBox 6").unwrap();
        assert_eq!(kind, ShapeKind::TextBox);
        assert_eq!(textframe::frame_text(base::text_body(text_box).unwrap()), "Source: {{footnote}}");

        assert!(find(&slide, "Straight Connector 5").is_none());
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].reason, SkipReason::Connector);

        // footer placeholders are not inherited
        assert!(slide.shapes().all(|(_, s)| !base::placeholder(s).is_some_and(|ph| ph.is_latent())));
    }

    #[test]
    fn test_tabular_slide() {
        let (skipped, out) = clone_one(&TemplateFixture::sample(), 2, 1);
        let slide = first_slide(&out);

        let (kind, frame) = find(&slide, "Table 3").unwrap();
        assert_eq!(kind, ShapeKind::Table);
        let tbl = table::table(frame).unwrap();
        assert_eq!(table::dimensions(tbl), (3, 2));
        assert_eq!(table::grid_text(tbl)[0][0], "{{data}}");

        let (kind, group) = find(&slide, "Group 4").unwrap();
        assert_eq!(kind, ShapeKind::Group);
        let group_pic = group.find("pic").unwrap();
        let (blob, _) = out.related_blob(&slide, picture::blip_rel_id(group_pic).unwrap()).unwrap();
        assert_eq!(blob, TINY_PNG);

        let (_, rect) = find(&slide, "Rectangle 7").unwrap();
        assert_eq!(base::solid_fill_rgb(rect), Some("1F4E79"));
        assert_eq!(base::preset_geometry(rect), Some("rect"));

        let reasons: Vec<(&str, &SkipReason)> = skipped.iter().map(|s| (s.shape_name.as_str(), &s.reason)).collect();
        assert_eq!(
            reasons,
            vec![("Oval 8", &SkipReason::Decorative), ("Chart 9", &SkipReason::Unsupported)]
        );

        // every shape id on the slide is unique
        let mut ids: Vec<u32> = slide.tree().find_all("cNvPr").iter().filter_map(|e| e.attr("id")).map(|v| v.parse().unwrap()).collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);

        // the empty layout picture placeholder stays empty
        assert!(find(&slide, "Picture Placeholder 3").unwrap().1.is("sp"));
    }

    #[test]
    fn test_picture_placeholder_fallbacks() {
        let own = FixtureSlide::new(
            3,
            fx::picture(2, "Own Geometry", "rId2", Some(fx::xfrm(10, 20, 30, 40)), Some(13)),
        )
        .image("rId2");
        let inherited = FixtureSlide::new(2, fx::picture(2, "Inherited Geometry", "rId2", None, Some(13))).image("rId2");
        let fixture = TemplateFixture::empty().slide(own).slide(inherited);

        // target layout "Blank" has no picture placeholder
        let (skipped, out) = clone_one(&fixture, 0, 2);
        assert!(skipped.is_empty());
        let slide = first_slide(&out);
        let (kind, pic) = find(&slide, "Own Geometry").unwrap();
        assert_eq!(kind, ShapeKind::Picture);
        assert_eq!(base::geometry(pic), Some(Geometry { x: 10, y: 20, cx: 30, cy: 40 }));

        let (skipped, out) = clone_one(&fixture, 1, 2);
        assert!(skipped.is_empty());
        let slide = first_slide(&out);
        let (_, pic) = find(&slide, "Inherited Geometry").unwrap();
        assert_eq!(
            base::geometry(pic),
            Some(Geometry { x: 5000000, y: 1600200, cx: 3500000, cy: 3000000 })
        );
    }

    #[test]
    fn test_group_relationships() {
        let linked_label = r#"<p:sp><p:nvSpPr><p:cNvPr id="4" name="Link"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr><p:spPr/><p:txBody><a:bodyPr/><a:p><a:r><a:rPr><a:hlinkClick r:id="rId3"/></a:rPr><a:t>docs</a:t></a:r></a:p></p:txBody></p:sp>"#;
        let chart = r#"<p:graphicFrame><p:nvGraphicFramePr><p:cNvPr id="7" name="Chart"/><p:cNvGraphicFramePr/><p:nvPr/></p:nvGraphicFramePr><p:xfrm/><a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/chart"><c:chart xmlns:c="http://schemas.openxmlformats.org/drawingml/2006/chart" r:id="rId9"/></a:graphicData></a:graphic></p:graphicFrame>"#;
        let slide = FixtureSlide::new(
            3,
            [
                fx::group(2, "Linked Group", linked_label),
                fx::group(5, "Chart Group", chart),
            ]
            .concat(),
        )
        .hyperlink("rId3", "https://example.com/docs");
        let fixture = TemplateFixture::empty().slide(slide);

        let (skipped, out) = clone_one(&fixture, 0, 2);
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].shape_name, "Chart Group");
        assert!(matches!(skipped[0].reason, SkipReason::Relationship(_)));

        let slide = first_slide(&out);
        let (_, group) = find(&slide, "Linked Group").unwrap();
        let r_id = group.find("hlinkClick").unwrap().attr("r:id").unwrap();
        let rel = slide.part().rels().get(r_id).unwrap();
        assert!(rel.is_external());
        assert_eq!(rel.target_ref(), "https://example.com/docs");
    }

    fn image_rels(slide: &SlidePart<'_>) -> usize {
        slide.part().rels().of_type(rt::IMAGE).count()
    }

    fn media_parts(pkg: &Package) -> usize {
        pkg.opc().iter_parts().filter(|part| part.partname().as_str().starts_with("/ppt/media/")).count()
    }

    #[test]
    fn test_unplaceable_picture_leaves_no_image() {
        let orphan = FixtureSlide::new(3, fx::picture(4, "Orphan", "rId2", None, Some(99))).image("rId2");
        let fixture = TemplateFixture::empty().slide(orphan);

        let (skipped, out) = clone_one(&fixture, 0, 2);
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].shape_name, "Orphan");
        assert_eq!(skipped[0].reason, SkipReason::MissingGeometry);

        let slide = first_slide(&out);
        assert!(find(&slide, "Orphan").is_none());
        assert_eq!(image_rels(&slide), 0);
        assert_eq!(media_parts(&out), 0);
    }

    #[test]
    fn test_rejected_group_leaves_no_relationships() {
        let chart = r#"<p:graphicFrame><p:nvGraphicFramePr><p:cNvPr id="7" name="Chart"/><p:cNvGraphicFramePr/><p:nvPr/></p:nvGraphicFramePr><p:xfrm/><a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/chart"><c:chart xmlns:c="http://schemas.openxmlformats.org/drawingml/2006/chart" r:id="rId9"/></a:graphicData></a:graphic></p:graphicFrame>"#;
        let members = [fx::picture(3, "Photo", "rId2", Some(fx::xfrm(0, 0, 100, 100)), None), chart.to_string()].concat();
        let slide = FixtureSlide::new(3, fx::group(2, "Mixed Group", &members)).image("rId2");
        let fixture = TemplateFixture::empty().slide(slide);

        let (skipped, out) = clone_one(&fixture, 0, 2);
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].shape_name, "Mixed Group");
        assert!(matches!(skipped[0].reason, SkipReason::Relationship(_)));

        let slide = first_slide(&out);
        assert!(find(&slide, "Mixed Group").is_none());
        assert_eq!(image_rels(&slide), 0);
        assert_eq!(media_parts(&out), 0);
    }

    #[test]
    fn test_table_in_content_placeholder() {
        let frame = fx::table_frame(4, "Table 3", &[&["{{data}}", "b"], &["c", "d"]])
            .replacen("<p:nvPr/>", r#"<p:nvPr><p:ph idx="1"/></p:nvPr>"#, 1);
        let fixture = TemplateFixture::empty().slide(FixtureSlide::new(2, frame));

        let (skipped, out) = clone_one(&fixture, 0, 1);
        assert!(skipped.is_empty());

        let slide = first_slide(&out);
        let in_slot: Vec<(ShapeKind, &XmlElement)> = slide
            .shapes()
            .filter(|(_, shape)| base::placeholder(shape).is_some_and(|ph| ph.idx == 1))
            .collect();
        assert_eq!(in_slot.len(), 1);
        assert_eq!(in_slot[0].0, ShapeKind::Table);
        assert_eq!(base::shape_name(in_slot[0].1), "Table 3");
        assert!(find(&slide, "Content Placeholder 2").is_none());

        // the frame takes the z-order of the placeholder it replaces
        let names: Vec<&str> = slide.shapes().map(|(_, shape)| base::shape_name(shape)).collect();
        assert_eq!(names, vec!["Title 1", "Table 3", "Picture Placeholder 3"]);
    }
}
