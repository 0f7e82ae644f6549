//! In-memory `.pptx` templates for tests.
//!
//! [`TemplateFixture::sample`] builds a small annotated template deck with
//! three layouts ("Title Slide", "Title and Content", "Blank") and five slides:
//!
//! 1. `title_page` on "Title Slide"
//! 2. `content` on "Title and Content": title, bullets, picture placeholder,
//!    logo picture, connector, text box
//! 3. `content` on "Title and Content": title, table, group, filled
//!    rectangle, empty ellipse, chart frame
//! 4. `closing` on "Blank", annotated with typographic quotes
//! 5. an unannotated appendix slide

use crate::common::xml::escape_xml;
use crate::ooxml::opc::constants::{content_type as ct, namespace as ns, relationship_type as rt};
use std::fmt::Write as _;
use std::io::{Cursor, Write};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Namespace declarations carried by every slide-like root.
pub(crate) const NS_DECLS: &str = concat!(
    r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
    r#"xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#
);

/// A 1x1 PNG.
pub(crate) const TINY_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52,
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F, 0x15, 0xC4,
    0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0xF8, 0xCF, 0xC0, 0xF0,
    0x1F, 0x00, 0x05, 0x00, 0x01, 0xFF, 0x89, 0x99, 0x3D, 0x1D, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45,
    0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

const SP_TREE_HEADER: &str = r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#;

/// `a:off`/`a:ext` pair.
pub(crate) fn xfrm(x: i64, y: i64, cx: i64, cy: i64) -> String {
    format!(r#"<a:xfrm><a:off x="{x}" y="{y}"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm>"#)
}

/// One paragraph with a single formatted run.
pub(crate) fn para(text: &str) -> String {
    format!(
        r#"<a:p><a:r><a:rPr lang="en-US" dirty="0"/><a:t>{}</a:t></a:r></a:p>"#,
        escape_xml(text)
    )
}

fn text_body(tag: &str, paras: &str) -> String {
    format!("<{tag}><a:bodyPr/><a:lstStyle/>{paras}</{tag}>")
}

/// A placeholder `p:sp`. `ph_attrs` is the raw attribute list of `p:ph`.
pub(crate) fn placeholder_sp(id: u32, name: &str, ph_attrs: &str, geometry: Option<String>, paras: &str) -> String {
    let sp_pr = match geometry {
        Some(xfrm) => format!("<p:spPr>{xfrm}</p:spPr>"),
        None => "<p:spPr/>".to_string(),
    };
    let tx_body = if paras.is_empty() {
        String::new()
    } else {
        text_body("p:txBody", paras)
    };
    format!(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="{name}"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr><p:ph {ph_attrs}/></p:nvPr></p:nvSpPr>{sp_pr}{tx_body}</p:sp>"#
    )
}

pub(crate) fn text_box(id: u32, name: &str, geometry: String, paras: &str) -> String {
    format!(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="{name}"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr><p:spPr>{geometry}<a:prstGeom prst="rect"><a:avLst/></a:prstGeom><a:noFill/></p:spPr>{}</p:sp>"#,
        text_body("p:txBody", paras)
    )
}

/// An auto shape with preset geometry, optional solid fill and text.
pub(crate) fn auto_shape(id: u32, name: &str, prst: &str, fill: Option<&str>, geometry: String, paras: &str) -> String {
    let fill = fill
        .map(|rgb| format!(r#"<a:solidFill><a:srgbClr val="{rgb}"/></a:solidFill>"#))
        .unwrap_or_default();
    format!(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="{name}"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr><p:spPr>{geometry}<a:prstGeom prst="{prst}"><a:avLst/></a:prstGeom>{fill}</p:spPr><p:style><a:lnRef idx="1"><a:schemeClr val="accent1"/></a:lnRef><a:fillRef idx="3"><a:schemeClr val="accent1"/></a:fillRef><a:effectRef idx="2"><a:schemeClr val="accent1"/></a:effectRef><a:fontRef idx="minor"><a:schemeClr val="lt1"/></a:fontRef></p:style>{}</p:sp>"#,
        text_body("p:txBody", paras)
    )
}

/// A `p:pic`. With `ph_idx`, the picture fills a picture placeholder.
pub(crate) fn picture(id: u32, name: &str, r_id: &str, geometry: Option<String>, ph_idx: Option<u32>) -> String {
    let nv_pr = match ph_idx {
        Some(idx) => format!(r#"<p:nvPr><p:ph type="pic" idx="{idx}"/></p:nvPr>"#),
        None => "<p:nvPr/>".to_string(),
    };
    format!(
        r#"<p:pic><p:nvPicPr><p:cNvPr id="{id}" name="{name}"/><p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr>{nv_pr}</p:nvPicPr><p:blipFill><a:blip r:embed="{r_id}"/><a:stretch><a:fillRect/></a:stretch></p:blipFill><p:spPr>{}<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr></p:pic>"#,
        geometry.unwrap_or_default()
    )
}

pub(crate) fn connector(id: u32, name: &str) -> String {
    format!(
        r#"<p:cxnSp><p:nvCxnSpPr><p:cNvPr id="{id}" name="{name}"/><p:cNvCxnSpPr/><p:nvPr/></p:nvCxnSpPr><p:spPr>{}<a:prstGeom prst="straightConnector1"><a:avLst/></a:prstGeom></p:spPr></p:cxnSp>"#,
        xfrm(457200, 6000000, 8229600, 0)
    )
}

/// A table graphic frame; `rows` holds the cell texts.
pub(crate) fn table_frame(id: u32, name: &str, rows: &[&[&str]]) -> String {
    let cols = rows.first().map(|r| r.len()).unwrap_or(0);
    let mut xml = format!(
        r#"<p:graphicFrame><p:nvGraphicFramePr><p:cNvPr id="{id}" name="{name}"/><p:cNvGraphicFramePr><a:graphicFrameLocks noGrp="1"/></p:cNvGraphicFramePr><p:nvPr/></p:nvGraphicFramePr><p:xfrm><a:off x="457200" y="1600200"/><a:ext cx="8229600" cy="1483360"/></p:xfrm><a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/table"><a:tbl><a:tblPr firstRow="1" bandRow="1"/><a:tblGrid>"#
    );
    for _ in 0..cols {
        let _ = write!(xml, r#"<a:gridCol w="{}"/>"#, 8229600 / cols.max(1));
    }
    xml.push_str("</a:tblGrid>");
    for row in rows {
        xml.push_str(r#"<a:tr h="370840">"#);
        for cell in *row {
            let paras = if cell.is_empty() { "<a:p/>".to_string() } else { para(cell) };
            let _ = write!(xml, "<a:tc>{}<a:tcPr/></a:tc>", text_body("a:txBody", &paras));
        }
        xml.push_str("</a:tr>");
    }
    xml.push_str("</a:tbl></a:graphicData></a:graphic></p:graphicFrame>");
    xml
}

pub(crate) fn group(id: u32, name: &str, children: &str) -> String {
    format!(
        r#"<p:grpSp><p:nvGrpSpPr><p:cNvPr id="{id}" name="{name}"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="5000000" y="4000000"/><a:ext cx="3000000" cy="2000000"/><a:chOff x="5000000" y="4000000"/><a:chExt cx="3000000" cy="2000000"/></a:xfrm></p:grpSpPr>{children}</p:grpSp>"#
    )
}

pub(crate) fn chart_frame(id: u32, name: &str) -> String {
    format!(
        r#"<p:graphicFrame><p:nvGraphicFramePr><p:cNvPr id="{id}" name="{name}"/><p:cNvGraphicFramePr/><p:nvPr/></p:nvGraphicFramePr><p:xfrm><a:off x="0" y="0"/><a:ext cx="100" cy="100"/></p:xfrm><a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/chart"><c:chart xmlns:c="http://schemas.openxmlformats.org/drawingml/2006/chart" r:id="rId9"/></a:graphicData></a:graphic></p:graphicFrame>"#
    )
}

/// One slide of a fixture deck.
#[derive(Debug, Clone)]
pub(crate) struct FixtureSlide {
    /// 1-based layout number
    layout: usize,
    shapes: String,
    notes: Option<String>,
    /// `(rId, reltype, target, external)`; rId1 is reserved for the layout
    rels: Vec<(String, String, String, bool)>,
}

impl FixtureSlide {
    pub(crate) fn new(layout: usize, shapes: impl Into<String>) -> Self {
        Self {
            layout,
            shapes: shapes.into(),
            notes: None,
            rels: Vec::new(),
        }
    }

    pub(crate) fn notes(mut self, text: impl Into<String>) -> Self {
        self.notes = Some(text.into());
        self
    }

    /// Relate `r_id` to the shared fixture image.
    pub(crate) fn image(mut self, r_id: &str) -> Self {
        self.rels
            .push((r_id.to_string(), rt::IMAGE.to_string(), "../media/image1.png".to_string(), false));
        self
    }

    pub(crate) fn hyperlink(mut self, r_id: &str, url: &str) -> Self {
        self.rels
            .push((r_id.to_string(), rt::HYPERLINK.to_string(), url.to_string(), true));
        self
    }
}

/// Builder for a template `.pptx` held in memory.
#[derive(Debug, Clone)]
pub(crate) struct TemplateFixture {
    main_content_type: String,
    slides: Vec<FixtureSlide>,
    sections: bool,
}

impl TemplateFixture {
    /// Layouts and masters only, no slides.
    pub(crate) fn empty() -> Self {
        Self {
            main_content_type: ct::PML_PRESENTATION_MAIN.to_string(),
            slides: Vec::new(),
            sections: false,
        }
    }

    /// The annotated five-slide deck described in the module docs.
    pub(crate) fn sample() -> Self {
        let title_geom = || Some(xfrm(457200, 274638, 8229600, 1143000));

        let title_page = FixtureSlide::new(
            1,
            [
                placeholder_sp(2, "Title 1", r#"type="ctrTitle""#, None, &para("{{title}}")),
                placeholder_sp(3, "Subtitle 2", r#"type="subTitle" idx="1""#, None, &para("{{subtitle}}")),
                placeholder_sp(4, "Date Placeholder 3", r#"type="dt" sz="half" idx="10""#, None, &para("10/19/2026")),
            ]
            .concat(),
        )
        .notes(r#"{"slide_type": "title_page", "description": "Opening slide", "placeholders": {"title": {"type": "text", "description": "Deck title"}, "subtitle": {"type": "text", "description": "Tagline"}}}"#);

        let bullets = FixtureSlide::new(
            2,
            [
                placeholder_sp(2, "Title 1", r#"type="title""#, title_geom(), &para("{{heading}}")),
                placeholder_sp(
                    3,
                    "Content Placeholder 2",
                    r#"idx="1""#,
                    None,
                    &format!(r#"{}<a:p><a:pPr lvl="1"/><a:r><a:t>example</a:t></a:r></a:p>"#, para("{{bullets}}")),
                ),
                picture(4, "Picture Placeholder 3", "rId2", None, Some(13)),
                picture(5, "Logo", "rId2", Some(xfrm(8000000, 6000000, 600000, 600000)), None),
                connector(6, "Straight Connector 5"),
                text_box(7, "TextBox 6", xfrm(457200, 6200000, 4000000, 300000), &para("Source: {{footnote}}")),
            ]
            .concat(),
        )
        .image("rId2")
        .notes(r#"{"slide_type": "content", "description": "Bulleted content", "placeholders": {"heading": {"type": "text"}, "bullets": {"type": "list", "description": "Key points"}, "footnote": {"type": "text"}}}"#);

        let table = FixtureSlide::new(
            2,
            [
                placeholder_sp(2, "Title 1", r#"type="title""#, None, &para("{{heading}}")),
                table_frame(4, "Table 3", &[&["{{data}}", ""], &["", ""], &["", ""]]),
                group(
                    5,
                    "Group 4",
                    &[
                        picture(6, "Group Picture", "rId2", Some(xfrm(5000000, 4000000, 1000000, 1000000)), None),
                        text_box(7, "Group Label", xfrm(6000000, 4000000, 2000000, 500000), &para("{{caption}}")),
                    ]
                    .concat(),
                ),
                auto_shape(8, "Rectangle 7", "rect", Some("1F4E79"), xfrm(457200, 5000000, 3000000, 800000), &para("Highlights")),
                auto_shape(9, "Oval 8", "ellipse", None, xfrm(100, 100, 200, 200), "<a:p/>"),
                chart_frame(10, "Chart 9"),
            ]
            .concat(),
        )
        .image("rId2")
        .notes(r#"{"slide_type": "content", "description": "Tabular content", "placeholders": {"heading": {"type": "text"}, "data": {"type": "table"}, "caption": {"type": "text"}, "photo": {"type": "image"}}}"#);

        let closing = FixtureSlide::new(
            3,
            [
                text_box(2, "TextBox 1", xfrm(1524000, 2743200, 6096000, 1371600), &para("{{message}}")),
                auto_shape(3, "Rounded Rectangle 2", "roundRect", Some("C00000"), xfrm(3000000, 4500000, 3000000, 700000), &para("Thank you")),
                auto_shape(4, "Line 3", "line", None, xfrm(0, 0, 100, 0), "<a:p/>"),
            ]
            .concat(),
        )
        .notes("{\u{201c}slide_type\u{201d}: \u{201c}closing\u{201d}, \u{201c}description\u{201d}: \u{201c}It\u{2019}s over\u{201d}, \u{201c}placeholders\u{201d}: {\u{201c}message\u{201d}: {\u{201c}type\u{201d}: \u{201c}text\u{201d}}}}");

        let appendix = FixtureSlide::new(2, placeholder_sp(2, "Title 1", r#"type="title""#, None, &para("Appendix")));

        Self::empty()
            .slide(title_page)
            .slide(bullets)
            .slide(table)
            .slide(closing)
            .slide(appendix)
            .with_sections()
    }

    pub(crate) fn slide(mut self, slide: FixtureSlide) -> Self {
        self.slides.push(slide);
        self
    }

    pub(crate) fn main_content_type(mut self, content_type: &str) -> Self {
        self.main_content_type = content_type.to_string();
        self
    }

    /// Add a custom show and a section list referencing every slide.
    pub(crate) fn with_sections(mut self) -> Self {
        self.sections = true;
        self
    }

    pub(crate) fn to_bytes(&self) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        let mut add = |name: &str, data: &[u8]| {
            zip.start_file(name, options).unwrap();
            zip.write_all(data).unwrap();
        };

        add("[Content_Types].xml", self.content_types().as_bytes());
        add(
            "_rels/.rels",
            rels(&[
                ("rId1", rt::OFFICE_DOCUMENT, "ppt/presentation.xml", false),
                ("rId2", rt::EXTENDED_PROPERTIES, "docProps/app.xml", false),
            ])
            .as_bytes(),
        );
        add(
            "docProps/app.xml",
            br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties"><Application>Microsoft Office PowerPoint</Application></Properties>"#,
        );

        add("ppt/presentation.xml", self.presentation_xml().as_bytes());
        let mut pres_rels: Vec<(String, &str, String, bool)> = vec![
            ("rId1".into(), rt::SLIDE_MASTER, "slideMasters/slideMaster1.xml".into(), false),
            ("rId2".into(), rt::NOTES_MASTER, "notesMasters/notesMaster1.xml".into(), false),
            ("rId3".into(), rt::THEME, "theme/theme1.xml".into(), false),
        ];
        for n in 1..=self.slides.len() {
            pres_rels.push((format!("rId{}", n + 3), rt::SLIDE, format!("slides/slide{n}.xml"), false));
        }
        let pres_rels: Vec<(&str, &str, &str, bool)> = pres_rels
            .iter()
            .map(|(id, ty, target, ext)| (id.as_str(), *ty, target.as_str(), *ext))
            .collect();
        add("ppt/_rels/presentation.xml.rels", rels(&pres_rels).as_bytes());

        add("ppt/slideMasters/slideMaster1.xml", MASTER_XML.as_bytes());
        add(
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            rels(&[
                ("rId1", rt::SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml", false),
                ("rId2", rt::SLIDE_LAYOUT, "../slideLayouts/slideLayout2.xml", false),
                ("rId3", rt::SLIDE_LAYOUT, "../slideLayouts/slideLayout3.xml", false),
                ("rId4", rt::THEME, "../theme/theme1.xml", false),
            ])
            .as_bytes(),
        );
        for (n, (name, placeholders)) in layouts().iter().enumerate() {
            let n = n + 1;
            add(&format!("ppt/slideLayouts/slideLayout{n}.xml"), layout_xml(name, placeholders).as_bytes());
            add(
                &format!("ppt/slideLayouts/_rels/slideLayout{n}.xml.rels"),
                rels(&[("rId1", rt::SLIDE_MASTER, "../slideMasters/slideMaster1.xml", false)]).as_bytes(),
            );
        }
        add("ppt/theme/theme1.xml", THEME_XML.as_bytes());
        add("ppt/notesMasters/notesMaster1.xml", NOTES_MASTER_XML.as_bytes());
        add(
            "ppt/notesMasters/_rels/notesMaster1.xml.rels",
            rels(&[("rId1", rt::THEME, "../theme/theme1.xml", false)]).as_bytes(),
        );
        add("ppt/media/image1.png", TINY_PNG);

        for (i, slide) in self.slides.iter().enumerate() {
            let n = i + 1;
            add(&format!("ppt/slides/slide{n}.xml"), slide_xml(&slide.shapes).as_bytes());

            let layout_target = format!("../slideLayouts/slideLayout{}.xml", slide.layout);
            let mut slide_rels: Vec<(&str, &str, &str, bool)> = vec![("rId1", rt::SLIDE_LAYOUT, layout_target.as_str(), false)];
            for (r_id, reltype, target, external) in &slide.rels {
                slide_rels.push((r_id.as_str(), reltype.as_str(), target.as_str(), *external));
            }
            let notes_target = format!("../notesSlides/notesSlide{n}.xml");
            if slide.notes.is_some() {
                slide_rels.push(("rId10", rt::NOTES_SLIDE, notes_target.as_str(), false));
            }
            add(&format!("ppt/slides/_rels/slide{n}.xml.rels"), rels(&slide_rels).as_bytes());

            if let Some(notes) = &slide.notes {
                add(&format!("ppt/notesSlides/notesSlide{n}.xml"), notes_xml(notes).as_bytes());
                let slide_target = format!("../slides/slide{n}.xml");
                add(
                    &format!("ppt/notesSlides/_rels/notesSlide{n}.xml.rels"),
                    rels(&[
                        ("rId1", rt::NOTES_MASTER, "../notesMasters/notesMaster1.xml", false),
                        ("rId2", rt::SLIDE, slide_target.as_str(), false),
                    ])
                    .as_bytes(),
                );
            }
        }

        zip.finish().unwrap().into_inner()
    }

    /// Write the deck to `path`.
    pub(crate) fn write_to(&self, path: &std::path::Path) {
        std::fs::write(path, self.to_bytes()).unwrap();
    }

    fn content_types(&self) -> String {
        let mut xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="{}"><Default Extension="rels" ContentType="{}"/><Default Extension="xml" ContentType="{}"/><Default Extension="png" ContentType="{}"/>"#,
            ns::OPC_CONTENT_TYPES,
            ct::OPC_RELATIONSHIPS,
            ct::XML,
            ct::PNG
        );
        let mut overrides = vec![
            ("/ppt/presentation.xml".to_string(), self.main_content_type.as_str()),
            ("/docProps/app.xml".to_string(), ct::OFC_EXTENDED_PROPERTIES),
            ("/ppt/slideMasters/slideMaster1.xml".to_string(), ct::PML_SLIDE_MASTER),
            ("/ppt/theme/theme1.xml".to_string(), ct::OFC_THEME),
            ("/ppt/notesMasters/notesMaster1.xml".to_string(), ct::PML_NOTES_MASTER),
        ];
        for n in 1..=layouts().len() {
            overrides.push((format!("/ppt/slideLayouts/slideLayout{n}.xml"), ct::PML_SLIDE_LAYOUT));
        }
        for (i, slide) in self.slides.iter().enumerate() {
            overrides.push((format!("/ppt/slides/slide{}.xml", i + 1), ct::PML_SLIDE));
            if slide.notes.is_some() {
                overrides.push((format!("/ppt/notesSlides/notesSlide{}.xml", i + 1), ct::PML_NOTES_SLIDE));
            }
        }
        for (partname, content_type) in overrides {
            let _ = write!(xml, r#"<Override PartName="{partname}" ContentType="{content_type}"/>"#);
        }
        xml.push_str("</Types>");
        xml
    }

    fn presentation_xml(&self) -> String {
        let mut xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:presentation {NS_DECLS} saveSubsetFonts="1"><p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst><p:notesMasterIdLst><p:notesMasterId r:id="rId2"/></p:notesMasterIdLst>"#
        );
        if !self.slides.is_empty() {
            xml.push_str("<p:sldIdLst>");
            for n in 1..=self.slides.len() {
                let _ = write!(xml, r#"<p:sldId id="{}" r:id="rId{}"/>"#, 255 + n, n + 3);
            }
            xml.push_str("</p:sldIdLst>");
        }
        xml.push_str(r#"<p:sldSz cx="9144000" cy="6858000" type="screen4x3"/><p:notesSz cx="6858000" cy="9144000"/>"#);
        if self.sections && !self.slides.is_empty() {
            xml.push_str(r#"<p:custShowLst><p:custShow name="Short" id="0"><p:sldLst><p:sld r:id="rId4"/></p:sldLst></p:custShow></p:custShowLst>"#);
            xml.push_str(r#"<p:defaultTextStyle/><p:extLst><p:ext uri="{521415D9-36F7-43E2-AB2F-B90AF26B5E84}"><p14:sectionLst xmlns:p14="http://schemas.microsoft.com/office/powerpoint/2010/main"><p14:section name="Default Section" id="{6A4D2C5E-8E11-4C4B-9D0B-3B1D6F3F0A11}"><p14:sldIdLst>"#);
            for n in 1..=self.slides.len() {
                let _ = write!(xml, r#"<p14:sldId id="{}"/>"#, 255 + n);
            }
            xml.push_str(r#"</p14:sldIdLst></p14:section></p14:sectionLst></p:ext><p:ext uri="{EFAFB233-063F-42B5-8137-9DF3F51BA10A}"><p15:sldGuideLst xmlns:p15="http://schemas.microsoft.com/office/powerpoint/2012/main"/></p:ext></p:extLst>"#);
        } else {
            xml.push_str("<p:defaultTextStyle/>");
        }
        xml.push_str("</p:presentation>");
        xml
    }
}

fn rels(entries: &[(&str, &str, &str, bool)]) -> String {
    let mut xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="{}">"#,
        ns::OPC_RELATIONSHIPS
    );
    for (r_id, reltype, target, external) in entries {
        let mode = if *external { r#" TargetMode="External""# } else { "" };
        let _ = write!(
            xml,
            r#"<Relationship Id="{r_id}" Type="{reltype}" Target="{}"{mode}/>"#,
            escape_xml(target)
        );
    }
    xml.push_str("</Relationships>");
    xml
}

fn slide_xml(shapes: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:sld {NS_DECLS}><p:cSld><p:spTree>{SP_TREE_HEADER}{shapes}</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>"#
    )
}

fn notes_xml(text: &str) -> String {
    let paras: String = text.split('\n').map(para).collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:notes {NS_DECLS}><p:cSld><p:spTree>{SP_TREE_HEADER}{}{}</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:notes>"#,
        placeholder_sp(2, "Slide Image Placeholder 1", r#"type="sldImg""#, None, ""),
        placeholder_sp(3, "Notes Placeholder 2", r#"type="body" idx="1""#, None, &paras),
    )
}

/// Layout names and their placeholders.
fn layouts() -> Vec<(&'static str, String)> {
    let footer = [
        placeholder_sp(10, "Date Placeholder", r#"type="dt" sz="half" idx="10""#, Some(xfrm(457200, 6356350, 2133600, 365125)), ""),
        placeholder_sp(11, "Footer Placeholder", r#"type="ftr" sz="quarter" idx="11""#, Some(xfrm(3124200, 6356350, 2895600, 365125)), ""),
        placeholder_sp(12, "Slide Number Placeholder", r#"type="sldNum" sz="quarter" idx="12""#, Some(xfrm(6553200, 6356350, 2133600, 365125)), ""),
    ]
    .concat();
    vec![
        (
            "Title Slide",
            [
                placeholder_sp(2, "Title 1", r#"type="ctrTitle""#, Some(xfrm(685800, 2130425, 7772400, 1470025)), ""),
                placeholder_sp(3, "Subtitle 2", r#"type="subTitle" idx="1""#, Some(xfrm(1371600, 3886200, 6400000, 1752600)), ""),
                footer.clone(),
            ]
            .concat(),
        ),
        (
            "Title and Content",
            [
                placeholder_sp(2, "Title 1", r#"type="title""#, Some(xfrm(457200, 274638, 8229600, 1143000)), ""),
                placeholder_sp(3, "Content Placeholder 2", r#"idx="1""#, Some(xfrm(457200, 1600200, 4000000, 4525963)), ""),
                placeholder_sp(4, "Picture Placeholder 3", r#"type="pic" idx="13""#, Some(xfrm(5000000, 1600200, 3500000, 3000000)), ""),
                footer.clone(),
            ]
            .concat(),
        ),
        ("Blank", footer),
    ]
}

fn layout_xml(name: &str, placeholders: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:sldLayout {NS_DECLS} preserve="1"><p:cSld name="{name}"><p:spTree>{SP_TREE_HEADER}{placeholders}</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>"#
    )
}

const MASTER_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<p:sldMaster xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">"#,
    r#"<p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/></p:spTree></p:cSld>"#,
    r#"<p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>"#,
    r#"<p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/><p:sldLayoutId id="2147483650" r:id="rId2"/><p:sldLayoutId id="2147483651" r:id="rId3"/></p:sldLayoutIdLst>"#,
    r#"</p:sldMaster>"#
);

const NOTES_MASTER_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<p:notesMaster xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">"#,
    r#"<p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/></p:spTree></p:cSld>"#,
    r#"<p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>"#,
    r#"</p:notesMaster>"#
);

const THEME_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office Theme"><a:themeElements/></a:theme>"#;
