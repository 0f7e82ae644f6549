/// Text frames: reading and rewriting the paragraphs of a `txBody`.
///
/// The same functions serve `p:txBody` (shapes) and `a:txBody` (table cells),
/// which share one content model: `bodyPr`, optional `lstStyle`, then one or
/// more `a:p`.
use crate::common::xml::{XmlElement, XmlNode};

/// Plain-text view of one paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextParagraph {
    /// Run and field text; line breaks appear as `\v`
    pub text: String,
    /// Indent level (`a:pPr@lvl`), 0 when absent
    pub level: u32,
    /// Horizontal alignment (`a:pPr@algn`) when set explicitly
    pub alignment: Option<String>,
}

impl TextParagraph {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Read an `a:p` element.
    pub fn from_element(p: &XmlElement) -> Self {
        let ppr = p.child("pPr");
        Self {
            text: paragraph_text(p),
            level: ppr
                .and_then(|e| e.attr("lvl"))
                .and_then(|v| atoi_simd::parse::<u32, false, false>(v.as_bytes()).ok())
                .unwrap_or(0),
            alignment: ppr.and_then(|e| e.attr("algn")).map(str::to_string),
        }
    }
}

/// Text of an `a:p`: runs and fields concatenated, `a:br` as `\v`.
pub fn paragraph_text(p: &XmlElement) -> String {
    let mut text = String::new();
    for child in p.elements() {
        match child.local_name() {
            "r" | "fld" => {
                if let Some(t) = child.child("t") {
                    text.push_str(&t.text());
                }
            },
            "br" => text.push('\u{b}'),
            _ => {},
        }
    }
    text
}

/// Paragraphs of a text body, in order.
pub fn paragraphs(tx_body: &XmlElement) -> Vec<TextParagraph> {
    tx_body
        .elements()
        .filter(|e| e.is("p"))
        .map(TextParagraph::from_element)
        .collect()
}

/// Full text of a text body: paragraphs joined with `\n`.
pub fn frame_text(tx_body: &XmlElement) -> String {
    tx_body
        .elements()
        .filter(|e| e.is("p"))
        .map(paragraph_text)
        .collect::<Vec<_>>()
        .join("\n")
}

/// An empty text body (`p:txBody` or `a:txBody`) holding one empty paragraph.
pub fn empty_text_body(name: &str) -> XmlElement {
    XmlElement::new(name)
        .with_child(XmlElement::new("a:bodyPr"))
        .with_child(XmlElement::new("a:lstStyle"))
        .with_child(XmlElement::new("a:p"))
}

/// Append `text` to a paragraph as unformatted runs, turning `\n` and `\v`
/// into `a:br`.
fn append_text(p: &mut XmlElement, text: &str) {
    for (i, line) in text.split(['\n', '\u{b}']).enumerate() {
        if i > 0 {
            p.push_child(XmlElement::new("a:br"));
        }
        if !line.is_empty() {
            let t = XmlElement::new("a:t").with_text(line);
            p.push_child(XmlElement::new("a:r").with_child(t));
        }
    }
}

/// Build an `a:p`. `ppr` is the paragraph-properties template to start from.
fn build_paragraph(paragraph: &TextParagraph, ppr: Option<&XmlElement>) -> XmlElement {
    let mut p = XmlElement::new("a:p");

    let mut ppr = ppr.cloned();
    if paragraph.level > 0 || paragraph.alignment.is_some() {
        ppr.get_or_insert_with(|| XmlElement::new("a:pPr"));
    }
    if let Some(mut ppr) = ppr {
        if paragraph.level > 0 {
            let mut buf = itoa::Buffer::new();
            ppr.set_attr("lvl", buf.format(paragraph.level));
        } else {
            ppr.remove_attr("lvl");
        }
        if let Some(algn) = &paragraph.alignment {
            ppr.set_attr("algn", algn.as_str());
        }
        p.push_child(ppr);
    }

    append_text(&mut p, &paragraph.text);
    p
}

/// Replace every paragraph of a text body.
///
/// The first existing paragraph's `a:pPr` and `a:endParaRPr` are kept on the
/// first new paragraph; run formatting is dropped. With no paragraphs given,
/// a single empty paragraph remains since a text body must hold one.
pub fn set_paragraphs(tx_body: &mut XmlElement, new_paragraphs: &[TextParagraph]) {
    let (first_ppr, end_rpr) = match tx_body.child("p") {
        Some(first) => (first.child("pPr").cloned(), first.child("endParaRPr").cloned()),
        None => (None, None),
    };

    tx_body.remove_children(&["p"]);
    if tx_body.child("bodyPr").is_none() {
        tx_body.insert_child(0, XmlElement::new("a:bodyPr"));
    }

    let empty = [TextParagraph::default()];
    let new_paragraphs = if new_paragraphs.is_empty() {
        &empty[..]
    } else {
        new_paragraphs
    };

    for (i, paragraph) in new_paragraphs.iter().enumerate() {
        let mut p = build_paragraph(paragraph, if i == 0 { first_ppr.as_ref() } else { None });
        if i == 0 {
            if let Some(end_rpr) = &end_rpr {
                p.push_child(end_rpr.clone());
            }
        }
        tx_body.push_child(p);
    }
}

/// Rebuild a text body as one paragraph holding `text`.
///
/// Unlike [`set_paragraphs`], the first paragraph's `a:pPr` is kept as is,
/// indent level included.
pub fn set_text(tx_body: &mut XmlElement, text: &str) {
    let mut p = XmlElement::new("a:p");
    if let Some(first) = tx_body.child("p") {
        if let Some(ppr) = first.child("pPr") {
            p.push_child(ppr.clone());
        }
        append_text(&mut p, text);
        if let Some(end_rpr) = first.child("endParaRPr") {
            p.push_child(end_rpr.clone());
        }
    } else {
        append_text(&mut p, text);
    }

    tx_body.remove_children(&["p"]);
    if tx_body.child("bodyPr").is_none() {
        tx_body.insert_child(0, XmlElement::new("a:bodyPr"));
    }
    tx_body.push_child(p);
}

/// Replace the paragraphs of a text body with one level-0 paragraph per item.
pub fn set_items<S: AsRef<str>>(tx_body: &mut XmlElement, items: &[S]) {
    let paragraphs: Vec<TextParagraph> = items
        .iter()
        .map(|item| TextParagraph::new(item.as_ref()))
        .collect();
    set_paragraphs(tx_body, &paragraphs);
}

/// Number of `a:p` children.
pub fn paragraph_count(tx_body: &XmlElement) -> usize {
    tx_body.elements().filter(|e| e.is("p")).count()
}

/// Whether a text body has any non-whitespace text.
pub fn has_text(tx_body: &XmlElement) -> bool {
    tx_body
        .children()
        .iter()
        .any(|node| matches!(node, XmlNode::Element(p) if p.is("p") && !paragraph_text(p).trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(xml: &str) -> XmlElement {
        XmlElement::parse(xml.as_bytes()).unwrap()
    }

    const SAMPLE: &str = r#"<p:txBody><a:bodyPr/><a:lstStyle/><a:p><a:pPr algn="ctr"/><a:r><a:rPr b="1"/><a:t>Hello </a:t></a:r><a:r><a:t>{{na</a:t></a:r><a:r><a:t>me}}</a:t></a:r><a:br/><a:r><a:t>second line</a:t></a:r><a:endParaRPr lang="en-US"/></a:p><a:p><a:pPr lvl="1"/><a:fld id="{1}" type="slidenum"><a:t>7</a:t></a:fld></a:p></p:txBody>"#;

    #[test]
    fn test_read_paragraphs() {
        let tx_body = body(SAMPLE);
        let paras = paragraphs(&tx_body);

        assert_eq!(paras.len(), 2);
        assert_eq!(paras[0].text, "Hello {{name}}\u{b}second line");
        assert_eq!(paras[0].alignment.as_deref(), Some("ctr"));
        assert_eq!(paras[1].level, 1);
        assert_eq!(paras[1].text, "7");
        assert_eq!(frame_text(&tx_body), "Hello {{name}}\u{b}second line\n7");
    }

    #[test]
    fn test_set_text_keeps_first_paragraph_properties() {
        let mut tx_body = body(SAMPLE);
        set_text(&mut tx_body, "Hello Ada\nwelcome");

        assert_eq!(paragraph_count(&tx_body), 1);
        let p = tx_body.child("p").unwrap();
        assert_eq!(p.child("pPr").unwrap().attr("algn"), Some("ctr"));
        assert!(p.child("endParaRPr").is_some());
        assert!(p.find("rPr").is_none());
        assert_eq!(p.find_all("br").len(), 1);
        assert_eq!(frame_text(&tx_body), "Hello Ada\u{b}welcome");
        assert!(tx_body.child("bodyPr").is_some());
        assert!(tx_body.child("lstStyle").is_some());
    }

    #[test]
    fn test_set_text_keeps_indent_level() {
        let mut tx_body = body(r#"<a:txBody><a:bodyPr/><a:p><a:pPr lvl="1"/><a:r><a:t>old</a:t></a:r></a:p></a:txBody>"#);
        set_text(&mut tx_body, "new");

        assert_eq!(paragraphs(&tx_body)[0].level, 1);
        assert_eq!(frame_text(&tx_body), "new");
    }

    #[test]
    fn test_set_paragraphs_levels_and_alignment() {
        let mut tx_body = body(SAMPLE);
        set_paragraphs(
            &mut tx_body,
            &[
                TextParagraph::new("Agenda"),
                TextParagraph {
                    text: "Detail".to_string(),
                    level: 2,
                    alignment: Some("r".to_string()),
                },
            ],
        );

        let paras = paragraphs(&tx_body);
        assert_eq!(paras.len(), 2);
        assert_eq!(paras[0].level, 0);
        assert_eq!(paras[0].alignment.as_deref(), Some("ctr"));
        assert_eq!(paras[1].level, 2);
        assert_eq!(paras[1].alignment.as_deref(), Some("r"));
    }

    #[test]
    fn test_set_items() {
        let mut tx_body = body(SAMPLE);
        set_items(&mut tx_body, &["one", "two", "three"]);

        let paras = paragraphs(&tx_body);
        assert_eq!(paras.len(), 3);
        assert!(paras.iter().all(|p| p.level == 0));
        assert_eq!(
            paras.iter().map(|p| p.text.as_str()).collect::<Vec<_>>(),
            vec!["one", "two", "three"]
        );
    }

    #[test]
    fn test_set_items_empty_leaves_one_paragraph() {
        let mut tx_body = body(SAMPLE);
        set_items::<&str>(&mut tx_body, &[]);

        assert_eq!(paragraph_count(&tx_body), 1);
        assert_eq!(frame_text(&tx_body), "");
        assert!(!has_text(&tx_body));
    }

    #[test]
    fn test_empty_text_body() {
        let tx_body = empty_text_body("p:txBody");
        assert_eq!(
            tx_body.to_xml(),
            "<p:txBody><a:bodyPr/><a:lstStyle/><a:p/></p:txBody>"
        );
    }
}
