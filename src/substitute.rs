//! Plain `{{field}}` substitution over a whole presentation.
//!
//! Unlike [`crate::compose`], nothing is selected or copied: every slide of
//! the template is kept and each token found inside a single text run is
//! replaced in place, leaving run formatting untouched. Tokens split across
//! runs are left alone.
use crate::common::xml::XmlElement;
use crate::compose::spec::FieldValue;
use crate::ooxml::error::Result;
use crate::ooxml::opc::part::parse_tree;
use crate::ooxml::pptx::Package;
use memchr::memmem;
use std::collections::{BTreeMap, BTreeSet};

/// Names of every `{{name}}` token found in slide text, table cells
/// included, sorted and without duplicates.
pub fn template_fields(package: &Package) -> Result<Vec<String>> {
    let mut fields = BTreeSet::new();
    for partname in package.slide_partnames()? {
        for text in package.slide(&partname)?.texts() {
            collect_field_names(&text, &mut fields);
        }
    }
    Ok(fields.into_iter().collect())
}

fn collect_field_names(text: &str, out: &mut BTreeSet<String>) {
    let bytes = text.as_bytes();
    let mut pos = 0;
    while let Some(found) = memmem::find(&bytes[pos..], b"{{") {
        let name_start = pos + found + 2;
        let name_len = memchr::memchr(b'}', &bytes[name_start..]).unwrap_or(bytes.len() - name_start);
        let name_end = name_start + name_len;
        if name_len > 0 && bytes[name_end..].starts_with(b"}}") {
            out.insert(text[name_start..name_end].to_string());
            pos = name_end + 2;
        } else {
            pos += found + 1;
        }
    }
}

/// Replace `{{name}}` tokens in every slide of `template` and return the new
/// package bytes.
pub fn render(template: &[u8], fields: &BTreeMap<String, FieldValue>) -> Result<Vec<u8>> {
    let mut package = Package::from_bytes(template)?;
    let replacements: Vec<(String, String)> = fields
        .iter()
        .map(|(name, value)| (crate::compose::populate::token(name), value.to_text()))
        .collect();

    let mut total = 0;
    for partname in package.slide_partnames()? {
        let part = package.opc_mut().get_part_mut(&partname)?;
        let mut tree = parse_tree(part)?;
        let replaced = replace_in_runs(&mut tree, &replacements);
        if replaced > 0 {
            part.set_blob(tree.to_document_bytes());
            tracing::debug!(slide = %partname, replaced, "tokens replaced");
        }
        total += replaced;
    }

    tracing::info!(fields = fields.len(), replaced = total, "template rendered");
    package.to_bytes()
}

/// Substitute inside each DrawingML text element, returning the number of replacements.
fn replace_in_runs(tree: &mut XmlElement, replacements: &[(String, String)]) -> usize {
    let mut count = 0;
    tree.for_each_descendant_mut(&mut |element: &mut XmlElement| {
        if !element.is("t") {
            return;
        }
        let original = element.text();
        let mut text = original.clone();
        for (token, value) in replacements {
            let hits = memmem::find_iter(text.as_bytes(), token.as_bytes()).count();
            if hits > 0 {
                text = text.replace(token.as_str(), value);
                count += hits;
            }
        }
        if text != original {
            element.set_text(&text);
        }
    });
    count
}
