//! Writing field values into a composed slide.
//!
//! Fields are located by their `{{name}}` token in shape text and dispatched
//! on the type the slide annotation declares for them.
use crate::common::xml::XmlElement;
use crate::ooxml::error::Result;
use crate::ooxml::pptx::shapes::base::{self, ShapeKind};
use crate::ooxml::pptx::shapes::{table, textframe};
use crate::ooxml::pptx::writer::MutableSlide;
use std::collections::BTreeMap;

use super::metadata::{FieldType, SlideMetadata};
use super::report::{FieldOutcome, FieldStatus};
use super::spec::FieldValue;

/// The token a field is written over.
pub fn token(field: &str) -> String {
    format!("{{{{{}}}}}", field)
}

/// Populate every field of a specification, in field-name order.
pub fn populate_slide(slide: &mut MutableSlide, fields: &BTreeMap<String, FieldValue>, metadata: &SlideMetadata) -> Result<Vec<FieldOutcome>> {
    let sp_tree = slide.sp_tree_mut()?;
    let mut outcomes = Vec::with_capacity(fields.len());

    for (field, value) in fields {
        let field_type = metadata.field_type(field);
        let token = token(field);

        let status = if field_type.is_textual() {
            found(replace_text(sp_tree, &token, &value.to_text()))
        } else {
            match field_type {
                FieldType::List => found(fill_list(sp_tree, &token, &value.items())),
                FieldType::Table => found(fill_table(sp_tree, &token, &value.rows())),
                // image fields have no writer yet
                _ => FieldStatus::Unsupported,
            }
        };

        match status {
            FieldStatus::Applied => {},
            FieldStatus::NotFound => tracing::debug!(field = %field, "no shape carries the field token"),
            FieldStatus::Unsupported => {
                tracing::debug!(field = %field, field_type = %field_type, "field type is not written")
            },
        }
        outcomes.push(FieldOutcome {
            field: field.clone(),
            field_type,
            status,
        });
    }
    Ok(outcomes)
}

fn found(applied: bool) -> FieldStatus {
    if applied {
        FieldStatus::Applied
    } else {
        FieldStatus::NotFound
    }
}

/// Visit shapes depth-first, descending into groups, until `f` returns true.
fn walk_shapes_mut(container: &mut XmlElement, f: &mut dyn FnMut(ShapeKind, &mut XmlElement) -> bool) -> bool {
    for shape in container.elements_mut() {
        let Some(kind) = ShapeKind::of(shape) else {
            continue;
        };
        let stop = if kind == ShapeKind::Group {
            walk_shapes_mut(shape, f)
        } else {
            f(kind, shape)
        };
        if stop {
            return true;
        }
    }
    false
}

/// Replace `token` in every text frame and table cell. Each frame holding
/// it is rebuilt as a single paragraph of plain runs.
fn replace_text(sp_tree: &mut XmlElement, token: &str, value: &str) -> bool {
    let mut applied = false;
    walk_shapes_mut(sp_tree, &mut |kind, shape| {
        if kind == ShapeKind::Table {
            if let Some(tbl) = table::table_mut(shape) {
                let (rows, cols) = table::dimensions(tbl);
                for row in 0..rows {
                    for col in 0..cols {
                        let Some(tc) = table::cell_mut(tbl, row, col) else {
                            continue;
                        };
                        let text = table::cell_text(tc);
                        if text.contains(token) {
                            table::set_cell_text(tc, &text.replace(token, value));
                            applied = true;
                        }
                    }
                }
            }
        } else if let Some(tx_body) = base::text_body_mut(shape) {
            let text = textframe::frame_text(tx_body);
            if text.contains(token) {
                textframe::set_text(tx_body, &text.replace(token, value));
                applied = true;
            }
        }
        false
    });
    applied
}

/// Replace the paragraphs of the first text frame holding `token` with one
/// level-0 paragraph per item.
fn fill_list(sp_tree: &mut XmlElement, token: &str, items: &[String]) -> bool {
    walk_shapes_mut(sp_tree, &mut |_, shape| {
        let Some(tx_body) = base::text_body_mut(shape) else {
            return false;
        };
        if !textframe::frame_text(tx_body).contains(token) {
            return false;
        }
        textframe::set_items(tx_body, items);
        true
    })
}

/// Fill the first table holding `token` from `rows`, row-major, within the
/// table's existing rows and columns.
///
/// An empty grid leaves the table alone and the search moves on.
fn fill_table(sp_tree: &mut XmlElement, token: &str, rows: &[Vec<String>]) -> bool {
    walk_shapes_mut(sp_tree, &mut |kind, shape| {
        if kind != ShapeKind::Table || rows.is_empty() {
            return false;
        }
        let Some(tbl) = table::table_mut(shape) else {
            return false;
        };
        if !table::contains_text(tbl, token) {
            return false;
        }

        let (row_count, col_count) = table::dimensions(tbl);
        for row in 0..row_count {
            for col in 0..col_count {
                if let Some(tc) = table::cell_mut(tbl, row, col) {
                    let text = table::cell_text(tc);
                    if text.contains(token) {
                        table::set_cell_text(tc, &text.replace(token, ""));
                    }
                }
            }
        }

        for (r, values) in rows.iter().enumerate().take(row_count) {
            for (c, value) in values.iter().enumerate().take(col_count) {
                if let Some(tc) = table::cell_mut(tbl, r, c) {
                    table::set_cell_text(tc, value);
                }
            }
        }
        true
    })
}
