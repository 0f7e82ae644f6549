/// Table shape helpers for PowerPoint presentations.
///
/// Tables in PowerPoint are DrawingML tables (`a:tbl`) contained within
/// graphic frames (`p:graphicFrame/a:graphic/a:graphicData/a:tbl`). They
/// contain rows (`a:tr`), which contain cells (`a:tc`).
use crate::common::xml::XmlElement;
use crate::ooxml::pptx::shapes::textframe;

/// The `a:tbl` element of a graphic frame.
pub fn table(graphic_frame: &XmlElement) -> Option<&XmlElement> {
    graphic_frame.child_path(&["graphic", "graphicData", "tbl"])
}

pub fn table_mut(graphic_frame: &mut XmlElement) -> Option<&mut XmlElement> {
    graphic_frame.child_path_mut(&["graphic", "graphicData", "tbl"])
}

/// Rows of a table.
pub fn rows(tbl: &XmlElement) -> impl Iterator<Item = &XmlElement> {
    tbl.elements().filter(|e| e.is("tr"))
}

/// Cells of a row.
pub fn cells(tr: &XmlElement) -> impl Iterator<Item = &XmlElement> {
    tr.elements().filter(|e| e.is("tc"))
}

/// `(rows, columns)` of a table. Columns are counted on the first row.
pub fn dimensions(tbl: &XmlElement) -> (usize, usize) {
    let row_count = rows(tbl).count();
    let col_count = rows(tbl).next().map(|tr| cells(tr).count()).unwrap_or(0);
    (row_count, col_count)
}

/// Text of a cell, paragraphs joined with `\n`.
pub fn cell_text(tc: &XmlElement) -> String {
    tc.child("txBody").map(textframe::frame_text).unwrap_or_default()
}

/// Text of every cell, row-major.
pub fn grid_text(tbl: &XmlElement) -> Vec<Vec<String>> {
    rows(tbl).map(|tr| cells(tr).map(cell_text).collect()).collect()
}

/// Mutable access to the cell at `(row, col)`.
pub fn cell_mut(tbl: &mut XmlElement, row: usize, col: usize) -> Option<&mut XmlElement> {
    tbl.elements_mut()
        .filter(|e| e.is("tr"))
        .nth(row)?
        .elements_mut()
        .filter(|e| e.is("tc"))
        .nth(col)
}

/// Rebuild a cell's text as a single paragraph.
///
/// A cell without a text body gets one, placed before `a:tcPr` as the
/// schema requires.
pub fn set_cell_text(tc: &mut XmlElement, text: &str) {
    if tc.child("txBody").is_none() {
        let at = tc.position_of("tcPr").unwrap_or(tc.children().len());
        tc.insert_child(at, textframe::empty_text_body("a:txBody"));
    }
    if let Some(tx_body) = tc.child_mut("txBody") {
        textframe::set_text(tx_body, text);
    }
}

/// Whether any cell of the table contains `needle`.
pub fn contains_text(tbl: &XmlElement, needle: &str) -> bool {
    rows(tbl).flat_map(cells).any(|tc| cell_text(tc).contains(needle))
}
