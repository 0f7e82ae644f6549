//! Slide specifications: what the caller asks the composer to build.
//!
//! Specifications are plain JSON:
//!
//! ```json
//! [
//!   {"slide_type": "title_page", "fields": {"title": "Q3 Review"}},
//!   {"slide_type": "content", "fields": {"heading": "Wins", "bullets": ["a", "b"]}}
//! ]
//! ```
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One slide to build: a declared slide type plus the values of its fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideSpec {
    pub slide_type: String,
    /// Field name -> value. Populated in name order.
    #[serde(default)]
    pub fields: BTreeMap<String, FieldValue>,
}

impl SlideSpec {
    pub fn new(slide_type: impl Into<String>) -> Self {
        Self {
            slide_type: slide_type.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field assignment.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Parse a JSON array of specifications.
    pub fn list_from_json(json: &str) -> serde_json::Result<Vec<SlideSpec>> {
        serde_json::from_str(json)
    }
}

/// A single JSON scalar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl Scalar {
    /// Text written into the slide. `null` renders as nothing, booleans as
    /// `True`/`False`.
    pub fn to_text(&self) -> String {
        match self {
            Scalar::Null => String::new(),
            Scalar::Bool(true) => "True".to_string(),
            Scalar::Bool(false) => "False".to_string(),
            Scalar::Number(n) => n.to_string(),
            Scalar::Text(s) => s.clone(),
        }
    }
}

/// Value of one field: a scalar, a list of scalars (list fields) or a grid of
/// scalars (table fields).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Scalar(Scalar),
    List(Vec<Scalar>),
    Table(Vec<Vec<Scalar>>),
}

impl FieldValue {
    /// Flatten to a single string for text fields.
    ///
    /// List items are joined with `", "`, table rows with `"; "`.
    pub fn to_text(&self) -> String {
        match self {
            FieldValue::Scalar(s) => s.to_text(),
            FieldValue::List(items) => join(items, ", "),
            FieldValue::Table(rows) => rows
                .iter()
                .map(|row| join(row, ", "))
                .collect::<Vec<_>>()
                .join("; "),
        }
    }

    /// Items for list fields: one per list element, one per table row, or the
    /// scalar alone.
    pub fn items(&self) -> Vec<String> {
        match self {
            FieldValue::Scalar(s) => vec![s.to_text()],
            FieldValue::List(items) => items.iter().map(Scalar::to_text).collect(),
            FieldValue::Table(rows) => rows.iter().map(|row| join(row, ", ")).collect(),
        }
    }

    /// Cell grid for table fields. A list is a single column; a scalar is a
    /// single cell.
    pub fn rows(&self) -> Vec<Vec<String>> {
        match self {
            FieldValue::Scalar(s) => vec![vec![s.to_text()]],
            FieldValue::List(items) => items.iter().map(|item| vec![item.to_text()]).collect(),
            FieldValue::Table(rows) => rows
                .iter()
                .map(|row| row.iter().map(Scalar::to_text).collect())
                .collect(),
        }
    }
}

fn join(items: &[Scalar], sep: &str) -> String {
    items.iter().map(Scalar::to_text).collect::<Vec<_>>().join(sep)
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Scalar(Scalar::Text(s.to_string()))
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Scalar(Scalar::Text(s))
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(items: Vec<&str>) -> Self {
        FieldValue::List(items.into_iter().map(|s| Scalar::Text(s.to_string())).collect())
    }
}

impl From<Vec<Vec<&str>>> for FieldValue {
    fn from(rows: Vec<Vec<&str>>) -> Self {
        FieldValue::Table(
            rows.into_iter()
                .map(|row| row.into_iter().map(|s| Scalar::Text(s.to_string())).collect())
                .collect(),
        )
    }
}
