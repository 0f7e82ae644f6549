//! Slide annotations stored in speaker notes.
//!
//! A template slide declares what it is by carrying a JSON object in its
//! notes:
//!
//! ```json
//! {
//!   "slide_type": "content",
//!   "description": "Heading with bullet points",
//!   "placeholders": {
//!     "heading": {"type": "text", "description": "Slide heading"},
//!     "bullets": {"type": "list"}
//!   }
//! }
//! ```
//!
//! PowerPoint's autocorrect turns straight quotes into typographic ones while
//! the author types, so those are folded back before parsing.
use crate::ooxml::error::Result;
use crate::ooxml::opc::packuri::PackURI;
use crate::ooxml::pptx::Package;
use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

static QUOTE_FOLDER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["\u{201c}", "\u{201d}", "\u{2018}", "\u{2019}"])
        .expect("Failed to build quote folder")
});

/// Declared type of a field. Drives how the value is written into the slide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    #[default]
    Text,
    Paragraph,
    Number,
    Date,
    List,
    Table,
    Image,
    /// Anything else, kept verbatim
    Other(String),
}

impl FieldType {
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Text => "text",
            FieldType::Paragraph => "paragraph",
            FieldType::Number => "number",
            FieldType::Date => "date",
            FieldType::List => "list",
            FieldType::Table => "table",
            FieldType::Image => "image",
            FieldType::Other(s) => s,
        }
    }

    /// Types rendered as plain text replacement.
    pub fn is_textual(&self) -> bool {
        matches!(
            self,
            FieldType::Text | FieldType::Paragraph | FieldType::Number | FieldType::Date
        )
    }
}

impl From<String> for FieldType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "text" => FieldType::Text,
            "paragraph" => FieldType::Paragraph,
            "number" => FieldType::Number,
            "date" => FieldType::Date,
            "list" => FieldType::List,
            "table" => FieldType::Table,
            "image" => FieldType::Image,
            _ => FieldType::Other(s),
        }
    }
}

impl From<FieldType> for String {
    fn from(t: FieldType) -> Self {
        match t {
            FieldType::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field declared by a slide annotation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldDescriptor {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub field_type: FieldType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
}

/// The parsed annotation of a template slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideMetadata {
    pub slide_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub placeholders: BTreeMap<String, FieldDescriptor>,
}

impl SlideMetadata {
    /// Parse annotation text. Returns `None` for blank text, invalid JSON, or
    /// an object without a string `slide_type`.
    pub fn parse(notes: &str) -> Option<Self> {
        let notes = notes.trim();
        if notes.is_empty() {
            return None;
        }

        let folded = QUOTE_FOLDER.replace_all(notes, &["\"", "\"", "'", "'"]);
        let value = match serde_json::from_str::<serde_json::Value>(&folded) {
            Ok(value @ serde_json::Value::Object(_)) => value,
            Ok(_) => {
                tracing::debug!("notes annotation is not a JSON object");
                return None;
            },
            Err(e) => {
                tracing::debug!(error = %e, "notes are not a slide annotation");
                return None;
            },
        };
        match serde_json::from_value(value) {
            Ok(metadata) => Some(metadata),
            Err(e) => {
                tracing::debug!(error = %e, "notes object is not a slide annotation");
                None
            },
        }
    }

    /// Declared type of `field`, `text` when undeclared.
    pub fn field_type(&self, field: &str) -> FieldType {
        self.placeholders
            .get(field)
            .map(|d| d.field_type.clone())
            .unwrap_or_default()
    }

    /// Number of declared placeholder names among `requested`.
    pub fn overlap<'a, I>(&self, requested: I) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        requested
            .into_iter()
            .filter(|name| self.placeholders.contains_key(*name))
            .count()
    }
}

/// Read the annotation of a slide in `package`.
pub fn extract(package: &Package, slide: &PackURI) -> Result<Option<SlideMetadata>> {
    let Some(notes) = package.notes_text(slide)? else {
        return Ok(None);
    };
    let metadata = SlideMetadata::parse(&notes);
    if metadata.is_none() {
        tracing::debug!(slide = %slide, "slide has notes but no annotation");
    }
    Ok(metadata)
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
