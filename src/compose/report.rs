//! Diagnostics collected while composing.
use crate::ooxml::pptx::ShapeKind;
use serde::Serialize;
use std::fmt;

use super::metadata::FieldType;

/// Why a template shape did not make it onto the new slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    /// An auto shape without text
    Decorative,
    /// Connectors and line presets
    Connector,
    /// Charts, diagrams, OLE objects
    Unsupported,
    /// Neither the shape nor its layout placeholder has a position
    MissingGeometry,
    /// The image could not be read or stored
    Image(String),
    /// The shape refers to another part that cannot be carried over
    Relationship(String),
    Failed(String),
}

impl SkipReason {
    /// Intentional drops, as opposed to copy failures.
    pub fn is_intentional(&self) -> bool {
        matches!(self, SkipReason::Decorative | SkipReason::Connector | SkipReason::Unsupported)
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Decorative => f.write_str("decorative shape without text"),
            SkipReason::Connector => f.write_str("connector"),
            SkipReason::Unsupported => f.write_str("unsupported graphic frame"),
            SkipReason::MissingGeometry => f.write_str("no position or size"),
            SkipReason::Image(e) => write!(f, "image: {}", e),
            SkipReason::Relationship(e) => write!(f, "relationship: {}", e),
            SkipReason::Failed(e) => write!(f, "{}", e),
        }
    }
}

/// A template shape left out of a composed slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedShape {
    pub shape_name: String,
    pub kind: ShapeKind,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldStatus {
    Applied,
    /// No shape on the slide carries the field's token
    NotFound,
    /// The declared type has no writer
    Unsupported,
}

/// What happened to one field of a slide specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldOutcome {
    pub field: String,
    pub field_type: FieldType,
    pub status: FieldStatus,
}

/// Diagnostics for one composed slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlideReport {
    /// Position in the output
    pub index: usize,
    pub slide_type: String,
    /// Template slide the content was copied from
    pub template_index: usize,
    pub layout: String,
    pub skipped: Vec<SkippedShape>,
    pub fields: Vec<FieldOutcome>,
}

impl SlideReport {
    pub fn field_status(&self, field: &str) -> Option<FieldStatus> {
        self.fields.iter().find(|o| o.field == field).map(|o| o.status)
    }
}

/// Diagnostics for a whole composition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompositionReport {
    /// Where the presentation was written, if it was
    pub output: Option<std::path::PathBuf>,
    pub slides: Vec<SlideReport>,
}

impl CompositionReport {
    pub fn skipped_count(&self) -> usize {
        self.slides.iter().map(|s| s.skipped.len()).sum()
    }

    /// Fields that were not applied, as `(slide index, outcome)`.
    pub fn unapplied(&self) -> impl Iterator<Item = (usize, &FieldOutcome)> {
        self.slides.iter().flat_map(|s| {
            s.fields
                .iter()
                .filter(|o| o.status != FieldStatus::Applied)
                .map(move |o| (s.index, o))
        })
    }
}
