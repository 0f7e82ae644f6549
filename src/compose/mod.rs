//! Template-driven presentation composition.
//!
//! A template deck holds reusable slides, each annotated in its speaker notes
//! with a small JSON document naming its slide type and fields:
//!
//! ```json
//! {"slide_type": "content", "description": "Bulleted content",
//!  "placeholders": {"heading": {"type": "text"}, "bullets": {"type": "list"}}}
//! ```
//!
//! [`Composer`] turns a list of [`SlideSpec`]s into a new deck: for every spec
//! it picks the best matching template slide ([`selector`]), rebuilds it on
//! the same layout in the output ([`cloner`]) and writes the field values into
//! the `{{field}}` tokens of the copy ([`populate`]).
pub mod catalog;
pub mod cloner;
pub mod composer;
pub mod error;
pub mod metadata;
pub mod populate;
pub mod report;
pub mod selector;
pub mod spec;

pub use catalog::{SlideCatalog, SlideCatalogEntry, SlideTypeInfo};
pub use composer::Composer;
pub use error::{ComposeError, Result};
pub use metadata::{FieldDescriptor, FieldType, SlideMetadata};
pub use report::{CompositionReport, FieldOutcome, FieldStatus, SkipReason, SkippedShape, SlideReport};
pub use spec::{FieldValue, Scalar, SlideSpec};
