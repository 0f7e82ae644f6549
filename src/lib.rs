//! Longan - template-driven PowerPoint composition
//!
//! This library assembles new `.pptx` presentations out of the annotated
//! slides of a template deck. Each reusable template slide carries a small
//! JSON annotation in its speaker notes declaring a *slide type* and the
//! `{{field}}` tokens it exposes; callers ask for an ordered list of slide
//! types with field values and get back a presentation built from the
//! matching slides, in that order, with repetition and omission allowed.
//!
//! # Features
//!
//! - **Slide catalog**: annotated template slides grouped by slide type
//! - **Selection**: among same-type slides, the one declaring the most requested fields wins
//! - **Cloning**: placeholders, pictures, text boxes, auto shapes, tables and
//!   groups are rebuilt on the same layout of the output deck
//! - **Population**: text, list and table fields written into the copies
//! - **Diagnostics**: skipped shapes and unapplied fields are reported, not swallowed
//! - **Basic substitution**: plain `{{field}}` replacement over a whole deck
//!
//! # Example - Composing a presentation
//!
//! ```no_run
//! use longan::{Composer, ComposerConfig, SlideSpec};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let composer = Composer::new(ComposerConfig::default());
//!
//! // List what the template offers
//! for info in composer.slide_types("templates/quarterly.pptx")? {
//!     println!("{} ({}): {}", info.slide_type, info.slide_index, info.description);
//! }
//!
//! let specs = SlideSpec::list_from_json(
//!     r#"[
//!         {"slide_type": "title_page", "fields": {"title": "Q3 Review"}},
//!         {"slide_type": "content", "fields": {"heading": "Wins", "bullets": ["Revenue", "Churn"]}},
//!         {"slide_type": "closing"}
//!     ]"#,
//! )?;
//! let report = composer.compose("templates/quarterly.pptx", &specs, "out/q3.pptx")?;
//! for (slide, outcome) in report.unapplied() {
//!     println!("slide {}: {} was {:?}", slide, outcome.field, outcome.status);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Plain substitution
//!
//! ```no_run
//! use longan::compose::FieldValue;
//! use std::collections::BTreeMap;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let template = std::fs::read("templates/letter.pptx")?;
//! let fields = BTreeMap::from([("name".to_string(), FieldValue::from("Ada"))]);
//! std::fs::write("out/letter.pptx", longan::substitute::render(&template, &fields)?)?;
//! # Ok(())
//! # }
//! ```

/// Shared utilities (owned XML tree)
pub mod common;

/// Slide catalog, selection, cloning and population
pub mod compose;

/// Composer configuration and output naming
pub mod config;

/// OOXML packaging (OPC) and PresentationML
///
/// This module provides the package reader/writer and the slide, layout and
/// shape access the composer is built on.
pub mod ooxml;

/// Whole-deck `{{field}}` substitution and field discovery
pub mod substitute;

// Re-export commonly used types for convenience
pub use compose::{ComposeError, Composer, CompositionReport, SlideSpec, SlideTypeInfo};
pub use config::{ComposerConfig, OutputNamer};
