//! Office Open XML (OOXML) support for PowerPoint presentations.
//!
//! The module is organized in two layers:
//!
//! 1. **OPC Layer** (`opc`): Low-level package handling (ZIP, parts, relationships)
//! 2. **PresentationML** (`pptx`): slides, layouts, notes, shapes and the
//!    writer used to assemble new slides
//!
//! # Example
//!
//! ```rust,no_run
//! use longan::ooxml::pptx::Package;
//!
//! let pkg = Package::open("deck.pptx")?;
//! for slide in pkg.slide_partnames()? {
//!     println!("{}: {:?}", slide, pkg.notes_text(&slide)?);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod error;
pub mod opc;
pub mod pptx;

// Re-export commonly used types from OPC layer
pub use opc::{OpcPackage, PackURI};

// Re-export error types
pub use error::{OoxmlError, Result};
