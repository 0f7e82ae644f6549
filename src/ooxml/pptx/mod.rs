//! PowerPoint (.pptx) presentation support.
//!
//! Reading goes through [`Package`], which exposes slides, layouts and notes
//! as thin views over the parsed parts. Writing goes through
//! [`MutablePresentation`], which starts from a template package, drops its
//! slides and builds new ones on the template's layouts.
//!
//! # Example
//!
//! ```rust,no_run
//! use longan::ooxml::pptx::{MutablePresentation, Package};
//!
//! let template = std::fs::read("template.pptx")?;
//! let pkg = Package::from_bytes(&template)?;
//! for partname in pkg.slide_partnames()? {
//!     println!("{}: {:?}", partname, pkg.slide(&partname)?.texts());
//! }
//!
//! let mut pres = MutablePresentation::from_template_bytes(&template)?;
//! let layout = pres.layouts()[0].partname.clone();
//! pres.add_slide(&layout, &[])?;
//! std::fs::write("out.pptx", pres.to_bytes()?)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod format;
pub mod package;
pub mod parts;
pub mod shapes;
pub mod writer;

#[cfg(test)]
pub(crate) mod fixture;

pub use format::ImageFormat;
pub use package::{LayoutInfo, Package};
pub use parts::{NotesSlidePart, PresentationPart, SlideLayoutPart, SlideMasterPart, SlidePart};
pub use shapes::{Geometry, Placeholder, ShapeKind, TextParagraph};
pub use writer::{MutablePresentation, MutableShape, MutableSlide, PartStore};
