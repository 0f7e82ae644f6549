/// Parts for PowerPoint presentation documents.
///
/// This module contains read-only views over the XML parts of a .pptx
/// package, following the structure of the python-pptx library.
pub mod presentation;
pub mod slide;

pub use presentation::PresentationPart;
pub use slide::{NotesSlidePart, SlideLayoutPart, SlideMasterPart, SlidePart};
