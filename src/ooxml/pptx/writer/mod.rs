//! Mutable presentation writer components for PPTX.
//!
//! A [`MutablePresentation`] is created from a template package. New slides
//! are built from the template's layouts as [`MutableSlide`]s, and shapes are
//! generated with [`MutableShape`] or copied in as element trees.

pub mod pres;
pub mod shape;
pub mod slide;

// Re-export main types
pub use pres::{MutablePresentation, PartStore};
pub use shape::MutableShape;
pub use slide::MutableSlide;
