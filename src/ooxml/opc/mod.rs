/// Open Packaging Conventions (OPC) implementation.
///
/// This module provides the package substrate of a `.pptx` file:
///
/// - Package structure (parts, relationships)
/// - Content type management
/// - ZIP-based physical packaging
/// - Reachability from the package relationships, used to drop orphaned parts
///
/// # Performance Features
///
/// - Uses `memchr` for fast byte searching in part content
/// - Uses `atoi_simd` for fast integer parsing of relationship ids
/// - Uses `quick-xml` for streaming parsing of `.rels` and content types

pub mod constants;
pub mod error;
pub mod package;
pub mod packuri;
pub mod part;
pub mod phys_pkg;
pub mod pkgreader;
pub mod pkgwriter;
pub mod rel;

// Re-export commonly used types
pub use package::OpcPackage;
pub use packuri::PackURI;
pub use part::{BlobPart, Part, XmlPart};
pub use rel::{Relationship, Relationships};
