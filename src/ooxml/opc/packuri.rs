/// The PackURI value type: an absolute part name inside an OPC package.
///
/// Part names always begin with a forward slash and use forward slashes as
/// separators (`/ppt/slides/slide1.xml`). Relationship targets are stored
/// relative to the source part's directory and resolved through
/// [`PackURI::from_rel_ref`].
use super::error::{OpcError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackURI {
    uri: String,
}

/// The package pseudo-partname, representing the package itself
pub const PACKAGE_URI: &str = "/";

/// The URI for the [Content_Types].xml part
pub const CONTENT_TYPES_URI: &str = "/[Content_Types].xml";

impl PackURI {
    /// Create a PackURI, rejecting names without a leading slash.
    pub fn new<S: Into<String>>(uri: S) -> Result<Self> {
        let uri = uri.into();
        if !uri.starts_with('/') {
            return Err(OpcError::InvalidPackUri(format!(
                "part name must begin with '/', got '{}'",
                uri
            )));
        }
        Ok(PackURI { uri })
    }

    /// Resolve a relationship target (`../slideLayouts/slideLayout2.xml`)
    /// against the directory of its source part (`/ppt/slides`).
    pub fn from_rel_ref(base_uri: &str, relative_ref: &str) -> Result<Self> {
        // Absolute targets ignore the base
        let joined = if relative_ref.starts_with('/') {
            relative_ref.to_string()
        } else if base_uri.ends_with('/') {
            format!("{}{}", base_uri, relative_ref)
        } else {
            format!("{}/{}", base_uri, relative_ref)
        };

        let mut segments: Vec<&str> = Vec::new();
        for segment in joined.split('/') {
            match segment {
                "" | "." => {},
                ".." => {
                    segments.pop();
                },
                other => segments.push(other),
            }
        }

        Self::new(format!("/{}", segments.join("/")))
    }

    /// Expand a `%d` template such as `/ppt/slides/slide%d.xml`.
    pub fn from_template(template: &str, n: u32) -> Result<Self> {
        let mut buf = itoa::Buffer::new();
        Self::new(template.replacen("%d", buf.format(n), 1))
    }

    /// Directory portion: `/ppt/slides` for `/ppt/slides/slide1.xml`.
    pub fn base_uri(&self) -> &str {
        match self.uri.rsplit_once('/') {
            Some(("", _)) | None => "/",
            Some((dir, _)) => dir,
        }
    }

    /// File name portion: `slide1.xml` for `/ppt/slides/slide1.xml`.
    pub fn filename(&self) -> &str {
        self.uri.rsplit_once('/').map_or("", |(_, name)| name)
    }

    /// Extension without the leading period.
    pub fn ext(&self) -> &str {
        self.filename().rsplit_once('.').map_or("", |(_, ext)| ext)
    }

    /// Numeric suffix of tuple part names (`slide21.xml` -> 21).
    pub fn idx(&self) -> Option<u32> {
        let stem = self
            .filename()
            .rsplit_once('.')
            .map_or(self.filename(), |(stem, _)| stem);
        let digits = stem.trim_start_matches(|c: char| !c.is_ascii_digit());
        if digits.is_empty() || digits.len() == stem.len() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        atoi_simd::parse::<u32, false, false>(digits.as_bytes()).ok()
    }

    /// ZIP member name (leading slash stripped).
    pub fn membername(&self) -> &str {
        &self.uri[1..]
    }

    /// Relative reference from `base_uri` to this part, as written in `.rels`.
    pub fn relative_ref(&self, base_uri: &str) -> String {
        if base_uri == PACKAGE_URI {
            return self.membername().to_string();
        }

        let from: Vec<&str> = base_uri.split('/').filter(|s| !s.is_empty()).collect();
        let to: Vec<&str> = self.uri.split('/').filter(|s| !s.is_empty()).collect();
        let common = from.iter().zip(&to).take_while(|(a, b)| a == b).count();

        let mut parts: Vec<&str> = vec![".."; from.len() - common];
        parts.extend_from_slice(&to[common..]);
        parts.join("/")
    }

    /// Part name of the relationships part belonging to this part.
    pub fn rels_uri(&self) -> Result<PackURI> {
        let dir = self.base_uri();
        let uri = if dir == PACKAGE_URI {
            format!("/_rels/{}.rels", self.filename())
        } else {
            format!("{}/_rels/{}.rels", dir, self.filename())
        };
        Self::new(uri)
    }

    pub fn as_str(&self) -> &str {
        &self.uri
    }
}

impl std::fmt::Display for PackURI {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.uri)
    }
}

impl AsRef<str> for PackURI {
    fn as_ref(&self) -> &str {
        &self.uri
    }
}
