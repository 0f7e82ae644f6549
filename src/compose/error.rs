/// Error types for presentation composition.
use thiserror::Error;

/// Result type for composition operations.
pub type Result<T> = std::result::Result<T, ComposeError>;

/// Error types for presentation composition.
#[derive(Error, Debug)]
pub enum ComposeError {
    /// A requested slide type is not declared by any template slide
    #[error("unknown slide type '{requested}', available: {}", available.join(", "))]
    UnknownSlideType { requested: String, available: Vec<String> },

    /// The output package has no layout a new slide could be built on
    #[error("no slide layout available for '{layout}'")]
    LayoutNotFound { layout: String },

    /// Template file does not exist
    #[error("template not found: {0}")]
    TemplateNotFound(String),

    /// Package or PresentationML error
    #[error("OOXML error: {0}")]
    Ooxml(#[from] crate::ooxml::error::OoxmlError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Malformed slide specifications
    #[error("invalid slide specification: {0}")]
    Spec(#[from] serde_json::Error),
}

impl From<crate::ooxml::opc::error::OpcError> for ComposeError {
    fn from(err: crate::ooxml::opc::error::OpcError) -> Self {
        ComposeError::Ooxml(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_slide_type_message() {
        let err = ComposeError::UnknownSlideType {
            requested: "agenda".to_string(),
            available: vec!["title_page".to_string(), "closing".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "unknown slide type 'agenda', available: title_page, closing"
        );
    }
}
