/// Error types for presentation-level operations.
use thiserror::Error;

/// Result type for presentation-level operations.
pub type Result<T> = std::result::Result<T, PptxError>;

#[derive(Error, Debug)]
pub enum PptxError {
    /// OPC package error
    #[error("OPC error: {0}")]
    Opc(#[from] crate::opc::error::OpcError),

    /// XML parsing error
    #[error("XML error: {0}")]
    Xml(String),

    /// Part not found
    #[error("Part not found: {0}")]
    PartNotFound(String),

    /// Invalid content type
    #[error("Invalid content type: expected {expected}, got {got}")]
    InvalidContentType { expected: String, got: String },

    /// Template is missing a structural part (master, layout)
    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    /// Layout declares a placeholder type this crate does not know
    #[error("Unknown placeholder type '{0}'")]
    UnknownPlaceholder(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<quick_xml::Error> for PptxError {
    fn from(err: quick_xml::Error) -> Self {
        PptxError::Xml(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for PptxError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        PptxError::Xml(err.to_string())
    }
}
