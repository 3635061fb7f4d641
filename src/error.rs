/// Crate-level error type.
///
/// Wraps the per-layer errors so binaries can hold one `Result` end to end.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Opc(#[from] crate::opc::error::OpcError),

    #[error(transparent)]
    Pptx(#[from] crate::pptx::error::PptxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
