use thiserror::Error;

/// Failures surfaced to the client. Everything else in the pipeline
/// degrades quietly: a caret outside any container is a no-op, an
/// unresolvable type becomes a default literal, a bad name suffix stays
/// unsuffixed.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The feature refuses to activate without an open, tracked document.
    #[error("document is not open in the workspace: {0}")]
    DocumentNotOpen(String),

    #[error("document could not be parsed")]
    Unparseable,

    #[error("invalid command arguments: {0}")]
    InvalidArguments(String),

    #[error("position {line}:{character} is outside the document")]
    PositionOutOfBounds { line: u32, character: u32 },
}

pub type Result<T> = std::result::Result<T, GenerateError>;
