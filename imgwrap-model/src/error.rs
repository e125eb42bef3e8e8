/// Errors produced while parsing model values from raw labels.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// A resource reported a status label outside `pending|error|ready`.
    #[error("unknown resource status: {0:?}")]
    UnknownStatus(String),

    /// An attribute name outside the fixed image attribute table.
    #[error("unknown image attribute: {0:?}")]
    UnknownAttribute(String),
}
