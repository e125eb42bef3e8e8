/// Errors raised by consumer lifecycle transitions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConsumerError {
    /// The consumer was detached; teardown is terminal.
    #[error("image consumer for {image:?} was already torn down")]
    TornDown { image: Option<String> },
}

pub type Result<T> = std::result::Result<T, ConsumerError>;
