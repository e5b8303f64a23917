/// Errors raised by palette indexing and selection lookups.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A selection target (name or color) is not part of the index.
    #[error("not found: {0}")]
    NotFound(String),
    /// An argument the operation cannot interpret.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, Error>;
