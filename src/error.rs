use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("index {index} is out of bounds for a list of {len} entries")]
    OutOfBounds { index: usize, len: usize },

    #[error("queried documents are read-only")]
    ReadOnly,
}
