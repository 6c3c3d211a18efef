use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    #[error("selector parse error in '{0}': {1}")]
    Parse(String, String),
}
