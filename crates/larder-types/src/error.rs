use thiserror::Error;

/// Errors produced while building records from client input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("{field} is required")]
    MissingField { field: &'static str },
}

pub type TypeResult<T> = Result<T, TypeError>;
