use std::fmt;

use thiserror::Error;

/// Coarse classification used by the UI to decide how to surface a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    StoreUnavailable,
    Unauthenticated,
    InvalidTransition,
    InvalidInput,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::NotFound => "not found",
            ErrorKind::StoreUnavailable => "store unavailable",
            ErrorKind::Unauthenticated => "unauthenticated",
            ErrorKind::InvalidTransition => "invalid transition",
            ErrorKind::InvalidInput => "invalid input",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Error)]
pub enum DashError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("no user is signed in")]
    Unauthenticated,
    #[error("invalid transition: {0}")]
    InvalidTransition(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type DashResult<T> = Result<T, DashError>;

impl DashError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DashError::NotFound(_) => ErrorKind::NotFound,
            DashError::StoreUnavailable(_) => ErrorKind::StoreUnavailable,
            DashError::Unauthenticated => ErrorKind::Unauthenticated,
            DashError::InvalidTransition(_) => ErrorKind::InvalidTransition,
            DashError::InvalidInput(_) => ErrorKind::InvalidInput,
        }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        DashError::NotFound(what.into())
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        DashError::InvalidInput(msg.into())
    }
}

impl From<rusqlite::Error> for DashError {
    fn from(err: rusqlite::Error) -> Self {
        DashError::StoreUnavailable(err.to_string())
    }
}

impl From<serde_json::Error> for DashError {
    fn from(err: serde_json::Error) -> Self {
        DashError::StoreUnavailable(format!("malformed document: {err}"))
    }
}
