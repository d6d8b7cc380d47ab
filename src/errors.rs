use thiserror::Error;

use crate::repo::{EntryType, ItemType, RepoError};

/// Application-level errors.
#[derive(Error, Debug)]
pub enum AppError {
    /// Terminal or input source failure; ends the interactive loop
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Repository error: {0}")]
    Repo(RepoError),

    #[error("Invalid location: {0}")]
    Validation(String),

    #[error("Cannot copy {item_type} '{name}': target is a {existing}")]
    TargetTypeConflict {
        name: String,
        item_type: ItemType,
        existing: EntryType,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Canceled")]
    Canceled,

    #[error("Configuration error: {0}")]
    Config(String),

    /// Editing through an external program failed
    #[error("Edit failed: {0}")]
    Edit(String),
}

impl AppError {
    /// Only a broken terminal or input source stops the application
    pub fn is_fatal(&self) -> bool {
        matches!(self, AppError::Io(_))
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(what) => AppError::NotFound(what),
            RepoError::InvalidLocation(what) => AppError::Validation(what),
            other => AppError::Repo(other),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
