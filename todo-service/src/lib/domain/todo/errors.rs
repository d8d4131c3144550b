use thiserror::Error;

use crate::domain::access::AccessError;
use crate::domain::page::PageError;
use crate::domain::todo::models::TodoId;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TodoTitleError {
    #[error("Title must not be empty")]
    Empty,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TodoStateError {
    #[error("Unknown state '{0}', expected one of: draft, todo, doing, done, trash")]
    Unknown(String),
}

/// Top-level error for all to-do operations
#[derive(Debug, Clone, Error)]
pub enum TodoError {
    #[error("Invalid title: {0}")]
    InvalidTitle(#[from] TodoTitleError),

    #[error("Invalid state: {0}")]
    InvalidState(#[from] TodoStateError),

    #[error("Invalid page: {0}")]
    InvalidPage(#[from] PageError),

    #[error(transparent)]
    Forbidden(#[from] AccessError),

    #[error("Task with id {0} not found")]
    NotFound(TodoId),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
