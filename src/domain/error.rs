//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::entities::UserId;

/// Domain errors represent lookups and ingestion rules that failed.
/// Every failure is returned to the caller; none is fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("user not found: {0}")]
    NotFound(UserId),

    #[error("user already exists: {0}")]
    Duplicate(UserId),

    #[error("user capacity exceeded: at most {0} users")]
    CapacityExceeded(usize),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
