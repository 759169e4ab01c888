//! Domain validation errors for core domain types.

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Page numbers are 1-based.
    #[error("page must be at least 1, got {page}")]
    InvalidPage {
        /// The invalid page number that was requested.
        page: u32,
    },

    /// Page size must be positive.
    #[error("page size must be positive")]
    EmptyPageSize,
}
