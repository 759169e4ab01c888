//! Page addressing for the paginated listing endpoint.

use super::error::DomainError;

/// Default number of exchanges requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// A validated 1-based page request.
///
/// The listing endpoint is addressed by a 1-based `start` offset, so page
/// `n` maps to `offset = (n - 1) * size + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    number: u32,
    size: u32,
}

impl Page {
    /// Create a page request, rejecting page 0 and empty pages.
    pub fn try_new(number: u32, size: u32) -> Result<Self, DomainError> {
        if number == 0 {
            return Err(DomainError::InvalidPage { page: number });
        }
        if size == 0 {
            return Err(DomainError::EmptyPageSize);
        }
        Ok(Self { number, size })
    }

    /// The 1-based page number.
    #[must_use]
    pub const fn number(&self) -> u32 {
        self.number
    }

    /// Number of entries requested for this page.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Remote `start` offset for this page (1-based).
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.number as u64 - 1) * self.size as u64 + 1
    }

    /// Whether a listing that returned `returned` entries may have a next page.
    #[must_use]
    pub const fn has_more(&self, returned: usize) -> bool {
        returned as u64 >= self.size as u64
    }
}
