use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("offset must not be negative, got {0}")]
    NegativeOffset(i64),

    #[error("limit must not be negative, got {0}")]
    NegativeLimit(i64),
}

/// Offset/limit window applied to listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    offset: i64,
    limit: i64,
}

impl Page {
    pub const DEFAULT_OFFSET: i64 = 0;
    pub const DEFAULT_LIMIT: i64 = 10;

    /// Build a page from optional query values, falling back to offset 0 and
    /// limit 10.
    pub fn new(offset: Option<i64>, limit: Option<i64>) -> Result<Self, PageError> {
        let offset = offset.unwrap_or(Self::DEFAULT_OFFSET);
        let limit = limit.unwrap_or(Self::DEFAULT_LIMIT);

        if offset < 0 {
            return Err(PageError::NegativeOffset(offset));
        }
        if limit < 0 {
            return Err(PageError::NegativeLimit(limit));
        }

        Ok(Self { offset, limit })
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// Apply the window to an already ordered sequence.
    pub fn slice<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.offset as usize)
            .take(self.limit as usize)
            .collect()
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            offset: Self::DEFAULT_OFFSET,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}
