//! Page request and page result types shared by list operations.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest page size accepted by list operations.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Page size used when the caller does not specify one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Error returned for an unusable page request.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("page size must be between 1 and {MAX_PAGE_SIZE}, got {0}")]
pub struct InvalidPageSize(pub u32);

/// Zero-based page request.
///
/// The page number doubles as the opaque continuation token handed back to
/// clients. Deserialization applies the same size bounds as [`Self::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPageRequest")]
pub struct PageRequest {
    page: u32,
    size: u32,
}

#[derive(Deserialize)]
struct RawPageRequest {
    #[serde(default)]
    page: u32,
    #[serde(default = "default_page_size")]
    size: u32,
}

const fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl TryFrom<RawPageRequest> for PageRequest {
    type Error = InvalidPageSize;

    fn try_from(raw: RawPageRequest) -> Result<Self, Self::Error> {
        Self::new(raw.page, raw.size)
    }
}

impl PageRequest {
    /// Creates a validated page request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPageSize`] when `size` is zero or above
    /// [`MAX_PAGE_SIZE`].
    pub const fn new(page: u32, size: u32) -> Result<Self, InvalidPageSize> {
        if size == 0 || size > MAX_PAGE_SIZE {
            return Err(InvalidPageSize(size));
        }
        Ok(Self { page, size })
    }

    /// Returns the first page with the default size.
    #[must_use]
    pub const fn first() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Returns the zero-based page number.
    #[must_use]
    pub const fn page(self) -> u32 {
        self.page
    }

    /// Returns the page size.
    #[must_use]
    pub const fn size(self) -> u32 {
        self.size
    }

    /// Returns the request for the following page.
    #[must_use]
    pub const fn next(self) -> Self {
        Self {
            page: self.page.saturating_add(1),
            size: self.size,
        }
    }

    /// Number of items preceding this page.
    #[must_use]
    pub fn offset(self) -> usize {
        let offset = u64::from(self.page).saturating_mul(u64::from(self.size));
        usize::try_from(offset).unwrap_or(usize::MAX)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Whether another page follows.
    pub has_more: bool,
    /// Total number of items across all pages.
    pub total: u64,
}

impl<T> Page<T> {
    /// Slices an already-ordered collection into the requested page.
    #[must_use]
    pub fn paginate(all: Vec<T>, request: PageRequest) -> Self {
        let total = all.len();
        let offset = request.offset().min(total);
        let size = usize::try_from(request.size()).unwrap_or(usize::MAX);
        let items: Vec<T> = all.into_iter().skip(offset).take(size).collect();
        let has_more = offset.saturating_add(items.len()) < total;
        Self {
            items,
            has_more,
            total: u64::try_from(total).unwrap_or(u64::MAX),
        }
    }

    /// Maps every item, keeping the paging metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            has_more: self.has_more,
            total: self.total,
        }
    }
}
