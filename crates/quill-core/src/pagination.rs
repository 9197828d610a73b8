//! Page-number pagination.
//!
//! Page count is `max(1, ceil(count / page_size))`, so page 1 of an empty listing
//! is always valid. Anything else outside `1..=num_pages` is a `PageNotFound`.

use crate::error::DomainError;

const INVALID_PAGE: &str = "Invalid page.";

/// Keyword accepted in place of a number to request the final page.
pub const LAST_PAGE: &str = "last";

/// A requested page, as parsed from the `page` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRequest {
    Number(u64),
    Last,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::Number(1)
    }
}

impl PageRequest {
    /// Parse the raw `page` parameter. An absent parameter means page 1.
    pub fn parse(raw: Option<&str>) -> Result<Self, DomainError> {
        let Some(raw) = raw else {
            return Ok(Self::default());
        };
        if raw == LAST_PAGE {
            return Ok(Self::Last);
        }
        match raw.trim().parse::<u64>() {
            Ok(number) if number >= 1 => Ok(Self::Number(number)),
            _ => Err(DomainError::PageNotFound(INVALID_PAGE.to_string())),
        }
    }

    /// Resolve against a listing of `count` items split into pages of `page_size`.
    pub fn resolve(self, count: u64, page_size: u64) -> Result<PageWindow, DomainError> {
        let page_size = page_size.max(1);
        let num_pages = count.div_ceil(page_size).max(1);
        let number = match self {
            Self::Last => num_pages,
            Self::Number(n) if (1..=num_pages).contains(&n) => n,
            Self::Number(_) => {
                return Err(DomainError::PageNotFound(INVALID_PAGE.to_string()));
            }
        };
        Ok(PageWindow {
            number,
            num_pages,
            count,
            offset: (number - 1) * page_size,
            limit: page_size,
        })
    }
}

/// The slice of a listing a resolved page covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub number: u64,
    pub num_pages: u64,
    pub count: u64,
    pub offset: u64,
    pub limit: u64,
}

/// One page of results.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: u64,
    pub num_pages: u64,
    pub count: u64,
}

impl<T> Page<T> {
    pub fn new(window: PageWindow, items: Vec<T>) -> Self {
        Self {
            items,
            number: window.number,
            num_pages: window.num_pages,
            count: window.count,
        }
    }

    pub fn next_number(&self) -> Option<u64> {
        (self.number < self.num_pages).then_some(self.number + 1)
    }

    pub fn previous_number(&self) -> Option<u64> {
        (self.number > 1).then_some(self.number - 1)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            num_pages: self.num_pages,
            count: self.count,
        }
    }
}
