//! Page-number paginator
//!
//! Drives `page`/`per_page` pagination with empty-page and short-page
//! termination.

use super::types::{NextPage, PaginationState, StopReason};
use crate::error::{Error, Result};

/// Stories requested per page
pub const PER_PAGE: u32 = 100;

/// Page number pagination with a fixed page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePaginator {
    /// Records requested per page
    pub page_size: u32,
    /// First page number
    pub start_page: u32,
    /// Maximum number of full pages before giving up (0 = unbounded)
    pub max_pages: u32,
}

impl Default for PagePaginator {
    fn default() -> Self {
        Self::new(PER_PAGE)
    }
}

impl PagePaginator {
    /// Create a paginator starting at page 1 with no page ceiling
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size,
            start_page: 1,
            max_pages: 0,
        }
    }

    /// Set the page ceiling
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// State for the first request
    pub fn start(&self) -> PaginationState {
        PaginationState::with_page(self.start_page)
    }

    /// Process a fetched page and decide whether another one is needed
    ///
    /// Checks run in order: empty page, short page, page ceiling. Only a
    /// full page below the ceiling advances the state.
    pub fn process_page(
        &self,
        records_count: usize,
        state: &mut PaginationState,
    ) -> Result<NextPage> {
        state.add_page(records_count as u64);

        if records_count == 0 {
            state.mark_done();
            return Ok(NextPage::Done(StopReason::EmptyPage));
        }

        if records_count < self.page_size as usize {
            state.mark_done();
            return Ok(NextPage::Done(StopReason::ShortPage));
        }

        if self.max_pages > 0 && state.pages_fetched >= self.max_pages {
            state.mark_done();
            return Err(Error::PaginationLimit {
                max_pages: self.max_pages,
            });
        }

        state.next_page();
        Ok(NextPage::Continue { page: state.page })
    }
}
