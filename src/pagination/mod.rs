//! Pagination module
//!
//! Page-number pagination over the stories listing.
//!
//! # Overview
//!
//! The listing is walked one page at a time. A page decides what happens
//! next: an empty page or a short page ends the walk, a full page asks for
//! the following one. A configurable ceiling turns a backend that never
//! returns a short page into an error instead of an endless loop.

mod paginator;
mod types;

pub use paginator::{PagePaginator, PER_PAGE};
pub use types::{NextPage, PaginationState, StopReason};

#[cfg(test)]
mod tests;
