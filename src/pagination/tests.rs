//! Tests for pagination module

use super::*;
use crate::error::Error;
use test_case::test_case;

// ============================================================================
// NextPage Tests
// ============================================================================

#[test]
fn test_next_page_predicates() {
    let next = NextPage::Continue { page: 2 };
    assert!(next.is_continue());
    assert!(!next.is_done());

    let next = NextPage::Done(StopReason::EmptyPage);
    assert!(next.is_done());
    assert!(!next.is_continue());
}

// ============================================================================
// PaginationState Tests
// ============================================================================

#[test]
fn test_pagination_state_default() {
    let state = PaginationState::new();
    assert_eq!(state.page, 0);
    assert_eq!(state.pages_fetched, 0);
    assert_eq!(state.total_fetched, 0);
    assert!(!state.done);
}

#[test]
fn test_pagination_state_mutations() {
    let mut state = PaginationState::with_page(1);

    state.next_page();
    assert_eq!(state.page, 2);

    state.add_page(100);
    state.add_page(40);
    assert_eq!(state.pages_fetched, 2);
    assert_eq!(state.total_fetched, 140);

    state.mark_done();
    assert!(state.done);
}

// ============================================================================
// PagePaginator Tests
// ============================================================================

#[test]
fn test_paginator_defaults() {
    let paginator = PagePaginator::default();
    assert_eq!(paginator.page_size, PER_PAGE);
    assert_eq!(paginator.page_size, 100);
    assert_eq!(paginator.start_page, 1);
    assert_eq!(paginator.max_pages, 0);
    assert_eq!(paginator.start().page, 1);
}

#[test]
fn test_empty_first_page_stops() {
    let paginator = PagePaginator::new(100);
    let mut state = paginator.start();

    let next = paginator.process_page(0, &mut state).unwrap();
    assert_eq!(next, NextPage::Done(StopReason::EmptyPage));
    assert!(state.done);
    assert_eq!(state.pages_fetched, 1);
}

#[test_case(1 ; "single record")]
#[test_case(50 ; "half page")]
#[test_case(99 ; "one short")]
fn test_short_page_stops(count: usize) {
    let paginator = PagePaginator::new(100);
    let mut state = paginator.start();

    let next = paginator.process_page(count, &mut state).unwrap();
    assert_eq!(next, NextPage::Done(StopReason::ShortPage));
    assert_eq!(state.total_fetched, count as u64);
}

#[test]
fn test_full_page_continues() {
    let paginator = PagePaginator::new(100);
    let mut state = paginator.start();

    let next = paginator.process_page(100, &mut state).unwrap();
    assert_eq!(next, NextPage::Continue { page: 2 });
    assert!(!state.done);

    let next = paginator.process_page(100, &mut state).unwrap();
    assert_eq!(next, NextPage::Continue { page: 3 });

    let next = paginator.process_page(0, &mut state).unwrap();
    assert_eq!(next, NextPage::Done(StopReason::EmptyPage));
    assert_eq!(state.total_fetched, 200);
    assert_eq!(state.pages_fetched, 3);
}

#[test]
fn test_page_ceiling_errors() {
    let paginator = PagePaginator::new(10).with_max_pages(3);
    let mut state = paginator.start();

    assert!(paginator.process_page(10, &mut state).unwrap().is_continue());
    assert!(paginator.process_page(10, &mut state).unwrap().is_continue());

    let err = paginator.process_page(10, &mut state).unwrap_err();
    assert!(matches!(err, Error::PaginationLimit { max_pages: 3 }));
    assert!(state.done);
}

#[test]
fn test_page_ceiling_allows_short_last_page() {
    let paginator = PagePaginator::new(10).with_max_pages(2);
    let mut state = paginator.start();

    assert!(paginator.process_page(10, &mut state).unwrap().is_continue());
    let next = paginator.process_page(4, &mut state).unwrap();
    assert_eq!(next, NextPage::Done(StopReason::ShortPage));
}

#[test]
fn test_unbounded_paginator_keeps_going() {
    let paginator = PagePaginator::new(1);
    let mut state = paginator.start();

    for expected in 2..=500 {
        let next = paginator.process_page(1, &mut state).unwrap();
        assert_eq!(next, NextPage::Continue { page: expected });
    }
}
