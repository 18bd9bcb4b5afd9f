//! Behavioural tests for keeping the catalog in step with its location.

use litshop::api::BookQuery;
use litshop::api::models::test_support::numbered_books;
use litshop::catalog::BookCatalog;
use litshop::view::{FetchOutcome, History, ListViewSynchronizer, Location, RequestTicket};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};

#[derive(ScenarioState, Default)]
struct SyncState {
    sync: Slot<ListViewSynchronizer<BookCatalog>>,
    ticket: Slot<RequestTicket<BookQuery>>,
    outcome: Slot<FetchOutcome>,
}

#[fixture]
fn sync_state() -> SyncState {
    SyncState::default()
}

fn with_sync<R>(
    sync_state: &SyncState,
    action: impl FnOnce(&mut ListViewSynchronizer<BookCatalog>) -> R,
) -> R {
    let mut sync = sync_state
        .sync
        .take()
        .unwrap_or_else(|| panic!("catalog not opened"));
    let result = action(&mut sync);
    sync_state.sync.set(sync);
    result
}

#[given("a catalog opened at {raw}")]
fn open_catalog(sync_state: &SyncState, raw: String) {
    let location = Location::parse(raw.trim_matches('"'))
        .unwrap_or_else(|error| panic!("invalid location {raw}: {error}"));
    sync_state
        .sync
        .set(ListViewSynchronizer::new(BookCatalog, History::new(location)));
}

fn fetch_books(sync_state: &SyncState, count: u32) {
    let outcome = with_sync(sync_state, |sync| {
        let ticket = sync.begin_fetch();
        sync.complete_fetch(ticket, Ok(numbered_books(count)))
    });
    sync_state.outcome.set(outcome);
}

#[given("the server returns {count:u32} books")]
fn server_returned_books(sync_state: &SyncState, count: u32) {
    fetch_books(sync_state, count);
}

#[when("the server returns {count:u32} books")]
fn server_returns_books(sync_state: &SyncState, count: u32) {
    fetch_books(sync_state, count);
}

#[given("a fetch has started")]
fn fetch_started(sync_state: &SyncState) {
    let ticket = with_sync(sync_state, ListViewSynchronizer::begin_fetch);
    sync_state.ticket.set(ticket);
}

#[when("the parameter {key} is set to {value}")]
fn set_parameter(sync_state: &SyncState, key: String, value: String) {
    with_sync(sync_state, |sync| {
        sync.set_param(key.trim_matches('"'), value.trim_matches('"'))
    });
}

#[when("the pending fetch returns {count:u32} books")]
fn pending_fetch_returns(sync_state: &SyncState, count: u32) {
    let ticket = sync_state
        .ticket
        .take()
        .unwrap_or_else(|| panic!("no fetch in flight"));
    let outcome = with_sync(sync_state, |sync| {
        sync.complete_fetch(ticket, Ok(numbered_books(count)))
    });
    sync_state.outcome.set(outcome);
}

#[then("the location is {expected}")]
fn assert_location(sync_state: &SyncState, expected: String) {
    let actual = sync_state
        .sync
        .with_ref(|sync| sync.location().to_string())
        .unwrap_or_else(|| panic!("catalog not opened"));
    assert_eq!(actual, expected.trim_matches('"'), "location mismatch");
}

#[then("no fetch is needed")]
fn assert_no_fetch(sync_state: &SyncState) {
    let needed = sync_state
        .sync
        .with_ref(ListViewSynchronizer::needs_fetch)
        .unwrap_or_else(|| panic!("catalog not opened"));
    assert!(!needed, "expected the loaded scope to still apply");
}

#[then("a fetch is needed")]
fn assert_fetch_needed(sync_state: &SyncState) {
    let needed = sync_state
        .sync
        .with_ref(ListViewSynchronizer::needs_fetch)
        .unwrap_or_else(|| panic!("catalog not opened"));
    assert!(needed, "expected the scope change to require a fetch");
}

#[then("the response is discarded")]
fn assert_discarded(sync_state: &SyncState) {
    let outcome = sync_state
        .outcome
        .get()
        .unwrap_or_else(|| panic!("no fetch completed"));
    assert_eq!(outcome, FetchOutcome::Discarded);
}

#[then("the view shows page {page:u32} of {total:u32} with {count:usize} books")]
fn assert_page(sync_state: &SyncState, page: u32, total: u32, count: usize) {
    let (actual_page, actual_total, actual_count) = sync_state
        .sync
        .with_ref(|sync| {
            let visible = sync.visible();
            (
                visible.info.current_page(),
                visible.info.total_pages(),
                visible.items.len(),
            )
        })
        .unwrap_or_else(|| panic!("catalog not opened"));

    assert_eq!(actual_page, page, "current page mismatch");
    assert_eq!(actual_total, total, "total pages mismatch");
    assert_eq!(actual_count, count, "visible book count mismatch");
}

#[then("the page is past the last page")]
fn assert_out_of_range(sync_state: &SyncState) {
    let out_of_range = sync_state
        .sync
        .with_ref(|sync| sync.visible().info.is_out_of_range())
        .unwrap_or_else(|| panic!("catalog not opened"));
    assert!(out_of_range, "expected the page to lie past the end");
}

#[scenario(path = "tests/features/list_view_sync.feature", index = 0)]
fn paging_through_catalog(sync_state: SyncState) {
    let _ = sync_state;
}

#[scenario(path = "tests/features/list_view_sync.feature", index = 1)]
fn filter_change_resets_page(sync_state: SyncState) {
    let _ = sync_state;
}

#[scenario(path = "tests/features/list_view_sync.feature", index = 2)]
fn superseded_response_is_discarded(sync_state: SyncState) {
    let _ = sync_state;
}

#[scenario(path = "tests/features/list_view_sync.feature", index = 3)]
fn page_past_end_is_empty(sync_state: SyncState) {
    let _ = sync_state;
}
