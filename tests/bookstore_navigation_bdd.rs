//! Behavioural tests for navigating the bookstore against a mock API.

mod support;

use litshop::LitshopConfig;
use litshop::api::ClientError;
use litshop::cli;
use litshop::view::Location;
use litshop::SessionStore;
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};
use serde_json::json;
use support::runtime::{SharedRuntime, ensure_runtime_and_server};
use support::{books_json, create_temp_dir, signed_in_store};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(ScenarioState, Default)]
struct NavigationState {
    runtime: Slot<SharedRuntime>,
    server: Slot<MockServer>,
    temp_dir: Slot<TempDir>,
    store: Slot<SessionStore>,
    result: Slot<Result<Location, ClientError>>,
    output: Slot<String>,
}

#[fixture]
fn navigation_state() -> NavigationState {
    NavigationState::default()
}

fn runtime(navigation_state: &NavigationState) -> SharedRuntime {
    ensure_runtime_and_server(&navigation_state.runtime, &navigation_state.server)
        .unwrap_or_else(|error| panic!("failed to start mock API: {error}"))
}

fn mount(navigation_state: &NavigationState, mock: Mock) {
    let shared = runtime(navigation_state);
    navigation_state
        .server
        .with_ref(|server| shared.block_on(mock.mount(server)))
        .unwrap_or_else(|| panic!("mock server not initialised"));
}

fn open(navigation_state: &NavigationState, route: &str, changes: Option<&str>) {
    let shared = runtime(navigation_state);
    let api_url = navigation_state
        .server
        .with_ref(MockServer::uri)
        .unwrap_or_else(|| panic!("mock server URL missing"));
    let session_file = navigation_state
        .store
        .with_ref(|store| store.path().to_string())
        .unwrap_or_else(|| panic!("reader has no session store"));

    let config = LitshopConfig {
        api_url: Some(api_url),
        session_file,
        route: route.trim_matches('"').to_owned(),
        set: changes.map(|raw| raw.trim_matches('"').to_owned()),
        timeout_seconds: 5,
        ..LitshopConfig::default()
    };

    let mut buffer = Vec::new();
    let result = shared.block_on(cli::run(&config, &mut buffer));
    navigation_state.result.set(result);
    navigation_state
        .output
        .set(String::from_utf8_lossy(&buffer).into_owned());
}

// --- Given steps ---

#[given("a signed-in reader")]
fn signed_in_reader(navigation_state: &NavigationState) {
    let temp_dir = create_temp_dir();
    navigation_state.store.set(signed_in_store(&temp_dir));
    navigation_state.temp_dir.set(temp_dir);
    runtime(navigation_state);
}

#[given("the API has {count:u32} books in genre {genre}")]
fn api_has_books(navigation_state: &NavigationState, count: u32, genre: String) {
    let genre_id = genre.trim_matches('"');
    let shelf_path = if genre_id == "g-tech" {
        "/books".to_owned()
    } else {
        format!("/books/genre/{genre_id}")
    };

    mount(
        navigation_state,
        Mock::given(method("GET"))
            .and(path(shelf_path))
            .respond_with(ResponseTemplate::new(200).set_body_json(books_json(count, genre_id)))
            .expect(1),
    );
    mount(
        navigation_state,
        Mock::given(method("GET"))
            .and(path("/genres"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"data": [{"id": genre_id, "name": "Shelf"}]})),
            ),
    );
}

#[given("the API expects no new books")]
fn api_expects_no_books(navigation_state: &NavigationState) {
    mount(
        navigation_state,
        Mock::given(method("POST"))
            .and(path("/books"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0),
    );
}

#[given("the API rejects the session")]
fn api_rejects_session(navigation_state: &NavigationState) {
    mount(
        navigation_state,
        Mock::given(method("GET"))
            .and(path("/transactions"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"message": "jwt expired"})),
            ),
    );
}

#[given("the API knows the reader as {user_id}")]
fn api_knows_reader(navigation_state: &NavigationState, user_id: String) {
    mount(
        navigation_state,
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"data": {"id": user_id.trim_matches('"')}})),
            )
            .expect(1),
    );
}

#[given("the API accepts orders as transaction {id:u64}")]
fn api_accepts_orders(navigation_state: &NavigationState, id: u64) {
    mount(
        navigation_state,
        Mock::given(method("POST"))
            .and(path("/transactions"))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(json!({"data": {"order": {"id": id}}})),
            )
            .expect(1),
    );
}

// --- When steps ---

#[when("the reader submits {route} with changes {changes}")]
fn reader_opens_with_changes(navigation_state: &NavigationState, route: String, changes: String) {
    open(navigation_state, &route, Some(&changes));
}

#[when("the reader opens {route}")]
fn reader_opens(navigation_state: &NavigationState, route: String) {
    open(navigation_state, &route, None);
}

// --- Then steps ---

#[then("the navigation ends at {expected}")]
fn assert_ends_at(navigation_state: &NavigationState, expected: String) {
    let result = navigation_state
        .result
        .take()
        .unwrap_or_else(|| panic!("no navigation ran"));
    let location = result.unwrap_or_else(|error| panic!("navigation failed: {error}"));
    assert_eq!(location.to_string(), expected.trim_matches('"'));
}

#[then("the navigation fails on field {name}")]
fn assert_fails_on_field(navigation_state: &NavigationState, name: String) {
    let result = navigation_state
        .result
        .take()
        .unwrap_or_else(|| panic!("no navigation ran"));
    let expected = name.trim_matches('"');
    assert!(
        matches!(result, Err(ClientError::Validation { ref field, .. }) if field == expected),
        "expected a validation error on {expected}, got {result:?}"
    );
}

#[then("the output mentions {text}")]
fn assert_output_mentions(navigation_state: &NavigationState, text: String) {
    let output = navigation_state
        .output
        .get()
        .unwrap_or_else(|| panic!("no navigation ran"));
    let expected = text.trim_matches('"');
    assert!(output.contains(expected), "output lacks {expected:?}:\n{output}");
}

#[then("the session is cleared")]
fn assert_session_cleared(navigation_state: &NavigationState) {
    let session = navigation_state
        .store
        .with_ref(SessionStore::load)
        .unwrap_or_else(|| panic!("reader has no session store"))
        .unwrap_or_else(|error| panic!("session could not be read: {error}"));
    assert!(session.is_none(), "expected the session to be removed");
}

#[then("the API received every expected request")]
fn assert_expectations_met(navigation_state: &NavigationState) {
    let shared = runtime(navigation_state);
    navigation_state
        .server
        .with_ref(|server| shared.block_on(server.verify()))
        .unwrap_or_else(|| panic!("mock server not initialised"));
}

#[then("the API received no requests")]
fn assert_no_requests(navigation_state: &NavigationState) {
    let shared = runtime(navigation_state);
    let received = navigation_state
        .server
        .with_ref(|server| shared.block_on(server.received_requests()))
        .unwrap_or_else(|| panic!("mock server not initialised"))
        .unwrap_or_default();
    assert!(received.is_empty(), "expected no requests, got {}", received.len());
}

// --- Scenario bindings ---

#[scenario(path = "tests/features/catalog.feature", index = 0)]
fn genre_filter_fetches_shelf(navigation_state: NavigationState) {
    let _ = navigation_state;
}

#[scenario(path = "tests/features/catalog.feature", index = 1)]
fn untitled_book_is_never_sent(navigation_state: NavigationState) {
    let _ = navigation_state;
}

#[scenario(path = "tests/features/catalog.feature", index = 2)]
fn expired_session_sends_reader_to_login(navigation_state: NavigationState) {
    let _ = navigation_state;
}

#[scenario(path = "tests/features/checkout.feature", index = 0)]
fn order_opens_new_transaction(navigation_state: NavigationState) {
    let _ = navigation_state;
}

#[scenario(path = "tests/features/checkout.feature", index = 1)]
fn empty_cart_is_rejected_locally(navigation_state: NavigationState) {
    let _ = navigation_state;
}
