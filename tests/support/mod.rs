//! Shared test utilities.

use litshop::api::BearerToken;
use litshop::{SessionState, SessionStore};
use serde_json::{Value, json};
use tempfile::TempDir;

pub mod runtime;

/// Creates a temporary directory for session files.
///
/// # Panics
///
/// Panics if the temporary directory cannot be created.
pub fn create_temp_dir() -> TempDir {
    TempDir::new().unwrap_or_else(|error| panic!("failed to create temporary directory: {error}"))
}

/// Returns a session store inside `dir` holding a signed-in session.
///
/// # Panics
///
/// Panics if the path is not UTF-8 or the session cannot be written.
pub fn signed_in_store(dir: &TempDir) -> SessionStore {
    let path = dir.path().join("session.json");
    let path_str = path
        .to_str()
        .unwrap_or_else(|| panic!("temporary path {} is not UTF-8", path.display()));
    let store = SessionStore::new(path_str);
    let token = BearerToken::new("reader-token")
        .unwrap_or_else(|error| panic!("fixture token rejected: {error}"));
    store
        .save(&SessionState::new(&token))
        .unwrap_or_else(|error| panic!("failed to write session: {error}"));
    store
}

/// Builds `count` books shaped like API rows, ids `1..=count`, each priced
/// at Rp100.000 with ten copies in `genre_id`.
pub fn books_json(count: u32, genre_id: &str) -> Value {
    let rows: Vec<Value> = (1..=count)
        .map(|index| {
            json!({
                "id": index,
                "title": format!("Book {index:02}"),
                "writer": format!("Writer {index:02}"),
                "price": 100_000,
                "stock_quantity": 10,
                "genre": {"id": genre_id, "name": "Shelf"}
            })
        })
        .collect();
    json!({ "data": rows })
}
