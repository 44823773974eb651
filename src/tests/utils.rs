use crate::db::{init_db, replace_all_properties, Database};
use crate::responses::error_to_response;
use crate::router::handle;
use crate::search::SampleDataset;
use crate::state::AppState;
use astra::{Body, Response};
use http::{Method, Request};
use serde_json::Value;
use std::io::Read;
use tempfile::TempDir;

/// Fresh database in a temp dir with the production schema. Keep the
/// `TempDir` alive for as long as the state is used.
pub fn init_test_state() -> (TempDir, AppState) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("test.sqlite3");
    let db = Database::new(path.to_string_lossy().into_owned());

    init_db(&db).unwrap_or_else(|e| panic!("Database initialization failed: {e}"));

    let sample = SampleDataset::bundled().expect("Bundled dataset should parse");
    (dir, AppState::new(db, sample))
}

/// Copy the sample records into the primary store.
pub fn seed_store(state: &AppState) -> usize {
    replace_all_properties(&state.db, state.sample.all()).expect("Seeding failed")
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    request(Method::GET, uri, token, None)
}

pub fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header("Content-Type", "application/json");
            Body::from(json.to_string().into_bytes())
        }
        None => Body::empty(),
    };
    builder.body(body).unwrap()
}

pub fn body_json(resp: Response) -> Value {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    serde_json::from_str(&body).unwrap_or_else(|e| panic!("Response is not JSON ({e}): {body}"))
}

/// Run a request through the router, rendering errors the way the server does.
pub fn send(state: &AppState, req: Request<Body>) -> Response {
    handle(req, state).unwrap_or_else(error_to_response)
}
