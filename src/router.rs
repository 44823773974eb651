use crate::errors::ServerError;
use crate::responses::{json_response, ResultResp};
use crate::routes;
use crate::search::QueryParams;
use crate::state::AppState;
use astra::Request;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::io::Read;

const MAX_BODY_BYTES: u64 = 64 * 1024;

pub fn handle(mut req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match (method.as_str(), segments.as_slice()) {
        ("GET", []) => json_response(200, &json!({ "ok": true, "message": "Estates API" })),

        ("GET", ["api", "properties"]) => routes::properties::list(&req, state),
        ("GET", ["api", "properties", id]) => routes::properties::get(id, state),

        ("POST", ["api", "auth", "signup"]) => routes::auth::signup(&mut req, state),
        ("POST", ["api", "auth", "login"]) => routes::auth::login(&mut req, state),
        ("POST", ["api", "auth", "logout"]) => routes::auth::logout(&req, state),
        ("GET", ["api", "auth", "me"]) => routes::auth::me(&req, state),

        ("GET", ["api", "cart"]) => routes::cart::list(&req, state),
        ("POST", ["api", "cart"]) => routes::cart::add(&mut req, state),
        ("GET", ["api", "cart", "check", id]) => routes::cart::check(&req, id, state),
        ("DELETE", ["api", "cart", id]) => routes::cart::remove(&req, id, state),

        _ => Err(ServerError::NotFound("Route not found".into())),
    }
}

/// Decoded query string; repeated keys keep the last value.
pub fn parse_query(req: &Request) -> QueryParams {
    req.uri()
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}

/// Value of the `Authorization` header, if it is valid UTF-8.
pub fn authorization(req: &Request) -> Option<&str> {
    req.headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
}

/// Read and decode a JSON request body.
pub fn read_json<T: DeserializeOwned>(req: &mut Request) -> Result<T, ServerError> {
    let mut buf = Vec::new();
    req.body_mut()
        .reader()
        .take(MAX_BODY_BYTES + 1)
        .read_to_end(&mut buf)
        .map_err(|e| ServerError::BadRequest(format!("Failed to read body: {e}")))?;

    if buf.len() as u64 > MAX_BODY_BYTES {
        return Err(ServerError::BadRequest("Request body too large".into()));
    }
    if buf.is_empty() {
        return Err(ServerError::BadRequest("Request body required".into()));
    }

    serde_json::from_slice(&buf).map_err(|e| ServerError::BadRequest(format!("Invalid JSON: {e}")))
}

pub fn now_unix() -> i64 {
    chrono::Utc::now().timestamp()
}
