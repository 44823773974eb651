// responses/json.rs
use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, ResponseBuilder};
use serde::Serialize;
use serde_json::json;

/// Serialize `value` as the response body.
pub fn json_response<T: Serialize + ?Sized>(status: u16, value: &T) -> ResultResp {
    let body = serde_json::to_vec(value).map_err(|_| ServerError::InternalError)?;

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Body::from(body))
        .map_err(|_| ServerError::InternalError)
}

/// `{ "message": ... }` with the given status.
pub fn message_response(status: u16, message: &str) -> ResultResp {
    json_response(status, &json!({ "message": message }))
}
