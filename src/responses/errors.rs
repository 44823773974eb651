use crate::errors::ServerError;
use astra::{Body, Response, ResponseBuilder};
use tracing::error;

pub type ResultResp = Result<Response, ServerError>;

/// Convert a ServerError into a JSON `{ "message": ... }` response.
/// Details of 5xx errors are logged, not sent to the client.
pub fn error_to_response(err: ServerError) -> Response {
    match err {
        ServerError::NotFound(msg) => render_error(404, &msg),
        ServerError::BadRequest(msg) => render_error(400, &msg),
        ServerError::Unauthorized(msg) => render_error(401, &msg),
        ServerError::DbError(msg) => {
            error!(error = %msg, "database error");
            render_error(500, "Server error")
        }
        ServerError::InternalError => {
            error!("internal error");
            render_error(500, "Server error")
        }
    }
}

fn render_error(status: u16, message: &str) -> Response {
    let body = serde_json::json!({ "message": message }).to_string();

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Body::from(body))
        .unwrap_or_else(|_| Response::new(Body::from("Server error")))
}
