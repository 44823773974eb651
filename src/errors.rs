// errors.rs
use thiserror::Error;

/// Errors originating from either the server logic
/// (routing, missing resources, auth) or downstream layers (DB).
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Database Error: {0}")]
    DbError(String),

    #[error("Internal Server Error")]
    InternalError,
}

impl From<rusqlite::Error> for ServerError {
    fn from(e: rusqlite::Error) -> Self {
        ServerError::DbError(e.to_string())
    }
}

impl From<serde_json::Error> for ServerError {
    fn from(e: serde_json::Error) -> Self {
        ServerError::DbError(format!("json column: {e}"))
    }
}
