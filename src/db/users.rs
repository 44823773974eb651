// src/db/users.rs
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};

use crate::domain::User;
use crate::errors::ServerError;

/// Insert a new account and return its id.
/// Email should already be normalized by caller (trim/lowercase).
pub fn create_user(
    conn: &Connection,
    name: &str,
    email: &str,
    password_hash: &str,
    now: i64,
) -> Result<i64, ServerError> {
    let inserted = conn.execute(
        "insert into users (name, email, password_hash, created_at) values (?, ?, ?, ?)",
        params![name, email, password_hash, now],
    );

    match inserted {
        Ok(_) => Ok(conn.last_insert_rowid()),
        Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
            Err(ServerError::BadRequest(
                "An account with that email already exists".into(),
            ))
        }
        Err(e) => Err(ServerError::DbError(format!("insert user failed: {e}"))),
    }
}

/// Account plus stored password hash, for login.
pub fn find_credentials(
    conn: &Connection,
    email: &str,
) -> Result<Option<(User, String)>, ServerError> {
    conn.query_row(
        "select id, name, email, password_hash from users where email = ?",
        params![email],
        |r| {
            Ok((
                User {
                    id: r.get(0)?,
                    name: r.get(1)?,
                    email: r.get(2)?,
                },
                r.get(3)?,
            ))
        },
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("select user failed: {e}")))
}
