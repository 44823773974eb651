// src/auth/sessions.rs
use crate::auth::token::{generate_token_default, hash_token, parse_bearer};
use crate::db::connection::Database;
use crate::domain::User;
use crate::errors::ServerError;
use rusqlite::{params, Connection, OptionalExtension};

pub const SESSION_TTL_SECS: i64 = 60 * 60 * 24 * 7; // 7 days

pub fn create_session(conn: &Connection, user_id: i64, now: i64) -> Result<String, ServerError> {
    let raw_token = generate_token_default();
    let hash = hash_token(&raw_token);
    let expires_at = now + SESSION_TTL_SECS;

    conn.execute(
        r#"
        insert into sessions (user_id, token_hash, created_at, expires_at)
        values (?, ?, ?, ?)
        "#,
        params![user_id, hash.as_slice(), now, expires_at],
    )
    .map_err(|e| ServerError::DbError(format!("create session failed: {e}")))?;

    Ok(raw_token)
}

pub fn load_user_from_session(
    conn: &Connection,
    raw_token: &str,
    now: i64,
) -> Result<Option<User>, ServerError> {
    let hash = hash_token(raw_token);

    conn.query_row(
        r#"
        select u.id, u.name, u.email
        from sessions s
        join users u on u.id = s.user_id
        where s.token_hash = ?
          and s.expires_at > ?
          and s.revoked_at is null
        "#,
        params![hash.as_slice(), now],
        |row| {
            Ok(User {
                id: row.get(0)?,
                name: row.get(1)?,
                email: row.get(2)?,
            })
        },
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("session lookup failed: {e}")))
}

pub fn revoke_session(conn: &Connection, raw_token: &str, now: i64) -> Result<bool, ServerError> {
    let hash = hash_token(raw_token);
    let n = conn
        .execute(
            "update sessions set revoked_at = ? where token_hash = ? and revoked_at is null",
            params![now, hash.as_slice()],
        )
        .map_err(|e| ServerError::DbError(format!("revoke session failed: {e}")))?;
    Ok(n > 0)
}

/// Resolve the user behind an `Authorization` header value.
pub fn authenticate(
    db: &Database,
    authorization: Option<&str>,
    now: i64,
) -> Result<User, ServerError> {
    let token = authorization
        .and_then(parse_bearer)
        .ok_or_else(|| ServerError::Unauthorized("No token".into()))?;

    db.with_conn(|conn| load_user_from_session(conn, token, now))?
        .ok_or_else(|| ServerError::Unauthorized("Invalid token".into()))
}
