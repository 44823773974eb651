// src/auth/accounts.rs
use rusqlite::Connection;
use serde::Serialize;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::sessions::create_session;
use crate::db::users;
use crate::domain::User;
use crate::errors::ServerError;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Token plus profile, returned by signup and login.
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}

/// Trim + lowercase, minimal sanity check.
pub fn normalize_email(email: &str) -> Result<String, ServerError> {
    let e = email.trim().to_lowercase();
    if e.is_empty() || !e.contains('@') || e.starts_with('@') || e.ends_with('@') {
        return Err(ServerError::BadRequest("invalid email".into()));
    }
    Ok(e)
}

fn check_password(password: &str) -> Result<(), ServerError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ServerError::BadRequest(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

/// Create the account and open a session for it.
pub fn signup(
    conn: &Connection,
    name: &str,
    email: &str,
    password: &str,
    now: i64,
) -> Result<AuthSession, ServerError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ServerError::BadRequest("name is required".into()));
    }
    let email = normalize_email(email)?;
    check_password(password)?;

    let hash = hash_password(password)?;
    let id = users::create_user(conn, name, &email, &hash, now)?;
    let token = create_session(conn, id, now)?;

    Ok(AuthSession {
        token,
        user: User {
            id,
            name: name.to_string(),
            email,
        },
    })
}

/// Unknown email and wrong password produce the same error.
pub fn login(
    conn: &Connection,
    email: &str,
    password: &str,
    now: i64,
) -> Result<AuthSession, ServerError> {
    let invalid = || ServerError::Unauthorized("Invalid credentials".into());

    let email = normalize_email(email).map_err(|_| invalid())?;
    let (user, stored_hash) = users::find_credentials(conn, &email)?.ok_or_else(invalid)?;
    if !verify_password(password, &stored_hash) {
        return Err(invalid());
    }

    let token = create_session(conn, user.id, now)?;
    Ok(AuthSession { token, user })
}
